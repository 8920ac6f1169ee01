//! The hook seam hosts dispatch through.
//!
//! Hosts that route tool execution through an event bus implement their
//! wrapping once against this trait; the engine's gate is mounted as one
//! hook among others.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Events a hook can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HookEvent {
    PreToolUse,
    PostToolUse,
}

/// Input delivered with a tool-use event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HookInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_input: Option<serde_json::Value>,

    /// Wall-clock duration of the tool's own execution, post-tool-use only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_ms: Option<u64>,

    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl HookInput {
    pub fn for_tool(tool_name: impl Into<String>, tool_input: serde_json::Value) -> Self {
        Self {
            tool_name: Some(tool_name.into()),
            tool_input: Some(tool_input),
            ..Self::default()
        }
    }

    pub fn with_elapsed_ms(mut self, elapsed_ms: u64) -> Self {
        self.elapsed_ms = Some(elapsed_ms);
        self
    }
}

/// Outcome of a hook execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookOutput {
    #[serde(rename = "continue")]
    pub should_continue: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl HookOutput {
    pub fn pass() -> Self {
        Self {
            should_continue: true,
            reason: None,
        }
    }

    pub fn block_with_reason(reason: impl Into<String>) -> Self {
        Self {
            should_continue: false,
            reason: Some(reason.into()),
        }
    }
}

/// Result type for hook execution. An `Err` means the hook itself failed;
/// blocking a tool is expressed through [`HookOutput`].
pub type HookResult = anyhow::Result<HookOutput>;

/// A hook invoked around tool execution.
#[async_trait]
pub trait Hook: Send + Sync {
    /// Unique identifier for this hook.
    fn name(&self) -> &str;

    /// Events this hook should be triggered on.
    fn events(&self) -> &[HookEvent];

    /// Execute the hook logic.
    async fn execute(&self, event: HookEvent, input: &HookInput) -> HookResult;
}
