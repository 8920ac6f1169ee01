//! Mounts the hook engine as an event-bus hook.
//!
//! The engine itself is synchronous and owned; this adapter serializes
//! access behind a mutex and contains panics at the host boundary: a panic
//! during gating blocks the tool, a panic during trace emission is logged
//! and swallowed so it never reaches the host's tool path.

use std::panic::{catch_unwind, AssertUnwindSafe};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::decision::INTERNAL_ERROR;
use crate::engine::HookEngine;
use crate::hook::{Hook, HookEvent, HookInput, HookOutput, HookResult};

pub const HOOK_NAME: &str = "intent-gate";

const EVENTS: &[HookEvent] = &[HookEvent::PreToolUse, HookEvent::PostToolUse];

/// The governance gate, packaged as a [`Hook`].
pub struct IntentGateHook {
    engine: Mutex<HookEngine>,
}

impl IntentGateHook {
    pub fn new(engine: HookEngine) -> Self {
        Self {
            engine: Mutex::new(engine),
        }
    }

    /// Handshake entry point for the host's `select_active_intent` tool.
    pub fn select_intent(&self, intent_id: &str) -> String {
        self.engine.lock().select_intent(intent_id)
    }

    pub fn active_intent_id(&self) -> Option<String> {
        self.engine.lock().active_intent_id().map(str::to_string)
    }

    /// Prompt fragment for the host's system prompt.
    pub fn governance_prompt(&self) -> String {
        self.engine.lock().governance_prompt()
    }
}

#[async_trait]
impl Hook for IntentGateHook {
    fn name(&self) -> &str {
        HOOK_NAME
    }

    fn events(&self) -> &[HookEvent] {
        EVENTS
    }

    async fn execute(&self, event: HookEvent, input: &HookInput) -> HookResult {
        let Some(tool) = input.tool_name.as_deref() else {
            return Ok(HookOutput::pass());
        };
        let params = input.tool_input.clone().unwrap_or(Value::Null);

        match event {
            HookEvent::PreToolUse => {
                let mut engine = self.engine.lock();
                let decision =
                    catch_unwind(AssertUnwindSafe(|| engine.pre_hook(tool, &params)));
                match decision {
                    Ok(decision) if decision.allowed => Ok(HookOutput::pass()),
                    Ok(decision) => Ok(HookOutput::block_with_reason(
                        decision.reason.unwrap_or_else(|| INTERNAL_ERROR.to_string()),
                    )),
                    Err(_) => Ok(HookOutput::block_with_reason(format!(
                        "{INTERNAL_ERROR}: governance pre-hook panicked; '{tool}' blocked"
                    ))),
                }
            }
            HookEvent::PostToolUse => {
                let mut engine = self.engine.lock();
                let result = catch_unwind(AssertUnwindSafe(|| {
                    engine.post_hook(tool, &params, input.elapsed_ms)
                }));
                match result {
                    Ok(Ok(_)) => Ok(HookOutput::pass()),
                    // The mutation happened but its audit record did not
                    // land; the host must see the gap.
                    Ok(Err(e)) => Err(e.into()),
                    Err(_) => {
                        tracing::error!(
                            tool = %tool,
                            "governance post-hook panicked; mutation left unrecorded"
                        );
                        Ok(HookOutput::pass())
                    }
                }
            }
        }
    }
}
