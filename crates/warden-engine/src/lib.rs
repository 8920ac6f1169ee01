//! The Warden hook engine.
//!
//! The engine sits between an agent loop and its file-mutating tools. It is
//! invoked at exactly three points: once per handshake
//! ([`HookEngine::select_intent`]), before every governed tool call
//! ([`HookEngine::pre_hook`]), and after every completed mutation
//! ([`HookEngine::post_hook`]). Hosts that dispatch through an event bus can
//! mount [`IntentGateHook`] instead, which adapts pre/post tool-use events
//! onto the same engine.

pub mod adapter;
pub mod classify;
pub mod context;
pub mod decision;
pub mod engine;
pub mod freshness;
pub mod hook;
pub mod prompt;
pub mod tools;

pub use adapter::IntentGateHook;
pub use classify::classify_content;
pub use decision::GateDecision;
pub use engine::{EngineError, HookEngine};
pub use freshness::{Freshness, FreshnessCache};
pub use hook::{Hook, HookEvent, HookInput, HookOutput, HookResult};
pub use prompt::{governance_prompt, select_intent_tool_schema, SELECT_INTENT_TOOL};
pub use tools::ToolKind;
