//! Gate decisions and the stable reason tokens embedded in them.

use serde::Serialize;

/// Stable uppercase tokens carried in blocked reasons. Hosts and models
/// match on these; never change them.
pub const INTENT_REQUIRED: &str = "INTENT_REQUIRED";
pub const INTENT_NOT_FOUND: &str = "INTENT_NOT_FOUND";
pub const SCOPE_VIOLATION: &str = "SCOPE_VIOLATION";
pub const STALE_FILE: &str = "STALE_FILE";
pub const PATH_INVALID: &str = "PATH_INVALID";
pub const REGISTRY_UNREADABLE: &str = "REGISTRY_UNREADABLE";
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

/// Outcome of a pre-hook check. The pre-hook never raises to the host; a
/// failure of any kind becomes `allowed: false` with a reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateDecision {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl GateDecision {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    pub fn block(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
        }
    }

    pub fn is_blocked(&self) -> bool {
        !self.allowed
    }

    /// True when the blocked reason carries the given token.
    pub fn has_token(&self, token: &str) -> bool {
        self.reason.as_deref().is_some_and(|r| r.contains(token))
    }

    /// The JSON payload a host feeds back to its model for a blocked call.
    /// `None` when the call was allowed.
    pub fn blocked_payload(&self, tool: &str) -> Option<serde_json::Value> {
        if self.allowed {
            return None;
        }
        Some(serde_json::json!({
            "type": "HOOK_BLOCKED",
            "tool": tool,
            "error": self.reason.clone().unwrap_or_default(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_has_no_reason() {
        let decision = GateDecision::allow();
        assert!(decision.allowed);
        assert!(decision.reason.is_none());
    }

    #[test]
    fn test_block_carries_reason() {
        let decision = GateDecision::block(format!("{INTENT_REQUIRED}: bind an intent first"));
        assert!(decision.is_blocked());
        assert!(decision.has_token(INTENT_REQUIRED));
        assert!(!decision.has_token(STALE_FILE));
    }

    #[test]
    fn test_serialization_omits_empty_reason() {
        let json = serde_json::to_string(&GateDecision::allow()).unwrap();
        assert_eq!(json, r#"{"allowed":true}"#);
    }

    #[test]
    fn test_blocked_payload_shape() {
        let decision = GateDecision::block("SCOPE_VIOLATION: out of scope");
        let payload = decision.blocked_payload("write_to_file").unwrap();
        assert_eq!(payload["type"], "HOOK_BLOCKED");
        assert_eq!(payload["tool"], "write_to_file");
        assert!(payload["error"].as_str().unwrap().contains("SCOPE_VIOLATION"));

        assert!(GateDecision::allow().blocked_payload("write_to_file").is_none());
    }
}
