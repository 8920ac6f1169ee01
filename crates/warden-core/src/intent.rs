//! Intent records as they appear in the workspace registry.

use serde::{Deserialize, Serialize};

/// Lifecycle state of an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntentStatus {
    #[default]
    Pending,
    InProgress,
    Blocked,
    Done,
}

impl IntentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Blocked => "BLOCKED",
            Self::Done => "DONE",
        }
    }
}

impl std::fmt::Display for IntentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A declared, scoped unit of work an agent can bind its turn to.
///
/// The registry is human-authored, so every field except `id` tolerates
/// absence. Unknown fields are ignored on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    /// Short stable identifier, e.g. `INT-001`.
    pub id: String,

    /// Human label.
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub status: IntentStatus,

    /// Glob patterns (workspace-relative, forward-slash) this intent is
    /// authorized to mutate. Empty means nothing is in scope.
    #[serde(default)]
    pub owned_scope: Vec<String>,

    /// Free-form constraints, surfaced verbatim to the agent.
    #[serde(default)]
    pub constraints: Vec<String>,

    #[serde(default)]
    pub acceptance_criteria: Vec<String>,
}

impl Intent {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status: IntentStatus::Pending,
            owned_scope: Vec::new(),
            constraints: Vec::new(),
            acceptance_criteria: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: IntentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_scope(mut self, globs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.owned_scope = globs.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&IntentStatus::InProgress).unwrap(),
            "\"IN_PROGRESS\""
        );
        let parsed: IntentStatus = serde_json::from_str("\"BLOCKED\"").unwrap();
        assert_eq!(parsed, IntentStatus::Blocked);
    }

    #[test]
    fn test_intent_tolerates_missing_fields() {
        let intent: Intent = serde_json::from_str(r#"{"id": "INT-007"}"#).unwrap();
        assert_eq!(intent.id, "INT-007");
        assert_eq!(intent.status, IntentStatus::Pending);
        assert!(intent.name.is_empty());
        assert!(intent.owned_scope.is_empty());
        assert!(intent.constraints.is_empty());
    }

    #[test]
    fn test_intent_builder() {
        let intent = Intent::new("INT-001", "Weather endpoint")
            .with_status(IntentStatus::InProgress)
            .with_scope(["src/api/**"]);

        assert_eq!(intent.status, IntentStatus::InProgress);
        assert_eq!(intent.owned_scope, vec!["src/api/**".to_string()]);
    }

    #[test]
    fn test_missing_id_is_an_error() {
        let result = serde_json::from_str::<Intent>(r#"{"name": "no id"}"#);
        assert!(result.is_err());
    }
}
