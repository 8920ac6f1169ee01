//! Audit trail record types for the trace ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coarse label assigned to a mutation for later analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MutationClass {
    /// Structural change with no new surface: renames, moves, rewrites.
    AstRefactor,
    /// The mutation introduced new surface: an exported symbol, a type, a
    /// route, or a schema migration.
    IntentEvolution,
}

impl MutationClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AstRefactor => "AST_REFACTOR",
            Self::IntentEvolution => "INTENT_EVOLUTION",
        }
    }
}

impl std::fmt::Display for MutationClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Who produced the bytes attributed to a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contributor {
    pub entity_type: String,
    pub model_identifier: String,
}

impl Contributor {
    pub fn ai(model_identifier: impl Into<String>) -> Self {
        Self {
            entity_type: "AI".to_string(),
            model_identifier: model_identifier.into(),
        }
    }
}

/// One file touched by a mutation, with its post-write content hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileAttribution {
    pub relative_path: String,
    pub content_hash: String,
    pub contributor: Contributor,
}

/// One completed, authorized mutation. Serialized as a single JSON line in
/// the ledger; once written it is never rewritten or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceRecord {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub intent_id: String,
    pub tool: String,
    pub mutation_class: MutationClass,
    pub files: Vec<FileAttribution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_ms: Option<u64>,
}

impl TraceRecord {
    pub fn new(
        intent_id: impl Into<String>,
        tool: impl Into<String>,
        mutation_class: MutationClass,
        files: Vec<FileAttribution>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            intent_id: intent_id.into(),
            tool: tool.into(),
            mutation_class,
            files,
            elapsed_ms: None,
        }
    }

    pub fn with_elapsed_ms(mut self, elapsed_ms: Option<u64>) -> Self {
        self.elapsed_ms = elapsed_ms;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutation_class_wire_names() {
        assert_eq!(
            serde_json::to_string(&MutationClass::IntentEvolution).unwrap(),
            "\"INTENT_EVOLUTION\""
        );
        let parsed: MutationClass = serde_json::from_str("\"AST_REFACTOR\"").unwrap();
        assert_eq!(parsed, MutationClass::AstRefactor);
    }

    #[test]
    fn test_record_round_trip() {
        let record = TraceRecord::new(
            "INT-001",
            "write_to_file",
            MutationClass::AstRefactor,
            vec![FileAttribution {
                relative_path: "src/api/weather.ts".to_string(),
                content_hash: "sha256:abc".to_string(),
                contributor: Contributor::ai("unknown"),
            }],
        )
        .with_elapsed_ms(Some(42));

        let line = serde_json::to_string(&record).unwrap();
        let parsed: TraceRecord = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_record_ids_are_unique() {
        let a = TraceRecord::new("INT-001", "apply_diff", MutationClass::AstRefactor, vec![]);
        let b = TraceRecord::new("INT-001", "apply_diff", MutationClass::AstRefactor, vec![]);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_elapsed_ms_omitted_when_absent() {
        let record = TraceRecord::new("INT-001", "execute_command", MutationClass::AstRefactor, vec![]);
        let line = serde_json::to_string(&record).unwrap();
        assert!(!line.contains("elapsed_ms"));
    }

    #[test]
    fn test_contributor_ai() {
        let c = Contributor::ai("claude-sonnet");
        assert_eq!(c.entity_type, "AI");
        assert_eq!(c.model_identifier, "claude-sonnet");
    }
}
