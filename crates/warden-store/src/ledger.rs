//! The append-only JSONL trace ledger.
//!
//! One JSON object per line. Appends are a single `write_all` of a fully
//! serialized buffer against an `O_APPEND` handle, so concurrent engine
//! processes interleave at whole-line granularity and a cancelled call
//! never leaves a partial line behind.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use warden_core::TraceRecord;

use crate::{StoreError, ORCHESTRATION_DIR};

pub const TRACE_FILE: &str = "agent_trace.jsonl";

/// Appends and reads the workspace audit ledger.
#[derive(Debug, Clone)]
pub struct TraceLedger {
    root: PathBuf,
}

impl TraceLedger {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Absolute path of the ledger file.
    pub fn path(&self) -> PathBuf {
        self.root.join(ORCHESTRATION_DIR).join(TRACE_FILE)
    }

    /// Append one record. Durable (`sync_data`) before returning.
    pub fn append(&self, record: &TraceRecord) -> Result<(), StoreError> {
        let line = serde_json::to_string(record)
            .map_err(|e| StoreError::LedgerCorrupt(e.to_string()))?;
        if line.contains('\n') {
            return Err(StoreError::RecordNotLineSafe(record.id.clone()));
        }

        let path = self.path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut buf = line.into_bytes();
        buf.push(b'\n');

        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        file.write_all(&buf)?;
        file.sync_data()?;
        Ok(())
    }

    /// Parse every record. Blank lines are skipped; any malformed line is
    /// `LEDGER_CORRUPT`.
    pub fn read_all(&self) -> Result<Vec<TraceRecord>, StoreError> {
        let path = self.path();
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        parse_lines(&content, &path)
    }

    /// Records for one intent, in append order.
    pub fn entries_for_intent(&self, intent_id: &str) -> Result<Vec<TraceRecord>, StoreError> {
        let mut records = self.read_all()?;
        records.retain(|r| r.intent_id == intent_id);
        Ok(records)
    }
}

fn parse_lines(content: &str, path: &Path) -> Result<Vec<TraceRecord>, StoreError> {
    let mut records = Vec::new();
    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(line).map_err(|e| {
            StoreError::LedgerCorrupt(format!("{}:{}: {}", path.display(), index + 1, e))
        })?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use warden_core::{Contributor, FileAttribution, MutationClass};

    fn record(intent_id: &str, tool: &str) -> TraceRecord {
        TraceRecord::new(
            intent_id,
            tool,
            MutationClass::AstRefactor,
            vec![FileAttribution {
                relative_path: "src/lib.rs".to_string(),
                content_hash: "sha256:00".to_string(),
                contributor: Contributor::ai("unknown"),
            }],
        )
    }

    #[test]
    fn test_append_then_read_round_trip() {
        let dir = tempdir().unwrap();
        let ledger = TraceLedger::new(dir.path());

        let first = record("INT-001", "write_to_file");
        let second = record("INT-002", "apply_diff");
        ledger.append(&first).unwrap();
        ledger.append(&second).unwrap();

        let records = ledger.read_all().unwrap();
        assert_eq!(records, vec![first, second]);
    }

    #[test]
    fn test_missing_ledger_reads_empty() {
        let dir = tempdir().unwrap();
        let ledger = TraceLedger::new(dir.path());
        assert!(ledger.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_blank_lines_skipped() {
        let dir = tempdir().unwrap();
        let ledger = TraceLedger::new(dir.path());
        ledger.append(&record("INT-001", "write_to_file")).unwrap();

        let mut content = std::fs::read_to_string(ledger.path()).unwrap();
        content.push('\n');
        content.push('\n');
        std::fs::write(ledger.path(), content).unwrap();

        assert_eq!(ledger.read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_corrupt_line_is_reported_with_position() {
        let dir = tempdir().unwrap();
        let ledger = TraceLedger::new(dir.path());
        ledger.append(&record("INT-001", "write_to_file")).unwrap();

        let mut content = std::fs::read_to_string(ledger.path()).unwrap();
        content.push_str("{not json\n");
        std::fs::write(ledger.path(), content).unwrap();

        let err = ledger.read_all().unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("LEDGER_CORRUPT"));
        assert!(message.contains(":2:"));
    }

    #[test]
    fn test_entries_for_intent_filters() {
        let dir = tempdir().unwrap();
        let ledger = TraceLedger::new(dir.path());
        ledger.append(&record("INT-001", "write_to_file")).unwrap();
        ledger.append(&record("INT-002", "apply_diff")).unwrap();
        ledger.append(&record("INT-001", "insert_content")).unwrap();

        let entries = ledger.entries_for_intent("INT-001").unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|r| r.intent_id == "INT-001"));
    }

    #[test]
    fn test_existing_records_stable_across_appends() {
        let dir = tempdir().unwrap();
        let ledger = TraceLedger::new(dir.path());

        ledger.append(&record("INT-001", "write_to_file")).unwrap();
        let before = ledger.read_all().unwrap();

        ledger.append(&record("INT-001", "apply_diff")).unwrap();
        let after = ledger.read_all().unwrap();

        assert_eq!(&after[..before.len()], &before[..]);
    }

    #[test]
    fn test_one_line_per_record() {
        let dir = tempdir().unwrap();
        let ledger = TraceLedger::new(dir.path());
        ledger.append(&record("INT-001", "write_to_file")).unwrap();
        ledger.append(&record("INT-001", "apply_diff")).unwrap();

        let content = std::fs::read_to_string(ledger.path()).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.ends_with('\n'));
    }
}
