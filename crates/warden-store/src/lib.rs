//! Workspace sidecar stores.
//!
//! Both stores live under `<workspace>/.orchestration/`: the human-authored
//! intent registry (`active_intents.yaml`) and the append-only trace ledger
//! (`agent_trace.jsonl`). The registry is read-only from the engine's point
//! of view; the ledger is write-mostly and shared between concurrent agent
//! processes at whole-line granularity.

mod ledger;
mod registry;

pub use ledger::{TraceLedger, TRACE_FILE};
pub use registry::{IntentRegistry, IntentStore, INTENTS_FILE};

/// Workspace-relative directory holding both sidecar files.
pub const ORCHESTRATION_DIR: &str = ".orchestration";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The registry exists but could not be read or parsed. The engine
    /// fails closed on this.
    #[error("REGISTRY_UNREADABLE: {0}")]
    RegistryUnreadable(String),

    /// A ledger line failed to parse. Surfaced to the caller only, never
    /// to the language model.
    #[error("LEDGER_CORRUPT: {0}")]
    LedgerCorrupt(String),

    /// A record serialized with an embedded newline and would break the
    /// one-line-per-record contract.
    #[error("trace record is not line-safe: {0}")]
    RecordNotLineSafe(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
