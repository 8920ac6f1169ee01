//! The hook engine: handshake, pre-hook gating, post-hook trace emission.
//!
//! One engine instance belongs to one agent session. It owns the bound
//! intent id and the freshness cache; cross-process coordination happens
//! only through the workspace sidecar files.

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use warden_core::{
    fingerprint_bytes, normalize_rel_path, Contributor, FileAttribution, MutationClass,
    PathError, TraceRecord,
};
use warden_scope::ScopeSet;
use warden_store::{IntentStore, StoreError, TraceLedger};

use crate::classify::classify_bytes;
use crate::context::render_intent_context;
use crate::decision::{
    GateDecision, INTENT_NOT_FOUND, INTENT_REQUIRED, INTERNAL_ERROR, PATH_INVALID,
    SCOPE_VIOLATION, STALE_FILE,
};
use crate::freshness::{Freshness, FreshnessCache};
use crate::prompt;
use crate::tools::ToolKind;

/// Errors the engine can raise to its caller. Pre-hook failures never take
/// this route; they fail closed inside the returned [`GateDecision`].
#[derive(Debug, Error)]
pub enum EngineError {
    /// `post_hook` was called for a mutating tool with no bound intent.
    /// The pre-hook never admits that sequence; this is host misuse.
    #[error("no active intent bound to this session")]
    MissingIntent,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("PATH_INVALID: {0}")]
    Path(#[from] PathError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub struct HookEngine {
    root: PathBuf,
    store: IntentStore,
    ledger: TraceLedger,
    freshness: FreshnessCache,
    active_intent_id: Option<String>,
    model_identifier: String,
}

impl HookEngine {
    /// Create an engine for one agent session over `root` (the workspace
    /// directory containing `.orchestration/`).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            store: IntentStore::new(&root),
            ledger: TraceLedger::new(&root),
            freshness: FreshnessCache::new(),
            active_intent_id: None,
            model_identifier: "unknown".to_string(),
            root,
        }
    }

    /// Record this model identifier as the contributor on trace records.
    pub fn with_model_identifier(mut self, model_identifier: impl Into<String>) -> Self {
        self.model_identifier = model_identifier.into();
        self
    }

    pub fn workspace_root(&self) -> &Path {
        &self.root
    }

    pub fn active_intent_id(&self) -> Option<&str> {
        self.active_intent_id.as_deref()
    }

    /// The handshake. On a hit, binds the intent to this session and
    /// returns its `<intent_context>` block; every miss returns a string
    /// beginning with `ERROR` and leaves the binding unchanged.
    pub fn select_intent(&mut self, id: &str) -> String {
        match self.store.get_intent(id) {
            Ok(Some(intent)) => {
                self.active_intent_id = Some(intent.id.clone());
                render_intent_context(&intent)
            }
            Ok(None) => {
                let available = self.store.list_intent_ids().unwrap_or_default();
                let listing = if available.is_empty() {
                    "(none declared)".to_string()
                } else {
                    available.join(", ")
                };
                format!(
                    "ERROR: {INTENT_NOT_FOUND}: no intent with id '{id}'. \
                     Available intent ids: {listing}. \
                     Call {} with one of these.",
                    prompt::SELECT_INTENT_TOOL
                )
            }
            // StoreError Display already carries REGISTRY_UNREADABLE.
            Err(e) => format!("ERROR: {e}"),
        }
    }

    /// Prompt fragment for the host's system prompt, reflecting the
    /// registry as it stands right now.
    pub fn governance_prompt(&self) -> String {
        let ids = self.store.list_intent_ids().unwrap_or_default();
        prompt::governance_prompt(&ids)
    }

    /// Gate a tool call. Never raises: every internal failure becomes a
    /// blocked decision.
    pub fn pre_hook(&mut self, tool: &str, params: &Value) -> GateDecision {
        let Some(kind) = ToolKind::from_name(tool) else {
            // Not in the governance table; the host dispatches it as-is.
            return GateDecision::allow();
        };
        if !kind.is_mutating() {
            return GateDecision::allow();
        }

        let Some(intent_id) = self.active_intent_id.clone() else {
            return GateDecision::block(format!(
                "{INTENT_REQUIRED}: '{tool}' mutates the workspace but no intent is bound. \
                 Call {} first.",
                prompt::SELECT_INTENT_TOOL
            ));
        };

        let intent = match self.store.get_intent(&intent_id) {
            Ok(Some(intent)) => intent,
            Ok(None) => {
                return GateDecision::block(format!(
                    "{INTENT_NOT_FOUND}: active intent '{intent_id}' is no longer in the registry."
                ))
            }
            // Fail closed; the error text carries REGISTRY_UNREADABLE.
            Err(e) => return GateDecision::block(e.to_string()),
        };

        if kind == ToolKind::ExecuteCommand {
            // Commands may touch arbitrary paths; scope and freshness cannot
            // be attributed to one target. The post-hook records them
            // unattributed.
            return GateDecision::allow();
        }

        let Some(raw_path) = kind.target_path(params) else {
            return GateDecision::block(format!(
                "{PATH_INVALID}: '{tool}' call carries no 'path' parameter."
            ));
        };
        let path = match normalize_rel_path(raw_path) {
            Ok(path) => path,
            Err(e) => {
                return GateDecision::block(format!("{PATH_INVALID}: '{raw_path}': {e}"))
            }
        };

        let scope = match ScopeSet::compile(&intent.owned_scope) {
            Ok(scope) => scope,
            Err(e) => {
                return GateDecision::block(format!(
                    "{INTERNAL_ERROR}: owned_scope of intent '{}' failed to compile: {e}",
                    intent.id
                ))
            }
        };
        if !scope.contains(&path) {
            return GateDecision::block(format!(
                "{SCOPE_VIOLATION}: intent '{}' does not own '{}'. owned_scope: [{}]",
                intent.id,
                path,
                intent.owned_scope.join(", ")
            ));
        }

        match self.freshness.check(&self.root, &path) {
            Ok(Freshness::Stale) => {
                return GateDecision::block(format!(
                    "{STALE_FILE}: '{path}' changed on disk since this session last observed it. \
                     Re-read the file, then retry."
                ))
            }
            Ok(Freshness::Fresh | Freshness::Unknown) => {}
            Err(e) => {
                return GateDecision::block(format!(
                    "{INTERNAL_ERROR}: freshness check failed for '{path}': {e}"
                ))
            }
        }

        // Baseline for the post-write comparison is the pre-write state.
        if let Err(e) = self.freshness.observe(&self.root, &path) {
            return GateDecision::block(format!(
                "{INTERNAL_ERROR}: could not fingerprint '{path}': {e}"
            ));
        }

        GateDecision::allow()
    }

    /// Record a completed mutation. Returns the appended record, or `None`
    /// for tools that do not mutate. The ledger append is durable before
    /// this returns; a freshness-cache failure afterwards is logged and
    /// tolerated (the next pre-hook fails safe, not open).
    pub fn post_hook(
        &mut self,
        tool: &str,
        params: &Value,
        elapsed_ms: Option<u64>,
    ) -> Result<Option<TraceRecord>, EngineError> {
        let Some(kind) = ToolKind::from_name(tool) else {
            return Ok(None);
        };
        if !kind.is_mutating() {
            return Ok(None);
        }

        let intent_id = self
            .active_intent_id
            .clone()
            .ok_or(EngineError::MissingIntent)?;

        let mut mutation_class = MutationClass::AstRefactor;
        let mut files = Vec::new();
        let mut written_path = None;

        if kind.writes_path() {
            let raw_path = kind.target_path(params).ok_or(PathError::Empty)?;
            let path = normalize_rel_path(raw_path)?;
            let bytes = read_post_write(&self.root.join(&path))?;
            mutation_class = classify_bytes(&bytes);
            files.push(FileAttribution {
                relative_path: path.clone(),
                content_hash: fingerprint_bytes(&bytes),
                contributor: Contributor::ai(&self.model_identifier),
            });
            written_path = Some(path);
        }

        let record = TraceRecord::new(&intent_id, tool, mutation_class, files)
            .with_elapsed_ms(elapsed_ms);
        self.ledger.append(&record)?;

        if let Some(path) = written_path {
            if let Err(e) = self.freshness.observe(&self.root, &path) {
                tracing::warn!(
                    path = %path,
                    error = %e,
                    "freshness cache not updated after ledger append; next pre-hook may block stale"
                );
            }
        }

        Ok(Some(record))
    }
}

fn read_post_write(path: &Path) -> std::io::Result<Vec<u8>> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(bytes),
        // A write-family tool can legitimately leave no file behind (e.g. a
        // diff that deleted it); attribute empty content.
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e),
    }
}
