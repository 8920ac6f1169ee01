//! The YAML intent registry.
//!
//! Humans author this file; the engine only ever reads it. Parsing is
//! tolerant by design: unknown keys are ignored and every intent field
//! except `id` has a default. Structural violations (e.g. `owned_scope`
//! given as a scalar) fail the whole read, and the engine fails closed.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use warden_core::{atomic_write, Intent};

use crate::{StoreError, ORCHESTRATION_DIR};

pub const INTENTS_FILE: &str = "active_intents.yaml";

/// Top-level document shape of `active_intents.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntentRegistry {
    #[serde(default)]
    pub active_intents: Vec<Intent>,
}

/// Reads (and bootstraps) the workspace intent registry.
#[derive(Debug, Clone)]
pub struct IntentStore {
    root: PathBuf,
}

impl IntentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Absolute path of the registry file.
    pub fn path(&self) -> PathBuf {
        self.root.join(ORCHESTRATION_DIR).join(INTENTS_FILE)
    }

    /// Create an empty registry if none exists. Idempotent.
    pub fn ensure(&self) -> Result<(), StoreError> {
        if !self.path().exists() {
            self.save(&IntentRegistry::default())?;
        }
        Ok(())
    }

    /// Parse the registry. A missing or empty file is an empty registry;
    /// anything else that fails to read or parse is `REGISTRY_UNREADABLE`.
    pub fn load(&self) -> Result<IntentRegistry, StoreError> {
        let path = self.path();
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(IntentRegistry::default())
            }
            Err(e) => {
                return Err(StoreError::RegistryUnreadable(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            }
        };

        if content.trim().is_empty() {
            return Ok(IntentRegistry::default());
        }

        let registry: IntentRegistry = serde_yaml_ng::from_str(&content).map_err(|e| {
            StoreError::RegistryUnreadable(format!("{}: {}", path.display(), e))
        })?;

        warn_on_duplicate_ids(&registry);
        Ok(registry)
    }

    /// Resolve an intent by exact id. Registry order, first match wins.
    pub fn get_intent(&self, id: &str) -> Result<Option<Intent>, StoreError> {
        let registry = self.load()?;
        Ok(registry
            .active_intents
            .into_iter()
            .find(|intent| intent.id == id))
    }

    /// All ids, in registry order.
    pub fn list_intent_ids(&self) -> Result<Vec<String>, StoreError> {
        let registry = self.load()?;
        Ok(registry
            .active_intents
            .into_iter()
            .map(|intent| intent.id)
            .collect())
    }

    /// Serialize and atomically replace the registry file. The engine never
    /// calls this on its own; it exists for bootstrap and tooling.
    pub fn save(&self, registry: &IntentRegistry) -> Result<(), StoreError> {
        let yaml = serde_yaml_ng::to_string(registry)
            .map_err(|e| StoreError::RegistryUnreadable(e.to_string()))?;
        atomic_write(&self.path(), yaml.as_bytes())?;
        Ok(())
    }
}

fn warn_on_duplicate_ids(registry: &IntentRegistry) {
    let mut seen = HashSet::new();
    for intent in &registry.active_intents {
        if !seen.insert(intent.id.as_str()) {
            tracing::warn!(intent_id = %intent.id, "duplicate intent id in registry; first occurrence wins");
        }
    }
}
