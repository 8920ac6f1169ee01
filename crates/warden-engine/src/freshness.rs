//! Per-session freshness tracking.
//!
//! The cache remembers the last content fingerprint the engine observed for
//! each path it authorized. It lives and dies with the engine instance; it
//! is never persisted or shared between processes. It does not prevent
//! out-of-band writes; it refuses to overwrite work this session never saw.

use std::collections::HashMap;
use std::io;
use std::path::Path;

use warden_core::fingerprint::fingerprint_file;

/// Result of comparing the on-disk state of a path with the last observed
/// fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// On-disk fingerprint matches the observed one.
    Fresh,
    /// The file changed out from under this session.
    Stale,
    /// Never observed this session; first touch is always permitted.
    Unknown,
}

#[derive(Debug, Default)]
pub struct FreshnessCache {
    observed: HashMap<String, String>,
}

impl FreshnessCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current on-disk fingerprint for a workspace-relative path.
    pub fn observe(&mut self, root: &Path, rel_path: &str) -> io::Result<()> {
        let fingerprint = fingerprint_file(&root.join(rel_path))?;
        self.observed.insert(rel_path.to_string(), fingerprint);
        Ok(())
    }

    /// Compare the current on-disk fingerprint with the observed one.
    pub fn check(&self, root: &Path, rel_path: &str) -> io::Result<Freshness> {
        let Some(observed) = self.observed.get(rel_path) else {
            return Ok(Freshness::Unknown);
        };
        let current = fingerprint_file(&root.join(rel_path))?;
        Ok(if current == *observed {
            Freshness::Fresh
        } else {
            Freshness::Stale
        })
    }

    pub fn len(&self) -> usize {
        self.observed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }
}
