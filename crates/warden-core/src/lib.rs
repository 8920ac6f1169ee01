//! Core data model for the Warden governance middleware.
//!
//! Everything here is shared by the stores, the scope matcher, and the hook
//! engine: intent records, trace records, content fingerprints, and
//! workspace-relative path validation.

pub mod atomic_write;
pub mod fingerprint;
pub mod intent;
pub mod path;
pub mod trace;

pub use atomic_write::atomic_write;
pub use fingerprint::{fingerprint_bytes, fingerprint_file, ABSENT};
pub use intent::{Intent, IntentStatus};
pub use path::{normalize_rel_path, PathError};
pub use trace::{Contributor, FileAttribution, MutationClass, TraceRecord};
