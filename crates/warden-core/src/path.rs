//! Workspace-relative path validation.
//!
//! Every path crossing the engine API must be workspace-relative with
//! forward slashes, no leading `./`, and no parent components.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("path is empty")]
    Empty,

    #[error("path is absolute: {0}")]
    Absolute(String),

    #[error("path contains a parent component: {0}")]
    ParentTraversal(String),
}

/// Normalize a raw tool-supplied path into canonical workspace-relative
/// form, or reject it.
///
/// Backslashes are normalized to `/`, `.` segments and duplicate slashes
/// are dropped. Absolute paths (POSIX or drive-lettered) and any `..`
/// segment are rejected.
pub fn normalize_rel_path(raw: &str) -> Result<String, PathError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PathError::Empty);
    }

    let slashed = trimmed.replace('\\', "/");
    if slashed.starts_with('/') || has_drive_prefix(&slashed) {
        return Err(PathError::Absolute(raw.to_string()));
    }

    let segments: Vec<&str> = slashed
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();

    if segments.iter().any(|s| *s == "..") {
        return Err(PathError::ParentTraversal(raw.to_string()));
    }
    if segments.is_empty() {
        return Err(PathError::Empty);
    }

    Ok(segments.join("/"))
}

fn has_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}
