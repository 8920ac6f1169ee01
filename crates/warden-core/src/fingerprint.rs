//! Content fingerprints used for freshness checks and ledger attribution.

use sha2::{Digest, Sha256};
use std::io;
use std::path::Path;

/// Sentinel fingerprint for a path that does not exist on disk.
pub const ABSENT: &str = "ABSENT";

/// Fingerprint raw bytes: `sha256:` + lowercase hex of SHA-256.
pub fn fingerprint_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("sha256:{}", hex::encode(hasher.finalize()))
}

/// Fingerprint the bytes currently on disk at `path`, or [`ABSENT`] if the
/// path does not exist.
pub fn fingerprint_file(path: &Path) -> io::Result<String> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(fingerprint_bytes(&bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(ABSENT.to_string()),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_fingerprint_is_deterministic() {
        let a = fingerprint_bytes(b"export class WeatherService {}");
        let b = fingerprint_bytes(b"export class WeatherService {}");
        assert_eq!(a, b);
    }

    #[test]
    fn test_known_vector() {
        // SHA-256 of the empty input.
        assert_eq!(
            fingerprint_bytes(b""),
            "sha256:e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_different_bytes_differ() {
        assert_ne!(fingerprint_bytes(b"a"), fingerprint_bytes(b"b"));
    }

    #[test]
    fn test_absent_file() {
        let dir = tempdir().unwrap();
        let fp = fingerprint_file(&dir.path().join("missing.txt")).unwrap();
        assert_eq!(fp, ABSENT);
    }

    #[test]
    fn test_file_matches_bytes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("f.txt");
        std::fs::write(&path, b"hello").unwrap();
        assert_eq!(fingerprint_file(&path).unwrap(), fingerprint_bytes(b"hello"));
    }
}
