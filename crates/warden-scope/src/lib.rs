//! Scope matching: does a workspace-relative path fall inside an intent's
//! owned glob set?
//!
//! Semantics are deliberately small and deterministic: `*` and `?` never
//! cross a `/`, `**` spans any number of segments, anything else matches
//! literally and case-sensitively. A path is in scope iff it matches at
//! least one glob; an empty glob set owns nothing.

mod pattern;

pub use pattern::{ScopeError, ScopePattern};

/// An intent's compiled glob set.
#[derive(Debug, Clone)]
pub struct ScopeSet {
    patterns: Vec<ScopePattern>,
}

impl ScopeSet {
    /// Compile every glob up front so matching is infallible.
    pub fn compile(globs: &[String]) -> Result<Self, ScopeError> {
        let patterns = globs
            .iter()
            .map(|g| ScopePattern::new(g))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// True iff `path` matches at least one glob in the set.
    pub fn contains(&self, path: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(path))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }
}

/// One-shot convenience over [`ScopeSet::compile`] + [`ScopeSet::contains`].
pub fn in_scope(path: &str, globs: &[String]) -> Result<bool, ScopeError> {
    Ok(ScopeSet::compile(globs)?.contains(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn globs(patterns: &[&str]) -> Vec<String> {
        patterns.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_set_owns_nothing() {
        assert!(!in_scope("src/main.rs", &[]).unwrap());
    }

    #[test]
    fn test_double_star_spans_segments() {
        let set = ScopeSet::compile(&globs(&["src/api/**"])).unwrap();
        assert!(set.contains("src/api/weather.ts"));
        assert!(set.contains("src/api/v2/forecast/daily.ts"));
        assert!(!set.contains("src/auth/middleware.ts"));
        assert!(!set.contains("docs/api.md"));
    }

    #[test]
    fn test_single_star_stays_in_segment() {
        let set = ScopeSet::compile(&globs(&["src/*.ts"])).unwrap();
        assert!(set.contains("src/index.ts"));
        assert!(!set.contains("src/api/index.ts"));
    }

    #[test]
    fn test_question_mark_is_one_char() {
        let set = ScopeSet::compile(&globs(&["src/v?.rs"])).unwrap();
        assert!(set.contains("src/v1.rs"));
        assert!(!set.contains("src/v10.rs"));
        assert!(!set.contains("src/v.rs"));
    }

    #[test]
    fn test_literal_glob_is_exact() {
        let set = ScopeSet::compile(&globs(&["Cargo.toml"])).unwrap();
        assert!(set.contains("Cargo.toml"));
        assert!(!set.contains("cargo.toml"));
        assert!(!set.contains("crates/Cargo.toml"));
    }

    #[test]
    fn test_any_glob_in_set_matches() {
        let set = ScopeSet::compile(&globs(&["docs/**", "src/api/**"])).unwrap();
        assert!(set.contains("docs/readme.md"));
        assert!(set.contains("src/api/weather.ts"));
        assert!(!set.contains("src/auth/session.ts"));
    }

    #[test]
    fn test_leading_double_star() {
        let set = ScopeSet::compile(&globs(&["**/*.sql"])).unwrap();
        assert!(set.contains("schema.sql"));
        assert!(set.contains("migrations/2024/add_users.sql"));
        assert!(!set.contains("migrations/readme.md"));
    }

    #[test]
    fn test_invalid_glob_is_an_error() {
        assert!(ScopeSet::compile(&globs(&["src/[oops"])).is_err());
    }
}
