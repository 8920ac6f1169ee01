//! A single compiled scope glob.

use globset::{GlobBuilder, GlobMatcher};

#[derive(Debug, thiserror::Error)]
pub enum ScopeError {
    #[error("invalid scope glob: {0}")]
    InvalidGlob(#[from] globset::Error),
}

/// A compiled glob pattern for matching workspace-relative paths.
#[derive(Debug, Clone)]
pub struct ScopePattern {
    original: String,
    matcher: GlobMatcher,
}

impl ScopePattern {
    /// Compile a glob. `literal_separator` keeps `*` and `?` from crossing
    /// `/`, so only `**` can span directories.
    pub fn new(glob: &str) -> Result<Self, ScopeError> {
        let matcher = GlobBuilder::new(glob)
            .literal_separator(true)
            .build()?
            .compile_matcher();

        Ok(Self {
            original: glob.to_string(),
            matcher,
        })
    }

    pub fn matches(&self, path: &str) -> bool {
        self.matcher.is_match(path)
    }

    /// The glob as written in the registry.
    pub fn original(&self) -> &str {
        &self.original
    }
}
