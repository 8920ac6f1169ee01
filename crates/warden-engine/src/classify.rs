//! Mutation classification.
//!
//! A mutation is `INTENT_EVOLUTION` when the written content introduces new
//! surface area: an exported top-level symbol, a class/interface/enum/type
//! declaration, an HTTP route registration, or a schema migration. Anything
//! else is `AST_REFACTOR`. The markers are textual heuristics; a richer
//! AST-based classifier would slot in here without touching the engine.

use once_cell::sync::Lazy;
use regex::Regex;
use warden_core::MutationClass;

struct MutationMarker {
    name: &'static str,
    regex: Regex,
}

impl MutationMarker {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            regex: Regex::new(pattern).expect("Invalid marker pattern"),
        }
    }
}

static EVOLUTION_MARKERS: Lazy<Vec<MutationMarker>> = Lazy::new(|| {
    vec![
        MutationMarker::new(
            "export",
            r"(?m)^\s*export\s+(?:default\s+)?(?:abstract\s+)?(?:async\s+)?(?:function|class|const|let|var|interface|type|enum)\b",
        ),
        MutationMarker::new("commonjs-export", r"(?m)^\s*module\.exports\b"),
        MutationMarker::new(
            "class-declaration",
            r"(?m)^\s*(?:export\s+)?(?:default\s+)?(?:abstract\s+)?class\s+[A-Za-z_$]",
        ),
        MutationMarker::new(
            "interface-declaration",
            r"(?m)^\s*(?:export\s+)?interface\s+[A-Za-z_$]",
        ),
        MutationMarker::new("enum-declaration", r"(?m)^\s*(?:export\s+)?enum\s+[A-Za-z_$]"),
        MutationMarker::new(
            "type-alias",
            r"(?m)^\s*(?:export\s+)?type\s+[A-Za-z_$][\w$]*\s*=",
        ),
        MutationMarker::new(
            "route-registration",
            r"\b(?:app|router|server)\.(?:get|post|put|patch|delete)\s*\(",
        ),
        MutationMarker::new(
            "migration-keyword",
            r"(?i)\b(?:create\s+table|alter\s+table|drop\s+table|add\s+column|create\s+(?:unique\s+)?index)\b",
        ),
    ]
});

/// Classify written content by scanning for evolution markers.
pub fn classify_content(content: &str) -> MutationClass {
    if EVOLUTION_MARKERS.iter().any(|m| m.regex.is_match(content)) {
        MutationClass::IntentEvolution
    } else {
        MutationClass::AstRefactor
    }
}

/// Classify raw post-write bytes; non-UTF-8 content is matched lossily.
pub fn classify_bytes(bytes: &[u8]) -> MutationClass {
    classify_content(&String::from_utf8_lossy(bytes))
}

/// Names of the markers that fired, for diagnostics.
pub fn matched_markers(content: &str) -> Vec<&'static str> {
    EVOLUTION_MARKERS
        .iter()
        .filter(|m| m.regex.is_match(content))
        .map(|m| m.name)
        .collect()
}
