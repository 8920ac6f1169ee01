//! Tool classification: which tools are governed, and how to find the path
//! a call intends to touch.
//!
//! Adding a governed tool means adding a variant here and, if it bears a
//! path, teaching [`ToolKind::target_path`] where to find it. Nothing else
//! in the engine changes.

use serde_json::Value;

/// Read-only discovery tools, always admitted without an intent.
pub const SAFE_TOOLS: &[&str] = &[
    "read_file",
    "list_files",
    "list_code_definition_names",
    "search_files",
    "browser_action",
    "ask_followup_question",
    "attempt_completion",
];

/// Tools that mutate the workspace and are gated on an active intent.
pub const MUTATING_TOOLS: &[&str] = &[
    "write_to_file",
    "apply_diff",
    "insert_content",
    "search_and_replace",
    "execute_command",
];

/// Known tool kinds. Tool names outside this table are not governed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    ReadFile,
    ListFiles,
    ListCodeDefinitionNames,
    SearchFiles,
    BrowserAction,
    AskFollowupQuestion,
    AttemptCompletion,
    WriteToFile,
    ApplyDiff,
    InsertContent,
    SearchAndReplace,
    ExecuteCommand,
}

impl ToolKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "read_file" => Some(Self::ReadFile),
            "list_files" => Some(Self::ListFiles),
            "list_code_definition_names" => Some(Self::ListCodeDefinitionNames),
            "search_files" => Some(Self::SearchFiles),
            "browser_action" => Some(Self::BrowserAction),
            "ask_followup_question" => Some(Self::AskFollowupQuestion),
            "attempt_completion" => Some(Self::AttemptCompletion),
            "write_to_file" => Some(Self::WriteToFile),
            "apply_diff" => Some(Self::ApplyDiff),
            "insert_content" => Some(Self::InsertContent),
            "search_and_replace" => Some(Self::SearchAndReplace),
            "execute_command" => Some(Self::ExecuteCommand),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::ReadFile => "read_file",
            Self::ListFiles => "list_files",
            Self::ListCodeDefinitionNames => "list_code_definition_names",
            Self::SearchFiles => "search_files",
            Self::BrowserAction => "browser_action",
            Self::AskFollowupQuestion => "ask_followup_question",
            Self::AttemptCompletion => "attempt_completion",
            Self::WriteToFile => "write_to_file",
            Self::ApplyDiff => "apply_diff",
            Self::InsertContent => "insert_content",
            Self::SearchAndReplace => "search_and_replace",
            Self::ExecuteCommand => "execute_command",
        }
    }

    /// True for tools that change workspace state.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Self::WriteToFile
                | Self::ApplyDiff
                | Self::InsertContent
                | Self::SearchAndReplace
                | Self::ExecuteCommand
        )
    }

    /// True for mutating tools whose target is a single declared path.
    /// `execute_command` mutates but cannot be attributed statically.
    pub fn writes_path(&self) -> bool {
        matches!(
            self,
            Self::WriteToFile | Self::ApplyDiff | Self::InsertContent | Self::SearchAndReplace
        )
    }

    /// Extract the declared target path from the tool's params.
    pub fn target_path<'a>(&self, params: &'a Value) -> Option<&'a str> {
        if !self.writes_path() {
            return None;
        }
        params.get("path").and_then(Value::as_str)
    }
}
