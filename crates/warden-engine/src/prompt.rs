//! The prompt fragment and tool schema the host surfaces to its model.

use serde_json::{json, Value};

use crate::tools::MUTATING_TOOLS;

/// Name of the handshake tool exposed to the language model.
pub const SELECT_INTENT_TOOL: &str = "select_active_intent";

/// Canned system-prompt fragment listing the currently-available intents.
/// The host prepends this to its own system prompt.
pub fn governance_prompt(intent_ids: &[String]) -> String {
    let ids = if intent_ids.is_empty() {
        "(none declared yet)".to_string()
    } else {
        intent_ids.join(", ")
    };

    format!(
        "## Intent governance\n\n\
         This workspace is governed. File-mutating tools ({}) are blocked \
         until you bind the turn to a declared intent, and every mutation \
         must stay inside that intent's owned scope.\n\n\
         Available intents: {}\n\n\
         Your first tool call must be `{}`.",
        MUTATING_TOOLS.join(", "),
        ids,
        SELECT_INTENT_TOOL
    )
}

/// JSON schema of the handshake tool, in the shape tool registries expect.
pub fn select_intent_tool_schema() -> Value {
    json!({
        "name": SELECT_INTENT_TOOL,
        "description": "Bind the current turn to a declared intent. Must be called before any file-mutating tool.",
        "input_schema": {
            "type": "object",
            "properties": {
                "intent_id": {
                    "type": "string",
                    "description": "Id of the intent to bind, e.g. INT-001"
                }
            },
            "required": ["intent_id"]
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_lists_intents_and_rule() {
        let prompt = governance_prompt(&["INT-001".to_string(), "INT-002".to_string()]);
        assert!(prompt.contains("INT-001, INT-002"));
        assert!(prompt.contains(SELECT_INTENT_TOOL));
        assert!(prompt.contains("write_to_file"));
    }

    #[test]
    fn test_prompt_with_no_intents() {
        let prompt = governance_prompt(&[]);
        assert!(prompt.contains("(none declared yet)"));
    }

    #[test]
    fn test_tool_schema_shape() {
        let schema = select_intent_tool_schema();
        assert_eq!(schema["name"], SELECT_INTENT_TOOL);
        assert_eq!(schema["input_schema"]["required"][0], "intent_id");
        assert!(schema["description"]
            .as_str()
            .unwrap()
            .contains("before any file-mutating tool"));
    }
}
