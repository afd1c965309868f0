use serde::Deserialize;
use serde_json::Value;

/// The document a host runtime sends to a `PreToolUse` hook.
///
/// Only `tool_name` and `tool_input` drive the gate. The other fields are
/// kept untyped so an odd value there never changes the decision.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HookInput {
    #[serde(default)]
    pub tool_name: String,

    #[serde(default)]
    pub tool_input: Value,

    #[serde(default)]
    pub session_id: Value,

    #[serde(default)]
    pub cwd: Value,

    #[serde(default)]
    pub hook_event_name: Value,
}

impl HookInput {
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// String parameter of the tool call; empty when absent or not a string.
    pub fn param(&self, key: &str) -> &str {
        self.tool_input
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    /// Host session id for logs; absent when missing or not a string.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_claude_style_payload() {
        let input = HookInput::parse(
            r#"{
                "session_id": "abc",
                "cwd": "/work",
                "hook_event_name": "PreToolUse",
                "tool_name": "Edit",
                "tool_input": {"file_path": "src/lib.rs", "old_string": "a", "new_string": "b"}
            }"#,
        )
        .unwrap();
        assert_eq!(input.tool_name, "Edit");
        assert_eq!(input.param("file_path"), "src/lib.rs");
        assert_eq!(input.param("command"), "");
        assert_eq!(input.session_id(), Some("abc"));
        assert_eq!(input.hook_event_name, "PreToolUse");
    }

    #[test]
    fn missing_or_odd_tool_input_reads_empty() {
        let input = HookInput::parse(r#"{"tool_name": "Bash", "tool_input": null}"#).unwrap();
        assert_eq!(input.param("command"), "");

        let input = HookInput::parse(r#"{"tool_name": "Bash", "tool_input": {"command": 5}}"#).unwrap();
        assert_eq!(input.param("command"), "");

        let input = HookInput::parse(r#"{}"#).unwrap();
        assert_eq!(input.tool_name, "");
    }

    #[test]
    fn odd_metadata_fields_still_parse() {
        let input = HookInput::parse(
            r#"{"session_id": 42, "cwd": ["/a"], "hook_event_name": null,
                "tool_name": "Bash", "tool_input": {"command": "rm -rf src"}}"#,
        )
        .unwrap();
        assert_eq!(input.session_id(), None);
        assert_eq!(input.param("command"), "rm -rf src");
    }

    #[test]
    fn rejects_non_object_documents() {
        assert!(HookInput::parse("not json").is_err());
        assert!(HookInput::parse("[1, 2]").is_err());
        assert!(HookInput::parse(r#"{"tool_name": 3}"#).is_err());
    }
}
