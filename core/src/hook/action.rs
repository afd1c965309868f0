use super::input::HookInput;

/// A tool call awaiting permission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProposedAction {
    Write {
        path: String,
    },
    Edit {
        path: String,
        old_string: String,
        new_string: String,
    },
    Bash {
        command: String,
    },
    /// Any tool the gate does not cover.
    Other {
        tool_name: String,
    },
}

impl ProposedAction {
    pub fn from_input(input: &HookInput) -> Self {
        match input.tool_name.as_str() {
            "Write" => Self::Write {
                path: input.param("file_path").to_string(),
            },
            "Edit" => Self::Edit {
                path: input.param("file_path").to_string(),
                old_string: input.param("old_string").to_string(),
                new_string: input.param("new_string").to_string(),
            },
            "Bash" => Self::Bash {
                command: input.param("command").to_string(),
            },
            other => Self::Other {
                tool_name: other.to_string(),
            },
        }
    }

    pub fn tool_name(&self) -> &str {
        match self {
            Self::Write { .. } => "Write",
            Self::Edit { .. } => "Edit",
            Self::Bash { .. } => "Bash",
            Self::Other { tool_name } => tool_name,
        }
    }

    pub fn target_path(&self) -> Option<&str> {
        match self {
            Self::Write { path } | Self::Edit { path, .. } => Some(path),
            _ => None,
        }
    }
}
