use std::fmt;

use serde::Serialize;

/// Why an action was refused and how to unblock it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockReason {
    pub missing: String,
    pub fix_command: String,
    pub fix_description: String,
}

impl BlockReason {
    pub fn new(
        missing: impl Into<String>,
        fix_command: impl Into<String>,
        fix_description: impl Into<String>,
    ) -> Self {
        Self {
            missing: missing.into(),
            fix_command: fix_command.into(),
            fix_description: fix_description.into(),
        }
    }

    /// The remediation text written to stderr on a block.
    pub fn render(&self) -> String {
        format!(
            "BLOCKED: {missing}\n\
             \n\
             FIX:\n\
             1. Invoke {cmd}\n\
             2. {desc}\n\
             3. Then retry your command\n\
             \n\
             Command: {cmd}\n",
            missing = self.missing,
            cmd = self.fix_command,
            desc = self.fix_description,
        )
    }
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Outcome {
    Allow,
    Block(BlockReason),
}

impl Outcome {
    pub fn is_allow(&self) -> bool {
        matches!(self, Outcome::Allow)
    }

    pub fn block_reason(&self) -> Option<&BlockReason> {
        match self {
            Outcome::Allow => None,
            Outcome::Block(r) => Some(r),
        }
    }
}

/// The rule that settled a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Checkpoint {
    UntrackedTool,
    ReadOnlyCommand,
    ConfigDirectory,
    CounterEdit,
    SessionStarted,
    PendingLearn,
    Anchored,
    ActionBudget,
    NoDomain,
}

impl Checkpoint {
    /// Pre-filter exemptions are settled before any state is read.
    pub fn is_exemption(self) -> bool {
        matches!(
            self,
            Checkpoint::UntrackedTool | Checkpoint::ReadOnlyCommand | Checkpoint::ConfigDirectory
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Checkpoint::UntrackedTool => "untracked_tool",
            Checkpoint::ReadOnlyCommand => "read_only_command",
            Checkpoint::ConfigDirectory => "config_directory",
            Checkpoint::CounterEdit => "counter_edit",
            Checkpoint::SessionStarted => "session_started",
            Checkpoint::PendingLearn => "pending_learn",
            Checkpoint::Anchored => "anchored",
            Checkpoint::ActionBudget => "action_budget",
            Checkpoint::NoDomain => "no_domain",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    #[serde(flatten)]
    pub outcome: Outcome,
    pub checkpoint: Checkpoint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// Counter value after this decision, when the budget gate ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions_since_anchor: Option<u64>,
}

impl Decision {
    pub(crate) fn allow(checkpoint: Checkpoint) -> Self {
        Self {
            outcome: Outcome::Allow,
            checkpoint,
            domain: None,
            actions_since_anchor: None,
        }
    }

    pub(crate) fn block(checkpoint: Checkpoint, reason: BlockReason) -> Self {
        Self {
            outcome: Outcome::Block(reason),
            checkpoint,
            domain: None,
            actions_since_anchor: None,
        }
    }

    pub(crate) fn in_domain(mut self, domain: &str) -> Self {
        self.domain = Some(domain.to_string());
        self
    }

    pub(crate) fn with_count(mut self, count: u64) -> Self {
        self.actions_since_anchor = Some(count);
        self
    }

    pub fn is_allow(&self) -> bool {
        self.outcome.is_allow()
    }

    pub fn block_reason(&self) -> Option<&BlockReason> {
        self.outcome.block_reason()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_remediation_message() {
        let r = BlockReason::new(
            "Session not started",
            "/kernel/session-start",
            "This initializes the session",
        );
        assert_eq!(
            r.render(),
            "BLOCKED: Session not started\n\
             \n\
             FIX:\n\
             1. Invoke /kernel/session-start\n\
             2. This initializes the session\n\
             3. Then retry your command\n\
             \n\
             Command: /kernel/session-start\n"
        );
    }

    #[test]
    fn decision_serializes_flat() {
        let d = Decision::block(
            Checkpoint::ActionBudget,
            BlockReason::new("10 actions since last anchor (11 actions)", "/kernel/anchor", "x"),
        )
        .in_domain("qa")
        .with_count(11);
        let v = serde_json::to_value(&d).unwrap();
        assert_eq!(v["decision"], "block");
        assert_eq!(v["checkpoint"], "action_budget");
        assert_eq!(v["domain"], "qa");
        assert_eq!(v["actions_since_anchor"], 11);
        assert_eq!(v["fix_command"], "/kernel/anchor");
    }
}
