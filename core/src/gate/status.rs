use std::fmt;

use serde::Serialize;

use super::decision::BlockReason;

/// Snapshot of the gate chain for the `status` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateStatus {
    pub session_started: bool,
    pub needs_learn: bool,
    pub needs_learn_reason: Option<String>,
    pub domain: Option<String>,
    pub anchored: Option<bool>,
    pub actions_since_anchor: Option<u64>,
    pub actions_limit: Option<u64>,
    pub remaining_actions: Option<u64>,
    /// What the next gated action would be refused for, if anything.
    pub next_block: Option<BlockReason>,
}

impl fmt::Display for GateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "session started: {}", yes_no(self.session_started))?;
        match (self.needs_learn, &self.needs_learn_reason) {
            (true, Some(reason)) => writeln!(f, "pending learn:   yes ({reason})")?,
            (true, None) => writeln!(f, "pending learn:   yes")?,
            (false, _) => writeln!(f, "pending learn:   no")?,
        }
        match &self.domain {
            Some(domain) => writeln!(f, "domain:          {domain}")?,
            None => writeln!(f, "domain:          (none)")?,
        }
        if let Some(anchored) = self.anchored {
            writeln!(f, "anchored:        {}", yes_no(anchored))?;
        }
        if let (Some(count), Some(limit)) = (self.actions_since_anchor, self.actions_limit) {
            writeln!(
                f,
                "actions:         {count}/{limit} ({} remaining)",
                self.remaining_actions.unwrap_or(0)
            )?;
        }
        match &self.next_block {
            Some(reason) => writeln!(
                f,
                "next action:     blocked ({}), run {}",
                reason.missing, reason.fix_command
            ),
            None => writeln!(f, "next action:     allowed"),
        }
    }
}

fn yes_no(b: bool) -> &'static str {
    if b {
        "yes"
    } else {
        "no"
    }
}
