//! Decision audit trail.

use serde::Serialize;

use crate::gate::{Checkpoint, Decision};
use crate::hook::ProposedAction;

/// One gated decision, as written to the audit log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditRecord {
    pub tool: String,
    pub decision: &'static str,
    pub checkpoint: Checkpoint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions_since_anchor: Option<u64>,
}

impl AuditRecord {
    /// `None` for pre-filter exemptions, which are not audited.
    pub fn from_decision(action: &ProposedAction, decision: &Decision) -> Option<Self> {
        if decision.checkpoint.is_exemption() {
            return None;
        }
        let target = match action {
            ProposedAction::Bash { command } => Some(command.clone()),
            other => other.target_path().map(str::to_string),
        };
        Some(Self {
            tool: action.tool_name().to_string(),
            decision: if decision.is_allow() { "allow" } else { "block" },
            checkpoint: decision.checkpoint,
            target,
            missing: decision.block_reason().map(|r| r.missing.clone()),
            domain: decision.domain.clone(),
            actions_since_anchor: decision.actions_since_anchor,
        })
    }
}

/// Receives gated decisions. Implementations must not fail the hook.
pub trait DecisionSink {
    fn record(&self, record: &AuditRecord);
}

/// Sink that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl DecisionSink for NoopSink {
    fn record(&self, _record: &AuditRecord) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::GateEnforcer;
    use crate::state::InMemoryStateStore;

    #[test]
    fn exemptions_are_not_audited() {
        let gate = GateEnforcer::default();
        let store = InMemoryStateStore::new();
        let action = ProposedAction::Bash { command: "ls".into() };
        let d = gate.decide(&action, &store);
        assert!(AuditRecord::from_decision(&action, &d).is_none());
    }

    #[test]
    fn blocks_carry_the_missing_precondition() {
        let gate = GateEnforcer::default();
        let store = InMemoryStateStore::new();
        let action = ProposedAction::Write { path: "src/app.ts".into() };
        let d = gate.decide(&action, &store);
        let rec = AuditRecord::from_decision(&action, &d).unwrap();
        assert_eq!(rec.decision, "block");
        assert_eq!(rec.target.as_deref(), Some("src/app.ts"));
        assert_eq!(rec.missing.as_deref(), Some("Session not started"));
        assert_eq!(rec.checkpoint, Checkpoint::SessionStarted);
    }
}
