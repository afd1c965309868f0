use anchorgate_core::api as core_api;

/// Exit code for a refused tool call; the host shows stderr to the agent.
pub const EXIT_BLOCK: i32 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookExit {
    Allow,
    Block(String),
}

impl HookExit {
    pub fn code(&self) -> i32 {
        match self {
            HookExit::Allow => 0,
            HookExit::Block(_) => EXIT_BLOCK,
        }
    }
}

/// Gates one raw hook payload.
///
/// A payload that does not parse is allowed: the hook prefers availability
/// over enforcement on input it does not understand.
pub fn run_hook(
    raw: &str,
    gate: &core_api::GateEnforcer,
    store: &dyn core_api::StateStore,
    audit: &dyn core_api::DecisionSink,
) -> HookExit {
    let input = match core_api::HookInput::parse(raw) {
        Ok(input) => input,
        Err(e) => {
            tracing::warn!(target: "anchorgate.hook", error = %e, "unparseable hook input, allowing");
            return HookExit::Allow;
        }
    };

    let action = core_api::ProposedAction::from_input(&input);
    let decision = gate.decide(&action, store);

    tracing::info!(
        target: "anchorgate.hook",
        tool = action.tool_name(),
        session_id = input.session_id().unwrap_or(""),
        allowed = decision.is_allow(),
        checkpoint = decision.checkpoint.as_str(),
        "gate decision"
    );

    if let Some(record) = core_api::AuditRecord::from_decision(&action, &decision) {
        audit.record(&record);
    }

    match decision.outcome {
        core_api::Outcome::Allow => HookExit::Allow,
        core_api::Outcome::Block(reason) => HookExit::Block(reason.render()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingSink(RefCell<Vec<core_api::AuditRecord>>);

    impl core_api::DecisionSink for RecordingSink {
        fn record(&self, record: &core_api::AuditRecord) {
            self.0.borrow_mut().push(record.clone());
        }
    }

    fn ready_store() -> core_api::InMemoryStateStore {
        core_api::InMemoryStateStore::new().with_session(core_api::SessionState {
            session_started: true,
            ..Default::default()
        })
    }

    #[test]
    fn garbage_input_is_allowed() {
        let gate = core_api::GateEnforcer::default();
        let store = core_api::InMemoryStateStore::new();
        let sink = RecordingSink::default();
        for raw in ["", "not json", "[]", r#"{"tool_name": 7}"#] {
            assert_eq!(run_hook(raw, &gate, &store, &sink), HookExit::Allow);
        }
        assert!(sink.0.borrow().is_empty());
    }

    #[test]
    fn numeric_session_id_does_not_bypass_the_gate() {
        let gate = core_api::GateEnforcer::default();
        let store = core_api::InMemoryStateStore::new();
        let sink = RecordingSink::default();
        let exit = run_hook(
            r#"{"session_id": 42, "tool_name":"Bash","tool_input":{"command":"rm -rf src"}}"#,
            &gate,
            &store,
            &sink,
        );
        assert_eq!(exit.code(), EXIT_BLOCK);
    }

    #[test]
    fn block_renders_message_and_exit_code() {
        let gate = core_api::GateEnforcer::default();
        let store = core_api::InMemoryStateStore::new();
        let sink = RecordingSink::default();
        let exit = run_hook(
            r#"{"tool_name":"Write","tool_input":{"file_path":"src/a.rs","content":"x"}}"#,
            &gate,
            &store,
            &sink,
        );
        assert_eq!(exit.code(), EXIT_BLOCK);
        let HookExit::Block(msg) = exit else {
            panic!("expected block");
        };
        assert!(msg.starts_with("BLOCKED: Session not started\n"));
        assert!(msg.ends_with("Command: /kernel/session-start\n"));
        assert_eq!(sink.0.borrow().len(), 1);
    }

    #[test]
    fn allowed_action_is_audited_but_exemption_is_not() {
        let gate = core_api::GateEnforcer::default();
        let store = ready_store();
        let sink = RecordingSink::default();

        let exit = run_hook(
            r#"{"tool_name":"Bash","tool_input":{"command":"cargo build"}}"#,
            &gate,
            &store,
            &sink,
        );
        assert_eq!(exit, HookExit::Allow);
        assert_eq!(exit.code(), 0);

        run_hook(r#"{"tool_name":"Read","tool_input":{"file_path":"a"}}"#, &gate, &store, &sink);

        let records = sink.0.borrow();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].decision, "allow");
        assert_eq!(records[0].checkpoint, core_api::Checkpoint::NoDomain);
    }
}
