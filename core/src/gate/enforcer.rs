use crate::config::{AppConfig, CommandsConfig};
use crate::hook::ProposedAction;
use crate::state::{load_or_empty, DomainWorkflowState, SessionState, StateStore, ACTIONS_SINCE_ANCHOR};

use super::decision::{BlockReason, Checkpoint, Decision};
use super::paths::PathRules;
use super::read_only::ReadOnlyCommands;
use super::status::GateStatus;

/// Decides whether a proposed tool call may run.
///
/// Pre-filter exemptions are settled without touching state. Everything else
/// walks the gate chain in order (session started, no pending learn,
/// anchored, action budget) and the first failing gate wins.
#[derive(Debug, Clone)]
pub struct GateEnforcer {
    read_only: ReadOnlyCommands,
    paths: PathRules,
    commands: CommandsConfig,
    default_actions_limit: u64,
}

impl Default for GateEnforcer {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}

impl GateEnforcer {
    pub fn new(cfg: &AppConfig) -> Self {
        Self {
            read_only: ReadOnlyCommands::with_extra(&cfg.gate.extra_safe_prefixes),
            paths: PathRules::new(&cfg.config_dir_name, &cfg.workflow_suffix),
            commands: cfg.commands.clone(),
            default_actions_limit: cfg.default_actions_limit,
        }
    }

    pub fn decide(&self, action: &ProposedAction, store: &dyn StateStore) -> Decision {
        if let Some(decision) = self.pre_filter(action) {
            return decision;
        }

        let session: SessionState = load_or_empty(store.load_session(), "session");
        if let Some((checkpoint, reason)) = self.session_gate(&session) {
            return Decision::block(checkpoint, reason);
        }

        let Some(domain) = session.active_domain() else {
            return Decision::allow(Checkpoint::NoDomain);
        };

        let mut workflow: DomainWorkflowState = load_or_empty(store.load_workflow(domain), "workflow");
        if let Some(reason) = self.anchor_gate(&workflow) {
            return Decision::block(Checkpoint::Anchored, reason).in_domain(domain);
        }

        // The current action counts toward its own limit, and the new count is
        // persisted before comparing, so a refused action still spends budget.
        let limit = workflow.effective_limit(self.default_actions_limit);
        let count = workflow.record_action();
        if let Err(e) = store.save_workflow(domain, &workflow) {
            tracing::warn!(
                target: "anchorgate.gate",
                store = store.name(),
                domain,
                error = %e,
                "failed to persist action counter"
            );
        }

        tracing::debug!(target: "anchorgate.gate", domain, count, limit, "action counted");
        let decision = if count > limit {
            Decision::block(Checkpoint::ActionBudget, self.budget_block(limit, count))
        } else {
            Decision::allow(Checkpoint::ActionBudget)
        };
        decision.in_domain(domain).with_count(count)
    }

    /// Reports where the gate chain stands without counting an action.
    pub fn inspect(&self, store: &dyn StateStore) -> GateStatus {
        let session: SessionState = load_or_empty(store.load_session(), "session");
        let mut status = GateStatus {
            session_started: session.session_started,
            needs_learn: session.needs_learn,
            needs_learn_reason: session.needs_learn_reason.clone(),
            domain: session.active_domain().map(str::to_string),
            anchored: None,
            actions_since_anchor: None,
            actions_limit: None,
            remaining_actions: None,
            next_block: None,
        };

        if let Some((_, reason)) = self.session_gate(&session) {
            status.next_block = Some(reason);
        }

        if let Some(domain) = session.active_domain() {
            let workflow: DomainWorkflowState = load_or_empty(store.load_workflow(domain), "workflow");
            let limit = workflow.effective_limit(self.default_actions_limit);
            let count = workflow.actions_since_anchor;
            status.anchored = Some(workflow.anchored);
            status.actions_since_anchor = Some(count);
            status.actions_limit = Some(limit);
            status.remaining_actions = Some(limit.saturating_sub(count));

            if status.next_block.is_none() {
                status.next_block = match self.anchor_gate(&workflow) {
                    Some(reason) => Some(reason),
                    None => {
                        let next = count.saturating_add(1);
                        (next > limit).then(|| self.budget_block(limit, next))
                    }
                };
            }
        }

        status
    }

    fn pre_filter(&self, action: &ProposedAction) -> Option<Decision> {
        match action {
            ProposedAction::Other { .. } => Some(Decision::allow(Checkpoint::UntrackedTool)),
            ProposedAction::Bash { command } => self
                .read_only
                .matches(command)
                .then(|| Decision::allow(Checkpoint::ReadOnlyCommand)),
            ProposedAction::Write { path } => self
                .paths
                .is_config_path(path)
                .then(|| Decision::allow(Checkpoint::ConfigDirectory)),
            ProposedAction::Edit {
                path,
                old_string,
                new_string,
            } => {
                if !self.paths.is_config_path(path) {
                    return None;
                }
                // Only targeted edits of the counter are refused here; whole
                // document writes pass.
                let touches_counter =
                    old_string.contains(ACTIONS_SINCE_ANCHOR) || new_string.contains(ACTIONS_SINCE_ANCHOR);
                if self.paths.is_workflow_document(path) && touches_counter {
                    tracing::info!(target: "anchorgate.gate", path = %path, "blocked direct counter edit");
                    return Some(Decision::block(Checkpoint::CounterEdit, self.counter_edit_block()));
                }
                Some(Decision::allow(Checkpoint::ConfigDirectory))
            }
        }
    }

    fn session_gate(&self, session: &SessionState) -> Option<(Checkpoint, BlockReason)> {
        if !session.session_started {
            return Some((
                Checkpoint::SessionStarted,
                BlockReason::new(
                    "Session not started",
                    &self.commands.session_start,
                    "This initializes the session",
                ),
            ));
        }
        if session.needs_learn {
            return Some((
                Checkpoint::PendingLearn,
                BlockReason::new(
                    format!("Lesson not recorded (trigger: {})", session.learn_reason()),
                    &self.commands.learn,
                    "Record what you learned from the fix",
                ),
            ));
        }
        None
    }

    fn anchor_gate(&self, workflow: &DomainWorkflowState) -> Option<BlockReason> {
        (!workflow.anchored).then(|| {
            BlockReason::new(
                "Protocol not anchored",
                &self.commands.anchor,
                "This reads protocol and updates state",
            )
        })
    }

    fn budget_block(&self, limit: u64, count: u64) -> BlockReason {
        BlockReason::new(
            format!("{limit} actions since last anchor ({count} actions)"),
            &self.commands.anchor,
            "This re-centers on protocol and resets counter",
        )
    }

    fn counter_edit_block(&self) -> BlockReason {
        BlockReason::new(
            "Direct edit to action counter detected",
            &self.commands.anchor,
            format!(
                "Use {} to reset the counter — never edit {ACTIONS_SINCE_ANCHOR} directly",
                self.commands.anchor
            ),
        )
    }
}
