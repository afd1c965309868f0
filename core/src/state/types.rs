use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient;

/// Field name of the per-domain action counter.
pub const ACTIONS_SINCE_ANCHOR: &str = "actions_since_anchor";

/// `session_state.json`. Written by the session-start and learn commands;
/// only read here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default, deserialize_with = "lenient::flag")]
    pub session_started: bool,

    #[serde(default, deserialize_with = "lenient::flag")]
    pub needs_learn: bool,

    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub needs_learn_reason: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient::name",
        skip_serializing_if = "Option::is_none"
    )]
    pub domain: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionState {
    /// Active domain; an empty name counts as no domain.
    pub fn active_domain(&self) -> Option<&str> {
        self.domain.as_deref().filter(|d| !d.is_empty())
    }

    pub fn learn_reason(&self) -> &str {
        self.needs_learn_reason.as_deref().unwrap_or("unknown")
    }
}

/// `<domain>_workflow.json`. The anchor command rewrites it whole; the gate
/// only bumps the counter. Unknown fields round-trip through `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainWorkflowState {
    #[serde(default, deserialize_with = "lenient::flag")]
    pub anchored: bool,

    #[serde(default, deserialize_with = "lenient::counter")]
    pub actions_since_anchor: u64,

    #[serde(
        default,
        deserialize_with = "lenient::limit",
        skip_serializing_if = "Option::is_none"
    )]
    pub actions_limit: Option<u64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DomainWorkflowState {
    pub fn anchored(limit: u64) -> Self {
        Self {
            anchored: true,
            actions_since_anchor: 0,
            actions_limit: Some(limit),
            extra: Map::new(),
        }
    }

    pub fn effective_limit(&self, default_limit: u64) -> u64 {
        self.actions_limit.unwrap_or(default_limit)
    }

    /// Counts one action and returns the new total.
    pub fn record_action(&mut self) -> u64 {
        self.actions_since_anchor = self.actions_since_anchor.saturating_add(1);
        self.actions_since_anchor
    }
}
