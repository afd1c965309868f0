//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `anchorgate_core::api` instead of reaching into internal modules.

pub use crate::audit::{AuditRecord, DecisionSink, NoopSink};
pub use crate::config::{AppConfig, AuditConfig, CommandsConfig, GateConfig, LoggingConfig};
pub use crate::errors::{CliError, ConfigError, StateError};
pub use crate::gate::{BlockReason, Checkpoint, Decision, GateEnforcer, GateStatus, Outcome};
pub use crate::hook::{HookInput, ProposedAction};
pub use crate::state::{DomainWorkflowState, InMemoryStateStore, SessionState, StateStore};
