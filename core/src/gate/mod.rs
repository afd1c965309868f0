mod decision;
mod enforcer;
mod paths;
mod read_only;
mod status;

pub use decision::{BlockReason, Checkpoint, Decision, Outcome};
pub use enforcer::GateEnforcer;
pub use paths::PathRules;
pub use read_only::{ReadOnlyCommands, READ_ONLY_PREFIXES};
pub use status::GateStatus;
