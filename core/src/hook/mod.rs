mod action;
mod input;

pub use action::ProposedAction;
pub use input::HookInput;
