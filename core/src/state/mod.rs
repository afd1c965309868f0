mod lenient;
pub mod memory;
mod r#trait;
mod types;

pub use lenient::is_truthy;
pub use memory::InMemoryStateStore;
pub use r#trait::{load_or_empty, StateStore};
pub use types::{DomainWorkflowState, SessionState, ACTIONS_SINCE_ANCHOR};
