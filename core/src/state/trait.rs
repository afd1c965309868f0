use crate::errors::StateError;

use super::types::{DomainWorkflowState, SessionState};

/// Persisted session and workflow documents.
///
/// `Ok(None)` means the document does not exist. Callers on the gate path
/// treat both `None` and `Err` as an empty document.
pub trait StateStore {
    fn name(&self) -> &str;

    fn load_session(&self) -> Result<Option<SessionState>, StateError>;

    fn load_workflow(&self, domain: &str) -> Result<Option<DomainWorkflowState>, StateError>;

    /// Replaces the whole workflow document for `domain`.
    fn save_workflow(&self, domain: &str, state: &DomainWorkflowState) -> Result<(), StateError>;
}

/// Collapses a load result to a document, substituting the empty one for a
/// missing or unreadable document.
pub fn load_or_empty<T: Default>(result: Result<Option<T>, StateError>, what: &str) -> T {
    match result {
        Ok(Some(doc)) => doc,
        Ok(None) => {
            tracing::debug!(target: "anchorgate.state", document = what, "state document absent");
            T::default()
        }
        Err(e) => {
            tracing::warn!(
                target: "anchorgate.state",
                document = what,
                error = %e,
                "state document unreadable, treating as empty"
            );
            T::default()
        }
    }
}
