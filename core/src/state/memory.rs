//! In-process [`StateStore`] used by tests and dry runs.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use super::r#trait::StateStore;
use super::types::{DomainWorkflowState, SessionState};
use crate::errors::StateError;

#[derive(Debug, Default)]
pub struct InMemoryStateStore {
    session: Option<SessionState>,
    session_corrupt: bool,
    workflows: Mutex<HashMap<String, DomainWorkflowState>>,
    fail_writes: bool,
    writes: Mutex<u64>,
}

impl InMemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(mut self, session: SessionState) -> Self {
        self.session = Some(session);
        self
    }

    /// Makes `load_session` fail as if the document were not valid JSON.
    pub fn with_corrupt_session(mut self) -> Self {
        self.session_corrupt = true;
        self
    }

    pub fn with_workflow(self, domain: &str, state: DomainWorkflowState) -> Self {
        self.lock_workflows().insert(domain.to_string(), state);
        self
    }

    /// Makes every `save_workflow` call fail.
    pub fn with_failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn workflow(&self, domain: &str) -> Option<DomainWorkflowState> {
        self.lock_workflows().get(domain).cloned()
    }

    /// Number of successful `save_workflow` calls.
    pub fn write_count(&self) -> u64 {
        *self.writes.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn lock_workflows(&self) -> std::sync::MutexGuard<'_, HashMap<String, DomainWorkflowState>> {
        self.workflows.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl StateStore for InMemoryStateStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn load_session(&self) -> Result<Option<SessionState>, StateError> {
        if self.session_corrupt {
            let source = <serde_json::Error as serde::de::Error>::custom("EOF while parsing an object");
            return Err(StateError::Parse {
                path: PathBuf::from("memory://session"),
                source,
            });
        }
        Ok(self.session.clone())
    }

    fn load_workflow(&self, domain: &str) -> Result<Option<DomainWorkflowState>, StateError> {
        Ok(self.lock_workflows().get(domain).cloned())
    }

    fn save_workflow(&self, domain: &str, state: &DomainWorkflowState) -> Result<(), StateError> {
        if self.fail_writes {
            return Err(StateError::Io {
                path: PathBuf::from(format!("memory://{domain}")),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only store"),
            });
        }
        self.lock_workflows().insert(domain.to_string(), state.clone());
        *self.writes.lock().unwrap_or_else(|p| p.into_inner()) += 1;
        Ok(())
    }
}
