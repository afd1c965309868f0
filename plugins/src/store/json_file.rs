use std::fs;
use std::path::{Component, Path, PathBuf};

use anchorgate_core::api as core_api;
use serde::de::DeserializeOwned;

/// State documents as JSON files under the configured state directory.
#[derive(Debug, Clone)]
pub struct JsonFileStateStore {
    cfg: core_api::AppConfig,
    state_dir: PathBuf,
    session_path: PathBuf,
}

impl JsonFileStateStore {
    pub fn new(cfg: &core_api::AppConfig) -> Self {
        Self {
            cfg: cfg.clone(),
            state_dir: cfg.state_dir_path(),
            session_path: cfg.session_path(),
        }
    }

    /// `<state_dir>/<domain><suffix>`. A domain may name a nested directory
    /// (`team/qa`), but not one outside the state directory.
    pub fn workflow_path(&self, domain: &str) -> Result<PathBuf, core_api::StateError> {
        let file_name = self.cfg.workflow_file_name(domain);
        let relative = Path::new(&file_name);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(core_api::StateError::InvalidDomain(domain.to_string()));
        }
        Ok(self.state_dir.join(relative))
    }
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, core_api::StateError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(core_api::StateError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| core_api::StateError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

impl core_api::StateStore for JsonFileStateStore {
    fn name(&self) -> &str {
        "json_file"
    }

    fn load_session(&self) -> Result<Option<core_api::SessionState>, core_api::StateError> {
        read_document(&self.session_path)
    }

    fn load_workflow(
        &self,
        domain: &str,
    ) -> Result<Option<core_api::DomainWorkflowState>, core_api::StateError> {
        read_document(&self.workflow_path(domain)?)
    }

    fn save_workflow(
        &self,
        domain: &str,
        state: &core_api::DomainWorkflowState,
    ) -> Result<(), core_api::StateError> {
        let path = self.workflow_path(domain)?;
        let text =
            serde_json::to_string_pretty(state).map_err(|source| core_api::StateError::Serialize {
                path: path.clone(),
                source,
            })?;
        fs::write(&path, text).map_err(|source| core_api::StateError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(
            target: "anchorgate.state",
            path = %path.display(),
            actions_since_anchor = state.actions_since_anchor,
            "workflow state written"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_api::StateStore;

    fn store_in(dir: &Path) -> JsonFileStateStore {
        let cfg = core_api::AppConfig {
            state_dir: dir.display().to_string(),
            ..core_api::AppConfig::default()
        };
        JsonFileStateStore::new(&cfg)
    }

    #[test]
    fn missing_documents_are_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        assert!(store.load_session().unwrap().is_none());
        assert!(store.load_workflow("qa").unwrap().is_none());
    }

    #[test]
    fn malformed_session_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("session_state.json"), "{ not json").unwrap();
        let store = store_in(dir.path());
        assert!(matches!(
            store.load_session(),
            Err(core_api::StateError::Parse { .. })
        ));
    }

    #[test]
    fn domain_names_cannot_escape_the_state_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        for bad in ["../etc", "team/../../x", "/etc/passwd", ".."] {
            assert!(
                matches!(
                    store.workflow_path(bad),
                    Err(core_api::StateError::InvalidDomain(_))
                ),
                "{bad}"
            );
        }
        assert_eq!(
            store.workflow_path("qa").unwrap(),
            dir.path().join("qa_workflow.json")
        );
    }

    #[test]
    fn nested_domain_names_resolve_below_the_state_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        assert_eq!(
            store.workflow_path("team/qa").unwrap(),
            dir.path().join("team").join("qa_workflow.json")
        );

        fs::create_dir_all(dir.path().join("team")).unwrap();
        store
            .save_workflow("team/qa", &core_api::DomainWorkflowState::anchored(5))
            .unwrap();
        let back = store.load_workflow("team/qa").unwrap().unwrap();
        assert!(back.anchored);
        assert_eq!(back.actions_limit, Some(5));
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir.path().join("absent"));
        let err = store
            .save_workflow("qa", &core_api::DomainWorkflowState::anchored(10))
            .unwrap_err();
        assert!(matches!(err, core_api::StateError::Io { .. }));
    }
}
