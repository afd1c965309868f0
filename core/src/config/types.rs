use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding `session_state.json` and the per-domain workflow documents.
    #[serde(default = "default_state_dir")]
    pub state_dir: String,

    /// Name of the agent tool's own directory. Writes inside it skip the gate chain.
    #[serde(default = "default_config_dir_name")]
    pub config_dir_name: String,

    #[serde(default = "default_session_file")]
    pub session_file: String,

    /// Suffix appended to a domain name to form its workflow document name.
    #[serde(default = "default_workflow_suffix")]
    pub workflow_suffix: String,

    /// Budget used when a workflow document carries no `actions_limit`.
    #[serde(default = "default_actions_limit")]
    pub default_actions_limit: u64,

    #[serde(default)]
    pub gate: GateConfig,

    #[serde(default)]
    pub commands: CommandsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub audit: AuditConfig,
}

fn default_state_dir() -> String {
    ".claude/state".to_string()
}

fn default_config_dir_name() -> String {
    ".claude".to_string()
}

fn default_session_file() -> String {
    "session_state.json".to_string()
}

fn default_workflow_suffix() -> String {
    "_workflow.json".to_string()
}

fn default_actions_limit() -> u64 {
    10
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            state_dir: default_state_dir(),
            config_dir_name: default_config_dir_name(),
            session_file: default_session_file(),
            workflow_suffix: default_workflow_suffix(),
            default_actions_limit: default_actions_limit(),
            gate: GateConfig::default(),
            commands: CommandsConfig::default(),
            logging: LoggingConfig::default(),
            audit: AuditConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn state_dir_path(&self) -> PathBuf {
        expand_path(&self.state_dir)
    }

    pub fn session_path(&self) -> PathBuf {
        self.state_dir_path().join(&self.session_file)
    }

    pub fn workflow_file_name(&self, domain: &str) -> String {
        format!("{}{}", domain, self.workflow_suffix)
    }

    pub fn audit_path(&self) -> PathBuf {
        match self.audit.path.as_deref() {
            Some(p) if !p.trim().is_empty() => expand_path(p),
            _ => self.state_dir_path().join("gate_audit.jsonl"),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.state_dir.trim().is_empty() {
            return Err(ConfigError::Validation("state_dir must not be empty".into()));
        }
        if self.config_dir_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "config_dir_name must not be empty".into(),
            ));
        }
        if self.config_dir_name.contains(['/', '\\']) {
            return Err(ConfigError::Validation(format!(
                "config_dir_name must be a single path segment, got {:?}",
                self.config_dir_name
            )));
        }
        if self.session_file.trim().is_empty() {
            return Err(ConfigError::Validation("session_file must not be empty".into()));
        }
        if self.workflow_suffix.trim().is_empty() {
            return Err(ConfigError::Validation(
                "workflow_suffix must not be empty".into(),
            ));
        }
        if self.gate.extra_safe_prefixes.iter().any(|p| p.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "gate.extra_safe_prefixes must not contain empty entries".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateConfig {
    /// Appended to the built-in read-only command prefixes.
    #[serde(default)]
    pub extra_safe_prefixes: Vec<String>,
}

/// Remediation commands named in block messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandsConfig {
    #[serde(default = "default_session_start_command")]
    pub session_start: String,

    #[serde(default = "default_learn_command")]
    pub learn: String,

    #[serde(default = "default_anchor_command")]
    pub anchor: String,
}

fn default_session_start_command() -> String {
    "/kernel/session-start".to_string()
}

fn default_learn_command() -> String {
    "/kernel/learn".to_string()
}

fn default_anchor_command() -> String {
    "/kernel/anchor".to_string()
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            session_start: default_session_start_command(),
            learn: default_learn_command(),
            anchor: default_anchor_command(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// EnvFilter directive used when `ANCHORGATE_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log destination. Stderr is the hook's reply channel, so logs only go
    /// there when no file is configured.
    #[serde(default)]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "off".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl LoggingConfig {
    pub fn file_path(&self) -> Option<PathBuf> {
        self.file
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(expand_path)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Defaults to `<state_dir>/gate_audit.jsonl`.
    #[serde(default)]
    pub path: Option<String>,
}

pub(crate) fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_toml_yields_defaults() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.commands.anchor, "/kernel/anchor");
        assert_eq!(cfg.default_actions_limit, 10);
    }

    #[test]
    fn partial_tables_keep_remaining_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
state_dir = "/tmp/gate-state"

[commands]
anchor = "/proto/anchor"

[gate]
extra_safe_prefixes = ["cargo tree"]
"#,
        )
        .unwrap();
        assert_eq!(cfg.state_dir, "/tmp/gate-state");
        assert_eq!(cfg.commands.anchor, "/proto/anchor");
        assert_eq!(cfg.commands.learn, "/kernel/learn");
        assert_eq!(cfg.gate.extra_safe_prefixes, vec!["cargo tree".to_string()]);
        assert!(!cfg.audit.enabled);
    }

    #[test]
    fn logging_table_reads_level_and_file() {
        assert_eq!(AppConfig::default().logging.level, "off");
        let cfg: AppConfig = toml::from_str(
            r#"
[logging]
level = "anchorgate=debug"
file = "/tmp/anchorgate.log"
"#,
        )
        .unwrap();
        assert_eq!(cfg.logging.level, "anchorgate=debug");
        assert_eq!(
            cfg.logging.file_path(),
            Some(PathBuf::from("/tmp/anchorgate.log"))
        );
    }

    #[test]
    fn derived_paths() {
        let cfg = AppConfig::default();
        assert_eq!(
            cfg.session_path(),
            PathBuf::from(".claude/state/session_state.json")
        );
        assert_eq!(cfg.workflow_file_name("qa"), "qa_workflow.json");
        assert_eq!(
            cfg.audit_path(),
            PathBuf::from(".claude/state/gate_audit.jsonl")
        );
    }

    #[test]
    fn validate_rejects_nested_config_dir_name() {
        let cfg = AppConfig {
            config_dir_name: "a/b".into(),
            ..AppConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_rejects_blank_prefix() {
        let mut cfg = AppConfig::default();
        cfg.gate.extra_safe_prefixes.push("  ".into());
        assert!(cfg.validate().is_err());
    }
}
