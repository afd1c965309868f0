use std::path::{Path, PathBuf};

use super::types::AppConfig;
use crate::errors::ConfigError;

pub const ENV_STATE_DIR: &str = "ANCHORGATE_STATE_DIR";
pub const ENV_ACTIONS_LIMIT: &str = "ANCHORGATE_ACTIONS_LIMIT";
pub const ENV_AUDIT: &str = "ANCHORGATE_AUDIT";

const PROJECT_CONFIG: &str = ".claude/anchorgate.toml";

/// Loads configuration.
///
/// An explicit path must exist. Otherwise the project file
/// `.claude/anchorgate.toml` is tried, then `<user config dir>/anchorgate/config.toml`,
/// then built-in defaults. Environment overrides are applied last.
pub fn load(explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut cfg = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            load_from_path(path)?
        }
        None => match discover() {
            Some(path) => load_from_path(&path)?,
            None => AppConfig::default(),
        },
    };

    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok())?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_from_path(path: &Path) -> Result<AppConfig, ConfigError> {
    let s = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let cfg = toml::from_str::<AppConfig>(&s).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(target: "anchorgate.config", path = %path.display(), "loaded config file");
    Ok(cfg)
}

fn discover() -> Option<PathBuf> {
    let project = PathBuf::from(PROJECT_CONFIG);
    if project.exists() {
        return Some(project);
    }
    let user = dirs::config_dir()?.join("anchorgate").join("config.toml");
    user.exists().then_some(user)
}

/// Applies `ANCHORGATE_*` overrides. `lookup` abstracts the environment so
/// callers and tests can supply their own source.
pub fn apply_env_overrides<F>(cfg: &mut AppConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup(ENV_STATE_DIR) {
        if !v.trim().is_empty() {
            cfg.state_dir = v;
        }
    }

    if let Some(v) = lookup(ENV_ACTIONS_LIMIT) {
        if !v.trim().is_empty() {
            cfg.default_actions_limit =
                v.trim().parse().map_err(|_| ConfigError::EnvInvalid {
                    key: ENV_ACTIONS_LIMIT.to_string(),
                    value: v.clone(),
                })?;
        }
    }

    if let Some(v) = lookup(ENV_AUDIT) {
        cfg.audit.enabled = match v.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" | "" => false,
            _ => {
                return Err(ConfigError::EnvInvalid {
                    key: ENV_AUDIT.to_string(),
                    value: v,
                })
            }
        };
    }

    Ok(())
}
