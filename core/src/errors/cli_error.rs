// core/src/errors/cli_error.rs
use thiserror::Error;

use super::ConfigError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("i/o error")]
    Io(#[source] std::io::Error),
}
