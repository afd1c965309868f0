mod cli_error;
mod config_error;
mod state_error;

pub use cli_error::CliError;
pub use config_error::ConfigError;
pub use state_error::StateError;
