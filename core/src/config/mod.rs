mod load;
mod types;

pub use load::{apply_env_overrides, load, load_from_path, ENV_ACTIONS_LIMIT, ENV_AUDIT, ENV_STATE_DIR};
pub use types::*;
