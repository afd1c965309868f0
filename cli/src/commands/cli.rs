use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "anchorgate",
    version,
    about = "PreToolUse gate: session, learn and anchor preconditions for agent writes"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file. Defaults to `.claude/anchorgate.toml`, then the user config dir.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Overrides `state_dir` from config and environment.
    #[arg(long, global = true)]
    pub state_dir: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Gate one tool call read from stdin (the default).
    PreToolUse,

    /// Show session and workflow state and what the next action would hit.
    Status(StatusArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct StatusArgs {
    /// Print JSON instead of text.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}
