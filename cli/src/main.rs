use std::io::Write;

use anchorgate_core::api as core_api;
use anchorgate_core::config;
use anchorgate_plugins::factory;
use clap::Parser;

mod commands;
mod input;
mod logging;

use commands::cli;
use commands::hook::{run_hook, HookExit};

fn main() {
    let code = run();
    std::process::exit(code);
}

fn run() -> i32 {
    let args = match cli::Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            // Exit 2 means "block" to the host; usage errors must not block.
            return if e.use_stderr() { 1 } else { 0 };
        }
    };

    let loaded = config::load(args.config.as_deref());
    let cfg_for_logging = loaded.as_ref().map(|c| c.logging.clone()).unwrap_or_default();
    let _guard = logging::init(&cfg_for_logging);

    match args.command.clone().unwrap_or(cli::Commands::PreToolUse) {
        cli::Commands::PreToolUse => {
            let cfg = match loaded {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!(target: "anchorgate.config", error = %e, "config unusable, using defaults");
                    core_api::AppConfig::default()
                }
            };
            hook(with_state_dir(cfg, &args))
        }
        cli::Commands::Status(status_args) => {
            let cfg = match loaded {
                Ok(cfg) => with_state_dir(cfg, &args),
                Err(e) => {
                    let err = anyhow::Error::from(core_api::CliError::from(e));
                    eprintln!("anchorgate: {err:#}");
                    return 1;
                }
            };
            let gate = core_api::GateEnforcer::new(&cfg);
            let store = factory::build_store(&cfg);
            match commands::status::handle_status(&status_args, &gate, store.as_ref()) {
                Ok(text) => {
                    print!("{text}");
                    0
                }
                Err(e) => {
                    eprintln!("anchorgate: {e:#}");
                    1
                }
            }
        }
    }
}

fn with_state_dir(mut cfg: core_api::AppConfig, args: &cli::Args) -> core_api::AppConfig {
    if let Some(dir) = args.state_dir.as_deref().filter(|d| !d.trim().is_empty()) {
        cfg.state_dir = dir.to_string();
    }
    cfg
}

fn hook(cfg: core_api::AppConfig) -> i32 {
    let raw = match input::read_stdin_text() {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(target: "anchorgate.hook", error = %core_api::CliError::Io(e), "stdin unreadable, allowing");
            return 0;
        }
    };

    let gate = core_api::GateEnforcer::new(&cfg);
    let store = factory::build_store(&cfg);
    let audit = factory::build_audit(&cfg);

    let exit = run_hook(&raw, &gate, store.as_ref(), audit.as_ref());
    if let HookExit::Block(message) = &exit {
        let mut stderr = std::io::stderr().lock();
        let _ = stderr.write_all(message.as_bytes());
        let _ = stderr.flush();
    }
    exit.code()
}
