//! Application run modes: logger init and command dispatch.

use std::io;
use std::path::Path;

use clap::CommandFactory;

use crate::cli::{self, Args, Commands};
use crate::core;

/// Initialize env_logger on stderr so stdout stays machine-readable.
pub fn init_logger(args: &Args) {
    let log_level = args.log_level();
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .target(env_logger::Target::Stderr)
        .try_init();
    log::debug!("{} v{}", core::app::NAME, core::app::VERSION);
}

/// Run the selected subcommand.
pub fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = args.config.as_deref();
    match &args.command {
        Commands::Enrich { input, actions } => {
            let config = load_config(config_path)?;
            core::cli::run_enrich(&config, input, *actions)
        }
        Commands::Arch { names } => {
            core::cli::run_arch(names);
            Ok(())
        }
        Commands::Config { paths } => core::cli::run_config(config_path, *paths),
        Commands::Completions { shell } => {
            let mut cmd = Args::command();
            cli::generate(*shell, &mut cmd, core::app::NAME, &mut io::stdout());
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<core::config::SiteConfig, core::config::ConfigError> {
    let config = core::config::load(path)?;
    log::debug!(
        "Config loaded: theme {}, {} feature(s)",
        config.theme,
        config.settings.features.len()
    );
    Ok(config)
}
