//! CLI definitions: argument parsing, subcommands, and help text.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;

pub use clap_complete::generate;

const AFTER_HELP: &str = "\
EXAMPLES:
  balena-landr enrich release.json        Label the assets of a GitHub release
  curl -s $API/releases | balena-landr enrich -
                                          Label every release read from stdin
  balena-landr enrich --actions log.json  Dispatch raw {type, payload} actions
  balena-landr arch engine-arm64.tar.gz   Show the label for an asset name
  balena-landr config                     Print the effective page configuration
  balena-landr config --paths             Show where configuration is read from
  balena-landr completions bash           Generate bash completions
";

/// Command-line arguments for the application.
#[derive(Parser)]
#[command(
    author,
    version,
    about = "Landing page configuration and release asset labels for balena-engine",
    after_help = AFTER_HELP
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Page configuration file (replaces the bundled defaults)
    #[arg(short = 'c', long = "config", global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (use multiple times for debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce log output (errors only)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add prettyName, arch, and os to every asset of one or more releases
    Enrich {
        /// Release JSON file (object or array), or '-' for stdin
        #[arg(default_value = "-")]
        input: String,
        /// Input holds {type, payload} actions instead of bare releases
        #[arg(long)]
        actions: bool,
    },
    /// Print architecture and display name for asset filenames
    Arch {
        /// Asset filenames, e.g. balena-engine-v17.12.0-arm64.tar.gz
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Print the effective page configuration as JSON
    Config {
        /// Show config locations instead of the configuration itself
        #[arg(long)]
        paths: bool,
    },
    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        #[arg(value_parser = clap::value_parser!(Shell))]
        shell: Shell,
    },
}

impl Args {
    /// Log level based on -v/-q flags: error, warn, info, or debug.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose >= 2 {
            "debug"
        } else if self.verbose >= 1 {
            "info"
        } else {
            "warn"
        }
    }
}
