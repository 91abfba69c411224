//! # balena-landr
//!
//! Landing page configuration for balena-engine, plus the release hook that labels
//! downloadable assets with an architecture, OS, and display name.
//!
//! ## Features
//! - `enrich`: run releases through the asset-labeling pipeline
//! - `arch`: label individual asset filenames
//! - `config`: print the effective page configuration
//! - Shell completions

mod cli;
mod core;
mod run;

use clap::Parser;
use dotenv::dotenv;

fn main() {
    // Analytics identifiers may live in a .env file
    dotenv().ok();

    let args = cli::Args::parse();
    run::init_logger(&args);

    if let Err(e) = run::run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
