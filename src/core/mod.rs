pub mod app;
pub mod arch;
pub mod cli;
pub mod config;
pub mod middleware;
pub mod paths;
pub mod release;
