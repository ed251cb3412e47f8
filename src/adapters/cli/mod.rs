//! CLI Adapter
//!
//! Command-line interface for mintscope.
//! Uses clap derive macros for argument parsing.

mod commands;

pub use commands::{CliApp, Command, DeriveCmd, LookupCmd};

use anyhow::Result;

/// Parse the command line
pub fn init() -> CliApp {
    use clap::Parser;
    CliApp::parse()
}

/// Execute the CLI command
pub async fn execute(app: CliApp) -> Result<()> {
    commands::execute(app).await
}
