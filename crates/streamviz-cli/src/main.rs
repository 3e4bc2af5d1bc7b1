//! streamviz - colorized terminal renderer for streamed LLM events
//!
//! # Usage
//!
//! ```bash
//! producer --output-format stream-json | streamviz
//! producer --output-format stream-json | streamviz --compact
//! producer --output-format stream-json | streamviz --raw
//! ```
//!
//! Exits 0 when stdin ends and 1 when stdin cannot be read.

mod app;
mod args;
mod console;
mod logging;

use clap::Parser;

pub use args::{Cli, ColorChoice};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Set RUST_LOG=debug (or --log-level debug) for diagnostics on stderr
    logging::init(cli.log_level.as_deref());

    match app::run(cli).await {
        Ok(status) => std::process::exit(status.code()),
        Err(e) => {
            eprintln!("{e:#}");
            std::process::exit(1);
        }
    }
}
