//! Wires stdin, stdout and stderr to the stream driver

use crate::args::Cli;
use crate::console;
use anyhow::{Context, Result};
use streamviz_core::{ColoredStyler, ExitStatus, ReaderLineSource, StreamDriver, VizError};

/// Run the visualizer over stdin until end of input
pub async fn run(cli: Cli) -> Result<ExitStatus> {
    console::configure_color(cli.color);
    let config = cli.render_config().context("invalid options")?;
    tracing::debug!(?config, "starting stream driver");

    let mut driver = StreamDriver::new(config, Box::new(ColoredStyler::new()));
    let mut source = ReaderLineSource::stdin();
    let mut out = std::io::stdout();
    let mut err = std::io::stderr();

    match driver.run(&mut source, &mut out, &mut err).await {
        Ok(status) => Ok(status),
        // Downstream reader went away (e.g. `| head`); nothing left to show
        Err(VizError::Output {
            source: Some(ref e),
            ..
        }) if e.kind() == std::io::ErrorKind::BrokenPipe => {
            tracing::debug!("stdout closed, stopping");
            Ok(ExitStatus::Success)
        }
        Err(e) => Err(e).context("render stream"),
    }
}
