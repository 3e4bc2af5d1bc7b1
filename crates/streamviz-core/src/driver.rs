//! Stream driver
//!
//! Pulls lines from a [`LineSource`], parses each into an event and hands
//! it to the [`RendererRegistry`]. One line is fully rendered and flushed
//! before the next is read.
//!
//! Rendered events go to `out`. Parse and input errors go to `err`.

use crate::config::RenderConfig;
use crate::error::{VizError, VizResult};
use crate::event::{Event, parse_value};
use crate::format::to_pretty_json;
use crate::render::{RenderContext, RendererRegistry};
use crate::source::LineSource;
use crate::style::{Style, Styler};
use std::io::Write;

/// Name shown in the startup banner
pub const TOOL_NAME: &str = "Claude Stream Visualizer";

/// Width of the raw mode separator
const SEPARATOR_WIDTH: usize = 50;

/// Driver lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Reading,
    /// Input ended; closing notice pending
    Draining,
    Terminated,
}

/// Process outcome of a driver run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
}

impl ExitStatus {
    /// Process exit code
    pub fn code(self) -> i32 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
        }
    }
}

/// Counters kept for the closing debug log
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriverStats {
    pub lines: u64,
    pub blank: u64,
    pub events: u64,
    pub parse_errors: u64,
}

/// Reads, parses and renders a line stream
pub struct StreamDriver {
    config: RenderConfig,
    registry: RendererRegistry,
    styler: Box<dyn Styler>,
    state: DriverState,
    stats: DriverStats,
}

impl StreamDriver {
    /// Driver over the built-in handlers
    pub fn new(config: RenderConfig, styler: Box<dyn Styler>) -> Self {
        Self::with_registry(config, RendererRegistry::with_builtin(), styler)
    }

    /// Driver over a caller-supplied registry
    pub fn with_registry(
        config: RenderConfig,
        registry: RendererRegistry,
        styler: Box<dyn Styler>,
    ) -> Self {
        Self {
            config,
            registry,
            styler,
            state: DriverState::Reading,
            stats: DriverStats::default(),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Current lifecycle state
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Line and event counters so far
    pub fn stats(&self) -> DriverStats {
        self.stats
    }

    /// Banner, every line, then the closing notice.
    ///
    /// Input failures are reported on `err` and yield
    /// [`ExitStatus::Failure`]; only write failures return `Err`.
    pub async fn run<S, O, E>(&mut self, source: &mut S, out: &mut O, err: &mut E) -> VizResult<ExitStatus>
    where
        S: LineSource + ?Sized,
        O: Write,
        E: Write,
    {
        self.print_banner(out)?;

        while self.state == DriverState::Reading {
            match source.next_line().await {
                Ok(Some(line)) => self.process_line(&line, out, err)?,
                Ok(None) => self.state = DriverState::Draining,
                Err(e) => {
                    tracing::error!(code = e.error_code(), error = %e, "line source failed");
                    self.state = DriverState::Terminated;
                    out.flush()?;
                    writeln!(err, "{}", self.styler.paint(&e.to_string(), Style::Error))?;
                    err.flush()?;
                    return Ok(ExitStatus::Failure);
                }
            }
        }

        self.finish(out)?;
        Ok(ExitStatus::Success)
    }

    /// Startup banner and the active mode, if not normal
    pub fn print_banner<O: Write>(&self, out: &mut O) -> VizResult<()> {
        let title = format!("\n🎬 {TOOL_NAME}\n");
        writeln!(out, "{}", self.styler.paint(&title, Style::Accent))?;
        if let Some(label) = self.config.mode.banner_label() {
            let mode = format!("Mode: {label}\n");
            writeln!(out, "{}", self.styler.paint(&mode, Style::Warning))?;
        }
        out.flush()?;
        Ok(())
    }

    /// Render a single input line. Parse failures are handled here and
    /// never returned.
    pub fn process_line<O, E>(&mut self, line: &str, out: &mut O, err: &mut E) -> VizResult<()>
    where
        O: Write,
        E: Write,
    {
        self.stats.lines += 1;
        if line.trim().is_empty() {
            self.stats.blank += 1;
            return Ok(());
        }

        let result = if self.config.mode.is_raw() {
            self.echo_raw(line, out)
        } else {
            self.render_line(line, out)
        };

        match result {
            Err(e) if e.is_recoverable() => self.report_parse_error(&e, out, err)?,
            other => other?,
        }
        out.flush()?;
        Ok(())
    }

    fn render_line<O: Write>(&mut self, line: &str, out: &mut O) -> VizResult<()> {
        let event = Event::parse(line, self.config.preview_chars)?;
        self.stats.events += 1;
        let mut ctx = RenderContext::new(out, &self.config, self.styler.as_ref());
        self.registry.render(&event, &mut ctx)
    }

    fn echo_raw<O: Write>(&mut self, line: &str, out: &mut O) -> VizResult<()> {
        let value = parse_value(line, self.config.preview_chars)?;
        self.stats.events += 1;
        let separator = self.styler.paint(&"─".repeat(SEPARATOR_WIDTH), Style::Muted);
        writeln!(out, "{separator}")?;
        writeln!(out, "{}", to_pretty_json(&value))?;
        writeln!(out, "{separator}")?;
        Ok(())
    }

    fn report_parse_error<O, E>(&mut self, error: &VizError, out: &mut O, err: &mut E) -> VizResult<()>
    where
        O: Write,
        E: Write,
    {
        self.stats.parse_errors += 1;
        tracing::debug!(
            code = error.error_code(),
            reason = error.message(),
            "skipping malformed line"
        );
        if self.config.is_compact() {
            return Ok(());
        }
        let VizError::Parse { preview, .. } = error else {
            return Ok(());
        };
        // Keep ordering sane when both streams share a terminal
        out.flush()?;
        writeln!(err, "{}", self.styler.paint(&error.to_string(), Style::Error))?;
        writeln!(
            err,
            "{}",
            self.styler.paint(&format!("Input: {preview}..."), Style::Muted)
        )?;
        err.flush()?;
        Ok(())
    }

    fn finish<O: Write>(&mut self, out: &mut O) -> VizResult<()> {
        writeln!(out)?;
        writeln!(out, "{}", self.styler.paint("Stream ended.", Style::Accent))?;
        out.flush()?;
        self.state = DriverState::Terminated;
        tracing::debug!(
            lines = self.stats.lines,
            events = self.stats.events,
            parse_errors = self.stats.parse_errors,
            "stream ended"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderMode;
    use crate::source::MemoryLineSource;
    use crate::style::PlainStyler;

    struct Captured {
        status: ExitStatus,
        out: String,
        err: String,
        stats: DriverStats,
    }

    async fn drive(mode: RenderMode, lines: &[&str]) -> Captured {
        drive_source(mode, MemoryLineSource::new(lines.iter().copied())).await
    }

    async fn drive_source(mode: RenderMode, mut source: MemoryLineSource) -> Captured {
        let mut driver = StreamDriver::new(RenderConfig::new(mode), Box::new(PlainStyler));
        let mut out = Vec::new();
        let mut err = Vec::new();
        let status = driver.run(&mut source, &mut out, &mut err).await.unwrap();
        assert_eq!(driver.state(), DriverState::Terminated);
        Captured {
            status,
            out: String::from_utf8(out).unwrap(),
            err: String::from_utf8(err).unwrap(),
            stats: driver.stats(),
        }
    }

    const BANNER: &str = "\n🎬 Claude Stream Visualizer\n\n";
    const CLOSING: &str = "\nStream ended.\n";

    #[tokio::test]
    async fn test_empty_input() {
        let run = drive(RenderMode::Normal, &[]).await;
        assert_eq!(run.status, ExitStatus::Success);
        assert_eq!(run.out, format!("{BANNER}{CLOSING}"));
        assert!(run.err.is_empty());
    }

    #[tokio::test]
    async fn test_mode_banner() {
        let raw = drive(RenderMode::Raw, &[]).await;
        assert!(raw.out.contains("Mode: Raw JSON\n"));

        let compact = drive(RenderMode::Compact, &[]).await;
        assert!(compact.out.contains("Mode: Compact\n"));

        let normal = drive(RenderMode::Normal, &[]).await;
        assert!(!normal.out.contains("Mode:"));
    }

    #[tokio::test]
    async fn test_blank_lines_skipped() {
        let run = drive(RenderMode::Normal, &["", "   ", "\t"]).await;
        assert_eq!(run.out, format!("{BANNER}{CLOSING}"));
        assert_eq!(run.stats.blank, 3);
        assert_eq!(run.stats.events, 0);
    }

    #[tokio::test]
    async fn test_text_deltas_concatenate() {
        let run = drive(
            RenderMode::Normal,
            &[
                r#"{"type":"content_block_delta","delta":{"type":"text_delta","text":"Hel"}}"#,
                r#"{"type":"content_block_delta","delta":{"type":"text_delta","text":"lo"}}"#,
            ],
        )
        .await;
        assert_eq!(run.out, format!("{BANNER}Hello{CLOSING}"));
    }

    #[tokio::test]
    async fn test_ping_by_mode() {
        let normal = drive(RenderMode::Normal, &[r#"{"type":"ping"}"#]).await;
        assert!(normal.out.contains("[ping]"));

        let compact = drive(RenderMode::Compact, &[r#"{"type":"ping"}"#]).await;
        assert!(!compact.out.contains("[ping]"));
    }

    #[tokio::test]
    async fn test_parse_error_reported_and_skipped() {
        let bad = format!("{{oops {}", "z".repeat(250));
        let run = drive(RenderMode::Normal, &[bad.as_str(), r#"{"type":"ping"}"#]).await;

        assert_eq!(run.status, ExitStatus::Success);
        assert!(run.err.contains("Error parsing JSON: "));
        let input_line = run.err.lines().find(|l| l.starts_with("Input: ")).unwrap();
        let shown = input_line
            .trim_start_matches("Input: ")
            .trim_end_matches("...");
        assert!(shown.chars().count() <= 100);
        assert!(bad.starts_with(shown));
        assert!(run.out.contains("[ping]"));
        assert_eq!(run.stats.parse_errors, 1);
    }

    #[tokio::test]
    async fn test_parse_error_silent_in_compact() {
        let run = drive(
            RenderMode::Compact,
            &["not json", r#"{"type":"message_stop"}"#],
        )
        .await;
        assert!(run.err.is_empty());
        assert!(!run.out.contains("Error parsing"));
        assert!(run.out.contains("Message Complete"));
        assert_eq!(run.stats.parse_errors, 1);
    }

    #[tokio::test]
    async fn test_raw_mode_echoes_pretty_json() {
        let run = drive(RenderMode::Raw, &[r#"{"type":"ping","b":1,"a":2}"#]).await;
        let sep = "─".repeat(50);
        assert!(run.out.contains(&format!(
            "{sep}\n{{\n  \"type\": \"ping\",\n  \"b\": 1,\n  \"a\": 2\n}}\n{sep}\n"
        )));
        assert!(!run.out.contains("[ping]"));
    }

    #[tokio::test]
    async fn test_raw_mode_prints_integral_floats_as_integers() {
        let run = drive(RenderMode::Raw, &[r#"{"a":1.0,"b":1e2,"c":2.5}"#]).await;
        assert!(run.out.contains("  \"a\": 1,\n  \"b\": 100,\n  \"c\": 2.5\n"));
    }

    #[tokio::test]
    async fn test_deeply_nested_event_is_rendered() {
        let depth = 200;
        let line = format!(
            r#"{{"type":"future","x":{}1{}}}"#,
            "[".repeat(depth),
            "]".repeat(depth)
        );
        let run = drive(RenderMode::Normal, &[line.as_str()]).await;
        assert!(run.err.is_empty(), "unexpected stderr: {}", run.err);
        assert!(run.out.contains("📦 Event: future"));
        assert_eq!(run.stats.parse_errors, 0);
        assert_eq!(run.stats.events, 1);
    }

    #[tokio::test]
    async fn test_raw_mode_parse_failure_is_reported() {
        let run = drive(RenderMode::Raw, &["{broken"]).await;
        assert!(run.err.contains("Error parsing JSON"));
        assert!(run.err.contains("Input: {broken..."));
    }

    #[tokio::test]
    async fn test_input_failure_is_fatal() {
        let source = MemoryLineSource::new([r#"{"type":"ping"}"#]).fail_with("Broken pipe");
        let run = drive_source(RenderMode::Normal, source).await;
        assert_eq!(run.status, ExitStatus::Failure);
        assert_eq!(run.status.code(), 1);
        assert!(run.out.contains("[ping]"));
        assert!(!run.out.contains("Stream ended."));
        assert_eq!(run.err, "Stdin error: Broken pipe\n");
    }

    #[tokio::test]
    async fn test_unknown_kind_uses_fallback() {
        let run = drive(RenderMode::Normal, &[r#"{"type":"future_kind","x":[1]}"#]).await;
        assert!(run.out.contains("Event: future_kind"));
        assert!(run.out.contains("\"x\": ["));
    }
}
