//! streamviz core library
//!
//! Renders newline-delimited JSON events from a streaming message
//! protocol (message lifecycle, content blocks, tool calls, thinking,
//! errors, keepalives) as colorized terminal output, one line at a time.
//!
//! # Example
//!
//! ```rust,no_run
//! use streamviz_core::{ColoredStyler, ReaderLineSource, RenderConfig, RenderMode, StreamDriver};
//!
//! # async fn demo() -> streamviz_core::VizResult<()> {
//! let config = RenderConfig::new(RenderMode::Compact).validate()?;
//! let mut driver = StreamDriver::new(config, Box::new(ColoredStyler::new()));
//! let mut source = ReaderLineSource::stdin();
//! let status = driver
//!     .run(&mut source, &mut std::io::stdout(), &mut std::io::stderr())
//!     .await?;
//! std::process::exit(status.code());
//! # }
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod event;
pub mod format;
pub mod render;
pub mod source;
pub mod style;

pub use config::{RenderConfig, RenderMode};
pub use driver::{DriverState, DriverStats, ExitStatus, StreamDriver};
pub use error::{VizError, VizResult};
pub use event::{ContentBlock, Delta, Event, StreamEvent, ToolContent};
pub use render::{EventHandler, RenderContext, RendererRegistry};
pub use source::{LineSource, MemoryLineSource, ReaderLineSource};
pub use style::{ColoredStyler, PlainStyler, Style, Styler};
