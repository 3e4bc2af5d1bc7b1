//! Error types for streamviz
//!
//! Two failure classes matter to the stream driver:
//! - `Parse`: a single line is not valid JSON. Always recovered locally.
//! - `Input`: the line source itself failed. Fatal for the stream.
//!
//! `Output` and `Config` cover write failures and invalid settings.

mod constructors;
mod conversions;
mod types;

pub use types::{VizError, VizResult};
