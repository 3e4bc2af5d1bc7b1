//! Stream event model
//!
//! Each input line decodes into an [`Event`]: the kind string used for
//! dispatch, the typed [`StreamEvent`] body, and the untouched JSON
//! payload for fallback rendering.
//!
//! Decoding never fails once the line is valid JSON. Missing or
//! mistyped sub-fields of a known kind simply come back as `None`.

use crate::error::{VizError, VizResult};
use crate::format::preview;
use serde::Deserialize;
use serde_json::{Number, Value};

/// Kind reported for records without a string `type` field
pub const UNTYPED_KIND: &str = "(untyped)";

/// Largest magnitude below which an integral float is printed as an integer
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

pub mod kinds {
    pub const MESSAGE_START: &str = "message_start";
    pub const MESSAGE_DELTA: &str = "message_delta";
    pub const MESSAGE_STOP: &str = "message_stop";
    pub const CONTENT_BLOCK_START: &str = "content_block_start";
    pub const CONTENT_BLOCK_DELTA: &str = "content_block_delta";
    pub const CONTENT_BLOCK_STOP: &str = "content_block_stop";
    pub const THINKING_BLOCK_START: &str = "thinking_block_start";
    pub const THINKING_BLOCK_DELTA: &str = "thinking_block_delta";
    pub const THINKING_BLOCK_END: &str = "thinking_block_end";
    pub const TOOL_RESULT: &str = "tool_result";
    pub const ERROR: &str = "error";
    pub const PING: &str = "ping";
}

/// Typed view of one protocol record
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    MessageStart {
        role: Option<String>,
        model: Option<String>,
    },
    MessageDelta {
        stop_reason: Option<String>,
    },
    MessageStop,
    ContentBlockStart {
        block: ContentBlock,
    },
    ContentBlockDelta {
        delta: Delta,
    },
    ContentBlockStop {
        index: Option<u64>,
    },
    ThinkingBlockStart,
    ThinkingBlockDelta {
        delta: Delta,
    },
    ThinkingBlockEnd,
    ToolResult {
        tool_use_id: Option<String>,
        content: Option<ToolContent>,
    },
    Error {
        error: Value,
    },
    Ping,
    /// Any kind not listed above
    Unknown {
        kind: String,
    },
}

/// Header of a content block
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentBlock {
    pub kind: Option<String>,
    pub name: Option<String>,
    pub id: Option<String>,
}

impl ContentBlock {
    /// Whether this block carries a tool invocation
    pub fn is_tool_use(&self) -> bool {
        self.kind.as_deref() == Some("tool_use")
    }
}

/// Incremental fragment of an open block
#[derive(Debug, Clone, PartialEq)]
pub enum Delta {
    /// `text_delta`: visible text
    Text(String),
    /// `input_json_delta`: a slice of tool argument JSON, not parseable alone
    InputJson(String),
    /// Any other delta kind, or a known kind missing its payload field
    Other(Option<String>),
}

/// Body of a tool result
#[derive(Debug, Clone, PartialEq)]
pub enum ToolContent {
    Text(String),
    Structured(Value),
}

/// A parsed input line ready for dispatch
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub kind: String,
    pub body: StreamEvent,
    pub payload: Value,
}

impl Event {
    /// Parse one line of input. `preview_chars` bounds the excerpt kept
    /// on failure.
    pub fn parse(line: &str, preview_chars: usize) -> VizResult<Self> {
        let value = parse_value(line, preview_chars)?;
        Ok(Self::from_value(value))
    }

    /// Decode an already parsed JSON value
    pub fn from_value(payload: Value) -> Self {
        let kind = str_field(&payload, "type")
            .unwrap_or(UNTYPED_KIND)
            .to_string();
        let body = StreamEvent::decode(&kind, &payload);
        Self {
            kind,
            body,
            payload,
        }
    }
}

/// Parse a line as JSON, keeping a bounded preview on failure.
///
/// Nesting depth is unbounded; deep documents grow the stack on the heap
/// instead of overflowing it.
pub fn parse_value(line: &str, preview_chars: usize) -> VizResult<Value> {
    let fail = |e: serde_json::Error| VizError::parse(e.to_string(), preview(line, preview_chars));

    let mut json = serde_json::Deserializer::from_str(line);
    json.disable_recursion_limit();
    let mut value = Value::deserialize(serde_stacker::Deserializer::new(&mut json)).map_err(fail)?;
    json.end().map_err(fail)?;

    normalize_numbers(&mut value);
    Ok(value)
}

/// Rewrite integral floats (`1.0`, `1e2`) as integers so they print as
/// `1` and `100`
fn normalize_numbers(value: &mut Value) {
    let mut pending = vec![value];
    while let Some(value) = pending.pop() {
        match value {
            Value::Array(items) => pending.extend(items.iter_mut()),
            Value::Object(map) => pending.extend(map.values_mut()),
            Value::Number(n) => {
                if let Some(int) = integral(n) {
                    *n = Number::from(int);
                }
            }
            _ => {}
        }
    }
}

fn integral(n: &Number) -> Option<i64> {
    if !n.is_f64() {
        return None;
    }
    let f = n.as_f64()?;
    (f.fract() == 0.0 && f.abs() < MAX_SAFE_INTEGER).then_some(f as i64)
}

impl StreamEvent {
    /// Build the typed body for `kind` from its payload
    pub fn decode(kind: &str, payload: &Value) -> Self {
        match kind {
            kinds::MESSAGE_START => {
                let message = payload.get("message");
                StreamEvent::MessageStart {
                    role: message.and_then(|m| owned_str(m, "role")),
                    model: message.and_then(|m| owned_str(m, "model")),
                }
            }
            kinds::MESSAGE_DELTA => StreamEvent::MessageDelta {
                stop_reason: payload
                    .get("delta")
                    .and_then(|d| owned_str(d, "stop_reason")),
            },
            kinds::MESSAGE_STOP => StreamEvent::MessageStop,
            kinds::CONTENT_BLOCK_START => {
                let block = payload
                    .get("content_block")
                    .map(|b| ContentBlock {
                        kind: owned_str(b, "type"),
                        name: owned_str(b, "name"),
                        id: owned_str(b, "id"),
                    })
                    .unwrap_or_default();
                StreamEvent::ContentBlockStart { block }
            }
            kinds::CONTENT_BLOCK_DELTA => StreamEvent::ContentBlockDelta {
                delta: Delta::decode(payload.get("delta")),
            },
            kinds::CONTENT_BLOCK_STOP => StreamEvent::ContentBlockStop {
                index: payload.get("index").and_then(Value::as_u64),
            },
            kinds::THINKING_BLOCK_START => StreamEvent::ThinkingBlockStart,
            kinds::THINKING_BLOCK_DELTA => StreamEvent::ThinkingBlockDelta {
                delta: Delta::decode(payload.get("delta")),
            },
            kinds::THINKING_BLOCK_END => StreamEvent::ThinkingBlockEnd,
            kinds::TOOL_RESULT => StreamEvent::ToolResult {
                tool_use_id: owned_str(payload, "tool_use_id"),
                content: ToolContent::decode(payload.get("content")),
            },
            kinds::ERROR => StreamEvent::Error {
                error: payload.get("error").cloned().unwrap_or(Value::Null),
            },
            kinds::PING => StreamEvent::Ping,
            other => StreamEvent::Unknown {
                kind: other.to_string(),
            },
        }
    }
}

impl Delta {
    fn decode(delta: Option<&Value>) -> Self {
        let Some(delta) = delta else {
            return Delta::Other(None);
        };
        let kind = str_field(delta, "type");
        match kind {
            Some("text_delta") => match owned_str(delta, "text") {
                Some(text) => Delta::Text(text),
                None => Delta::Other(kind.map(str::to_string)),
            },
            Some("input_json_delta") => match owned_str(delta, "partial_json") {
                Some(json) => Delta::InputJson(json),
                None => Delta::Other(kind.map(str::to_string)),
            },
            _ => Delta::Other(kind.map(str::to_string)),
        }
    }
}

impl ToolContent {
    /// Null, absent and falsy content (`""`, `false`, `0`) render nothing
    fn decode(content: Option<&Value>) -> Option<Self> {
        match content? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            Value::String(s) => Some(ToolContent::Text(s.clone())),
            other => Some(ToolContent::Structured(other.clone())),
        }
    }
}

fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

fn owned_str(value: &Value, key: &str) -> Option<String> {
    str_field(value, key).map(str::to_string)
}
