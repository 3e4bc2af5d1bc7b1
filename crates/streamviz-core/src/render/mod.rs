//! Event renderer
//!
//! Dispatch is a lookup from event kind to an [`EventHandler`]. New kinds
//! are supported by registering another handler; kinds with no handler go
//! to the fallback, so every parsed event produces some output.
//!
//! Handlers see one event at a time. The only thing that carries over
//! between events is the cursor position on the output stream.

mod context;
mod handlers;

pub use context::RenderContext;
pub use handlers::{
    BANNER_WIDTH, render_content_block_delta, render_content_block_start,
    render_content_block_stop, render_error, render_fallback, render_message_delta,
    render_message_start, render_message_stop, render_ping, render_thinking_block_delta,
    render_thinking_block_end, render_thinking_block_start, render_tool_result,
};

use crate::error::VizResult;
use crate::event::{Event, kinds};
use std::collections::HashMap;
use std::io;

/// Renders one event kind
pub trait EventHandler: Send + Sync {
    /// Write the event to `ctx`
    fn render(&self, event: &Event, ctx: &mut RenderContext<'_>) -> io::Result<()>;
}

impl<F> EventHandler for F
where
    F: Fn(&Event, &mut RenderContext<'_>) -> io::Result<()> + Send + Sync,
{
    fn render(&self, event: &Event, ctx: &mut RenderContext<'_>) -> io::Result<()> {
        self(event, ctx)
    }
}

/// Kind-keyed handler table with a fallback
pub struct RendererRegistry {
    handlers: HashMap<String, Box<dyn EventHandler>>,
    fallback: Box<dyn EventHandler>,
}

impl RendererRegistry {
    /// Registry with no kind handlers; everything hits the fallback
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
            fallback: Box::new(render_fallback),
        }
    }

    /// Registry with a handler for every protocol kind
    pub fn with_builtin() -> Self {
        let mut registry = Self::empty();
        registry.register_fn(kinds::MESSAGE_START, render_message_start);
        registry.register_fn(kinds::MESSAGE_DELTA, render_message_delta);
        registry.register_fn(kinds::MESSAGE_STOP, render_message_stop);
        registry.register_fn(kinds::CONTENT_BLOCK_START, render_content_block_start);
        registry.register_fn(kinds::CONTENT_BLOCK_DELTA, render_content_block_delta);
        registry.register_fn(kinds::CONTENT_BLOCK_STOP, render_content_block_stop);
        registry.register_fn(kinds::THINKING_BLOCK_START, render_thinking_block_start);
        registry.register_fn(kinds::THINKING_BLOCK_DELTA, render_thinking_block_delta);
        registry.register_fn(kinds::THINKING_BLOCK_END, render_thinking_block_end);
        registry.register_fn(kinds::TOOL_RESULT, render_tool_result);
        registry.register_fn(kinds::ERROR, render_error);
        registry.register_fn(kinds::PING, render_ping);
        registry
    }

    /// Register or replace the handler for `kind`, returning the old one
    pub fn register<H>(&mut self, kind: impl Into<String>, handler: H) -> Option<Box<dyn EventHandler>>
    where
        H: EventHandler + 'static,
    {
        self.handlers.insert(kind.into(), Box::new(handler))
    }

    /// Register a function or closure for `kind`
    pub fn register_fn<F>(&mut self, kind: impl Into<String>, f: F) -> Option<Box<dyn EventHandler>>
    where
        F: Fn(&Event, &mut RenderContext<'_>) -> io::Result<()> + Send + Sync + 'static,
    {
        self.register(kind, f)
    }

    /// Remove the handler for `kind`; its events go to the fallback
    pub fn unregister(&mut self, kind: &str) -> Option<Box<dyn EventHandler>> {
        self.handlers.remove(kind)
    }

    /// Replace the handler used for unregistered kinds
    pub fn set_fallback<H>(&mut self, handler: H)
    where
        H: EventHandler + 'static,
    {
        self.fallback = Box::new(handler);
    }

    /// Whether `kind` has a dedicated handler
    pub fn handles(&self, kind: &str) -> bool {
        self.handlers.contains_key(kind)
    }

    /// Kinds with a dedicated handler, in no particular order
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    /// Render `event` through its kind handler, or the fallback
    pub fn render(&self, event: &Event, ctx: &mut RenderContext<'_>) -> VizResult<()> {
        match self.handlers.get(&event.kind) {
            Some(handler) => {
                tracing::trace!(kind = %event.kind, "dispatching event");
                handler.render(event, ctx)?;
            }
            None => {
                tracing::debug!(kind = %event.kind, "no handler registered, using fallback");
                self.fallback.render(event, ctx)?;
            }
        }
        Ok(())
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}
