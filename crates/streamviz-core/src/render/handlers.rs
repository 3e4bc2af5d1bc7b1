//! Built-in handlers for the message streaming protocol

use super::context::RenderContext;
use crate::event::{Delta, Event, StreamEvent, ToolContent};
use crate::format::{indent, pretty_print, to_pretty_json};
use crate::style::Style;
use std::io;

/// Width of message lifecycle banners
pub const BANNER_WIDTH: usize = 50;

fn banner() -> String {
    "━".repeat(BANNER_WIDTH)
}

/// Banner with role and model, when present
pub fn render_message_start(event: &Event, ctx: &mut RenderContext<'_>) -> io::Result<()> {
    let StreamEvent::MessageStart { role, model } = &event.body else {
        return Ok(());
    };
    ctx.newline()?;
    ctx.line(&banner(), Style::Banner)?;
    ctx.title("📨 Message Start", Style::Banner)?;
    if let Some(role) = role {
        ctx.line(&format!("   Role: {role}"), Style::Muted)?;
    }
    if let Some(model) = model {
        ctx.line(&format!("   Model: {model}"), Style::Muted)?;
    }
    ctx.line(&banner(), Style::Banner)
}

/// Stop reason, if the delta carries one
pub fn render_message_delta(event: &Event, ctx: &mut RenderContext<'_>) -> io::Result<()> {
    if let StreamEvent::MessageDelta {
        stop_reason: Some(reason),
    } = &event.body
    {
        ctx.section(&format!("   Stop reason: {reason}"), Style::Warning)?;
    }
    Ok(())
}

/// Closing banner followed by a blank line
pub fn render_message_stop(_event: &Event, ctx: &mut RenderContext<'_>) -> io::Result<()> {
    ctx.newline()?;
    ctx.line(&banner(), Style::Banner)?;
    ctx.title("✓ Message Complete", Style::Banner)?;
    ctx.line(&banner(), Style::Banner)?;
    ctx.newline()
}

/// Tool blocks get a header; text blocks start silently
pub fn render_content_block_start(event: &Event, ctx: &mut RenderContext<'_>) -> io::Result<()> {
    let StreamEvent::ContentBlockStart { block } = &event.body else {
        return Ok(());
    };
    if !block.is_tool_use() {
        return Ok(());
    }
    let header = match &block.name {
        Some(name) => format!("🔧 Tool: {name}"),
        None => "🔧 Tool".to_string(),
    };
    ctx.section(&header, Style::Tool)?;
    if let Some(id) = &block.id {
        ctx.line(&format!("   ID: {id}"), Style::Muted)?;
    }
    Ok(())
}

/// Text fragments inline; tool input fragments unless compact
pub fn render_content_block_delta(event: &Event, ctx: &mut RenderContext<'_>) -> io::Result<()> {
    let StreamEvent::ContentBlockDelta { delta } = &event.body else {
        return Ok(());
    };
    match delta {
        Delta::Text(text) => ctx.inline(text, Style::Text),
        Delta::InputJson(json) if !ctx.is_compact() => ctx.inline(json, Style::ToolInput),
        _ => Ok(()),
    }
}

/// Silent; block ends are only logged
pub fn render_content_block_stop(event: &Event, _ctx: &mut RenderContext<'_>) -> io::Result<()> {
    if let StreamEvent::ContentBlockStop { index } = &event.body {
        tracing::debug!(index = ?index, "content block stopped");
    }
    Ok(())
}

/// Thinking header, shown in every mode
pub fn render_thinking_block_start(_event: &Event, ctx: &mut RenderContext<'_>) -> io::Result<()> {
    ctx.section("💭 Thinking...", Style::ThinkingHeader)
}

/// Thinking text inline, hidden in compact mode
pub fn render_thinking_block_delta(event: &Event, ctx: &mut RenderContext<'_>) -> io::Result<()> {
    match &event.body {
        StreamEvent::ThinkingBlockDelta {
            delta: Delta::Text(text),
        } if !ctx.is_compact() => ctx.inline(text, Style::Thinking),
        _ => Ok(()),
    }
}

/// Completion marker, hidden in compact mode
pub fn render_thinking_block_end(_event: &Event, ctx: &mut RenderContext<'_>) -> io::Result<()> {
    if ctx.is_compact() {
        return Ok(());
    }
    ctx.newline()?;
    ctx.line("   [Thinking completed]", Style::Muted)
}

/// Result header, id, then at most `max_result_lines` of content.
///
/// The cap holds in every mode.
pub fn render_tool_result(event: &Event, ctx: &mut RenderContext<'_>) -> io::Result<()> {
    let StreamEvent::ToolResult {
        tool_use_id,
        content,
    } = &event.body
    else {
        return Ok(());
    };
    ctx.section("✓ Tool Result", Style::Success)?;
    if let Some(id) = tool_use_id {
        ctx.line(&format!("   ID: {id}"), Style::Muted)?;
    }
    let Some(content) = content else {
        return Ok(());
    };

    let rendered = match content {
        ToolContent::Text(text) => text.clone(),
        ToolContent::Structured(value) => to_pretty_json(value),
    };
    let lines: Vec<&str> = rendered.split('\n').collect();
    let cap = ctx.config().max_result_lines;
    let shown = lines.len().min(cap);

    ctx.line(&indent(&lines[..shown].join("\n"), 1), Style::Text)?;
    if lines.len() > cap {
        ctx.line(
            &format!("   ... ({} more lines)", lines.len() - cap),
            Style::Muted,
        )?;
    }
    Ok(())
}

/// Error header and the pretty-printed error object
pub fn render_error(event: &Event, ctx: &mut RenderContext<'_>) -> io::Result<()> {
    let StreamEvent::Error { error } = &event.body else {
        return Ok(());
    };
    ctx.section("❌ Error", Style::ErrorHeader)?;
    ctx.line(&pretty_print(error, 1), Style::Error)
}

/// Keepalive marker, hidden in compact mode
pub fn render_ping(_event: &Event, ctx: &mut RenderContext<'_>) -> io::Result<()> {
    if ctx.is_compact() {
        return Ok(());
    }
    ctx.line("   [ping]", Style::Muted)
}

/// Header naming the kind, then the whole payload
pub fn render_fallback(event: &Event, ctx: &mut RenderContext<'_>) -> io::Result<()> {
    ctx.section(&format!("📦 Event: {}", event.kind), Style::Accent)?;
    ctx.plain(&pretty_print(&event.payload, 1))
}
