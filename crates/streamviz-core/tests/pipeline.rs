//! End-to-end rendering of event streams through the driver

use serde_json::json;
use streamviz_core::{
    ExitStatus, MemoryLineSource, PlainStyler, RenderConfig, RenderMode, RendererRegistry, Style,
    StreamDriver,
};

async fn render(config: RenderConfig, registry: RendererRegistry, input: &str) -> (ExitStatus, String, String) {
    let mut driver = StreamDriver::with_registry(config, registry, Box::new(PlainStyler));
    let mut source = MemoryLineSource::from_text(input);
    let mut out = Vec::new();
    let mut err = Vec::new();
    let status = driver
        .run(&mut source, &mut out, &mut err)
        .await
        .expect("writes to memory never fail");
    (
        status,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

async fn render_mode(mode: RenderMode, input: &str) -> (ExitStatus, String, String) {
    render(RenderConfig::new(mode), RendererRegistry::with_builtin(), input).await
}

const CONVERSATION: &str = r#"{"type":"message_start","message":{"id":"msg_1","role":"assistant","model":"claude-test"}}
{"type":"thinking_block_start"}
{"type":"thinking_block_delta","delta":{"type":"text_delta","text":"Need to read the file."}}
{"type":"thinking_block_end"}
{"type":"content_block_start","index":0,"content_block":{"type":"text","text":""}}
{"type":"content_block_delta","index":0,"delta":{"type":"text_delta","text":"Let me "}}
{"type":"content_block_delta","index":0,"delta":{"type":"text_delta","text":"check."}}
{"type":"content_block_stop","index":0}
{"type":"content_block_start","index":1,"content_block":{"type":"tool_use","id":"toolu_01","name":"read_file"}}
{"type":"content_block_delta","index":1,"delta":{"type":"input_json_delta","partial_json":"{\"path\": "}}
{"type":"content_block_delta","index":1,"delta":{"type":"input_json_delta","partial_json":"\"a.txt\"}"}}
{"type":"content_block_stop","index":1}
{"type":"ping"}
{"type":"tool_result","tool_use_id":"toolu_01","content":"hello from a.txt"}
{"type":"message_delta","delta":{"stop_reason":"tool_use"},"usage":{"output_tokens":42}}
{"type":"message_stop"}
"#;

#[tokio::test]
async fn test_full_conversation_normal() {
    let (status, out, err) = render_mode(RenderMode::Normal, CONVERSATION).await;
    assert_eq!(status, ExitStatus::Success);
    assert!(err.is_empty());

    let expected_order = [
        "📨 Message Start",
        "   Role: assistant",
        "   Model: claude-test",
        "💭 Thinking...",
        "Need to read the file.",
        "   [Thinking completed]",
        "Let me check.",
        "🔧 Tool: read_file",
        "   ID: toolu_01",
        "{\"path\": \"a.txt\"}",
        "   [ping]",
        "✓ Tool Result",
        "  hello from a.txt",
        "   Stop reason: tool_use",
        "✓ Message Complete",
        "Stream ended.",
    ];
    let mut cursor = 0;
    for needle in expected_order {
        let found = out[cursor..]
            .find(needle)
            .unwrap_or_else(|| panic!("missing {needle:?} after byte {cursor} in:\n{out}"));
        cursor += found + needle.len();
    }
    assert!(!out.contains("Event:"));
}

#[tokio::test]
async fn test_full_conversation_compact() {
    let (status, out, err) = render_mode(RenderMode::Compact, CONVERSATION).await;
    assert_eq!(status, ExitStatus::Success);
    assert!(err.is_empty());

    assert!(out.contains("Mode: Compact"));
    assert!(out.contains("💭 Thinking..."));
    assert!(!out.contains("Need to read the file."));
    assert!(!out.contains("[Thinking completed]"));
    assert!(out.contains("Let me check."));
    assert!(out.contains("🔧 Tool: read_file"));
    assert!(!out.contains("a.txt\"}"));
    assert!(!out.contains("[ping]"));
    assert!(out.contains("hello from a.txt"));
    assert!(out.contains("✓ Message Complete"));
}

#[tokio::test]
async fn test_raw_and_compact_flags_behave_like_raw() {
    let input = format!("{CONVERSATION}not json\n");
    let both = RenderConfig::new(RenderMode::from_flags(true, true));
    let raw_only = RenderConfig::new(RenderMode::from_flags(true, false));

    let a = render(both, RendererRegistry::with_builtin(), &input).await;
    let b = render(raw_only, RendererRegistry::with_builtin(), &input).await;
    assert_eq!(a, b);
    assert!(a.1.contains("Mode: Raw JSON"));
    assert!(a.2.contains("Error parsing JSON"));
}

#[tokio::test]
async fn test_fifteen_line_tool_result() {
    let content = (1..=15)
        .map(|i| format!("line{i}"))
        .collect::<Vec<_>>()
        .join("\n");
    let line = json!({"type": "tool_result", "tool_use_id": "abc", "content": content}).to_string();
    let (_, out, _) = render_mode(RenderMode::Normal, &line).await;

    let shown: Vec<_> = out.lines().filter(|l| l.starts_with("  line")).collect();
    assert_eq!(shown.len(), 10);
    assert_eq!(out.matches("more lines").count(), 1);
    assert!(out.contains("   ... (5 more lines)"));
}

#[tokio::test]
async fn test_every_unknown_kind_is_visible() {
    let input = [
        json!({"type": "usage", "input_tokens": 3}),
        json!({"type": "citation_added", "citation": {"url": "https://example.com"}}),
        json!({"kind": "no type field"}),
    ]
    .iter()
    .map(|v| v.to_string())
    .collect::<Vec<_>>()
    .join("\n");

    let (_, out, _) = render_mode(RenderMode::Compact, &input).await;
    assert!(out.contains("📦 Event: usage"));
    assert!(out.contains("\"input_tokens\": 3"));
    assert!(out.contains("📦 Event: citation_added"));
    assert!(out.contains("\"url\": \"https://example.com\""));
    assert!(out.contains("📦 Event: (untyped)"));
    assert!(out.contains("\"kind\": \"no type field\""));
}

#[tokio::test]
async fn test_registered_kind_renders_through_driver() {
    let mut registry = RendererRegistry::with_builtin();
    registry.register_fn("usage", |event, ctx| {
        let tokens = event.payload["output_tokens"].as_u64().unwrap_or(0);
        ctx.line(&format!("   Tokens: {tokens}"), Style::Muted)
    });

    let (_, out, _) = render(
        RenderConfig::default(),
        registry,
        r#"{"type":"usage","output_tokens":99}"#,
    )
    .await;
    assert!(out.contains("   Tokens: 99\n"));
    assert!(!out.contains("Event: usage"));
}

#[tokio::test]
async fn test_malformed_payloads_never_abort() {
    let input = r#"{"type":"message_start","message":"oops"}
{"type":"content_block_start","content_block":null}
{"type":"content_block_delta","delta":{"type":"text_delta"}}
{"type":"tool_result","content":null}
{"type":"error"}
{"type":"message_delta","delta":{"stop_reason":7}}
{"type":"ping"}"#;
    let (status, out, err) = render_mode(RenderMode::Normal, input).await;
    assert_eq!(status, ExitStatus::Success);
    assert!(err.is_empty());
    assert!(out.contains("📨 Message Start"));
    assert!(!out.contains("Role:"));
    assert!(out.contains("❌ Error\n  null"));
    assert!(!out.contains("Stop reason"));
    assert!(out.contains("[ping]"));
}

#[tokio::test]
async fn test_custom_preview_cap() {
    let config = RenderConfig::default().with_preview_chars(5);
    let (_, _, err) = render(config, RendererRegistry::with_builtin(), "not-json-at-all").await;
    assert!(err.contains("Input: not-j...\n"));
}
