use crate::types::embedding::EmbedOptions;
use crate::types::v1::*;
use serde_json::json;

#[test]
fn prompt_messages_use_role_and_part_tags() {
    let prompt: Prompt = serde_json::from_value(json!([
        {"role": "system", "content": "be brief"},
        {"role": "user", "content": [
            {"type": "text", "text": "what is this?"},
            {"type": "image", "image": {"type": "url", "url": "https://x/y.png"}, "mimeType": "image/png"}
        ]},
        {"role": "assistant", "content": [
            {"type": "tool-call", "toolCallId": "c1", "toolName": "lookup", "args": "{}"}
        ]},
        {"role": "tool", "content": [
            {"toolCallId": "c1", "toolName": "lookup", "result": {"ok": true}}
        ]}
    ]))
    .unwrap();

    assert_eq!(
        prompt.iter().map(PromptMessage::role).collect::<Vec<_>>(),
        vec!["system", "user", "assistant", "tool"]
    );
    match &prompt[3] {
        PromptMessage::Tool { content } => assert!(!content[0].is_error),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn unknown_call_mode_is_rejected() {
    let res = serde_json::from_value::<CallMode>(json!({"type": "object-grammar"}));
    assert!(res.is_err());
}

#[test]
fn call_mode_defaults_to_regular_without_tools() {
    let options: CallOptions = serde_json::from_value(json!({
        "prompt": [{"role": "system", "content": "x"}]
    }))
    .unwrap();
    assert!(matches!(
        options.mode,
        CallMode::Regular { ref tools, tool_choice: None } if tools.is_empty()
    ));
    assert!(options.abort_signal.is_none());
    assert!(options.headers.is_empty());
}

#[test]
fn stream_parts_serialize_with_type_tags() {
    assert_eq!(
        serde_json::to_value(StreamPart::TextDelta {
            text_delta: "hi".into()
        })
        .unwrap(),
        json!({"type": "text-delta", "textDelta": "hi"})
    );
    assert_eq!(
        serde_json::to_value(StreamPart::Finish {
            finish_reason: FinishReason::ContentFilter,
            usage: Usage::new(3, 4),
        })
        .unwrap(),
        json!({
            "type": "finish",
            "finishReason": "content-filter",
            "usage": {"promptTokens": 3, "completionTokens": 4}
        })
    );
}

#[test]
fn unsupported_setting_warning_shape() {
    assert_eq!(
        serde_json::to_value(CallWarning::unsupported_setting("topK")).unwrap()["setting"],
        json!("topK")
    );
}

#[test]
fn usage_total_requires_both_counts() {
    assert_eq!(Usage::new(2, 5).total_tokens(), Some(7));
    assert_eq!(Usage::default().total_tokens(), None);
}

#[test]
fn embed_options_skip_empty_headers() {
    let value = serde_json::to_value(EmbedOptions::new(vec!["a".into()])).unwrap();
    assert_eq!(value, json!({"values": ["a"]}));
}
