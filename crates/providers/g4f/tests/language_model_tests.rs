use crate::ai_sdk_core::error::TransportError;
use crate::ai_sdk_core::{LanguageModel, SdkError};
use crate::ai_sdk_providers_g4f::test_support::{
    provider_with, sse, sse_done, text_chunk, TestTransport,
};
use crate::ai_sdk_types::v1;
use futures_util::StreamExt;
use serde_json::json;
use tokio_util::sync::CancellationToken;

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "16362f24e60340d0994dd205c267a43a",
        "object": "chat.completion",
        "created": 1_711_113_008,
        "model": "G4F-small-latest",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content, "tool_calls": null},
            "finish_reason": "stop",
            "logprobs": null
        }],
        "usage": {"prompt_tokens": 4, "completion_tokens": 30, "total_tokens": 34}
    })
}

fn continuation_prompt() -> v1::Prompt {
    vec![
        v1::PromptMessage::user("Tell me a story"),
        v1::PromptMessage::assistant("Once upon a"),
    ]
}

async fn collect(stream: crate::ai_sdk_core::PartStream) -> Vec<v1::StreamPart> {
    stream
        .map(|item| item.expect("stream item"))
        .collect::<Vec<_>>()
        .await
}

fn text_of(parts: &[v1::StreamPart]) -> String {
    parts
        .iter()
        .filter_map(|p| match p {
            v1::StreamPart::TextDelta { text_delta } => Some(text_delta.as_str()),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn generate_maps_text_usage_and_metadata() {
    let transport = TestTransport::new(completion("Hello, World!"))
        .with_response_headers(vec![("X-Request-Id".into(), "req-1".into())]);
    let model = provider_with(transport.clone()).chat("G4F-small-latest");

    let resp = model
        .do_generate(v1::CallOptions::new(vec![v1::PromptMessage::user("Hello")]))
        .await
        .unwrap();

    assert_eq!(resp.text.as_deref(), Some("Hello, World!"));
    assert_eq!(resp.finish_reason, v1::FinishReason::Stop);
    assert_eq!(resp.usage, v1::Usage::new(4, 30));
    assert!(resp.tool_calls.is_empty());
    assert_eq!(
        resp.response,
        Some(v1::ResponseMetadata {
            id: Some("16362f24e60340d0994dd205c267a43a".into()),
            timestamp_ms: Some(1_711_113_008_000),
            model_id: Some("G4F-small-latest".into()),
        })
    );
    assert_eq!(
        resp.response_headers
            .as_ref()
            .and_then(|h| h.get("x-request-id"))
            .map(String::as_str),
        Some("req-1")
    );
    assert_eq!(
        transport.last_url().as_deref(),
        Some("https://g4f.test/v1/chat/completions")
    );
    assert_eq!(
        transport.last_body(),
        Some(json!({
            "model": "G4F-small-latest",
            "messages": [{"role": "user", "content": "Hello"}]
        }))
    );
    assert_eq!(transport.header("authorization").as_deref(), Some("Bearer test-api-key"));
    assert_eq!(transport.header("content-type").as_deref(), Some("application/json"));
}

#[tokio::test]
async fn generate_strips_echoed_continuation() {
    let transport = TestTransport::new(completion("Once upon a time..."));
    let model = provider_with(transport).chat("G4F-small-latest");
    let resp = model
        .do_generate(v1::CallOptions::new(continuation_prompt()))
        .await
        .unwrap();
    assert_eq!(resp.text.as_deref(), Some("time..."));
}

#[tokio::test]
async fn generate_keeps_text_that_does_not_echo() {
    let transport = TestTransport::new(completion("a different story"));
    let model = provider_with(transport).chat("G4F-small-latest");
    let resp = model
        .do_generate(v1::CallOptions::new(continuation_prompt()))
        .await
        .unwrap();
    assert_eq!(resp.text.as_deref(), Some("a different story"));
}

#[tokio::test]
async fn generate_with_empty_trailing_assistant_keeps_leading_whitespace() {
    let transport = TestTransport::new(completion("\n    fn main() {}"));
    let model = provider_with(transport).chat("G4F-small-latest");
    let prompt = vec![
        v1::PromptMessage::user("write code"),
        v1::PromptMessage::Assistant { content: vec![] },
    ];
    let resp = model.do_generate(v1::CallOptions::new(prompt)).await.unwrap();
    assert_eq!(resp.text.as_deref(), Some("\n    fn main() {}"));
}

#[tokio::test]
async fn generate_rejects_non_assistant_role_or_missing_index() {
    let mut wrong_role = completion("hi");
    wrong_role["choices"][0]["message"]["role"] = json!("user");
    let mut no_index = completion("hi");
    no_index["choices"][0]
        .as_object_mut()
        .unwrap()
        .remove("index");

    for body in [wrong_role, no_index] {
        let model = provider_with(TestTransport::new(body)).chat("G4F-small-latest");
        let err = model
            .do_generate(v1::CallOptions::new(vec![v1::PromptMessage::user("Hello")]))
            .await
            .unwrap_err();
        assert!(matches!(err, SdkError::InvalidResponse { .. }), "{err:?}");
    }
}

#[tokio::test]
async fn generate_extracts_tool_calls() {
    let transport = TestTransport::new(json!({
        "id": "c1",
        "created": 1,
        "model": "G4F-large-latest",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": "",
                "tool_calls": [{"id": "gSIMJiOkT", "function": {"name": "weather", "arguments": "{\"city\":\"Oslo\"}"}}]
            },
            "finish_reason": "tool_calls"
        }],
        "usage": {"prompt_tokens": 124, "completion_tokens": 17}
    }));
    let model = provider_with(transport).chat("G4F-large-latest");
    let resp = model
        .do_generate(v1::CallOptions::new(vec![v1::PromptMessage::user("weather in Oslo?")]))
        .await
        .unwrap();
    assert_eq!(resp.finish_reason, v1::FinishReason::ToolCalls);
    assert_eq!(
        resp.tool_calls,
        vec![v1::ToolCall::function("gSIMJiOkT", "weather", "{\"city\":\"Oslo\"}")]
    );
}

#[tokio::test]
async fn generate_reports_warnings_and_raw_call() {
    let transport = TestTransport::new(completion("ok"));
    let model = provider_with(transport).chat("G4F-small-latest");
    let options = v1::CallOptions {
        top_k: Some(3),
        ..v1::CallOptions::new(vec![v1::PromptMessage::user("Hello")])
    }
    .with_temperature(0.5);
    let resp = model.do_generate(options).await.unwrap();
    assert_eq!(resp.warnings, vec![v1::CallWarning::unsupported_setting("topK")]);
    assert_eq!(
        resp.raw_call.raw_settings,
        json!({"model": "G4F-small-latest", "temperature": 0.5})
    );
}

#[tokio::test]
async fn generate_rejects_unexpected_response_shape() {
    let transport = TestTransport::new(json!({"choices": "nope"}));
    let model = provider_with(transport).chat("G4F-small-latest");
    let err = model
        .do_generate(v1::CallOptions::new(vec![v1::PromptMessage::user("Hello")]))
        .await
        .unwrap_err();
    assert!(matches!(err, SdkError::InvalidResponse { .. }), "{err:?}");
}

#[tokio::test]
async fn generate_maps_upstream_errors() {
    let transport = TestTransport::failing(TransportError::HttpStatus {
        status: 401,
        body: r#"{"object":"error","message":"Unauthorized","type":"invalid_request_error","param":null,"code":"1000"}"#.into(),
        retry_after_ms: None,
        sanitized: "unauthorized".into(),
        headers: vec![],
    });
    let model = provider_with(transport).chat("G4F-small-latest");
    let err = model
        .do_generate(v1::CallOptions::new(vec![v1::PromptMessage::user("Hello")]))
        .await
        .unwrap_err();
    match err {
        SdkError::Upstream {
            status,
            message,
            data,
            ..
        } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Unauthorized");
            let data = data.expect("structured error data");
            assert_eq!(data.error_type, "invalid_request_error");
            assert_eq!(data.code.as_deref(), Some("1000"));
            assert_eq!(data.param, None);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn stream_emits_metadata_text_and_finish() {
    let mut last = text_chunk("");
    last["choices"][0]["finish_reason"] = json!("stop");
    last["usage"] = json!({"prompt_tokens": 4, "completion_tokens": 32, "total_tokens": 36});
    let transport = TestTransport::streaming(vec![
        sse(&text_chunk("Hello")),
        sse(&text_chunk(", ")),
        sse(&text_chunk("world!")),
        sse(&last),
        sse_done(),
    ]);
    let model = provider_with(transport.clone()).chat("G4F-small-latest");
    let resp = model
        .do_stream(v1::CallOptions::new(vec![v1::PromptMessage::user("Hello")]))
        .await
        .unwrap();
    assert_eq!(resp.request_body.as_ref().map(|b| b["stream"].clone()), Some(json!(true)));
    assert_eq!(transport.last_body().map(|b| b["stream"].clone()), Some(json!(true)));
    assert!(resp.raw_call.raw_settings.get("stream").is_none());

    let parts = collect(resp.stream).await;
    assert!(matches!(
        parts.first(),
        Some(v1::StreamPart::ResponseMetadata { meta }) if meta.id.as_deref() == Some("chunk-1")
            && meta.timestamp_ms == Some(1_711_113_008_000)
    ));
    assert_eq!(text_of(&parts), "Hello, world!");
    assert_eq!(
        parts.last(),
        Some(&v1::StreamPart::Finish {
            finish_reason: v1::FinishReason::Stop,
            usage: v1::Usage::new(4, 32),
        })
    );
}

#[tokio::test]
async fn stream_suppresses_echo_and_trims_once() {
    let transport = TestTransport::streaming(vec![
        sse(&text_chunk("Once upon a")),
        sse(&text_chunk(" time")),
        sse(&text_chunk(" there was")),
        sse_done(),
    ]);
    let model = provider_with(transport).chat("G4F-small-latest");
    let resp = model
        .do_stream(v1::CallOptions::new(continuation_prompt()))
        .await
        .unwrap();
    let parts = collect(resp.stream).await;
    let deltas: Vec<&str> = parts
        .iter()
        .filter_map(|p| match p {
            v1::StreamPart::TextDelta { text_delta } => Some(text_delta.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(deltas, vec!["time", " there was"]);
}

#[tokio::test]
async fn stream_with_empty_trailing_assistant_keeps_indentation() {
    let transport = TestTransport::streaming(vec![
        sse(&text_chunk("")),
        sse(&text_chunk("    indented")),
        sse_done(),
    ]);
    let model = provider_with(transport).chat("G4F-small-latest");
    let prompt = vec![
        v1::PromptMessage::user("write code"),
        v1::PromptMessage::assistant(""),
    ];
    let resp = model.do_stream(v1::CallOptions::new(prompt)).await.unwrap();
    let parts = collect(resp.stream).await;
    assert_eq!(text_of(&parts), "    indented");
}

#[tokio::test]
async fn stream_finishes_when_body_ends_without_done() {
    let transport = TestTransport::streaming(vec![sse(&text_chunk("partial"))]);
    let model = provider_with(transport).chat("G4F-small-latest");
    let resp = model
        .do_stream(v1::CallOptions::new(vec![v1::PromptMessage::user("Hello")]))
        .await
        .unwrap();
    let parts = collect(resp.stream).await;
    let finishes = parts
        .iter()
        .filter(|p| matches!(p, v1::StreamPart::Finish { .. }))
        .count();
    assert_eq!(finishes, 1);
    assert_eq!(
        parts.last(),
        Some(&v1::StreamPart::Finish {
            finish_reason: v1::FinishReason::Unknown,
            usage: v1::Usage::default(),
        })
    );
}

#[tokio::test]
async fn stream_transport_error_yields_error_then_finish() {
    let transport = TestTransport::streaming(vec![
        sse(&text_chunk("Hel")),
        Err(TransportError::IdleReadTimeout(std::time::Duration::from_secs(45))),
        sse(&text_chunk("never read")),
    ]);
    let model = provider_with(transport).chat("G4F-small-latest");
    let resp = model
        .do_stream(v1::CallOptions::new(vec![v1::PromptMessage::user("Hello")]))
        .await
        .unwrap();
    let parts = collect(resp.stream).await;
    assert_eq!(text_of(&parts), "Hel");
    let n = parts.len();
    assert!(matches!(parts[n - 2], v1::StreamPart::Error { .. }));
    assert!(matches!(
        parts[n - 1],
        v1::StreamPart::Finish {
            finish_reason: v1::FinishReason::Error,
            ..
        }
    ));
}

#[tokio::test]
async fn cancelled_request_returns_cancelled() {
    let transport = TestTransport::pending();
    let model = provider_with(transport.clone()).chat("G4F-small-latest");
    let token = CancellationToken::new();
    let options =
        v1::CallOptions::new(vec![v1::PromptMessage::user("Hello")]).with_abort_signal(token.clone());

    let canceller = async {
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        token.cancel();
    };
    let (res, _) = tokio::join!(model.do_generate(options), canceller);
    assert!(matches!(res, Err(SdkError::Cancelled)));
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn already_cancelled_stream_call_fails_fast() {
    let transport = TestTransport::streaming(vec![sse(&text_chunk("x"))]);
    let model = provider_with(transport).chat("G4F-small-latest");
    let token = CancellationToken::new();
    token.cancel();
    let options =
        v1::CallOptions::new(vec![v1::PromptMessage::user("Hello")]).with_abort_signal(token);
    let err = model.do_stream(options).await.err();
    assert!(matches!(err, Some(SdkError::Cancelled)));
}

#[tokio::test]
async fn concurrent_calls_do_not_share_state() {
    let mut reply_a = completion("for a");
    reply_a["usage"] = json!({"prompt_tokens": 1, "completion_tokens": 2});
    let mut reply_b = completion("for b");
    reply_b["usage"] = json!({"prompt_tokens": 7, "completion_tokens": 11});
    let transport = TestTransport::default()
        .with_reply_for("question a", reply_a)
        .with_reply_for("question b", reply_b);
    let model = provider_with(transport.clone()).chat("G4F-small-latest");
    let plain = v1::CallOptions::new(vec![v1::PromptMessage::user("question a")]);
    let noisy = v1::CallOptions {
        top_k: Some(1),
        presence_penalty: Some(0.5),
        ..v1::CallOptions::new(vec![v1::PromptMessage::user("question b")])
    };

    let (a, b) = tokio::join!(model.do_generate(plain), model.do_generate(noisy));
    let (a, b) = (a.unwrap(), b.unwrap());
    assert!(a.warnings.is_empty());
    assert_eq!(b.warnings.len(), 2);
    assert_eq!(a.text.as_deref(), Some("for a"));
    assert_eq!(b.text.as_deref(), Some("for b"));
    assert_eq!(a.usage, v1::Usage::new(1, 2));
    assert_eq!(b.usage, v1::Usage::new(7, 11));
    assert_eq!(transport.calls(), 2);
}

#[test]
fn capability_flags() {
    let model = provider_with(TestTransport::default()).chat("G4F-small-latest");
    assert_eq!(model.specification_version(), "v1");
    assert_eq!(model.provider_name(), "G4F.chat");
    assert_eq!(model.model_id(), "G4F-small-latest");
    assert_eq!(
        model.default_object_generation_mode(),
        Some(v1::ObjectGenerationMode::Json)
    );
    assert!(!model.supports_image_urls());
}
