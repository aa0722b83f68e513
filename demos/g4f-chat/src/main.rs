use ai_sdk_g4f::core::types as v1;
use ai_sdk_g4f::core::LanguageModel;
use ai_sdk_g4f::providers::g4f::{model_ids, G4FProvider, G4FProviderSettings};
use anyhow::Result;
use futures_util::StreamExt;

// Run with:
//   G4F_API_KEY=... cargo run -p g4f-chat
// Optional:
//   G4F_MODEL=G4F-small-latest   (default)
//   G4F_BASE_URL=https://api.g4f.ai/v1
//   RUST_LOG=ai_sdk=debug

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let model_id =
        std::env::var("G4F_MODEL").unwrap_or_else(|_| model_ids::G4F_SMALL_LATEST.to_string());
    let settings = G4FProviderSettings {
        base_url: std::env::var("G4F_BASE_URL").ok(),
        ..Default::default()
    };
    let provider = G4FProvider::new(settings)?;
    let lm = provider.chat(model_id);

    // The trailing assistant message is continued, not repeated.
    let options = v1::CallOptions::new(vec![
        v1::PromptMessage::system("You are a storyteller. Keep it to one paragraph."),
        v1::PromptMessage::user("Tell me a story about a lighthouse."),
        v1::PromptMessage::assistant("Once upon a time"),
    ])
    .with_temperature(0.7);

    let resp = lm.do_stream(options).await?;
    for warning in &resp.warnings {
        eprintln!("[warning] {warning:?}");
    }

    let mut stream = resp.stream;
    print!("Once upon a time ");
    while let Some(part) = stream.next().await {
        match part? {
            v1::StreamPart::TextDelta { text_delta } => {
                print!("{text_delta}");
                let _ = std::io::Write::flush(&mut std::io::stdout());
            }
            v1::StreamPart::ToolCall(call) => {
                eprintln!("\n[tool] {} {}", call.tool_name, call.args);
            }
            v1::StreamPart::ResponseMetadata { meta } => {
                eprintln!("[response] id={:?} model={:?}", meta.id, meta.model_id);
            }
            v1::StreamPart::Error { error } => {
                eprintln!("\n[stream error] {error}");
            }
            v1::StreamPart::Finish {
                finish_reason,
                usage,
            } => {
                println!();
                eprintln!(
                    "[finish] {:?} | prompt: {} | completion: {}",
                    finish_reason,
                    usage
                        .prompt_tokens
                        .map(|v| v.to_string())
                        .unwrap_or_else(|| "?".into()),
                    usage
                        .completion_tokens
                        .map(|v| v.to_string())
                        .unwrap_or_else(|| "?".into()),
                );
            }
        }
    }

    Ok(())
}
