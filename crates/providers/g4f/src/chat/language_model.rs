use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};

use crate::ai_sdk_core::cancel::{cancellable_stream, run_cancellable};
use crate::ai_sdk_core::headers::response_headers_map;
use crate::ai_sdk_core::transport::HttpTransport;
use crate::ai_sdk_core::{GenerateResponse, LanguageModel, SdkError, StreamResponse};
use crate::ai_sdk_types::v1;

use crate::provider_g4f::chat::convert::convert_to_g4f_chat_messages;
use crate::provider_g4f::chat::prepare_tools::{function_tool_json, prepare_tools};
use crate::provider_g4f::chat::prompt::{G4FMessage, G4FPrompt};
use crate::provider_g4f::chat::response::{response_metadata, G4FChatResponse};
use crate::provider_g4f::chat::settings::G4FChatSettings;
use crate::provider_g4f::config::G4FConfig;
use crate::provider_g4f::error::map_transport_error_to_sdk_error;
use crate::provider_g4f::finish_reason::map_g4f_finish_reason;
use crate::provider_g4f::stream::build_stream;

/// Request arguments for one chat call.
#[derive(Debug, Clone)]
pub struct ChatArgs {
    /// Full request body, `messages` included.
    pub body: JsonValue,
    pub messages: G4FPrompt,
    pub warnings: Vec<v1::CallWarning>,
}

impl ChatArgs {
    /// Prompt and settings as reported in `raw_call`.
    pub fn raw_call(&self) -> v1::RawCall {
        let mut settings = self.body.clone();
        if let Some(map) = settings.as_object_mut() {
            map.remove("messages");
        }
        v1::RawCall {
            raw_prompt: json!(self.messages),
            raw_settings: settings,
        }
    }
}

/// Build the request body and warnings for a call. Pure: no I/O.
///
/// Settings the backend does not understand are dropped with an
/// `unsupported-setting` warning instead of failing the call.
pub fn build_args(
    model_id: &str,
    settings: &G4FChatSettings,
    options: &v1::CallOptions,
) -> Result<ChatArgs, SdkError> {
    if options.prompt.is_empty() {
        return Err(SdkError::InvalidArgument {
            message: "prompt must contain at least one message".into(),
        });
    }

    let mut warnings: Vec<v1::CallWarning> = vec![];
    if options.top_k.is_some() {
        warnings.push(v1::CallWarning::unsupported_setting("topK"));
    }
    if options.frequency_penalty.is_some() {
        warnings.push(v1::CallWarning::unsupported_setting("frequencyPenalty"));
    }
    if options.presence_penalty.is_some() {
        warnings.push(v1::CallWarning::unsupported_setting("presencePenalty"));
    }
    if options.stop_sequences.is_some() {
        warnings.push(v1::CallWarning::unsupported_setting("stopSequences"));
    }
    let json_output = match &options.response_format {
        Some(v1::ResponseFormat::Json { schema, .. }) => {
            if schema.is_some() {
                warnings.push(v1::CallWarning::UnsupportedSetting {
                    setting: "responseFormat".into(),
                    details: Some("JSON response format schema is not supported".into()),
                });
            }
            true
        }
        _ => false,
    };

    let messages = convert_to_g4f_chat_messages(&options.prompt)?;

    let mut body_map = serde_json::Map::new();
    body_map.insert("model".into(), json!(model_id));
    if let Some(safe_prompt) = settings.safe_prompt {
        body_map.insert("safe_prompt".into(), json!(safe_prompt));
    }
    if let Some(mt) = options.max_tokens {
        body_map.insert("max_tokens".into(), json!(mt));
    }
    if let Some(t) = options.temperature {
        body_map.insert("temperature".into(), json!(t));
    }
    if let Some(tp) = options.top_p {
        body_map.insert("top_p".into(), json!(tp));
    }
    if let Some(seed) = options.seed {
        body_map.insert("random_seed".into(), json!(seed));
    }
    if json_output {
        body_map.insert("response_format".into(), json!({"type": "json_object"}));
    }
    body_map.insert("messages".into(), json!(messages));

    match &options.mode {
        v1::CallMode::Regular { tools, tool_choice } => {
            let prep = prepare_tools(tools, tool_choice.as_ref());
            warnings.extend(prep.warnings);
            if let Some(tools) = prep.tools {
                body_map.insert("tools".into(), json!(tools));
            }
            if let Some(choice) = prep.tool_choice {
                body_map.insert("tool_choice".into(), choice);
            }
        }
        v1::CallMode::ObjectJson { .. } => {
            body_map.insert("response_format".into(), json!({"type": "json_object"}));
        }
        v1::CallMode::ObjectTool { tool } => {
            body_map.insert("tool_choice".into(), json!("any"));
            body_map.insert("tools".into(), json!([function_tool_json(tool)]));
        }
    }

    Ok(ChatArgs {
        body: JsonValue::Object(body_map),
        messages,
        warnings,
    })
}

/// Content of a trailing assistant message, which the backend repeats at the
/// start of its reply. A blank message seeds nothing.
fn continuation_seed(messages: &[G4FMessage]) -> Option<&str> {
    match messages.last() {
        Some(G4FMessage::Assistant { content, .. }) if !content.trim().is_empty() => {
            Some(content.as_str())
        }
        _ => None,
    }
}

/// Drop the echoed seed and the whitespace separating it from the continuation.
fn strip_echo(text: String, seed: Option<&str>) -> String {
    match seed.and_then(|seed| text.strip_prefix(seed)) {
        Some(rest) => rest.trim_start().to_string(),
        None => text,
    }
}

pub struct G4FChatLanguageModel<T: HttpTransport = crate::reqwest_transport::ReqwestTransport> {
    model_id: String,
    settings: G4FChatSettings,
    cfg: G4FConfig<T>,
}

impl<T: HttpTransport> G4FChatLanguageModel<T> {
    pub fn new(model_id: impl Into<String>, settings: G4FChatSettings, cfg: G4FConfig<T>) -> Self {
        Self {
            model_id: model_id.into(),
            settings,
            cfg,
        }
    }

    pub fn settings(&self) -> &G4FChatSettings {
        &self.settings
    }

    pub fn get_args(&self, options: &v1::CallOptions) -> Result<ChatArgs, SdkError> {
        build_args(&self.model_id, &self.settings, options)
    }
}

#[async_trait]
impl<T: HttpTransport + Send + Sync> LanguageModel for G4FChatLanguageModel<T> {
    fn provider_name(&self) -> &str {
        &self.cfg.provider
    }
    fn model_id(&self) -> &str {
        &self.model_id
    }
    fn default_object_generation_mode(&self) -> Option<v1::ObjectGenerationMode> {
        Some(v1::ObjectGenerationMode::Json)
    }
    fn supports_image_urls(&self) -> bool {
        false
    }

    async fn do_generate(&self, options: v1::CallOptions) -> Result<GenerateResponse, SdkError> {
        let args = self.get_args(&options)?;
        let headers = self.cfg.request_headers(&options.headers)?;
        let url = self.cfg.url("/chat/completions");
        tracing::debug!(
            target: "ai_sdk::providers::g4f",
            model = %self.model_id,
            messages = args.messages.len(),
            warnings = args.warnings.len(),
            "chat request"
        );

        let (json, res_headers) = run_cancellable(options.abort_signal.as_ref(), async {
            self.cfg
                .http
                .post_json(&url, &headers, &args.body, &self.cfg.transport_cfg)
                .await
                .map_err(map_transport_error_to_sdk_error)
        })
        .await?;

        let parsed = G4FChatResponse::deserialize(&json).map_err(|err| SdkError::InvalidResponse {
            message: format!("unexpected chat completion shape: {err}"),
            body: Some(json.clone()),
        })?;
        let G4FChatResponse {
            id,
            created,
            model,
            choices,
            usage,
        } = parsed;
        let choice = choices
            .into_iter()
            .next()
            .ok_or_else(|| SdkError::InvalidResponse {
                message: "chat completion has no choices".into(),
                body: Some(json.clone()),
            })?;

        let seed = continuation_seed(&args.messages);
        let text = choice.message.content.map(|text| strip_echo(text, seed));
        let tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|tc| tc.into_tool_call())
            .collect();

        Ok(GenerateResponse {
            text,
            tool_calls,
            finish_reason: map_g4f_finish_reason(choice.finish_reason.as_deref()),
            usage: usage.into(),
            raw_call: args.raw_call(),
            request_body: Some(args.body),
            response_headers: response_headers_map(res_headers),
            response: Some(response_metadata(id, created, model)),
            warnings: args.warnings,
        })
    }

    async fn do_stream(&self, options: v1::CallOptions) -> Result<StreamResponse, SdkError> {
        let args = self.get_args(&options)?;
        let raw_call = args.raw_call();
        let ChatArgs {
            mut body,
            messages,
            warnings,
        } = args;
        if let Some(map) = body.as_object_mut() {
            map.insert("stream".into(), JsonValue::Bool(true));
        }
        let headers = self.cfg.request_headers(&options.headers)?;
        let url = self.cfg.url("/chat/completions");
        tracing::debug!(
            target: "ai_sdk::providers::g4f",
            model = %self.model_id,
            messages = messages.len(),
            "chat stream request"
        );

        let resp = run_cancellable(options.abort_signal.as_ref(), async {
            self.cfg
                .http
                .post_json_stream(&url, &headers, &body, &self.cfg.transport_cfg)
                .await
                .map_err(map_transport_error_to_sdk_error)
        })
        .await?;
        let (bytes, res_headers) = T::into_stream(resp);

        let seed = continuation_seed(&messages).map(str::to_string);
        let stream = cancellable_stream(build_stream(bytes, seed), options.abort_signal.clone());

        Ok(StreamResponse {
            stream,
            raw_call,
            request_body: Some(body),
            response_headers: response_headers_map(res_headers),
            warnings,
        })
    }
}
