use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use serde_json::Value as JsonValue;

use crate::ai_sdk_core::SdkError;
use crate::ai_sdk_types::v1;

use crate::provider_g4f::chat::prompt::{
    G4FMessage, G4FPrompt, G4FToolCall, G4FUserContent, G4FUserPart,
};

const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// Convert a neutral prompt into backend chat messages.
///
/// Message order is preserved. Each tool result becomes its own `tool`
/// message, and a trailing assistant message is flagged as a prefix.
pub fn convert_to_g4f_chat_messages(prompt: &v1::Prompt) -> Result<G4FPrompt, SdkError> {
    let mut messages: G4FPrompt = Vec::with_capacity(prompt.len());
    let last_index = prompt.len().saturating_sub(1);

    for (index, message) in prompt.iter().enumerate() {
        match message {
            v1::PromptMessage::System { content } => {
                messages.push(G4FMessage::System {
                    content: content.clone(),
                });
            }
            v1::PromptMessage::User { content } => {
                messages.push(G4FMessage::User {
                    content: convert_user_content(content)?,
                });
            }
            v1::PromptMessage::Assistant { content } => {
                let mut text = String::new();
                let mut tool_calls = Vec::new();
                for part in content {
                    match part {
                        v1::AssistantPart::Text { text: t } => text.push_str(t),
                        v1::AssistantPart::ToolCall(tc) => tool_calls.push(G4FToolCall::function(
                            tc.tool_call_id.clone(),
                            tc.tool_name.clone(),
                            tc.args.clone(),
                        )),
                    }
                }
                messages.push(G4FMessage::Assistant {
                    content: text,
                    prefix: (index == last_index).then_some(true),
                    tool_calls,
                });
            }
            v1::PromptMessage::Tool { content } => {
                for result in content {
                    messages.push(G4FMessage::Tool {
                        name: result.tool_name.clone(),
                        content: result.result.to_string(),
                        tool_call_id: result.tool_call_id.clone(),
                    });
                }
            }
        }
    }

    Ok(messages)
}

fn convert_user_content(parts: &[v1::UserPart]) -> Result<G4FUserContent, SdkError> {
    if let [v1::UserPart::Text { text }] = parts {
        return Ok(G4FUserContent::Text(text.clone()));
    }
    let mut out = Vec::with_capacity(parts.len());
    for part in parts {
        match part {
            v1::UserPart::Text { text } => out.push(G4FUserPart::Text { text: text.clone() }),
            v1::UserPart::Image { image, mime_type } => out.push(G4FUserPart::ImageUrl {
                image_url: image_url(image, mime_type.as_deref().unwrap_or(DEFAULT_IMAGE_MIME)),
            }),
            v1::UserPart::File { data, mime_type } if mime_type.starts_with("image/") => {
                out.push(G4FUserPart::ImageUrl {
                    image_url: image_url(data, mime_type),
                })
            }
            v1::UserPart::File { mime_type, .. } => {
                return Err(SdkError::UnsupportedFunctionality {
                    functionality: format!("file content parts ({mime_type}) in user messages"),
                })
            }
        }
    }
    Ok(G4FUserContent::Parts(out))
}

fn image_url(data: &v1::DataContent, mime_type: &str) -> String {
    match data {
        v1::DataContent::Url { url } => url.clone(),
        v1::DataContent::Base64 { base64 } => format!("data:{mime_type};base64,{base64}"),
        v1::DataContent::Bytes { bytes } => {
            format!("data:{mime_type};base64,{}", B64.encode(bytes))
        }
    }
}

/// Map backend messages back into the neutral prompt shape.
///
/// Text content survives a round trip unchanged; tool message content is
/// parsed as JSON when possible and kept as a string otherwise.
pub fn convert_from_g4f_chat_messages(messages: &[G4FMessage]) -> v1::Prompt {
    messages
        .iter()
        .map(|message| match message {
            G4FMessage::System { content } => v1::PromptMessage::System {
                content: content.clone(),
            },
            G4FMessage::User { content } => v1::PromptMessage::User {
                content: match content {
                    G4FUserContent::Text(text) => vec![v1::UserPart::Text { text: text.clone() }],
                    G4FUserContent::Parts(parts) => parts
                        .iter()
                        .map(|part| match part {
                            G4FUserPart::Text { text } => v1::UserPart::Text { text: text.clone() },
                            G4FUserPart::ImageUrl { image_url } => v1::UserPart::Image {
                                image: v1::DataContent::Url {
                                    url: image_url.clone(),
                                },
                                mime_type: None,
                            },
                        })
                        .collect(),
                },
            },
            G4FMessage::Assistant {
                content,
                tool_calls,
                ..
            } => {
                let mut parts = Vec::with_capacity(tool_calls.len() + 1);
                if !content.is_empty() {
                    parts.push(v1::AssistantPart::Text {
                        text: content.clone(),
                    });
                }
                parts.extend(tool_calls.iter().map(|tc| {
                    v1::AssistantPart::ToolCall(v1::ToolCallPart {
                        tool_call_id: tc.id.clone(),
                        tool_name: tc.function.name.clone(),
                        args: tc.function.arguments.clone(),
                    })
                }));
                v1::PromptMessage::Assistant { content: parts }
            }
            G4FMessage::Tool {
                name,
                content,
                tool_call_id,
            } => v1::PromptMessage::Tool {
                content: vec![v1::ToolResultPart {
                    tool_call_id: tool_call_id.clone(),
                    tool_name: name.clone(),
                    result: serde_json::from_str(content)
                        .unwrap_or_else(|_| JsonValue::String(content.clone())),
                    is_error: false,
                }],
            },
        })
        .collect()
}
