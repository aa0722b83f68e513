use serde::{Deserialize, Serialize};

pub type G4FPrompt = Vec<G4FMessage>;

/// A message in the backend's chat wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum G4FMessage {
    System {
        content: String,
    },
    User {
        content: G4FUserContent,
    },
    Assistant {
        content: String,
        /// Marks a trailing assistant message as a continuation seed.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        prefix: Option<bool>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        tool_calls: Vec<G4FToolCall>,
    },
    Tool {
        name: String,
        content: String,
        tool_call_id: String,
    },
}

/// User content is a bare string when it is a single text part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum G4FUserContent {
    Text(String),
    Parts(Vec<G4FUserPart>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum G4FUserPart {
    Text { text: String },
    ImageUrl { image_url: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct G4FToolCall {
    pub id: String,
    #[serde(rename = "type", default = "function_kind")]
    pub kind: String,
    pub function: G4FFunctionCall,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct G4FFunctionCall {
    pub name: String,
    pub arguments: String,
}

fn function_kind() -> String {
    "function".to_string()
}

impl G4FToolCall {
    pub fn function(id: impl Into<String>, name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: function_kind(),
            function: G4FFunctionCall {
                name: name.into(),
                arguments: arguments.into(),
            },
        }
    }
}
