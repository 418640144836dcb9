use serde::{Deserialize, Serialize};

/// --- OPENAI CHAT COMPLETIONS SCHEMA (non-streaming subset) ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiRequest {
    pub model: String,
    pub messages: Vec<OpenAiMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum OpenAiMessage {
    System { content: String },
    User { content: String },
}

impl OpenAiRequest {
    /// The two-message payload sent on every turn: persona first, then the user text.
    pub fn system_and_user(model: &str, system_prompt: &str, user_message: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![
                OpenAiMessage::System {
                    content: system_prompt.to_string(),
                },
                OpenAiMessage::User {
                    content: user_message.to_string(),
                },
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiResponse {
    #[serde(default)]
    pub choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiChoice {
    #[serde(default)]
    pub index: u32,
    pub message: OpenAiResponseMessage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiResponseMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl OpenAiResponse {
    /// Text of the first choice, if the upstream produced any.
    pub fn first_text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }
}
