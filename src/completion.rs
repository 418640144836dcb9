use crate::constants::SYSTEM_PROMPT;
use crate::main_helper::RelayConfig;
use crate::specs::openai::{OpenAiRequest, OpenAiResponse};
use crate::types::*;

/// Single-shot client for an OpenAI-compatible chat completions endpoint.
///
/// No retries and no timeout beyond what the supplied `reqwest::Client` carries.
#[derive(Clone)]
pub struct CompletionClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
}

impl CompletionClient {
    pub fn new(http: reqwest::Client, config: &RelayConfig) -> Self {
        Self {
            http,
            url: config.completions_url(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn build_request(&self, user_message: &str) -> OpenAiRequest {
        OpenAiRequest::system_and_user(&self.model, SYSTEM_PROMPT, user_message)
    }

    /// Sends the persona plus `user_message` and returns the first choice's text.
    pub async fn complete(&self, user_message: &str) -> Result<String> {
        let request = self.build_request(user_message);

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(RelayError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let error_body = match response.text().await {
                Ok(text) => text,
                Err(_) => "Unknown error".to_string(),
            };
            return Err(RelayError::Upstream(status, error_body).into());
        }

        let body = response.bytes().await.map_err(RelayError::Network)?;
        let parsed: OpenAiResponse = serde_json::from_slice(&body)
            .map_err(|e| RelayError::MalformedUpstream(format!("undecodable body: {}", e)))?;

        if parsed.choices.is_empty() {
            return Err(RelayError::MalformedUpstream("no choices returned".to_string()).into());
        }

        match parsed.first_text() {
            Some(text) => Ok(text.to_string()),
            None => Err(RelayError::MalformedUpstream(
                "first choice has no message content".to_string(),
            )
            .into()),
        }
    }
}
