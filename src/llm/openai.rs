use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const COMPLETION_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const MODEL: &str = "gpt-3.5-turbo";
const MAX_REPLY_TOKENS: u32 = 300;
const SAMPLING_TEMPERATURE: f32 = 0.7;

const GENERIC_REJECTION: &str = "Failed to get response from OpenAI";

/// Failure modes for one completion round-trip.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// No credential was available; raised before any network activity.
    #[error("Please provide your OpenAI API key")]
    MissingCredential,
    /// The service answered with a non-success status or an unreadable
    /// payload. Carries the service-reported message when present.
    #[error("{0}")]
    Rejected(String),
    /// The endpoint could not be reached at all.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Client for the hosted chat-completion endpoint. One request per call, no
/// retries; the transport default is the only timeout.
#[derive(Debug, Clone)]
pub struct CompletionClient {
    http: Client,
    endpoint: String,
}

impl CompletionClient {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
            endpoint: COMPLETION_ENDPOINT.to_string(),
        }
    }

    #[cfg(test)]
    pub fn with_endpoint(endpoint: &str) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.to_string(),
        }
    }

    /// Send the composed system prompt plus the user's question as exactly
    /// two conversational turns and extract the reply text from the first
    /// choice.
    pub async fn complete(
        &self,
        system_prompt: &str,
        user_message: &str,
        api_key: &str,
    ) -> Result<String, CompletionError> {
        if api_key.trim().is_empty() {
            return Err(CompletionError::MissingCredential);
        }

        let request = ChatRequest {
            model: MODEL.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user_message.to_string(),
                },
            ],
            max_tokens: MAX_REPLY_TOKENS,
            temperature: SAMPLING_TEMPERATURE,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let message = match response.text().await {
                Ok(body) => serde_json::from_str::<ErrorResponse>(&body)
                    .ok()
                    .and_then(|body| body.error)
                    .map(|error| error.message)
                    .unwrap_or_else(|| GENERIC_REJECTION.to_string()),
                Err(_) => GENERIC_REJECTION.to_string(),
            };
            return Err(CompletionError::Rejected(message));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|_| CompletionError::Rejected(GENERIC_REJECTION.to_string()))?;

        match body.choices.into_iter().next() {
            Some(choice) => Ok(choice.message.content),
            None => Err(CompletionError::Rejected(GENERIC_REJECTION.to_string())),
        }
    }
}
