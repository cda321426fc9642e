use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const EXPLAIN_FALLBACK: &str = "Error connecting to AI service.";
const EXPLAIN_EMPTY_FALLBACK: &str =
    "I'm sorry, I couldn't generate an explanation at this time.";
const CHAT_FALLBACK: &str = "Failed to get response from AI.";
const CHAT_EMPTY_FALLBACK: &str = "No response generated.";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const EXPERT_SYSTEM_PROMPT: &str = "You are a world-class systems engineer specializing in \
     Web APIs and Desktop Portals (XDG, Wayland, macOS, Windows). Explain complex system \
     interaction concepts simply.";

#[derive(Error, Debug)]
pub enum InspectorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: status {0}")]
    Api(u16),

    #[error("empty completion")]
    EmptyCompletion,
}

/// Connection settings for the completion endpoint.
#[derive(Debug, Clone)]
pub struct InspectorConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

fn extract_text(payload: ChatResponse) -> Result<String, InspectorError> {
    let text = payload
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .unwrap_or_default();
    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(InspectorError::EmptyCompletion);
    }
    Ok(text)
}

/// Best-effort explanation client. `explain` and `chat` always return text.
pub struct ExplanationClient {
    http: Client,
    config: InspectorConfig,
}

impl ExplanationClient {
    pub fn new(config: InspectorConfig) -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { http, config }
    }

    /// Explain how a capability bridges from the page to the OS.
    pub async fn explain(&self, portal: &str) -> String {
        let prompt = format!(
            "Explain how the web browser triggers a system-level \"{portal}\" dialog. \
             Mention technologies like XDG Desktop Portals for Linux, macOS permissions, \
             and Windows API wrappers. Keep it professional, technical, and concise."
        );
        match self.complete(None, &prompt, Some(0.7)).await {
            Ok(text) => text,
            Err(InspectorError::EmptyCompletion) => EXPLAIN_EMPTY_FALLBACK.to_string(),
            Err(err) => {
                warn!(error = %err, "explanation request failed");
                EXPLAIN_FALLBACK.to_string()
            }
        }
    }

    /// Free-form question to the portal-expert persona.
    pub async fn chat(&self, message: &str) -> String {
        match self.complete(Some(EXPERT_SYSTEM_PROMPT), message, None).await {
            Ok(text) => text,
            Err(InspectorError::EmptyCompletion) => CHAT_EMPTY_FALLBACK.to_string(),
            Err(err) => {
                warn!(error = %err, "chat request failed");
                CHAT_FALLBACK.to_string()
            }
        }
    }

    async fn complete(
        &self,
        system: Option<&str>,
        user: &str,
        temperature: Option<f32>,
    ) -> Result<String, InspectorError> {
        let mut messages = Vec::new();
        if let Some(system) = system {
            messages.push(ChatMessage {
                role: "system",
                content: system.to_string(),
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: user.to_string(),
        });
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages,
            temperature,
        };

        let mut builder = self.http.post(&self.config.endpoint).json(&request);
        if let Some(api_key) = &self.config.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(InspectorError::Api(status.as_u16()));
        }
        let payload: ChatResponse = response.json().await?;
        debug!(choices = payload.choices.len(), "completion received");
        extract_text(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> ChatResponse {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn completion_text_extracts_from_first_choice() {
        let payload = parse(
            r#"{"choices":[{"message":{"content":"  XDG portals broker the dialog.  "}}]}"#,
        );
        assert_eq!(
            extract_text(payload).unwrap(),
            "XDG portals broker the dialog."
        );
    }

    #[test]
    fn empty_or_missing_content_is_an_empty_completion() {
        let payload = parse(r#"{"choices":[{"message":{"content":"   "}}]}"#);
        assert!(matches!(
            extract_text(payload),
            Err(InspectorError::EmptyCompletion)
        ));

        let payload = parse(r#"{"choices":[{"message":{}}]}"#);
        assert!(matches!(
            extract_text(payload),
            Err(InspectorError::EmptyCompletion)
        ));

        let payload = parse(r#"{"choices":[]}"#);
        assert!(matches!(
            extract_text(payload),
            Err(InspectorError::EmptyCompletion)
        ));
    }

    #[tokio::test]
    async fn transport_failure_degrades_to_fallback_strings() {
        // Nothing listens on the discard port; the request fails without
        // leaving the machine.
        let client = ExplanationClient::new(InspectorConfig {
            endpoint: "http://127.0.0.1:9/v1/chat/completions".to_string(),
            model: "portal-expert".to_string(),
            api_key: None,
        });
        assert_eq!(client.explain("camera").await, EXPLAIN_FALLBACK);
        assert_eq!(client.chat("what is a portal?").await, CHAT_FALLBACK);
    }
}
