use crate::errors::AppError;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

/// Client for Groq's OpenAI-compatible chat completions endpoint.
#[derive(Clone)]
pub struct GroqClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

/// Email fields as the model is asked to return them.
///
/// Every field is optional because models routinely drop some.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmEmail {
    pub company: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub tone: Option<String>,
    pub word_count: Option<Value>,
}

impl GroqClient {
    /// Creates a new `GroqClient` whose requests fail after `timeout`.
    pub fn new(
        base_url: String,
        api_key: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                AppError::ExternalApiError(format!("Failed to create Groq client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends one system + user exchange and returns the assistant's text.
    pub async fn chat_completion(&self, system: &str, user: &str) -> Result<String, AppError> {
        let url = format!("{}/chat/completions", self.base_url);
        tracing::debug!("Calling Groq chat completions: {} (model {})", url, self.model);

        let body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user},
            ],
            "temperature": 0.4,
        });

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::ExternalApiError(format!(
                "Groq returned {}: {}",
                status,
                truncate(&error_text, 300)
            )));
        }

        let data: Value = response.json().await?;

        let content = data["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                AppError::ExternalApiError("Groq response missing message content".to_string())
            })?;

        Ok(content.to_string())
    }
}

/// Removes a surrounding Markdown code fence, including a `json` language tag.
pub fn strip_code_fence(content: &str) -> String {
    let cleaned = content.trim();
    if !cleaned.starts_with("```") {
        return cleaned.to_string();
    }

    let unfenced = cleaned.trim_matches('`');
    let mut lines: Vec<&str> = unfenced.lines().collect();
    if lines
        .first()
        .map(|line| line.trim().eq_ignore_ascii_case("json"))
        .unwrap_or(false)
    {
        lines.remove(0);
    }
    lines.join("\n").trim().to_string()
}

/// Parses model output into [`LlmEmail`], tolerating code fences.
pub fn parse_email_content(content: &str) -> Result<LlmEmail, AppError> {
    let cleaned = strip_code_fence(content);
    serde_json::from_str(&cleaned).map_err(|e| {
        AppError::ExternalApiError(format!(
            "ParseError: {}; content={}...",
            e,
            truncate(content, 300)
        ))
    })
}

/// Truncates to at most `max` characters on a char boundary.
pub fn truncate(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_client_creation() {
        let client = GroqClient::new(
            "https://example.com/openai/v1/".to_string(),
            "token".to_string(),
            "test-model".to_string(),
            Duration::from_secs(5),
        );
        assert!(client.is_ok());
        assert_eq!(client.unwrap().model(), "test-model");
    }

    #[test]
    fn test_strip_code_fence_with_language_tag() {
        let content = "```json\n{\"body\": \"Hello\"}\n```";
        assert_eq!(strip_code_fence(content), "{\"body\": \"Hello\"}");
    }

    #[test]
    fn test_strip_code_fence_plain() {
        assert_eq!(strip_code_fence("  {\"a\": 1} "), "{\"a\": 1}");
        assert_eq!(strip_code_fence("```\n{\"a\": 1}\n```"), "{\"a\": 1}");
    }

    #[test]
    fn test_parse_email_content_tolerates_missing_fields() {
        let email = parse_email_content("{\"body\": \"Hi there\"}").unwrap();
        assert_eq!(email.body.as_deref(), Some("Hi there"));
        assert!(email.subject.is_none());
    }

    #[test]
    fn test_parse_email_content_rejects_prose() {
        let result = parse_email_content("Sure! Here is your email: Hi there");
        assert!(matches!(result, Err(AppError::ExternalApiError(_))));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("abc", 10), "abc");
    }
}
