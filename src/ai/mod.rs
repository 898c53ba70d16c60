pub mod classify;
pub mod summarize;

use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::config::Config;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Error)]
pub enum AiError {
    #[error("GEMINI_API_KEY is not configured")]
    Unconfigured,
    #[error("model request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("model endpoint returned http {status}: {body}")]
    Endpoint { status: u16, body: String },
    #[error("model response carried no text candidate")]
    NoCandidate,
    #[error("model output was not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("model output did not match the expected schema: {0}")]
    Schema(String),
}

/// Thin client for the Gemini generateContent endpoint.
#[derive(Clone)]
pub struct AiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl AiClient {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.ai_timeout)
            .build()?;
        Ok(Self {
            http,
            api_key: config.gemini_api_key.clone(),
            model: config.gemini_model.clone(),
        })
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            GEMINI_BASE_URL, self.model, self.api_key
        )
    }

    /// Sends one generateContent request and returns the first text part of
    /// the first candidate.
    async fn generate(&self, body: &JsonValue) -> Result<String, AiError> {
        if !self.is_configured() {
            return Err(AiError::Unconfigured);
        }
        let resp = self.http.post(self.endpoint()).json(body).send().await?;
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(AiError::Endpoint {
                status,
                body: truncate_body(&body),
            });
        }
        let v: JsonValue = resp.json().await?;
        extract_candidate_text(&v).ok_or(AiError::NoCandidate)
    }
}

// candidates[0].content.parts[*].text
fn extract_candidate_text(v: &JsonValue) -> Option<String> {
    let cands = v.get("candidates")?.as_array()?;
    let first = cands.first()?;
    let content = first.get("content")?;
    let parts = content.get("parts")?.as_array()?;
    for p in parts {
        if let Some(t) = p.get("text").and_then(|x| x.as_str()) {
            return Some(t.to_string());
        }
    }
    None
}

fn truncate_body(s: &str) -> String {
    s.chars().take(300).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn candidate_text_comes_from_first_text_part() {
        let v = json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "inline_data": { "mime_type": "image/png", "data": "..." } },
                        { "text": "{\"ok\":true}" }
                    ]
                }
            }]
        });
        assert_eq!(extract_candidate_text(&v), Some("{\"ok\":true}".to_string()));
    }

    #[test]
    fn missing_candidates_yield_none() {
        assert_eq!(extract_candidate_text(&json!({})), None);
        assert_eq!(extract_candidate_text(&json!({ "candidates": [] })), None);
        let no_text = json!({ "candidates": [{ "content": { "parts": [] } }] });
        assert_eq!(extract_candidate_text(&no_text), None);
    }

    #[test]
    fn endpoint_bodies_are_truncated_for_logs() {
        let long = "x".repeat(1000);
        assert_eq!(truncate_body(&long).len(), 300);
        assert_eq!(truncate_body("short"), "short");
    }

    #[tokio::test]
    async fn blank_api_key_fails_before_any_request_is_sent() {
        let client = AiClient {
            http: reqwest::Client::new(),
            api_key: String::new(),
            model: "gemini-flash-latest".to_string(),
        };
        assert!(!client.is_configured());
        let err = client.generate(&json!({})).await.unwrap_err();
        assert!(matches!(err, AiError::Unconfigured));
    }
}
