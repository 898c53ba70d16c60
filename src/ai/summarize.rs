use serde::Deserialize;
use serde_json::{json, Value as JsonValue};

use super::{AiClient, AiError};

const PROMPT: &str = r#"
You are processing citizen waste complaints for a municipal cleanup program.
Read the complaint description and return ONLY a strict JSON object:
{
  "summary": string,        // concise 1-2 sentence gist of the complaint (<= 200 chars)
  "key_details": [string]   // short phrases: locations, waste kinds, hazards, access notes
}

Do not invent details that are not in the complaint.
"#;

const FALLBACK_SUMMARY_CHARS: usize = 200;

/// Condensed view of a complaint, stored alongside the raw description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplaintSummary {
    pub summary: String,
    pub key_details: Vec<String>,
}

impl ComplaintSummary {
    /// Used when the model is unavailable so the complaint is stored anyway.
    pub fn fallback(description: &str) -> Self {
        Self {
            summary: description.trim().chars().take(FALLBACK_SUMMARY_CHARS).collect(),
            key_details: Vec::new(),
        }
    }
}

pub async fn summarize_complaint(
    ai: &AiClient,
    description: &str,
) -> Result<ComplaintSummary, AiError> {
    let req_body = build_request(description);
    let text = ai.generate(&req_body).await?;
    parse_summary(&text)
}

fn build_request(description: &str) -> JsonValue {
    let context = format!("Complaint description:\n{}", description);
    json!({
        "generationConfig": { "response_mime_type": "application/json" },
        "contents": [{
            "role": "user",
            "parts": [
                { "text": PROMPT.to_string() },
                { "text": context }
            ]
        }]
    })
}

#[derive(Deserialize)]
struct RawSummary {
    summary: Option<String>,
    key_details: Option<Vec<String>>,
}

pub fn parse_summary(text: &str) -> Result<ComplaintSummary, AiError> {
    let raw: RawSummary = serde_json::from_str(text)?;
    let summary = raw
        .summary
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AiError::Schema("summary is missing".to_string()))?;
    let key_details = raw
        .key_details
        .ok_or_else(|| AiError::Schema("key_details is missing".to_string()))?;
    Ok(ComplaintSummary { summary, key_details })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_output_parses() {
        let text = r#"{
            "summary": "Overflowing dumpster behind the West Tower apartment block.",
            "key_details": ["West Tower", "dumpster overflow", "attracting rats"]
        }"#;
        let parsed = parse_summary(text).unwrap();
        assert!(parsed.summary.contains("West Tower"));
        assert_eq!(parsed.key_details.len(), 3);
    }

    #[test]
    fn missing_key_details_are_rejected() {
        let text = r#"{ "summary": "Trash on the beach." }"#;
        assert!(matches!(parse_summary(text), Err(AiError::Schema(_))));
    }

    #[test]
    fn blank_summary_is_rejected() {
        let text = r#"{ "summary": "   ", "key_details": [] }"#;
        assert!(matches!(parse_summary(text), Err(AiError::Schema(_))));
    }

    #[test]
    fn fallback_truncates_long_descriptions() {
        let description = "a".repeat(450);
        let fallback = ComplaintSummary::fallback(&description);
        assert_eq!(fallback.summary.chars().count(), FALLBACK_SUMMARY_CHARS);
        assert!(fallback.key_details.is_empty());
    }

    #[test]
    fn fallback_keeps_short_descriptions_intact() {
        let fallback = ComplaintSummary::fallback("  Broken glass near the school gate.  ");
        assert_eq!(fallback.summary, "Broken glass near the school gate.");
    }
}
