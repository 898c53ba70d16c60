use serde::Deserialize;
use serde_json::{json, Value as JsonValue};

use super::{AiClient, AiError};
use crate::models::{Severity, WasteAnalysis, WasteType};

const PROMPT: &str = r#"
You are an expert waste management analyst for a municipal cleanup program.
Analyze the attached photo of a reported waste site and return ONLY a strict JSON object:
{
  "waste_detected": boolean,         // whether any waste is visible in the photo
  "waste_type": "plastic" | "organic" | "electronic" | "glass" | "paper" | "metal" | "textile" | "hazardous" | "mixed" | "unknown",
  "severity": "low" | "medium" | "high" | "critical",
  "analysis_details": string         // what was identified and why it got this severity
}

RULES:
1. If no waste is visible, set waste_detected to false and OMIT waste_type and severity.
2. If several kinds of waste are present, pick the predominant one, or "mixed" when none dominates.
3. Judge severity from the quantity of waste, its type, and the potential environmental impact.
4. analysis_details must explain the classification, or why no waste was detected.
"#;

/// Classifies a waste-site photo. The photo arrives as the base64 payload of
/// a data URI, already split from its mime type.
pub async fn classify_waste_image(
    ai: &AiClient,
    mime: &str,
    base64_data: &str,
) -> Result<WasteAnalysis, AiError> {
    let req_body = build_request(mime, base64_data);
    let text = ai.generate(&req_body).await?;
    parse_classification(&text)
}

fn build_request(mime: &str, base64_data: &str) -> JsonValue {
    json!({
        "generationConfig": { "response_mime_type": "application/json" },
        "contents": [{
            "role": "user",
            "parts": [
                { "text": PROMPT.to_string() },
                { "inline_data": { "mime_type": mime, "data": base64_data } }
            ]
        }]
    })
}

#[derive(Deserialize)]
struct RawClassification {
    waste_detected: Option<bool>,
    waste_type: Option<String>,
    severity: Option<String>,
    analysis_details: Option<String>,
}

/// Validates model output against the classification contract. Anything
/// off-schema is a hard failure, never a partial result.
pub fn parse_classification(text: &str) -> Result<WasteAnalysis, AiError> {
    let raw: RawClassification = serde_json::from_str(text)?;

    let waste_detected = raw
        .waste_detected
        .ok_or_else(|| AiError::Schema("waste_detected is missing".to_string()))?;
    let analysis_details = raw
        .analysis_details
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| AiError::Schema("analysis_details is missing".to_string()))?;

    if !waste_detected {
        // A negative result never carries a type or severity.
        return Ok(WasteAnalysis {
            waste_detected: false,
            waste_type: None,
            severity: None,
            analysis_details,
        });
    }

    let waste_type = match raw.waste_type.as_deref() {
        Some(s) => WasteType::parse(s)
            .ok_or_else(|| AiError::Schema(format!("unknown waste_type '{s}'")))?,
        None => {
            return Err(AiError::Schema(
                "waste_type is missing for a positive detection".to_string(),
            ))
        }
    };
    let severity = match raw.severity.as_deref() {
        Some(s) => Severity::parse(s)
            .ok_or_else(|| AiError::Schema(format!("unknown severity '{s}'")))?,
        None => {
            return Err(AiError::Schema(
                "severity is missing for a positive detection".to_string(),
            ))
        }
    };

    Ok(WasteAnalysis {
        waste_detected: true,
        waste_type: Some(waste_type),
        severity: Some(severity),
        analysis_details,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_detection_parses_type_and_severity() {
        let text = r#"{
            "waste_detected": true,
            "waste_type": "plastic",
            "severity": "high",
            "analysis_details": "Large pile of plastic bottles next to the culvert."
        }"#;
        let analysis = parse_classification(text).unwrap();
        assert!(analysis.waste_detected);
        assert_eq!(analysis.waste_type, Some(WasteType::Plastic));
        assert_eq!(analysis.severity, Some(Severity::High));
    }

    #[test]
    fn negative_detection_drops_stray_type_and_severity() {
        let text = r#"{
            "waste_detected": false,
            "waste_type": "plastic",
            "severity": "low",
            "analysis_details": "The photo shows a clean sidewalk."
        }"#;
        let analysis = parse_classification(text).unwrap();
        assert!(!analysis.waste_detected);
        assert_eq!(analysis.waste_type, None);
        assert_eq!(analysis.severity, None);
    }

    #[test]
    fn unknown_waste_type_is_rejected() {
        let text = r#"{
            "waste_detected": true,
            "waste_type": "nuclear",
            "severity": "high",
            "analysis_details": "details"
        }"#;
        assert!(matches!(parse_classification(text), Err(AiError::Schema(_))));
    }

    #[test]
    fn positive_detection_without_severity_is_rejected() {
        let text = r#"{
            "waste_detected": true,
            "waste_type": "glass",
            "analysis_details": "Broken bottles near the bus stop."
        }"#;
        assert!(matches!(parse_classification(text), Err(AiError::Schema(_))));
    }

    #[test]
    fn missing_details_are_rejected() {
        let text = r#"{ "waste_detected": false, "analysis_details": "  " }"#;
        assert!(matches!(parse_classification(text), Err(AiError::Schema(_))));
    }

    #[test]
    fn non_json_output_is_rejected() {
        assert!(matches!(
            parse_classification("I could not analyze this image."),
            Err(AiError::InvalidJson(_))
        ));
    }

    #[test]
    fn image_request_carries_inline_data() {
        let body = build_request("image/jpeg", "aGVsbG8=");
        let parts = &body["contents"][0]["parts"];
        assert_eq!(parts[1]["inline_data"]["mime_type"], "image/jpeg");
        assert_eq!(parts[1]["inline_data"]["data"], "aGVsbG8=");
        assert_eq!(
            body["generationConfig"]["response_mime_type"],
            "application/json"
        );
    }
}
