use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Categories the image classifier is allowed to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum WasteType {
    Plastic,
    Organic,
    Electronic,
    Glass,
    Paper,
    Metal,
    Textile,
    Hazardous,
    Mixed,
    Unknown,
}

impl WasteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WasteType::Plastic => "plastic",
            WasteType::Organic => "organic",
            WasteType::Electronic => "electronic",
            WasteType::Glass => "glass",
            WasteType::Paper => "paper",
            WasteType::Metal => "metal",
            WasteType::Textile => "textile",
            WasteType::Hazardous => "hazardous",
            WasteType::Mixed => "mixed",
            WasteType::Unknown => "unknown",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "plastic" => Some(WasteType::Plastic),
            "organic" => Some(WasteType::Organic),
            "electronic" => Some(WasteType::Electronic),
            "glass" => Some(WasteType::Glass),
            "paper" => Some(WasteType::Paper),
            "metal" => Some(WasteType::Metal),
            "textile" => Some(WasteType::Textile),
            "hazardous" => Some(WasteType::Hazardous),
            "mixed" => Some(WasteType::Mixed),
            "unknown" => Some(WasteType::Unknown),
            _ => None,
        }
    }
}

/// How urgent a reported waste site is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Severity::Low),
            "medium" => Some(Severity::Medium),
            "high" => Some(Severity::High),
            "critical" => Some(Severity::Critical),
            _ => None,
        }
    }
}

/// Lifecycle state of a complaint. Transitions are validated in `workflow`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ComplaintStatus {
    Pending,
    InProgress,
    Resolved,
}

impl ComplaintStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::Pending => "pending",
            ComplaintStatus::InProgress => "in-progress",
            ComplaintStatus::Resolved => "resolved",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ComplaintStatus::Pending),
            "in-progress" => Some(ComplaintStatus::InProgress),
            "resolved" => Some(ComplaintStatus::Resolved),
            _ => None,
        }
    }
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Citizen,
    Worker,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Citizen => "citizen",
            UserRole::Worker => "worker",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "citizen" => Some(UserRole::Citizen),
            "worker" => Some(UserRole::Worker),
            _ => None,
        }
    }
}

/// Outcome of classifying a waste-site photo.
///
/// When `waste_detected` is false the type and severity are never set.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WasteAnalysis {
    pub waste_detected: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub waste_type: Option<WasteType>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub severity: Option<Severity>,
    pub analysis_details: String,
}

/// One-time reporter feedback, present only after resolution.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Feedback {
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub comment: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

/// A citizen waste complaint as stored and served by this service.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Complaint {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub image_url: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub description: String,
    pub ai_summary: String,
    pub ai_key_details: Vec<String>,
    pub analysis: WasteAnalysis,
    pub status: ComplaintStatus,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub resolution_details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub resolved_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub feedback: Option<Feedback>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub contact_number: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

/// Body for POST /api/v1/complaints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitComplaintRequest {
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    pub image_url: String,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    pub address: String,
    pub description: String,
    /// Classification carried over from POST /api/v1/analysis/image, if the
    /// caller ran one. Normalized server-side before storage.
    #[serde(default)]
    pub analysis: Option<WasteAnalysis>,
}

/// Body for POST /api/v1/complaints/{id}/status.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    pub user_id: String,
    pub status: ComplaintStatus,
    #[serde(default)]
    pub resolution_note: Option<String>,
}

/// Body for POST /api/v1/complaints/{id}/feedback.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeedbackRequest {
    pub user_id: String,
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Body for POST /api/v1/analysis/image.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClassifyImageRequest {
    /// Photo as a data URI: `data:<mime>;base64,<payload>`.
    pub photo_data_uri: String,
}

/// Body for POST /api/v1/users. Creates or updates a profile.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterUserRequest {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub role: Option<UserRole>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ComplaintListResponse {
    pub complaints: Vec<Complaint>,
    pub count: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_wire_names_use_kebab_case() {
        assert_eq!(
            serde_json::to_value(ComplaintStatus::InProgress).unwrap(),
            json!("in-progress")
        );
        assert_eq!(
            serde_json::from_value::<ComplaintStatus>(json!("in-progress")).unwrap(),
            ComplaintStatus::InProgress
        );
        assert_eq!(ComplaintStatus::parse("in-progress"), Some(ComplaintStatus::InProgress));
        assert_eq!(ComplaintStatus::parse("done"), None);
    }

    #[test]
    fn enum_parse_round_trips_as_str() {
        for waste_type in [
            WasteType::Plastic,
            WasteType::Organic,
            WasteType::Electronic,
            WasteType::Glass,
            WasteType::Paper,
            WasteType::Metal,
            WasteType::Textile,
            WasteType::Hazardous,
            WasteType::Mixed,
            WasteType::Unknown,
        ] {
            assert_eq!(WasteType::parse(waste_type.as_str()), Some(waste_type));
        }
        for severity in [Severity::Low, Severity::Medium, Severity::High, Severity::Critical] {
            assert_eq!(Severity::parse(severity.as_str()), Some(severity));
        }
        for status in [
            ComplaintStatus::Pending,
            ComplaintStatus::InProgress,
            ComplaintStatus::Resolved,
        ] {
            assert_eq!(ComplaintStatus::parse(status.as_str()), Some(status));
        }
        for role in [UserRole::Citizen, UserRole::Worker] {
            assert_eq!(UserRole::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn negative_analysis_serializes_without_type_or_severity() {
        let analysis = WasteAnalysis {
            waste_detected: false,
            waste_type: None,
            severity: None,
            analysis_details: "No waste visible in the photo.".to_string(),
        };
        let value = serde_json::to_value(&analysis).unwrap();
        assert_eq!(value["waste_detected"], json!(false));
        assert!(value.get("waste_type").is_none());
        assert!(value.get("severity").is_none());
    }

    #[test]
    fn submit_request_fills_optional_fields() {
        let req: SubmitComplaintRequest = serde_json::from_value(json!({
            "user_id": "user-1",
            "image_url": "https://img.example/overflow.jpg",
            "address": "12 Harbor Road",
            "description": "Overflowing bin by the harbor"
        }))
        .unwrap();
        assert_eq!(req.user_name, "");
        assert_eq!(req.latitude, 0.0);
        assert_eq!(req.longitude, 0.0);
        assert!(req.analysis.is_none());
    }
}
