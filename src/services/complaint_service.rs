use chrono::{DateTime, Utc};
use sqlx::{mysql::MySqlRow, MySql, Pool, Row};
use tracing::warn;
use uuid::Uuid;

use super::{user_service, ServiceError};
use crate::ai::summarize::{self, ComplaintSummary};
use crate::ai::AiClient;
use crate::models::{
    Complaint, ComplaintStatus, Feedback, FeedbackRequest, Severity, SubmitComplaintRequest,
    UpdateStatusRequest, UserRole, WasteAnalysis, WasteType,
};
use crate::utils::validation;
use crate::workflow;

pub const DEFAULT_LIST_LIMIT: u32 = 50;
pub const MAX_LIST_LIMIT: u32 = 100;
pub const DEFAULT_USER_LIST_LIMIT: u32 = 5;

const COMPLAINT_COLUMNS: &str = "id, user_id, user_name, image_url, latitude, longitude, address, \
     description, ai_summary, ai_key_details, waste_detected, waste_type, severity, \
     analysis_details, status, resolution_details, resolved_at, feedback_rating, \
     feedback_comment, feedback_submitted_at, created_at";

/// Stores a new complaint. The summary is produced inline; if the model is
/// unavailable a fallback summary is stored instead of failing the request.
pub async fn submit_complaint(
    pool: &Pool<MySql>,
    ai: &AiClient,
    req: SubmitComplaintRequest,
) -> Result<Complaint, ServiceError> {
    validation::validate_submission(&req)?;

    let reporter = user_service::get_user(pool, &req.user_id)
        .await?
        .ok_or(ServiceError::UnknownUser)?;
    let user_name = if req.user_name.trim().is_empty() {
        reporter.name
    } else {
        req.user_name.clone()
    };

    let summary = match summarize::summarize_complaint(ai, &req.description).await {
        Ok(s) => s,
        Err(e) => {
            warn!("Summarization unavailable, storing fallback summary: {}", e);
            ComplaintSummary::fallback(&req.description)
        }
    };
    let key_details_json =
        serde_json::to_string(&summary.key_details).unwrap_or_else(|_| "[]".to_string());

    let analysis = normalize_analysis(req.analysis.clone(), &req.description);
    let id = Uuid::new_v4().to_string();
    let created_at = Utc::now();

    sqlx::query(
        "INSERT INTO complaints (id, user_id, user_name, image_url, latitude, longitude, address, \
         description, ai_summary, ai_key_details, waste_detected, waste_type, severity, \
         analysis_details, status, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 'pending', ?)",
    )
    .bind(id.as_str())
    .bind(req.user_id.as_str())
    .bind(user_name.as_str())
    .bind(req.image_url.as_str())
    .bind(req.latitude)
    .bind(req.longitude)
    .bind(req.address.as_str())
    .bind(req.description.as_str())
    .bind(summary.summary.as_str())
    .bind(key_details_json.as_str())
    .bind(analysis.waste_detected)
    .bind(analysis.waste_type.map(|t| t.as_str()))
    .bind(analysis.severity.map(|s| s.as_str()))
    .bind(analysis.analysis_details.as_str())
    .bind(created_at)
    .execute(pool)
    .await?;

    get_complaint(pool, &id)
        .await?
        .ok_or(ServiceError::Database(sqlx::Error::RowNotFound))
}

/// Applies the storage rules to whatever classification the caller carried
/// over. A negative detection never keeps a type or severity, and the details
/// fall back to the citizen's own description.
fn normalize_analysis(analysis: Option<WasteAnalysis>, description: &str) -> WasteAnalysis {
    match analysis {
        Some(mut a) => {
            if !a.waste_detected {
                a.waste_type = None;
                a.severity = None;
            }
            if a.analysis_details.trim().is_empty() {
                a.analysis_details = description.to_string();
            }
            a
        }
        None => WasteAnalysis {
            waste_detected: false,
            waste_type: None,
            severity: None,
            analysis_details: description.to_string(),
        },
    }
}

pub async fn get_complaint(
    pool: &Pool<MySql>,
    complaint_id: &str,
) -> Result<Option<Complaint>, ServiceError> {
    let sql = format!("SELECT {} FROM complaints WHERE id = ?", COMPLAINT_COLUMNS);
    let row = sqlx::query(&sql).bind(complaint_id).fetch_optional(pool).await?;
    Ok(row.map(complaint_from_row))
}

fn clamp_limit(limit: Option<u32>, default: u32) -> u32 {
    limit.unwrap_or(default).min(MAX_LIST_LIMIT)
}

pub async fn list_complaints(
    pool: &Pool<MySql>,
    status: Option<ComplaintStatus>,
    limit: Option<u32>,
) -> Result<Vec<Complaint>, ServiceError> {
    let limit = clamp_limit(limit, DEFAULT_LIST_LIMIT);
    let rows = match status {
        Some(status) => {
            let sql = format!(
                "SELECT {} FROM complaints WHERE status = ? \
                 ORDER BY created_at DESC, seq DESC LIMIT ?",
                COMPLAINT_COLUMNS
            );
            sqlx::query(&sql)
                .bind(status.as_str())
                .bind(limit)
                .fetch_all(pool)
                .await?
        }
        None => {
            let sql = format!(
                "SELECT {} FROM complaints ORDER BY created_at DESC, seq DESC LIMIT ?",
                COMPLAINT_COLUMNS
            );
            sqlx::query(&sql).bind(limit).fetch_all(pool).await?
        }
    };
    Ok(rows.into_iter().map(complaint_from_row).collect())
}

pub async fn list_user_complaints(
    pool: &Pool<MySql>,
    user_id: &str,
    limit: Option<u32>,
) -> Result<Vec<Complaint>, ServiceError> {
    let limit = clamp_limit(limit, DEFAULT_USER_LIST_LIMIT);
    let sql = format!(
        "SELECT {} FROM complaints WHERE user_id = ? \
         ORDER BY created_at DESC, seq DESC LIMIT ?",
        COMPLAINT_COLUMNS
    );
    let rows = sqlx::query(&sql)
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(complaint_from_row).collect())
}

/// Moves a complaint along the workflow. Only workers may do this, and the
/// update is a compare-and-set on the status this call observed, so two
/// racing transitions cannot both land.
pub async fn transition_status(
    pool: &Pool<MySql>,
    complaint_id: &str,
    req: &UpdateStatusRequest,
) -> Result<Complaint, ServiceError> {
    let actor = user_service::get_user(pool, &req.user_id)
        .await?
        .ok_or(ServiceError::UnknownUser)?;
    if actor.role != UserRole::Worker {
        return Err(ServiceError::NotAuthorized(
            "only workers may change complaint status".to_string(),
        ));
    }

    let current = get_complaint(pool, complaint_id)
        .await?
        .ok_or(ServiceError::ComplaintNotFound)?;
    let effect = workflow::plan_transition(current.status, req.status)?;

    let resolved_at = if effect.stamps_resolved_at {
        Some(Utc::now())
    } else {
        None
    };
    let result = sqlx::query(
        "UPDATE complaints SET status = ?, \
         resolution_details = COALESCE(?, resolution_details), resolved_at = ? \
         WHERE id = ? AND status = ?",
    )
    .bind(effect.to.as_str())
    .bind(req.resolution_note.as_deref())
    .bind(resolved_at)
    .bind(complaint_id)
    .bind(current.status.as_str())
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(ServiceError::Conflict(
            "complaint status changed concurrently; transition not applied".to_string(),
        ));
    }

    get_complaint(pool, complaint_id)
        .await?
        .ok_or(ServiceError::Database(sqlx::Error::RowNotFound))
}

/// Records the reporter's one-time feedback. The preconditions are re-checked
/// in the WHERE clause so two racing submissions cannot both land.
pub async fn submit_feedback(
    pool: &Pool<MySql>,
    complaint_id: &str,
    req: &FeedbackRequest,
) -> Result<Complaint, ServiceError> {
    validation::validate_rating(req.rating)?;

    let current = get_complaint(pool, complaint_id)
        .await?
        .ok_or(ServiceError::ComplaintNotFound)?;
    if current.user_id != req.user_id {
        return Err(ServiceError::NotAuthorized(
            "only the original reporter may leave feedback".to_string(),
        ));
    }
    if current.status != ComplaintStatus::Resolved {
        return Err(ServiceError::Conflict(
            "feedback can only be left on a resolved complaint".to_string(),
        ));
    }
    if current.feedback.is_some() {
        return Err(ServiceError::Conflict(
            "feedback has already been submitted".to_string(),
        ));
    }

    let result = sqlx::query(
        "UPDATE complaints SET feedback_rating = ?, feedback_comment = ?, \
         feedback_submitted_at = ? \
         WHERE id = ? AND user_id = ? AND status = 'resolved' AND feedback_rating IS NULL",
    )
    .bind(req.rating)
    .bind(req.comment.as_deref())
    .bind(Utc::now())
    .bind(complaint_id)
    .bind(req.user_id.as_str())
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(ServiceError::Conflict(
            "complaint changed concurrently; feedback not recorded".to_string(),
        ));
    }

    get_complaint(pool, complaint_id)
        .await?
        .ok_or(ServiceError::Database(sqlx::Error::RowNotFound))
}

fn complaint_from_row(row: MySqlRow) -> Complaint {
    let status: String = row.get("status");
    let waste_type: Option<String> = row.get("waste_type");
    let severity: Option<String> = row.get("severity");
    let key_details_json: String = row.get("ai_key_details");

    let feedback = match (
        row.get::<Option<u8>, _>("feedback_rating"),
        row.get::<Option<DateTime<Utc>>, _>("feedback_submitted_at"),
    ) {
        (Some(rating), Some(submitted_at)) => Some(Feedback {
            rating,
            comment: row.get("feedback_comment"),
            submitted_at,
        }),
        _ => None,
    };

    Complaint {
        id: row.get("id"),
        user_id: row.get("user_id"),
        user_name: row.get("user_name"),
        image_url: row.get("image_url"),
        latitude: row.get("latitude"),
        longitude: row.get("longitude"),
        address: row.get("address"),
        description: row.get("description"),
        ai_summary: row.get("ai_summary"),
        ai_key_details: serde_json::from_str(&key_details_json).unwrap_or_default(),
        analysis: WasteAnalysis {
            waste_detected: row.get("waste_detected"),
            waste_type: waste_type.as_deref().and_then(WasteType::parse),
            severity: severity.as_deref().and_then(Severity::parse),
            analysis_details: row.get("analysis_details"),
        },
        status: ComplaintStatus::parse(&status).unwrap_or(ComplaintStatus::Pending),
        resolution_details: row.get("resolution_details"),
        resolved_at: row.get("resolved_at"),
        feedback,
        created_at: row.get("created_at"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_analysis_defaults_to_no_detection() {
        let analysis = normalize_analysis(None, "Garbage bags piling up at the corner");
        assert!(!analysis.waste_detected);
        assert_eq!(analysis.waste_type, None);
        assert_eq!(analysis.severity, None);
        assert_eq!(analysis.analysis_details, "Garbage bags piling up at the corner");
    }

    #[test]
    fn negative_detection_is_stripped_of_type_and_severity() {
        let carried = WasteAnalysis {
            waste_detected: false,
            waste_type: Some(WasteType::Plastic),
            severity: Some(Severity::Low),
            analysis_details: "Nothing visible.".to_string(),
        };
        let analysis = normalize_analysis(Some(carried), "desc");
        assert_eq!(analysis.waste_type, None);
        assert_eq!(analysis.severity, None);
        assert_eq!(analysis.analysis_details, "Nothing visible.");
    }

    #[test]
    fn positive_detection_is_kept_as_is() {
        let carried = WasteAnalysis {
            waste_detected: true,
            waste_type: Some(WasteType::Electronic),
            severity: Some(Severity::Critical),
            analysis_details: "Dumped CRT monitors leaking into the drain.".to_string(),
        };
        let analysis = normalize_analysis(Some(carried), "desc");
        assert!(analysis.waste_detected);
        assert_eq!(analysis.waste_type, Some(WasteType::Electronic));
        assert_eq!(analysis.severity, Some(Severity::Critical));
    }

    #[test]
    fn blank_analysis_details_fall_back_to_description() {
        let carried = WasteAnalysis {
            waste_detected: true,
            waste_type: Some(WasteType::Mixed),
            severity: Some(Severity::Medium),
            analysis_details: "  ".to_string(),
        };
        let analysis = normalize_analysis(Some(carried), "Mixed waste by the canal");
        assert_eq!(analysis.analysis_details, "Mixed waste by the canal");
    }

    #[test]
    fn list_limits_are_capped() {
        assert_eq!(clamp_limit(Some(500), DEFAULT_LIST_LIMIT), MAX_LIST_LIMIT);
        assert_eq!(clamp_limit(Some(10), DEFAULT_LIST_LIMIT), 10);
        assert_eq!(clamp_limit(None, DEFAULT_LIST_LIMIT), DEFAULT_LIST_LIMIT);
        assert_eq!(clamp_limit(None, DEFAULT_USER_LIST_LIMIT), DEFAULT_USER_LIST_LIMIT);
    }
}
