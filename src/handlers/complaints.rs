use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;

use super::error_response;
use crate::app_state::AppState;
use crate::models::{
    Complaint, ComplaintListResponse, ComplaintStatus, FeedbackRequest, SubmitComplaintRequest,
    UpdateStatusRequest,
};
use crate::services::complaint_service;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListComplaintsParams {
    /// Only return complaints in this status.
    pub status: Option<ComplaintStatus>,
    /// Page size, capped at 100 (default 50).
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserComplaintsParams {
    /// Page size, capped at 100 (default 5).
    pub limit: Option<u32>,
}

/// POST /api/v1/complaints
#[utoipa::path(
    post,
    path = "/api/v1/complaints",
    request_body = SubmitComplaintRequest,
    responses(
        (status = 201, description = "Complaint stored", body = Complaint),
        (status = 400, description = "Submission failed validation"),
        (status = 403, description = "Reporter has no profile")
    )
)]
pub async fn submit_complaint(
    State(state): State<AppState>,
    Json(request): Json<SubmitComplaintRequest>,
) -> Result<(StatusCode, Json<Complaint>), (StatusCode, String)> {
    match complaint_service::submit_complaint(&state.pool, &state.ai, request).await {
        Ok(complaint) => Ok((StatusCode::CREATED, Json(complaint))),
        Err(e) => Err(error_response("submit complaint", e)),
    }
}

/// GET /api/v1/complaints
#[utoipa::path(
    get,
    path = "/api/v1/complaints",
    params(ListComplaintsParams),
    responses(
        (status = 200, description = "Newest complaints first", body = ComplaintListResponse)
    )
)]
pub async fn list_complaints(
    State(state): State<AppState>,
    Query(params): Query<ListComplaintsParams>,
) -> Result<Json<ComplaintListResponse>, (StatusCode, String)> {
    match complaint_service::list_complaints(&state.pool, params.status, params.limit).await {
        Ok(complaints) => {
            let count = complaints.len();
            Ok(Json(ComplaintListResponse { complaints, count }))
        }
        Err(e) => Err(error_response("list complaints", e)),
    }
}

/// GET /api/v1/complaints/{id}
#[utoipa::path(
    get,
    path = "/api/v1/complaints/{id}",
    params(("id" = String, Path, description = "Complaint id")),
    responses(
        (status = 200, description = "The complaint", body = Complaint),
        (status = 404, description = "No such complaint")
    )
)]
pub async fn get_complaint(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Complaint>, (StatusCode, String)> {
    match complaint_service::get_complaint(&state.pool, &id).await {
        Ok(Some(complaint)) => Ok(Json(complaint)),
        Ok(None) => Err((StatusCode::NOT_FOUND, "complaint not found".to_string())),
        Err(e) => Err(error_response("get complaint", e)),
    }
}

/// POST /api/v1/complaints/{id}/status
#[utoipa::path(
    post,
    path = "/api/v1/complaints/{id}/status",
    params(("id" = String, Path, description = "Complaint id")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Updated complaint", body = Complaint),
        (status = 403, description = "Caller is not a worker"),
        (status = 404, description = "No such complaint"),
        (status = 409, description = "Lost a concurrent update"),
        (status = 422, description = "Transition not allowed by the workflow")
    )
)]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Complaint>, (StatusCode, String)> {
    match complaint_service::transition_status(&state.pool, &id, &request).await {
        Ok(complaint) => Ok(Json(complaint)),
        Err(e) => Err(error_response("update complaint status", e)),
    }
}

/// POST /api/v1/complaints/{id}/feedback
#[utoipa::path(
    post,
    path = "/api/v1/complaints/{id}/feedback",
    params(("id" = String, Path, description = "Complaint id")),
    request_body = FeedbackRequest,
    responses(
        (status = 200, description = "Complaint with feedback attached", body = Complaint),
        (status = 400, description = "Rating out of range"),
        (status = 403, description = "Caller is not the reporter"),
        (status = 404, description = "No such complaint"),
        (status = 409, description = "Not resolved yet, or feedback already given")
    )
)]
pub async fn submit_feedback(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<FeedbackRequest>,
) -> Result<Json<Complaint>, (StatusCode, String)> {
    match complaint_service::submit_feedback(&state.pool, &id, &request).await {
        Ok(complaint) => Ok(Json(complaint)),
        Err(e) => Err(error_response("submit feedback", e)),
    }
}

/// GET /api/v1/users/{user_id}/complaints
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/complaints",
    params(
        ("user_id" = String, Path, description = "Reporter id"),
        UserComplaintsParams
    ),
    responses(
        (status = 200, description = "The user's newest complaints", body = ComplaintListResponse)
    )
)]
pub async fn list_user_complaints(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(params): Query<UserComplaintsParams>,
) -> Result<Json<ComplaintListResponse>, (StatusCode, String)> {
    match complaint_service::list_user_complaints(&state.pool, &user_id, params.limit).await {
        Ok(complaints) => {
            let count = complaints.len();
            Ok(Json(ComplaintListResponse { complaints, count }))
        }
        Err(e) => Err(error_response("list user complaints", e)),
    }
}
