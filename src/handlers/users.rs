use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use super::error_response;
use crate::app_state::AppState;
use crate::models::{RegisterUserRequest, UserProfile};
use crate::services::user_service;

/// POST /api/v1/users
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = RegisterUserRequest,
    responses(
        (status = 200, description = "The stored profile", body = UserProfile)
    )
)]
pub async fn register_user(
    State(state): State<AppState>,
    Json(request): Json<RegisterUserRequest>,
) -> Result<Json<UserProfile>, (StatusCode, String)> {
    match user_service::upsert_user(&state.pool, &request).await {
        Ok(profile) => Ok(Json(profile)),
        Err(e) => Err(error_response("register user", e)),
    }
}

/// GET /api/v1/users/{user_id}
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}",
    params(("user_id" = String, Path, description = "Profile id")),
    responses(
        (status = 200, description = "The profile", body = UserProfile),
        (status = 404, description = "No such profile")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserProfile>, (StatusCode, String)> {
    match user_service::get_user(&state.pool, &user_id).await {
        Ok(Some(profile)) => Ok(Json(profile)),
        Ok(None) => Err((StatusCode::NOT_FOUND, "user profile not found".to_string())),
        Err(e) => Err(error_response("get user", e)),
    }
}
