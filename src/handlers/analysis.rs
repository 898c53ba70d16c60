use axum::{extract::State, http::StatusCode, response::Json};

use crate::ai::classify;
use crate::app_state::AppState;
use crate::models::{ClassifyImageRequest, WasteAnalysis};
use crate::utils::validation;

/// POST /api/v1/analysis/image
///
/// Stateless: nothing is stored. The caller decides whether to attach the
/// result to a submission.
#[utoipa::path(
    post,
    path = "/api/v1/analysis/image",
    request_body = ClassifyImageRequest,
    responses(
        (status = 200, description = "Classification result", body = WasteAnalysis),
        (status = 400, description = "Not a usable base64 data URI"),
        (status = 502, description = "Model unavailable or returned off-schema output")
    )
)]
pub async fn classify_image(
    State(state): State<AppState>,
    Json(request): Json<ClassifyImageRequest>,
) -> Result<Json<WasteAnalysis>, (StatusCode, String)> {
    let (mime, data) = validation::parse_data_uri(&request.photo_data_uri)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    match classify::classify_waste_image(&state.ai, &mime, &data).await {
        Ok(analysis) => Ok(Json(analysis)),
        Err(e) => {
            tracing::warn!("Image classification failed: {}", e);
            Err((StatusCode::BAD_GATEWAY, e.to_string()))
        }
    }
}
