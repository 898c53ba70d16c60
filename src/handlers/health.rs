use axum::{http::StatusCode, response::Json};

use crate::models::HealthResponse;

pub async fn health_check() -> (StatusCode, Json<HealthResponse>) {
    let response = HealthResponse {
        status: "healthy".to_string(),
        service: "complaints-service".to_string(),
    };

    (StatusCode::OK, Json(response))
}
