pub mod analysis;
pub mod complaints;
pub mod health;
pub mod users;
pub mod version;

use axum::http::StatusCode;

use crate::services::ServiceError;

/// Maps a service failure to an HTTP response, logging it on the way out.
pub(crate) fn error_response(op: &str, err: ServiceError) -> (StatusCode, String) {
    let status = match &err {
        ServiceError::ComplaintNotFound => StatusCode::NOT_FOUND,
        ServiceError::UnknownUser | ServiceError::NotAuthorized(_) => StatusCode::FORBIDDEN,
        ServiceError::Workflow(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ServiceError::Conflict(_) => StatusCode::CONFLICT,
        ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        tracing::error!("{} failed: {}", op, err);
    } else {
        tracing::warn!("{} rejected: {}", op, err);
    }
    (status, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ComplaintStatus;
    use crate::utils::validation::ValidationError;
    use crate::workflow::InvalidTransition;

    #[test]
    fn service_errors_map_to_expected_statuses() {
        let cases = [
            (ServiceError::ComplaintNotFound, StatusCode::NOT_FOUND),
            (ServiceError::UnknownUser, StatusCode::FORBIDDEN),
            (
                ServiceError::NotAuthorized("nope".to_string()),
                StatusCode::FORBIDDEN,
            ),
            (
                ServiceError::Workflow(InvalidTransition {
                    from: ComplaintStatus::Resolved,
                    to: ComplaintStatus::Pending,
                }),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ServiceError::Conflict("raced".to_string()),
                StatusCode::CONFLICT,
            ),
            (
                ServiceError::Validation(ValidationError::RatingOutOfRange),
                StatusCode::BAD_REQUEST,
            ),
            (
                ServiceError::Database(sqlx::Error::RowNotFound),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            let (status, body) = error_response("test", err);
            assert_eq!(status, expected);
            assert!(!body.is_empty());
        }
    }
}
