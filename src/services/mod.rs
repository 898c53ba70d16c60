pub mod complaint_service;
pub mod user_service;

use thiserror::Error;

use crate::utils::validation::ValidationError;
use crate::workflow::InvalidTransition;

/// Failures a service operation can surface to a handler.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("complaint not found")]
    ComplaintNotFound,
    #[error("user profile not found")]
    UnknownUser,
    #[error("{0}")]
    NotAuthorized(String),
    #[error(transparent)]
    Workflow(#[from] InvalidTransition),
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
