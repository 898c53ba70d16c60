use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

use crate::models::SubmitComplaintRequest;

pub const MIN_DESCRIPTION_CHARS: usize = 5;
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("an image of the waste site is required")]
    MissingImage,
    #[error("a location address is required")]
    MissingAddress,
    #[error("description is too short (minimum 5 characters)")]
    DescriptionTooShort,
    #[error("rating must be between 1 and 5")]
    RatingOutOfRange,
    #[error("photo must be a data URI with a base64 payload")]
    MalformedDataUri,
}

/// Server-side checks for a new complaint. Mirrors what the reporting form
/// enforces so a raw API caller cannot skip them.
pub fn validate_submission(req: &SubmitComplaintRequest) -> Result<(), ValidationError> {
    if req.image_url.trim().is_empty() {
        return Err(ValidationError::MissingImage);
    }
    if req.address.trim().is_empty() {
        return Err(ValidationError::MissingAddress);
    }
    if req.description.trim().chars().count() < MIN_DESCRIPTION_CHARS {
        return Err(ValidationError::DescriptionTooShort);
    }
    Ok(())
}

pub fn validate_rating(rating: u8) -> Result<(), ValidationError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(ValidationError::RatingOutOfRange)
    }
}

/// Splits `data:<mime>;base64,<payload>` into mime type and payload, checking
/// that the payload actually decodes.
pub fn parse_data_uri(uri: &str) -> Result<(String, String), ValidationError> {
    let rest = uri.strip_prefix("data:").ok_or(ValidationError::MalformedDataUri)?;
    let (mime, data) = rest
        .split_once(";base64,")
        .ok_or(ValidationError::MalformedDataUri)?;
    if mime.is_empty() || data.is_empty() {
        return Err(ValidationError::MalformedDataUri);
    }
    STANDARD
        .decode(data)
        .map_err(|_| ValidationError::MalformedDataUri)?;
    Ok((mime.to_string(), data.to_string()))
}
