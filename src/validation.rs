use crate::models::ValidMovie;

pub const MAX_TITLE_LEN: usize = 60;
pub const MAX_YEAR_LEN: usize = 4;

#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("title is required")]
    MissingTitle,
    #[error("year is required")]
    MissingYear,
    #[error("title is longer than {} characters", MAX_TITLE_LEN)]
    TitleTooLong,
    #[error("year is longer than {} characters", MAX_YEAR_LEN)]
    YearTooLong,
}

/// Presence and length checks only. Lengths count characters, not bytes,
/// and the year is not required to be numeric.
pub fn validate_movie(title: &str, year: &str) -> Result<ValidMovie, ValidationError> {
    if title.is_empty() {
        return Err(ValidationError::MissingTitle);
    }
    if year.is_empty() {
        return Err(ValidationError::MissingYear);
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::TitleTooLong);
    }
    if year.chars().count() > MAX_YEAR_LEN {
        return Err(ValidationError::YearTooLong);
    }

    Ok(ValidMovie { title: title.to_string(), year: year.to_string() })
}
