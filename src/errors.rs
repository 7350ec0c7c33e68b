use axum::http::StatusCode;
use thiserror::Error;

/// Everything that can stop a submission short of a summary.
///
/// The `Display` text is what the page shows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TallyError {
    #[error("Please fill in all fields.")]
    MissingField,

    #[error("Please enter valid dates in YYYY-MM-DD format (year 1900-2100).")]
    InvalidDateFormat,

    #[error("End date cannot be in the future.")]
    FutureEndDate,

    #[error("User not found.")]
    SubjectNotFound,

    #[error("API rate limit reached. Please try again later or use an authenticated request.")]
    RateLimited,

    #[error("Network error. Please try again.")]
    NetworkFailure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Worth retrying later.
    Advisory,
    Error,
}

impl TallyError {
    pub fn severity(&self) -> Severity {
        match self {
            TallyError::RateLimited => Severity::Advisory,
            _ => Severity::Error,
        }
    }

    /// Raised before any request went out.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            TallyError::MissingField | TallyError::InvalidDateFormat | TallyError::FutureEndDate
        )
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl From<TallyError> for AppError {
    fn from(err: TallyError) -> Self {
        let status = match err {
            _ if err.is_validation() => StatusCode::BAD_REQUEST,
            TallyError::SubjectNotFound => StatusCode::NOT_FOUND,
            TallyError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::BAD_GATEWAY,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
