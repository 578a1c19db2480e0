//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound | Self::OrderNotFound | Self::ItemNotFound | Self::QuoteNotFound => {
                StatusCode::NOT_FOUND
            }

            // 409 Conflict (caller must inspect current status and retry)
            Self::AlreadyExists | Self::InvalidStatusTransition | Self::QuoteExpired => {
                StatusCode::CONFLICT
            }

            // 500 Internal Server Error
            Self::InternalError | Self::StorageError | Self::ConfigError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request (default for validation/business errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
