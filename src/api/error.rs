// API error taxonomy
// Every request outcome other than success maps through this enum exactly
// once, at the response boundary.

use hyper::StatusCode;

use crate::day::DayError;

/// Request-level failure classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The `number` query parameter was not supplied
    MissingParam,
    /// The `number` query parameter did not parse as a finite float
    InvalidFormat,
    /// The calculator rejected its own result (defensive, not expected to
    /// trigger for finite input)
    Domain(DayError),
    /// Unexpected server-side fault, details stay out of the response body
    Internal,
}

impl ApiError {
    /// HTTP status code this error maps to
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MissingParam | Self::InvalidFormat | Self::Domain(_) => StatusCode::BAD_REQUEST,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing error message
    pub fn message(&self) -> String {
        match self {
            Self::MissingParam => "Missing 'number' query parameter".to_string(),
            Self::InvalidFormat => "Invalid number format for 'number' parameter".to_string(),
            Self::Domain(err) => err.to_string(),
            Self::Internal => "An internal server error occurred".to_string(),
        }
    }

    /// Whether this error is the server's fault (logged as error rather
    /// than warning)
    pub const fn is_server_fault(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::MissingParam.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidFormat.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Domain(DayError::IndexOutOfRange(9)).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Internal.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages_identify_the_condition() {
        assert!(ApiError::MissingParam.message().contains("Missing"));
        assert!(ApiError::InvalidFormat.message().contains("Invalid number format"));
        assert!(ApiError::Domain(DayError::IndexOutOfRange(9))
            .message()
            .contains("out of bounds"));
    }

    #[test]
    fn test_only_internal_is_server_fault() {
        assert!(ApiError::Internal.is_server_fault());
        assert!(!ApiError::MissingParam.is_server_fault());
        assert!(!ApiError::InvalidFormat.is_server_fault());
    }
}
