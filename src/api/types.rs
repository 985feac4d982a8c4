// API response body types
// Wire shapes for the day endpoint, error bodies and probes

use serde::Serialize;

/// Successful calculation response
///
/// Serialized as `{"input_number": <float>, "day": <string>}`.
#[derive(Debug, Serialize, PartialEq)]
pub struct DayResponse {
    /// The parsed input value, echoed back to the client
    pub input_number: f64,
    /// Calculated day name, one of the fixed seven
    pub day: &'static str,
}

/// Error response body, `{"error": <string>}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health probe response body
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_response_wire_shape() {
        let body = DayResponse {
            input_number: 14.9,
            day: "Tuesday",
        };
        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(json["input_number"], 14.9);
        assert_eq!(json["day"], "Tuesday");
    }

    #[test]
    fn test_error_response_wire_shape() {
        let body = ErrorResponse {
            error: "Missing 'number' query parameter".to_string(),
        };
        let json = serde_json::to_string(&body).expect("serialize");
        assert_eq!(json, r#"{"error":"Missing 'number' query parameter"}"#);
    }
}
