// API response utility functions module

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

use super::error::ApiError;
use super::types::{ErrorResponse, HealthResponse};
use crate::logger;

/// Build JSON response with Content-Type and Content-Length set
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let json = match serde_json::to_string(body) {
        Ok(j) => j,
        Err(e) => {
            logger::log_error(&format!("Failed to serialize response: {e}"));
            return internal_error();
        }
    };

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Content-Length", json.len())
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            logger::log_error(&format!("Failed to build response: {e}"));
            internal_error()
        })
}

/// Build the response for a classified request failure
pub fn error_response(err: &ApiError) -> Response<Full<Bytes>> {
    json_response(
        err.status(),
        &ErrorResponse {
            error: err.message(),
        },
    )
}

/// 500 Internal Server Error with the generic body
///
/// Hand-built so it cannot recurse into the serialization failure path.
pub fn internal_error() -> Response<Full<Bytes>> {
    let body = r#"{"error":"An internal server error occurred"}"#;
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header("Content-Type", "application/json")
        .header("Content-Length", body.len())
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::from(body))))
}

/// 200 health probe response
pub fn health_response() -> Response<Full<Bytes>> {
    json_response(StatusCode::OK, &HealthResponse { status: "ok" })
}

/// 404 Not Found response listing the available endpoints
pub fn not_found() -> Response<Full<Bytes>> {
    let body = r#"{"error":"Not Found","available_endpoints":["/api/get-day","/healthz","/readyz"]}"#;
    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header("Content-Type", "application/json")
        .header("Content-Length", body.len())
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::from("Not Found"))))
}

/// 405 Method Not Allowed response
pub fn method_not_allowed() -> Response<Full<Bytes>> {
    let body = r#"{"error":"Method not allowed"}"#;
    Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header("Content-Type", "application/json")
        .header("Content-Length", body.len())
        .header("Allow", "GET, OPTIONS")
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::from("Method Not Allowed"))))
}

/// Build OPTIONS response (preflight request)
pub fn options_response(enable_cors: bool) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Allow", "GET, OPTIONS");

    if enable_cors {
        builder = builder
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "GET, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .header("Access-Control-Max-Age", "86400");
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        logger::log_error(&format!("Failed to build OPTIONS response: {e}"));
        Response::new(Full::new(Bytes::new()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::DayResponse;

    #[test]
    fn test_json_response_sets_headers() {
        let resp = json_response(
            StatusCode::OK,
            &DayResponse {
                input_number: 0.0,
                day: "Sunday",
            },
        );
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("Content-Type").unwrap(),
            "application/json"
        );
        assert!(resp.headers().contains_key("Content-Length"));
    }

    #[test]
    fn test_error_response_uses_taxonomy_status() {
        let resp = error_response(&ApiError::MissingParam);
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = error_response(&ApiError::Internal);
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_options_cors_headers_are_opt_in() {
        let without = options_response(false);
        assert!(!without.headers().contains_key("Access-Control-Allow-Origin"));

        let with = options_response(true);
        assert_eq!(
            with.headers().get("Access-Control-Allow-Origin").unwrap(),
            "*"
        );
    }

    #[test]
    fn test_method_not_allowed_advertises_allow() {
        let resp = method_not_allowed();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers().get("Allow").unwrap(), "GET, OPTIONS");
    }
}
