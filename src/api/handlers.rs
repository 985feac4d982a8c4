// Day endpoint handler module

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Request, Response, StatusCode};

use super::error::ApiError;
use super::query;
use super::response::{error_response, json_response};
use super::types::DayResponse;
use crate::day;
use crate::logger;

/// Handle `GET /api/get-day`
///
/// Extracts the `number` query parameter, runs the day calculation and maps
/// the outcome to an HTTP response. Every failure is classified exactly once
/// here; nothing propagates past this boundary.
pub fn handle_get_day(req: &Request<hyper::body::Incoming>) -> Response<Full<Bytes>> {
    match calculate(req.uri().query()) {
        Ok(result) => {
            logger::log_day_calculated(result.input_number, result.day);
            json_response(StatusCode::OK, &result)
        }
        Err(err) => {
            let detail = format!(
                "{} (query: {})",
                err.message(),
                req.uri().query().unwrap_or("")
            );
            if err.is_server_fault() {
                logger::log_error(&detail);
            } else {
                logger::log_warning(&detail);
            }
            error_response(&err)
        }
    }
}

/// Parse and validate the raw query, then run the calculation.
///
/// Non-finite parses (`NaN`, `inf`, exponents that overflow to infinity) are
/// rejected here; the calculator only ever sees finite input.
fn calculate(raw_query: Option<&str>) -> Result<DayResponse, ApiError> {
    let raw = query::param(raw_query, "number").ok_or(ApiError::MissingParam)?;

    let number: f64 = raw.parse().map_err(|_| ApiError::InvalidFormat)?;

    if !number.is_finite() {
        return Err(ApiError::InvalidFormat);
    }

    let day = day::calculate_day_of_week(number).map_err(ApiError::Domain)?;

    Ok(DayResponse {
        input_number: number,
        day,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_number_returns_day() {
        let result = calculate(Some("number=14.9")).expect("valid request");
        assert_eq!(result.day, "Tuesday");
        assert!((result.input_number - 14.9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_negative_number_returns_day() {
        let result = calculate(Some("number=-7")).expect("valid request");
        assert_eq!(result.day, "Saturday");
    }

    #[test]
    fn test_missing_parameter() {
        assert_eq!(calculate(None), Err(ApiError::MissingParam));
        assert_eq!(calculate(Some("other=1")), Err(ApiError::MissingParam));
    }

    #[test]
    fn test_unparseable_value() {
        assert_eq!(calculate(Some("number=abc")), Err(ApiError::InvalidFormat));
        assert_eq!(calculate(Some("number=")), Err(ApiError::InvalidFormat));
        assert_eq!(
            calculate(Some("number=1.2.3")),
            Err(ApiError::InvalidFormat)
        );
    }

    #[test]
    fn test_non_finite_values_rejected() {
        assert_eq!(calculate(Some("number=NaN")), Err(ApiError::InvalidFormat));
        assert_eq!(calculate(Some("number=inf")), Err(ApiError::InvalidFormat));
        assert_eq!(
            calculate(Some("number=-infinity")),
            Err(ApiError::InvalidFormat)
        );
        // overflows f64 range, parses as infinity
        assert_eq!(
            calculate(Some("number=1e999")),
            Err(ApiError::InvalidFormat)
        );
    }

    #[test]
    fn test_scientific_notation_accepted() {
        let result = calculate(Some("number=7e0")).expect("valid request");
        assert_eq!(result.day, "Monday");
    }

    #[test]
    fn test_extra_parameters_ignored() {
        let result = calculate(Some("a=b&number=0&c=d")).expect("valid request");
        assert_eq!(result.day, "Sunday");
    }
}
