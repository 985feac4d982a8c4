// API module entry
// Route dispatch and per-request access logging for the day service

mod error;
mod handlers;
pub mod query;
mod response;
mod types;

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response, Version};

use crate::config::Config;
use crate::logger::{self, AccessLogEntry};

/// Main entry point for HTTP request handling
///
/// Dispatches to handler functions based on request path and method, then
/// emits one access-log line for the completed exchange.
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    config: Arc<Config>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let start = Instant::now();

    let response = route_request(&req, &config);

    if config.logging.access_log {
        let entry = access_entry(&req, &response, remote_addr, start);
        logger::log_access(&entry, &config.logging.access_log_format);
    }

    Ok(response)
}

/// Dispatch based on method and path
fn route_request(req: &Request<hyper::body::Incoming>, config: &Config) -> Response<Full<Bytes>> {
    let path = req.uri().path();

    match req.method() {
        &Method::GET => {
            if path == "/api/get-day" {
                return handlers::handle_get_day(req);
            }
            if config.health.enabled
                && (path == config.health.liveness_path || path == config.health.readiness_path)
            {
                return response::health_response();
            }
            response::not_found()
        }
        &Method::OPTIONS => response::options_response(config.http.enable_cors),
        _ => {
            logger::log_warning(&format!("Method not allowed: {} {path}", req.method()));
            response::method_not_allowed()
        }
    }
}

/// Assemble the access-log entry for a finished request
fn access_entry(
    req: &Request<hyper::body::Incoming>,
    response: &Response<Full<Bytes>>,
    remote_addr: SocketAddr,
    start: Instant,
) -> AccessLogEntry {
    let mut entry = AccessLogEntry::new(
        remote_addr.to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = http_version_label(req.version()).to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = content_length(response);
    entry.referer = header_string(req, "referer");
    entry.user_agent = header_string(req, "user-agent");
    entry.request_time_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);
    entry
}

/// Read back the body size from the Content-Length header set by the
/// response builders (bodyless responses report 0)
fn content_length(response: &Response<Full<Bytes>>) -> usize {
    response
        .headers()
        .get(hyper::header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse().ok())
        .unwrap_or(0)
}

fn header_string(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn http_version_label(version: Version) -> &'static str {
    if version == Version::HTTP_10 {
        "1.0"
    } else if version == Version::HTTP_2 {
        "2"
    } else {
        "1.1"
    }
}
