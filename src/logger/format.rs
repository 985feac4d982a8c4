//! Access log format module
//!
//! One log line per completed request, in a configurable shape:
//! - `combined` (Apache/Nginx combined format)
//! - `common` (Common Log Format - CLF)
//! - `json` (JSON structured logging)
//! - Custom patterns with `$variable` substitution

use chrono::Local;

/// Access log entry containing all request/response information
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    /// Client IP address
    pub remote_addr: String,
    /// Request timestamp
    pub time: chrono::DateTime<Local>,
    /// HTTP method (GET, OPTIONS, etc.)
    pub method: String,
    /// Request URI path
    pub path: String,
    /// Query string (without leading ?)
    pub query: Option<String>,
    /// HTTP version (1.0, 1.1, 2)
    pub http_version: String,
    /// Response status code
    pub status: u16,
    /// Response body size in bytes
    pub body_bytes: usize,
    /// Referer header
    pub referer: Option<String>,
    /// User-Agent header
    pub user_agent: Option<String>,
    /// Request processing time in microseconds
    pub request_time_us: u64,
}

impl AccessLogEntry {
    /// Create a new access log entry with current timestamp
    pub fn new(remote_addr: String, method: String, path: String) -> Self {
        Self {
            remote_addr,
            time: Local::now(),
            method,
            path,
            query: None,
            http_version: "1.1".to_string(),
            status: 200,
            body_bytes: 0,
            referer: None,
            user_agent: None,
            request_time_us: 0,
        }
    }

    /// Format the log entry according to the specified format
    pub fn format(&self, format: &str) -> String {
        match format {
            "combined" => self.format_combined(),
            "common" => self.format_common(),
            "json" => self.format_json(),
            custom => self.format_custom(custom),
        }
    }

    /// Request line as it appeared on the wire, `METHOD /path?query HTTP/v`
    fn request_line(&self) -> String {
        format!(
            "{} {} HTTP/{}",
            self.method,
            self.request_uri(),
            self.http_version
        )
    }

    /// URI with the query string reattached
    fn request_uri(&self) -> String {
        match &self.query {
            Some(q) => format!("{}?{}", self.path, q),
            None => self.path.clone(),
        }
    }

    /// Apache/Nginx Combined Log Format
    /// `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent "$http_referer" "$http_user_agent"`
    fn format_combined(&self) -> String {
        format!(
            "{} - - [{}] \"{}\" {} {} \"{}\" \"{}\"",
            self.remote_addr,
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.request_line(),
            self.status,
            self.body_bytes,
            self.referer.as_deref().unwrap_or("-"),
            self.user_agent.as_deref().unwrap_or("-"),
        )
    }

    /// Common Log Format (CLF)
    /// `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent`
    fn format_common(&self) -> String {
        format!(
            "{} - - [{}] \"{}\" {} {}",
            self.remote_addr,
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.request_line(),
            self.status,
            self.body_bytes,
        )
    }

    /// JSON structured log format
    fn format_json(&self) -> String {
        // Manual JSON building keeps the log path allocation-light and
        // independent of the response serializer
        let query_json = self
            .query
            .as_ref()
            .map_or_else(|| "null".to_string(), |q| format!("\"{}\"", escape_json(q)));
        let referer_json = self
            .referer
            .as_ref()
            .map_or_else(|| "null".to_string(), |r| format!("\"{}\"", escape_json(r)));
        let user_agent_json = self
            .user_agent
            .as_ref()
            .map_or_else(|| "null".to_string(), |u| format!("\"{}\"", escape_json(u)));

        format!(
            r#"{{"remote_addr":"{}","time":"{}","method":"{}","path":"{}","query":{},"http_version":"{}","status":{},"body_bytes":{},"referer":{},"user_agent":{},"request_time_us":{}}}"#,
            escape_json(&self.remote_addr),
            self.time.to_rfc3339(),
            escape_json(&self.method),
            escape_json(&self.path),
            query_json,
            escape_json(&self.http_version),
            self.status,
            self.body_bytes,
            referer_json,
            user_agent_json,
            self.request_time_us,
        )
    }

    /// Custom format with variable substitution
    ///
    /// Supported variables: `$remote_addr`, `$time_local`, `$time_iso8601`,
    /// `$request`, `$request_method`, `$request_uri`, `$request_time`,
    /// `$status`, `$body_bytes_sent`, `$http_referer`, `$http_user_agent`
    fn format_custom(&self, pattern: &str) -> String {
        #[allow(clippy::cast_precision_loss)]
        let request_time_s = self.request_time_us as f64 / 1_000_000.0;

        // Longer variable names first so e.g. $request_time is not clobbered
        // by the $request substitution
        let substitutions: [(&str, String); 11] = [
            ("$remote_addr", self.remote_addr.clone()),
            (
                "$time_local",
                self.time.format("%d/%b/%Y:%H:%M:%S %z").to_string(),
            ),
            ("$time_iso8601", self.time.to_rfc3339()),
            ("$request_method", self.method.clone()),
            ("$request_time", format!("{request_time_s:.3}")),
            ("$request_uri", self.request_uri()),
            ("$request", self.request_line()),
            ("$status", self.status.to_string()),
            ("$body_bytes_sent", self.body_bytes.to_string()),
            (
                "$http_referer",
                self.referer.as_deref().unwrap_or("-").to_string(),
            ),
            (
                "$http_user_agent",
                self.user_agent.as_deref().unwrap_or("-").to_string(),
            ),
        ];

        let mut result = pattern.to_string();
        for (variable, value) in substitutions {
            result = result.replace(variable, &value);
        }
        result
    }
}

/// Escape special characters for JSON string
fn escape_json(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day_request_entry() -> AccessLogEntry {
        let mut entry = AccessLogEntry::new(
            "127.0.0.1:52110".to_string(),
            "GET".to_string(),
            "/api/get-day".to_string(),
        );
        entry.query = Some("number=14.9".to_string());
        entry.status = 200;
        entry.body_bytes = 38;
        entry.user_agent = Some("curl/8.5.0".to_string());
        entry.request_time_us = 420;
        entry
    }

    #[test]
    fn test_format_combined() {
        let log = day_request_entry().format("combined");
        assert!(log.contains("127.0.0.1:52110"));
        assert!(log.contains("GET /api/get-day?number=14.9 HTTP/1.1"));
        assert!(log.contains("200 38"));
        assert!(log.contains("curl/8.5.0"));
    }

    #[test]
    fn test_format_common_omits_headers() {
        let log = day_request_entry().format("common");
        assert!(log.contains("GET /api/get-day?number=14.9 HTTP/1.1"));
        assert!(log.contains("200 38"));
        assert!(!log.contains("curl/8.5.0"));
    }

    #[test]
    fn test_format_json() {
        let log = day_request_entry().format("json");
        assert!(log.contains(r#""path":"/api/get-day""#));
        assert!(log.contains(r#""query":"number=14.9""#));
        assert!(log.contains(r#""status":200"#));
        assert!(log.contains(r#""request_time_us":420"#));
    }

    #[test]
    fn test_format_json_null_fields() {
        let mut entry = day_request_entry();
        entry.query = None;
        entry.user_agent = None;
        let log = entry.format("json");
        assert!(log.contains(r#""query":null"#));
        assert!(log.contains(r#""user_agent":null"#));
    }

    #[test]
    fn test_format_custom() {
        let log = day_request_entry().format("$request_method $request_uri -> $status");
        assert_eq!(log, "GET /api/get-day?number=14.9 -> 200");
    }

    #[test]
    fn test_custom_request_time_not_clobbered() {
        // $request must not eat the $request_time variable
        let log = day_request_entry().format("$request_time");
        assert_eq!(log, "0.000");
    }

    #[test]
    fn test_missing_request_without_query() {
        let mut entry = day_request_entry();
        entry.query = None;
        let log = entry.format("combined");
        assert!(log.contains("\"GET /api/get-day HTTP/1.1\""));
    }
}
