//! HTTP client for the attendance reporting service.
//!
//! One POST per query with body `{"studentName": "<name>"}`. Transport
//! failures and non-success statuses are reported here, before any payload
//! reaches the normalizer. There is no retry.

use crate::config::{ClientConfig, ENDPOINT_ENV};
use crate::error::AttendanceError;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::time::Duration;

/// Anything that can produce a raw attendance payload for a student
pub trait RawSource {
    fn fetch_raw(&self, student_name: &str) -> Result<Value, AttendanceError>;
}

impl<F> RawSource for F
where
    F: Fn(&str) -> Result<Value, AttendanceError>,
{
    fn fetch_raw(&self, student_name: &str) -> Result<Value, AttendanceError> {
        self(student_name)
    }
}

/// Trim and check the requested student name; blank names never hit the network
pub fn validate_student_name(student_name: &str) -> Result<&str, AttendanceError> {
    let trimmed = student_name.trim();
    if trimmed.is_empty() {
        return Err(AttendanceError::EmptyStudentName);
    }
    Ok(trimmed)
}

pub struct AttendanceClient {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl AttendanceClient {
    pub fn new(config: &ClientConfig) -> Result<Self, AttendanceError> {
        let endpoint = config
            .endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| {
                AttendanceError::Config(format!(
                    "no attendance endpoint configured (set {} or pass --endpoint)",
                    ENDPOINT_ENV
                ))
            })?;

        let mut builder = reqwest::blocking::Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let client = builder
            .build()
            .map_err(|e| AttendanceError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl RawSource for AttendanceClient {
    fn fetch_raw(&self, student_name: &str) -> Result<Value, AttendanceError> {
        let name = validate_student_name(student_name)?;
        log::debug!("requesting attendance for {:?} from {}", name, self.endpoint);

        let body = serde_json::json!({ "studentName": name });
        let resp = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()?;

        let status = resp.status();
        log::debug!("attendance service responded with {}", status);

        if !status.is_success() {
            let text = resp
                .text()
                .unwrap_or_else(|e| format!("<unreadable body: {}>", e));
            return Err(AttendanceError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let text = resp.text()?;
        Ok(serde_json::from_str(&text)?)
    }
}


#[cfg(test)]
mod tests {
    use super::test_server::{closed_url, serve_once, serve_raw_once};
    use super::*;
    use serde_json::json;

    fn client_for(url: &str) -> AttendanceClient {
        let config = ClientConfig {
            endpoint: Some(url.to_string()),
            timeout_secs: 5,
        };
        AttendanceClient::new(&config).unwrap()
    }

    #[test]
    fn test_validate_student_name() {
        assert_eq!(validate_student_name("  Alice ").unwrap(), "Alice");
        assert!(matches!(
            validate_student_name("   "),
            Err(AttendanceError::EmptyStudentName)
        ));
    }

    #[test]
    fn test_requires_endpoint() {
        let result = AttendanceClient::new(&ClientConfig::default());
        assert!(matches!(result, Err(AttendanceError::Config(_))));

        let result = AttendanceClient::new(&ClientConfig::with_endpoint("  "));
        assert!(matches!(result, Err(AttendanceError::Config(_))));
    }

    #[test]
    fn test_blank_name_sends_nothing() {
        // Nothing listens here; a request would surface as Transport instead
        let client = client_for(&closed_url());
        assert!(matches!(
            client.fetch_raw(""),
            Err(AttendanceError::EmptyStudentName)
        ));
    }

    #[test]
    fn test_posts_trimmed_name_and_decodes_body() {
        let (url, server) = serve_once("200 OK", r#"[{"name": "Alice", "subject": "Art"}]"#);
        let client = client_for(&url);

        let raw = client.fetch_raw("  Alice  ").unwrap();
        assert_eq!(raw, json!([{"name": "Alice", "subject": "Art"}]));

        let request = server.join().unwrap();
        assert!(request.starts_with("POST /webhook"));
        assert!(request.to_lowercase().contains("content-type: application/json"));
        assert!(request.ends_with(r#"{"studentName":"Alice"}"#));
    }

    #[test]
    fn test_non_success_status_carries_body() {
        let (url, server) = serve_once("404 Not Found", r#"{"message":"webhook not registered"}"#);
        let client = client_for(&url);

        match client.fetch_raw("Alice") {
            Err(AttendanceError::Status { status, body }) => {
                assert_eq!(status, 404);
                assert!(body.contains("webhook not registered"));
            }
            other => panic!("expected status error, got {:?}", other),
        }
        server.join().unwrap();
    }

    #[test]
    fn test_unreadable_error_body_is_reported() {
        // Promises 64 bytes, sends 7, then closes
        let (url, server) = serve_raw_once(
            "HTTP/1.1 502 Bad Gateway\r\nContent-Length: 64\r\nConnection: close\r\n\r\npartial"
                .to_string(),
        );
        let client = client_for(&url);

        match client.fetch_raw("Alice") {
            Err(AttendanceError::Status { status, body }) => {
                assert_eq!(status, 502);
                assert!(body.starts_with("<unreadable body:"), "got {:?}", body);
            }
            other => panic!("expected status error, got {:?}", other),
        }
        server.join().unwrap();
    }

    #[test]
    fn test_invalid_json_body() {
        let (url, server) = serve_once("200 OK", "<html>hello</html>");
        let client = client_for(&url);

        assert!(matches!(
            client.fetch_raw("Alice"),
            Err(AttendanceError::JsonError(_))
        ));
        server.join().unwrap();
    }

    #[test]
    fn test_unreachable_endpoint_is_transport_error() {
        let client = client_for(&closed_url());
        let err = client.fetch_raw("Alice").unwrap_err();
        assert!(err.is_connectivity(), "got {:?}", err);
    }

    #[test]
    fn test_closure_source() {
        let source =
            |name: &str| -> Result<Value, AttendanceError> { Ok(json!({ "name": name })) };
        assert_eq!(source.fetch_raw("Bob").unwrap(), json!({"name": "Bob"}));
    }
}
