//! Error types for the typed client.
//!
//! # Design
//! Every non-2xx, non-204 response becomes a single `Fetch` error carrying the
//! full request/response context. Status codes are not classified further:
//! a 404 and a 503 reach the caller the same way. The remaining variants are
//! contract violations caught before any network I/O, or encode/decode
//! failures passed through from `serde_json`.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::http::HttpMethod;

/// Errors returned by the dispatcher and the request executor.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The server answered with a status outside the success range.
    #[error("{0}")]
    Fetch(FetchError),

    /// The number of positional parameters does not match the template.
    #[error("path template {template} expects {expected} parameter(s), got {actual}")]
    PathParameterCount {
        template: String,
        expected: usize,
        actual: usize,
    },

    /// The template is not declared in the endpoint schema.
    #[error("unknown path template: {0}")]
    UnknownPath(String),

    /// The verb is not declared for this template.
    #[error("{method} is not declared for {template}")]
    MethodNotAllowed {
        method: HttpMethod,
        template: String,
    },

    /// A query parameter the schema requires was not supplied.
    #[error("{template} requires query parameter {name}")]
    MissingQueryParameter { template: String, name: String },

    /// A query parameter was supplied to a verb that takes none.
    #[error("{template} takes no query parameters, got {name}")]
    UnexpectedQueryParameter { template: String, name: String },

    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// No status was received (connection refused, DNS failure, ...).
    #[error("transport error: {0}")]
    Transport(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Context for a request that came back with a non-success status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchError {
    pub message: String,
    pub query_url: String,
    pub method: HttpMethod,
    pub status_code: u16,
    pub status_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl FetchError {
    pub const MESSAGE: &'static str = "Fetch failed";

    pub fn new(
        url: &str,
        method: HttpMethod,
        status_code: u16,
        status_text: &str,
        body: String,
    ) -> Self {
        Self {
            message: Self::MESSAGE.to_string(),
            query_url: url.to_string(),
            method,
            status_code,
            status_text: status_text.to_string(),
            reason: (!body.is_empty()).then_some(body),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string_pretty(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => write!(
                f,
                "{}: {} {} returned {} {}",
                self.message, self.method, self.query_url, self.status_code, self.status_text
            ),
        }
    }
}

impl std::error::Error for FetchError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_omits_empty_reason() {
        let err = FetchError::new("http://x/posts/9", HttpMethod::Get, 404, "Not Found", String::new());
        assert!(err.reason.is_none());
        let json = serde_json::to_value(&err).unwrap();
        assert!(json.get("reason").is_none());
        assert_eq!(json["statusCode"], 404);
        assert_eq!(json["method"], "GET");
        assert_eq!(json["queryUrl"], "http://x/posts/9");
        assert_eq!(json["message"], "Fetch failed");
    }

    #[test]
    fn fetch_error_keeps_body_as_reason() {
        let err = FetchError::new("http://x/posts", HttpMethod::Post, 500, "Internal Server Error", "boom".to_string());
        assert_eq!(err.reason.as_deref(), Some("boom"));
        let rendered = ApiError::Fetch(err).to_string();
        assert!(rendered.contains("\"reason\": \"boom\""), "{rendered}");
        assert!(rendered.contains("\"statusText\": \"Internal Server Error\""), "{rendered}");
    }

    #[test]
    fn count_mismatch_message_names_template() {
        let err = ApiError::PathParameterCount {
            template: "/posts/{id}".to_string(),
            expected: 1,
            actual: 0,
        };
        assert_eq!(err.to_string(), "path template /posts/{id} expects 1 parameter(s), got 0");
    }
}
