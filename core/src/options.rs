//! Per-call request options.
//!
//! Read-style verbs (`GET`, `DELETE`) take `QueryOptions`; write-style verbs
//! (`POST`, `PUT`, `PATCH`) take `MutationOptions<B>` where `B` is the JSON
//! body. Both carry optional extra headers and an optional bearer token.

use serde::Serialize;

/// Options for `GET` and `DELETE`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    pub headers: Vec<(String, String)>,
    pub jwt_token: Option<String>,
    pub query_parameters: Vec<(String, String)>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that always send `Authorization: Bearer <token>`.
    pub fn authenticated(token: impl Into<String>) -> Self {
        Self::new().bearer(token)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.jwt_token = Some(token.into());
        self
    }

    /// Append a query parameter. Values are coerced to strings.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query_parameters.push((key.into(), value.to_string()));
        self
    }

    pub fn has_query_parameter(&self, key: &str) -> bool {
        self.query_parameters.iter().any(|(k, _)| k == key)
    }
}

/// Options for `POST`, `PUT` and `PATCH`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationOptions<B> {
    pub headers: Vec<(String, String)>,
    pub jwt_token: Option<String>,
    pub body: B,
}

impl<B: Serialize> MutationOptions<B> {
    pub fn new(body: B) -> Self {
        Self {
            headers: Vec::new(),
            jwt_token: None,
            body,
        }
    }

    /// Options that always send `Authorization: Bearer <token>`.
    pub fn authenticated(body: B, token: impl Into<String>) -> Self {
        Self::new(body).bearer(token)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.jwt_token = Some(token.into());
        self
    }
}
