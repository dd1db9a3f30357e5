//! Schema-driven typed client for the posts/comments REST service.
//!
//! # Overview
//! `ApiClient::client(template, params)` resolves a path template such as
//! `/posts/{id}` against positional parameters and returns a `Resource`
//! exposing the verbs the endpoint schema declares for that template. Each
//! verb performs exactly one round trip: JSON bodies for writes, form-encoded
//! query strings for reads, an optional bearer token, and a single
//! structured error for any non-success status.
//!
//! # Design
//! - Request building and response parsing are pure (`request` module); the
//!   `Transport` trait performs the I/O, with `UreqTransport` as the default.
//! - The endpoint schema is a static table (`schema` module) checked before
//!   any request is built.
//! - Parameter-count mismatches fail fast instead of leaving `{name}` in a URL.
//! - `Config` validates `API_URL` / `PORT` at process start.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod options;
pub mod path;
pub mod request;
pub mod schema;
pub mod types;

pub use client::{ApiClient, Resource};
pub use config::{Config, ConfigError};
pub use error::{ApiError, FetchError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use options::{MutationOptions, QueryOptions};
pub use path::PathTemplate;
pub use types::{Comment, CommentsQuery, NewPost, Post, PostPatch};
