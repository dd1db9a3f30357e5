//! Request building and response parsing.
//!
//! `build_query` and `build_mutation` turn a resolved URL plus options into an
//! `HttpRequest`; `parse_response` turns the `HttpResponse` a transport hands
//! back into a decoded value or an `ApiError`. Neither side touches the
//! network.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;
use url::form_urlencoded;

use crate::error::{ApiError, FetchError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::options::{MutationOptions, QueryOptions};

pub const AUTHORIZATION: &str = "authorization";
pub const CONTENT_TYPE: &str = "content-type";
pub const APPLICATION_JSON: &str = "application/json";

/// Build a read-style request. Query parameters, if any, are form-encoded
/// and appended after `?`.
pub fn build_query(url: &str, method: HttpMethod, options: &QueryOptions) -> HttpRequest {
    let url = if options.query_parameters.is_empty() {
        url.to_string()
    } else {
        let mut query = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &options.query_parameters {
            query.append_pair(key, value);
        }
        format!("{url}?{}", query.finish())
    };

    HttpRequest {
        method,
        url,
        headers: merge_headers(&options.headers, options.jwt_token.as_deref()),
        body: None,
    }
}

/// Build a write-style request with a JSON body.
pub fn build_mutation<B: Serialize>(
    url: &str,
    method: HttpMethod,
    options: &MutationOptions<B>,
) -> Result<HttpRequest> {
    let body = serde_json::to_string(&options.body).map_err(ApiError::Serialization)?;

    let mut headers: Vec<(String, String)> = merge_headers(&options.headers, options.jwt_token.as_deref())
        .into_iter()
        .filter(|(name, _)| !name.eq_ignore_ascii_case(CONTENT_TYPE))
        .collect();
    headers.push((CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string()));

    Ok(HttpRequest {
        method,
        url: url.to_string(),
        headers,
        body: Some(body),
    })
}

/// Caller headers followed by at most one bearer `authorization` header.
/// A supplied token replaces any caller-provided `authorization` header.
fn merge_headers(extra: &[(String, String)], token: Option<&str>) -> Vec<(String, String)> {
    let mut headers: Vec<(String, String)> = extra
        .iter()
        .filter(|(name, _)| token.is_none() || !name.eq_ignore_ascii_case(AUTHORIZATION))
        .cloned()
        .collect();
    if let Some(token) = token {
        headers.push((AUTHORIZATION.to_string(), format!("Bearer {token}")));
    }
    headers
}

/// Decode `response` for `request`.
///
/// * 204 decodes `R` from JSON `null`, so `()` and `Option<T>` succeed.
/// * Any other 2xx status decodes the body as JSON.
/// * Everything else is an `ApiError::Fetch`.
pub fn parse_response<R: DeserializeOwned>(request: &HttpRequest, response: HttpResponse) -> Result<R> {
    if response.status == 204 {
        return serde_json::from_value(serde_json::Value::Null).map_err(ApiError::Deserialization);
    }

    if response.is_success() {
        return serde_json::from_str(&response.body).map_err(ApiError::Deserialization);
    }

    warn!(
        method = %request.method,
        url = %request.url,
        status = response.status,
        "request failed"
    );
    Err(ApiError::Fetch(FetchError::new(
        &request.url,
        request.method,
        response.status,
        &response.status_text,
        response.body,
    )))
}

/// Decode a response for a verb declared to return nothing.
///
/// Any 2xx body is discarded and `R` is decoded from JSON `null`, so a server
/// that answers `200 {}` instead of `204` is treated the same way. Failures
/// go through `parse_response`.
pub fn parse_empty_response<R: DeserializeOwned>(request: &HttpRequest, response: HttpResponse) -> Result<R> {
    if response.is_success() {
        return serde_json::from_value(serde_json::Value::Null).map_err(ApiError::Deserialization);
    }
    parse_response(request, response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NewPost, Post};

    const URL: &str = "http://localhost:3000/posts";

    fn response(status: u16, status_text: &str, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            status_text: status_text.to_string(),
            body: body.to_string(),
        }
    }

    fn get(url: &str) -> HttpRequest {
        build_query(url, HttpMethod::Get, &QueryOptions::new())
    }

    #[test]
    fn query_without_options_has_no_headers_or_body() {
        let req = get(URL);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, URL);
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn query_parameters_are_appended() {
        let opts = QueryOptions::new().query("postId", 1);
        let req = build_query("http://localhost:3000/comments", HttpMethod::Get, &opts);
        assert_eq!(req.url, "http://localhost:3000/comments?postId=1");
    }

    #[test]
    fn query_parameters_are_percent_encoded() {
        let opts = QueryOptions::new().query("q", "a b&c").query("lang", "é");
        let req = build_query(URL, HttpMethod::Get, &opts);
        assert_eq!(req.url, format!("{URL}?q=a+b%26c&lang=%C3%A9"));
    }

    #[test]
    fn bearer_token_is_attached_once_for_every_verb() {
        let opts = QueryOptions::authenticated("secret").header("Authorization", "Basic abc");
        for method in [HttpMethod::Get, HttpMethod::Delete] {
            let req = build_query(URL, method, &opts);
            let auth: Vec<_> = req.header_values(AUTHORIZATION).collect();
            assert_eq!(auth, vec!["Bearer secret"]);
        }

        let opts = MutationOptions::authenticated(serde_json::json!({}), "secret");
        for method in [HttpMethod::Post, HttpMethod::Put, HttpMethod::Patch] {
            let req = build_mutation(URL, method, &opts).unwrap();
            let auth: Vec<_> = req.header_values(AUTHORIZATION).collect();
            assert_eq!(auth, vec!["Bearer secret"]);
        }
    }

    #[test]
    fn caller_authorization_survives_without_token() {
        let opts = QueryOptions::new().header("Authorization", "Basic abc");
        let req = build_query(URL, HttpMethod::Get, &opts);
        assert_eq!(req.header_values(AUTHORIZATION).collect::<Vec<_>>(), vec!["Basic abc"]);
    }

    #[test]
    fn mutation_sets_json_content_type_and_body() {
        let opts = MutationOptions::new(NewPost {
            title: "foo".to_string(),
            body: "bar".to_string(),
            user_id: 1,
        })
        .header("Content-Type", "text/plain")
        .header("x-request-id", "abc");
        let req = build_mutation(URL, HttpMethod::Post, &opts).unwrap();

        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, URL);
        assert_eq!(
            req.header_values(CONTENT_TYPE).collect::<Vec<_>>(),
            vec![APPLICATION_JSON]
        );
        assert_eq!(req.header_values("x-request-id").collect::<Vec<_>>(), vec!["abc"]);
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"title": "foo", "body": "bar", "userId": 1}));
    }

    #[test]
    fn parse_success_decodes_json() {
        let req = get(URL);
        let post: Post = parse_response(
            &req,
            response(200, "OK", r#"{"userId":1,"id":1,"title":"t","body":"b"}"#),
        )
        .unwrap();
        assert_eq!(post.id, 1);
    }

    #[test]
    fn parse_created_decodes_json() {
        let req = get(URL);
        let value: serde_json::Value = parse_response(&req, response(201, "Created", r#"{"id":101}"#)).unwrap();
        assert_eq!(value["id"], 101);
    }

    #[test]
    fn parse_no_content_yields_unit() {
        let req = build_query(URL, HttpMethod::Delete, &QueryOptions::new());
        parse_response::<()>(&req, response(204, "No Content", "")).unwrap();
        let none: Option<Post> = parse_response(&req, response(204, "No Content", "")).unwrap();
        assert!(none.is_none());
    }

    #[test]
    fn empty_result_discards_success_body() {
        let req = build_query(URL, HttpMethod::Delete, &QueryOptions::new());
        parse_empty_response::<()>(&req, response(200, "OK", "{}")).unwrap();
        let none: Option<serde_json::Value> = parse_empty_response(&req, response(200, "OK", "{}")).unwrap();
        assert!(none.is_none());
        let err = parse_empty_response::<()>(&req, response(404, "Not Found", "Not Found")).unwrap_err();
        assert!(matches!(err, ApiError::Fetch(FetchError { status_code: 404, .. })));
    }

    #[test]
    fn parse_not_found_carries_context() {
        let req = get("http://localhost:3000/posts/999");
        let err = parse_response::<Post>(&req, response(404, "Not Found", "Not Found")).unwrap_err();
        match err {
            ApiError::Fetch(fetch) => {
                assert_eq!(fetch.message, "Fetch failed");
                assert_eq!(fetch.status_code, 404);
                assert_eq!(fetch.status_text, "Not Found");
                assert_eq!(fetch.query_url, "http://localhost:3000/posts/999");
                assert_eq!(fetch.method, HttpMethod::Get);
                assert_eq!(fetch.reason.as_deref(), Some("Not Found"));
            }
            other => panic!("expected fetch error, got {other:?}"),
        }
    }

    #[test]
    fn parse_server_error_without_body_has_no_reason() {
        let req = get(URL);
        let err = parse_response::<Post>(&req, response(503, "Service Unavailable", "")).unwrap_err();
        assert!(matches!(
            err,
            ApiError::Fetch(FetchError { status_code: 503, reason: None, .. })
        ));
    }

    #[test]
    fn parse_malformed_json_is_a_deserialization_error() {
        let req = get(URL);
        let err = parse_response::<Vec<Post>>(&req, response(200, "OK", "not json")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }
}
