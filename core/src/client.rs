//! Schema-driven dispatcher for the posts/comments API.
//!
//! # Design
//! `ApiClient::client` takes a path template from the endpoint schema plus
//! exactly as many positional parameters as the template has placeholders,
//! and returns a `Resource` bound to the resolved URL. Each verb on the
//! `Resource` checks the verb and its query keys against the schema before
//! building a request, so a mismatch never reaches the network. A verb
//! declared to return nothing discards any success body. The typed helpers
//! further down are thin wrappers over the same path.
//!
//! The client holds only `base_url` and a transport; every call builds its
//! own URL and headers and shares nothing with any other call.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, HttpRequest, Transport, UreqTransport};
use crate::options::{MutationOptions, QueryOptions};
use crate::path::PathTemplate;
use crate::request::{build_mutation, build_query, parse_empty_response, parse_response};
use crate::schema::{self, EndpointSchema, OptionShape, ResultShape, VerbSchema};
use crate::types::{Comment, CommentsQuery, NewPost, Post, PostPatch};

/// Client for the posts/comments API.
#[derive(Debug, Clone)]
pub struct ApiClient<T = UreqTransport> {
    base_url: String,
    transport: T,
}

impl ApiClient<UreqTransport> {
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(base_url, UreqTransport::default())
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Bind `template` to `params` and return the verbs the schema declares
    /// for it.
    pub fn client<S: AsRef<str>>(&self, template: &str, params: &[S]) -> Result<Resource<'_, T>> {
        let endpoint = schema::lookup(template).ok_or_else(|| ApiError::UnknownPath(template.to_string()))?;
        let path = PathTemplate::parse(endpoint.template).resolve(params)?;

        Ok(Resource {
            client: self,
            endpoint,
            url: format!("{}{}", self.base_url, path),
        })
    }

    // -- typed helpers, one per schema row --

    /// `GET /posts`
    pub fn list_posts(&self) -> Result<Vec<Post>> {
        self.client::<&str>(schema::POSTS, &[])?.get(&QueryOptions::new())
    }

    /// `POST /posts`
    pub fn create_post(&self, input: &NewPost) -> Result<Post> {
        self.client::<&str>(schema::POSTS, &[])?.post(&MutationOptions::new(input))
    }

    /// `GET /posts/{id}`
    pub fn get_post(&self, id: u64) -> Result<Post> {
        self.client(schema::POST, &[id.to_string()])?.get(&QueryOptions::new())
    }

    /// `PUT /posts/{id}`
    pub fn replace_post(&self, id: u64, post: &Post) -> Result<Post> {
        self.client(schema::POST, &[id.to_string()])?.put(&MutationOptions::new(post))
    }

    /// `PATCH /posts/{id}`
    pub fn update_post(&self, id: u64, patch: &PostPatch) -> Result<Post> {
        self.client(schema::POST, &[id.to_string()])?.patch(&MutationOptions::new(patch))
    }

    /// `DELETE /posts/{id}`
    pub fn delete_post(&self, id: u64) -> Result<()> {
        self.client(schema::POST, &[id.to_string()])?.delete(&QueryOptions::new())
    }

    /// `GET /comments?postId=..`
    pub fn list_comments(&self, query: CommentsQuery) -> Result<Vec<Comment>> {
        self.client::<&str>(schema::COMMENTS, &[])?
            .get(&QueryOptions::new().query("postId", query.post_id))
    }

    /// `GET /posts/{id}/comments`
    pub fn post_comments(&self, id: u64) -> Result<Vec<Comment>> {
        self.client(schema::POST_COMMENTS, &[id.to_string()])?.get(&QueryOptions::new())
    }
}

/// A path template bound to concrete parameters.
#[derive(Debug)]
pub struct Resource<'a, T> {
    client: &'a ApiClient<T>,
    endpoint: &'static EndpointSchema,
    url: String,
}

impl<T: Transport> Resource<'_, T> {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn schema(&self) -> &'static EndpointSchema {
        self.endpoint
    }

    pub fn get<R: DeserializeOwned>(&self, options: &QueryOptions) -> Result<R> {
        self.query(HttpMethod::Get, options)
    }

    pub fn delete<R: DeserializeOwned>(&self, options: &QueryOptions) -> Result<R> {
        self.query(HttpMethod::Delete, options)
    }

    pub fn post<B: Serialize, R: DeserializeOwned>(&self, options: &MutationOptions<B>) -> Result<R> {
        self.mutate(HttpMethod::Post, options)
    }

    pub fn put<B: Serialize, R: DeserializeOwned>(&self, options: &MutationOptions<B>) -> Result<R> {
        self.mutate(HttpMethod::Put, options)
    }

    pub fn patch<B: Serialize, R: DeserializeOwned>(&self, options: &MutationOptions<B>) -> Result<R> {
        self.mutate(HttpMethod::Patch, options)
    }

    fn query<R: DeserializeOwned>(&self, method: HttpMethod, options: &QueryOptions) -> Result<R> {
        let verb = self.check(method)?;
        match verb.options {
            OptionShape::Query { required } => {
                if let Some(missing) = required.iter().find(|name| !options.has_query_parameter(name)) {
                    return Err(ApiError::MissingQueryParameter {
                        template: self.endpoint.template.to_string(),
                        name: missing.to_string(),
                    });
                }
            }
            _ => {
                if let Some((name, _)) = options.query_parameters.first() {
                    return Err(ApiError::UnexpectedQueryParameter {
                        template: self.endpoint.template.to_string(),
                        name: name.clone(),
                    });
                }
            }
        }

        self.exchange(verb, build_query(&self.url, method, options))
    }

    fn mutate<B: Serialize, R: DeserializeOwned>(&self, method: HttpMethod, options: &MutationOptions<B>) -> Result<R> {
        let verb = self.check(method)?;
        self.exchange(verb, build_mutation(&self.url, method, options)?)
    }

    fn exchange<R: DeserializeOwned>(&self, verb: &VerbSchema, request: HttpRequest) -> Result<R> {
        let response = self.client.transport.execute(&request)?;
        match verb.result {
            ResultShape::Empty => parse_empty_response(&request, response),
            _ => parse_response(&request, response),
        }
    }

    fn check(&self, method: HttpMethod) -> Result<&'static VerbSchema> {
        self.endpoint.verb(method).ok_or_else(|| ApiError::MethodNotAllowed {
            method,
            template: self.endpoint.template.to_string(),
        })
    }
}
