//! The endpoint schema: which verbs each path template supports, and what
//! each verb takes and returns.
//!
//! The table is consulted by the dispatcher before any request is built, so
//! a call that does not match its verb's declared options fails without
//! touching the network.

use crate::http::HttpMethod;

pub const POSTS: &str = "/posts";
pub const POST: &str = "/posts/{id}";
pub const COMMENTS: &str = "/comments";
pub const POST_COMMENTS: &str = "/posts/{id}/comments";

/// What a verb accepts besides headers and a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionShape {
    None,
    /// Query parameters; the listed keys must be present.
    Query { required: &'static [&'static str] },
    /// A JSON body.
    Body,
}

/// What a successful call decodes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultShape {
    Post,
    PostList,
    CommentList,
    /// Nothing. A success body, if any, is discarded.
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerbSchema {
    pub method: HttpMethod,
    pub options: OptionShape,
    pub result: ResultShape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointSchema {
    pub template: &'static str,
    pub verbs: &'static [VerbSchema],
}

impl EndpointSchema {
    pub fn verb(&self, method: HttpMethod) -> Option<&'static VerbSchema> {
        self.verbs.iter().find(|v| v.method == method)
    }

    pub fn supports(&self, method: HttpMethod) -> bool {
        self.verb(method).is_some()
    }

    pub fn methods(&self) -> impl Iterator<Item = HttpMethod> {
        self.verbs.iter().map(|v| v.method)
    }
}

const fn verb(method: HttpMethod, options: OptionShape, result: ResultShape) -> VerbSchema {
    VerbSchema {
        method,
        options,
        result,
    }
}

pub static ENDPOINTS: &[EndpointSchema] = &[
    EndpointSchema {
        template: POSTS,
        verbs: &[
            verb(HttpMethod::Get, OptionShape::None, ResultShape::PostList),
            verb(HttpMethod::Post, OptionShape::Body, ResultShape::Post),
        ],
    },
    EndpointSchema {
        template: POST,
        verbs: &[
            verb(HttpMethod::Get, OptionShape::None, ResultShape::Post),
            verb(HttpMethod::Put, OptionShape::Body, ResultShape::Post),
            verb(HttpMethod::Patch, OptionShape::Body, ResultShape::Post),
            verb(HttpMethod::Delete, OptionShape::None, ResultShape::Empty),
        ],
    },
    EndpointSchema {
        template: COMMENTS,
        verbs: &[verb(
            HttpMethod::Get,
            OptionShape::Query {
                required: &["postId"],
            },
            ResultShape::CommentList,
        )],
    },
    EndpointSchema {
        template: POST_COMMENTS,
        verbs: &[verb(HttpMethod::Get, OptionShape::None, ResultShape::CommentList)],
    },
];

/// Find the schema entry for an exact path template.
pub fn lookup(template: &str) -> Option<&'static EndpointSchema> {
    ENDPOINTS.iter().find(|e| e.template == template)
}
