//! URL path templates with `{name}` placeholders.
//!
//! A template is split on `/`. Any segment that starts with `{` and ends with
//! `}` is a placeholder and is filled, left to right, by the positional
//! parameters handed to `resolve`. The parameter count must match the
//! placeholder count exactly; a mismatch fails instead of leaving a literal
//! `{name}` in the URL or silently dropping extras.

use crate::error::{ApiError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A parsed path template such as `/posts/{id}/comments`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl PathTemplate {
    pub fn parse(template: &str) -> Self {
        let segments = template
            .split('/')
            .map(|segment| {
                if segment.len() >= 2 && segment.starts_with('{') && segment.ends_with('}') {
                    Segment::Placeholder(segment[1..segment.len() - 1].to_string())
                } else {
                    Segment::Literal(segment.to_string())
                }
            })
            .collect();

        Self {
            raw: template.to_string(),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Placeholder names in the order they appear.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Number of positional parameters `resolve` expects.
    pub fn arity(&self) -> usize {
        self.placeholders().count()
    }

    /// Substitute `params` into the template, left to right.
    pub fn resolve<S: AsRef<str>>(&self, params: &[S]) -> Result<String> {
        let expected = self.arity();
        if params.len() != expected {
            return Err(ApiError::PathParameterCount {
                template: self.raw.clone(),
                expected,
                actual: params.len(),
            });
        }

        let mut params = params.iter();
        let resolved: Vec<&str> = self
            .segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.as_str(),
                // Counts were checked above, so a value is always available.
                Segment::Placeholder(_) => params.next().map(|p| p.as_ref()).unwrap_or_default(),
            })
            .collect();

        Ok(resolved.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_without_placeholders_resolves_to_itself() {
        let t = PathTemplate::parse("/posts");
        assert_eq!(t.arity(), 0);
        let empty: [&str; 0] = [];
        assert_eq!(t.resolve(&empty).unwrap(), "/posts");
    }

    #[test]
    fn single_placeholder_is_replaced() {
        let t = PathTemplate::parse("/posts/{id}");
        assert_eq!(t.placeholders().collect::<Vec<_>>(), vec!["id"]);
        assert_eq!(t.resolve(&["1"]).unwrap(), "/posts/1");
    }

    #[test]
    fn placeholders_fill_left_to_right() {
        let t = PathTemplate::parse("/users/{user}/posts/{post}/comments/{comment}");
        assert_eq!(t.arity(), 3);
        let url = t.resolve(&["7", "42", "9"]).unwrap();
        assert_eq!(url, "/users/7/posts/42/comments/9");
        assert!(!url.contains('{') && !url.contains('}'));
    }

    #[test]
    fn accepts_owned_strings() {
        let t = PathTemplate::parse("/posts/{id}/comments");
        let params = vec![String::from("3")];
        assert_eq!(t.resolve(&params).unwrap(), "/posts/3/comments");
    }

    #[test]
    fn too_few_parameters_fail() {
        let t = PathTemplate::parse("/posts/{id}");
        let empty: [&str; 0] = [];
        let err = t.resolve(&empty).unwrap_err();
        assert!(matches!(
            err,
            ApiError::PathParameterCount { expected: 1, actual: 0, .. }
        ));
    }

    #[test]
    fn too_many_parameters_fail() {
        let t = PathTemplate::parse("/posts");
        let err = t.resolve(&["1"]).unwrap_err();
        assert!(matches!(
            err,
            ApiError::PathParameterCount { expected: 0, actual: 1, .. }
        ));
    }

    #[test]
    fn partial_braces_are_literal() {
        let t = PathTemplate::parse("/files/{name/raw}");
        assert_eq!(t.arity(), 0);
        let t = PathTemplate::parse("/odd/{}");
        assert_eq!(t.placeholders().collect::<Vec<_>>(), vec![""]);
    }
}
