//! Path template parsing and matching
//!
//! A template is a sequence of segments, each either a literal
//! (`config`) or a named parameter (`{uid}`). Matching a concrete path
//! against a template yields the identifier bound to each parameter.

use std::fmt;

use thiserror::Error;

/// Template parse errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// Empty segment in template (e.g. `//` or trailing content after `/`)
    #[error("empty segment in template '{0}'")]
    EmptySegment(String),

    /// Parameter braces not balanced (e.g. `{uid`)
    #[error("unclosed parameter in template segment '{0}'")]
    UnclosedParameter(String),

    /// Parameter with no name (`{}`)
    #[error("unnamed parameter in template '{0}'")]
    UnnamedParameter(String),

    /// Same parameter name bound twice
    #[error("duplicate parameter '{0}' in template")]
    DuplicateParameter(String),
}

/// One segment of a path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Fixed path component, matched verbatim
    Literal(String),
    /// Bound identifier component, matches any single segment
    Param(String),
}

/// A parsed path template such as `/stats/{uid}/history/{id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    segments: Vec<Segment>,
    source: String,
}

impl PathTemplate {
    /// Parses a template string.
    ///
    /// The root template `/` has zero segments. A trailing slash is
    /// tolerated; interior empty segments are rejected.
    pub fn parse(template: &str) -> Result<Self, TemplateError> {
        let trimmed = template.trim_end_matches('/');
        let mut segments = Vec::new();
        let mut param_names: Vec<&str> = Vec::new();

        // Root template: "/" or ""
        if !trimmed.is_empty() {
            let body = trimmed.strip_prefix('/').unwrap_or(trimmed);
            for raw in body.split('/') {
                if raw.is_empty() {
                    return Err(TemplateError::EmptySegment(template.to_string()));
                }
                if let Some(inner) = raw.strip_prefix('{') {
                    let name = inner
                        .strip_suffix('}')
                        .ok_or_else(|| TemplateError::UnclosedParameter(raw.to_string()))?;
                    if name.is_empty() {
                        return Err(TemplateError::UnnamedParameter(template.to_string()));
                    }
                    if param_names.contains(&name) {
                        return Err(TemplateError::DuplicateParameter(name.to_string()));
                    }
                    param_names.push(name);
                    segments.push(Segment::Param(name.to_string()));
                } else {
                    segments.push(Segment::Literal(raw.to_string()));
                }
            }
        }

        Ok(Self {
            segments,
            source: if trimmed.is_empty() { "/".to_string() } else { trimmed.to_string() },
        })
    }

    /// Returns the template segments.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the template as written (normalized, no trailing slash).
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Matches a concrete path against this template.
    ///
    /// Returns the parameter bindings on a full match, `None` otherwise.
    /// Matching is exact in depth: a path with more or fewer segments
    /// than the template does not match.
    pub fn matches(&self, path: &str) -> Option<Bindings> {
        let parts = super::segments(path);
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut bindings = Vec::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(lit) => {
                    if lit != part {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    bindings.push((name.clone(), part.to_string()));
                }
            }
        }

        Some(Bindings(bindings))
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// Identifiers bound while matching a path against a template,
/// in template order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bindings(Vec<(String, String)>);

impl Bindings {
    /// Returns the value bound to a parameter name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates bindings in template order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of bound parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no parameters were bound.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
