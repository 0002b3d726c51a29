//! Path matching.
//!
//! # Responsibilities
//! - Parse route patterns such as `/v1/reservations/{id}/order/{dishId}`
//! - Match a normalized path segment by segment
//! - Bind wildcard segments to named path parameters
//!
//! # Design Decisions
//! - Matching is case-sensitive
//! - A wildcard covers exactly one non-empty segment
//! - Bound values are the raw segment text (no percent-decoding)
//! - No regex, so matching stays linear in the number of segments

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A compiled route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

/// Path parameters bound by a successful match, keyed by wildcard name.
pub type PathParams = HashMap<String, String>;

impl PathPattern {
    /// Compile a pattern. Segments written as `{name}` become wildcards; every
    /// other segment must match literally.
    pub fn parse(pattern: &str) -> Self {
        let segments = pattern
            .split('/')
            .map(|segment| {
                match segment
                    .strip_prefix('{')
                    .and_then(|rest| rest.strip_suffix('}'))
                {
                    Some(name) if !name.is_empty() => Segment::Param(name.to_string()),
                    _ => Segment::Literal(segment.to_string()),
                }
            })
            .collect();

        Self {
            raw: pattern.to_string(),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// True when the pattern has no wildcard segments.
    pub fn is_literal(&self) -> bool {
        self.segments
            .iter()
            .all(|s| matches!(s, Segment::Literal(_)))
    }

    /// Match `path` and return the bound parameters, or `None`.
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        let mut params = PathParams::new();
        let mut parts = path.split('/');

        for segment in &self.segments {
            let part = parts.next()?;
            match segment {
                Segment::Literal(expected) => {
                    if expected != part {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    params.insert(name.clone(), part.to_string());
                }
            }
        }

        // Extra trailing segments mean no match.
        if parts.next().is_some() {
            return None;
        }

        Some(params)
    }
}
