//! Ordered route table and lookup.
//!
//! # Responsibilities
//! - Store route rules in declaration order
//! - Select the first rule whose method and path both match
//! - Return the matched rule with its bound parameters, or an explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (shared across requests without locks)
//! - Linear scan; the first match wins and nothing is ranked
//! - Literal routes must be declared before wildcard routes that would shadow
//!   them; [`RouteTable::shadowed_rules`] reports violations

use axum::http::Method;

use super::matcher::{PathParams, PathPattern};

/// Which request methods a rule accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodMatch {
    Exact(Method),
    Any,
}

impl MethodMatch {
    fn accepts(&self, method: &Method) -> bool {
        match self {
            MethodMatch::Exact(expected) => expected == method,
            MethodMatch::Any => true,
        }
    }
}

/// A (method, path pattern) → handler binding.
#[derive(Debug, Clone)]
pub struct RouteRule<H> {
    pub method: MethodMatch,
    pub pattern: PathPattern,
    pub protected: bool,
    pub handler: H,
}

impl<H> RouteRule<H> {
    pub fn new(method: Method, pattern: &str, handler: H) -> Self {
        Self {
            method: MethodMatch::Exact(method),
            pattern: PathPattern::parse(pattern),
            protected: false,
            handler,
        }
    }

    /// Rule accepting every method on `pattern`.
    pub fn any_method(pattern: &str, handler: H) -> Self {
        Self {
            method: MethodMatch::Any,
            pattern: PathPattern::parse(pattern),
            protected: false,
            handler,
        }
    }

    pub fn protected(mut self) -> Self {
        self.protected = true;
        self
    }
}

/// Result of a successful lookup.
#[derive(Debug)]
pub struct RouteMatch<'a, H> {
    pub rule: &'a RouteRule<H>,
    pub params: PathParams,
}

#[derive(Debug, Clone)]
pub struct RouteTable<H> {
    rules: Vec<RouteRule<H>>,
}

impl<H> RouteTable<H> {
    pub fn new(rules: Vec<RouteRule<H>>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[RouteRule<H>] {
        &self.rules
    }

    /// First rule, in declaration order, accepting `method` on `path`.
    pub fn find(&self, method: &Method, path: &str) -> Option<RouteMatch<'_, H>> {
        self.rules.iter().find_map(|rule| {
            if !rule.method.accepts(method) {
                return None;
            }
            rule.pattern
                .matches(path)
                .map(|params| RouteMatch { rule, params })
        })
    }

    /// Pairs `(earlier, later)` where an earlier wildcard rule would capture
    /// the literal path of a later rule for the same method.
    pub fn shadowed_rules(&self) -> Vec<(usize, usize)> {
        let mut shadowed = Vec::new();
        for (later_idx, later) in self.rules.iter().enumerate() {
            if !later.pattern.is_literal() {
                continue;
            }
            for (earlier_idx, earlier) in self.rules[..later_idx].iter().enumerate() {
                let same_method = match (&earlier.method, &later.method) {
                    (MethodMatch::Any, _) => true,
                    (MethodMatch::Exact(a), MethodMatch::Exact(b)) => a == b,
                    (MethodMatch::Exact(_), MethodMatch::Any) => true,
                };
                if same_method
                    && !earlier.pattern.is_literal()
                    && earlier.pattern.matches(later.pattern.as_str()).is_some()
                {
                    shadowed.push((earlier_idx, later_idx));
                }
            }
        }
        shadowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable<&'static str> {
        RouteTable::new(vec![
            RouteRule::new(Method::GET, "/v1/feedbacks/visitor", "visitor"),
            RouteRule::new(Method::GET, "/v1/feedbacks/{id}", "feedback").protected(),
            RouteRule::new(Method::POST, "/v1/feedbacks", "create"),
            RouteRule::any_method("/v1/feedbacks", "fallback"),
        ])
    }

    #[test]
    fn first_match_wins() {
        let table = table();
        let found = table.find(&Method::GET, "/v1/feedbacks/visitor").unwrap();
        assert_eq!(found.rule.handler, "visitor");
        assert!(!found.rule.protected);

        let found = table.find(&Method::GET, "/v1/feedbacks/abc").unwrap();
        assert_eq!(found.rule.handler, "feedback");
        assert!(found.rule.protected);
        assert_eq!(found.params.get("id").map(String::as_str), Some("abc"));
    }

    #[test]
    fn method_must_match() {
        let table = table();
        assert!(table.find(&Method::DELETE, "/v1/feedbacks/abc").is_none());
        assert_eq!(
            table.find(&Method::POST, "/v1/feedbacks").unwrap().rule.handler,
            "create"
        );
    }

    #[test]
    fn any_method_rule_catches_the_rest() {
        let table = table();
        assert_eq!(
            table.find(&Method::PATCH, "/v1/feedbacks").unwrap().rule.handler,
            "fallback"
        );
    }

    #[test]
    fn no_match_returns_none() {
        assert!(table().find(&Method::GET, "/v1/nothing").is_none());
    }

    #[test]
    fn reports_literal_routes_shadowed_by_earlier_wildcards() {
        let misordered = RouteTable::new(vec![
            RouteRule::new(Method::GET, "/v1/dishes/{id}", "dish"),
            RouteRule::new(Method::GET, "/v1/dishes/popular", "popular"),
            RouteRule::new(Method::POST, "/v1/dishes/special", "special"),
        ]);
        assert_eq!(misordered.shadowed_rules(), vec![(0, 1)]);
        assert!(table().shadowed_rules().is_empty());
    }
}
