//! Request authorization table.
//!
//! Rules are `(method, ant pattern) -> access`, evaluated top to bottom; the first
//! matching rule decides. A request no rule matches is permitted.
//!
//! Pattern syntax (per path segment):
//! - `?` matches exactly one character
//! - `*` matches any run of characters inside one segment
//! - `**` matches zero or more whole segments
use axum::http::Method;

use crate::services::auth::authority::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    PermitAll,
    HasRole(Role),
}

/// Outcome of evaluating a request against the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Permit,
    /// Authentication required but no principal present (401).
    Unauthenticated,
    /// Principal present but lacks the required role (403).
    Denied,
}

#[derive(Debug, Clone)]
struct Rule {
    method: Option<Method>,
    pattern: String,
    access: Access,
}

#[derive(Debug, Clone, Default)]
pub struct SecurityPolicy {
    rules: Vec<Rule>,
}

impl SecurityPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// `method = None` matches every method.
    pub fn rule(mut self, method: Option<Method>, pattern: &str, access: Access) -> Self {
        self.rules.push(Rule {
            method,
            pattern: pattern.to_string(),
            access,
        });
        self
    }

    /// The service's route table.
    pub fn standard() -> Self {
        use Access::{HasRole, PermitAll};
        let user = HasRole(Role::User);

        Self::new()
            .rule(None, "/users/logout", PermitAll)
            .rule(Some(Method::POST), "/users", PermitAll)
            .rule(Some(Method::PATCH), "/users/**", user)
            .rule(Some(Method::GET), "/users/**", user)
            .rule(Some(Method::DELETE), "/users/**", user)
            .rule(Some(Method::POST), "/bands", user)
            .rule(Some(Method::PATCH), "/bands/**", user)
            .rule(Some(Method::GET), "/bands/**", user)
            .rule(Some(Method::DELETE), "/bands/**", user)
            .rule(Some(Method::POST), "/comments", user)
            .rule(Some(Method::GET), "/comments/**", user)
            .rule(Some(Method::PATCH), "/comments/**", user)
            .rule(Some(Method::DELETE), "/comments/**", user)
            .rule(Some(Method::POST), "/mentions", user)
            .rule(Some(Method::GET), "/mentions/**", user)
            .rule(Some(Method::DELETE), "/mentions/**", user)
            .rule(None, "/**", PermitAll)
    }

    /// HEAD is looked up as GET, since GET routes also answer HEAD.
    pub fn required_access(&self, method: &Method, path: &str) -> Access {
        let method = if *method == Method::HEAD {
            Method::GET
        } else {
            method.clone()
        };
        self.rules
            .iter()
            .find(|r| r.method.as_ref().is_none_or(|m| *m == method) && ant_match(&r.pattern, path))
            .map(|r| r.access)
            .unwrap_or(Access::PermitAll)
    }

    /// `roles` is `None` when the request carries no verified principal.
    pub fn authorize(&self, method: &Method, path: &str, roles: Option<&[Role]>) -> Decision {
        match self.required_access(method, path) {
            Access::PermitAll => Decision::Permit,
            Access::HasRole(required) => match roles {
                None => Decision::Unauthenticated,
                Some(held) if held.contains(&required) => Decision::Permit,
                Some(_) => Decision::Denied,
            },
        }
    }
}

pub fn ant_match(pattern: &str, path: &str) -> bool {
    let pattern: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let path: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    match_segments(&pattern, &path)
}

fn match_segments(pattern: &[&str], path: &[&str]) -> bool {
    match pattern.split_first() {
        None => path.is_empty(),
        Some((&"**", rest)) => (0..=path.len()).any(|skip| match_segments(rest, &path[skip..])),
        Some((segment, rest)) => match path.split_first() {
            Some((head, tail)) => match_segment(segment, head) && match_segments(rest, tail),
            None => false,
        },
    }
}

fn match_segment(pattern: &str, segment: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let segment: Vec<char> = segment.chars().collect();
    glob(&pattern, &segment)
}

fn glob(pattern: &[char], text: &[char]) -> bool {
    match pattern.split_first() {
        None => text.is_empty(),
        Some((&'*', rest)) => (0..=text.len()).any(|skip| glob(rest, &text[skip..])),
        Some((&'?', rest)) => !text.is_empty() && glob(rest, &text[1..]),
        Some((c, rest)) => text.first() == Some(c) && glob(rest, &text[1..]),
    }
}
