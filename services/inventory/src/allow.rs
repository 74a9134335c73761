//! Per-path method allowlist

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::InventoryError;

pub(crate) const SEARCH: &[&str] = &["POST"];
pub(crate) const INVENTORY: &[&str] = &["GET", "POST"];
pub(crate) const ITEM: &[&str] = &["GET", "PUT", "DELETE"];
pub(crate) const PHOTO: &[&str] = &["GET", "PUT"];
pub(crate) const REGISTER: &[&str] = &["POST"];

/// Methods accepted on one path pattern.
///
/// A `{...}` segment in the pattern matches any single non-empty segment.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MethodRule {
    pattern: &'static str,
    allow: &'static [&'static str],
}

pub(crate) const RULES: &[MethodRule] = &[
    MethodRule::new("/search", SEARCH),
    MethodRule::new("/inventory", INVENTORY),
    MethodRule::new("/inventory/{id}", ITEM),
    MethodRule::new("/inventory/{id}/photo", PHOTO),
    MethodRule::new("/register", REGISTER),
];

impl MethodRule {
    const fn new(pattern: &'static str, allow: &'static [&'static str]) -> Self {
        Self { pattern, allow }
    }

    fn matches(&self, path: &str) -> bool {
        let mut expected = self.pattern.split('/');
        let mut actual = path.split('/');
        loop {
            match (expected.next(), actual.next()) {
                (None, None) => return true,
                (Some(want), Some(got)) if is_param(want) && !got.is_empty() => {}
                (Some(want), Some(got)) if want == got => {}
                _ => return false,
            }
        }
    }

    fn permits(&self, method: &str) -> bool {
        self.allow.contains(&method)
    }
}

fn is_param(segment: &str) -> bool {
    segment.starts_with('{') && segment.ends_with('}')
}

/// Find the rule governing `path`, if any.
pub(crate) fn rule_for(path: &str) -> Option<&'static MethodRule> {
    RULES.iter().find(|rule| rule.matches(path))
}

/// Middleware rejecting methods that a recognized path does not accept.
///
/// Paths without a rule go on to routing untouched.
pub(crate) async fn method_filter(request: Request, next: Next) -> Response {
    if let Some(rule) = rule_for(request.uri().path()) {
        if !rule.permits(request.method().as_str()) {
            tracing::debug!(
                method = %request.method(),
                path = rule.pattern,
                "method not in allowlist"
            );
            return InventoryError::MethodNotAllowed { allow: rule.allow }.into_response();
        }
    }

    next.run(request).await
}

/// Route-level catch-all for methods no handler on the route serves.
pub(crate) fn reject(
    allow: &'static [&'static str],
) -> impl Fn() -> std::future::Ready<InventoryError> + Clone + Send + Sync + 'static {
    move || std::future::ready(InventoryError::MethodNotAllowed { allow })
}
