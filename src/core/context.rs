//! Request-scoped context propagation
//!
//! `RequestContext` is an immutable chain of bindings. Each `with_*` call
//! returns a derived context with one more binding; the parent is never
//! touched, so contexts can be shared freely across threads.
//!
//! Lookups never fail: missing ids read as an empty string and a missing
//! logger falls back to a registry logger.

use super::{
    field::Field,
    logger::SharedLogger,
    registry::LoggerRegistry,
};
use std::fmt;
use std::sync::Arc;

pub const REQUEST_ID_KEY: &str = "request_id";
pub const TRACE_ID_KEY: &str = "trace_id";
pub const USER_ID_KEY: &str = "user_id";

#[derive(Clone)]
enum Binding {
    Logger(SharedLogger),
    RequestId(String),
    TraceId(String),
    UserId(String),
}

struct Node {
    binding: Binding,
    parent: Option<Arc<Node>>,
}

/// Immutable chain of request-scoped values
#[derive(Clone, Default)]
pub struct RequestContext {
    head: Option<Arc<Node>>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, binding: Binding) -> Self {
        Self {
            head: Some(Arc::new(Node {
                binding,
                parent: self.head.clone(),
            })),
        }
    }

    fn lookup<'a, T>(&'a self, pick: impl Fn(&'a Binding) -> Option<T>) -> Option<T> {
        let mut node = self.head.as_deref();
        while let Some(current) = node {
            if let Some(found) = pick(&current.binding) {
                return Some(found);
            }
            node = current.parent.as_deref();
        }
        None
    }

    #[must_use]
    pub fn with_logger(&self, logger: SharedLogger) -> Self {
        self.push(Binding::Logger(logger))
    }

    #[must_use]
    pub fn with_request_id(&self, request_id: impl Into<String>) -> Self {
        self.push(Binding::RequestId(request_id.into()))
    }

    #[must_use]
    pub fn with_trace_id(&self, trace_id: impl Into<String>) -> Self {
        self.push(Binding::TraceId(trace_id.into()))
    }

    #[must_use]
    pub fn with_user_id(&self, user_id: impl Into<String>) -> Self {
        self.push(Binding::UserId(user_id.into()))
    }

    pub fn logger(&self) -> Option<SharedLogger> {
        self.lookup(|b| match b {
            Binding::Logger(logger) => Some(logger.clone()),
            _ => None,
        })
    }

    pub fn request_id(&self) -> Option<&str> {
        self.lookup(|b| match b {
            Binding::RequestId(id) => Some(id.as_str()),
            _ => None,
        })
    }

    pub fn trace_id(&self) -> Option<&str> {
        self.lookup(|b| match b {
            Binding::TraceId(id) => Some(id.as_str()),
            _ => None,
        })
    }

    pub fn user_id(&self) -> Option<&str> {
        self.lookup(|b| match b {
            Binding::UserId(id) => Some(id.as_str()),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("has_logger", &self.logger().is_some())
            .field("request_id", &self.request_id())
            .field("trace_id", &self.trace_id())
            .field("user_id", &self.user_id())
            .finish()
    }
}

/// Logger bound to `ctx`, or the global registry's logger
pub fn logger_from_context(ctx: Option<&RequestContext>) -> SharedLogger {
    logger_from_context_or(ctx, LoggerRegistry::global())
}

/// Logger bound to `ctx`, or `fallback`'s logger
pub fn logger_from_context_or(ctx: Option<&RequestContext>, fallback: &LoggerRegistry) -> SharedLogger {
    ctx.and_then(RequestContext::logger)
        .unwrap_or_else(|| fallback.get())
}

pub fn request_id_from_context(ctx: Option<&RequestContext>) -> String {
    ctx.and_then(RequestContext::request_id).unwrap_or_default().to_string()
}

pub fn trace_id_from_context(ctx: Option<&RequestContext>) -> String {
    ctx.and_then(RequestContext::trace_id).unwrap_or_default().to_string()
}

pub fn user_id_from_context(ctx: Option<&RequestContext>) -> String {
    ctx.and_then(RequestContext::user_id).unwrap_or_default().to_string()
}

/// Non-empty request, trace and user id fields, in that order
pub fn context_fields(ctx: Option<&RequestContext>) -> Vec<Field> {
    let Some(ctx) = ctx else {
        return Vec::new();
    };

    [
        (REQUEST_ID_KEY, ctx.request_id()),
        (TRACE_ID_KEY, ctx.trace_id()),
        (USER_ID_KEY, ctx.user_id()),
    ]
    .into_iter()
    .filter_map(|(key, value)| match value {
        Some(v) if !v.is_empty() => Some(Field::string(key, v)),
        _ => None,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::{NoopLogger, TestLogger};
    use crate::core::logger::Backend;

    #[test]
    fn test_missing_values_read_empty() {
        assert_eq!(request_id_from_context(None), "");
        assert_eq!(trace_id_from_context(Some(&RequestContext::new())), "");
        assert!(context_fields(None).is_empty());
    }

    #[test]
    fn test_derived_context_leaves_parent_untouched() {
        let parent = RequestContext::new().with_request_id("req-1");
        let child = parent.with_user_id("u-9").with_request_id("req-2");

        assert_eq!(parent.request_id(), Some("req-1"));
        assert_eq!(parent.user_id(), None);
        assert_eq!(child.request_id(), Some("req-2"));
        assert_eq!(child.user_id(), Some("u-9"));
    }

    #[test]
    fn test_context_fields_order_and_filtering() {
        let ctx = RequestContext::new()
            .with_user_id("u-1")
            .with_trace_id("")
            .with_request_id("r-1");

        let keys: Vec<String> = context_fields(Some(&ctx))
            .iter()
            .map(|f| f.key().to_string())
            .collect();
        assert_eq!(keys, vec!["request_id", "user_id"]);
    }

    #[test]
    fn test_logger_fallback() {
        let registry = LoggerRegistry::new();
        let logger = logger_from_context_or(None, &registry);
        assert_eq!(logger.backend(), Backend::Noop);

        let test_logger: SharedLogger = std::sync::Arc::new(TestLogger::new());
        let ctx = RequestContext::new().with_logger(test_logger);
        assert_eq!(logger_from_context_or(Some(&ctx), &registry).backend(), Backend::Test);

        let noop: SharedLogger = std::sync::Arc::new(NoopLogger::new());
        assert_eq!(ctx.with_logger(noop).logger().map(|l| l.backend()), Some(Backend::Noop));
    }
}
