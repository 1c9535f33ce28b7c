//! Fallback-chaining router.
//!
//! # Responsibilities
//! - Collect middlewares and candidate handlers at startup
//! - Run middlewares once per request against the real sink
//! - Try handlers in order until one claims the request
//! - Emit exactly one 404 when nobody does
//!
//! # Design Decisions
//! - Builder is the only mutable phase; `WildcardRouter` is immutable and
//!   shared via `Arc` while serving
//! - First claim wins (registration order is priority)

use axum::body::Bytes;

use super::handler::{Handler, Middleware, Request};
use super::probe::ResponseProbe;
use super::sink::{write_not_found, ResponseSink};

/// Result of dispatching one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Handler at `index` answered with `status`.
    Claimed { index: usize, status: u16 },
    /// Every handler declined; a 404 was written.
    NotFound { attempts: usize },
}

impl Outcome {
    /// Number of handlers that were invoked.
    pub fn attempts(&self) -> usize {
        match *self {
            Outcome::Claimed { index, .. } => index + 1,
            Outcome::NotFound { attempts } => attempts,
        }
    }

    pub fn is_claimed(&self) -> bool {
        matches!(self, Outcome::Claimed { .. })
    }

    /// Label for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Claimed { .. } => "claimed",
            Outcome::NotFound { .. } => "not_found",
        }
    }
}

/// Collects middlewares and handlers before the router is frozen.
#[derive(Default)]
pub struct WildcardRouterBuilder {
    middlewares: Vec<Middleware>,
    handlers: Vec<Box<dyn Handler>>,
    not_found_body: Option<Bytes>,
}

impl WildcardRouterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a middleware; they run in registration order.
    pub fn use_middleware<F>(mut self, middleware: F) -> Self
    where
        F: Fn(&mut dyn ResponseSink, &mut Request) + Send + Sync + 'static,
    {
        self.middlewares.push(Box::new(middleware));
        self
    }

    /// Append a handler; earlier handlers are tried first.
    pub fn add_handler<H>(mut self, handler: H) -> Self
    where
        H: Handler + 'static,
    {
        self.handlers.push(Box::new(handler));
        self
    }

    /// Append a closure handler.
    pub fn add_handler_fn<F>(self, handler: F) -> Self
    where
        F: Fn(&mut dyn ResponseSink, &Request) + Send + Sync + 'static,
    {
        self.add_handler(handler)
    }

    pub fn add_boxed_handler(mut self, handler: Box<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Body for the final 404. Without one the 404 is empty.
    pub fn not_found_body(mut self, body: impl Into<Bytes>) -> Self {
        self.not_found_body = Some(body.into());
        self
    }

    pub fn build(self) -> WildcardRouter {
        WildcardRouter {
            middlewares: self.middlewares,
            handlers: self.handlers,
            not_found_body: self.not_found_body,
        }
    }
}

/// Dispatches a request to the first handler willing to answer it.
pub struct WildcardRouter {
    middlewares: Vec<Middleware>,
    handlers: Vec<Box<dyn Handler>>,
    not_found_body: Option<Bytes>,
}

impl WildcardRouter {
    pub fn builder() -> WildcardRouterBuilder {
        WildcardRouterBuilder::new()
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    pub fn middleware_count(&self) -> usize {
        self.middlewares.len()
    }

    /// Serve one request into `sink`.
    pub fn serve(&self, sink: &mut dyn ResponseSink, req: &mut Request) -> Outcome {
        for middleware in &self.middlewares {
            middleware(&mut *sink, &mut *req);
        }

        let mut probe = ResponseProbe::new(sink);
        for (index, handler) in self.handlers.iter().enumerate() {
            handler.serve(&mut probe, req);
            if probe.claimed() {
                tracing::debug!(
                    handler = handler.name(),
                    index,
                    status = probe.status(),
                    path = %req.uri().path(),
                    "Request claimed"
                );
                return Outcome::Claimed {
                    index,
                    status: probe.status(),
                };
            }
            tracing::trace!(handler = handler.name(), index, "Handler declined");
            probe.reset();
        }

        probe.set_skip_not_found_check(true);
        if let Err(e) = write_not_found(&mut probe, self.not_found_body.as_ref()) {
            tracing::warn!(error = %e, "Failed to write not-found body");
        }
        tracing::debug!(
            path = %req.uri().path(),
            attempts = self.handlers.len(),
            "No handler claimed request"
        );
        Outcome::NotFound {
            attempts: self.handlers.len(),
        }
    }
}

impl std::fmt::Debug for WildcardRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WildcardRouter")
            .field("middlewares", &self.middlewares.len())
            .field(
                "handlers",
                &self.handlers.iter().map(|h| h.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
