//! Fallback-chaining HTTP router.
//!
//! A [`WildcardRouter`] is mounted under a path prefix and tries its
//! handlers in order until one of them answers; handlers decline by
//! writing a 404, which never reaches the client unless every handler
//! declined.

pub mod config;
pub mod dispatch;
pub mod handlers;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::schema::RouterConfig;
pub use dispatch::{Handler, ResponseSink, WildcardRouter};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
