//! Mounting a `WildcardRouter` into an axum `Router`.
//!
//! # Responsibilities
//! - Normalize the mount prefix
//! - Register the router for the prefix and everything below it
//! - Buffer the request body and run dispatch off the async workers
//!
//! # Design Decisions
//! - Handlers are synchronous and may block (file reads), so dispatch runs
//!   on Tokio's blocking pool
//! - Bodies over the configured limit are rejected before any handler runs

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use thiserror::Error;

use crate::dispatch::{BufferedSink, WildcardRouter};
use crate::observability::metrics;

#[derive(Debug, Error)]
pub enum MountError {
    #[error("dispatch task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Clone)]
struct MountState {
    router: Arc<WildcardRouter>,
    max_body_size: usize,
}

/// `"/" + prefix` with surrounding slashes trimmed.
pub fn normalize_prefix(prefix: &str) -> String {
    format!("/{}", prefix.trim_matches('/'))
}

/// Register `router` on `app` for `prefix` and every path below it.
pub fn mount_to(
    app: Router,
    prefix: &str,
    router: Arc<WildcardRouter>,
    max_body_size: usize,
) -> Router {
    let prefix = normalize_prefix(prefix);
    let state = MountState {
        router,
        max_body_size,
    };

    let mounted = if prefix == "/" {
        Router::new()
            .route("/", any(dispatch_handler))
            .route("/{*rest}", any(dispatch_handler))
    } else {
        // The catch-all never matches an empty segment, so `prefix/` is listed too.
        Router::new()
            .route(&prefix, any(dispatch_handler))
            .route(&format!("{prefix}/"), any(dispatch_handler))
            .route(&format!("{prefix}/{{*rest}}"), any(dispatch_handler))
    };

    tracing::debug!(prefix = %prefix, "Mounted wildcard router");
    app.merge(mounted.with_state(state))
}

async fn dispatch_handler(State(state): State<MountState>, request: Request) -> Response {
    let start_time = Instant::now();
    let (parts, body) = request.into_parts();
    let body = match axum::body::to_bytes(body, state.max_body_size).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(path = %parts.uri.path(), error = %e, "Request body rejected");
            return (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large").into_response();
        }
    };
    let mut request = axum::http::Request::from_parts(parts, body);

    let router = state.router.clone();
    let joined = tokio::task::spawn_blocking(move || {
        let mut sink = BufferedSink::new();
        let outcome = router.serve(&mut sink, &mut request);
        (outcome, sink)
    })
    .await
    .map_err(MountError::from);

    match joined {
        Ok((outcome, sink)) => {
            metrics::record_dispatch(&outcome, start_time);
            sink.into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Dispatch failed");
            metrics::record_dispatch_failure();
            let mut response = Response::new(Body::from("Internal Server Error"));
            *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            response
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_prefix() {
        assert_eq!(normalize_prefix(""), "/");
        assert_eq!(normalize_prefix("/"), "/");
        assert_eq!(normalize_prefix("assets"), "/assets");
        assert_eq!(normalize_prefix("/assets/"), "/assets");
        assert_eq!(normalize_prefix("//api/v1//"), "/api/v1");
    }
}
