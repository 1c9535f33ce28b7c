//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem
//! - Log every request that reaches the router
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - `RUST_LOG` wins over the configured level

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::dispatch::{Request, ResponseSink};
use crate::http::X_REQUEST_ID;

/// Install the global subscriber. `default_level` applies when `RUST_LOG` is unset.
pub fn init_tracing(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("wildcard_router={default_level},tower_http={default_level}").into()
    });
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Middleware emitting one event per dispatched request.
pub fn request_log(_sink: &mut dyn ResponseSink, req: &mut Request) {
    let request_id = req
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info!(
        request_id = %request_id,
        method = %req.method(),
        path = %req.uri().path(),
        body_len = req.body().len(),
        "Dispatching request"
    );
}
