//! Liveness endpoint.

use axum::http::{header, HeaderValue, StatusCode};
use serde::Serialize;

use crate::dispatch::{Handler, Request, ResponseSink};

#[derive(Serialize)]
pub struct HealthStatus {
    pub version: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Clone)]
pub struct HealthCheck {
    path: String,
}

impl HealthCheck {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl Handler for HealthCheck {
    fn serve(&self, sink: &mut dyn ResponseSink, req: &Request) {
        if req.uri().path() != self.path {
            return sink.decline();
        }
        let status = HealthStatus {
            version: env!("CARGO_PKG_VERSION"),
            status: "operational",
        };
        let body = match serde_json::to_vec(&status) {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode health status");
                sink.write_status(StatusCode::INTERNAL_SERVER_ERROR);
                return;
            }
        };
        sink.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        sink.write_status(StatusCode::OK);
        if let Err(e) = sink.write(&body) {
            tracing::warn!(error = %e, "Failed to write health status");
        }
    }

    fn name(&self) -> &str {
        "health"
    }
}
