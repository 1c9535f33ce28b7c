//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the wildcard router from configuration
//! - Mount it on an Axum Router
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener and serve until shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{ConfigError, RouterConfig};
use crate::dispatch::WildcardRouter;
use crate::handlers;
use crate::http::mount::mount_to;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::observability::logging::request_log;
use crate::security::security_headers;

#[derive(Debug, Error)]
pub enum ServeError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// HTTP front end serving one mounted wildcard router.
pub struct HttpServer {
    router: Router,
    config: RouterConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RouterConfig) -> Result<Self, ConfigError> {
        let dispatcher = Arc::new(build_dispatcher(&config)?);
        tracing::info!(
            prefix = %config.mount.prefix,
            handlers = dispatcher.handler_count(),
            middlewares = dispatcher.middleware_count(),
            "Wildcard router built"
        );

        let router = Self::build_router(&config, dispatcher);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &RouterConfig, dispatcher: Arc<WildcardRouter>) -> Router {
        mount_to(
            Router::new(),
            &config.mount.prefix,
            dispatcher,
            config.limits.max_body_size,
        )
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(set_request_id_layer())
    }

    /// The fully layered application, for embedding or testing.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Bind the configured listener address.
    pub async fn bind(&self) -> Result<TcpListener, ServeError> {
        let address = &self.config.listener.bind_address;
        TcpListener::bind(address)
            .await
            .map_err(|source| ServeError::Bind {
                address: address.clone(),
                source,
            })
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServeError> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }
}

/// Assemble middlewares and handlers in configuration order.
pub fn build_dispatcher(config: &RouterConfig) -> Result<WildcardRouter, ConfigError> {
    let mut builder = WildcardRouter::builder();
    if config.middleware.request_log {
        builder = builder.use_middleware(request_log);
    }
    if config.middleware.security_headers {
        builder = builder.use_middleware(security_headers);
    }

    let mut errors = Vec::new();
    for (index, handler) in config.handlers.iter().enumerate() {
        match handlers::from_config(index, handler) {
            Ok(handler) => builder = builder.add_boxed_handler(handler),
            Err(e) => errors.push(e),
        }
    }
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors));
    }

    if let Some(body) = &config.mount.not_found_body {
        builder = builder.not_found_body(body.clone());
    }
    Ok(builder.build())
}
