//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the router process.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request size limits.
    pub limits: LimitsConfig,

    /// Where the router is mounted.
    pub mount: MountConfig,

    /// Built-in middlewares to enable.
    pub middleware: MiddlewareConfig,

    /// Candidate handlers, tried in the order listed.
    pub handlers: Vec<HandlerConfig>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum request body buffered before dispatch, in bytes.
    pub max_body_size: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Mount point configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MountConfig {
    /// Path prefix the router receives requests for.
    pub prefix: String,

    /// Body of the final 404; empty response when unset.
    pub not_found_body: Option<String>,
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            prefix: "/".to_string(),
            not_found_body: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MiddlewareConfig {
    /// Log every request reaching the router.
    pub request_log: bool,

    /// Add security response headers.
    pub security_headers: bool,
}

impl Default for MiddlewareConfig {
    fn default() -> Self {
        Self {
            request_log: true,
            security_headers: true,
        }
    }
}

/// One candidate handler.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HandlerConfig {
    /// Serve files from a directory.
    StaticDir {
        root: PathBuf,
        /// Leading path removed before resolving against `root`.
        #[serde(default)]
        strip_prefix: Option<String>,
    },

    /// Canned response for one exact path.
    Fixed {
        path: String,
        #[serde(default = "default_fixed_status")]
        status: u16,
        #[serde(default)]
        body: String,
        #[serde(default)]
        content_type: Option<String>,
    },

    /// Liveness document.
    Health {
        #[serde(default = "default_health_path")]
        path: String,
    },
}

fn default_fixed_status() -> u16 {
    200
}

fn default_health_path() -> String {
    "/health".to_string()
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
