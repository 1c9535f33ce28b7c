//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, limits > 0, status codes)
//! - Check handler paths and content types are usable
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::{HeaderValue, StatusCode};
use thiserror::Error;

use crate::config::schema::{HandlerConfig, RouterConfig};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a socket address")]
    BindAddress(String),

    #[error("observability.metrics_address `{0}` is not a socket address")]
    MetricsAddress(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,

    #[error("limits.max_body_size must be greater than zero")]
    ZeroBodyLimit,

    #[error("handlers[{index}]: path `{path}` must start with `/`")]
    RelativePath { index: usize, path: String },

    #[error("handlers[{index}]: status {status} is not a valid HTTP status")]
    InvalidStatus { index: usize, status: u16 },

    #[error("handlers[{index}]: content type `{value}` is not a valid header value")]
    InvalidContentType { index: usize, value: String },

    #[error("handlers[{index}]: static root is empty")]
    EmptyRoot { index: usize },
}

pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }
    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    if config.limits.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    for (index, handler) in config.handlers.iter().enumerate() {
        validate_handler(index, handler, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_handler(index: usize, handler: &HandlerConfig, errors: &mut Vec<ValidationError>) {
    match handler {
        HandlerConfig::StaticDir { root, strip_prefix } => {
            if root.as_os_str().is_empty() {
                errors.push(ValidationError::EmptyRoot { index });
            }
            if let Some(prefix) = strip_prefix {
                check_path(index, prefix, errors);
            }
        }
        HandlerConfig::Fixed {
            path,
            status,
            content_type,
            ..
        } => {
            check_path(index, path, errors);
            if StatusCode::from_u16(*status).is_err() {
                errors.push(ValidationError::InvalidStatus {
                    index,
                    status: *status,
                });
            }
            if let Some(value) = content_type {
                if HeaderValue::from_str(value).is_err() {
                    errors.push(ValidationError::InvalidContentType {
                        index,
                        value: value.clone(),
                    });
                }
            }
        }
        HandlerConfig::Health { path } => check_path(index, path, errors),
    }
}

fn check_path(index: usize, path: &str, errors: &mut Vec<ValidationError>) {
    if !path.starts_with('/') {
        errors.push(ValidationError::RelativePath {
            index,
            path: path.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&RouterConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = RouterConfig::default();
        config.listener.bind_address = "not an address".into();
        config.timeouts.request_secs = 0;
        config.handlers.push(HandlerConfig::Fixed {
            path: "about".into(),
            status: 1000,
            body: String::new(),
            content_type: Some("text/plain\n".into()),
        });

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::BindAddress("not an address".into()),
                ValidationError::ZeroTimeout,
                ValidationError::RelativePath {
                    index: 0,
                    path: "about".into()
                },
                ValidationError::InvalidStatus {
                    index: 0,
                    status: 1000
                },
                ValidationError::InvalidContentType {
                    index: 0,
                    value: "text/plain\n".into()
                },
            ]
        );
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = RouterConfig::default();
        config.observability.metrics_address = "nowhere".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::MetricsAddress("nowhere".into())]
        );
    }
}
