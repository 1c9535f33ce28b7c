//! Built-in handlers.
//!
//! Each handler answers the requests it owns and declines (404) everything
//! else, so they can be chained in any order behind the router.

pub mod fixed;
pub mod health;
pub mod static_files;

use axum::http::{HeaderValue, StatusCode};

use crate::config::{HandlerConfig, ValidationError};
use crate::dispatch::Handler;

pub use fixed::FixedResponse;
pub use health::HealthCheck;
pub use static_files::StaticDir;

/// Instantiate the handler described by `handlers[index]`.
pub fn from_config(index: usize, config: &HandlerConfig) -> Result<Box<dyn Handler>, ValidationError> {
    let handler: Box<dyn Handler> = match config {
        HandlerConfig::StaticDir { root, strip_prefix } => {
            let handler = StaticDir::new(root.clone());
            match strip_prefix {
                Some(prefix) => Box::new(handler.strip_prefix(prefix.clone())),
                None => Box::new(handler),
            }
        }
        HandlerConfig::Fixed {
            path,
            status,
            body,
            content_type,
        } => {
            let status = StatusCode::from_u16(*status).map_err(|_| ValidationError::InvalidStatus {
                index,
                status: *status,
            })?;
            let mut handler = FixedResponse::new(path.clone(), status, body.clone());
            if let Some(value) = content_type {
                let value = HeaderValue::from_str(value).map_err(|_| {
                    ValidationError::InvalidContentType {
                        index,
                        value: value.clone(),
                    }
                })?;
                handler = handler.content_type(value);
            }
            Box::new(handler)
        }
        HandlerConfig::Health { path } => Box::new(HealthCheck::new(path.clone())),
    };
    Ok(handler)
}
