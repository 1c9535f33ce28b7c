//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → headers.rs (hardening headers on the real sink)
//!     → Pass to handlers
//! ```
//!
//! Body size limits are enforced by the HTTP mount before dispatch.

pub mod headers;

pub use headers::security_headers;
