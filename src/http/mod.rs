//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware layers)
//!     → request.rs (request ID assigned and propagated)
//!     → mount.rs (prefix match, body buffered, dispatch on blocking pool)
//!     → dispatch::WildcardRouter (middlewares, handler chain)
//!     → BufferedSink turned into the axum Response
//! ```

pub mod mount;
pub mod request;
pub mod server;

pub use mount::{mount_to, normalize_prefix, MountError};
pub use request::X_REQUEST_ID;
pub use server::{HttpServer, ServeError};
