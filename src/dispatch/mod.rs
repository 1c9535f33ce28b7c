//! Fallback dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (buffered body)
//!     → router.rs (run every middleware against the real sink)
//!     → probe.rs (wrap the real sink, one probe per request)
//!     → handler.rs (try each handler in registration order)
//!         claimed  → stop, response already in the sink
//!         declined → reset probe, try next handler
//!     → no claim: 404 forced through the probe
//! ```
//!
//! # Design Decisions
//! - Handlers decline by writing 404; the probe swallows it
//! - Middlewares never see the probe and need no cooperation
//! - Router is frozen after build (no locking while serving)
//! - Serving is synchronous; the HTTP layer offloads it to the blocking pool

pub mod handler;
pub mod probe;
pub mod router;
pub mod sink;

pub use handler::{Handler, Middleware, Request};
pub use probe::ResponseProbe;
pub use router::{Outcome, WildcardRouter, WildcardRouterBuilder};
pub use sink::{BufferedSink, ResponseSink};

#[cfg(test)]
pub(crate) mod test_support {
    use std::io;

    use axum::http::{HeaderMap, StatusCode};

    use super::sink::ResponseSink;

    /// Sink that records every call it receives.
    #[derive(Debug, Default)]
    pub struct RecordingSink {
        pub headers: HeaderMap,
        pub statuses: Vec<StatusCode>,
        pub writes: Vec<Vec<u8>>,
        pub fail_writes: bool,
    }

    impl RecordingSink {
        pub fn body(&self) -> Vec<u8> {
            self.writes.concat()
        }
    }

    impl ResponseSink for RecordingSink {
        fn headers_mut(&mut self) -> &mut HeaderMap {
            &mut self.headers
        }

        fn write_status(&mut self, status: StatusCode) {
            self.statuses.push(status);
        }

        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.fail_writes {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "peer went away"));
            }
            self.writes.push(buf.to_vec());
            Ok(buf.len())
        }
    }
}
