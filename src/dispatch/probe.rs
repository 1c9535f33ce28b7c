//! Response probe: detects whether a handler claimed the request.
//!
//! # Responsibilities
//! - Forward status, header and body writes to the real sink
//! - Swallow a 404 status and any body written after it
//! - Record the last status so the router can tell claim from decline
//! - Restore a clean slate between handler attempts
//!
//! # Design Decisions
//! - Borrows the real sink; one probe per request
//! - Headers are snapshotted when the probe is created (after middlewares)
//!   and restored on reset, so a declining handler leaks no headers (its
//!   `Content-Type` included) while middleware headers survive untouched

use std::io;

use axum::http::{HeaderMap, StatusCode};

use super::sink::ResponseSink;

const NOT_FOUND: u16 = StatusCode::NOT_FOUND.as_u16();

/// Decorator around a [`ResponseSink`] used for one dispatch.
pub struct ResponseProbe<'a> {
    inner: &'a mut dyn ResponseSink,
    /// Last status observed since the last reset, 0 when unset.
    status: u16,
    skip_not_found_check: bool,
    baseline_headers: HeaderMap,
}

impl<'a> ResponseProbe<'a> {
    pub fn new(inner: &'a mut dyn ResponseSink) -> Self {
        let baseline_headers = inner.headers_mut().clone();
        Self {
            inner,
            status: 0,
            skip_not_found_check: false,
            baseline_headers,
        }
    }

    /// Last observed status code, 0 if none was set.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Let a 404 status and its body through to the real sink.
    pub fn set_skip_not_found_check(&mut self, skip: bool) {
        self.skip_not_found_check = skip;
    }

    /// True once a handler has produced anything other than a 404.
    pub fn claimed(&self) -> bool {
        self.status != 0 && self.status != NOT_FOUND
    }

    /// Forget everything the previous handler attempt did.
    pub fn reset(&mut self) {
        self.skip_not_found_check = false;
        *self.inner.headers_mut() = self.baseline_headers.clone();
        self.status = 0;
    }

    fn passes_through(&self, status: u16) -> bool {
        self.skip_not_found_check || status != NOT_FOUND
    }
}

impl ResponseSink for ResponseProbe<'_> {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        self.inner.headers_mut()
    }

    fn write_status(&mut self, status: StatusCode) {
        if self.passes_through(status.as_u16()) {
            self.inner.write_status(status);
        }
        self.status = status.as_u16();
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.passes_through(self.status) {
            return Ok(0);
        }
        if self.status == 0 {
            self.status = StatusCode::OK.as_u16();
        }
        self.inner.write(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::test_support::RecordingSink;
    use axum::http::{header, HeaderValue};

    #[test]
    fn test_not_found_is_swallowed() {
        let mut sink = RecordingSink::default();
        let mut probe = ResponseProbe::new(&mut sink);

        probe.write_status(StatusCode::NOT_FOUND);
        assert_eq!(probe.write(b"nothing here").unwrap(), 0);
        assert_eq!(probe.status(), 404);
        assert!(!probe.claimed());

        assert!(sink.statuses.is_empty());
        assert!(sink.writes.is_empty());
    }

    #[test]
    fn test_other_statuses_forwarded() {
        let mut sink = RecordingSink::default();
        let mut probe = ResponseProbe::new(&mut sink);

        probe.write_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(probe.claimed());
        assert_eq!(sink.statuses, vec![StatusCode::INTERNAL_SERVER_ERROR]);
    }

    #[test]
    fn test_write_without_status_claims_as_ok() {
        let mut sink = RecordingSink::default();
        let mut probe = ResponseProbe::new(&mut sink);

        assert_eq!(probe.write(b"ok").unwrap(), 2);
        assert_eq!(probe.status(), 200);
        assert!(probe.claimed());
        assert_eq!(sink.body(), b"ok");
    }

    #[test]
    fn test_write_keeps_specific_status() {
        let mut sink = RecordingSink::default();
        let mut probe = ResponseProbe::new(&mut sink);

        probe.write_status(StatusCode::CREATED);
        probe.write(b"made").unwrap();
        assert_eq!(probe.status(), 201);
    }

    #[test]
    fn test_skip_lets_not_found_through() {
        let mut sink = RecordingSink::default();
        let mut probe = ResponseProbe::new(&mut sink);

        probe.set_skip_not_found_check(true);
        probe.write_status(StatusCode::NOT_FOUND);
        assert_eq!(probe.write(b"gone").unwrap(), 4);

        assert_eq!(sink.statuses, vec![StatusCode::NOT_FOUND]);
        assert_eq!(sink.body(), b"gone");
    }

    #[test]
    fn test_reset_clears_attempt_state() {
        let mut sink = RecordingSink::default();
        sink.headers
            .insert("x-middleware", HeaderValue::from_static("kept"));
        let mut probe = ResponseProbe::new(&mut sink);

        probe
            .headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static("text/html"));
        probe
            .headers_mut()
            .insert("x-attempt", HeaderValue::from_static("leaked"));
        probe.set_skip_not_found_check(true);
        probe.write_status(StatusCode::NOT_FOUND);

        probe.reset();
        assert_eq!(probe.status(), 0);
        assert!(!probe.claimed());

        // Skip flag is cleared, so a fresh 404 is swallowed again.
        probe.write_status(StatusCode::NOT_FOUND);
        assert_eq!(sink.statuses, vec![StatusCode::NOT_FOUND]);

        assert!(sink.headers.get(header::CONTENT_TYPE).is_none());
        assert!(sink.headers.get("x-attempt").is_none());
        assert_eq!(sink.headers["x-middleware"], "kept");
    }

    #[test]
    fn test_reset_keeps_baseline_content_type() {
        let mut sink = RecordingSink::default();
        sink.headers
            .insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        let mut probe = ResponseProbe::new(&mut sink);

        probe
            .headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static("text/html"));
        probe.decline();
        probe.reset();

        assert_eq!(sink.headers[header::CONTENT_TYPE], "text/plain");
    }

    #[test]
    fn test_write_error_propagates() {
        let mut sink = RecordingSink {
            fail_writes: true,
            ..Default::default()
        };
        let mut probe = ResponseProbe::new(&mut sink);

        let err = probe.write(b"data").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
