//! Security response headers.
//!
//! # Responsibilities
//! - Add hardening headers to every response leaving the router
//!
//! # Design Decisions
//! - Runs as a middleware against the real sink, so the headers survive
//!   every handler attempt and the final 404
//! - Existing values are overwritten; handlers cannot weaken them

use axum::http::{header, HeaderValue};

use crate::dispatch::{Request, ResponseSink};

/// Middleware that sets `nosniff`, `DENY` framing and `no-referrer`.
pub fn security_headers(sink: &mut dyn ResponseSink, _req: &mut Request) {
    let headers = sink.headers_mut();
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("no-referrer"),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::BufferedSink;
    use axum::body::Bytes;

    #[test]
    fn test_sets_headers() {
        let mut req = axum::http::Request::builder()
            .uri("/")
            .body(Bytes::new())
            .unwrap();
        let mut sink = BufferedSink::new();

        security_headers(&mut sink, &mut req);

        assert_eq!(sink.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
        assert_eq!(sink.headers()[header::X_FRAME_OPTIONS], "DENY");
        assert_eq!(sink.headers()[header::REFERRER_POLICY], "no-referrer");
        assert!(sink.status().is_none());
    }
}
