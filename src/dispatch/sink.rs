//! Response sink abstraction.
//!
//! # Responsibilities
//! - Define the capability handlers write responses through
//! - Provide a buffering sink that becomes an axum `Response`
//!
//! # Design Decisions
//! - One status line per response: later status writes are ignored
//! - First body write without a status implies 200 OK

use std::io;

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::Response;

/// Destination for a response: status, headers and body bytes.
pub trait ResponseSink {
    /// Mutable access to the response headers.
    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// Set the response status code.
    fn write_status(&mut self, status: StatusCode);

    /// Append body bytes, returning how many were accepted.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize>;

    /// Signal that this handler does not serve the request.
    fn decline(&mut self) {
        self.write_status(StatusCode::NOT_FOUND);
    }
}

/// Write a 404, with an optional plain-text body.
pub fn write_not_found(sink: &mut dyn ResponseSink, body: Option<&Bytes>) -> io::Result<()> {
    match body {
        Some(body) => {
            let headers = sink.headers_mut();
            headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            );
            headers.insert(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            );
            sink.write_status(StatusCode::NOT_FOUND);
            sink.write(body)?;
        }
        None => sink.write_status(StatusCode::NOT_FOUND),
    }
    Ok(())
}

/// Sink that buffers the whole response in memory.
#[derive(Debug, Default)]
pub struct BufferedSink {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl BufferedSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Status written so far, if any.
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Convert into an axum response. A sink nobody wrote to becomes an empty 200.
    pub fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status.unwrap_or(StatusCode::OK);
        *response.headers_mut() = self.headers;
        response
    }
}

impl ResponseSink for BufferedSink {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn write_status(&mut self, status: StatusCode) {
        if let Some(existing) = self.status {
            tracing::warn!(
                existing = %existing,
                attempted = %status,
                "Ignoring superfluous status write"
            );
            return;
        }
        self.status = Some(status);
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.status.is_none() {
            self.status = Some(StatusCode::OK);
        }
        self.body.extend_from_slice(buf);
        Ok(buf.len())
    }
}
