//! Canned response for a single exact path.

use axum::body::Bytes;
use axum::http::{header, HeaderValue, StatusCode};

use crate::dispatch::{Handler, Request, ResponseSink};

#[derive(Debug, Clone)]
pub struct FixedResponse {
    path: String,
    status: StatusCode,
    body: Bytes,
    content_type: Option<HeaderValue>,
}

impl FixedResponse {
    pub fn new(path: impl Into<String>, status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            path: path.into(),
            status,
            body: body.into(),
            content_type: None,
        }
    }

    pub fn content_type(mut self, value: HeaderValue) -> Self {
        self.content_type = Some(value);
        self
    }
}

impl Handler for FixedResponse {
    fn serve(&self, sink: &mut dyn ResponseSink, req: &Request) {
        if req.uri().path() != self.path {
            return sink.decline();
        }
        if let Some(content_type) = &self.content_type {
            sink.headers_mut()
                .insert(header::CONTENT_TYPE, content_type.clone());
        }
        sink.write_status(self.status);
        if !self.body.is_empty() {
            if let Err(e) = sink.write(&self.body) {
                tracing::warn!(path = %self.path, error = %e, "Failed to write fixed response");
            }
        }
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::BufferedSink;

    fn request(path: &str) -> Request {
        axum::http::Request::builder()
            .uri(path)
            .body(Bytes::new())
            .unwrap()
    }

    #[test]
    fn test_exact_path_only() {
        let handler = FixedResponse::new("/about", StatusCode::OK, "about us")
            .content_type(HeaderValue::from_static("text/plain"));

        let mut sink = BufferedSink::new();
        handler.serve(&mut sink, &request("/about"));
        assert_eq!(sink.status(), Some(StatusCode::OK));
        assert_eq!(sink.body(), b"about us");
        assert_eq!(sink.headers()[header::CONTENT_TYPE], "text/plain");

        let mut sink = BufferedSink::new();
        handler.serve(&mut sink, &request("/about/team"));
        assert_eq!(sink.status(), Some(StatusCode::NOT_FOUND));
        assert!(sink.headers().is_empty());
    }

    #[test]
    fn test_empty_body_writes_status_only() {
        let handler = FixedResponse::new("/gone", StatusCode::GONE, "");
        let mut sink = BufferedSink::new();
        handler.serve(&mut sink, &request("/gone"));
        assert_eq!(sink.status(), Some(StatusCode::GONE));
        assert!(sink.body().is_empty());
    }
}
