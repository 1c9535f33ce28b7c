//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::fs;
use std::io;

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use tempfile::TempDir;
use wildcard_router::dispatch::{Request, ResponseSink};

/// Sink that records every call it receives.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub headers: HeaderMap,
    pub statuses: Vec<StatusCode>,
    pub writes: Vec<Vec<u8>>,
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
        self.writes.push(buf.to_vec());
        Ok(buf.len())
    }
}

pub fn request(path: &str) -> Request {
    axum::http::Request::builder()
        .uri(path)
        .body(Bytes::new())
        .unwrap()
}

pub fn http_request(path: &str) -> axum::http::Request<Body> {
    axum::http::Request::builder()
        .uri(path)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Small site on disk: `index.html` and `docs/guide.txt`.
pub fn temp_site() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("docs")).unwrap();
    fs::write(dir.path().join("index.html"), "<h1>welcome</h1>").unwrap();
    fs::write(dir.path().join("docs").join("guide.txt"), "read me").unwrap();
    dir
}
