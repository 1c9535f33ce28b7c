//! Static file handler.
//!
//! # Responsibilities
//! - Map the request path onto a directory
//! - Answer GET/HEAD with the file contents
//! - Decline for anything it cannot find, so later handlers get a chance
//!
//! # Design Decisions
//! - Only plain path components are accepted (no `..`, no absolute paths)
//! - Directory requests fall back to `index.html`
//! - Read errors other than "not found" are answered with 500

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use axum::http::{header, HeaderValue, Method, StatusCode};

use crate::dispatch::{Handler, Request, ResponseSink};

const INDEX_FILE: &str = "index.html";

/// Serves files below `root`.
#[derive(Debug, Clone)]
pub struct StaticDir {
    root: PathBuf,
    strip_prefix: String,
}

impl StaticDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            strip_prefix: String::new(),
        }
    }

    /// Remove `prefix` from the request path before resolving it.
    pub fn strip_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.strip_prefix = prefix.into().trim_end_matches('/').to_string();
        self
    }

    /// Resolve a request path to a file path, or `None` if it escapes `root`.
    fn resolve(&self, request_path: &str) -> Option<PathBuf> {
        let relative = request_path.strip_prefix(self.strip_prefix.as_str())?;
        if !self.strip_prefix.is_empty() && !relative.is_empty() && !relative.starts_with('/') {
            // "/assetsfoo" does not live under "/assets"
            return None;
        }

        let mut path = self.root.clone();
        for component in Path::new(relative.trim_start_matches('/')).components() {
            match component {
                Component::Normal(part) => path.push(part),
                Component::CurDir => {}
                _ => return None,
            }
        }
        if relative.is_empty() || relative.ends_with('/') || path.is_dir() {
            path.push(INDEX_FILE);
        }
        Some(path)
    }
}

impl Handler for StaticDir {
    fn serve(&self, sink: &mut dyn ResponseSink, req: &Request) {
        if req.method() != Method::GET && req.method() != Method::HEAD {
            return sink.decline();
        }
        let Some(path) = self.resolve(req.uri().path()) else {
            return sink.decline();
        };

        let contents = match fs::read(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return sink.decline(),
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Failed to read static file");
                sink.write_status(StatusCode::INTERNAL_SERVER_ERROR);
                return;
            }
        };

        let headers = sink.headers_mut();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(content_type_for(&path)),
        );
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(contents.len()));
        sink.write_status(StatusCode::OK);
        if req.method() == Method::GET {
            if let Err(e) = sink.write(&contents) {
                tracing::warn!(path = %path.display(), error = %e, "Failed to write static file");
            }
        }
    }

    fn name(&self) -> &str {
        "static_dir"
    }
}

fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match extension.as_deref() {
        Some("html") | Some("htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") | Some("mjs") => "text/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("txt") => "text/plain; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("ico") => "image/x-icon",
        Some("wasm") => "application/wasm",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::BufferedSink;
    use axum::body::Bytes;

    fn site() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("css")).unwrap();
        fs::write(dir.path().join("index.html"), "<h1>home</h1>").unwrap();
        fs::write(dir.path().join("css").join("main.css"), "body {}").unwrap();
        dir
    }

    fn request(method: Method, path: &str) -> Request {
        axum::http::Request::builder()
            .method(method)
            .uri(path)
            .body(Bytes::new())
            .unwrap()
    }

    fn serve(handler: &StaticDir, method: Method, path: &str) -> BufferedSink {
        let mut sink = BufferedSink::new();
        handler.serve(&mut sink, &request(method, path));
        sink
    }

    #[test]
    fn test_serves_file_with_content_type() {
        let dir = site();
        let handler = StaticDir::new(dir.path()).strip_prefix("/assets/");

        let sink = serve(&handler, Method::GET, "/assets/css/main.css");
        assert_eq!(sink.status(), Some(StatusCode::OK));
        assert_eq!(sink.body(), b"body {}");
        assert_eq!(sink.headers()[header::CONTENT_TYPE], "text/css; charset=utf-8");
    }

    #[test]
    fn test_directory_serves_index() {
        let dir = site();
        let handler = StaticDir::new(dir.path());

        let sink = serve(&handler, Method::GET, "/");
        assert_eq!(sink.body(), b"<h1>home</h1>");
    }

    #[test]
    fn test_head_has_no_body() {
        let dir = site();
        let handler = StaticDir::new(dir.path());

        let sink = serve(&handler, Method::HEAD, "/index.html");
        assert_eq!(sink.status(), Some(StatusCode::OK));
        assert!(sink.body().is_empty());
        assert_eq!(sink.headers()[header::CONTENT_LENGTH], "13");
    }

    #[test]
    fn test_declines_missing_and_escaping_paths() {
        let dir = site();
        let handler = StaticDir::new(dir.path()).strip_prefix("/assets");

        for path in ["/assets/nope.txt", "/assets/../secret", "/other/index.html", "/assetsx"] {
            let sink = serve(&handler, Method::GET, path);
            assert_eq!(sink.status(), Some(StatusCode::NOT_FOUND), "path {path}");
        }
    }

    #[test]
    fn test_declines_other_methods() {
        let dir = site();
        let handler = StaticDir::new(dir.path());

        let sink = serve(&handler, Method::POST, "/index.html");
        assert_eq!(sink.status(), Some(StatusCode::NOT_FOUND));
    }
}
