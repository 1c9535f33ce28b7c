//! Handler and middleware capabilities.

use axum::body::Bytes;

use super::sink::ResponseSink;

/// Request as seen by handlers: body fully buffered.
pub type Request = axum::http::Request<Bytes>;

/// Something that may answer a request.
///
/// A handler declines by writing a 404 status (see [`ResponseSink::decline`]);
/// anything else it writes is the final response.
pub trait Handler: Send + Sync {
    fn serve(&self, sink: &mut dyn ResponseSink, req: &Request);

    /// Name used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<F> Handler for F
where
    F: Fn(&mut dyn ResponseSink, &Request) + Send + Sync,
{
    fn serve(&self, sink: &mut dyn ResponseSink, req: &Request) {
        self(sink, req)
    }
}

/// Pre-processing step run against the real sink before any handler.
///
/// Changes it makes to the request are seen by every handler.
pub type Middleware = Box<dyn Fn(&mut dyn ResponseSink, &mut Request) + Send + Sync>;
