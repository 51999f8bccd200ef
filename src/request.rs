//! Incoming HTTP request type.
//!
//! Holds only the request head. fono is a read path — `GET` and `HEAD`
//! carry no body worth reading, so the body half of the hyper request is
//! dropped at dispatch and never buffered.

use std::collections::HashMap;

/// An incoming HTTP request.
pub struct Request {
    parts: http::request::Parts,
    params: HashMap<String, String>,
}

impl Request {
    /// Assembles a request from its head and matched route parameters.
    ///
    /// `#[doc(hidden)]` rather than `pub(crate)` so integration tests can
    /// drive handlers directly without a socket.
    #[doc(hidden)]
    pub fn from_parts(parts: http::request::Parts, params: HashMap<String, String>) -> Self {
        Self { parts, params }
    }

    pub fn method(&self) -> &http::Method {
        &self.parts.method
    }

    pub fn path(&self) -> &str {
        self.parts.uri.path()
    }

    pub fn headers(&self) -> &http::HeaderMap {
        &self.parts.headers
    }

    /// Case-insensitive header lookup. Non-UTF-8 values read as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.parts.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/stream/{filename}`, `req.param("filename")` on
    /// `/stream/track.mp3` returns `Some("track.mp3")`. The value is exactly
    /// the URL segment — still percent-encoded, never decoded here.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}
