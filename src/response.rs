//! Outgoing HTTP response type and the [`IntoResponse`] conversion trait.
//!
//! One body type covers both of fono's worlds: small buffered payloads
//! (JSON banners, error text) and file ranges streamed chunk by chunk.
//! Handlers build a [`Response`] and return it. That is the entire job
//! description.

use bytes::Bytes;
use http::{HeaderName, HeaderValue, StatusCode};
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Empty, Full};

/// The response body: boxed so buffered and streamed bodies share one type.
///
/// The error type is `io::Error` because the only fallible body is a file
/// stream; buffered bodies are infallible and erased into the same shape.
pub type Body = BoxBody<Bytes, std::io::Error>;

pub(crate) fn full(bytes: impl Into<Bytes>) -> Body {
    Full::new(bytes.into()).map_err(|never| match never {}).boxed()
}

pub(crate) fn empty() -> Body {
    Empty::new().map_err(|never| match never {}).boxed()
}

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing HTTP response.
///
/// # Shortcuts (200 OK, no custom headers needed)
///
/// ```rust
/// use fono::Response;
///
/// Response::json(br#"{"status":"running"}"#.to_vec());
/// Response::text("ok");
/// Response::status(http::StatusCode::NO_CONTENT);
/// ```
///
/// # Builder (custom status, headers, or a streaming body)
///
/// ```rust
/// use fono::Response;
/// use http::StatusCode;
///
/// Response::builder()
///     .status(StatusCode::RANGE_NOT_SATISFIABLE)
///     .header("content-range", "bytes */1000000")
///     .no_body();
/// ```
pub struct Response {
    pub(crate) status: StatusCode,
    pub(crate) headers: Vec<(HeaderName, HeaderValue)>,
    pub(crate) body: Body,
}

impl Response {
    /// `200 OK` — `application/json`.
    ///
    /// Takes bytes, not a value — hand-built `format!` JSON and serialiser
    /// output land here the same way.
    pub fn json(body: Vec<u8>) -> Self {
        Self::with_content_type("application/json", body)
    }

    /// `200 OK` — `text/plain; charset=utf-8`.
    pub fn text(body: impl Into<String>) -> Self {
        Self::with_content_type("text/plain; charset=utf-8", body.into().into_bytes())
    }

    /// Response with the given status and no body.
    pub fn status(status: StatusCode) -> Self {
        Self { status, headers: Vec::new(), body: empty() }
    }

    /// Builder for responses that need a custom status, extra headers, or a
    /// streaming body.
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder { headers: Vec::new(), status: StatusCode::OK }
    }

    /// Appends a header to an already-built response.
    ///
    /// `name` must be a lowercase static string; a malformed `value` is a
    /// programmer error and panics, same as a malformed route.
    pub fn header(mut self, name: &'static str, value: &str) -> Self {
        self.headers.push((
            HeaderName::from_static(name),
            HeaderValue::from_str(value).expect("invalid header value"),
        ));
        self
    }

    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    /// Unwraps into the underlying `http` response, ready for hyper.
    /// Also the escape hatch integration tests use to inspect the wire shape.
    pub fn into_inner(self) -> http::Response<Body> {
        let mut res = http::Response::new(self.body);
        *res.status_mut() = self.status;
        let headers = res.headers_mut();
        for (name, value) in self.headers {
            headers.append(name, value);
        }
        res
    }

    fn with_content_type(content_type: &'static str, body: Vec<u8>) -> Self {
        Self {
            status: StatusCode::OK,
            headers: vec![(
                HeaderName::from_static("content-type"),
                HeaderValue::from_static(content_type),
            )],
            body: full(body),
        }
    }
}

// ── ResponseBuilder ───────────────────────────────────────────────────────────

/// Fluent builder for [`Response`].
///
/// Obtain via [`Response::builder()`]. Defaults to 200. Terminated by a typed
/// body method — you always know what you're sending.
pub struct ResponseBuilder {
    headers: Vec<(HeaderName, HeaderValue)>,
    status: StatusCode,
}

impl ResponseBuilder {
    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// `name` must be a lowercase static string. Panics on a malformed value,
    /// same contract as [`Response::header`].
    pub fn header(mut self, name: &'static str, value: &str) -> Self {
        self.headers.push((
            HeaderName::from_static(name),
            HeaderValue::from_str(value).expect("invalid header value"),
        ));
        self
    }

    /// Terminate with a JSON body (`application/json`).
    pub fn json(self, body: Vec<u8>) -> Response {
        self.finish("application/json", full(body))
    }

    /// Terminate with a plain-text body (`text/plain; charset=utf-8`).
    pub fn text(self, body: impl Into<String>) -> Response {
        self.finish("text/plain; charset=utf-8", full(body.into().into_bytes()))
    }

    /// Terminate with a prepared streaming body.
    ///
    /// The caller owns content negotiation: `content-type` and
    /// `content-length` headers are expected to already be set, because a
    /// streamed body cannot report its own length.
    pub fn stream(self, body: Body) -> Response {
        Response { status: self.status, headers: self.headers, body }
    }

    /// Terminate with no body (416, preflight, HEAD).
    pub fn no_body(self) -> Response {
        Response { status: self.status, headers: self.headers, body: empty() }
    }

    fn finish(self, content_type: &'static str, body: Body) -> Response {
        let mut headers = vec![(
            HeaderName::from_static("content-type"),
            HeaderValue::from_static(content_type),
        )];
        headers.extend(self.headers);
        Response { status: self.status, headers, body }
    }
}

// ── IntoResponse ──────────────────────────────────────────────────────────────

/// Conversion into an HTTP [`Response`].
///
/// Implemented for the handful of types handlers actually return; fono has
/// no open-ended extractor/responder zoo.
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response {
        self
    }
}

impl IntoResponse for &'static str {
    fn into_response(self) -> Response {
        Response::text(self)
    }
}

impl IntoResponse for String {
    fn into_response(self) -> Response {
        Response::text(self)
    }
}

/// Return a bare status from a handler: `return StatusCode::NOT_FOUND`.
impl IntoResponse for StatusCode {
    fn into_response(self) -> Response {
        Response::status(self)
    }
}
