//! CORS for cross-origin browser players.
//!
//! The React frontend runs on a different origin than this API. For `<audio>`
//! seeking to work there, the browser must be allowed to *send* `Range` and
//! to *read* `Content-Range`, `Accept-Ranges`, and `Content-Length` — by
//! default fetch hides all three. Every `/stream` response carries this set,
//! including 404s and 416s; an error the frontend cannot read is an error it
//! cannot handle.

use http::StatusCode;

use crate::request::Request;
use crate::response::Response;

const ALLOW_ORIGIN: &str = "*";
const ALLOW_METHODS: &str = "GET, HEAD, OPTIONS";
const ALLOW_HEADERS: &str = "Range, Content-Type, Authorization";
const EXPOSE_HEADERS: &str = "Content-Range, Accept-Ranges, Content-Length";

/// Appends the streaming CORS header set to a response.
pub fn apply(res: Response) -> Response {
    res.header("access-control-allow-origin", ALLOW_ORIGIN)
        .header("access-control-allow-methods", ALLOW_METHODS)
        .header("access-control-allow-headers", ALLOW_HEADERS)
        .header("access-control-expose-headers", EXPOSE_HEADERS)
}

/// `OPTIONS /stream/{filename}` — preflight short-circuit.
pub async fn preflight(_req: Request) -> Response {
    apply(Response::status(StatusCode::NO_CONTENT))
}
