//! The `/stream/{filename}` endpoint: content negotiation and the byte pipe.
//!
//! Per request: resolve the token, read the file length, judge the `Range`
//! header, pick 200 / 206 / 416, then stream exactly the negotiated span.
//! Each request owns its file handle for its whole life; two listeners
//! scrubbing through the same track never share state.

use std::io::SeekFrom;
use std::path::Path;
use std::sync::Arc;

use futures_util::TryStreamExt;
use http::{Method, StatusCode};
use http_body_util::{BodyExt, StreamBody};
use hyper::body::Frame;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio_util::io::ReaderStream;
use tracing::warn;

use crate::cors;
use crate::error::StreamError;
use crate::media::{self, MediaLibrary};
use crate::range::{self, RangeVerdict};
use crate::request::Request;
use crate::response::{Body, IntoResponse, Response};
use crate::router::Router;

/// Read buffer per in-flight stream. Memory use is O(this), independent of
/// file size or span length.
const CHUNK_SIZE: usize = 64 * 1024;

/// The streaming route table: `GET`, `HEAD`, and CORS preflight.
pub fn routes(library: Arc<MediaLibrary>) -> Router {
    let get_library = Arc::clone(&library);
    Router::new()
        .get("/stream/{filename}", move |req| {
            serve(Arc::clone(&get_library), req)
        })
        .head("/stream/{filename}", move |req| {
            serve(Arc::clone(&library), req)
        })
        .options("/stream/{filename}", cors::preflight)
}

/// Serves one stream request. `HEAD` takes the same path as `GET` and peels
/// off just before the file is opened, so its headers can never drift from
/// what the `GET` would send.
pub async fn serve(library: Arc<MediaLibrary>, req: Request) -> Response {
    let token = req.param("filename").unwrap_or_default();
    let file = match library.resolve(token).await {
        Ok(file) => file,
        Err(e) => return cors::apply(e.into_response()),
    };

    let verdict = range::parse(req.header("range"), file.len);
    let Negotiated { status, headers, span } =
        negotiate(verdict, file.len, media::content_type(&file.path));

    let mut builder = Response::builder()
        .status(status)
        .header("x-content-type-options", "nosniff");
    for (name, value) in headers {
        builder = builder.header(name, &value);
    }
    if matches!(status, StatusCode::OK | StatusCode::PARTIAL_CONTENT) {
        builder = builder.header("cache-control", "public, max-age=86400");
    }

    let response = if req.method() == Method::HEAD {
        builder.no_body()
    } else {
        match span {
            None => builder.no_body(),
            Some((start, end)) => match open_range(&file.path, start, end).await {
                Ok(body) => builder.stream(body),
                // Nothing is on the wire yet; a clean 500 is still possible.
                Err(e) => return cors::apply(StreamError::Io(e).into_response()),
            },
        }
    };
    cors::apply(response)
}

// ── Content negotiation ───────────────────────────────────────────────────────

/// The negotiator's output: status, wire headers, and the inclusive byte span
/// to stream (`None` means an intentionally empty body — 416, or a
/// zero-length file).
///
/// Pure computation over already-known metadata; unit-tested without touching
/// a filesystem.
#[derive(Debug, Eq, PartialEq)]
struct Negotiated {
    status: StatusCode,
    headers: Vec<(&'static str, String)>,
    span: Option<(u64, u64)>,
}

fn negotiate(verdict: RangeVerdict, total: u64, content_type: &'static str) -> Negotiated {
    match verdict {
        RangeVerdict::NoRange => Negotiated {
            status: StatusCode::OK,
            headers: vec![
                ("content-type", content_type.to_owned()),
                ("content-length", total.to_string()),
                ("accept-ranges", "bytes".to_owned()),
            ],
            span: (total > 0).then(|| (0, total - 1)),
        },
        RangeVerdict::Satisfiable { start, end } => Negotiated {
            status: StatusCode::PARTIAL_CONTENT,
            headers: vec![
                ("content-type", content_type.to_owned()),
                ("content-range", format!("bytes {start}-{end}/{total}")),
                ("content-length", (end - start + 1).to_string()),
                ("accept-ranges", "bytes".to_owned()),
            ],
            span: Some((start, end)),
        },
        RangeVerdict::Unsatisfiable => Negotiated {
            status: StatusCode::RANGE_NOT_SATISFIABLE,
            headers: vec![("content-range", format!("bytes */{total}"))],
            span: None,
        },
    }
}

// ── Byte stream pipe ──────────────────────────────────────────────────────────

/// Opens `path` and prepares a body yielding exactly the inclusive span
/// `start..=end`, one bounded chunk at a time.
///
/// The body owns the file handle. hyper drops the body when the client
/// disconnects, which drops the handle within one chunk iteration — abort
/// cleanup is ownership, not bookkeeping, and no copy continues in the
/// background. A read error after this point terminates the stream and is
/// logged; the committed status line cannot be rewritten.
async fn open_range(path: &Path, start: u64, end: u64) -> std::io::Result<Body> {
    let mut file = File::open(path).await?;
    if start > 0 {
        file.seek(SeekFrom::Start(start)).await?;
    }
    let reader = file.take(end - start + 1);
    let frames = ReaderStream::with_capacity(reader, CHUNK_SIZE)
        .inspect_err(|e| warn!("read failed mid-stream: {e}"))
        .map_ok(Frame::data);
    Ok(StreamBody::new(frames).boxed())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header<'a>(n: &'a Negotiated, name: &str) -> Option<&'a str> {
        n.headers
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn no_range_negotiates_200_with_full_length() {
        let n = negotiate(RangeVerdict::NoRange, 1000, "audio/mpeg");
        assert_eq!(n.status, StatusCode::OK);
        assert_eq!(header(&n, "content-length"), Some("1000"));
        assert_eq!(header(&n, "accept-ranges"), Some("bytes"));
        assert_eq!(header(&n, "content-type"), Some("audio/mpeg"));
        assert_eq!(header(&n, "content-range"), None);
        assert_eq!(n.span, Some((0, 999)));
    }

    #[test]
    fn satisfiable_negotiates_206_with_content_range() {
        let n = negotiate(
            RangeVerdict::Satisfiable { start: 500, end: 999 },
            1000,
            "audio/flac",
        );
        assert_eq!(n.status, StatusCode::PARTIAL_CONTENT);
        assert_eq!(header(&n, "content-range"), Some("bytes 500-999/1000"));
        assert_eq!(header(&n, "content-length"), Some("500"));
        assert_eq!(n.span, Some((500, 999)));
    }

    #[test]
    fn one_byte_span_has_length_one() {
        let n = negotiate(
            RangeVerdict::Satisfiable { start: 0, end: 0 },
            1000,
            "audio/mpeg",
        );
        assert_eq!(header(&n, "content-length"), Some("1"));
        assert_eq!(header(&n, "content-range"), Some("bytes 0-0/1000"));
    }

    #[test]
    fn unsatisfiable_negotiates_416_with_star_range_and_no_span() {
        let n = negotiate(RangeVerdict::Unsatisfiable, 1_000_000, "audio/mpeg");
        assert_eq!(n.status, StatusCode::RANGE_NOT_SATISFIABLE);
        assert_eq!(header(&n, "content-range"), Some("bytes */1000000"));
        assert_eq!(header(&n, "content-length"), None);
        assert_eq!(n.span, None);
    }

    #[test]
    fn empty_file_without_range_gets_200_and_empty_span() {
        let n = negotiate(RangeVerdict::NoRange, 0, "audio/wav");
        assert_eq!(n.status, StatusCode::OK);
        assert_eq!(header(&n, "content-length"), Some("0"));
        assert_eq!(n.span, None);
    }
}
