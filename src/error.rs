//! Error types and the responder that turns them into HTTP.

use http::StatusCode;
use thiserror::Error;
use tracing::error;

use crate::response::{IntoResponse, Response};

/// The error type returned by fono's infrastructure operations.
///
/// Streaming failures (missing file, bad range) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// what can go wrong before any request exists: binding to a port or
/// accepting a connection.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures while resolving a filename token or opening its file.
///
/// `ClientAborted` has no variant here on purpose — a vanished client is not
/// an error, it is the normal end of a seek, and it is handled where it
/// happens: the body stream is dropped and the file handle with it. Likewise
/// an unparseable `Range` header never becomes an error; it degrades to a
/// full-file response in [`range::parse`](crate::range::parse).
#[derive(Debug, Error)]
pub enum StreamError {
    /// The token was empty, suspicious, or did not resolve to a regular file
    /// under the media root. Deliberately carries no path detail.
    #[error("media file not found")]
    NotFound,

    /// Filesystem fault after the token validated (permissions, disk).
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Maps stream failures to client responses.
///
/// The body never echoes paths, tokens, or OS error strings — those go to the
/// log, the client gets the minimum it needs to act on.
impl IntoResponse for StreamError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => Response::builder()
                .status(StatusCode::NOT_FOUND)
                .text("File not found"),
            Self::Io(e) => {
                error!("stream failed before headers: {e}");
                Response::builder()
                    .status(StatusCode::INTERNAL_SERVER_ERROR)
                    .text("Internal server error")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404_with_safe_body() {
        let res = StreamError::NotFound.into_response().into_inner();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn io_fault_maps_to_500_without_os_detail() {
        let e = StreamError::Io(std::io::Error::other("/srv/media/secret.mp3 exploded"));
        let res = e.into_response().into_inner();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
