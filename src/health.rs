//! Health-check handlers.
//!
//! | Probe | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? Failure → restart. |
//! | **Readiness** | `/readyz` | Can the pod serve traffic? Failure → pulled from load-balancer. |
//!
//! Readiness is gated on the one dependency fono has: the media root.
//! If the volume holding the uploads unmounts, the pod stops taking traffic
//! instead of answering every stream request with a 500.

use std::sync::Arc;

use http::StatusCode;

use crate::media::MediaLibrary;
use crate::request::Request;
use crate::response::Response;

/// Liveness probe handler.
///
/// Always returns `200 OK` with body `"ok"`. If the process can respond to
/// HTTP at all, it is alive — this handler intentionally has no dependencies.
pub async fn liveness(_req: Request) -> Response {
    Response::text("ok")
}

/// Readiness probe handler.
///
/// `200 OK` while the media root is still a readable directory,
/// `503 Service Unavailable` otherwise.
pub async fn readiness(library: Arc<MediaLibrary>, _req: Request) -> Response {
    match tokio::fs::metadata(library.root()).await {
        Ok(meta) if meta.is_dir() => Response::text("ready"),
        _ => Response::status(StatusCode::SERVICE_UNAVAILABLE),
    }
}
