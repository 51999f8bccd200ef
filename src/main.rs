//! fono server binary.
//!
//! Configuration comes from the environment and is validated before the
//! socket binds — a service pointed at a missing media root should die
//! loudly at startup, not 404 quietly forever.
//!
//!   FONO_MEDIA_ROOT  directory of uploaded audio files   (default: uploads)
//!   FONO_ADDR        bind address                        (default: 0.0.0.0:5000)
//!
//! Try:
//!   curl -v http://localhost:5000/stream/track.mp3 -H 'Range: bytes=0-1023'
//!   curl -v http://localhost:5000/stream/track.mp3 -H 'Range: bytes=-500'
//!   curl --head http://localhost:5000/stream/track.mp3

use std::env;
use std::sync::Arc;

use fono::{health, stream, MediaLibrary, Request, Response, Server};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let root = env::var("FONO_MEDIA_ROOT").unwrap_or_else(|_| "uploads".to_owned());
    let addr = env::var("FONO_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".to_owned());

    let library = match MediaLibrary::open(&root) {
        Ok(library) => Arc::new(library),
        Err(e) => {
            error!("media root `{root}` unusable: {e}");
            std::process::exit(1);
        }
    };
    info!(media_root = %library.root().display(), "serving uploads");

    let readiness_library = Arc::clone(&library);
    let app = stream::routes(Arc::clone(&library))
        .get("/", banner)
        .get("/healthz", health::liveness)
        .get("/readyz", move |req| {
            health::readiness(Arc::clone(&readiness_library), req)
        });

    if let Err(e) = Server::bind(&addr).serve(app).await {
        error!("server error: {e}");
        std::process::exit(1);
    }
}

// GET / — service banner, same shape the frontend's status page expects.
async fn banner(_req: Request) -> Response {
    Response::json(
        format!(
            r#"{{"service":"fono","status":"running","version":"{}"}}"#,
            env!("CARGO_PKG_VERSION")
        )
        .into_bytes(),
    )
}
