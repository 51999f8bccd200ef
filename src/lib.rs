//! # fono
//!
//! The audio streaming subsystem of the fono music-sharing app.
//! Nothing more. Nothing less.
//!
//! ## The contract
//!
//! Upload ingestion validates audio files and writes them under a single
//! media root. The catalog hands out filename tokens. fono turns those
//! tokens back into bytes for browser `<audio>` elements — with full HTTP
//! partial-content semantics, so seeking, resuming, and progressive playback
//! work the way browsers expect.
//!
//! What the collaborators own — fono intentionally ignores:
//!
//! - **Authentication / authorization** — the API gateway in front
//! - **Upload validation** — magic-number and size checks happen at ingest
//! - **Catalog CRUD** — the database never appears here
//! - **Rate limiting and slow clients** — `limit_req` and proxy timeouts
//!
//! What's left for fono — the part that has to be exactly right:
//!
//! - Safe token → path resolution inside the media root
//! - `Range` header parsing with every browser quirk accounted for
//! - 200 / 206 / 416 negotiation with correct headers to the byte
//! - Bounded, backpressured file → socket streaming that stops the moment
//!   the client goes away
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use fono::{MediaLibrary, Server, stream};
//!
//! #[tokio::main]
//! async fn main() {
//!     let library = Arc::new(MediaLibrary::open("uploads").unwrap());
//!     let app = stream::routes(Arc::clone(&library));
//!
//!     Server::bind("0.0.0.0:5000").serve(app).await.unwrap();
//! }
//! ```
//!
//! A seek in the browser issues `Range: bytes=900000-` and aborts the
//! previous request; fono answers `206 Partial Content` with
//! `Content-Range: bytes 900000-999999/1000000` and drops the aborted
//! stream's file handle within one chunk iteration.

mod error;
mod request;
mod response;
mod router;
mod server;

pub mod cors;
pub mod health;
pub mod media;
pub mod range;
pub mod stream;

pub use error::{Error, StreamError};
pub use media::{MediaFile, MediaLibrary};
pub use range::RangeVerdict;
pub use request::Request;
pub use response::{Body, IntoResponse, Response};
pub use router::Router;
pub use server::Server;
