//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. No magic, no middleware
//! stack, no reflection. You register a path, you get a handler. That is all.
//!
//! Handlers are stored type-erased: any `async fn(Request) -> impl
//! IntoResponse` (or a closure of the same shape — the usual way to hand a
//! handler its `Arc<MediaLibrary>`) is boxed once at registration and costs
//! one `Arc` clone plus one virtual call per request.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use http::Method;
use matchit::Router as MatchitRouter;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

pub(crate) type BoxedHandler = Arc<dyn Fn(Request) -> BoxFuture + Send + Sync + 'static>;

/// The application router.
///
/// One radix tree per HTTP method. Build it once at startup; pass it to
/// [`Server::serve`](crate::Server::serve). Each registration returns `self`
/// so routes chain naturally.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax — `req.param("name")` retrieves
    /// them. A parameter matches one segment; it never spans a `/`.
    ///
    /// # Panics
    ///
    /// Panics on a malformed or conflicting route. Routes are wired once at
    /// startup, so this fails the process before it can serve anything wrong.
    pub fn on<H, Fut, R>(mut self, method: Method, path: &str, handler: H) -> Self
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse + Send + 'static,
    {
        let handler: BoxedHandler = Arc::new(move |req: Request| -> BoxFuture {
            let fut = handler(req);
            Box::pin(async move { fut.await.into_response() })
        });
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler)
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub fn get<H, Fut, R>(self, path: &str, handler: H) -> Self
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse + Send + 'static,
    {
        self.on(Method::GET, path, handler)
    }

    pub fn head<H, Fut, R>(self, path: &str, handler: H) -> Self
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse + Send + 'static,
    {
        self.on(Method::HEAD, path, handler)
    }

    pub fn options<H, Fut, R>(self, path: &str, handler: H) -> Self
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse + Send + 'static,
    {
        self.on(Method::OPTIONS, path, handler)
    }

    pub(crate) fn lookup(
        &self,
        method: &Method,
        path: &str,
    ) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let tree = self.routes.get(method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched
            .params
            .iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
