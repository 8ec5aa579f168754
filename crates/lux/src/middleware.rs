//! The pre-dispatch middleware chain.
//!
//! Middleware runs in registration order before a route is selected. Each one either lets
//! the request through or rejects it; the first rejection ends the chain, and neither the
//! remaining middleware, the route matching nor any handler runs.

use crate::error::BoxError;
use crate::request::RequestContext;
use crate::writer::ResponseWriter;
use lux_event::Response;
use std::error::Error;

pub type MiddlewareResult = Result<(), Rejection>;

pub trait Middleware: Send + Sync {
    fn on_request(&self, req: &mut RequestContext<'_>) -> MiddlewareResult;
}

/// Why a middleware stopped the request.
#[derive(Debug)]
pub enum Rejection {
    /// Answered with `500 Internal Server Error` and the error message as body.
    Failed(BoxError),
    /// Answered with this response as is.
    Respond(Response),
}

impl Rejection {
    pub fn failed(err: impl Into<BoxError>) -> Self {
        Self::Failed(err.into())
    }

    pub fn respond(response: Response) -> Self {
        Self::Respond(response)
    }
}

impl<E> From<E> for Rejection
where
    E: Error + Send + Sync + 'static,
{
    fn from(err: E) -> Self {
        Self::Failed(Box::new(err))
    }
}

/// Middleware in registration order.
#[derive(Default)]
pub struct Middlewares {
    inner: Vec<Box<dyn Middleware>>,
}

impl Middleware for Middlewares {
    fn on_request(&self, req: &mut RequestContext<'_>) -> MiddlewareResult {
        for middleware in &self.inner {
            middleware.on_request(req)?;
        }
        Ok(())
    }
}

impl Middlewares {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_last<M: Middleware + 'static>(&mut self, middleware: M) {
        self.inner.push(Box::new(middleware));
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl std::fmt::Debug for Middlewares {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Middlewares").field("len", &self.inner.len()).finish()
    }
}

/// Middleware built from a function over the request context.
pub struct FnMiddleware<F> {
    f: F,
}

impl<F> std::fmt::Debug for FnMiddleware<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnMiddleware").finish_non_exhaustive()
    }
}

/// Adapts `Fn(&mut RequestContext) -> Result<(), E>` where the error converts into a [`Rejection`].
pub fn middleware_fn<F, E>(f: F) -> FnMiddleware<F>
where
    F: Fn(&mut RequestContext<'_>) -> Result<(), E> + Send + Sync,
    E: Into<Rejection>,
{
    FnMiddleware { f }
}

impl<F, E> Middleware for FnMiddleware<F>
where
    F: Fn(&mut RequestContext<'_>) -> Result<(), E> + Send + Sync,
    E: Into<Rejection>,
{
    fn on_request(&self, req: &mut RequestContext<'_>) -> MiddlewareResult {
        (self.f)(req).map_err(Into::into)
    }
}

/// Middleware built from a function writing to a [`ResponseWriter`].
pub struct WriterMiddleware<F> {
    f: F,
}

impl<F> std::fmt::Debug for WriterMiddleware<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriterMiddleware").finish_non_exhaustive()
    }
}

/// Adapts `Fn(&mut ResponseWriter, &RequestContext)`.
///
/// Writing a status or any body bytes rejects the request with what was written. Headers
/// alone do not count as a response: when neither a status nor a body was written they are
/// discarded and the request continues.
pub fn writer_middleware_fn<F>(f: F) -> WriterMiddleware<F>
where
    F: Fn(&mut ResponseWriter, &RequestContext<'_>) + Send + Sync,
{
    WriterMiddleware { f }
}

impl<F> Middleware for WriterMiddleware<F>
where
    F: Fn(&mut ResponseWriter, &RequestContext<'_>) + Send + Sync,
{
    fn on_request(&self, req: &mut RequestContext<'_>) -> MiddlewareResult {
        let mut writer = ResponseWriter::new();
        (self.f)(&mut writer, req);

        if writer.is_written() { Err(Rejection::Respond(writer.into_response())) } else { Ok(()) }
    }
}

#[cfg(test)]
mod tests {
    use super::{middleware_fn, writer_middleware_fn, Middleware, Middlewares, Rejection};
    use crate::request::RequestContext;
    use crate::writer::ResponseWriter;
    use http::{HeaderValue, StatusCode};
    use lux_event::Request;
    use std::io::{self, Write};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Clone, Debug, PartialEq)]
    struct Trace(String);

    fn annotate(req: &mut RequestContext<'_>) -> Result<(), Rejection> {
        let trace = req.header("x-trace").unwrap_or("none").to_string();
        req.extensions_mut().insert(Trace(trace));
        Ok(())
    }

    fn deny(_req: &mut RequestContext<'_>) -> Result<(), io::Error> {
        Err(io::Error::other("denied"))
    }

    fn counting(counter: Arc<AtomicUsize>) -> impl Middleware {
        middleware_fn(move |_req: &mut RequestContext<'_>| -> Result<(), Rejection> {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }

    #[test]
    fn test_chain_runs_in_order_and_annotates() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut middlewares = Middlewares::new();
        middlewares.add_last(middleware_fn(annotate));
        middlewares.add_last(counting(Arc::clone(&counter)));

        let request = Request::builder().header("X-Trace", "t-1").build().unwrap();
        let mut context = RequestContext::new(&request);

        middlewares.on_request(&mut context).unwrap();

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(context.extensions().get::<Trace>(), Some(&Trace("t-1".into())));
    }

    #[test]
    fn test_rejection_stops_the_chain() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut middlewares = Middlewares::new();
        middlewares.add_last(middleware_fn(deny));
        middlewares.add_last(counting(Arc::clone(&counter)));

        let request = Request::builder().build().unwrap();
        let result = middlewares.on_request(&mut RequestContext::new(&request));

        assert!(matches!(result, Err(Rejection::Failed(ref err)) if err.to_string() == "denied"));
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_writer_middleware() {
        fn noop(_writer: &mut ResponseWriter, _req: &RequestContext<'_>) {}

        fn headers_only(writer: &mut ResponseWriter, _req: &RequestContext<'_>) {
            writer.headers_mut().insert("x-seen", HeaderValue::from_static("1"));
        }

        fn reject(writer: &mut ResponseWriter, _req: &RequestContext<'_>) {
            writer.write_status(StatusCode::UNAUTHORIZED);
            writer.write_all(b"\"error\"").unwrap();
        }

        let request = Request::builder().build().unwrap();

        writer_middleware_fn(noop).on_request(&mut RequestContext::new(&request)).unwrap();
        writer_middleware_fn(headers_only).on_request(&mut RequestContext::new(&request)).unwrap();

        match writer_middleware_fn(reject).on_request(&mut RequestContext::new(&request)) {
            Err(Rejection::Respond(response)) => {
                assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
                assert_eq!(response.body(), "\"error\"");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
