//! The router: registration API and the request entry point.
//!
//! A [`Router`] is configured once through `&mut self` methods and then shared read-only
//! (for example behind an `Arc`) for any number of concurrent invocations. Each invocation of
//! [`Router::dispatch`] runs the middleware chain, selects the first matching route, invokes its
//! handler and always produces exactly one [`Response`]. Every failure, including a panic,
//! becomes a [`RouteError`] with a matching response.

pub mod filter;
mod matcher;
mod route;

pub use route::{Route, RouteTable};

use crate::error::{ConfigError, RouteError};
use crate::handler::RequestHandler;
use crate::logging::{self, LoggingConfig};
use crate::middleware::{Middleware, Middlewares, Rejection};
use crate::recovery::{self, RecoveryHandler};
use crate::request::RequestContext;
use http::Method;
use lux_event::{Request, Response};
use std::fmt;
use tracing::{debug, error, info_span, warn};
use tracing_subscriber::fmt::MakeWriter;

/// Routes requests by method and required headers.
///
/// ```
/// use lux::{Request, Router, handler_fn};
/// use http::{Method, StatusCode};
///
/// fn hello() -> &'static str {
///     "hello"
/// }
///
/// let mut router = Router::new();
/// router.get(handler_fn(hello)).header("content-type", "application/json").unwrap();
///
/// let request = Request::builder().method(Method::GET).header("Content-Type", "application/json").build().unwrap();
/// assert_eq!(router.handle_request(&request).status(), StatusCode::OK);
///
/// let request = Request::builder().method(Method::DELETE).build().unwrap();
/// assert_eq!(router.handle_request(&request).status(), StatusCode::METHOD_NOT_ALLOWED);
/// ```
#[derive(Default)]
pub struct Router {
    routes: RouteTable,
    middlewares: Middlewares,
    recovery: Option<Box<dyn RecoveryHandler>>,
    log_dispatch: Option<tracing::Dispatch>,
}

/// The result of one invocation: the response to send and the error it was built from, if any.
#[derive(Debug)]
pub struct Outcome {
    response: Response,
    error: Option<RouteError>,
}

macro_rules! method_route {
    ($name:ident, $method:ident) => {
        #[doc = concat!("Registers `handler` for ", stringify!($method), " requests.")]
        pub fn $name<H: RequestHandler + 'static>(&mut self, handler: H) -> &mut Route {
            self.handler(Method::$method, handler)
        }
    };
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a route for `method`; header constraints are added on the returned [`Route`].
    ///
    /// Routes are tried in the order they were registered.
    pub fn handler<H: RequestHandler + 'static>(&mut self, method: Method, handler: H) -> &mut Route {
        self.routes.push(method, Box::new(handler))
    }

    method_route!(get, GET);
    method_route!(post, POST);
    method_route!(put, PUT);
    method_route!(delete, DELETE);
    method_route!(patch, PATCH);
    method_route!(head, HEAD);
    method_route!(options, OPTIONS);

    /// Appends `middleware` to the chain run before route selection.
    pub fn middleware<M: Middleware + 'static>(&mut self, middleware: M) -> &mut Self {
        self.middlewares.add_last(middleware);
        self
    }

    /// Sets the observer notified of recovered panics, replacing any previous one.
    ///
    /// Recovery does not touch the process panic hook, so the default hook still prints each
    /// recovered panic to stderr. Hosts that want panics only in this router's log should
    /// install their own hook with [`std::panic::set_hook`].
    pub fn recovery<R: RecoveryHandler + 'static>(&mut self, handler: R) -> &mut Self {
        self.recovery = Some(Box::new(handler));
        self
    }

    /// Sends this router's log events to `sink` instead of the process-wide subscriber.
    pub fn logging<W>(&mut self, sink: W, config: &LoggingConfig) -> Result<&mut Self, ConfigError>
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        self.log_dispatch = Some(logging::dispatch(sink, config)?);
        Ok(self)
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Serves one request, returning the response with the error it reports, if any.
    pub fn dispatch(&self, req: &Request) -> Outcome {
        match &self.log_dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, || self.serve(req)),
            None => self.serve(req),
        }
    }

    /// Serves one request. Never panics; failures are reported through the response.
    pub fn handle_request(&self, req: &Request) -> Response {
        self.dispatch(req).into_response()
    }

    fn serve(&self, req: &Request) -> Outcome {
        let span = info_span!("handle_request", method = %req.method());
        let _enter = span.enter();

        match recovery::catch(|| self.run(req)) {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(cause = %err, "recovered from panic");
                if let Some(handler) = &self.recovery {
                    recovery::observe(handler.as_ref(), req, &err);
                }
                Outcome::failed(err)
            }
        }
    }

    fn run(&self, req: &Request) -> Outcome {
        let mut context = RequestContext::new(req);

        if let Err(rejection) = self.middlewares.on_request(&mut context) {
            return match rejection {
                Rejection::Failed(source) => {
                    warn!(cause = %source, "middleware failed");
                    Outcome::failed(RouteError::MiddlewareRejected {
                        status: http::StatusCode::INTERNAL_SERVER_ERROR,
                        reason: source.to_string(),
                    })
                }
                Rejection::Respond(response) => {
                    let status = response.status();
                    warn!(%status, "middleware responded");
                    let error = RouteError::MiddlewareRejected { status, reason: format!("middleware responded with {status}") };
                    Outcome { response, error: Some(error) }
                }
            };
        }

        let route = match self.routes.find(req) {
            Ok(route) => route,
            Err(err) => {
                warn!(cause = %err, "no route accepts request");
                return Outcome::failed(err);
            }
        };
        debug!(route = route.id(), "matched route");

        match route.handler().invoke(&context) {
            Ok(response) => Outcome { response, error: None },
            Err(err) => {
                let err = RouteError::from(err);
                error!(route = route.id(), cause = %err, "handler failed");
                Outcome::failed(err)
            }
        }
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes)
            .field("middlewares", &self.middlewares)
            .field("recovery", &self.recovery.is_some())
            .field("logging", &self.log_dispatch.is_some())
            .finish()
    }
}

impl Outcome {
    fn failed(error: RouteError) -> Self {
        Self { response: error.to_response(), error: Some(error) }
    }

    pub fn response(&self) -> &Response {
        &self.response
    }

    pub fn error(&self) -> Option<&RouteError> {
        self.error.as_ref()
    }

    pub fn into_response(self) -> Response {
        self.response
    }

    pub fn into_parts(self) -> (Response, Option<RouteError>) {
        (self.response, self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::Router;
    use crate::error::RouteError;
    use crate::handler::handler_fn;
    use crate::logging::{LogFormat, LoggingConfig};
    use crate::middleware::{middleware_fn, Rejection};
    use crate::recovery::RecoveryHandler;
    use crate::request::RequestContext;
    use http::{Method, StatusCode};
    use lux_event::{Request, Response};
    use mockall::mock;
    use std::io;
    use std::sync::{Arc, Mutex};

    mock! {
        Observer {}

        impl RecoveryHandler for Observer {
            fn recover(&self, req: &Request, error: &RouteError);
        }
    }

    fn hello() -> &'static str {
        "hello"
    }

    fn boom() -> &'static str {
        panic!("boom")
    }

    fn request(method: Method) -> Request {
        Request::builder().method(method).header("content-type", "application/json").build().unwrap()
    }

    #[test]
    fn test_dispatch_success_has_no_error() {
        let mut router = Router::new();
        router.get(handler_fn(hello));

        let outcome = router.dispatch(&request(Method::GET));

        assert!(outcome.error().is_none());
        assert_eq!(outcome.response().status(), StatusCode::OK);
        assert_eq!(outcome.into_response().body(), "hello");
    }

    #[test]
    fn test_panic_is_recovered_and_observed_once() {
        let mut observer = MockObserver::new();
        observer
            .expect_recover()
            .withf(|req, err| req.method() == &Method::POST && matches!(err, RouteError::Panicked { message } if message == "boom"))
            .times(1)
            .return_const(());

        let mut router = Router::new();
        router.post(handler_fn(boom));
        router.get(handler_fn(hello));
        router.recovery(observer);

        let (response, error) = router.dispatch(&request(Method::POST)).into_parts();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body(), "internal server error");
        assert!(matches!(error, Some(RouteError::Panicked { .. })));

        assert_eq!(router.handle_request(&request(Method::GET)).status(), StatusCode::OK);
    }

    #[test]
    fn test_observer_not_called_for_returned_errors() {
        let mut observer = MockObserver::new();
        observer.expect_recover().times(0);

        let mut router = Router::new();
        router.get(handler_fn(hello)).header("content-type", "text/xml").unwrap();
        router.recovery(observer);

        let outcome = router.dispatch(&request(Method::GET));
        assert!(matches!(outcome.error(), Some(RouteError::NotAcceptable { .. })));
        assert_eq!(outcome.response().status(), StatusCode::NOT_ACCEPTABLE);
    }

    #[test]
    fn test_middleware_respond_is_passed_through() {
        let mut router = Router::new();
        router.get(handler_fn(hello));
        router.middleware(middleware_fn(|_req: &mut RequestContext<'_>| {
            Err::<(), _>(Rejection::respond(Response::new(StatusCode::UNAUTHORIZED, "denied")))
        }));

        let (response, error) = router.dispatch(&request(Method::GET)).into_parts();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.body(), "denied");
        assert!(matches!(error, Some(RouteError::MiddlewareRejected { status, .. }) if status == StatusCode::UNAUTHORIZED));
    }

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct FlushCounter(Arc<Mutex<(usize, usize)>>);

    impl io::Write for FlushCounter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().0 += 1;
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            self.0.lock().unwrap().1 += 1;
            Ok(())
        }
    }

    #[test]
    fn test_logging_flushes_each_event() {
        let counter = FlushCounter::default();
        let sink = counter.clone();

        let mut router = Router::new();
        router.logging(move || sink.clone(), &LoggingConfig::default()).unwrap();

        router.handle_request(&request(Method::DELETE));

        let (writes, flushes) = *counter.0.lock().unwrap();
        assert!(writes >= 1);
        assert_eq!(flushes, 1);
    }

    #[test]
    fn test_logging_is_scoped_to_router() {
        let buffer = Buffer::default();
        let sink = buffer.clone();

        let mut router = Router::new();
        router.get(handler_fn(hello));
        router
            .logging(move || sink.clone(), &LoggingConfig::default().with_format(LogFormat::Json).with_filter("lux=debug"))
            .unwrap();

        router.handle_request(&request(Method::GET));
        router.handle_request(&request(Method::DELETE));

        let contents = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        let lines = contents.lines().map(|line| serde_json::from_str::<serde_json::Value>(line).unwrap()).collect::<Vec<_>>();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["fields"]["message"], "matched route");
        assert_eq!(lines[0]["span"]["method"], "GET");
        assert_eq!(lines[1]["level"], "WARN");
        assert_eq!(lines[1]["fields"]["message"], "no route accepts request");
    }
}
