//! Method and header based request routing for function-as-a-service HTTP triggers.
//!
//! A host runtime hands the router one [`Request`] and gets exactly one [`Response`] back.
//! Routes are selected by HTTP method plus required header values, never by path:
//!
//! 1. the middleware chain runs in registration order and may reject the request
//! 2. the first registered route whose method and header constraints hold is selected
//! 3. its handler runs and its return value becomes the response
//!
//! Any failure on the way, including a panic, is turned into a [`RouteError`] and a
//! matching response, so [`Router::handle_request`] never unwinds into the host.
//!
//! ```
//! use http::{Method, StatusCode};
//! use lux::extract::Json;
//! use lux::{Request, Router, handler_fn};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Greeting {
//!     message: &'static str,
//! }
//!
//! fn greet() -> Json<Greeting> {
//!     Json(Greeting { message: "hello" })
//! }
//!
//! let mut router = Router::new();
//! router.get(handler_fn(greet)).header("accept", "application/json").unwrap();
//!
//! let request = Request::builder().method(Method::GET).header("Accept", "application/json").build().unwrap();
//! let response = router.handle_request(&request);
//!
//! assert_eq!(response.status(), StatusCode::OK);
//! assert_eq!(response.body(), r#"{"message":"hello"}"#);
//! ```

mod error;
mod fn_trait;
mod handler;
mod logging;
mod middleware;
mod recovery;
mod request;
mod responder;
mod writer;

pub mod extract;
pub mod router;

pub use error::BoxError;
pub use error::ConfigError;
pub use error::EncodeError;
pub use error::ExtractError;
pub use error::HandlerError;
pub use error::RouteError;
pub use fn_trait::FnTrait;
pub use handler::handler_fn;
pub use handler::writer_fn;
pub use handler::FnHandler;
pub use handler::RequestHandler;
pub use handler::WriterHandler;
pub use logging::LogFormat;
pub use logging::LoggingConfig;
pub use lux_event::Request;
pub use lux_event::Response;
pub use middleware::middleware_fn;
pub use middleware::writer_middleware_fn;
pub use middleware::FnMiddleware;
pub use middleware::Middleware;
pub use middleware::MiddlewareResult;
pub use middleware::Middlewares;
pub use middleware::Rejection;
pub use middleware::WriterMiddleware;
pub use recovery::recovery_fn;
pub use recovery::FnRecovery;
pub use recovery::RecoveryHandler;
pub use request::RequestContext;
pub use responder::new_response;
pub use responder::Responder;
pub use router::Outcome;
pub use router::Route;
pub use router::RouteTable;
pub use router::Router;
pub use writer::ResponseWriter;
