//! Error types of the router.
//!
//! - [`RouteError`]: every way one invocation can fail, each resolving to a status code
//! - [`HandlerError`]: what handlers return, convertible from any error with `?`
//! - [`ExtractError`]: a request could not be turned into handler arguments
//! - [`EncodeError`]: a response body could not be serialized
//! - [`ConfigError`]: registration or logging setup was given invalid input

use http::header::CONTENT_TYPE;
use http::{Method, StatusCode};
use lux_event::Response;
use std::error::Error;
use std::fmt;
use thiserror::Error;

pub type BoxError = Box<dyn Error + Send + Sync>;

/// Body sent for recovered panics, the panicking code never produced a usable response.
const PANIC_BODY: &str = "internal server error";

/// The failure of one invocation.
///
/// Every variant resolves to exactly one [`Response`] through [`RouteError::to_response`].
#[derive(Debug, Error)]
pub enum RouteError {
    /// No registered route has the request's method.
    #[error("method not allowed")]
    MethodNotAllowed { method: Method },

    /// Routes exist for the method but none accepts the request headers.
    #[error("not acceptable")]
    NotAcceptable { method: Method },

    #[error("middleware rejected request: {reason}")]
    MiddlewareRejected { status: StatusCode, reason: String },

    #[error("handler failure: {source}")]
    HandlerFailure { status: StatusCode, source: BoxError },

    #[error(transparent)]
    Encoding(#[from] EncodeError),

    /// A middleware or handler panicked.
    #[error("recovered from panic: {message}")]
    Panicked { message: String },
}

impl RouteError {
    pub fn status(&self) -> StatusCode {
        match self {
            RouteError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            RouteError::NotAcceptable { .. } => StatusCode::NOT_ACCEPTABLE,
            RouteError::MiddlewareRejected { status, .. } | RouteError::HandlerFailure { status, .. } => *status,
            RouteError::Encoding(_) | RouteError::Panicked { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Builds the plain text response reported to the caller for this failure
    pub fn to_response(&self) -> Response {
        let body = match self {
            RouteError::MiddlewareRejected { reason, .. } => reason.clone(),
            RouteError::HandlerFailure { source, .. } => source.to_string(),
            RouteError::Panicked { .. } => PANIC_BODY.to_string(),
            _ => self.to_string(),
        };

        Response::new(self.status(), body).with_header(CONTENT_TYPE, crate::responder::content_type(&mime::TEXT_PLAIN_UTF_8))
    }
}

impl From<HandlerError> for RouteError {
    fn from(err: HandlerError) -> Self {
        let HandlerError { status, source } = err;
        match source.downcast::<EncodeError>() {
            Ok(encode_error) => RouteError::Encoding(*encode_error),
            Err(source) => RouteError::HandlerFailure { status, source },
        }
    }
}

/// The error returned by request handlers.
///
/// Any [`std::error::Error`] converts into a `HandlerError` with status
/// `500 Internal Server Error`, so handlers can use `?` freely. Use
/// [`HandlerError::new`] or [`HandlerError::with_status`] to report another status.
pub struct HandlerError {
    status: StatusCode,
    source: BoxError,
}

impl HandlerError {
    pub fn new(status: StatusCode, source: impl Into<BoxError>) -> Self {
        Self { status, source: source.into() }
    }

    pub fn internal(source: impl Into<BoxError>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, source)
    }

    pub fn bad_request(source: impl Into<BoxError>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, source)
    }

    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn cause(&self) -> &(dyn Error + Send + Sync + 'static) {
        self.source.as_ref()
    }
}

impl<E> From<E> for HandlerError
where
    E: Error + Send + Sync + 'static,
{
    fn from(err: E) -> Self {
        Self::internal(err)
    }
}

impl fmt::Debug for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerError").field("status", &self.status).field("source", &self.source).finish()
    }
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.source, self.status)
    }
}

#[derive(Debug, Error)]
#[error("failed to encode response body: {source}")]
pub struct EncodeError {
    #[from]
    source: serde_json::Error,
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid query parameters: {reason}")]
    InvalidQuery { reason: String },

    #[error("invalid body: {reason}")]
    InvalidBody { reason: String },

    #[error("missing request extension: {type_name}")]
    MissingExtension { type_name: &'static str },
}

impl ExtractError {
    pub fn invalid_query<S: ToString>(str: S) -> Self {
        Self::InvalidQuery { reason: str.to_string() }
    }

    pub fn invalid_body<S: ToString>(str: S) -> Self {
        Self::InvalidBody { reason: str.to_string() }
    }

    pub fn missing_extension<T>() -> Self {
        Self::MissingExtension { type_name: std::any::type_name::<T>() }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid header constraint: {source}")]
    InvalidHeader {
        #[from]
        source: http::Error,
    },

    #[error("invalid log filter: {source}")]
    InvalidLogFilter {
        #[from]
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("unknown log format '{0}', expected one of: full, compact, json")]
    UnknownLogFormat(String),
}

#[cfg(test)]
mod tests {
    use super::{EncodeError, HandlerError, RouteError};
    use http::{Method, StatusCode};
    use serde::ser::Error as _;
    use std::io;

    #[test]
    fn test_status_of_each_failure() {
        assert_eq!(RouteError::MethodNotAllowed { method: Method::GET }.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(RouteError::NotAcceptable { method: Method::GET }.status(), StatusCode::NOT_ACCEPTABLE);
        assert_eq!(RouteError::Panicked { message: "boom".into() }.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let rejected = RouteError::MiddlewareRejected { status: StatusCode::UNAUTHORIZED, reason: "no token".into() };
        assert_eq!(rejected.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_panic_response_hides_payload() {
        let response = RouteError::Panicked { message: "secret state".into() }.to_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body(), "internal server error");
    }

    #[test]
    fn test_handler_error_defaults_to_internal() {
        let err = HandlerError::from(io::Error::other("disk full"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let route_error = RouteError::from(err);
        assert!(matches!(route_error, RouteError::HandlerFailure { .. }));

        let response = route_error.to_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body(), "disk full");
    }

    #[test]
    fn test_handler_error_keeps_explicit_status() {
        let err = HandlerError::bad_request("no id provided");
        let response = RouteError::from(err).to_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.body(), "no id provided");
    }

    #[test]
    fn test_encode_failure_is_classified() {
        let encode_error = EncodeError::from(serde_json::Error::custom("unsupported value"));
        let route_error = RouteError::from(HandlerError::from(encode_error));

        assert!(matches!(route_error, RouteError::Encoding(_)));
        assert!(route_error.to_response().body().starts_with("failed to encode response body"));
    }
}
