//! Response building: converts handler results into [`Response`]s.
//!
//! This module provides the [`Responder`] trait which defines how different types
//! can be converted into responses, and [`new_response`], which serializes any
//! value into a JSON body paired with a status code.
//!
//! The [`Responder`] trait never inspects or rewrites a status it is given: choosing
//! a status that matches the failure is the handler's job.

use crate::error::{EncodeError, HandlerError};
use crate::extract::Json;
use crate::request::RequestContext;
use http::header::CONTENT_TYPE;
use http::{HeaderValue, StatusCode};
use lux_event::Response;
use mime::Mime;
use serde::Serialize;
use std::convert::Infallible;

/// Serializes `value` as the JSON body of a response with `status`.
///
/// A value that cannot be serialized yields an [`EncodeError`] and no response at all,
/// never a partial body.
///
/// ```
/// use http::StatusCode;
///
/// let response = lux::new_response(&"hello world", StatusCode::OK).unwrap();
///
/// assert_eq!(response.status(), StatusCode::OK);
/// assert_eq!(response.body(), "\"hello world\"");
/// ```
pub fn new_response<T>(value: &T, status: StatusCode) -> Result<Response, EncodeError>
where
    T: Serialize + ?Sized,
{
    let body = serde_json::to_string(value)?;
    Ok(Response::new(status, body).with_header(CONTENT_TYPE, content_type(&mime::APPLICATION_JSON)))
}

pub(crate) fn content_type(mime: &Mime) -> HeaderValue {
    HeaderValue::from_str(mime.as_ref()).unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"))
}

/// A trait for types that can be converted into responses.
///
/// Types implementing this trait can be returned directly from functions wrapped by
/// [`handler_fn`](crate::handler_fn).
pub trait Responder {
    fn response_to(self, req: &RequestContext<'_>) -> Result<Response, HandlerError>;
}

/// Implementation for Result allows handlers to return Result types directly.
/// The Err variant becomes a handler failure.
impl<T: Responder, E: Into<HandlerError>> Responder for Result<T, E> {
    fn response_to(self, req: &RequestContext<'_>) -> Result<Response, HandlerError> {
        match self {
            Ok(t) => t.response_to(req),
            Err(e) => Err(e.into()),
        }
    }
}

/// Implementation for Option allows handlers to return Option types.
/// None case returns an empty response.
impl<T: Responder> Responder for Option<T> {
    fn response_to(self, req: &RequestContext<'_>) -> Result<Response, HandlerError> {
        match self {
            Some(t) => t.response_to(req),
            None => Ok(Response::empty(StatusCode::OK)),
        }
    }
}

/// Pre-built responses pass through untouched.
impl Responder for Response {
    fn response_to(self, _req: &RequestContext<'_>) -> Result<Response, HandlerError> {
        Ok(self)
    }
}

/// Implementation for (StatusCode, T) tuple allows setting a status code
/// along with the response content.
impl<T: Responder> Responder for (StatusCode, T) {
    fn response_to(self, req: &RequestContext<'_>) -> Result<Response, HandlerError> {
        let (status, responder) = self;
        let mut response = responder.response_to(req)?;
        *response.status_mut() = status;
        Ok(response)
    }
}

/// Implementation for (T, StatusCode) tuple - same as above but with reversed order.
impl<T: Responder> Responder for (T, StatusCode) {
    fn response_to(self, req: &RequestContext<'_>) -> Result<Response, HandlerError> {
        let (responder, status) = self;
        (status, responder).response_to(req)
    }
}

impl<T: Responder> Responder for Box<T> {
    fn response_to(self, req: &RequestContext<'_>) -> Result<Response, HandlerError> {
        (*self).response_to(req)
    }
}

/// Implementation for unit type () returns an empty response.
impl Responder for () {
    fn response_to(self, _req: &RequestContext<'_>) -> Result<Response, HandlerError> {
        Ok(Response::empty(StatusCode::OK))
    }
}

/// Implementation for static strings returns them as plain text responses.
impl Responder for &'static str {
    fn response_to(self, req: &RequestContext<'_>) -> Result<Response, HandlerError> {
        self.to_owned().response_to(req)
    }
}

/// Implementation for String returns it as a plain text response.
impl Responder for String {
    fn response_to(self, _req: &RequestContext<'_>) -> Result<Response, HandlerError> {
        Ok(Response::new(StatusCode::OK, self).with_header(CONTENT_TYPE, content_type(&mime::TEXT_PLAIN_UTF_8)))
    }
}

/// Serializes the wrapped value through [`new_response`] with `200 OK`.
impl<T: Serialize> Responder for Json<T> {
    fn response_to(self, _req: &RequestContext<'_>) -> Result<Response, HandlerError> {
        Ok(new_response(&self.0, StatusCode::OK)?)
    }
}

impl Responder for Infallible {
    fn response_to(self, _req: &RequestContext<'_>) -> Result<Response, HandlerError> {
        match self {}
    }
}
