//! The incoming event handed to the router.
//!
//! A [`Request`] is immutable once built: the router and its handlers only ever see it by
//! reference for the duration of one invocation.

use crate::error::Error;
use crate::serde_ext;
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One incoming request: method, headers, query parameters and body.
///
/// Deserializes from `{"method", "headers", "queryParameters", "body"}` and also accepts the
/// API Gateway proxy spellings `httpMethod` and `queryStringParameters`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(alias = "httpMethod", with = "serde_ext::method")]
    method: Method,

    #[serde(default, with = "serde_ext::headers")]
    headers: HeaderMap,

    #[serde(default, alias = "queryStringParameters", deserialize_with = "serde_ext::nullable")]
    query_parameters: HashMap<String, String>,

    #[serde(default, deserialize_with = "serde_ext::nullable")]
    body: String,
}

impl Request {
    /// Creates a new [`RequestBuilder`] with `GET` as the default method
    pub fn builder() -> RequestBuilder {
        RequestBuilder::new()
    }

    /// Parses a request from its JSON wire shape
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a request from its JSON wire shape
    pub fn from_slice(json: &[u8]) -> Result<Self, Error> {
        Ok(serde_json::from_slice(json)?)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the value of the header `name`, compared case-insensitively.
    ///
    /// Values are read as UTF-8; a value that is not valid UTF-8 is reported as absent.
    pub fn header(&self, name: impl AsRef<str>) -> Option<&str> {
        self.headers.get(name.as_ref()).and_then(|value| std::str::from_utf8(value.as_bytes()).ok())
    }

    pub fn query_parameters(&self) -> &HashMap<String, String> {
        &self.query_parameters
    }

    /// Returns the query parameter `name`, compared case-sensitively
    pub fn query(&self, name: &str) -> Option<&str> {
        self.query_parameters.get(name).map(String::as_str)
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Builds a [`Request`], reporting the first invalid part at [`RequestBuilder::build`].
#[derive(Debug)]
pub struct RequestBuilder {
    inner: Result<Request, Error>,
}

impl RequestBuilder {
    fn new() -> Self {
        Self {
            inner: Ok(Request {
                method: Method::GET,
                headers: HeaderMap::new(),
                query_parameters: HashMap::new(),
                body: String::new(),
            }),
        }
    }

    #[must_use]
    pub fn method<M>(self, method: M) -> Self
    where
        Method: TryFrom<M>,
        <Method as TryFrom<M>>::Error: Into<http::Error>,
    {
        self.and_then(|mut request| {
            request.method = Method::try_from(method).map_err(Into::into)?;
            Ok(request)
        })
    }

    /// Sets the header `name`, replacing any previous value for the same name
    #[must_use]
    pub fn header<K, V>(self, name: K, value: V) -> Self
    where
        HeaderName: TryFrom<K>,
        <HeaderName as TryFrom<K>>::Error: Into<http::Error>,
        HeaderValue: TryFrom<V>,
        <HeaderValue as TryFrom<V>>::Error: Into<http::Error>,
    {
        self.and_then(|mut request| {
            let name = HeaderName::try_from(name).map_err(Into::into)?;
            let value = HeaderValue::try_from(value).map_err(Into::into)?;
            request.headers.insert(name, value);
            Ok(request)
        })
    }

    #[must_use]
    pub fn query(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.and_then(|mut request| {
            request.query_parameters.insert(name.into(), value.into());
            Ok(request)
        })
    }

    #[must_use]
    pub fn body(self, body: impl Into<String>) -> Self {
        self.and_then(|mut request| {
            request.body = body.into();
            Ok(request)
        })
    }

    pub fn build(self) -> Result<Request, Error> {
        self.inner
    }

    fn and_then<F>(self, f: F) -> Self
    where
        F: FnOnce(Request) -> Result<Request, http::Error>,
    {
        Self { inner: self.inner.and_then(|request| f(request).map_err(Error::from)) }
    }
}
