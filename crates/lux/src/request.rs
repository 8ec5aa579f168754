//! Per-invocation view of the incoming request.
//!
//! The router never hands out the [`Request`] mutably. Middleware that wants to pass
//! something on to the handler inserts it into the context's [`Extensions`], which live
//! exactly as long as one invocation.

use http::{Extensions, HeaderMap, Method};
use lux_event::Request;
use std::collections::HashMap;

/// The context of one invocation: the caller's request plus annotations added by middleware.
#[derive(Debug)]
pub struct RequestContext<'req> {
    request: &'req Request,
    extensions: Extensions,
}

impl<'req> RequestContext<'req> {
    pub fn new(request: &'req Request) -> Self {
        Self { request, extensions: Extensions::new() }
    }

    /// Returns the caller's request, unchanged by middleware
    pub fn request(&self) -> &'req Request {
        self.request
    }

    pub fn method(&self) -> &'req Method {
        self.request.method()
    }

    pub fn headers(&self) -> &'req HeaderMap {
        self.request.headers()
    }

    /// Returns the value of the header `name`, compared case-insensitively
    pub fn header(&self, name: impl AsRef<str>) -> Option<&'req str> {
        self.request.header(name)
    }

    pub fn query_parameters(&self) -> &'req HashMap<String, String> {
        self.request.query_parameters()
    }

    pub fn body(&self) -> &'req str {
        self.request.body()
    }

    /// Returns the annotations added by middleware
    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    pub fn extensions_mut(&mut self) -> &mut Extensions {
        &mut self.extensions
    }
}
