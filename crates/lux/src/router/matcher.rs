//! Route selection.
//!
//! # Rules
//! - Routes are scanned in registration order and the first one whose method and header
//!   constraints both hold wins. There is no best-match or most-specific ordering.
//! - A route without header constraints accepts any request of its method.
//! - No route with the request method at all: [`RouteError::MethodNotAllowed`].
//! - Routes for the method exist but none accepts the headers: [`RouteError::NotAcceptable`].

use crate::error::RouteError;
use crate::router::route::{Route, RouteTable};
use lux_event::Request;

impl RouteTable {
    /// Selects the route that serves `req`
    pub fn find(&self, req: &Request) -> Result<&Route, RouteError> {
        let mut method_seen = false;

        for route in self {
            if !route.matches_method(req) {
                continue;
            }
            method_seen = true;

            if route.matches_headers(req) {
                return Ok(route);
            }
        }

        let method = req.method().clone();
        if method_seen { Err(RouteError::NotAcceptable { method }) } else { Err(RouteError::MethodNotAllowed { method }) }
    }
}
