use crate::error::ConfigError;
use crate::handler::RequestHandler;
use crate::router::filter::{Filter, HeaderFilter, MethodFilter};
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use lux_event::Request;
use std::fmt;

/// A registered binding of a method and required headers to a handler.
///
/// Routes are only reachable mutably through [`Router::handler`](crate::Router::handler) while
/// the router is being set up; once the router is shared for serving, the borrow checker
/// rules out further changes.
pub struct Route {
    id: usize,
    method: MethodFilter,
    headers: HeaderFilter,
    handler: Box<dyn RequestHandler>,
}

impl Route {
    fn new(id: usize, method: Method, handler: Box<dyn RequestHandler>) -> Self {
        Self { id, method: MethodFilter::new(method), headers: HeaderFilter::new(), handler }
    }

    /// Requires the request to carry header `name` with exactly `value`.
    ///
    /// Requiring the same name twice keeps the last value.
    pub fn header<K, V>(&mut self, name: K, value: V) -> Result<&mut Self, ConfigError>
    where
        HeaderName: TryFrom<K>,
        <HeaderName as TryFrom<K>>::Error: Into<http::Error>,
        HeaderValue: TryFrom<V>,
        <HeaderValue as TryFrom<V>>::Error: Into<http::Error>,
    {
        let (name, value) = parse_header(name, value)?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Requires every `(name, value)` pair, see [`Route::header`].
    ///
    /// Nothing is added when any pair is invalid.
    pub fn headers<I, K, V>(&mut self, pairs: I) -> Result<&mut Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        HeaderName: TryFrom<K>,
        <HeaderName as TryFrom<K>>::Error: Into<http::Error>,
        HeaderValue: TryFrom<V>,
        <HeaderValue as TryFrom<V>>::Error: Into<http::Error>,
    {
        let parsed = pairs.into_iter().map(|(name, value)| parse_header(name, value)).collect::<Result<Vec<_>, _>>()?;
        for (name, value) in parsed {
            self.headers.insert(name, value);
        }
        Ok(self)
    }

    /// Position of this route in registration order
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn method(&self) -> &Method {
        self.method.method()
    }

    pub fn required_headers(&self) -> &HeaderMap {
        self.headers.required()
    }

    pub fn handler(&self) -> &dyn RequestHandler {
        self.handler.as_ref()
    }

    #[inline]
    pub(crate) fn matches_method(&self, req: &Request) -> bool {
        self.method.matches(req)
    }

    #[inline]
    pub(crate) fn matches_headers(&self, req: &Request) -> bool {
        self.headers.matches(req)
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("id", &self.id)
            .field("method", self.method.method())
            .field("headers", self.headers.required())
            .finish_non_exhaustive()
    }
}

fn parse_header<K, V>(name: K, value: V) -> Result<(HeaderName, HeaderValue), ConfigError>
where
    HeaderName: TryFrom<K>,
    <HeaderName as TryFrom<K>>::Error: Into<http::Error>,
    HeaderValue: TryFrom<V>,
    <HeaderValue as TryFrom<V>>::Error: Into<http::Error>,
{
    let name = HeaderName::try_from(name).map_err(Into::into)?;
    let value = HeaderValue::try_from(value).map_err(Into::into)?;
    Ok((name, value))
}

/// Routes in registration order.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a route for `method` and returns it for further configuration
    pub fn push(&mut self, method: Method, handler: Box<dyn RequestHandler>) -> &mut Route {
        let id = self.routes.len();
        self.routes.push(Route::new(id, method, handler));
        &mut self.routes[id]
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Route> {
        self.routes.iter()
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::RouteTable;
    use crate::error::ConfigError;
    use crate::handler::handler_fn;
    use http::header::{ACCEPT, CONTENT_TYPE};
    use http::Method;

    fn ok() -> &'static str {
        "ok"
    }

    #[test]
    fn test_push_keeps_registration_order() {
        let mut table = RouteTable::new();
        table.push(Method::GET, Box::new(handler_fn(ok)));
        table.push(Method::POST, Box::new(handler_fn(ok)));
        table.push(Method::GET, Box::new(handler_fn(ok)));

        let ids = table.iter().map(|route| (route.id(), route.method().clone())).collect::<Vec<_>>();
        assert_eq!(ids, vec![(0, Method::GET), (1, Method::POST), (2, Method::GET)]);
    }

    #[test]
    fn test_header_names_are_normalized() {
        let mut table = RouteTable::new();
        table.push(Method::GET, Box::new(handler_fn(ok))).header("Content-Type", "application/json").unwrap();

        let route = table.iter().next().unwrap();
        assert_eq!(route.required_headers().get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn test_headers_pairs() {
        let mut table = RouteTable::new();
        table
            .push(Method::PUT, Box::new(handler_fn(ok)))
            .headers([(CONTENT_TYPE, "application/json"), (ACCEPT, "text/plain")])
            .unwrap()
            .header(ACCEPT, "application/json")
            .unwrap();

        let route = table.iter().next().unwrap();
        assert_eq!(route.required_headers().len(), 2);
        assert_eq!(route.required_headers().get(ACCEPT).unwrap(), "application/json");
    }

    #[test]
    fn test_invalid_pair_adds_nothing() {
        let mut table = RouteTable::new();
        let result = table
            .push(Method::GET, Box::new(handler_fn(ok)))
            .headers([("content-type", "application/json"), ("bad name", "x")])
            .map(|_| ());

        assert!(matches!(result, Err(ConfigError::InvalidHeader { .. })));
        assert!(table.iter().next().unwrap().required_headers().is_empty());
    }
}
