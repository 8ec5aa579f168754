//! Request filters used by the route table.
//!
//! A route is selected through two filters:
//! - [`MethodFilter`]: the request method equals the route method
//! - [`HeaderFilter`]: every required header is present with exactly the expected value
//!
//! Header names are compared case-insensitively, header values byte for byte. Headers
//! the request carries beyond the required ones are ignored.
//!
//! ## Thread Safety
//!
//! The `Filter` trait requires `Send + Sync` so a route table can be read from many
//! invocations at once.

use http::{HeaderMap, HeaderName, HeaderValue, Method};
use lux_event::Request;

/// Core trait for request filtering.
pub trait Filter: Send + Sync {
    /// Returns `true` if the request satisfies this filter.
    fn matches(&self, req: &Request) -> bool;
}

/// A filter that matches the HTTP method exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodFilter(Method);

impl MethodFilter {
    pub fn new(method: Method) -> Self {
        Self(method)
    }

    pub fn method(&self) -> &Method {
        &self.0
    }
}

impl Filter for MethodFilter {
    #[inline]
    fn matches(&self, req: &Request) -> bool {
        self.0 == *req.method()
    }
}

/// A filter that requires a set of header name/value pairs.
///
/// An empty filter matches every request.
#[derive(Debug, Clone, Default)]
pub struct HeaderFilter {
    required: HeaderMap,
}

impl HeaderFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires `name` to carry `value`, replacing any earlier requirement for `name`
    pub fn insert(&mut self, name: HeaderName, value: HeaderValue) {
        self.required.insert(name, value);
    }

    pub fn required(&self) -> &HeaderMap {
        &self.required
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.required.is_empty()
    }
}

impl Filter for HeaderFilter {
    fn matches(&self, req: &Request) -> bool {
        let headers = req.headers();
        self.required.iter().all(|(name, expected)| headers.get(name).is_some_and(|value| value == expected))
    }
}

#[cfg(test)]
mod tests {
    use super::{Filter, HeaderFilter, MethodFilter};
    use http::header::{ACCEPT, CONTENT_TYPE};
    use http::{HeaderValue, Method};
    use lux_event::Request;

    fn request(method: Method, headers: &[(&str, &str)]) -> Request {
        headers.iter().fold(Request::builder().method(method), |builder, (k, v)| builder.header(*k, *v)).build().unwrap()
    }

    #[test]
    fn test_method_filter() {
        let filter = MethodFilter::new(Method::GET);

        assert!(filter.matches(&request(Method::GET, &[])));
        assert!(!filter.matches(&request(Method::POST, &[])));
        assert!(!filter.matches(&request(Method::from_bytes(b"get").unwrap(), &[])));
    }

    #[test]
    fn test_empty_header_filter_matches_everything() {
        let filter = HeaderFilter::new();

        assert!(filter.is_empty());
        assert!(filter.matches(&request(Method::GET, &[])));
        assert!(filter.matches(&request(Method::DELETE, &[("x-anything", "1")])));
    }

    #[test]
    fn test_header_filter_requires_every_pair() {
        let mut filter = HeaderFilter::new();
        filter.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        filter.insert(ACCEPT, HeaderValue::from_static("application/json"));

        assert!(filter.matches(&request(
            Method::GET,
            &[("Content-Type", "application/json"), ("Accept", "application/json"), ("X-Extra", "ignored")]
        )));
        assert!(!filter.matches(&request(Method::GET, &[("content-type", "application/json")])));
        assert!(!filter.matches(&request(Method::GET, &[("content-type", "application/xml"), ("accept", "application/json")])));
    }

    #[test]
    fn test_header_values_are_case_sensitive() {
        let mut filter = HeaderFilter::new();
        filter.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        assert!(!filter.matches(&request(Method::GET, &[("content-type", "Application/JSON")])));
    }

    #[test]
    fn test_insert_replaces_previous_requirement() {
        let mut filter = HeaderFilter::new();
        filter.insert(CONTENT_TYPE, HeaderValue::from_static("application/xml"));
        filter.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        assert_eq!(filter.required().len(), 1);
        assert!(filter.matches(&request(Method::GET, &[("content-type", "application/json")])));
    }
}
