//! The outgoing event produced by the router.

use crate::error::Error;
use crate::serde_ext;
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use serde::{Deserialize, Serialize};

/// One outgoing response: status code, headers and body.
///
/// Serializes to `{"statusCode", "headers", "body"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(with = "serde_ext::status_code")]
    status_code: StatusCode,

    #[serde(default, with = "serde_ext::headers")]
    headers: HeaderMap,

    #[serde(default, deserialize_with = "serde_ext::nullable")]
    body: String,
}

impl Response {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self { status_code: status, headers: HeaderMap::new(), body: body.into() }
    }

    /// Creates a response with the given status and no body
    pub fn empty(status: StatusCode) -> Self {
        Self::new(status, String::new())
    }

    /// Adds a header, replacing any previous value for the same name
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status_code
    }

    pub fn status_mut(&mut self) -> &mut StatusCode {
        &mut self.status_code
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn into_body(self) -> String {
        self.body
    }

    /// Encodes the response into its JSON wire shape
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::empty(StatusCode::OK)
    }
}

#[cfg(test)]
mod tests {
    use super::Response;
    use http::header::CONTENT_TYPE;
    use http::{HeaderValue, StatusCode};

    #[test]
    fn test_serialize_wire_shape() {
        let response = Response::new(StatusCode::NOT_ACCEPTABLE, "not acceptable")
            .with_header(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"));

        let value: serde_json::Value = serde_json::from_str(&response.to_json().unwrap()).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "statusCode": 406,
                "headers": {"content-type": "text/plain; charset=utf-8"},
                "body": "not acceptable",
            })
        );
    }

    #[test]
    fn test_non_ascii_header_encodes() {
        let value = HeaderValue::from_bytes("José".as_bytes()).unwrap();
        let response = Response::empty(StatusCode::OK).with_header(http::header::HeaderName::from_static("x-name"), value);

        let encoded: serde_json::Value = serde_json::from_str(&response.to_json().unwrap()).unwrap();
        assert_eq!(encoded["headers"]["x-name"], "José");

        let opaque = HeaderValue::from_bytes(&[b'a', 0xff]).unwrap();
        let response = Response::empty(StatusCode::OK).with_header(CONTENT_TYPE, opaque);
        let encoded: serde_json::Value = serde_json::from_str(&response.to_json().unwrap()).unwrap();
        assert_eq!(encoded["headers"]["content-type"], "a\u{fffd}");
    }

    #[test]
    fn test_deserialize_without_headers() {
        let response: Response = serde_json::from_str(r#"{"statusCode": 204, "body": null}"#).unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(response.headers().is_empty());
        assert_eq!(response.body(), "");
    }

    #[test]
    fn test_deserialize_rejects_invalid_status() {
        let result = serde_json::from_str::<Response>(r#"{"statusCode": 1000}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_default_is_empty_ok() {
        let response = Response::default();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.into_body(), "");
    }
}
