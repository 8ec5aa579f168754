//! Wire shapes consumed and produced by the lux router.
//!
//! A function-as-a-service HTTP trigger hands the router one incoming event and expects
//! one outgoing event back. This crate models both sides:
//!
//! - [`Request`]: method, headers, query parameters and body of the incoming event
//! - [`Response`]: status code, headers and body of the outgoing event
//!
//! Both types use the `http` crate for methods, header maps and status codes, so header
//! names are compared case-insensitively everywhere.
//!
//! # Wire format
//!
//! ```
//! use lux_event::Request;
//!
//! let request = Request::from_json(
//!     r#"{"httpMethod":"GET","headers":{"Content-Type":"application/json"},"queryStringParameters":null}"#,
//! )
//! .unwrap();
//!
//! assert_eq!(request.method(), http::Method::GET);
//! assert_eq!(request.header("content-type"), Some("application/json"));
//! ```

mod error;
mod request;
mod response;
mod serde_ext;

pub use error::Error;
pub use request::Request;
pub use request::RequestBuilder;
pub use response::Response;
