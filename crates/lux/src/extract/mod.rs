//! Typed extraction of handler arguments from the request.
//!
//! Every argument of a function wrapped by [`handler_fn`](crate::handler_fn) implements
//! [`FromRequest`]. Extraction failures answer `400 Bad Request` before the function runs.

mod extract_body;
mod extract_extension;
mod extract_header;
mod extract_tuple;
mod extract_url;
mod from_request;

pub use from_request::FromRequest;

/// Represented as form data
///
/// when `post` as a `application/x-www-form-urlencoded`, we can using this struct to inject data,
/// note: the struct must impl [`serde::Deserialize`]
///
/// # Example
/// ```
/// # use serde::Deserialize;
/// # use lux::extract::Form;
/// # #[allow(dead_code)]
/// #[derive(Deserialize, Debug)]
/// struct Params {
///     name: String,
///     zip: String,
/// }
///
/// pub fn handle(Form(params) : Form<Params>) -> String {
///     format!("received params: {:?}", params)
/// }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Form<T>(pub T);

/// Represented as json data
///
/// As an argument it deserializes the request body; as a return value it serializes
/// the wrapped value into an `application/json` response.
///
/// # Example
/// ```
/// # use serde::{Deserialize, Serialize};
/// # use lux::extract::Json;
/// # #[allow(dead_code)]
/// #[derive(Deserialize, Serialize, Debug)]
/// struct Params {
///     name: String,
///     zip: String,
/// }
///
/// pub fn handle(Json(params) : Json<Params>) -> Json<Params> {
///     Json(params)
/// }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Json<T>(pub T);

/// Represented as query parameters
///
/// note: the struct must impl [`serde::Deserialize`]
///
/// # Example
/// ```
/// # use serde::Deserialize;
/// # use lux::extract::Query;
/// # #[allow(dead_code)]
/// #[derive(Deserialize, Debug)]
/// struct Params {
///     name: String,
///     zip: String,
/// }
///
/// pub fn handle(Query(params) : Query<Params>) -> String {
///     format!("received params: {:?}", params)
/// }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Query<T>(pub T);

/// A value inserted into the [`RequestContext`](crate::RequestContext) extensions by middleware
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Extension<T>(pub T);
