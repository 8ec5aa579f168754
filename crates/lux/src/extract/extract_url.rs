//! Query parameter extraction
//!
//! The query parameters arrive already split into a map. They are re-encoded as a query
//! string and decoded with serde_qs, so numeric and nested fields parse the same way they
//! would from a raw URL.

use crate::error::ExtractError;
use crate::extract::{FromRequest, Query};
use crate::request::RequestContext;
use serde::de::DeserializeOwned;

impl<T> FromRequest for Query<T>
where
    T: DeserializeOwned,
{
    type Output<'any> = Query<T>;

    fn from_request<'r>(req: &'r RequestContext<'_>) -> Result<Self::Output<'r>, ExtractError> {
        let query = serde_qs::to_string(req.query_parameters()).map_err(ExtractError::invalid_query)?;
        serde_qs::from_str::<T>(&query).map(Query).map_err(ExtractError::invalid_query)
    }
}
