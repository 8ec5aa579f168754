//! Body extraction: raw text, JSON and url-encoded forms.

use crate::error::ExtractError;
use crate::extract::from_request::FromRequest;
use crate::extract::{Form, Json};
use crate::request::RequestContext;
use serde::de::DeserializeOwned;

impl FromRequest for String {
    type Output<'any> = String;

    fn from_request<'r>(req: &'r RequestContext<'_>) -> Result<Self::Output<'r>, ExtractError> {
        Ok(req.body().to_owned())
    }
}

impl FromRequest for &str {
    type Output<'r> = &'r str;

    fn from_request<'r>(req: &'r RequestContext<'_>) -> Result<Self::Output<'r>, ExtractError> {
        Ok(req.body())
    }
}

impl<T> FromRequest for Json<T>
where
    T: DeserializeOwned,
{
    type Output<'any> = Json<T>;

    fn from_request<'r>(req: &'r RequestContext<'_>) -> Result<Self::Output<'r>, ExtractError> {
        serde_json::from_str::<T>(req.body()).map(Json).map_err(ExtractError::invalid_body)
    }
}

impl<T> FromRequest for Form<T>
where
    T: DeserializeOwned,
{
    type Output<'any> = Form<T>;

    fn from_request<'r>(req: &'r RequestContext<'_>) -> Result<Self::Output<'r>, ExtractError> {
        serde_urlencoded::from_str::<T>(req.body()).map(Form).map_err(ExtractError::invalid_body)
    }
}
