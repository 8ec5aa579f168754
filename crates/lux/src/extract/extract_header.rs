use crate::error::ExtractError;
use crate::extract::from_request::FromRequest;
use crate::request::RequestContext;
use http::{HeaderMap, Method};
use lux_event::Request;

impl FromRequest for Method {
    type Output<'any> = Method;

    fn from_request<'r>(req: &'r RequestContext<'_>) -> Result<Self::Output<'r>, ExtractError> {
        Ok(req.method().clone())
    }
}

impl FromRequest for &Method {
    type Output<'r> = &'r Method;

    fn from_request<'r>(req: &'r RequestContext<'_>) -> Result<Self::Output<'r>, ExtractError> {
        Ok(req.method())
    }
}

impl FromRequest for &Request {
    type Output<'r> = &'r Request;

    fn from_request<'r>(req: &'r RequestContext<'_>) -> Result<Self::Output<'r>, ExtractError> {
        Ok(req.request())
    }
}

impl FromRequest for &HeaderMap {
    type Output<'r> = &'r HeaderMap;

    fn from_request<'r>(req: &'r RequestContext<'_>) -> Result<Self::Output<'r>, ExtractError> {
        Ok(req.headers())
    }
}

impl FromRequest for HeaderMap {
    type Output<'any> = HeaderMap;

    fn from_request<'r>(req: &'r RequestContext<'_>) -> Result<Self::Output<'r>, ExtractError> {
        Ok(req.headers().clone())
    }
}
