use crate::error::ExtractError;
use crate::request::RequestContext;

/// Types that can be built from the request context.
///
/// `Output<'r>` lets an extractor borrow from the request for the duration of one call,
/// so `&Method` or `&str` arguments do not copy anything.
pub trait FromRequest {
    type Output<'r>;
    fn from_request<'r>(req: &'r RequestContext<'_>) -> Result<Self::Output<'r>, ExtractError>;
}

impl<T> FromRequest for Option<T>
where
    T: FromRequest,
{
    type Output<'r> = Option<T::Output<'r>>;

    fn from_request<'r>(req: &'r RequestContext<'_>) -> Result<Self::Output<'r>, ExtractError> {
        Ok(T::from_request(req).ok())
    }
}

impl<T> FromRequest for Result<T, ExtractError>
where
    T: FromRequest,
{
    type Output<'r> = Result<T::Output<'r>, ExtractError>;

    fn from_request<'r>(req: &'r RequestContext<'_>) -> Result<Self::Output<'r>, ExtractError> {
        Ok(T::from_request(req))
    }
}

impl FromRequest for () {
    type Output<'r> = ();

    fn from_request<'r>(_req: &'r RequestContext<'_>) -> Result<Self::Output<'r>, ExtractError> {
        Ok(())
    }
}
