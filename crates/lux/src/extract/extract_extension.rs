use crate::error::ExtractError;
use crate::extract::{Extension, FromRequest};
use crate::request::RequestContext;

impl<T> FromRequest for Extension<T>
where
    T: Clone + Send + Sync + 'static,
{
    type Output<'any> = Extension<T>;

    fn from_request<'r>(req: &'r RequestContext<'_>) -> Result<Self::Output<'r>, ExtractError> {
        req.extensions().get::<T>().cloned().map(Extension).ok_or_else(ExtractError::missing_extension::<T>)
    }
}
