use crate::error::HandlerError;
use crate::extract::FromRequest;
use crate::fn_trait::FnTrait;
use crate::request::RequestContext;
use crate::responder::Responder;
use crate::writer::ResponseWriter;
use lux_event::Response;
use std::fmt;
use std::marker::PhantomData;

/// The single capability every route handler provides.
pub trait RequestHandler: Send + Sync {
    fn invoke(&self, req: &RequestContext<'_>) -> Result<Response, HandlerError>;
}

/// a `FnTrait` holder which represents any Fn whose arguments are extractors
pub struct FnHandler<F, Args> {
    f: F,
    _phantom: PhantomData<fn(Args)>,
}

impl<F, Args> fmt::Debug for FnHandler<F, Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHandler").field("args", &std::any::type_name::<Args>()).finish_non_exhaustive()
    }
}

impl<F, Args> FnHandler<F, Args>
where
    F: FnTrait<Args>,
{
    fn new(f: F) -> Self {
        Self { f, _phantom: PhantomData }
    }
}

/// Adapts a function taking [`FromRequest`] arguments and returning a [`Responder`].
///
/// ```
/// use http::Method;
/// use lux::extract::Query;
/// use lux::{Router, handler_fn};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Page {
///     number: u32,
/// }
///
/// fn list(method: &Method, Query(page): Query<Page>) -> String {
///     format!("{method} page {}", page.number)
/// }
///
/// let mut router = Router::new();
/// router.get(handler_fn(list));
/// ```
pub fn handler_fn<F, Args>(f: F) -> FnHandler<F, Args>
where
    F: FnTrait<Args>,
{
    FnHandler::new(f)
}

impl<F, Args> RequestHandler for FnHandler<F, Args>
where
    F: for<'r> FnTrait<Args::Output<'r>> + Send + Sync,
    for<'r> <F as FnTrait<Args::Output<'r>>>::Output: Responder,
    Args: FromRequest,
{
    fn invoke(&self, req: &RequestContext<'_>) -> Result<Response, HandlerError> {
        let args = Args::from_request(req).map_err(HandlerError::bad_request)?;
        self.f.call(args).response_to(req)
    }
}

/// Handler built from a function that writes its response through a [`ResponseWriter`].
pub struct WriterHandler<F> {
    f: F,
}

impl<F> fmt::Debug for WriterHandler<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterHandler").finish_non_exhaustive()
    }
}

/// Adapts a function `(&mut ResponseWriter, &RequestContext)`.
///
/// A function that writes nothing produces an empty `200 OK`.
pub fn writer_fn<F>(f: F) -> WriterHandler<F>
where
    F: Fn(&mut ResponseWriter, &RequestContext<'_>) + Send + Sync,
{
    WriterHandler { f }
}

impl<F> RequestHandler for WriterHandler<F>
where
    F: Fn(&mut ResponseWriter, &RequestContext<'_>) + Send + Sync,
{
    fn invoke(&self, req: &RequestContext<'_>) -> Result<Response, HandlerError> {
        let mut writer = ResponseWriter::new();
        (self.f)(&mut writer, req);
        Ok(writer.into_response())
    }
}
