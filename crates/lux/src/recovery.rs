//! The recovery boundary.
//!
//! Panics raised by middleware or handlers are caught here and turned into
//! [`RouteError::Panicked`], the same failure channel used for returned errors. A registered
//! [`RecoveryHandler`] observes each recovered panic; it cannot change the response, and a
//! panic inside the observer itself is swallowed.
//!
//! The process panic hook still runs before a panic is caught here; it is left to the host.

use crate::error::RouteError;
use lux_event::Request;
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use tracing::warn;

/// Observes panics recovered while serving a request.
pub trait RecoveryHandler: Send + Sync {
    fn recover(&self, req: &Request, error: &RouteError);
}

/// Recovery handler built from a function.
pub struct FnRecovery<F> {
    f: F,
}

impl<F> fmt::Debug for FnRecovery<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnRecovery").finish_non_exhaustive()
    }
}

/// Adapts `Fn(&Request, &RouteError)` into a [`RecoveryHandler`].
pub fn recovery_fn<F>(f: F) -> FnRecovery<F>
where
    F: Fn(&Request, &RouteError) + Send + Sync,
{
    FnRecovery { f }
}

impl<F> RecoveryHandler for FnRecovery<F>
where
    F: Fn(&Request, &RouteError) + Send + Sync,
{
    fn recover(&self, req: &Request, error: &RouteError) {
        (self.f)(req, error);
    }
}

/// Runs `f`, converting a panic into [`RouteError::Panicked`].
pub(crate) fn catch<T>(f: impl FnOnce() -> T) -> Result<T, RouteError> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| RouteError::Panicked { message: panic_message(payload.as_ref()) })
}

/// Hands a recovered panic to `handler`, ignoring any panic the handler raises itself.
pub(crate) fn observe(handler: &dyn RecoveryHandler, req: &Request, error: &RouteError) {
    if let Err(nested) = catch(|| handler.recover(req, error)) {
        warn!(cause = %nested, "recovery handler panicked, ignored");
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
