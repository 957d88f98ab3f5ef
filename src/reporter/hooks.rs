use std::rc::Rc;

use crate::domain::RawError;

/// Callback type installed as the host's active error handler.
pub type ErrorHandlerFn = Rc<dyn Fn(&RawError)>;

/// The two structured-exception hook categories the host dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExceptionKind {
    /// The host renders the exception before handing it over.
    Structured,
    /// A pre-formatted message passed through as-is.
    Preformatted,
}

/// Explicit "did this hook consume the event" signal returned to the host;
/// `Yes` tells the host to skip its own default exception handling.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    Yes,
    No,
}

/// Host registration primitives the reporter installs itself against.
///
/// A failure inside these calls is a fatal startup condition for the host;
/// nothing here recovers from it.
pub trait HookRegistry {
    /// Substitute the active error handler, returning whichever handler was
    /// active before, if any.
    fn swap_error_handler(&mut self, handler: ErrorHandlerFn) -> Option<ErrorHandlerFn>;

    /// Run `hook` once at process/request shutdown.
    fn register_shutdown_hook(&mut self, hook: Box<dyn FnOnce()>);

    /// Run `hook` when an uncaught structured exception of `kind` surfaces.
    fn register_exception_hook(&mut self, kind: ExceptionKind, hook: Box<dyn Fn(&str) -> Handled>);
}
