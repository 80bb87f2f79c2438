use std::rc::Rc;

/// Where a document reports faults that must not reach the user as errors.
pub trait ErrorSite {
    fn log_error(&self, source: &str, message: &str);
}

/// Reports through `tracing` at error level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSite;

impl ErrorSite for TracingSite {
    fn log_error(&self, source: &str, message: &str) {
        tracing::error!(%source, "{message}");
    }
}

impl<T: ErrorSite + ?Sized> ErrorSite for Rc<T> {
    fn log_error(&self, source: &str, message: &str) {
        (**self).log_error(source, message);
    }
}
