use std::error::Error;

/// Sink for the dispatch path's warning and error surfaces.
///
/// Implementations must not panic; calls are fire-and-forget from the
/// engine's point of view. The default [`TracingLogger`] forwards to the
/// `tracing` macros; tests inject counting implementations.
pub trait DispatchLogger: Send + Sync {
    /// Records a condition that did not prevent processing from continuing.
    fn warning(&self, message: &str);

    /// Records a failure confined to a single event.
    fn error(&self, message: &str);

    /// Records a failure together with its underlying cause.
    fn error_with_cause(&self, message: &str, cause: &dyn Error) {
        self.error(&format!("{}: {}", message, cause));
    }
}

/// Default logger backed by `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl DispatchLogger for TracingLogger {
    fn warning(&self, message: &str) {
        tracing::warn!("{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!("{}", message);
    }

    fn error_with_cause(&self, message: &str, cause: &dyn Error) {
        tracing::error!(cause = %cause, "{}", message);
    }
}
