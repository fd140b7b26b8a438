//! Notification seam towards the host console UI
//!
//! Workflow code reports user-facing outcomes (toasts in the console)
//! through the [`Notifier`] trait. The host UI supplies the real
//! implementation; this crate ships a tracing-backed default and a no-op.

/// Receiver for user-facing notifications
///
/// Implement this trait to route workflow outcomes into the host UI's
/// transient-notification layer.
pub trait Notifier: Send + Sync {
    /// A completed operation worth telling the user about
    fn success(&self, message: &str);

    /// A degraded outcome the user should know about but that is not a failure
    fn warning(&self, message: &str);

    /// A failed or rejected operation
    fn error(&self, message: &str);
}

/// A notifier that logs through `tracing`
///
/// Used as the default when no host UI is attached (headless operation,
/// integration tests that only care about the workflow result).
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn warning(&self, message: &str) {
        tracing::warn!("{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!("{}", message);
    }
}

/// A notifier that swallows everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn success(&self, _message: &str) {}

    fn warning(&self, _message: &str) {}

    fn error(&self, _message: &str) {}
}
