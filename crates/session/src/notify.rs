//! UI seams the session layer talks through.
//!
//! Notifications and navigation are side effects the shell owns (toasts, a
//! router); the session layer only gets to ask for them.

/// One-shot user-facing notifications (toast equivalent).
pub trait Notify: Send + Sync {
    fn success(&self, message: &str);
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

/// Screen navigation.
pub trait Navigate: Send + Sync {
    fn navigate(&self, route: &str);
}

/// Notifier that writes to the log instead of a UI surface.
///
/// Default for headless runs and a reasonable fallback until a shell wires
/// in a real toast surface.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notify for TracingNotifier {
    fn success(&self, message: &str) {
        tracing::info!(kind = "success", "{message}");
    }

    fn info(&self, message: &str) {
        tracing::info!(kind = "info", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::warn!(kind = "error", "{message}");
    }
}
