//! Local-notification boundary.
//!
//! Delivery is a platform concern; the core only formats the message and
//! hands it to a sink.

/// Fire-and-forget notification sink.
pub trait NotificationSink {
    fn notify(&self, title: &str, body: &str);
}

impl<N: NotificationSink + ?Sized> NotificationSink for std::sync::Arc<N> {
    fn notify(&self, title: &str, body: &str) {
        (**self).notify(title, body);
    }
}

/// Sink that writes notifications to the log, for headless runs.
pub struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn notify(&self, title: &str, body: &str) {
        log::info!("[notify] {title} {body}");
    }
}

/// Body text for a discovery notification.
pub fn discovery_message(count: usize) -> String {
    format!("{count} Pokemon discovered in your area!")
}
