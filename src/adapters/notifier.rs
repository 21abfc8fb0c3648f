use crate::core::NotificationSink;
use std::sync::{Arc, Mutex};

/// Prints notifications to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl NotificationSink for ConsoleNotifier {
    fn notify_error(&self, message: &str) {
        eprintln!("❌ {}", message);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn notify_error(&self, message: &str) {
        tracing::error!(notification = message, "❌ {}", message);
    }
}

/// Queues notifications until a consumer drains them, like a toast container.
#[derive(Debug, Clone, Default)]
pub struct BufferedNotifier {
    messages: Arc<Mutex<Vec<String>>>,
}

impl BufferedNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        match self.messages.lock() {
            Ok(messages) => messages.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn drain(&self) -> Vec<String> {
        match self.messages.lock() {
            Ok(mut messages) => std::mem::take(&mut *messages),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    pub fn len(&self) -> usize {
        self.messages().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NotificationSink for BufferedNotifier {
    fn notify_error(&self, message: &str) {
        // A poisoned queue still accepts messages; notifying must never fail.
        let mut messages = match self.messages.lock() {
            Ok(messages) => messages,
            Err(poisoned) => poisoned.into_inner(),
        };
        messages.push(message.to_string());
    }
}

impl<N: NotificationSink + ?Sized> NotificationSink for Arc<N> {
    fn notify_error(&self, message: &str) {
        (**self).notify_error(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffered_notifier_drains_in_order() {
        let notifier = BufferedNotifier::new();
        notifier.notify_error("first");
        notifier.notify_error("second");

        assert_eq!(notifier.len(), 2);
        assert_eq!(notifier.drain(), vec!["first", "second"]);
        assert!(notifier.is_empty());
    }

    #[test]
    fn test_clones_share_the_queue() {
        let notifier = BufferedNotifier::new();
        let shared: Arc<dyn NotificationSink> = Arc::new(notifier.clone());

        shared.notify_error("out of stock");

        assert_eq!(notifier.messages(), vec!["out of stock"]);
    }
}
