// Tue Jan 20 2026 - Alex

use parking_lot::Mutex;

/// Where finished notification text goes. Presentation is someone else's job.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, message: &str);
}

pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&self, message: &str) {
        log::info!("[notify] {}", message);
    }
}

#[derive(Default)]
pub struct CollectingSink {
    messages: Mutex<Vec<String>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }
}

impl NotificationSink for CollectingSink {
    fn notify(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}
