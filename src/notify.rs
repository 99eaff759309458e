//! The notification sink: short user-visible messages ("toasts") emitted by
//! the editor after selections, deletions, tool switches and actions.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

use crate::util::time;

/// Receives user-visible messages from the editor
pub trait Notifier: Send {
    fn notify(&mut self, message: &str);
}

impl<F> Notifier for F
where
    F: FnMut(&str) + Send,
{
    fn notify(&mut self, message: &str) {
        self(message)
    }
}

/// Writes every message to the log. Used when nobody displays toasts.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, message: &str) {
        log::info!("{}", message);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub message: String,
    /// Seconds since the UNIX epoch
    pub created_at: f64,
}

/// A bounded queue of recent toasts, shared between the editor (writer) and
/// whatever draws them (reader).
#[derive(Debug, Clone)]
pub struct ToastQueue {
    toasts: Arc<Mutex<VecDeque<Toast>>>,
    capacity: usize,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::with_capacity(8)
    }
}

impl ToastQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            toasts: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&self, message: &str, created_at: f64) {
        let mut toasts = self.toasts.lock();
        if toasts.len() == self.capacity {
            toasts.pop_front();
        }
        toasts.push_back(Toast {
            message: message.to_string(),
            created_at,
        });
    }

    /// Drops toasts older than `lifetime_secs` and returns the rest, oldest first
    pub fn live(&self, now: f64, lifetime_secs: f64) -> Vec<Toast> {
        let mut toasts = self.toasts.lock();
        toasts.retain(|toast| now - toast.created_at < lifetime_secs);
        toasts.iter().cloned().collect()
    }

    pub fn messages(&self) -> Vec<String> {
        self.toasts.lock().iter().map(|toast| toast.message.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.toasts.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.lock().is_empty()
    }
}

impl Notifier for ToastQueue {
    fn notify(&mut self, message: &str) {
        log::info!("{}", message);
        self.push(message, time::current_time_secs());
    }
}
