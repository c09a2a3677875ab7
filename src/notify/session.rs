// Tue Jan 20 2026 - Alex

use crate::notify::DedupKey;
use ahash::AHashSet;
use parking_lot::{Mutex, RwLock};

/// Observation state for one navigation scope: which subject is on screen,
/// which (subject, signal) keys have already produced a notification, and
/// the last subject the companion signal fired for.
///
/// Owned by the navigation side and shared by reference with the notifier.
/// Hooks hit this from arbitrary host threads.
pub struct ObservationSession {
    focused: RwLock<Option<String>>,
    seen: Mutex<AHashSet<DedupKey>>,
    last_notified: Mutex<Option<String>>,
}

impl ObservationSession {
    pub fn new() -> Self {
        Self {
            focused: RwLock::new(None),
            seen: Mutex::new(AHashSet::new()),
            last_notified: Mutex::new(None),
        }
    }

    pub fn focus(&self, subject: &str) {
        *self.focused.write() = Some(subject.to_string());
    }

    /// New profile view: focus the subject and forget what was shown before.
    pub fn begin_scope(&self, subject: &str) {
        self.clear_seen();
        self.focus(subject);
    }

    pub fn focused(&self) -> Option<String> {
        self.focused.read().clone().filter(|s| !s.is_empty())
    }

    pub fn is_focused_on(&self, subject: &str) -> bool {
        !subject.is_empty() && self.focused.read().as_deref() == Some(subject)
    }

    /// Clears focus only if it still points at `subject`.
    pub fn clear_focus_if(&self, subject: &str) -> bool {
        let mut focused = self.focused.write();
        if focused.as_deref() == Some(subject) {
            *focused = None;
            true
        } else {
            false
        }
    }

    /// Records the key; true if it had not been seen in this scope.
    pub fn mark_seen(&self, key: DedupKey) -> bool {
        self.seen.lock().insert(key)
    }

    pub fn seen_count(&self) -> usize {
        self.seen.lock().len()
    }

    pub fn clear_seen(&self) {
        self.seen.lock().clear();
    }

    /// Stores `subject` as the last notified one; false if it already was.
    pub fn swap_last_notified(&self, subject: &str) -> bool {
        let mut last = self.last_notified.lock();
        if last.as_deref() == Some(subject) {
            return false;
        }
        *last = Some(subject.to_string());
        true
    }

    pub fn last_notified(&self) -> Option<String> {
        self.last_notified.lock().clone()
    }
}

impl Default for ObservationSession {
    fn default() -> Self {
        Self::new()
    }
}
