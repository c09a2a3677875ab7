// Tue Jan 20 2026 - Alex

use crate::config::FeatureFlags;
use crate::detect::ValuePolicy;
use crate::notify::{DedupKey, DelayScheduler, NotificationSink, ObservationSession};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_CLEAR_DELAY: Duration = Duration::from_millis(2000);

const COMPANION_SIGNAL_MESSAGE: &str = "This user has hidden their story from you!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuppressReason {
    FeatureDisabled,
    NoSubject,
    NotFocused,
    Duplicate,
    NegativeValue,
}

impl fmt::Display for SuppressReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::FeatureDisabled => "feature disabled",
            Self::NoSubject => "no subject",
            Self::NotFocused => "subject not focused",
            Self::Duplicate => "already notified",
            Self::NegativeValue => "negative value",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyOutcome {
    Notified(String),
    Suppressed(SuppressReason),
}

impl NotifyOutcome {
    pub fn is_notified(&self) -> bool {
        matches!(self, Self::Notified(_))
    }
}

/// Turns hook observations into at most one notification per dedup key
/// within the session's current scope.
pub struct EventNotifier {
    session: Arc<ObservationSession>,
    sink: Arc<dyn NotificationSink>,
    scheduler: Arc<dyn DelayScheduler>,
    flags: Arc<RwLock<FeatureFlags>>,
    clear_delay: Duration,
    value_policy: ValuePolicy,
}

impl EventNotifier {
    pub fn new(
        session: Arc<ObservationSession>,
        sink: Arc<dyn NotificationSink>,
        scheduler: Arc<dyn DelayScheduler>,
        flags: Arc<RwLock<FeatureFlags>>,
    ) -> Self {
        Self {
            session,
            sink,
            scheduler,
            flags,
            clear_delay: DEFAULT_CLEAR_DELAY,
            value_policy: ValuePolicy::TrueOnly,
        }
    }

    pub fn with_clear_delay(mut self, delay: Duration) -> Self {
        self.clear_delay = delay;
        self
    }

    pub fn with_value_policy(mut self, policy: ValuePolicy) -> Self {
        self.value_policy = policy;
        self
    }

    pub fn session(&self) -> &Arc<ObservationSession> {
        &self.session
    }

    /// Follow status for `subject` as reported by the hooked method `source`.
    /// Notifies once per (subject, source) in a scope, whatever the value.
    pub fn on_follow_status(
        &self,
        source: &str,
        subject: Option<&str>,
        label: Option<&str>,
        follows: bool,
    ) -> NotifyOutcome {
        if !self.flags.read().show_follower_toast {
            return self.suppress(source, SuppressReason::FeatureDisabled);
        }
        let Some(subject) = subject.filter(|s| !s.is_empty()) else {
            return self.suppress(source, SuppressReason::NoSubject);
        };
        if !self.session.is_focused_on(subject) {
            return self.suppress(source, SuppressReason::NotFocused);
        }
        if !self.session.mark_seen(DedupKey::new(subject, source)) {
            return self.suppress(source, SuppressReason::Duplicate);
        }

        let message = follow_message(subject, label, follows);
        self.sink.notify(&message);
        self.schedule_clear(subject);
        NotifyOutcome::Notified(message)
    }

    /// Companion signal found next to the follow-status method. Reported
    /// for the focused subject, once until a different subject fires.
    pub fn on_story_blocked(&self, blocked: bool) -> NotifyOutcome {
        const SOURCE: &str = "story-blocked";

        if !self.flags.read().show_story_hidden_toast {
            return self.suppress(SOURCE, SuppressReason::FeatureDisabled);
        }
        if !blocked {
            return NotifyOutcome::Suppressed(SuppressReason::NegativeValue);
        }
        let Some(subject) = self.session.focused() else {
            return self.suppress(SOURCE, SuppressReason::NoSubject);
        };
        if !self.session.swap_last_notified(&subject) {
            return self.suppress(SOURCE, SuppressReason::Duplicate);
        }

        self.sink.notify(COMPANION_SIGNAL_MESSAGE);
        NotifyOutcome::Notified(COMPANION_SIGNAL_MESSAGE.to_string())
    }

    /// Detector signal from method `source`. `subject` is the identifier read
    /// off the receiver when one was available; otherwise the focused
    /// subject is assumed.
    pub fn on_signal(&self, source: &str, subject: Option<&str>, value: bool, message: &str) -> NotifyOutcome {
        if !self.flags.read().show_story_hide_toast {
            return self.suppress(source, SuppressReason::FeatureDisabled);
        }
        if !value && self.value_policy == ValuePolicy::TrueOnly {
            return NotifyOutcome::Suppressed(SuppressReason::NegativeValue);
        }
        let Some(focused) = self.session.focused() else {
            return self.suppress(source, SuppressReason::NoSubject);
        };
        if subject.is_some_and(|s| s != focused) {
            return self.suppress(source, SuppressReason::NotFocused);
        }

        let mut key = DedupKey::new(&focused, source);
        if self.value_policy == ValuePolicy::LogBoth {
            key = key.with_value(value);
        }
        if !self.session.mark_seen(key) {
            return self.suppress(source, SuppressReason::Duplicate);
        }

        log::info!("Detected: {} (method: {}, subject: {})", message, source, focused);
        self.sink.notify(message);
        NotifyOutcome::Notified(message.to_string())
    }

    fn schedule_clear(&self, subject: &str) {
        let session = Arc::clone(&self.session);
        let subject = subject.to_string();
        self.scheduler.schedule(
            self.clear_delay,
            Box::new(move || {
                if session.clear_focus_if(&subject) {
                    log::debug!("Cleared stale focus on {}", subject);
                }
            }),
        );
    }

    fn suppress(&self, source: &str, reason: SuppressReason) -> NotifyOutcome {
        log::trace!("Suppressed {}: {}", source, reason);
        NotifyOutcome::Suppressed(reason)
    }
}

pub fn follow_message(subject: &str, label: Option<&str>, follows: bool) -> String {
    let status = if follows { "follows you" } else { "doesn't follow you" };
    match label.filter(|l| !l.is_empty()) {
        Some(label) => format!("@{} ({}) {}", label, subject, status),
        None => format!("({}) {}", subject, status),
    }
}
