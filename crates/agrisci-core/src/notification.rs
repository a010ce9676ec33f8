// ── Notification feed ──
//
// One slot. `show` always replaces whatever is up; the slot clears itself
// once the configured duration has elapsed or on `dismiss`.

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::config::DEFAULT_NOTIFICATION_DURATION;

/// Presentation hint. Has no effect on behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

/// A notification currently (or most recently) in the slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Monotonic id; the n-th notification shown has `seq == n`.
    pub seq: u64,
    pub message: String,
    pub severity: Severity,
    pub shown_at: Instant,
}

#[derive(Debug)]
pub struct NotificationCenter {
    current: Option<Notification>,
    duration: Duration,
    shown: u64,
}

impl NotificationCenter {
    pub fn new(duration: Duration) -> Self {
        Self {
            current: None,
            duration,
            shown: 0,
        }
    }

    /// Replace the slot with a new notification. Returns its sequence number.
    pub fn show(&mut self, message: impl Into<String>, severity: Severity) -> u64 {
        self.show_at(message, severity, Instant::now())
    }

    pub fn show_at(&mut self, message: impl Into<String>, severity: Severity, now: Instant) -> u64 {
        self.shown += 1;
        self.current = Some(Notification {
            seq: self.shown,
            message: message.into(),
            severity,
            shown_at: now,
        });
        self.shown
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Clear the slot if its notification has expired. Returns `true` when
    /// something was dismissed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let expired = self
            .current
            .as_ref()
            .is_some_and(|n| now.saturating_duration_since(n.shown_at) >= self.duration);
        if expired {
            self.current = None;
        }
        expired
    }

    /// The notification still visible at `now`, if any.
    pub fn visible(&self, now: Instant) -> Option<&Notification> {
        self.current
            .as_ref()
            .filter(|n| now.saturating_duration_since(n.shown_at) < self.duration)
    }

    /// The slot contents regardless of expiry.
    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    /// Total number of notifications shown so far.
    pub fn shown_count(&self) -> u64 {
        self.shown
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_DURATION)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn latest_overwrites_previous() {
        let mut center = NotificationCenter::default();
        let t0 = Instant::now();
        center.show_at("first", Severity::Info, t0);
        let seq = center.show_at("second", Severity::Error, t0);

        let shown = center.visible(t0).unwrap();
        assert_eq!(shown.message, "second");
        assert_eq!(shown.severity, Severity::Error);
        assert_eq!(seq, 2);
        assert_eq!(center.shown_count(), 2);
    }

    #[test]
    fn auto_dismisses_after_duration() {
        let mut center = NotificationCenter::new(Duration::from_secs(6));
        let t0 = Instant::now();
        center.show_at("saved", Severity::Success, t0);

        let before = t0 + Duration::from_millis(5_999);
        let after = t0 + Duration::from_secs(6);
        assert!(center.visible(before).is_some());
        assert!(!center.tick(before));
        assert!(center.visible(after).is_none());
        assert!(center.tick(after));
        assert!(center.current().is_none());
    }

    #[test]
    fn dismiss_clears_slot() {
        let mut center = NotificationCenter::default();
        center.show("hello", Severity::Warning);
        center.dismiss();
        assert!(center.current().is_none());
        assert_eq!(center.shown_count(), 1);
    }

    #[test]
    fn severity_displays_lowercase() {
        assert_eq!(Severity::Warning.to_string(), "warning");
    }
}
