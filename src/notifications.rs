//! Notifications
//!
//! A single transient message. Showing a new one replaces whatever is visible and
//! restarts the timeout; nothing is queued.

use std::fmt;

use jiff::{SignedDuration, Timestamp};

/// Default time a notification stays visible.
pub const DEFAULT_TIMEOUT: SignedDuration = SignedDuration::from_millis(3000);

/// Notification styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The action succeeded.
    Success,

    /// The action was rejected.
    Danger,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Success => "success",
            Severity::Danger => "danger",
        })
    }
}

/// A message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    message: String,
    severity: Severity,
    shown_at: Timestamp,
}

impl Notification {
    /// Message text
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Severity
    pub fn severity(&self) -> Severity {
        self.severity
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}

/// Holds at most one notification and expires it after a fixed timeout.
#[derive(Debug, Clone)]
pub struct Notifier {
    current: Option<Notification>,
    timeout: SignedDuration,
}

impl Notifier {
    /// Creates an idle notifier.
    pub fn new(timeout: SignedDuration) -> Self {
        Self {
            current: None,
            timeout,
        }
    }

    /// Shows `message`, replacing any visible notification.
    pub fn show(&mut self, message: impl Into<String>, severity: Severity, now: Timestamp) {
        self.current = Some(Notification {
            message: message.into(),
            severity,
            shown_at: now,
        });
    }

    /// The notification visible at `now`, if any.
    pub fn visible(&self, now: Timestamp) -> Option<&Notification> {
        self.current
            .as_ref()
            .filter(|notification| now.duration_since(notification.shown_at) < self.timeout)
    }

    /// Returns to idle if the visible notification has timed out.
    pub fn expire(&mut self, now: Timestamp) {
        if self.visible(now).is_none() {
            self.current = None;
        }
    }

    /// Returns to idle immediately.
    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Whether nothing is being shown, ignoring expiry.
    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn at(millis: i64) -> TestResult<Timestamp> {
        Ok(Timestamp::from_millisecond(1_790_000_000_000 + millis)?)
    }

    #[test]
    fn notification_is_visible_until_timeout() -> TestResult {
        let mut notifier = Notifier::default();

        notifier.show("Product added.", Severity::Success, at(0)?);

        assert!(notifier.visible(at(2999)?).is_some());
        assert!(notifier.visible(at(3000)?).is_none());

        Ok(())
    }

    #[test]
    fn new_notification_replaces_and_restarts_timeout() -> TestResult {
        let mut notifier = Notifier::default();

        notifier.show("Product added.", Severity::Success, at(0)?);
        notifier.show("Please check your input.", Severity::Danger, at(2000)?);

        let visible = notifier.visible(at(4000)?).ok_or("notification expired early")?;

        assert_eq!(visible.message(), "Please check your input.");
        assert_eq!(visible.severity(), Severity::Danger);
        assert!(notifier.visible(at(5000)?).is_none());

        Ok(())
    }

    #[test]
    fn expire_returns_to_idle_only_after_timeout() -> TestResult {
        let mut notifier = Notifier::new(SignedDuration::from_millis(100));

        notifier.show("Product deleted.", Severity::Success, at(0)?);
        notifier.expire(at(50)?);

        assert!(!notifier.is_idle());

        notifier.expire(at(100)?);

        assert!(notifier.is_idle());

        Ok(())
    }

    #[test]
    fn dismiss_hides_immediately() -> TestResult {
        let mut notifier = Notifier::default();

        notifier.show("Product updated.", Severity::Success, at(0)?);
        notifier.dismiss();

        assert!(notifier.is_idle());
        assert!(notifier.visible(at(1)?).is_none());

        Ok(())
    }

    #[test]
    fn notification_display_includes_severity() -> TestResult {
        let mut notifier = Notifier::default();

        notifier.show("Product added.", Severity::Success, at(0)?);

        let visible = notifier.visible(at(0)?).ok_or("missing notification")?;

        assert_eq!(visible.to_string(), "[success] Product added.");

        Ok(())
    }
}
