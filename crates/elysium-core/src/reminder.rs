//! Daily reminder decision and payload.
//!
//! The push service only reads `notifications_enabled`; delivery lives
//! outside the library. This module decides whether a reminder is worth
//! sending and builds the notification content, including the fallback used
//! when a push arrives with a missing or non-JSON payload.

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::journey::UserState;

pub const DEFAULT_TITLE: &str = "Elysium";
pub const DEFAULT_BODY: &str = "Nepamiršk, kad myliu tave.";
/// Replaces any earlier reminder still on screen.
pub const REMINDER_TAG: &str = "daily-reminder";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderPayload {
    pub title: String,
    pub body: String,
    pub tag: String,
}

impl Default for ReminderPayload {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            body: DEFAULT_BODY.to_string(),
            tag: REMINDER_TAG.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct PushData {
    title: Option<String>,
    body: Option<String>,
}

impl ReminderPayload {
    /// Build a payload from raw push data.
    ///
    /// JSON with `title` / `body` overrides the defaults field by field.
    /// Anything else becomes the body; empty data keeps the defaults.
    pub fn from_push_data(data: &str) -> Self {
        let mut payload = Self::default();
        match serde_json::from_str::<PushData>(data) {
            Ok(push) => {
                if let Some(title) = push.title.filter(|t| !t.is_empty()) {
                    payload.title = title;
                }
                if let Some(body) = push.body.filter(|b| !b.is_empty()) {
                    payload.body = body;
                }
            }
            Err(_) if !data.trim().is_empty() => payload.body = data.to_string(),
            Err(_) => {}
        }
        payload
    }
}

/// A reminder is due when notifications are on and today's spin is open.
pub fn due<Tz: TimeZone>(state: &UserState, now: &DateTime<Tz>) -> Option<ReminderPayload> {
    (state.notifications_enabled && state.can_spin_at(now)).then(ReminderPayload::default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journey::SpinEntry;
    use chrono::{Duration, Utc};

    #[test]
    fn push_json_overrides_defaults() {
        let payload = ReminderPayload::from_push_data(r#"{"title":"Day 4","body":"Spin!"}"#);
        assert_eq!(payload.title, "Day 4");
        assert_eq!(payload.body, "Spin!");
        assert_eq!(payload.tag, REMINDER_TAG);

        let partial = ReminderPayload::from_push_data(r#"{"body":"Only body"}"#);
        assert_eq!(partial.title, DEFAULT_TITLE);
        assert_eq!(partial.body, "Only body");
    }

    #[test]
    fn push_text_becomes_body() {
        let payload = ReminderPayload::from_push_data("labas rytas");
        assert_eq!(payload.title, DEFAULT_TITLE);
        assert_eq!(payload.body, "labas rytas");
    }

    #[test]
    fn empty_push_keeps_defaults() {
        assert_eq!(ReminderPayload::from_push_data(""), ReminderPayload::default());
        assert_eq!(
            ReminderPayload::from_push_data(r#"{"title":""}"#),
            ReminderPayload::default()
        );
    }

    #[test]
    fn due_only_when_enabled_and_open() {
        let now = Utc::now();
        let disabled = UserState::default();
        assert!(due(&disabled, &now).is_none());

        let enabled = disabled.set_notifications(true);
        assert_eq!(due(&enabled, &now), Some(ReminderPayload::default()));

        let spun_out = UserState {
            spin_history: vec![SpinEntry::win(1), SpinEntry::reason(1)],
            last_spin_date: Some(now),
            notifications_enabled: true,
            ..Default::default()
        };
        assert!(due(&spun_out, &now).is_none());
        assert!(due(&spun_out, &(now + Duration::days(1))).is_some());
    }
}
