//! State transitions.
//!
//! Every transition takes the current state by reference and produces a new
//! value; persisting it is a separate step. The plain forms
//! (`record_spin`, `attach_recording`) trust their caller. The guarded forms
//! return a [`Mutation`] so refusals are explicit.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Serialize;
use std::fmt;
use tracing::debug;

use super::audio;
use super::entry::{OutcomeKind, SpinEntry};
use super::state::UserState;
use crate::catalog::Catalog;

/// Why a guarded transition refused its input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectReason {
    /// The journey is complete
    VaultFull,
    /// The daily gate is closed until the next local calendar day
    AlreadySpunToday,
    /// Visit dates must be today or later
    PastDate { date: NaiveDate, today: NaiveDate },
    UnknownPrize { id: u32 },
    UnknownReason { id: u32 },
    /// The item has not been unlocked yet
    NotCollected { entry: SpinEntry },
    /// The item is already in the history
    AlreadyCollected { entry: SpinEntry },
    /// Audio reference is neither a base64 data URI nor an absolute URL
    InvalidAudio,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::VaultFull => write!(f, "the vault is full, the journey is complete"),
            RejectReason::AlreadySpunToday => write!(f, "already spun today, come back tomorrow"),
            RejectReason::PastDate { date, today } => {
                write!(f, "visit date {date} is before today ({today})")
            }
            RejectReason::UnknownPrize { id } => write!(f, "unknown prize {id}"),
            RejectReason::UnknownReason { id } => write!(f, "unknown reason {id}"),
            RejectReason::NotCollected { entry } => write!(f, "{entry} has not been unlocked"),
            RejectReason::AlreadyCollected { entry } => write!(f, "{entry} is already unlocked"),
            RejectReason::InvalidAudio => write!(f, "audio reference is not a data URI or URL"),
        }
    }
}

/// Result of a guarded transition.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Mutation {
    Applied(UserState),
    Rejected(RejectReason),
}

impl Mutation {
    pub fn is_applied(&self) -> bool {
        matches!(self, Mutation::Applied(_))
    }

    /// Convert into a standard `Result`.
    pub fn into_result(self) -> Result<UserState, RejectReason> {
        match self {
            Mutation::Applied(state) => Ok(state),
            Mutation::Rejected(reason) => Err(reason),
        }
    }
}

impl UserState {
    /// Append a resolved outcome. Does not consult the daily gate.
    pub fn record_spin(&self, entry: SpinEntry, now: DateTime<Utc>) -> UserState {
        let mut next = self.clone();
        next.spin_history.push(entry);
        next.last_spin_date = Some(now);
        if next.start_date.is_none() {
            next.start_date = Some(now);
        }
        debug!(%entry, spins = next.spin_history.len(), "recorded spin");
        next
    }

    /// Gate-checked [`record_spin`](Self::record_spin). Refuses outcomes
    /// missing from the catalog or already in the history.
    ///
    /// `now` carries the time zone used for the calendar-day comparison.
    pub fn try_spin<Tz: TimeZone>(
        &self,
        entry: SpinEntry,
        catalog: &Catalog,
        now: &DateTime<Tz>,
    ) -> Mutation {
        if self.is_complete() {
            return Mutation::Rejected(RejectReason::VaultFull);
        }
        if !self.can_spin_at(now) {
            return Mutation::Rejected(RejectReason::AlreadySpunToday);
        }
        if !catalog.contains(entry) {
            return Mutation::Rejected(unknown(entry));
        }
        if self.has_collected(entry) {
            return Mutation::Rejected(RejectReason::AlreadyCollected { entry });
        }
        Mutation::Applied(self.record_spin(entry, now.with_timezone(&Utc)))
    }

    /// Set the visit date for a won prize. Dates before `today` are refused.
    pub fn schedule_visit(&self, prize_id: u32, date: NaiveDate, today: NaiveDate) -> Mutation {
        let entry = SpinEntry::win(prize_id);
        if !self.has_collected(entry) {
            return Mutation::Rejected(RejectReason::NotCollected { entry });
        }
        if date < today {
            return Mutation::Rejected(RejectReason::PastDate { date, today });
        }
        let mut next = self.clone();
        next.scheduled_dates.insert(prize_id, date);
        debug!(prize_id, %date, "scheduled visit");
        Mutation::Applied(next)
    }

    /// Remove a scheduled visit, if any.
    pub fn clear_schedule(&self, prize_id: u32) -> UserState {
        let mut next = self.clone();
        next.scheduled_dates.remove(&prize_id);
        next
    }

    /// Attach a voice recording to a reason, replacing any previous one.
    pub fn attach_recording(&self, reason_id: u32, audio_ref: impl Into<String>) -> UserState {
        let mut next = self.clone();
        next.voice_recordings.insert(reason_id, audio_ref.into());
        debug!(reason_id, "attached recording");
        next
    }

    /// Checked [`attach_recording`](Self::attach_recording): the reason must
    /// be unlocked and the reference must look like audio we can load.
    pub fn try_attach_recording(&self, reason_id: u32, audio_ref: &str) -> Mutation {
        let entry = SpinEntry::reason(reason_id);
        if !self.has_collected(entry) {
            return Mutation::Rejected(RejectReason::NotCollected { entry });
        }
        if audio::classify(audio_ref).is_none() {
            return Mutation::Rejected(RejectReason::InvalidAudio);
        }
        Mutation::Applied(self.attach_recording(reason_id, audio_ref))
    }

    pub fn log_in(&self) -> UserState {
        UserState {
            is_logged_in: true,
            ..self.clone()
        }
    }

    pub fn mark_intro_seen(&self) -> UserState {
        UserState {
            has_seen_intro: true,
            ..self.clone()
        }
    }

    pub fn set_notifications(&self, enabled: bool) -> UserState {
        UserState {
            notifications_enabled: enabled,
            ..self.clone()
        }
    }
}

fn unknown(entry: SpinEntry) -> RejectReason {
    match entry.kind {
        OutcomeKind::Win => RejectReason::UnknownPrize { id: entry.id },
        OutcomeKind::Reason => RejectReason::UnknownReason { id: entry.id },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journey::VAULT_CAPACITY;
    use chrono::Duration;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, day, hour, 0, 0).unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, day).unwrap()
    }

    #[test]
    fn record_spin_appends_one_entry() {
        let before = UserState {
            spin_history: vec![SpinEntry::reason(5)],
            ..Default::default()
        };
        let after = before.record_spin(SpinEntry::win(2), at(19, 10));

        assert_eq!(after.spin_history.len(), before.spin_history.len() + 1);
        assert_eq!(after.spin_history.last().map(|e| e.to_string()).as_deref(), Some("WIN:2"));
        assert_eq!(after.last_spin_date, Some(at(19, 10)));
        assert!(after.collected_prizes().contains(&2));
        // input untouched
        assert_eq!(before.spin_history.len(), 1);
    }

    #[test]
    fn record_spin_sets_start_date_once() {
        let first = UserState::default().record_spin(SpinEntry::win(1), at(1, 9));
        let second = first.record_spin(SpinEntry::reason(0), at(2, 9));
        assert_eq!(second.start_date, Some(at(1, 9)));
    }

    #[test]
    fn record_spin_ignores_gate() {
        let state = UserState {
            spin_history: vec![SpinEntry::win(1), SpinEntry::win(2)],
            last_spin_date: Some(at(19, 8)),
            ..Default::default()
        };
        assert!(!state.can_spin_at(&at(19, 9)));
        let after = state.record_spin(SpinEntry::win(3), at(19, 9));
        assert_eq!(after.spin_count(), 3);
    }

    #[test]
    fn try_spin_honours_bootstrap_then_daily_limit() {
        let catalog = Catalog::builtin();
        let now = at(19, 10);
        let state = UserState::default();

        let state = state.try_spin(SpinEntry::win(1), &catalog, &now).into_result().unwrap();
        let state = state.try_spin(SpinEntry::reason(3), &catalog, &now).into_result().unwrap();
        assert_eq!(
            state.try_spin(SpinEntry::win(2), &catalog, &now),
            Mutation::Rejected(RejectReason::AlreadySpunToday)
        );

        let tomorrow = now + Duration::days(1);
        assert!(state.try_spin(SpinEntry::win(2), &catalog, &tomorrow).is_applied());
    }

    #[test]
    fn try_spin_rejects_full_vault_and_unknown_ids() {
        let catalog = Catalog::builtin();
        let full = UserState {
            spin_history: catalog.entries().take(VAULT_CAPACITY).collect(),
            ..Default::default()
        };
        assert_eq!(
            full.try_spin(SpinEntry::win(1), &catalog, &at(19, 10)),
            Mutation::Rejected(RejectReason::VaultFull)
        );

        let fresh = UserState::default();
        assert_eq!(
            fresh.try_spin(SpinEntry::win(99), &catalog, &at(19, 10)),
            Mutation::Rejected(RejectReason::UnknownPrize { id: 99 })
        );
        assert_eq!(
            fresh.try_spin(SpinEntry::reason(99), &catalog, &at(19, 10)),
            Mutation::Rejected(RejectReason::UnknownReason { id: 99 })
        );
    }

    #[test]
    fn try_spin_rejects_repeated_outcome() {
        let catalog = Catalog::builtin();
        let now = at(19, 10);
        let state = UserState::default()
            .try_spin(SpinEntry::win(1), &catalog, &now)
            .into_result()
            .unwrap();
        assert_eq!(
            state.try_spin(SpinEntry::win(1), &catalog, &now),
            Mutation::Rejected(RejectReason::AlreadyCollected {
                entry: SpinEntry::win(1)
            })
        );
        // same id in the other category is a different item
        assert!(state.try_spin(SpinEntry::reason(1), &catalog, &now).is_applied());
        // the plain form stays permissive
        assert_eq!(state.record_spin(SpinEntry::win(1), now).spin_count(), 2);
    }

    #[test]
    fn schedule_visit_rejects_past_dates() {
        let state = UserState {
            spin_history: vec![SpinEntry::win(4)],
            ..Default::default()
        };
        assert_eq!(
            state.schedule_visit(4, date(18), date(19)),
            Mutation::Rejected(RejectReason::PastDate {
                date: date(18),
                today: date(19)
            })
        );

        let today = state.schedule_visit(4, date(19), date(19)).into_result().unwrap();
        assert_eq!(today.scheduled_dates.get(&4), Some(&date(19)));

        let later = today.schedule_visit(4, date(25), date(19)).into_result().unwrap();
        assert_eq!(later.scheduled_dates.get(&4), Some(&date(25)));
    }

    #[test]
    fn schedule_visit_requires_won_prize() {
        let state = UserState::default();
        assert_eq!(
            state.schedule_visit(4, date(20), date(19)),
            Mutation::Rejected(RejectReason::NotCollected {
                entry: SpinEntry::win(4)
            })
        );
    }

    #[test]
    fn clear_schedule_removes_date() {
        let state = UserState {
            spin_history: vec![SpinEntry::win(4)],
            ..Default::default()
        };
        let scheduled = state.schedule_visit(4, date(20), date(19)).into_result().unwrap();
        assert!(scheduled.clear_schedule(4).scheduled_dates.is_empty());
    }

    #[test]
    fn attach_recording_overwrites() {
        let state = UserState::default()
            .attach_recording(2, "https://cdn.example.org/a.mp3")
            .attach_recording(2, "https://cdn.example.org/b.mp3");
        assert_eq!(
            state.voice_recordings.get(&2).map(String::as_str),
            Some("https://cdn.example.org/b.mp3")
        );
    }

    #[test]
    fn try_attach_recording_validates() {
        let state = UserState {
            spin_history: vec![SpinEntry::reason(2)],
            ..Default::default()
        };
        assert_eq!(
            state.try_attach_recording(3, "https://cdn.example.org/a.mp3"),
            Mutation::Rejected(RejectReason::NotCollected {
                entry: SpinEntry::reason(3)
            })
        );
        assert_eq!(
            state.try_attach_recording(2, "not audio"),
            Mutation::Rejected(RejectReason::InvalidAudio)
        );
        assert!(state
            .try_attach_recording(2, "data:audio/webm;base64,AAAA")
            .is_applied());
    }

    #[test]
    fn flag_setters() {
        let state = UserState::default().log_in().mark_intro_seen().set_notifications(true);
        assert!(state.is_logged_in);
        assert!(state.has_seen_intro);
        assert!(state.notifications_enabled);
        assert!(!state.set_notifications(false).notifications_enabled);
    }

    #[test]
    fn reject_reasons_render() {
        assert_eq!(
            RejectReason::PastDate {
                date: date(1),
                today: date(2)
            }
            .to_string(),
            "visit date 2026-10-01 is before today (2026-10-02)"
        );
        assert_eq!(
            RejectReason::NotCollected {
                entry: SpinEntry::win(3)
            }
            .to_string(),
            "WIN:3 has not been unlocked"
        );
    }
}
