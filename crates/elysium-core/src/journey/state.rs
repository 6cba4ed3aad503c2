//! The persisted journey state.
//!
//! `UserState` is the only entity the app stores. It is serialized as a
//! single camelCase JSON object and read back by merging that object over
//! the defaults one key at a time. Missing keys take their default value, and
//! so does any key whose value cannot be read. Within `spinHistory`,
//! `scheduledDates` and `voiceRecordings` only the unreadable items are
//! dropped; the rest of the collection is kept.
//!
//! The collected prize and reason sets are derived from `spin_history`.
//! They are still written out for readers of the JSON file, but values found
//! on load are ignored: the history is authoritative.

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

use super::entry::{OutcomeKind, SpinEntry};

/// Number of days in a journey, and slots in the vault.
pub const VAULT_CAPACITY: usize = 25;

/// Spins allowed before the one-per-day throttle engages.
pub const BOOTSTRAP_SPINS: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserState {
    pub is_logged_in: bool,
    pub has_seen_intro: bool,
    /// Journey start marker. Display only.
    pub start_date: Option<DateTime<Utc>>,
    /// Time of the most recent spin. Only the daily gate reads it.
    pub last_spin_date: Option<DateTime<Utc>>,
    /// Oldest first, append-only.
    pub spin_history: Vec<SpinEntry>,
    pub scheduled_dates: BTreeMap<u32, NaiveDate>,
    /// Opaque audio references (data URI or URL) keyed by reason id.
    pub voice_recordings: BTreeMap<u32, String>,
    pub notifications_enabled: bool,
}

impl UserState {
    /// Number of spins taken so far.
    pub fn spin_count(&self) -> usize {
        self.spin_history.len()
    }

    pub fn is_complete(&self) -> bool {
        self.spin_history.len() >= VAULT_CAPACITY
    }

    /// Prize ids won, derived from the history.
    pub fn collected_prizes(&self) -> BTreeSet<u32> {
        self.collected(OutcomeKind::Win)
    }

    /// Reason ids unlocked, derived from the history.
    pub fn collected_reasons(&self) -> BTreeSet<u32> {
        self.collected(OutcomeKind::Reason)
    }

    pub fn has_collected(&self, entry: SpinEntry) -> bool {
        self.spin_history.contains(&entry)
    }

    fn collected(&self, kind: OutcomeKind) -> BTreeSet<u32> {
        self.spin_history
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.id)
            .collect()
    }
}

/// Wire view of [`UserState`] with the derived collections filled in.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PersistedView<'a> {
    is_logged_in: bool,
    has_seen_intro: bool,
    start_date: Option<DateTime<Utc>>,
    last_spin_date: Option<DateTime<Utc>>,
    collected_prizes: BTreeSet<u32>,
    collected_reasons: BTreeSet<u32>,
    spin_history: &'a [SpinEntry],
    scheduled_dates: &'a BTreeMap<u32, NaiveDate>,
    voice_recordings: &'a BTreeMap<u32, String>,
    notifications_enabled: bool,
}

impl Serialize for UserState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        PersistedView {
            is_logged_in: self.is_logged_in,
            has_seen_intro: self.has_seen_intro,
            start_date: self.start_date,
            last_spin_date: self.last_spin_date,
            collected_prizes: self.collected_prizes(),
            collected_reasons: self.collected_reasons(),
            spin_history: &self.spin_history,
            scheduled_dates: &self.scheduled_dates,
            voice_recordings: &self.voice_recordings,
            notifications_enabled: self.notifications_enabled,
        }
        .serialize(serializer)
    }
}

/// Parse a visit date, accepting `YYYY-MM-DD` or a full RFC 3339 timestamp.
pub fn parse_visit_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

impl<'de> Deserialize<'de> for UserState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let object = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self::merge_stored(&object))
    }
}

impl UserState {
    /// Merge a stored JSON object over the defaults, key by key.
    ///
    /// Unreadable keys keep their default and unreadable collection items are
    /// dropped, each with a warning. Unknown keys, including the derived
    /// collected sets, are ignored.
    pub fn merge_stored(object: &Map<String, Value>) -> Self {
        let defaults = Self::default();
        Self {
            is_logged_in: field(object, "isLoggedIn").unwrap_or(defaults.is_logged_in),
            has_seen_intro: field(object, "hasSeenIntro").unwrap_or(defaults.has_seen_intro),
            start_date: field(object, "startDate").unwrap_or(defaults.start_date),
            last_spin_date: field(object, "lastSpinDate").unwrap_or(defaults.last_spin_date),
            spin_history: object
                .get("spinHistory")
                .map(read_history)
                .unwrap_or(defaults.spin_history),
            scheduled_dates: object
                .get("scheduledDates")
                .map(|value| {
                    read_id_map(value, "scheduledDates", |v| {
                        v.as_str().and_then(parse_visit_date)
                    })
                })
                .unwrap_or(defaults.scheduled_dates),
            voice_recordings: object
                .get("voiceRecordings")
                .map(|value| {
                    read_id_map(value, "voiceRecordings", |v| v.as_str().map(str::to_string))
                })
                .unwrap_or(defaults.voice_recordings),
            notifications_enabled: field(object, "notificationsEnabled")
                .unwrap_or(defaults.notifications_enabled),
        }
    }
}

/// Read one scalar key; `None` when absent or unreadable.
fn field<T: DeserializeOwned>(object: &Map<String, Value>, key: &'static str) -> Option<T> {
    let value = object.get(key)?;
    match T::deserialize(value) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!(key, error = %e, "unreadable journey field, keeping default");
            None
        }
    }
}

/// Well-formed history entries in stored order; malformed ones are dropped.
fn read_history(value: &Value) -> Vec<SpinEntry> {
    let Some(items) = value.as_array() else {
        warn!(key = "spinHistory", "spin history is not a list, keeping default");
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            let entry = item.as_str().and_then(|raw| raw.parse::<SpinEntry>().ok());
            if entry.is_none() {
                warn!(key = "spinHistory", item = %item, "dropping malformed history entry");
            }
            entry
        })
        .collect()
}

/// A map keyed by item id; entries with a bad id or value are dropped.
fn read_id_map<T>(
    value: &Value,
    key: &'static str,
    read: impl Fn(&Value) -> Option<T>,
) -> BTreeMap<u32, T> {
    let Some(entries) = value.as_object() else {
        warn!(key, "not an object, keeping default");
        return BTreeMap::new();
    };
    entries
        .iter()
        .filter_map(|(id, item)| {
            let parsed = id.parse::<u32>().ok().zip(read(item));
            if parsed.is_none() {
                warn!(key, id = %id, item = %item, "dropping unreadable entry");
            }
            parsed
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn default_state_is_zero_value() {
        let state = UserState::default();
        assert!(!state.is_logged_in);
        assert!(!state.has_seen_intro);
        assert!(state.start_date.is_none());
        assert!(state.last_spin_date.is_none());
        assert!(state.spin_history.is_empty());
        assert!(state.scheduled_dates.is_empty());
        assert!(state.voice_recordings.is_empty());
        assert!(!state.notifications_enabled);
    }

    #[test]
    fn collected_sets_follow_history() {
        let state = UserState {
            spin_history: vec![SpinEntry::reason(5), SpinEntry::win(2), SpinEntry::reason(1)],
            ..Default::default()
        };
        assert_eq!(state.collected_prizes(), BTreeSet::from([2]));
        assert_eq!(state.collected_reasons(), BTreeSet::from([1, 5]));
    }

    #[test]
    fn missing_keys_default() {
        let state: UserState =
            serde_json::from_str(r#"{"isLoggedIn":true,"spinHistory":["WIN:3"]}"#).unwrap();
        assert!(state.is_logged_in);
        assert_eq!(state.spin_history, vec![SpinEntry::win(3)]);
        assert!(!state.notifications_enabled);
    }

    #[test]
    fn stale_collected_sets_are_ignored_on_load() {
        let json = r#"{"spinHistory":["REASON:4"],"collectedPrizes":[9],"collectedReasons":[]}"#;
        let state: UserState = serde_json::from_str(json).unwrap();
        assert!(state.collected_prizes().is_empty());
        assert_eq!(state.collected_reasons(), BTreeSet::from([4]));
    }

    #[test]
    fn serializes_camel_case_with_derived_sets() {
        let state = UserState {
            last_spin_date: Some(Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap()),
            spin_history: vec![SpinEntry::win(3)],
            scheduled_dates: BTreeMap::from([(3, NaiveDate::from_ymd_opt(2026, 11, 2).unwrap())]),
            ..Default::default()
        };
        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["collectedPrizes"], serde_json::json!([3]));
        assert_eq!(value["collectedReasons"], serde_json::json!([]));
        assert_eq!(value["spinHistory"], serde_json::json!(["WIN:3"]));
        assert_eq!(value["scheduledDates"]["3"], "2026-11-02");
        assert_eq!(value["lastSpinDate"], "2026-10-19T08:00:00Z");

        let back: UserState = serde_json::from_value(value).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn accepts_iso_timestamps_for_visit_dates() {
        let json = r#"{"scheduledDates":{"4":"2026-12-01T09:30:00.000Z"}}"#;
        let state: UserState = serde_json::from_str(json).unwrap();
        assert_eq!(
            state.scheduled_dates.get(&4),
            Some(&NaiveDate::from_ymd_opt(2026, 12, 1).unwrap())
        );
    }

    #[test]
    fn drops_unparseable_visit_dates() {
        let json = r#"{"scheduledDates":{"4":"next tuesday","5":"2026-12-02","x":"2026-12-03"}}"#;
        let state: UserState = serde_json::from_str(json).unwrap();
        assert_eq!(
            state.scheduled_dates,
            BTreeMap::from([(5, NaiveDate::from_ymd_opt(2026, 12, 2).unwrap())])
        );
    }

    #[test]
    fn unreadable_scalars_keep_defaults() {
        let json = r#"{
            "isLoggedIn": "yes",
            "hasSeenIntro": true,
            "startDate": "2026-10-01",
            "lastSpinDate": 17,
            "notificationsEnabled": null,
            "spinHistory": ["WIN:1", "REASON:2", "WIN:3"]
        }"#;
        let state: UserState = serde_json::from_str(json).unwrap();
        assert!(!state.is_logged_in);
        assert!(state.has_seen_intro);
        assert!(state.start_date.is_none());
        assert!(state.last_spin_date.is_none());
        assert!(!state.notifications_enabled);
        assert_eq!(state.spin_count(), 3);
    }

    #[test]
    fn malformed_history_entries_are_dropped() {
        let json = r#"{"spinHistory":["WIN:1","JACKPOT:2",7,"REASON:+3","REASON:4"]}"#;
        let state: UserState = serde_json::from_str(json).unwrap();
        assert_eq!(state.spin_history, vec![SpinEntry::win(1), SpinEntry::reason(4)]);

        let state: UserState = serde_json::from_str(r#"{"spinHistory":"WIN:1"}"#).unwrap();
        assert!(state.spin_history.is_empty());
    }

    #[test]
    fn non_string_recordings_are_dropped() {
        let json = r#"{"voiceRecordings":{"2":"https://cdn.example.org/2.mp3","3":null}}"#;
        let state: UserState = serde_json::from_str(json).unwrap();
        assert_eq!(state.voice_recordings.len(), 1);
        assert!(state.voice_recordings.contains_key(&2));
    }

    #[test]
    fn non_object_is_an_error() {
        assert!(serde_json::from_str::<UserState>("[]").is_err());
        assert!(serde_json::from_str::<UserState>("null").is_err());
    }
}
