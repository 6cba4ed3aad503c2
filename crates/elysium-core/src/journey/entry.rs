//! Spin outcomes and their tagged history form (`WIN:<id>` / `REASON:<id>`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Category of a resolved spin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    /// A museum visit prize
    Win,
    /// A romantic reason unlock
    Reason,
}

impl OutcomeKind {
    /// Tag used in the persisted history string.
    pub fn tag(&self) -> &'static str {
        match self {
            OutcomeKind::Win => "WIN",
            OutcomeKind::Reason => "REASON",
        }
    }
}

/// One entry of the spin history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SpinEntry {
    pub kind: OutcomeKind,
    pub id: u32,
}

impl SpinEntry {
    pub fn win(id: u32) -> Self {
        Self {
            kind: OutcomeKind::Win,
            id,
        }
    }

    pub fn reason(id: u32) -> Self {
        Self {
            kind: OutcomeKind::Reason,
            id,
        }
    }
}

impl fmt::Display for SpinEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.tag(), self.id)
    }
}

impl FromStr for SpinEntry {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ValidationError::MalformedEntry(s.to_string());
        let (tag, id) = s.split_once(':').ok_or_else(malformed)?;
        // Canonical decimal only: no sign, no padding zeros.
        let canonical = !id.is_empty()
            && id.bytes().all(|b| b.is_ascii_digit())
            && (id == "0" || !id.starts_with('0'));
        if !canonical {
            return Err(malformed());
        }
        let id: u32 = id.parse().map_err(|_| malformed())?;
        let kind = match tag {
            "WIN" => OutcomeKind::Win,
            "REASON" => OutcomeKind::Reason,
            _ => return Err(malformed()),
        };
        Ok(Self { kind, id })
    }
}

impl TryFrom<String> for SpinEntry {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SpinEntry> for String {
    fn from(entry: SpinEntry) -> Self {
        entry.to_string()
    }
}
