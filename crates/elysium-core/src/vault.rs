//! Memory Vault projection.
//!
//! Turns the spin history into the fixed 25-slot grid shown by the
//! collection screen. Slot `i` holds calendar day `i + 1`. Walking the
//! history newest first with index `idx`, an entry lands on day
//! `len - idx`, so the latest spin sits on the highest filled day and the
//! first spin on day 1. Slots past the history are locked.
//!
//! The projection only reads the state.

use chrono::NaiveDate;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::journey::{OutcomeKind, SpinEntry, UserState, VAULT_CAPACITY};

/// Raw slot assignment without catalog lookups.
///
/// Entries whose day would pass the vault capacity (only possible for an
/// overlong history) are left out.
pub fn project_history(history: &[SpinEntry]) -> [Option<SpinEntry>; VAULT_CAPACITY] {
    let mut slots = [None; VAULT_CAPACITY];
    let len = history.len();
    for (idx, entry) in history.iter().rev().enumerate() {
        let day = len - idx;
        if let Some(slot) = slots.get_mut(day - 1) {
            *slot = Some(*entry);
        }
    }
    slots
}

/// An unlocked vault cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VaultItem {
    pub day: u32,
    pub entry: SpinEntry,
    pub kind: OutcomeKind,
    pub item_id: u32,
    /// Museum name or reason text; `None` if the catalog lacks the id.
    pub title: Option<String>,
    pub image: Option<String>,
    /// Reasons only: a voice recording is attached.
    pub has_voice: bool,
    /// Prizes only: the planned visit date.
    pub scheduled: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum VaultSlot {
    Locked { day: u32 },
    Unlocked(VaultItem),
}

impl VaultSlot {
    pub fn day(&self) -> u32 {
        match self {
            VaultSlot::Locked { day } => *day,
            VaultSlot::Unlocked(item) => item.day,
        }
    }

    pub fn item(&self) -> Option<&VaultItem> {
        match self {
            VaultSlot::Locked { .. } => None,
            VaultSlot::Unlocked(item) => Some(item),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VaultGrid {
    pub slots: Vec<VaultSlot>,
}

impl VaultGrid {
    pub fn project(state: &UserState, catalog: &Catalog) -> Self {
        let slots = project_history(&state.spin_history)
            .iter()
            .enumerate()
            .map(|(i, slot)| {
                let day = i as u32 + 1;
                match slot {
                    None => VaultSlot::Locked { day },
                    Some(entry) => VaultSlot::Unlocked(resolve(state, catalog, day, *entry)),
                }
            })
            .collect();
        Self { slots }
    }

    pub fn unlocked(&self) -> impl Iterator<Item = &VaultItem> {
        self.slots.iter().filter_map(VaultSlot::item)
    }

    /// Slot for a 1-based day.
    pub fn day(&self, day: u32) -> Option<&VaultSlot> {
        self.slots.get((day as usize).checked_sub(1)?)
    }
}

fn resolve(state: &UserState, catalog: &Catalog, day: u32, entry: SpinEntry) -> VaultItem {
    let (title, image, has_voice, scheduled) = match entry.kind {
        OutcomeKind::Win => {
            let prize = catalog.prize(entry.id);
            (
                prize.map(|p| p.name.clone()),
                prize.and_then(|p| p.image.clone()),
                false,
                state.scheduled_dates.get(&entry.id).copied(),
            )
        }
        OutcomeKind::Reason => (
            catalog.reason(entry.id).map(|r| r.text.clone()),
            None,
            state.voice_recordings.contains_key(&entry.id),
            None,
        ),
    };
    VaultItem {
        day,
        entry,
        kind: entry.kind,
        item_id: entry.id,
        title,
        image,
        has_voice,
        scheduled,
    }
}
