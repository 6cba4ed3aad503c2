//! Wheel outcome selection.
//!
//! The wheel decides its category before the animation starts and lands on
//! a fixed angle for that category. The outcome itself is drawn uniformly
//! from the catalog items the user has not collected yet.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::journey::{OutcomeKind, SpinEntry, UserState};

/// Full turns before the wheel settles.
pub const EXTRA_TURNS: u32 = 10;

/// Wheel segments; each covers 36 degrees.
pub const SEGMENTS: u32 = 10;

/// Wheel vocabulary for the two outcome categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WheelKind {
    /// Museum prize
    Relic,
    /// Reason unlock
    Echo,
}

impl WheelKind {
    pub fn outcome_kind(self) -> OutcomeKind {
        match self {
            WheelKind::Relic => OutcomeKind::Win,
            WheelKind::Echo => OutcomeKind::Reason,
        }
    }

    /// Angle in degrees, within one turn, where the pointer stops.
    pub fn landing_angle(self) -> f64 {
        match self {
            WheelKind::Relic => 18.0,
            WheelKind::Echo => 54.0,
        }
    }

    /// Absolute rotation target starting from `current` degrees.
    pub fn target_rotation(self, current: f64) -> f64 {
        current + 360.0 * EXTRA_TURNS as f64 + self.landing_angle()
    }
}

impl From<OutcomeKind> for WheelKind {
    fn from(kind: OutcomeKind) -> Self {
        match kind {
            OutcomeKind::Win => WheelKind::Relic,
            OutcomeKind::Reason => WheelKind::Echo,
        }
    }
}

/// Outcome picker.
pub struct WheelSpin<R: Rng> {
    rng: R,
}

impl WheelSpin<Pcg64> {
    /// Reproducible picker for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Pcg64::seed_from_u64(seed),
        }
    }

    /// Picker seeded from the OS.
    pub fn from_entropy() -> Self {
        Self {
            rng: Pcg64::from_entropy(),
        }
    }
}

impl<R: Rng> WheelSpin<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Pick the next outcome, optionally forcing a category.
    ///
    /// Returns `None` when nothing eligible is left.
    pub fn choose(
        &mut self,
        state: &UserState,
        catalog: &Catalog,
        force: Option<WheelKind>,
    ) -> Option<SpinEntry> {
        let remaining: Vec<SpinEntry> = catalog
            .entries()
            .filter(|entry| !state.has_collected(*entry))
            .filter(|entry| force.map_or(true, |k| k.outcome_kind() == entry.kind))
            .collect();
        remaining.choose(&mut self.rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landing_angles_match_segments() {
        assert_eq!(WheelKind::Relic.landing_angle(), 18.0);
        assert_eq!(WheelKind::Echo.landing_angle(), 54.0);
        assert_eq!(WheelKind::Echo.target_rotation(90.0), 90.0 + 3600.0 + 54.0);
        assert_eq!(360 / SEGMENTS, 36);
    }

    #[test]
    fn seeded_picks_are_reproducible() {
        let catalog = Catalog::builtin();
        let state = UserState::default();
        let a = WheelSpin::seeded(7).choose(&state, &catalog, None);
        let b = WheelSpin::seeded(7).choose(&state, &catalog, None);
        assert_eq!(a, b);
        assert!(a.is_some());
    }

    #[test]
    fn forced_kind_is_respected() {
        let catalog = Catalog::builtin();
        let state = UserState::default();
        let mut wheel = WheelSpin::seeded(1);
        for _ in 0..20 {
            let relic = wheel.choose(&state, &catalog, Some(WheelKind::Relic)).unwrap();
            assert_eq!(relic.kind, OutcomeKind::Win);
            let echo = wheel.choose(&state, &catalog, Some(WheelKind::Echo)).unwrap();
            assert_eq!(echo.kind, OutcomeKind::Reason);
        }
    }

    #[test]
    fn never_repeats_collected_items() {
        let catalog = Catalog::builtin();
        let mut state = UserState::default();
        let mut wheel = WheelSpin::seeded(42);
        while let Some(entry) = wheel.choose(&state, &catalog, None) {
            assert!(!state.has_collected(entry));
            state.spin_history.push(entry);
        }
        assert_eq!(state.spin_count(), catalog.entries().count());
    }

    #[test]
    fn exhausted_category_yields_none() {
        let catalog = Catalog::builtin();
        let state = UserState {
            spin_history: catalog.prizes.iter().map(|p| SpinEntry::win(p.id)).collect(),
            ..Default::default()
        };
        let mut wheel = WheelSpin::seeded(3);
        assert!(wheel.choose(&state, &catalog, Some(WheelKind::Relic)).is_none());
        assert!(wheel.choose(&state, &catalog, None).is_some());
    }
}
