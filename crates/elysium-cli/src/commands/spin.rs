use chrono::Local;
use clap::ValueEnum;
use elysium_core::{Mutation, RejectReason, WheelKind, WheelSpin};
use serde::Serialize;

use super::Journey;

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    /// Museum prize
    Relic,
    /// Reason unlock
    Echo,
}

impl From<KindArg> for WheelKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Relic => WheelKind::Relic,
            KindArg::Echo => WheelKind::Echo,
        }
    }
}

#[derive(Serialize)]
struct SpinReport {
    entry: String,
    day: u32,
    kind: WheelKind,
    title: Option<String>,
    landing_angle: f64,
    can_spin_again: bool,
}

pub fn run(kind: Option<KindArg>, seed: Option<u64>) -> Result<(), Box<dyn std::error::Error>> {
    let mut journey = Journey::open()?;
    let now = Local::now();

    if journey.state.is_complete() {
        return Err(RejectReason::VaultFull.to_string().into());
    }
    if !journey.state.can_spin_at(&now) {
        return Err(RejectReason::AlreadySpunToday.to_string().into());
    }

    let mut wheel = match seed.or(journey.config.wheel.seed) {
        Some(seed) => WheelSpin::seeded(seed),
        None => WheelSpin::from_entropy(),
    };
    let force = kind.map(WheelKind::from);
    let entry = wheel
        .choose(&journey.state, &journey.catalog, force)
        .ok_or("nothing left to unlock in this category")?;

    let next = match journey.state.try_spin(entry, &journey.catalog, &now) {
        Mutation::Applied(next) => next,
        Mutation::Rejected(reason) => return Err(reason.to_string().into()),
    };
    journey.save(next)?;

    let wheel_kind = WheelKind::from(entry.kind);
    let report = SpinReport {
        entry: entry.to_string(),
        day: journey.state.spin_count() as u32,
        kind: wheel_kind,
        title: journey.catalog.title(entry).map(str::to_string),
        landing_angle: wheel_kind.landing_angle(),
        can_spin_again: journey.state.can_spin_at(&now),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
