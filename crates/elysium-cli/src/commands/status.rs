use chrono::{Local, Timelike};
use elysium_core::reminder;
use serde::Serialize;

use super::Journey;

#[derive(Serialize)]
struct StatusReport {
    day: u32,
    spins: usize,
    can_spin: bool,
    complete: bool,
    prizes: usize,
    reasons: usize,
    logged_in: bool,
    seen_intro: bool,
    notifications: bool,
    reminder_due: bool,
}

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let journey = Journey::open()?;
    let state = &journey.state;
    let now = Local::now();

    let reminder_due =
        now.hour() >= journey.config.reminders.hour && reminder::due(state, &now).is_some();
    let report = StatusReport {
        day: state.current_day(),
        spins: state.spin_count(),
        can_spin: state.can_spin_at(&now),
        complete: state.is_complete(),
        prizes: state.collected_prizes().len(),
        reasons: state.collected_reasons().len(),
        logged_in: state.is_logged_in,
        seen_intro: state.has_seen_intro,
        notifications: state.notifications_enabled,
        reminder_due,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Day {} of 25", report.day);
    if report.complete {
        println!("The vault is full. Journey complete.");
    } else if report.can_spin {
        println!("The wheel is ready.");
    } else {
        println!("Already spun today. Come back tomorrow.");
    }
    println!("Relics: {}  Echoes: {}", report.prizes, report.reasons);
    println!(
        "Reminders: {}",
        if report.notifications { "on" } else { "off" }
    );
    Ok(())
}
