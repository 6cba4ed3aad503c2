use clap::Subcommand;
use elysium_core::UserState;

use super::Journey;

#[derive(Subcommand)]
pub enum SessionAction {
    /// Mark the user as logged in
    Login,
    /// Mark the intro as seen
    Intro,
    /// Turn daily reminders on or off
    Notify {
        #[arg(value_parser = ["on", "off"])]
        state: String,
    },
    /// Start the journey over
    Reset,
}

pub fn run(action: SessionAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut journey = Journey::open()?;

    match action {
        SessionAction::Login => {
            let next = journey.state.log_in();
            journey.save(next)?;
            println!("logged in");
        }
        SessionAction::Intro => {
            let next = journey.state.mark_intro_seen();
            journey.save(next)?;
            println!("intro marked as seen");
        }
        SessionAction::Notify { state } => {
            let enabled = state == "on";
            let next = journey.state.set_notifications(enabled);
            journey.save(next)?;
            println!("reminders {state}");
        }
        SessionAction::Reset => {
            let fresh = UserState::default()
                .set_notifications(journey.config.reminders.enabled_by_default);
            journey.save(fresh)?;
            println!("journey reset");
        }
    }
    Ok(())
}
