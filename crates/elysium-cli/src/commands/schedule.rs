use chrono::Local;
use clap::Subcommand;
use elysium_core::journey::parse_visit_date;
use elysium_core::upcoming_visits;

use super::Journey;

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Plan a visit for a won museum prize
    Set {
        /// Prize id
        prize_id: u32,
        /// Visit date (YYYY-MM-DD)
        date: String,
    },
    /// Remove a planned visit
    Clear {
        /// Prize id
        prize_id: u32,
    },
    /// List upcoming visits
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: ScheduleAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut journey = Journey::open()?;
    let today = Local::now().date_naive();

    match action {
        ScheduleAction::Set { prize_id, date } => {
            let date =
                parse_visit_date(&date).ok_or_else(|| format!("invalid date '{date}', expected YYYY-MM-DD"))?;
            let next = journey
                .state
                .schedule_visit(prize_id, date, today)
                .into_result()
                .map_err(|reason| reason.to_string())?;
            journey.save(next)?;
            println!("visit to prize {prize_id} scheduled for {date}");
        }
        ScheduleAction::Clear { prize_id } => {
            let next = journey.state.clear_schedule(prize_id);
            journey.save(next)?;
            println!("visit to prize {prize_id} cleared");
        }
        ScheduleAction::List { json } => {
            let visits = upcoming_visits(&journey.state, &journey.catalog, today);
            if json {
                println!("{}", serde_json::to_string_pretty(&visits)?);
            } else if visits.is_empty() {
                println!("no upcoming visits");
            } else {
                for visit in visits {
                    let museum = visit.museum.as_deref().unwrap_or("unknown museum");
                    println!("{}  {museum}", visit.date);
                }
            }
        }
    }
    Ok(())
}
