use elysium_core::{OutcomeKind, VaultGrid, VaultSlot};

use super::Journey;

/// Reason texts are trimmed to this many characters in the grid.
const EXCERPT_CHARS: usize = 40;

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let journey = Journey::open()?;
    let grid = VaultGrid::project(&journey.state, &journey.catalog);

    if json {
        println!("{}", serde_json::to_string_pretty(&grid)?);
        return Ok(());
    }

    for slot in &grid.slots {
        match slot {
            VaultSlot::Locked { day } => println!("{day:>2}  SEC_{day}"),
            VaultSlot::Unlocked(item) => {
                let title = item.title.as_deref().unwrap_or("?");
                let line = match item.kind {
                    OutcomeKind::Win => match item.scheduled {
                        Some(date) => format!("[relic] {title} (visit {date})"),
                        None => format!("[relic] {title}"),
                    },
                    OutcomeKind::Reason => {
                        let voice = if item.has_voice { " [voice]" } else { "" };
                        format!("[echo] \"{}\"{voice}", excerpt(title))
                    }
                };
                println!("{:>2}  {line}", item.day);
            }
        }
    }
    Ok(())
}

fn excerpt(text: &str) -> String {
    if text.chars().count() <= EXCERPT_CHARS {
        return text.to_string();
    }
    let head: String = text.chars().take(EXCERPT_CHARS).collect();
    format!("{head}...")
}
