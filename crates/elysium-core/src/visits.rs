//! Upcoming museum visits.

use chrono::NaiveDate;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::journey::UserState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledVisit {
    pub prize_id: u32,
    pub date: NaiveDate,
    pub museum: Option<String>,
    pub ticket_url: Option<String>,
}

/// Visits planned for `today` or later, earliest first.
pub fn upcoming_visits(state: &UserState, catalog: &Catalog, today: NaiveDate) -> Vec<ScheduledVisit> {
    let mut visits: Vec<ScheduledVisit> = state
        .scheduled_dates
        .iter()
        .filter(|(_, date)| **date >= today)
        .map(|(&prize_id, &date)| {
            let prize = catalog.prize(prize_id);
            ScheduledVisit {
                prize_id,
                date,
                museum: prize.map(|p| p.name.clone()),
                ticket_url: prize.and_then(|p| p.ticket_url.clone()),
            }
        })
        .collect();
    visits.sort_by_key(|v| (v.date, v.prize_id));
    visits
}
