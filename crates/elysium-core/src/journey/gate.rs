//! Daily spin gate and journey day.

use chrono::{DateTime, Local, TimeZone};

use super::state::{UserState, BOOTSTRAP_SPINS, VAULT_CAPACITY};

impl UserState {
    /// 1-based day the user is on, capped at the vault capacity.
    pub fn current_day(&self) -> u32 {
        (self.spin_history.len() + 1).min(VAULT_CAPACITY) as u32
    }

    /// Whether a spin is allowed right now, in the local time zone.
    pub fn can_spin_today(&self) -> bool {
        self.can_spin_at(&Local::now())
    }

    /// Whether a spin is allowed at `now`.
    ///
    /// Rules, first match wins:
    /// 1. a full vault never spins
    /// 2. fewer than two spins always may (bootstrap)
    /// 3. no previous spin date leaves nothing to throttle against
    /// 4. otherwise one spin per calendar day, compared in `now`'s time zone
    pub fn can_spin_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        let spins = self.spin_history.len();
        if spins >= VAULT_CAPACITY {
            return false;
        }
        if spins < BOOTSTRAP_SPINS {
            return true;
        }
        let Some(last) = self.last_spin_date else {
            return true;
        };
        last.with_timezone(&now.timezone()).date_naive() != now.date_naive()
    }
}
