use super::entry::OutcomeKind;
use super::state::{UserState, VAULT_CAPACITY};
use crate::catalog::Catalog;
use crate::error::IntegrityError;

impl UserState {
    /// Check the invariants that deserialization alone cannot enforce.
    ///
    /// `current_day` clamps an overlong history silently; this is where the
    /// overflow is reported instead. Catalog references are only checked
    /// when a catalog is given.
    pub fn verify_integrity(&self, catalog: Option<&Catalog>) -> Result<(), IntegrityError> {
        let len = self.spin_history.len();
        if len > VAULT_CAPACITY {
            return Err(IntegrityError::HistoryOverflow {
                len,
                capacity: VAULT_CAPACITY,
            });
        }
        let Some(catalog) = catalog else {
            return Ok(());
        };
        for (index, entry) in self.spin_history.iter().enumerate() {
            if catalog.contains(*entry) {
                continue;
            }
            return Err(match entry.kind {
                OutcomeKind::Win => IntegrityError::UnknownPrize { index, id: entry.id },
                OutcomeKind::Reason => IntegrityError::UnknownReason { index, id: entry.id },
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journey::SpinEntry;

    #[test]
    fn fresh_state_is_sound() {
        assert!(UserState::default().verify_integrity(Some(&Catalog::builtin())).is_ok());
    }

    #[test]
    fn reports_overflow_even_without_catalog() {
        let state = UserState {
            spin_history: vec![SpinEntry::reason(0); 26],
            ..Default::default()
        };
        assert_eq!(
            state.verify_integrity(None),
            Err(IntegrityError::HistoryOverflow {
                len: 26,
                capacity: 25
            })
        );
        assert_eq!(state.current_day(), 25);
    }

    #[test]
    fn reports_first_unknown_reference() {
        let state = UserState {
            spin_history: vec![SpinEntry::win(1), SpinEntry::reason(40), SpinEntry::win(77)],
            ..Default::default()
        };
        let catalog = Catalog::builtin();
        assert_eq!(
            state.verify_integrity(Some(&catalog)),
            Err(IntegrityError::UnknownReason { index: 1, id: 40 })
        );
        assert!(state.verify_integrity(None).is_ok());
    }
}
