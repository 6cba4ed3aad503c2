//! Journey progression: the persisted state, the daily spin gate and the
//! transitions applied by the wheel, scheduler and recording screens.

mod audio;
mod entry;
mod gate;
mod integrity;
mod mutation;
mod state;

pub use audio::{classify as classify_audio_ref, AudioRefKind};
pub use entry::{OutcomeKind, SpinEntry};
pub use mutation::{Mutation, RejectReason};
pub use state::{parse_visit_date, UserState, BOOTSTRAP_SPINS, VAULT_CAPACITY};
