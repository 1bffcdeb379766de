//! Core domain types: the persisted game record, the live session and its
//! read-only snapshot, and termination-flag aggregation.

pub mod record;
pub mod session;
pub mod snapshot;
pub mod termination;

pub use record::{GameRecord, SeatAssignment, Side};
pub use session::{AppliedMove, Session};
pub use snapshot::GameSnapshot;
pub use termination::TerminationFlags;
