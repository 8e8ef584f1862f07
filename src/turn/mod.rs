//! Turn bookkeeping: queued actions and the rules applied at each rotation.

pub mod action;
pub mod phase;

pub use action::{partition, ActionKind, QueuedAction};
pub use phase::{action_quota, reinforcements_for, winner, TurnState};
