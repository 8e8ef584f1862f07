//! Turn-level state and the per-rotation bookkeeping rules.

use serde::Serialize;

use crate::board::{Board, RegionId, Side, TroopCounts, PLAYABLE_SIDES};

/// What the session is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TurnState {
    /// Ready for an origin selection.
    Initial,
    /// An origin is selected; waiting for a destination.
    WaitForMoveSelect { origin: RegionId },
    /// Queued battles are resolving. Move selection is blocked.
    Battle,
    /// A reinforcement bundle must be deposited before moves resume.
    Reinforcing,
}

impl std::fmt::Display for TurnState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnState::Initial => f.write_str("initial"),
            TurnState::WaitForMoveSelect { origin } => write!(f, "wait_for_move_select({origin})"),
            TurnState::Battle => f.write_str("battle"),
            TurnState::Reinforcing => f.write_str("reinforcing"),
        }
    }
}

/// Number of actions after which a side's turn ends by itself.
pub fn action_quota(board: &Board, side: Side, max_actions: usize) -> usize {
    let active = board
        .forces()
        .iter()
        .filter(|f| f.side() == side && f.total_count() > 0)
        .count();
    active.min(max_actions)
}

/// Sum of the reinforcement vectors of every capital `side` controls.
pub fn reinforcements_for(board: &Board, side: Side) -> TroopCounts {
    board
        .theater()
        .capitals()
        .filter(|&c| board.side_of(c) == side)
        .filter_map(|c| board.theater().reinforcement(c))
        .fold(TroopCounts::default(), |acc, v| acc.saturating_add(&v))
}

/// The winner, if either side holds no regions at all.
pub fn winner(board: &Board) -> Option<Side> {
    PLAYABLE_SIDES
        .iter()
        .copied()
        .find(|&side| board.regions_owned(side) == 0)
        .map(Side::opponent)
}
