//! Queued player actions and how they are classified at execution time.

use serde::Serialize;

use crate::board::{Board, RegionId, Side};

/// A move or attack recorded during a player's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct QueuedAction {
    /// Side that owned the origin when the action was queued.
    pub side: Side,
    pub origin: RegionId,
    pub destination: RegionId,
}

/// What a queued action turns into when the turn resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Destination is friendly or neutral: transfer the whole force.
    Move,
    /// Destination is held by the enemy.
    Battle,
    /// The origin changed hands or emptied since the action was queued.
    Stale,
}

impl QueuedAction {
    pub fn new(side: Side, origin: RegionId, destination: RegionId) -> Self {
        QueuedAction {
            side,
            origin,
            destination,
        }
    }

    /// Classifies the action against the board as it is now.
    pub fn classify(&self, board: &Board) -> ActionKind {
        let Some(source) = board.force(self.origin) else {
            return ActionKind::Stale;
        };
        if source.side() != self.side || source.total_count() == 0 {
            return ActionKind::Stale;
        }
        let dest = board.side_of(self.destination);
        if dest == self.side || dest.is_neutral() {
            ActionKind::Move
        } else {
            ActionKind::Battle
        }
    }
}

/// Splits a turn's actions into moves and battles, in queue order.
///
/// Classification uses the board before any of them is applied; battles are
/// checked again when they are popped.
pub fn partition(actions: &[QueuedAction], board: &Board) -> (Vec<QueuedAction>, Vec<QueuedAction>) {
    let mut moves = Vec::new();
    let mut battles = Vec::new();
    for action in actions {
        match action.classify(board) {
            ActionKind::Move => moves.push(*action),
            ActionKind::Battle => battles.push(*action),
            ActionKind::Stale => {
                tracing::debug!(origin = %action.origin, destination = %action.destination, "stale action dropped");
            }
        }
    }
    (moves, battles)
}
