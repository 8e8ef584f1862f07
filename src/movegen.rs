//! Legal origin and destination enumeration.
//!
//! These are the regions a front end highlights: where the side to move may
//! pick an origin, and where a selected origin may send its force.

use crate::board::{Board, RegionId, Side, Theater};

/// Regions `side` may select as an origin: owned, holding troops, and not
/// already used this turn.
pub fn legal_origins(board: &Board, side: Side, moved: &[RegionId]) -> Vec<RegionId> {
    board
        .forces()
        .iter()
        .filter(|f| f.side() == side && f.total_count() > 0 && !moved.contains(&f.region()))
        .map(|f| f.region())
        .collect()
}

/// Regions reachable from `origin` in one step.
pub fn legal_destinations(theater: &Theater, origin: RegionId) -> Vec<RegionId> {
    theater.neighbors(origin).to_vec()
}

/// Every `(origin, destination)` pair available to `side`.
pub fn legal_actions(board: &Board, side: Side, moved: &[RegionId]) -> Vec<(RegionId, RegionId)> {
    legal_origins(board, side, moved)
        .into_iter()
        .flat_map(|o| legal_destinations(board.theater(), o).into_iter().map(move |d| (o, d)))
        .collect()
}
