//! Flank allocation: the terrain-preference heuristic and the attacker's
//! interactive allocation request.

use rand::Rng;
use serde::Serialize;

use super::flank::{FlankPosition, FlankSplit, ALL_FLANKS};
use crate::board::{Echelon, RegionId, TerrainType, TroopCounts, TroopType, Troops, ALL_TROOP_TYPES};

/// Threshold passes before the heuristic stops sampling.
const MAX_ALLOCATION_PASSES: usize = 32;

/// How much the acceptance threshold drops after each pass over the flanks.
const THRESHOLD_STEP: f64 = 0.2;

/// Splits `count` troops of one type across the flanks, favouring terrain
/// where the type fights well.
///
/// Each pass offers every flank a random chunk of what is left; a flank only
/// takes it if its modifier for `troop` beats the current threshold. The
/// threshold starts at 1.0 and drops by 0.2 per pass, so eventually every
/// flank qualifies.
pub fn terrain_preference_split(
    troop: TroopType,
    count: u32,
    terrain: &[TerrainType; 3],
    rng: &mut impl Rng,
) -> FlankSplit {
    let mut split = [0u32; 3];
    let mut remaining = count;
    let mut threshold = 1.0;
    let mut passes = 0;
    while remaining > 0 {
        if passes == MAX_ALLOCATION_PASSES {
            let best = best_flank_for(troop, terrain);
            split[best.index()] += remaining;
            tracing::warn!(troop = troop.name(), remaining, "allocation pass cap hit");
            break;
        }
        for p in ALL_FLANKS {
            let chunk = ((rng.gen::<f64>() * f64::from(remaining)).ceil() as u32).clamp(1, remaining);
            if terrain[p.index()].modifier(troop) > threshold {
                split[p.index()] += chunk;
                remaining -= chunk;
                if remaining == 0 {
                    break;
                }
            }
        }
        threshold -= THRESHOLD_STEP;
        passes += 1;
    }
    split
}

/// The flank whose terrain suits `troop` best; the leftmost on a tie.
pub fn best_flank_for(troop: TroopType, terrain: &[TerrainType; 3]) -> FlankPosition {
    let mut best = FlankPosition::Left;
    for p in ALL_FLANKS {
        if terrain[p.index()].modifier(troop) > terrain[best.index()].modifier(troop) {
            best = p;
        }
    }
    best
}

/// Runs the heuristic for every troop type, returning per-flank counts.
pub fn auto_allocate(counts: &TroopCounts, terrain: &[TerrainType; 3], rng: &mut impl Rng) -> [TroopCounts; 3] {
    let mut flanks = [TroopCounts::default(); 3];
    for t in ALL_TROOP_TYPES {
        let split = terrain_preference_split(t, counts[t], terrain, rng);
        for p in ALL_FLANKS {
            flanks[p.index()][t] = split[p.index()];
        }
    }
    flanks
}

/// What the attacking player is shown when asked to split one troop type.
///
/// The defender is only visible through echelon labels, never exact counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationRequest {
    pub battle: u32,
    pub attacker: RegionId,
    pub defender: RegionId,
    pub troop_type: TroopType,
    pub available: u32,
    pub flank_terrain: [TerrainType; 3],
    pub defender_estimate: Troops<Option<Echelon>>,
}

impl AllocationRequest {
    /// Obscures exact counts behind echelon labels. Absent types stay absent.
    pub fn estimate(counts: &TroopCounts) -> Troops<Option<Echelon>> {
        counts.map(|_, &c| (c > 0).then(|| Echelon::for_count(c)))
    }

    /// Clamps a proposed split so it never places more than is available,
    /// filling flanks left to right.
    pub fn clamp(&self, split: FlankSplit) -> FlankSplit {
        let mut left = self.available;
        split.map(|n| {
            let take = n.min(left);
            left -= take;
            take
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocationError {
    #[error("battle is not accepting allocations")]
    Closed,
    #[error("an allocation for {0} is already pending")]
    AlreadyPending(&'static str),
    #[error("no allocation is pending")]
    NothingPending,
    #[error("no unallocated {0} remain")]
    NoneRemaining(&'static str),
}
