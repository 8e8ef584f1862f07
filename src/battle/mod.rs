//! Battle resolution: flanks, allocation, the tick loop, and reports.

pub mod allocation;
pub mod combat;
pub mod flank;
pub mod report;

pub use allocation::{auto_allocate, best_flank_for, terrain_preference_split, AllocationError, AllocationRequest};
pub use combat::{Battle, BattleError, BattleOutcome, BattleRules, BattleState};
pub use flank::{Flank, FlankPosition, FlankSplit, Role, ALL_FLANKS};
pub use report::{BattleReport, BattleResult};
