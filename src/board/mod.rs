//! Board representation: regions, troops, forces, and the live board state.

pub mod adjacency;
pub mod force;
pub mod region;
pub mod setup;
pub mod side;
pub mod state;
pub mod terrain;
pub mod unit;

pub use force::Force;
pub use region::{RegionId, RegionInfo, RegionParseError, Theater, TheaterError, REGION_COUNT};
pub use setup::{CAPITALS, INITIAL_DEPLOYMENT};
pub use side::{Side, PLAYABLE_SIDES};
pub use state::Board;
pub use terrain::{TerrainMix, TerrainType, ALL_TERRAIN_TYPES};
pub use unit::{
    Echelon, TroopCounts, TroopDelta, TroopType, Troops, Unit, UnitView, ALL_TROOP_TYPES,
};
