//! Terrain categories, per-type combat modifiers, and region terrain mixes.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::unit::{Troops, TroopType};

pub const TERRAIN_TYPE_COUNT: usize = 6;

/// Passes over the category list before flank sampling gives up and uses open ground.
const MAX_SAMPLING_PASSES: usize = 64;

/// Crater weight cap for a region.
pub const MAX_CRATER_WEIGHT: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum TerrainType {
    Craters = 0,
    Open = 1,
    Plains = 2,
    Forest = 3,
    Water = 4,
    Urban = 5,
}

/// Terrain categories in sampling order.
pub const ALL_TERRAIN_TYPES: [TerrainType; TERRAIN_TYPE_COUNT] = [
    TerrainType::Craters,
    TerrainType::Open,
    TerrainType::Plains,
    TerrainType::Forest,
    TerrainType::Water,
    TerrainType::Urban,
];

/// Damage multipliers by terrain, indexed `[terrain][troop type]`.
static TERRAIN_MODIFIERS: [[f64; 3]; TERRAIN_TYPE_COUNT] = [
    [1.4, 1.0, 0.7], // craters
    [1.0, 1.0, 1.0], // open
    [1.0, 1.8, 1.3], // plains
    [2.0, 0.5, 1.2], // forest
    [0.9, 2.2, 0.7], // water
    [2.2, 1.5, 1.0], // urban
];

impl TerrainType {
    /// Damage multiplier applied to `troop` fighting on this terrain.
    pub fn modifier(self, troop: TroopType) -> f64 {
        TERRAIN_MODIFIERS[self as usize][troop as usize]
    }

    /// All three modifiers for this terrain.
    pub fn modifiers(self) -> Troops<f64> {
        Troops::from_fn(|t| self.modifier(t))
    }

    pub const fn name(self) -> &'static str {
        match self {
            TerrainType::Craters => "craters",
            TerrainType::Open => "open",
            TerrainType::Plains => "plains",
            TerrainType::Forest => "forest",
            TerrainType::Water => "water",
            TerrainType::Urban => "urban",
        }
    }

    pub fn from_name(s: &str) -> Option<TerrainType> {
        ALL_TERRAIN_TYPES.iter().copied().find(|t| t.name() == s)
    }
}

impl std::fmt::Display for TerrainType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Fractional weight of each terrain category in a region.
///
/// Weights are independent acceptance probabilities; they are not required
/// to sum to one.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TerrainMix {
    weights: [f64; TERRAIN_TYPE_COUNT],
}

impl TerrainMix {
    /// Builds a mix from weights in `ALL_TERRAIN_TYPES` order.
    pub const fn new(weights: [f64; TERRAIN_TYPE_COUNT]) -> Self {
        TerrainMix { weights }
    }

    /// A region that is entirely one terrain category.
    pub fn uniform(terrain: TerrainType) -> Self {
        let mut weights = [0.0; TERRAIN_TYPE_COUNT];
        weights[terrain as usize] = 1.0;
        TerrainMix { weights }
    }

    pub fn weight(&self, terrain: TerrainType) -> f64 {
        self.weights[terrain as usize]
    }

    /// Adds crater weight, saturating at `MAX_CRATER_WEIGHT`.
    pub fn add_craters(&mut self, amount: f64) {
        let w = &mut self.weights[TerrainType::Craters as usize];
        *w = (*w + amount).min(MAX_CRATER_WEIGHT);
    }

    /// Chooses one terrain per flank.
    ///
    /// Categories with non-zero weight are visited in order and each is
    /// accepted with probability equal to its weight, repeating until three
    /// have been picked. Flanks still empty after the pass cap get open ground.
    pub fn sample_flank_terrain(&self, rng: &mut impl Rng) -> [TerrainType; 3] {
        let mut picked = [TerrainType::Open; 3];
        let mut n = 0;
        for _ in 0..MAX_SAMPLING_PASSES {
            for &t in &ALL_TERRAIN_TYPES {
                let w = self.weight(t);
                if w > 0.0 && rng.gen::<f64>() < w {
                    picked[n] = t;
                    n += 1;
                    if n == 3 {
                        return picked;
                    }
                }
            }
        }
        tracing::warn!(picked = n, "terrain sampling hit pass cap, filling with open ground");
        picked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn modifier_table_values() {
        assert_eq!(TerrainType::Forest.modifier(TroopType::Infantry), 2.0);
        assert_eq!(TerrainType::Water.modifier(TroopType::Helicopter), 2.2);
        assert_eq!(TerrainType::Craters.modifier(TroopType::Armor), 0.7);
        for t in ALL_TERRAIN_TYPES {
            let _ = t.modifiers();
        }
        assert_eq!(TerrainType::Open.modifiers(), Troops::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn uniform_mix_samples_only_that_terrain() {
        let mix = TerrainMix::uniform(TerrainType::Urban);
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(mix.sample_flank_terrain(&mut rng), [TerrainType::Urban; 3]);
        }
    }

    #[test]
    fn empty_mix_falls_back_to_open() {
        let mix = TerrainMix::default();
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(mix.sample_flank_terrain(&mut rng), [TerrainType::Open; 3]);
    }

    #[test]
    fn sampled_terrain_has_positive_weight() {
        let mix = TerrainMix::new([0.0, 0.3, 0.0, 0.5, 0.2, 0.0]);
        let mut rng = SmallRng::seed_from_u64(99);
        for _ in 0..50 {
            for t in mix.sample_flank_terrain(&mut rng) {
                assert!(mix.weight(t) > 0.0, "{t} has zero weight");
            }
        }
    }

    #[test]
    fn craters_saturate() {
        let mut mix = TerrainMix::default();
        mix.add_craters(0.6);
        mix.add_craters(0.6);
        assert_eq!(mix.weight(TerrainType::Craters), MAX_CRATER_WEIGHT);
    }

    #[test]
    fn name_roundtrip() {
        for t in ALL_TERRAIN_TYPES {
            assert_eq!(TerrainType::from_name(t.name()), Some(t));
        }
        assert_eq!(TerrainType::from_name("swamp"), None);
    }
}
