//! Troop types and health-tracked unit stacks.
//!
//! A `Unit` is one troop type's stack inside a force. Health is the
//! authoritative quantity; the troop count is always derived from it.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use super::region::RegionId;
use super::side::Side;

/// Number of troop types.
pub const TROOP_TYPE_COUNT: usize = 3;

/// Tolerance applied when deriving counts from float health.
const HEALTH_EPSILON: f64 = 1e-9;

/// The kind of troops in a unit stack. Order is fixed and used for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum TroopType {
    Infantry = 0,
    Helicopter = 1,
    Armor = 2,
}

/// All troop types in index order.
pub const ALL_TROOP_TYPES: [TroopType; TROOP_TYPE_COUNT] =
    [TroopType::Infantry, TroopType::Helicopter, TroopType::Armor];

impl TroopType {
    /// Health carried by a single troop of this type.
    pub const fn hp_per_unit(self) -> f64 {
        match self {
            TroopType::Infantry => 10.0,
            TroopType::Helicopter => 125.0,
            TroopType::Armor => 250.0,
        }
    }

    /// Base damage dealt per engaged troop per tick.
    pub const fn damage_per_unit(self) -> f64 {
        match self {
            TroopType::Infantry => 2.0,
            TroopType::Helicopter => 100.0,
            TroopType::Armor => 100.0,
        }
    }

    /// True for the types whose fire leaves craters.
    pub const fn is_heavy(self) -> bool {
        !matches!(self, TroopType::Infantry)
    }

    pub const fn name(self) -> &'static str {
        match self {
            TroopType::Infantry => "infantry",
            TroopType::Helicopter => "helicopter",
            TroopType::Armor => "armor",
        }
    }

    pub fn from_name(s: &str) -> Option<TroopType> {
        match s {
            "infantry" | "inf" => Some(TroopType::Infantry),
            "helicopter" | "heli" => Some(TroopType::Helicopter),
            "armor" | "arm" => Some(TroopType::Armor),
            _ => None,
        }
    }
}

/// A value per troop type, indexed by `TroopType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Troops<T> {
    pub infantry: T,
    pub helicopter: T,
    pub armor: T,
}

/// Troop counts per type.
pub type TroopCounts = Troops<u32>;

/// Signed count changes per type.
pub type TroopDelta = Troops<i64>;

impl<T> Troops<T> {
    pub const fn new(infantry: T, helicopter: T, armor: T) -> Self {
        Troops {
            infantry,
            helicopter,
            armor,
        }
    }

    /// Builds a record by evaluating `f` for each troop type in order.
    pub fn from_fn(mut f: impl FnMut(TroopType) -> T) -> Self {
        Troops {
            infantry: f(TroopType::Infantry),
            helicopter: f(TroopType::Helicopter),
            armor: f(TroopType::Armor),
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(TroopType, &T) -> U) -> Troops<U> {
        Troops {
            infantry: f(TroopType::Infantry, &self.infantry),
            helicopter: f(TroopType::Helicopter, &self.helicopter),
            armor: f(TroopType::Armor, &self.armor),
        }
    }
}

impl<T: Copy> Troops<T> {
    /// Iterates `(type, value)` pairs in troop-type order.
    pub fn iter(&self) -> impl Iterator<Item = (TroopType, T)> + '_ {
        ALL_TROOP_TYPES.iter().map(move |&t| (t, self[t]))
    }
}

impl<T> Index<TroopType> for Troops<T> {
    type Output = T;

    fn index(&self, t: TroopType) -> &T {
        match t {
            TroopType::Infantry => &self.infantry,
            TroopType::Helicopter => &self.helicopter,
            TroopType::Armor => &self.armor,
        }
    }
}

impl<T> IndexMut<TroopType> for Troops<T> {
    fn index_mut(&mut self, t: TroopType) -> &mut T {
        match t {
            TroopType::Infantry => &mut self.infantry,
            TroopType::Helicopter => &mut self.helicopter,
            TroopType::Armor => &mut self.armor,
        }
    }
}

impl TroopCounts {
    pub fn total(&self) -> u32 {
        self.infantry + self.helicopter + self.armor
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn saturating_sub(&self, other: &TroopCounts) -> TroopCounts {
        Troops::from_fn(|t| self[t].saturating_sub(other[t]))
    }

    pub fn saturating_add(&self, other: &TroopCounts) -> TroopCounts {
        Troops::from_fn(|t| self[t].saturating_add(other[t]))
    }

    /// Per-type minimum of two records.
    pub fn min(&self, other: &TroopCounts) -> TroopCounts {
        Troops::from_fn(|t| self[t].min(other[t]))
    }

    pub fn as_delta(&self) -> TroopDelta {
        self.map(|_, &c| i64::from(c))
    }

    pub fn negated(&self) -> TroopDelta {
        self.map(|_, &c| -i64::from(c))
    }
}

impl std::fmt::Display for TroopCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.infantry, self.helicopter, self.armor)
    }
}

/// A single troop-type stack owned by one side in one region.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    troop_type: TroopType,
    side: Side,
    region: RegionId,
    health: f64,
}

impl Unit {
    /// Creates a unit holding `count` troops at full health.
    pub fn new(troop_type: TroopType, side: Side, region: RegionId, count: u32) -> Self {
        Unit {
            troop_type,
            side,
            region,
            health: troop_type.hp_per_unit() * f64::from(count),
        }
    }

    pub fn troop_type(&self) -> TroopType {
        self.troop_type
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn region(&self) -> RegionId {
        self.region
    }

    pub fn health(&self) -> f64 {
        self.health
    }

    /// Troop count derived from health: `ceil(health / hp_per_unit)`, or 0.
    pub fn count(&self) -> u32 {
        count_for_health(self.troop_type, self.health)
    }

    /// Adds or removes whole troops. Health never drops below zero.
    pub fn alter_units(&mut self, delta: i64) {
        self.health = (self.health + self.troop_type.hp_per_unit() * delta as f64).max(0.0);
    }

    /// Subtracts raw damage from health. The sign of `damage` is ignored.
    pub fn update_health(&mut self, damage: f64) {
        self.health = (self.health - damage.abs()).max(0.0);
    }

    pub(crate) fn set_side(&mut self, side: Side) {
        self.side = side;
    }

    pub fn view(&self) -> UnitView {
        UnitView {
            troop_type: self.troop_type,
            side: self.side,
            region: self.region,
            count: self.count(),
        }
    }
}

/// Derives a troop count from a health total.
pub fn count_for_health(troop_type: TroopType, health: f64) -> u32 {
    if health <= HEALTH_EPSILON {
        return 0;
    }
    (health / troop_type.hp_per_unit() - HEALTH_EPSILON).ceil().max(0.0) as u32
}

/// Snapshot of a unit as reported to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnitView {
    pub troop_type: TroopType,
    pub side: Side,
    pub region: RegionId,
    pub count: u32,
}

/// Military formation size labels used to show an approximate strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Echelon {
    Fandm,
    Fireteam,
    Patrol,
    Section,
    Platoon,
    Company,
    Battalion,
    Regiment,
    Brigade,
}

const ECHELONS: [Echelon; 9] = [
    Echelon::Fandm,
    Echelon::Fireteam,
    Echelon::Patrol,
    Echelon::Section,
    Echelon::Platoon,
    Echelon::Company,
    Echelon::Battalion,
    Echelon::Regiment,
    Echelon::Brigade,
];

impl Echelon {
    /// The largest troop count this label stands for.
    pub const fn nominal_size(self) -> u32 {
        match self {
            Echelon::Fandm => 2,
            Echelon::Fireteam => 5,
            Echelon::Patrol => 10,
            Echelon::Section => 20,
            Echelon::Platoon => 40,
            Echelon::Company => 250,
            Echelon::Battalion => 1000,
            Echelon::Regiment => 2000,
            Echelon::Brigade => 5000,
        }
    }

    /// Smallest echelon whose nominal size covers `count`; saturates at brigade.
    pub fn for_count(count: u32) -> Echelon {
        ECHELONS
            .iter()
            .copied()
            .find(|e| count <= e.nominal_size())
            .unwrap_or(Echelon::Brigade)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Echelon::Fandm => "fandm",
            Echelon::Fireteam => "fireteam",
            Echelon::Patrol => "patrol",
            Echelon::Section => "section",
            Echelon::Platoon => "platoon",
            Echelon::Company => "company",
            Echelon::Battalion => "battalion",
            Echelon::Regiment => "regiment",
            Echelon::Brigade => "brigade",
        }
    }
}
