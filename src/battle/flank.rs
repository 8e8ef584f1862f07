//! Combat lanes and the bookkeeping that keeps them in contact.
//!
//! Flank allocations are plain counts per side per troop type. They are
//! reconciled against the live forces every tick: casualties scale them
//! down, idle reserves get pushed into the line, and a side with nothing in
//! front of it shifts to a flank where the enemy still stands.

use serde::Serialize;

use crate::board::{TerrainType, TroopCounts, ALL_TROOP_TYPES};

/// One of the three parallel lanes of a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum FlankPosition {
    Left = 0,
    Middle = 1,
    Right = 2,
}

pub const ALL_FLANKS: [FlankPosition; 3] =
    [FlankPosition::Left, FlankPosition::Middle, FlankPosition::Right];

impl FlankPosition {
    pub const fn name(self) -> &'static str {
        match self {
            FlankPosition::Left => "left",
            FlankPosition::Middle => "middle",
            FlankPosition::Right => "right",
        }
    }

    pub fn from_name(s: &str) -> Option<FlankPosition> {
        match s {
            "left" | "l" => Some(FlankPosition::Left),
            "middle" | "m" | "center" => Some(FlankPosition::Middle),
            "right" | "r" => Some(FlankPosition::Right),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for FlankPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Which participant of a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Attacker,
    Defender,
}

impl Role {
    pub const fn opponent(self) -> Role {
        match self {
            Role::Attacker => Role::Defender,
            Role::Defender => Role::Attacker,
        }
    }
}

/// Counts per flank for one troop type, indexed by `FlankPosition`.
pub type FlankSplit = [u32; 3];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Flank {
    pub position: FlankPosition,
    pub terrain: TerrainType,
    pub attacker: TroopCounts,
    pub defender: TroopCounts,
}

impl Flank {
    pub fn new(position: FlankPosition, terrain: TerrainType) -> Self {
        Flank {
            position,
            terrain,
            attacker: TroopCounts::default(),
            defender: TroopCounts::default(),
        }
    }

    pub fn troops(&self, role: Role) -> &TroopCounts {
        match role {
            Role::Attacker => &self.attacker,
            Role::Defender => &self.defender,
        }
    }

    pub fn troops_mut(&mut self, role: Role) -> &mut TroopCounts {
        match role {
            Role::Attacker => &mut self.attacker,
            Role::Defender => &mut self.defender,
        }
    }

    pub fn is_contested(&self) -> bool {
        self.attacker.total() > 0 && self.defender.total() > 0
    }
}

/// Three fresh flanks over the given terrain.
pub fn new_flanks(terrain: [TerrainType; 3]) -> [Flank; 3] {
    ALL_FLANKS.map(|p| Flank::new(p, terrain[p.index()]))
}

/// Sum of a side's allocation across all flanks.
pub fn role_total(flanks: &[Flank; 3], role: Role) -> TroopCounts {
    flanks
        .iter()
        .fold(TroopCounts::default(), |acc, f| acc.saturating_add(f.troops(role)))
}

/// Where troops of `mover` on `origin` should go when nothing opposes them.
///
/// Picks the other flank with the fewest enemy troops still present, the
/// first one on a tie. With no such flank the troops stay on `origin`.
pub fn candidate_flank(flanks: &[Flank; 3], origin: FlankPosition, mover: Role) -> FlankPosition {
    let enemy = mover.opponent();
    ALL_FLANKS
        .iter()
        .copied()
        .filter(|&p| p != origin)
        .map(|p| (p, flanks[p.index()].troops(enemy).total()))
        .filter(|&(_, n)| n > 0)
        .min_by_key(|&(_, n)| n)
        .map_or(origin, |(p, _)| p)
}

/// Moves every uncontested allocation onto a flank where the enemy stands.
pub fn rebalance(flanks: &mut [Flank; 3]) {
    for origin in ALL_FLANKS {
        let f = &flanks[origin.index()];
        let mover = match (f.attacker.total(), f.defender.total()) {
            (0, d) if d > 0 => Role::Defender,
            (a, 0) if a > 0 => Role::Attacker,
            _ => continue,
        };
        let target = candidate_flank(flanks, origin, mover);
        if target == origin {
            continue;
        }
        let moving = std::mem::take(flanks[origin.index()].troops_mut(mover));
        let dest = flanks[target.index()].troops_mut(mover);
        *dest = dest.saturating_add(&moving);
        tracing::trace!(from = %origin, to = %target, ?mover, "flank shift");
    }
}

/// Puts a side's whole live force into the line if none of it is allocated.
///
/// The target is the flank holding the most enemy troops, preferring the
/// middle on a tie. Returns the flank used, if any.
pub fn deploy_reserve(flanks: &mut [Flank; 3], role: Role, live: &TroopCounts) -> Option<FlankPosition> {
    if live.total() == 0 || role_total(flanks, role).total() > 0 {
        return None;
    }
    let enemy = role.opponent();
    let enemy_at = |p: FlankPosition| flanks[p.index()].troops(enemy).total();
    let most = ALL_FLANKS.iter().map(|&p| enemy_at(p)).max().unwrap_or(0);
    let target = if enemy_at(FlankPosition::Middle) == most {
        FlankPosition::Middle
    } else {
        ALL_FLANKS
            .iter()
            .copied()
            .find(|&p| enemy_at(p) == most)
            .unwrap_or(FlankPosition::Middle)
    };
    *flanks[target.index()].troops_mut(role) = *live;
    Some(target)
}

/// Scales a side's allocations by `after / before` per troop type, rounding
/// down, so flank totals never exceed what is still alive.
pub fn scale_to_live(flanks: &mut [Flank; 3], role: Role, before: &TroopCounts, after: &TroopCounts) {
    for t in ALL_TROOP_TYPES {
        let (b, a) = (u64::from(before[t]), u64::from(after[t]));
        if a >= b {
            continue;
        }
        for flank in flanks.iter_mut() {
            let slot = &mut flank.troops_mut(role)[t];
            *slot = if b == 0 {
                0
            } else {
                (u64::from(*slot) * a / b) as u32
            };
        }
    }
}
