//! Static scenario data for the standard theater: capitals and their
//! reinforcement yields, base terrain per region, and the opening deployment.

use super::region::{r, RegionId, REGION_COUNT};
use super::side::Side;
use super::terrain::TerrainMix;
use super::unit::TroopCounts;

/// Capitals with the troops they grant their controller each turn.
pub static CAPITALS: [(RegionId, TroopCounts); 10] = [
    (r("a6"), TroopCounts::new(40, 0, 1)),
    (r("b5"), TroopCounts::new(20, 0, 0)),
    (r("c4"), TroopCounts::new(0, 2, 0)),
    (r("d2"), TroopCounts::new(40, 2, 1)),
    (r("e3"), TroopCounts::new(40, 2, 1)),
    (r("f4"), TroopCounts::new(40, 2, 0)),
    (r("g4"), TroopCounts::new(40, 0, 1)),
    (r("h1"), TroopCounts::new(20, 0, 0)),
    (r("i5"), TroopCounts::new(0, 2, 0)),
    (r("j2"), TroopCounts::new(40, 2, 0)),
];

/// Reinforcement yield of a standard capital, or `None` for other regions.
pub fn capital_reinforcement(id: RegionId) -> Option<TroopCounts> {
    CAPITALS.iter().find(|(c, _)| *c == id).map(|(_, v)| *v)
}

const fn mix(weights: [f64; 6]) -> TerrainMix {
    TerrainMix::new(weights)
}

/// Base terrain weights `[craters, open, plains, forest, water, urban]`.
pub static REGION_TERRAIN: [TerrainMix; REGION_COUNT] = [
    mix([0.0, 0.3, 0.9, 0.0, 0.0, 0.0]), // a0
    mix([0.0, 0.3, 0.6, 0.0, 0.0, 0.0]), // a1
    mix([0.0, 0.3, 0.0, 0.5, 0.0, 0.0]), // a2
    mix([0.0, 0.3, 0.0, 0.3, 0.0, 0.0]), // a3
    mix([0.0, 0.3, 0.0, 0.5, 0.0, 0.0]), // a4
    mix([0.0, 0.3, 0.0, 0.5, 0.0, 0.0]), // a5
    mix([0.0, 0.3, 0.0, 0.3, 0.0, 0.0]), // a6
    mix([0.0, 0.3, 0.0, 0.5, 0.2, 0.5]), // a7
    mix([0.0, 0.3, 0.4, 0.3, 0.0, 0.0]), // a8
    mix([0.0, 0.3, 0.5, 0.4, 0.0, 0.0]), // a9
    mix([0.0, 0.3, 0.9, 0.1, 0.0, 0.0]), // b0
    mix([0.0, 0.3, 0.5, 0.1, 0.0, 0.0]), // b1
    mix([0.0, 0.3, 0.7, 0.1, 0.1, 0.0]), // b2
    mix([0.0, 0.3, 0.8, 0.0, 0.0, 0.0]), // b3
    mix([0.0, 0.3, 0.0, 0.0, 0.1, 0.0]), // b4
    mix([0.0, 0.3, 0.0, 0.0, 0.3, 0.6]), // b5
    mix([0.0, 0.3, 0.0, 0.0, 0.3, 0.5]), // b6
    mix([0.0, 0.3, 0.0, 0.0, 0.2, 0.8]), // b7
    mix([0.0, 0.3, 0.0, 0.0, 0.2, 0.5]), // b8
    mix([0.0, 0.3, 0.0, 0.0, 0.3, 0.0]), // b9
    mix([0.0, 0.3, 0.0, 0.0, 0.4, 0.0]), // c0
    mix([0.0, 0.3, 0.0, 0.0, 0.4, 0.5]), // c1
    mix([0.0, 0.3, 0.0, 0.0, 0.2, 0.8]), // c2
    mix([0.0, 0.3, 0.0, 0.0, 0.1, 0.9]), // c3
    mix([0.0, 0.3, 0.0, 0.0, 0.1, 0.8]), // c4
    mix([0.0, 0.3, 0.0, 0.0, 0.2, 0.0]), // c5
    mix([0.0, 0.3, 0.0, 0.2, 0.2, 0.0]), // c6
    mix([0.0, 0.3, 0.3, 0.0, 0.0, 0.0]), // c7
    mix([0.0, 0.3, 0.0, 0.0, 0.0, 0.1]), // c8
    mix([0.0, 0.3, 0.0, 0.0, 0.2, 0.2]), // c9
    mix([0.0, 0.3, 0.0, 0.0, 0.2, 0.0]), // d0
    mix([0.0, 0.3, 0.0, 0.3, 0.0, 0.2]), // d1
    mix([0.0, 0.3, 0.0, 0.2, 0.2, 0.6]), // d2
    mix([0.0, 0.3, 0.0, 0.2, 0.1, 0.5]), // d3
    mix([0.0, 0.3, 0.0, 0.0, 0.1, 0.0]), // d4
    mix([0.0, 1.0, 0.0, 0.0, 0.0, 0.0]), // d5
    mix([0.0, 0.3, 0.5, 0.0, 0.0, 0.0]), // d6
    mix([0.0, 0.3, 0.8, 0.0, 0.0, 0.0]), // d7
    mix([0.0, 1.0, 0.0, 0.0, 0.0, 0.0]), // d8
    mix([0.0, 1.0, 0.0, 0.0, 0.0, 0.0]), // d9
    mix([0.0, 0.3, 0.5, 0.0, 0.2, 0.0]), // e0
    mix([0.0, 0.3, 0.0, 0.5, 0.2, 0.0]), // e1
    mix([0.0, 0.3, 0.5, 0.3, 0.0, 0.0]), // e2
    mix([0.0, 0.3, 0.0, 0.2, 0.0, 0.5]), // e3
    mix([0.0, 0.3, 0.0, 0.2, 0.2, 0.5]), // e4
    mix([0.0, 0.3, 0.0, 0.2, 0.2, 0.5]), // e5
    mix([0.0, 0.3, 0.0, 0.9, 0.0, 0.0]), // e6
    mix([0.0, 1.0, 0.0, 0.0, 0.0, 0.0]), // e7
    mix([0.0, 1.0, 0.0, 0.0, 0.0, 0.0]), // e8
    mix([0.0, 1.0, 0.0, 0.0, 0.0, 0.0]), // e9
    mix([0.0, 1.0, 0.0, 0.0, 0.0, 0.0]), // f0
    mix([0.0, 0.3, 0.7, 0.0, 0.1, 0.0]), // f1
    mix([0.0, 0.3, 0.0, 0.0, 0.2, 0.0]), // f2
    mix([0.0, 0.3, 0.0, 0.0, 0.2, 0.4]), // f3
    mix([0.0, 0.3, 0.0, 0.0, 0.2, 0.8]), // f4
    mix([0.0, 0.3, 0.3, 0.0, 0.2, 0.3]), // f5
    mix([0.0, 0.3, 0.3, 0.0, 0.0, 0.0]), // f6
    mix([0.0, 0.3, 0.0, 0.3, 0.3, 0.4]), // f7
    mix([0.0, 0.3, 0.0, 0.3, 0.0, 0.0]), // f8
    mix([0.0, 0.3, 0.0, 0.6, 0.1, 0.3]), // f9
    mix([0.0, 0.3, 0.0, 0.5, 0.0, 0.0]), // g0
    mix([0.0, 0.3, 0.0, 0.3, 0.0, 0.0]), // g1
    mix([0.0, 0.3, 0.0, 0.3, 0.0, 0.0]), // g2
    mix([0.0, 0.3, 0.7, 0.0, 0.0, 0.0]), // g3
    mix([0.0, 0.3, 0.1, 0.0, 0.1, 0.0]), // g4
    mix([0.0, 0.3, 0.2, 0.1, 0.0, 0.0]), // g5
    mix([0.0, 0.3, 0.0, 0.4, 0.0, 0.0]), // g6
    mix([0.0, 0.3, 0.0, 1.0, 0.0, 0.0]), // g7
    mix([0.0, 0.3, 0.4, 0.3, 0.0, 0.0]), // g8
    mix([0.0, 0.3, 0.7, 0.0, 0.2, 0.0]), // g9
    mix([0.0, 1.0, 0.0, 0.0, 0.0, 0.0]), // h0
    mix([0.0, 0.3, 0.0, 0.3, 0.0, 0.0]), // h1
    mix([0.0, 0.3, 0.3, 0.0, 0.0, 0.0]), // h2
    mix([0.0, 0.3, 0.5, 0.1, 0.0, 0.0]), // h3
    mix([0.0, 0.3, 0.0, 0.6, 0.0, 0.0]), // h4
    mix([0.0, 0.3, 0.2, 0.5, 0.0, 0.0]), // h5
    mix([0.0, 0.3, 0.8, 0.0, 0.0, 0.0]), // h6
    mix([0.0, 0.3, 0.0, 1.0, 0.0, 0.0]), // h7
    mix([0.0, 0.3, 0.0, 0.4, 0.0, 0.0]), // h8
    mix([0.0, 0.3, 0.5, 0.0, 0.0, 0.0]), // h9
    mix([0.0, 0.3, 0.5, 0.2, 0.0, 0.0]), // i0
    mix([0.0, 0.3, 0.5, 0.0, 0.1, 0.0]), // i1
    mix([0.0, 0.3, 0.0, 0.0, 0.2, 0.0]), // i2
    mix([0.0, 0.3, 0.3, 0.4, 0.1, 0.0]), // i3
    mix([0.0, 0.3, 0.0, 0.9, 0.0, 0.0]), // i4
    mix([0.0, 0.3, 0.5, 0.2, 0.0, 0.0]), // i5
    mix([0.0, 0.3, 0.2, 0.4, 0.0, 0.0]), // i6
    mix([0.0, 0.3, 0.3, 0.5, 0.0, 0.0]), // i7
    mix([0.0, 0.3, 0.3, 0.3, 0.0, 0.0]), // i8
    mix([0.0, 0.3, 0.4, 0.5, 0.0, 0.0]), // i9
    mix([0.0, 0.3, 0.0, 0.2, 0.2, 0.6]), // j0
    mix([0.0, 0.3, 0.0, 0.5, 0.0, 0.2]), // j1
    mix([0.0, 0.3, 0.0, 0.4, 0.0, 0.0]), // j2
    mix([0.0, 0.3, 0.0, 0.4, 0.0, 0.0]), // j3
    mix([0.0, 0.3, 0.0, 0.3, 0.0, 0.0]), // j4
    mix([0.0, 0.3, 0.0, 0.7, 0.0, 0.0]), // j5
    mix([0.0, 0.3, 0.0, 0.8, 0.0, 0.0]), // j6
    mix([0.0, 0.3, 0.0, 0.6, 0.0, 0.0]), // j7
    mix([0.0, 0.3, 0.3, 0.7, 0.0, 0.0]), // j8
    mix([0.0, 0.3, 0.2, 0.8, 0.0, 0.0]), // j9
];

/// Regions occupied at game start. Every other region begins neutral and empty.
pub static INITIAL_DEPLOYMENT: [(RegionId, Side, TroopCounts); 35] = [
    (r("a6"), Side::Blufor, TroopCounts::new(1200, 2, 20)),
    (r("a7"), Side::Blufor, TroopCounts::new(225, 0, 6)),
    (r("a8"), Side::Blufor, TroopCounts::new(500, 0, 8)),
    (r("b5"), Side::Blufor, TroopCounts::new(850, 4, 12)),
    (r("c1"), Side::Blufor, TroopCounts::new(120, 0, 4)),
    (r("c4"), Side::Blufor, TroopCounts::new(650, 6, 0)),
    (r("c9"), Side::Blufor, TroopCounts::new(40, 1, 0)),
    (r("d2"), Side::Blufor, TroopCounts::new(1850, 0, 38)),
    (r("d3"), Side::Opfor, TroopCounts::new(250, 0, 12)),
    (r("d4"), Side::Blufor, TroopCounts::new(250, 0, 12)),
    (r("d8"), Side::Blufor, TroopCounts::new(350, 8, 0)),
    (r("d9"), Side::Blufor, TroopCounts::new(200, 0, 8)),
    (r("e0"), Side::Blufor, TroopCounts::new(1500, 12, 28)),
    (r("e1"), Side::Opfor, TroopCounts::new(1500, 12, 28)),
    (r("e3"), Side::Opfor, TroopCounts::new(1850, 0, 38)),
    (r("e4"), Side::Blufor, TroopCounts::new(350, 0, 14)),
    (r("e5"), Side::Opfor, TroopCounts::new(350, 0, 14)),
    (r("e8"), Side::Opfor, TroopCounts::new(350, 0, 18)),
    (r("e9"), Side::Opfor, TroopCounts::new(350, 8, 0)),
    (r("f1"), Side::Opfor, TroopCounts::new(520, 6, 14)),
    (r("f2"), Side::Blufor, TroopCounts::new(520, 6, 14)),
    (r("f3"), Side::Blufor, TroopCounts::new(300, 0, 7)),
    (r("f4"), Side::Blufor, TroopCounts::new(1990, 0, 32)),
    (r("f5"), Side::Opfor, TroopCounts::new(895, 0, 16)),
    (r("f6"), Side::Opfor, TroopCounts::new(300, 0, 7)),
    (r("f9"), Side::Blufor, TroopCounts::new(450, 4, 10)),
    (r("g4"), Side::Opfor, TroopCounts::new(450, 4, 10)),
    (r("h1"), Side::Opfor, TroopCounts::new(650, 6, 0)),
    (r("i2"), Side::Opfor, TroopCounts::new(40, 2, 0)),
    (r("i3"), Side::Opfor, TroopCounts::new(120, 0, 4)),
    (r("i5"), Side::Opfor, TroopCounts::new(850, 4, 12)),
    (r("j0"), Side::Opfor, TroopCounts::new(500, 0, 8)),
    (r("j1"), Side::Opfor, TroopCounts::new(225, 0, 6)),
    (r("j2"), Side::Opfor, TroopCounts::new(1200, 2, 20)),
    (r("j9"), Side::Opfor, TroopCounts::new(500, 0, 8)),
];
