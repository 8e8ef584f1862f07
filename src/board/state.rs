//! Mutable board state: one force per region plus the live terrain mix.
//!
//! Terrain is copied out of the theater at construction because battles
//! crater the regions they are fought over.

use super::force::Force;
use super::region::{RegionId, Theater};
use super::setup::INITIAL_DEPLOYMENT;
use super::side::Side;
use super::terrain::TerrainMix;
use super::unit::TroopCounts;

#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    theater: Theater,
    forces: Vec<Force>,
    terrain: Vec<TerrainMix>,
}

impl Board {
    /// An empty board over `theater`: every region neutral and unoccupied.
    pub fn new(theater: Theater) -> Self {
        let forces = theater
            .regions()
            .iter()
            .map(|r| Force::empty(r.id, r.is_capital()))
            .collect();
        let terrain = theater.regions().iter().map(|r| r.terrain).collect();
        Board {
            theater,
            forces,
            terrain,
        }
    }

    /// A board with the given regions occupied. Entries outside the theater
    /// are skipped.
    pub fn with_deployment(theater: Theater, deployment: &[(RegionId, Side, TroopCounts)]) -> Self {
        let mut board = Board::new(theater);
        for &(id, side, counts) in deployment {
            board.place(id, side, counts);
        }
        board
    }

    /// The standard theater with the opening deployment.
    pub fn standard(symmetrize: bool) -> Self {
        Board::with_deployment(Theater::standard(symmetrize), &INITIAL_DEPLOYMENT)
    }

    pub fn theater(&self) -> &Theater {
        &self.theater
    }

    pub fn forces(&self) -> &[Force] {
        &self.forces
    }

    pub fn force(&self, id: RegionId) -> Option<&Force> {
        self.forces.get(id.index())
    }

    pub fn force_mut(&mut self, id: RegionId) -> Option<&mut Force> {
        self.forces.get_mut(id.index())
    }

    /// Mutable access to two distinct forces at once.
    pub fn pair_mut(&mut self, a: RegionId, b: RegionId) -> Option<(&mut Force, &mut Force)> {
        let (ai, bi) = (a.index(), b.index());
        if ai == bi || ai >= self.forces.len() || bi >= self.forces.len() {
            return None;
        }
        if ai < bi {
            let (lo, hi) = self.forces.split_at_mut(bi);
            Some((&mut lo[ai], &mut hi[0]))
        } else {
            let (lo, hi) = self.forces.split_at_mut(ai);
            Some((&mut hi[0], &mut lo[bi]))
        }
    }

    /// Overwrites a region's force without notifying anyone. Setup only.
    pub fn place(&mut self, id: RegionId, side: Side, counts: TroopCounts) {
        let is_capital = self.theater.is_capital(id);
        if let Some(slot) = self.forces.get_mut(id.index()) {
            *slot = Force::new(id, side, is_capital, counts);
        }
    }

    pub fn side_of(&self, id: RegionId) -> Side {
        self.force(id).map_or(Side::Neutral, Force::side)
    }

    pub fn terrain(&self, id: RegionId) -> TerrainMix {
        self.terrain.get(id.index()).copied().unwrap_or_default()
    }

    pub fn add_craters(&mut self, id: RegionId, amount: f64) {
        if let Some(mix) = self.terrain.get_mut(id.index()) {
            mix.add_craters(amount);
        }
    }

    pub fn owned_regions(&self, side: Side) -> impl Iterator<Item = RegionId> + '_ {
        self.forces
            .iter()
            .filter(move |f| f.side() == side)
            .map(Force::region)
    }

    pub fn regions_owned(&self, side: Side) -> usize {
        self.owned_regions(side).count()
    }

    pub fn total_troops(&self, side: Side) -> u32 {
        self.forces
            .iter()
            .filter(|f| f.side() == side)
            .map(Force::total_count)
            .sum()
    }

    /// Blufor's share of all troops on the board; one half when the board is empty.
    pub fn strength_ratio(&self) -> f64 {
        let bf = f64::from(self.total_troops(Side::Blufor));
        let of = f64::from(self.total_troops(Side::Opfor));
        if bf + of == 0.0 {
            0.5
        } else {
            bf / (bf + of)
        }
    }

    /// Regions `side` can see: everything it owns and every neighbour of those.
    pub fn visible_regions(&self, side: Side) -> Vec<RegionId> {
        let mut seen = vec![false; self.forces.len()];
        for id in self.owned_regions(side) {
            seen[id.index()] = true;
            for n in self.theater.neighbors(id) {
                if let Some(s) = seen.get_mut(n.index()) {
                    *s = true;
                }
            }
        }
        self.theater.ids().filter(|id| seen[id.index()]).collect()
    }
}
