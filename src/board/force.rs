//! A side's combined troop presence in one region.

use rand::Rng;

use super::region::RegionId;
use super::side::Side;
use super::unit::{Troops, TroopCounts, TroopDelta, TroopType, Unit, UnitView, ALL_TROOP_TYPES};
use crate::presentation::Presentation;

/// Up to three unit stacks, one per troop type, held by one side in one region.
///
/// The side is recomputed from the occupied slots after every mutation. An
/// emptied force goes neutral unless it sits on a capital, which keeps its
/// last owner.
#[derive(Debug, Clone, PartialEq)]
pub struct Force {
    region: RegionId,
    side: Side,
    is_capital: bool,
    units: Troops<Option<Unit>>,
}

impl Force {
    /// Creates a force from starting counts. Types with a zero count get no unit.
    pub fn new(region: RegionId, side: Side, is_capital: bool, counts: TroopCounts) -> Self {
        let units = Troops::from_fn(|t| {
            (counts[t] > 0 && !side.is_neutral()).then(|| Unit::new(t, side, region, counts[t]))
        });
        let mut force = Force {
            region,
            side,
            is_capital,
            units,
        };
        force.side = force.derived_side(side);
        force
    }

    /// An unoccupied, neutral force.
    pub fn empty(region: RegionId, is_capital: bool) -> Self {
        Force::new(region, Side::Neutral, is_capital, TroopCounts::default())
    }

    pub fn region(&self) -> RegionId {
        self.region
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn is_capital(&self) -> bool {
        self.is_capital
    }

    pub fn unit(&self, troop_type: TroopType) -> Option<&Unit> {
        self.units[troop_type].as_ref()
    }

    pub fn count(&self, troop_type: TroopType) -> u32 {
        self.unit(troop_type).map_or(0, Unit::count)
    }

    pub fn counts(&self) -> TroopCounts {
        Troops::from_fn(|t| self.count(t))
    }

    pub fn total_count(&self) -> u32 {
        self.counts().total()
    }

    pub fn total_health(&self) -> f64 {
        ALL_TROOP_TYPES
            .iter()
            .filter_map(|&t| self.unit(t))
            .map(Unit::health)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        ALL_TROOP_TYPES.iter().all(|&t| self.units[t].is_none())
    }

    /// Views of the occupied slots, in troop-type order.
    pub fn views(&self) -> Vec<UnitView> {
        ALL_TROOP_TYPES
            .iter()
            .filter_map(|&t| self.unit(t).map(Unit::view))
            .collect()
    }

    /// Applies a signed count change per type.
    ///
    /// Existing units gain or lose whole troops; a positive delta on an empty
    /// slot creates a unit owned by the force's current side. Units left with
    /// no troops are removed and the side is recomputed.
    pub fn alter_force(&mut self, delta: &TroopDelta, ui: &mut dyn Presentation) {
        for t in ALL_TROOP_TYPES {
            let d = delta[t];
            if d == 0 {
                continue;
            }
            if let Some(unit) = self.units[t].as_mut() {
                unit.alter_units(d);
            } else if d > 0 && !self.side.is_neutral() {
                let count = u32::try_from(d).unwrap_or(u32::MAX);
                self.units[t] = Some(Unit::new(t, self.side, self.region, count));
            } else {
                continue;
            }
            self.report_unit(t, ui);
        }
        self.prune();
        self.determine_side(ui);
    }

    /// Adds troops on behalf of `side`. An empty force (including an emptied
    /// capital) changes hands to `side` first.
    pub fn reinforce(&mut self, side: Side, counts: &TroopCounts, ui: &mut dyn Presentation) {
        if self.is_empty() && self.side != side {
            self.side = side;
        }
        self.alter_force(&counts.as_delta(), ui);
    }

    /// Removes every troop and returns what was there.
    pub fn withdraw_all(&mut self, ui: &mut dyn Presentation) -> TroopCounts {
        let counts = self.counts();
        self.alter_force(&counts.negated(), ui);
        counts
    }

    /// Replaces the contents with `counts` owned by `side`.
    pub fn occupy(&mut self, side: Side, counts: &TroopCounts, ui: &mut dyn Presentation) {
        self.withdraw_all(ui);
        self.side = side;
        self.alter_force(&counts.as_delta(), ui);
    }

    /// Splits `damage` across the present troop types and applies it.
    ///
    /// One balance factor `b` is drawn per call. A type's weight is its
    /// fraction of the total count, multiplied by `b` for infantry and divided
    /// by `b` for vehicles. Weights are only scaled down when they sum past
    /// one, so total health lost never exceeds `damage`; no unit loses more
    /// health than it has. Empty forces and non-positive damage are left
    /// untouched.
    pub fn distribute_damage(&mut self, damage: f64, rng: &mut impl Rng, ui: &mut dyn Presentation) {
        let total = self.total_count();
        if total == 0 || damage <= 0.0 || !damage.is_finite() {
            return;
        }
        // gen() can return exactly 0.0.
        let balance = rng.gen::<f64>().max(f64::MIN_POSITIVE);
        let weights = self.counts().map(|t, &c| {
            let fraction = f64::from(c) / f64::from(total);
            match t {
                TroopType::Infantry => fraction * balance,
                _ => fraction / balance,
            }
        });
        let scale = weights.iter().map(|(_, w)| w).sum::<f64>().max(1.0);
        for t in ALL_TROOP_TYPES {
            let Some(unit) = self.units[t].as_mut() else {
                continue;
            };
            let loss = (weights[t] * damage / scale).min(unit.health());
            if loss > 0.0 {
                unit.update_health(loss);
                self.report_unit(t, ui);
            }
        }
        self.prune();
        self.determine_side(ui);
    }

    /// Recomputes the side from the occupied slots and notifies on change.
    pub fn determine_side(&mut self, ui: &mut dyn Presentation) {
        let previous = self.side;
        self.side = self.derived_side(previous);
        if self.side != previous {
            ui.set_region_owner(self.region, self.side);
        }
    }

    /// Forces the side back to a recorded value.
    pub fn restore_side(&mut self, side: Side, ui: &mut dyn Presentation) {
        if self.side != side {
            self.side = side;
            for unit in [&mut self.units.infantry, &mut self.units.helicopter, &mut self.units.armor]
                .into_iter()
                .flatten()
            {
                unit.set_side(side);
            }
            ui.set_region_owner(self.region, side);
        }
    }

    fn derived_side(&self, previous: Side) -> Side {
        let occupied = ALL_TROOP_TYPES
            .iter()
            .find_map(|&t| self.units[t].as_ref().map(Unit::side));
        match occupied {
            Some(side) => side,
            None if self.is_capital && !previous.is_neutral() => previous,
            None => Side::Neutral,
        }
    }

    fn report_unit(&self, t: TroopType, ui: &mut dyn Presentation) {
        if let Some(unit) = self.units[t].as_ref() {
            ui.update_unit_display(&unit.view());
        }
    }

    fn prune(&mut self) {
        for t in ALL_TROOP_TYPES {
            if self.units[t].as_ref().is_some_and(|u| u.count() == 0) {
                self.units[t] = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::{NullPresentation, PresentationEvent, RecordingPresentation};
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn region() -> RegionId {
        RegionId::new(42)
    }

    #[test]
    fn new_force_skips_zero_counts() {
        let f = Force::new(region(), Side::Blufor, false, TroopCounts::new(10, 0, 2));
        assert!(f.unit(TroopType::Helicopter).is_none());
        assert_eq!(f.counts(), TroopCounts::new(10, 0, 2));
        assert_eq!(f.side(), Side::Blufor);
    }

    #[test]
    fn empty_force_is_neutral() {
        let f = Force::new(region(), Side::Opfor, false, TroopCounts::default());
        assert_eq!(f.side(), Side::Neutral);
        assert!(f.is_empty());
    }

    #[test]
    fn alter_force_creates_and_removes_units() {
        let mut ui = NullPresentation;
        let mut f = Force::new(region(), Side::Blufor, false, TroopCounts::new(10, 0, 0));
        f.alter_force(&TroopDelta::new(0, 3, 0), &mut ui);
        assert_eq!(f.count(TroopType::Helicopter), 3);
        f.alter_force(&TroopDelta::new(-10, 0, 0), &mut ui);
        assert!(f.unit(TroopType::Infantry).is_none());
        assert_eq!(f.side(), Side::Blufor);
        f.alter_force(&TroopDelta::new(0, -3, 0), &mut ui);
        assert!(f.is_empty());
        assert_eq!(f.side(), Side::Neutral);
    }

    #[test]
    fn emptied_capital_keeps_side() {
        let mut ui = NullPresentation;
        let mut f = Force::new(region(), Side::Opfor, true, TroopCounts::new(5, 1, 1));
        f.alter_force(&TroopDelta::new(-5, -1, -1), &mut ui);
        assert!(f.is_empty());
        assert_eq!(f.side(), Side::Opfor);
    }

    #[test]
    fn neutral_force_ignores_positive_delta() {
        let mut ui = NullPresentation;
        let mut f = Force::empty(region(), false);
        f.alter_force(&TroopDelta::new(5, 0, 0), &mut ui);
        assert!(f.is_empty());
        f.reinforce(Side::Opfor, &TroopCounts::new(5, 0, 0), &mut ui);
        assert_eq!(f.side(), Side::Opfor);
        assert_eq!(f.count(TroopType::Infantry), 5);
    }

    #[test]
    fn occupy_replaces_contents() {
        let mut ui = NullPresentation;
        let mut f = Force::new(region(), Side::Opfor, true, TroopCounts::new(5, 1, 1));
        f.occupy(Side::Blufor, &TroopCounts::new(7, 0, 0), &mut ui);
        assert_eq!(f.side(), Side::Blufor);
        assert_eq!(f.counts(), TroopCounts::new(7, 0, 0));
    }

    #[test]
    fn withdraw_all_returns_counts() {
        let mut ui = NullPresentation;
        let mut f = Force::new(region(), Side::Blufor, false, TroopCounts::new(12, 2, 4));
        assert_eq!(f.withdraw_all(&mut ui), TroopCounts::new(12, 2, 4));
        assert!(f.is_empty());
        assert_eq!(f.side(), Side::Neutral);
    }

    #[test]
    fn zero_damage_is_noop() {
        let mut ui = NullPresentation;
        let mut rng = SmallRng::seed_from_u64(3);
        let mut f = Force::new(region(), Side::Blufor, false, TroopCounts::new(100, 4, 8));
        let before = f.clone();
        f.distribute_damage(0.0, &mut rng, &mut ui);
        assert_eq!(f, before);
    }

    #[test]
    fn damage_is_bounded_by_input() {
        let mut ui = NullPresentation;
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..100 {
            let mut f = Force::new(region(), Side::Opfor, false, TroopCounts::new(300, 5, 10));
            let before = f.total_health();
            f.distribute_damage(1234.5, &mut rng, &mut ui);
            let lost = before - f.total_health();
            assert!(lost <= 1234.5 + 1e-6, "lost {lost}");
            assert!(lost > 0.0);
        }
    }

    fn health_of(f: &Force, t: TroopType) -> f64 {
        f.unit(t).map_or(0.0, Unit::health)
    }

    #[test]
    fn infantry_only_force_takes_balance_share() {
        let mut ui = NullPresentation;
        let mut rng = SmallRng::seed_from_u64(21);
        for _ in 0..50 {
            let mut f = Force::new(region(), Side::Blufor, false, TroopCounts::new(10_000, 0, 0));
            let balance = rng.clone().gen::<f64>();
            let before = f.total_health();
            f.distribute_damage(1000.0, &mut rng, &mut ui);
            let lost = before - f.total_health();
            assert!((lost - balance * 1000.0).abs() < 1e-6, "lost {lost}, balance {balance}");
        }
    }

    #[test]
    fn infantry_and_vehicles_trade_off_inversely() {
        let mut ui = NullPresentation;
        let mut rng = SmallRng::seed_from_u64(8);
        for _ in 0..50 {
            let mut f = Force::new(region(), Side::Opfor, false, TroopCounts::new(1000, 10, 10));
            let balance = rng.clone().gen::<f64>();
            let before = f.clone();
            f.distribute_damage(100.0, &mut rng, &mut ui);

            let (inf, veh) = (1000.0 / 1020.0 * balance, 10.0 / 1020.0 / balance);
            let scale = (inf + 2.0 * veh).max(1.0);
            let loss = |t| health_of(&before, t) - health_of(&f, t);
            assert!((loss(TroopType::Infantry) - inf * 100.0 / scale).abs() < 1e-6);
            assert!((loss(TroopType::Helicopter) - veh * 100.0 / scale).abs() < 1e-6);
            assert!((loss(TroopType::Armor) - veh * 100.0 / scale).abs() < 1e-6);
        }
    }

    #[test]
    fn overwhelming_damage_empties_force() {
        let mut ui = NullPresentation;
        let mut rng = SmallRng::seed_from_u64(5);
        let mut f = Force::new(region(), Side::Opfor, false, TroopCounts::new(10, 0, 0));
        f.distribute_damage(1.0e9, &mut rng, &mut ui);
        assert!(f.is_empty());
        assert_eq!(f.side(), Side::Neutral);
    }

    #[test]
    fn restore_side_relabels_units() {
        let mut ui = RecordingPresentation::default();
        let mut f = Force::new(region(), Side::Blufor, false, TroopCounts::new(3, 0, 0));
        f.restore_side(Side::Opfor, &mut ui);
        assert_eq!(f.side(), Side::Opfor);
        assert_eq!(f.unit(TroopType::Infantry).map(Unit::side), Some(Side::Opfor));
        assert!(ui
            .events()
            .iter()
            .any(|e| matches!(e, PresentationEvent::Owner { side: Side::Opfor, .. })));
    }
}
