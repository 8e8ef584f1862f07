//! The battle state machine.
//!
//! A `Battle` is built when an attack is launched, collects the attacker's
//! flank allocation, then advances one tick at a time until one side has no
//! troops left. It holds region ids rather than references to forces; every
//! call that touches troops borrows the board for just that call.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use super::allocation::{auto_allocate, AllocationError, AllocationRequest};
use super::flank::{
    deploy_reserve, new_flanks, rebalance, role_total, scale_to_live, Flank, FlankPosition, FlankSplit, Role,
    ALL_FLANKS,
};
use super::report::{BattleReport, BattleResult};
use crate::board::{Board, Force, RegionId, Side, TerrainType, TroopCounts, TroopType, Troops, ALL_TROOP_TYPES};
use crate::config::{CombatWidth, GameConfig};
use crate::presentation::{LogClass, Presentation};

/// Attacker modifier is drawn from `[0, 0.5)`.
const ATTACKER_MOD_MAX: f64 = 0.5;
/// Defender modifier is drawn from `[0.05, 0.55)`.
const DEFENDER_MOD_BASE: f64 = 0.05;
const CAPITAL_DEFENSE_BONUS: f64 = 0.05;
/// Per-tick defender modifier increase when cornered.
const CORNERED_CREEP: f64 = 0.03;
/// Remaining fraction of the defender's starting strength that counts as cornered.
const CORNERED_FRACTION: f64 = 0.3;
const CRATER_PER_SHOT: f64 = 0.003;

/// Rules a battle needs from the game configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BattleRules {
    pub combat_width: CombatWidth,
    pub crater_accrual: bool,
}

impl Default for BattleRules {
    fn default() -> Self {
        BattleRules {
            combat_width: CombatWidth::standard(),
            crater_accrual: true,
        }
    }
}

impl From<&GameConfig> for BattleRules {
    fn from(config: &GameConfig) -> Self {
        BattleRules {
            combat_width: config.combat_width,
            crater_accrual: config.crater_accrual,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleState {
    /// Waiting for the attacker's allocation.
    Initial,
    /// One troop type's split is being decided.
    AllocWait(TroopType),
    Fighting,
    Ended,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BattleOutcome {
    Ongoing,
    Resolved(BattleReport),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BattleError {
    #[error("region {0} is not on the board")]
    UnknownRegion(RegionId),
    #[error("a region cannot attack itself")]
    SameRegion,
    #[error("battle has not started")]
    NotStarted,
    #[error("battle is already over")]
    AlreadyEnded,
    #[error(transparent)]
    Allocation(#[from] AllocationError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Battle {
    number: u32,
    attacker: RegionId,
    defender: RegionId,
    attacker_side: Side,
    defender_side: Side,
    attacker_ref: TroopCounts,
    defender_ref: TroopCounts,
    defender_is_capital: bool,
    fallback: Option<RegionId>,
    flanks: [Flank; 3],
    attacker_mod: f64,
    defender_mod: f64,
    rules: BattleRules,
    ticks: u32,
    state: BattleState,
    unallocated: TroopCounts,
}

impl Battle {
    /// Sets up a battle between two board regions.
    ///
    /// Snapshots both forces, picks a fallback for the defender, samples
    /// flank terrain from the defending region, draws combat modifiers, and
    /// allocates the defender. The attacker's allocation is left open.
    pub fn new(
        number: u32,
        board: &Board,
        attacker: RegionId,
        defender: RegionId,
        rules: BattleRules,
        rng: &mut impl Rng,
    ) -> Result<Battle, BattleError> {
        if attacker == defender {
            return Err(BattleError::SameRegion);
        }
        let off = board.force(attacker).ok_or(BattleError::UnknownRegion(attacker))?;
        let def = board.force(defender).ok_or(BattleError::UnknownRegion(defender))?;

        let defender_is_capital = board.theater().is_capital(defender);
        let candidates: Vec<RegionId> = board
            .theater()
            .neighbors(defender)
            .iter()
            .copied()
            .filter(|&n| n != attacker && board.side_of(n) == def.side())
            .collect();
        let fallback = candidates.choose(rng).copied();

        let terrain = board.terrain(defender).sample_flank_terrain(rng);
        let attacker_mod = rng.gen::<f64>() * ATTACKER_MOD_MAX;
        let mut defender_mod = rng.gen::<f64>() * ATTACKER_MOD_MAX + DEFENDER_MOD_BASE;
        if defender_is_capital {
            defender_mod += CAPITAL_DEFENSE_BONUS;
        }

        let mut battle = Battle {
            number,
            attacker,
            defender,
            attacker_side: off.side(),
            defender_side: def.side(),
            attacker_ref: off.counts(),
            defender_ref: def.counts(),
            defender_is_capital,
            fallback,
            flanks: new_flanks(terrain),
            attacker_mod,
            defender_mod,
            rules,
            ticks: 0,
            state: BattleState::Initial,
            unallocated: off.counts(),
        };
        let split = auto_allocate(&battle.defender_ref, &terrain, rng);
        battle.set_defender_flanks(split);
        tracing::info!(
            battle = number,
            %attacker,
            %defender,
            ?terrain,
            fallback = ?fallback.map(|f| f.to_string()),
            "battle set up"
        );
        Ok(battle)
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn attacker(&self) -> RegionId {
        self.attacker
    }

    pub fn defender(&self) -> RegionId {
        self.defender
    }

    pub fn attacker_side(&self) -> Side {
        self.attacker_side
    }

    pub fn defender_side(&self) -> Side {
        self.defender_side
    }

    pub fn state(&self) -> BattleState {
        self.state
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn fallback(&self) -> Option<RegionId> {
        self.fallback
    }

    pub fn defender_is_capital(&self) -> bool {
        self.defender_is_capital
    }

    pub fn flanks(&self) -> &[Flank; 3] {
        &self.flanks
    }

    pub fn terrain(&self) -> [TerrainType; 3] {
        self.flanks.map(|f| f.terrain)
    }

    /// Current `(attacker, defender)` combat modifiers.
    pub fn modifiers(&self) -> (f64, f64) {
        (self.attacker_mod, self.defender_mod)
    }

    /// Attacker troops not yet placed on a flank.
    pub fn unallocated(&self) -> TroopCounts {
        self.unallocated
    }

    pub fn attacker_ref(&self) -> TroopCounts {
        self.attacker_ref
    }

    pub fn defender_ref(&self) -> TroopCounts {
        self.defender_ref
    }

    /// Replaces the flank terrain. Allocations already made stay where they are.
    pub fn with_terrain(mut self, terrain: [TerrainType; 3]) -> Self {
        for p in ALL_FLANKS {
            self.flanks[p.index()].terrain = terrain[p.index()];
        }
        self
    }

    /// Overrides the drawn combat modifiers.
    pub fn with_modifiers(mut self, attacker: f64, defender: f64) -> Self {
        self.attacker_mod = attacker;
        self.defender_mod = defender;
        self
    }

    /// Replaces the defender's allocation.
    pub fn set_defender_flanks(&mut self, flanks: [TroopCounts; 3]) {
        for p in ALL_FLANKS {
            self.flanks[p.index()].defender = flanks[p.index()];
        }
    }

    /// Replaces the attacker's allocation. Whatever the split leaves out of
    /// the starting force stays in reserve.
    pub fn set_attacker_flanks(&mut self, flanks: [TroopCounts; 3]) -> Result<(), BattleError> {
        self.ensure_open()?;
        for p in ALL_FLANKS {
            self.flanks[p.index()].attacker = flanks[p.index()];
        }
        self.unallocated = self
            .attacker_ref
            .saturating_sub(&role_total(&self.flanks, Role::Attacker));
        self.state = BattleState::Initial;
        Ok(())
    }

    /// What to show the attacker when asking how to split `troop`.
    pub fn allocation_request(&self, troop: TroopType) -> AllocationRequest {
        AllocationRequest {
            battle: self.number,
            attacker: self.attacker,
            defender: self.defender,
            troop_type: troop,
            available: self.unallocated[troop],
            flank_terrain: self.terrain(),
            defender_estimate: AllocationRequest::estimate(&self.defender_ref),
        }
    }

    /// Picks up one troop type for placement.
    pub fn begin_allocation(&mut self, troop: TroopType) -> Result<(), BattleError> {
        match self.state {
            BattleState::Initial => {}
            BattleState::AllocWait(t) => return Err(AllocationError::AlreadyPending(t.name()).into()),
            _ => return Err(AllocationError::Closed.into()),
        }
        if self.unallocated[troop] == 0 {
            return Err(AllocationError::NoneRemaining(troop.name()).into());
        }
        self.state = BattleState::AllocWait(troop);
        Ok(())
    }

    pub fn cancel_allocation(&mut self) -> Result<(), BattleError> {
        match self.state {
            BattleState::AllocWait(_) => {
                self.state = BattleState::Initial;
                Ok(())
            }
            BattleState::Initial => Err(AllocationError::NothingPending.into()),
            _ => Err(AllocationError::Closed.into()),
        }
    }

    /// Places up to `count` troops of the pending type on `flank`. Returns
    /// how many were actually placed.
    pub fn apply_allocation(&mut self, flank: FlankPosition, count: u32) -> Result<u32, BattleError> {
        let troop = match self.state {
            BattleState::AllocWait(t) => t,
            BattleState::Initial => return Err(AllocationError::NothingPending.into()),
            _ => return Err(AllocationError::Closed.into()),
        };
        let placed = count.min(self.unallocated[troop]);
        self.flanks[flank.index()].attacker[troop] += placed;
        self.unallocated[troop] -= placed;
        self.state = BattleState::Initial;
        Ok(placed)
    }

    /// Applies a whole split for one troop type, clamped to what is left.
    pub fn apply_split(&mut self, troop: TroopType, split: FlankSplit) -> Result<(), BattleError> {
        self.ensure_open()?;
        let clamped = self.allocation_request(troop).clamp(split);
        for p in ALL_FLANKS {
            self.flanks[p.index()].attacker[troop] += clamped[p.index()];
            self.unallocated[troop] -= clamped[p.index()];
        }
        self.state = BattleState::Initial;
        Ok(())
    }

    /// Places every unallocated attacker with the terrain heuristic.
    pub fn auto_allocate_attacker(&mut self, rng: &mut impl Rng) -> Result<(), BattleError> {
        self.ensure_open()?;
        let split = auto_allocate(&self.unallocated, &self.terrain(), rng);
        for p in ALL_FLANKS {
            let slot = &mut self.flanks[p.index()].attacker;
            *slot = slot.saturating_add(&split[p.index()]);
        }
        self.unallocated = TroopCounts::default();
        self.state = BattleState::Initial;
        Ok(())
    }

    /// Closes allocation and starts the fight. With nothing on any flank the
    /// whole attacker pool is auto-allocated first.
    pub fn start(&mut self, rng: &mut impl Rng) -> Result<(), BattleError> {
        match self.state {
            BattleState::Initial => {}
            BattleState::AllocWait(t) => return Err(AllocationError::AlreadyPending(t.name()).into()),
            BattleState::Fighting => return Ok(()),
            BattleState::Ended => return Err(BattleError::AlreadyEnded),
        }
        if role_total(&self.flanks, Role::Attacker).total() == 0 {
            self.auto_allocate_attacker(rng)?;
        }
        self.state = BattleState::Fighting;
        tracing::debug!(battle = self.number, flanks = ?self.flanks, "battle started");
        Ok(())
    }

    /// Runs a single round of combat.
    pub fn advance_one_tick(
        &mut self,
        board: &mut Board,
        rng: &mut impl Rng,
        ui: &mut dyn Presentation,
    ) -> Result<BattleOutcome, BattleError> {
        match self.state {
            BattleState::Fighting => {}
            BattleState::Ended => return Err(BattleError::AlreadyEnded),
            _ => return Err(BattleError::NotStarted),
        }
        self.ticks += 1;

        let (off, def) = board
            .pair_mut(self.attacker, self.defender)
            .ok_or(BattleError::UnknownRegion(self.defender))?;

        if off.side() == def.side() {
            let report = self.merge(off, def, ui);
            return Ok(self.finish(report, ui));
        }
        if off.total_count() == 0 || def.total_count() == 0 {
            let report = self.conclude(board, rng, ui);
            return Ok(self.finish(report, ui));
        }

        if self.fallback.is_none() {
            let remaining = f64::from(def.total_count()) / f64::from(self.defender_ref.total().max(1));
            if remaining < CORNERED_FRACTION {
                self.defender_mod += CORNERED_CREEP;
            }
        }

        let off_live = off.counts();
        let def_live = def.counts();
        deploy_reserve(&mut self.flanks, Role::Attacker, &off_live);
        deploy_reserve(&mut self.flanks, Role::Defender, &def_live);
        rebalance(&mut self.flanks);

        self.animate(off, def, ui);

        let mut damage_by_attacker = 0.0;
        let mut damage_by_defender = 0.0;
        let mut craters = (0u32, 0u32);
        for flank in &self.flanks {
            damage_by_attacker += self.flank_damage(flank, Role::Attacker, rng);
            damage_by_defender += self.flank_damage(flank, Role::Defender, rng);
            if self.rules.crater_accrual {
                craters.0 += heavy_shots(&flank.attacker, rng);
                craters.1 += heavy_shots(&flank.defender, rng);
            }
        }
        tracing::debug!(
            battle = self.number,
            tick = self.ticks,
            damage_by_attacker,
            damage_by_defender,
            "tick damage"
        );

        off.distribute_damage(damage_by_defender, rng, ui);
        def.distribute_damage(damage_by_attacker, rng, ui);

        let (off_after, def_after) = (off.counts(), def.counts());
        scale_to_live(&mut self.flanks, Role::Attacker, &off_live, &off_after);
        scale_to_live(&mut self.flanks, Role::Defender, &def_live, &def_after);
        let share = self.blufor_share(off, def);
        let over = off.total_count() == 0 || def.total_count() == 0;

        // Attackers shell the defending region, defenders the attacking one.
        board.add_craters(self.defender, CRATER_PER_SHOT * f64::from(craters.0));
        board.add_craters(self.attacker, CRATER_PER_SHOT * f64::from(craters.1));
        ui.battle_progress(self.number, share);

        if over {
            let report = self.conclude(board, rng, ui);
            return Ok(self.finish(report, ui));
        }
        Ok(BattleOutcome::Ongoing)
    }

    /// Ticks until the battle resolves.
    pub fn run_to_completion(
        &mut self,
        board: &mut Board,
        rng: &mut impl Rng,
        ui: &mut dyn Presentation,
    ) -> Result<BattleReport, BattleError> {
        loop {
            if let BattleOutcome::Resolved(report) = self.advance_one_tick(board, rng, ui)? {
                return Ok(report);
            }
        }
    }

    fn ensure_open(&self) -> Result<(), BattleError> {
        match self.state {
            BattleState::Initial | BattleState::AllocWait(_) => Ok(()),
            BattleState::Fighting => Err(AllocationError::Closed.into()),
            BattleState::Ended => Err(BattleError::AlreadyEnded),
        }
    }

    /// Damage one side deals on one flank, capped at the opposing flank's health.
    fn flank_damage(&self, flank: &Flank, role: Role, rng: &mut impl Rng) -> f64 {
        let (own, enemy, modifier) = match role {
            Role::Attacker => (&flank.attacker, &flank.defender, self.attacker_mod),
            Role::Defender => (&flank.defender, &flank.attacker, self.defender_mod),
        };
        let mut dealt = 0.0;
        for t in ALL_TROOP_TYPES {
            let engaged = own[t].min(self.rules.combat_width.get(t));
            if engaged == 0 {
                continue;
            }
            let roll = rng.gen::<f64>() / 2.0 + modifier + flank.terrain.modifier(t);
            dealt += f64::from(engaged) * t.damage_per_unit() * roll;
        }
        let cap: f64 = ALL_TROOP_TYPES
            .iter()
            .map(|&t| f64::from(enemy[t]) * t.hp_per_unit())
            .sum();
        dealt.min(cap)
    }

    fn blufor_share(&self, off: &Force, def: &Force) -> f64 {
        let (a, d) = (f64::from(off.total_count()), f64::from(def.total_count()));
        let blufor = if self.attacker_side == Side::Opfor { d } else { a };
        blufor / (a + d + 1.0)
    }

    fn animate(&self, off: &Force, def: &Force, ui: &mut dyn Presentation) {
        let (off_views, def_views) = (off.views(), def.views());
        for v in &off_views {
            ui.animate_combat(v, &def_views, self.ticks);
        }
        for v in &def_views {
            ui.animate_combat(v, &off_views, self.ticks);
        }
    }

    /// Both regions are already on one side: fold the attacker into the defender.
    fn merge(&self, off: &mut Force, def: &mut Force, ui: &mut dyn Presentation) -> BattleReport {
        let attacker_before = off.counts();
        let defender_before = def.counts();
        let moved = off.withdraw_all(ui);
        def.reinforce(def.side(), &moved, ui);
        BattleReport {
            number: self.number,
            attacker: self.attacker,
            defender: self.defender,
            attacker_side: self.attacker_side,
            defender_side: self.defender_side,
            result: BattleResult::Merged,
            attacker_before,
            attacker_after: attacker_before,
            defender_before,
            defender_after: defender_before,
            routed_to: None,
            ticks: self.ticks,
        }
    }

    /// Restores casualties and settles ownership once one side is gone.
    fn conclude(&self, board: &mut Board, rng: &mut impl Rng, ui: &mut dyn Presentation) -> BattleReport {
        let capital_bonus = if self.defender_is_capital { rng.gen::<f64>() } else { 0.0 };
        let off_total = board.force(self.attacker).map_or(0, Force::total_count);

        if off_total == 0 {
            let Some((off, def)) = board.pair_mut(self.attacker, self.defender) else {
                return self.empty_report(BattleResult::DefenderHeld);
            };
            let def_now = def.counts();
            let restore = Troops::from_fn(|t| {
                let lost = self.defender_ref[t].saturating_sub(def_now[t]);
                (f64::from(lost) * (rng.gen::<f64>() + capital_bonus).min(1.0)).floor() as u32
            });
            def.reinforce(self.defender_side, &restore, ui);

            let off_now = off.counts();
            let regained = Troops::from_fn(|t| {
                let lost = self.attacker_ref[t].saturating_sub(off_now[t]);
                (f64::from(lost) * rng.gen::<f64>()).floor() as u32
            });
            off.reinforce(self.attacker_side, &regained, ui);

            return BattleReport {
                attacker_after: off.counts(),
                defender_after: def.counts(),
                ..self.empty_report(BattleResult::DefenderHeld)
            };
        }

        let survivors: TroopCounts = Troops::from_fn(|t| {
            (f64::from(self.defender_ref[t]) * (rng.gen::<f64>() + capital_bonus).min(1.0) / 2.0).floor() as u32
        });
        let routed_to = self
            .fallback
            .filter(|&fb| board.side_of(fb) == self.defender_side);
        let fallback_force = match routed_to {
            Some(fb) => board.force_mut(fb),
            None => None,
        };
        let defender_after = match fallback_force {
            Some(fb) => {
                fb.reinforce(self.defender_side, &survivors, ui);
                survivors
            }
            None => TroopCounts::default(),
        };

        let Some((off, def)) = board.pair_mut(self.attacker, self.defender) else {
            return self.empty_report(BattleResult::AttackerCaptured);
        };
        let off_now = off.counts();
        let regained = Troops::from_fn(|t| {
            let lost = self.attacker_ref[t].saturating_sub(off_now[t]);
            (2.0 / 3.0 * f64::from(lost) * rng.gen::<f64>()).floor() as u32
        });
        off.reinforce(self.attacker_side, &regained, ui);
        let attacker_after = off.withdraw_all(ui);
        def.occupy(self.attacker_side, &attacker_after, ui);

        BattleReport {
            attacker_after,
            defender_after,
            routed_to,
            ..self.empty_report(BattleResult::AttackerCaptured)
        }
    }

    fn empty_report(&self, result: BattleResult) -> BattleReport {
        BattleReport {
            number: self.number,
            attacker: self.attacker,
            defender: self.defender,
            attacker_side: self.attacker_side,
            defender_side: self.defender_side,
            result,
            attacker_before: self.attacker_ref,
            attacker_after: TroopCounts::default(),
            defender_before: self.defender_ref,
            defender_after: TroopCounts::default(),
            routed_to: None,
            ticks: self.ticks,
        }
    }

    fn finish(&mut self, report: BattleReport, ui: &mut dyn Presentation) -> BattleOutcome {
        self.state = BattleState::Ended;
        tracing::info!(
            battle = self.number,
            result = ?report.result,
            ticks = report.ticks,
            "battle resolved"
        );
        ui.log(&report.to_string(), LogClass::Battle);
        ui.battle_ended(&report);
        BattleOutcome::Resolved(report)
    }
}

/// Engaged heavy stacks that crater their target this tick (each has even odds).
fn heavy_shots(troops: &TroopCounts, rng: &mut impl Rng) -> u32 {
    ALL_TROOP_TYPES
        .iter()
        .filter(|t| t.is_heavy() && troops[**t] > 0)
        .filter(|_| rng.gen_bool(0.5))
        .count() as u32
}
