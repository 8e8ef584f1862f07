//! The game session: turn rotation, action queues, and battle scheduling.
//!
//! A `GameSession` owns every piece of mutable game state and the
//! presentation it reports to. Players drive it through `dispatch`; the
//! surrounding driver advances running battles with `tick` (or
//! `run_battles`) at whatever cadence it likes.

use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::battle::{Battle, BattleOutcome, BattleReport, BattleRules, BattleState};
use crate::board::{Board, RegionId, Side, TroopCounts, ALL_TROOP_TYPES};
use crate::command::{Command, CommandError};
use crate::config::GameConfig;
use crate::movegen::legal_origins;
use crate::presentation::{LogClass, Presentation};
use crate::turn::{action_quota, partition, reinforcements_for, winner, ActionKind, QueuedAction, TurnState};

pub struct GameSession<P: Presentation> {
    config: GameConfig,
    board: Board,
    rng: SmallRng,
    ui: P,
    current: Side,
    state: TurnState,
    queued: Vec<QueuedAction>,
    moved: Vec<RegionId>,
    pending: VecDeque<QueuedAction>,
    active: Option<Battle>,
    /// Unspent reinforcements, indexed by `Side::player_index`.
    banked: [TroopCounts; 2],
    notice_dismissed: [bool; 2],
    turn_count: u32,
    battle_count: u32,
    winner: Option<Side>,
}

impl<P: Presentation> GameSession<P> {
    /// Starts a game on the standard theater and opening deployment.
    pub fn new(config: GameConfig, ui: P) -> Self {
        let board = Board::standard(config.symmetrize_adjacency);
        GameSession::with_board(config, board, ui)
    }

    /// Starts a game on a prepared board.
    ///
    /// Blufor moves first. The priming rotations run before the first real
    /// turn, then Blufor receives its opening reinforcements.
    pub fn with_board(config: GameConfig, board: Board, ui: P) -> Self {
        let rng = match config.seed {
            0 => SmallRng::from_entropy(),
            seed => SmallRng::seed_from_u64(seed),
        };
        let mut session = GameSession {
            config,
            board,
            rng,
            ui,
            current: Side::Blufor,
            state: TurnState::Initial,
            queued: Vec::new(),
            moved: Vec::new(),
            pending: VecDeque::new(),
            active: None,
            banked: [TroopCounts::default(); 2],
            notice_dismissed: [false; 2],
            turn_count: 0,
            battle_count: 0,
            winner: None,
        };
        for _ in 0..session.config.priming_turns {
            session.resolve_turn();
            if session.winner.is_some() {
                return session;
            }
        }
        session.ui.draw_clouds();
        session.apply_fog_of_war();
        session.apply_reinforcements();
        tracing::info!(seed = session.config.seed, "game started");
        session
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn ui(&self) -> &P {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut P {
        &mut self.ui
    }

    pub fn current_side(&self) -> Side {
        self.current
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn queued_actions(&self) -> &[QueuedAction] {
        &self.queued
    }

    /// Origins already used this turn.
    pub fn moved(&self) -> &[RegionId] {
        &self.moved
    }

    /// The battle currently allocating or fighting.
    pub fn active_battle(&self) -> Option<&Battle> {
        self.active.as_ref()
    }

    /// Battles still waiting behind the active one.
    pub fn pending_battles(&self) -> usize {
        self.pending.len()
    }

    pub fn banked_reinforcements(&self, side: Side) -> TroopCounts {
        side.player_index().map_or_else(TroopCounts::default, |i| self.banked[i])
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn battle_count(&self) -> u32 {
        self.battle_count
    }

    pub fn visible_regions(&self, side: Side) -> Vec<RegionId> {
        self.board.visible_regions(side)
    }

    /// Regions the side to move may select right now.
    pub fn selectable_origins(&self) -> Vec<RegionId> {
        legal_origins(&self.board, self.current, &self.moved)
    }

    /// Applies a player command. An error leaves the session untouched.
    pub fn dispatch(&mut self, command: Command) -> Result<(), CommandError> {
        let result = self.apply(command);
        if let Err(e) = &result {
            tracing::debug!(?command, error = %e, "command ignored");
        }
        result
    }

    fn apply(&mut self, command: Command) -> Result<(), CommandError> {
        if self.winner.is_some() {
            return Err(CommandError::GameOver);
        }
        match command {
            Command::SelectOrigin(region) => self.select_origin(region),
            Command::SelectDestination(region) => self.select_destination(region),
            Command::Cancel => match self.state {
                TurnState::WaitForMoveSelect { .. } => {
                    self.state = TurnState::Initial;
                    Ok(())
                }
                other => Err(CommandError::WrongState(other)),
            },
            Command::EndTurn => self.end_turn(),
            Command::Reinforce { region, counts } => self.reinforce(region, counts),
            Command::DismissReinforcementNotice => {
                if let Some(i) = self.current.player_index() {
                    self.notice_dismissed[i] = true;
                }
                Ok(())
            }
            Command::BeginAllocation(troop) => Ok(self.allocating_battle()?.begin_allocation(troop)?),
            Command::ApplyAllocation { flank, count } => {
                self.allocating_battle()?.apply_allocation(flank, count)?;
                Ok(())
            }
            Command::CancelAllocation => Ok(self.allocating_battle()?.cancel_allocation()?),
            Command::AutoAllocate => {
                let battle = self.active.as_mut().ok_or(CommandError::NoBattle)?;
                battle.auto_allocate_attacker(&mut self.rng)?;
                Ok(())
            }
            Command::CommitAllocation => {
                let battle = self.active.as_mut().ok_or(CommandError::NoBattle)?;
                battle.start(&mut self.rng)?;
                Ok(())
            }
        }
    }

    fn allocating_battle(&mut self) -> Result<&mut Battle, CommandError> {
        match self.active.as_mut() {
            Some(b) if matches!(b.state(), BattleState::Initial | BattleState::AllocWait(_)) => Ok(b),
            _ => Err(CommandError::NoBattle),
        }
    }

    fn select_origin(&mut self, region: RegionId) -> Result<(), CommandError> {
        if self.state != TurnState::Initial {
            return Err(CommandError::WrongState(self.state));
        }
        let force = self.board.force(region).ok_or(CommandError::UnknownRegion(region))?;
        if self.moved.contains(&region) {
            return Err(CommandError::AlreadyMoved(region));
        }
        if force.side() != self.current {
            return Err(CommandError::NotOwned {
                region,
                side: self.current,
            });
        }
        if force.total_count() == 0 {
            return Err(CommandError::NoTroops(region));
        }
        self.state = TurnState::WaitForMoveSelect { origin: region };
        Ok(())
    }

    fn select_destination(&mut self, destination: RegionId) -> Result<(), CommandError> {
        let TurnState::WaitForMoveSelect { origin } = self.state else {
            return Err(CommandError::WrongState(self.state));
        };
        // Selecting the origin again cancels.
        if destination == origin {
            self.state = TurnState::Initial;
            return Ok(());
        }
        if !self.board.theater().is_adjacent(origin, destination) {
            return Err(CommandError::NotAdjacent { origin, destination });
        }
        self.queued.push(QueuedAction::new(self.current, origin, destination));
        self.moved.push(origin);
        self.state = TurnState::Initial;
        self.ui.draw_movement_arrow(self.current, origin, destination);

        let quota = action_quota(&self.board, self.current, self.config.max_actions_per_turn);
        if self.queued.len() >= quota {
            self.resolve_turn();
        }
        Ok(())
    }

    fn end_turn(&mut self) -> Result<(), CommandError> {
        if self.state == TurnState::Battle {
            return Err(CommandError::WrongState(self.state));
        }
        self.resolve_turn();
        Ok(())
    }

    fn reinforce(&mut self, region: RegionId, counts: Option<TroopCounts>) -> Result<(), CommandError> {
        if self.state != TurnState::Reinforcing {
            return Err(CommandError::WrongState(self.state));
        }
        let slot = self.current.player_index().ok_or(CommandError::NoReinforcements)?;
        let available = self.banked[slot];
        let deposit = counts.map_or(available, |c| c.min(&available));
        if deposit.is_empty() {
            return Err(CommandError::NoReinforcements);
        }
        let force = self.board.force_mut(region).ok_or(CommandError::UnknownRegion(region))?;
        if force.side() != self.current {
            return Err(CommandError::NotOwned {
                region,
                side: self.current,
            });
        }
        force.alter_force(&deposit.as_delta(), &mut self.ui);
        self.banked[slot] = available.saturating_sub(&deposit);
        self.ui.log(
            &format!("{} reinforces {} with {}", self.current.display_name(), region, describe(&deposit)),
            LogClass::Reinforcement,
        );
        if self.banked[slot].is_empty() {
            self.state = TurnState::Initial;
        }
        Ok(())
    }

    /// Resolves the side to move's queued actions: moves now, battles in order.
    fn resolve_turn(&mut self) {
        self.turn_count += 1;
        if self.turn_count % 2 == 0 {
            self.ui.draw_clouds();
        }
        let actions = std::mem::take(&mut self.queued);
        let (moves, battles) = partition(&actions, &self.board);
        tracing::info!(
            turn = self.turn_count,
            side = %self.current,
            moves = moves.len(),
            battles = battles.len(),
            "resolving turn"
        );
        for action in &moves {
            self.execute_move(action);
        }
        self.pending.extend(battles);
        self.state = TurnState::Battle;
        self.next_battle();
    }

    fn execute_move(&mut self, action: &QueuedAction) {
        if action.classify(&self.board) != ActionKind::Move {
            return;
        }
        let Some((src, dst)) = self.board.pair_mut(action.origin, action.destination) else {
            return;
        };
        let troops = src.withdraw_all(&mut self.ui);
        dst.reinforce(action.side, &troops, &mut self.ui);
        self.ui.log(
            &format!("{} moves from {} to {}", action.side.display_name(), action.origin, action.destination),
            LogClass::Move,
        );
    }

    /// Sets up the next queued battle, or finishes the turn if none is left.
    fn next_battle(&mut self) {
        while let Some(action) = self.pending.pop_front() {
            match action.classify(&self.board) {
                ActionKind::Stale => continue,
                ActionKind::Move => {
                    self.execute_move(&action);
                    continue;
                }
                ActionKind::Battle => {}
            }
            self.battle_count += 1;
            let rules = BattleRules::from(&self.config);
            let battle = match Battle::new(
                self.battle_count,
                &self.board,
                action.origin,
                action.destination,
                rules,
                &mut self.rng,
            ) {
                Ok(b) => b,
                Err(e) => {
                    tracing::warn!(error = %e, "battle could not be set up");
                    continue;
                }
            };
            self.ui.log(
                &format!(
                    "{} attacks {} from {}",
                    action.side.display_name(),
                    action.destination,
                    action.origin
                ),
                LogClass::Attack,
            );
            self.active = Some(battle);
            self.collect_allocation();
            return;
        }
        self.finish_turn();
    }

    /// Asks the presentation for the attacker's split, or allocates
    /// automatically when configured to. Starts the battle once every troop
    /// type has been answered; otherwise allocation commands take over.
    fn collect_allocation(&mut self) {
        let Some(battle) = self.active.as_mut() else {
            return;
        };
        let answered = if self.config.auto_allocate_attacker {
            battle.auto_allocate_attacker(&mut self.rng).is_ok()
        } else {
            let mut all = true;
            for t in ALL_TROOP_TYPES {
                if battle.unallocated()[t] == 0 {
                    continue;
                }
                let request = battle.allocation_request(t);
                match self.ui.prompt_flank_allocation(&request) {
                    Some(split) if battle.apply_split(t, split).is_ok() => {}
                    _ => {
                        all = false;
                        break;
                    }
                }
            }
            all
        };
        if answered {
            if let Err(e) = battle.start(&mut self.rng) {
                tracing::warn!(error = %e, "battle could not start");
            }
        }
    }

    /// Advances the active battle by one tick. Returns `None` when no battle
    /// is fighting.
    pub fn tick(&mut self) -> Option<BattleOutcome> {
        let battle = self.active.as_mut()?;
        if battle.state() != BattleState::Fighting {
            return None;
        }
        let outcome = match battle.advance_one_tick(&mut self.board, &mut self.rng, &mut self.ui) {
            Ok(o) => o,
            Err(e) => {
                tracing::warn!(error = %e, "battle tick failed");
                return None;
            }
        };
        if let BattleOutcome::Resolved(_) = &outcome {
            self.active = None;
            self.next_battle();
        }
        Some(outcome)
    }

    /// Ticks until no battle is fighting: either every queued battle is done
    /// or the next one is waiting for the attacker's allocation.
    pub fn run_battles(&mut self) -> Vec<BattleReport> {
        let mut reports = Vec::new();
        while let Some(outcome) = self.tick() {
            if let BattleOutcome::Resolved(report) = outcome {
                reports.push(report);
            }
        }
        reports
    }

    /// Turn-end cleanup, win check, and rotation.
    fn finish_turn(&mut self) {
        self.ui.clear_movement_arrows();
        self.moved.clear();
        self.ui.update_strength_ratio(self.board.strength_ratio());

        if let Some(side) = winner(&self.board) {
            self.winner = Some(side);
            self.state = TurnState::Initial;
            let msg = format!("{} VICTORY.", side.display_name());
            self.ui.log(&msg, LogClass::Victory);
            self.ui.notify_victory(side);
            tracing::info!(%side, turn = self.turn_count, "victory");
            return;
        }

        self.current = self.current.opponent();
        self.state = TurnState::Initial;
        self.apply_fog_of_war();
        if self.turn_count > self.config.priming_turns {
            self.apply_reinforcements();
        }
    }

    fn apply_fog_of_war(&mut self) {
        let visible = self.board.visible_regions(self.current);
        self.ui.apply_fog_of_war(self.current, &visible);
    }

    /// Banks the side to move's capital reinforcements, replacing anything
    /// left over from its previous turn.
    fn apply_reinforcements(&mut self) {
        let Some(slot) = self.current.player_index() else {
            return;
        };
        let bundle = reinforcements_for(&self.board, self.current);
        self.banked[slot] = bundle;
        if !self.notice_dismissed[slot] {
            self.ui.notify_reinforcements(self.current, &bundle);
        }
        self.ui.log(
            &format!("{} has reinforcements: {}", self.current.display_name(), describe(&bundle)),
            LogClass::Reinforcement,
        );
        if !bundle.is_empty() {
            self.state = TurnState::Reinforcing;
        }
    }
}

fn describe(troops: &TroopCounts) -> String {
    ALL_TROOP_TYPES
        .iter()
        .map(|&t| format!("{} {}", troops[t], t.name()))
        .collect::<Vec<_>>()
        .join(", ")
}
