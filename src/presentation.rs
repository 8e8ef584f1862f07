//! The boundary between the game core and whatever shows it to players.
//!
//! The core reports state changes through `Presentation` and asks it for
//! one thing only: the attacker's flank split. Every method has a no-op
//! default so a front end implements just what it draws.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::battle::{AllocationRequest, BattleReport, FlankSplit};
use crate::board::{RegionId, Side, TroopCounts, UnitView};

/// Category tag attached to game-log entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogClass {
    Info,
    Move,
    Attack,
    Battle,
    Reinforcement,
    Victory,
}

impl LogClass {
    pub const fn name(self) -> &'static str {
        match self {
            LogClass::Info => "info",
            LogClass::Move => "move",
            LogClass::Attack => "attack",
            LogClass::Battle => "battle",
            LogClass::Reinforcement => "reinforcement",
            LogClass::Victory => "victory",
        }
    }
}

pub trait Presentation {
    fn set_region_owner(&mut self, _region: RegionId, _side: Side) {}

    /// A unit's count changed. A count of zero means the stack is gone.
    fn update_unit_display(&mut self, _unit: &UnitView) {}

    fn log(&mut self, _message: &str, _class: LogClass) {}

    fn animate_combat(&mut self, _source: &UnitView, _targets: &[UnitView], _tick: u32) {}

    fn draw_movement_arrow(&mut self, _side: Side, _origin: RegionId, _destination: RegionId) {}

    fn clear_movement_arrows(&mut self) {}

    fn draw_clouds(&mut self) {}

    /// Asks the attacking player how to split one troop type across the
    /// flanks. `None` defers the decision to allocation commands.
    fn prompt_flank_allocation(&mut self, _request: &AllocationRequest) -> Option<FlankSplit> {
        None
    }

    fn notify_reinforcements(&mut self, _side: Side, _troops: &TroopCounts) {}

    fn notify_victory(&mut self, _side: Side) {}

    fn apply_fog_of_war(&mut self, _side: Side, _visible: &[RegionId]) {}

    /// Blufor's share of all troops on the board.
    fn update_strength_ratio(&mut self, _ratio: f64) {}

    /// Blufor participant's share of a running battle, after each tick.
    fn battle_progress(&mut self, _battle: u32, _share: f64) {}

    /// A battle finished; its transient visuals can be removed.
    fn battle_ended(&mut self, _report: &BattleReport) {}
}

/// Discards everything and defers every allocation prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresentation;

impl Presentation for NullPresentation {}

/// A timestamped game-log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    /// Wall-clock time of day, `HH:MM:SS` (UTC).
    pub time: String,
    pub class: LogClass,
    pub message: String,
}

/// Ordered, timestamped player-facing log.
#[derive(Debug, Clone, Default)]
pub struct GameLog {
    entries: Vec<LogEntry>,
}

impl GameLog {
    pub fn push(&mut self, message: &str, class: LogClass) {
        self.entries.push(LogEntry {
            time: clock_time(),
            class,
            message: message.to_string(),
        });
    }

    /// Entries with the most recent first.
    pub fn newest_first(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn clock_time() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format_clock(secs)
}

/// Formats seconds since the epoch as a UTC time of day.
pub fn format_clock(epoch_secs: u64) -> String {
    let day = epoch_secs % 86_400;
    format!("{:02}:{:02}:{:02}", day / 3600, day % 3600 / 60, day % 60)
}

/// Everything a `RecordingPresentation` saw, in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PresentationEvent {
    Owner { region: RegionId, side: Side },
    Unit(UnitView),
    Arrow { side: Side, origin: RegionId, destination: RegionId },
    ClearArrows,
    Prompt(AllocationRequest),
    Reinforcements { side: Side, troops: TroopCounts },
    Victory { side: Side },
    Fog { side: Side, visible: Vec<RegionId> },
    StrengthRatio { ratio: f64 },
    BattleEnded(BattleReport),
}

/// Keeps a log and an event trail; used by tests and headless drivers.
///
/// Allocation prompts are answered from `allocation_answers` in order, or
/// deferred once the queue runs dry.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresentation {
    pub log: GameLog,
    events: Vec<PresentationEvent>,
    pub allocation_answers: Vec<FlankSplit>,
}

impl RecordingPresentation {
    pub fn events(&self) -> &[PresentationEvent] {
        &self.events
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Log messages in the order they were written.
    pub fn messages(&self) -> Vec<&str> {
        let mut msgs: Vec<&str> = self.log.newest_first().map(|e| e.message.as_str()).collect();
        msgs.reverse();
        msgs
    }
}

impl Presentation for RecordingPresentation {
    fn set_region_owner(&mut self, region: RegionId, side: Side) {
        self.events.push(PresentationEvent::Owner { region, side });
    }

    fn update_unit_display(&mut self, unit: &UnitView) {
        self.events.push(PresentationEvent::Unit(*unit));
    }

    fn log(&mut self, message: &str, class: LogClass) {
        self.log.push(message, class);
    }

    fn draw_movement_arrow(&mut self, side: Side, origin: RegionId, destination: RegionId) {
        self.events.push(PresentationEvent::Arrow {
            side,
            origin,
            destination,
        });
    }

    fn clear_movement_arrows(&mut self) {
        self.events.push(PresentationEvent::ClearArrows);
    }

    fn prompt_flank_allocation(&mut self, request: &AllocationRequest) -> Option<FlankSplit> {
        self.events.push(PresentationEvent::Prompt(request.clone()));
        if self.allocation_answers.is_empty() {
            None
        } else {
            Some(self.allocation_answers.remove(0))
        }
    }

    fn notify_reinforcements(&mut self, side: Side, troops: &TroopCounts) {
        self.events.push(PresentationEvent::Reinforcements {
            side,
            troops: *troops,
        });
    }

    fn notify_victory(&mut self, side: Side) {
        self.events.push(PresentationEvent::Victory { side });
    }

    fn apply_fog_of_war(&mut self, side: Side, visible: &[RegionId]) {
        self.events.push(PresentationEvent::Fog {
            side,
            visible: visible.to_vec(),
        });
    }

    fn update_strength_ratio(&mut self, ratio: f64) {
        self.events.push(PresentationEvent::StrengthRatio { ratio });
    }

    fn battle_ended(&mut self, report: &BattleReport) {
        self.events.push(PresentationEvent::BattleEnded(report.clone()));
    }
}
