//! Line-oriented front end.
//!
//! `TextPresentation` renders presentation callbacks as protocol lines;
//! `Frontend` owns the session and answers parsed requests.

use std::io::{self, Write};
use std::time::Duration;

use super::parser::Request;
use crate::battle::{AllocationRequest, BattleReport, FlankSplit};
use crate::board::{RegionId, Side, TroopCounts, UnitView, ALL_TROOP_TYPES};
use crate::command::Command;
use crate::config::GameConfig;
use crate::engine::GameSession;
use crate::presentation::{LogClass, Presentation};

/// Buffers protocol lines until the front end flushes them.
#[derive(Debug, Default)]
pub struct TextPresentation {
    lines: Vec<String>,
}

impl TextPresentation {
    /// Takes every buffered line.
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }

    fn push(&mut self, line: String) {
        self.lines.push(line);
    }
}

fn counts(c: &TroopCounts) -> String {
    format!("{} {} {}", c.infantry, c.helicopter, c.armor)
}

impl Presentation for TextPresentation {
    fn set_region_owner(&mut self, region: RegionId, side: Side) {
        self.push(format!("owner {region} {side}"));
    }

    fn update_unit_display(&mut self, unit: &UnitView) {
        self.push(format!(
            "unit {} {} {} {}",
            unit.region,
            unit.side,
            unit.troop_type.name(),
            unit.count
        ));
    }

    fn log(&mut self, message: &str, class: LogClass) {
        for line in message.lines() {
            self.push(format!("log {} {}", class.name(), line));
        }
    }

    fn draw_movement_arrow(&mut self, side: Side, origin: RegionId, destination: RegionId) {
        self.push(format!("arrow {side} {origin} {destination}"));
    }

    fn prompt_flank_allocation(&mut self, request: &AllocationRequest) -> Option<FlankSplit> {
        let estimate: Vec<String> = ALL_TROOP_TYPES
            .iter()
            .map(|&t| request.defender_estimate[t].map_or("-", |e| e.name()).to_string())
            .collect();
        let terrain: Vec<&str> = request.flank_terrain.iter().map(|t| t.name()).collect();
        self.push(format!(
            "prompt alloc {} {} {} {} {} terrain {} defender {}",
            request.battle,
            request.attacker,
            request.defender,
            request.troop_type.name(),
            request.available,
            terrain.join(" "),
            estimate.join(" ")
        ));
        None
    }

    fn notify_reinforcements(&mut self, side: Side, troops: &TroopCounts) {
        self.push(format!("reinforcements {side} {}", counts(troops)));
    }

    fn notify_victory(&mut self, side: Side) {
        self.push(format!("victory {side}"));
    }

    fn update_strength_ratio(&mut self, ratio: f64) {
        self.push(format!("ratio {ratio:.3}"));
    }

    fn battle_ended(&mut self, report: &BattleReport) {
        self.push(format!(
            "battle {} {:?} ticks {}",
            report.number, report.result, report.ticks
        ));
    }
}

/// Holds the options and the running session between requests.
#[derive(Default)]
pub struct Frontend {
    pub options: GameConfig,
    session: Option<GameSession<TextPresentation>>,
}

impl Frontend {
    pub fn new(options: GameConfig) -> Self {
        Frontend {
            options,
            session: None,
        }
    }

    pub fn session(&self) -> Option<&GameSession<TextPresentation>> {
        self.session.as_ref()
    }

    /// Answers one request. Returns `Ok(false)` when the client asked to quit.
    pub fn handle<W: Write>(&mut self, request: Request, out: &mut W) -> io::Result<bool> {
        match request {
            Request::Quit => return Ok(false),
            Request::IsReady => writeln!(out, "readyok")?,
            Request::NewGame => self.handle_newgame(),
            Request::SetOption { name, value } => {
                let value = value.unwrap_or_default();
                if let Err(e) = self.options.set_option(&name, &value) {
                    writeln!(out, "error {e}")?;
                }
            }
            Request::Run => self.handle_run(out)?,
            Request::Show(region) => self.handle_show(region, out)?,
            Request::Status => self.handle_status(out)?,
            Request::Move { origin, destination } => self.handle_move(origin, destination, out)?,
            other => {
                if let Some(cmd) = to_command(&other) {
                    self.handle_commands(&[cmd], out)?;
                }
            }
        }
        self.flush_lines(out)?;
        out.flush()?;
        Ok(true)
    }

    fn handle_newgame(&mut self) {
        self.session = Some(GameSession::new(self.options.clone(), TextPresentation::default()));
    }

    fn handle_commands<W: Write>(&mut self, commands: &[Command], out: &mut W) -> io::Result<()> {
        let Some(session) = self.session.as_mut() else {
            return writeln!(out, "error no game in progress");
        };
        for &cmd in commands {
            if let Err(e) = session.dispatch(cmd) {
                writeln!(out, "error {e}")?;
                break;
            }
        }
        Ok(())
    }

    /// Selects both ends of a move. A rejected destination drops the origin
    /// again so the session is left as it was.
    fn handle_move<W: Write>(&mut self, origin: RegionId, destination: RegionId, out: &mut W) -> io::Result<()> {
        let Some(session) = self.session.as_mut() else {
            return writeln!(out, "error no game in progress");
        };
        if let Err(e) = session.dispatch(Command::SelectOrigin(origin)) {
            return writeln!(out, "error {e}");
        }
        if let Err(e) = session.dispatch(Command::SelectDestination(destination)) {
            let _ = session.dispatch(Command::Cancel);
            writeln!(out, "error {e}")?;
        }
        Ok(())
    }

    /// Ticks the active battles, pacing them by the configured interval.
    fn handle_run<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let Some(session) = self.session.as_mut() else {
            return writeln!(out, "error no game in progress");
        };
        let pause = Duration::from_millis(session.config().tick_interval_ms);
        while session.tick().is_some() {
            for line in session.ui_mut().drain() {
                writeln!(out, "{line}")?;
            }
            out.flush()?;
            if !pause.is_zero() {
                std::thread::sleep(pause);
            }
        }
        Ok(())
    }

    fn handle_show<W: Write>(&mut self, region: RegionId, out: &mut W) -> io::Result<()> {
        let Some(session) = self.session.as_ref() else {
            return writeln!(out, "error no game in progress");
        };
        match session.board().force(region) {
            Some(f) => writeln!(
                out,
                "force {} {} {} capital {}",
                region,
                f.side(),
                counts(&f.counts()),
                f.is_capital()
            ),
            None => writeln!(out, "error region {region} is not on the board"),
        }
    }

    fn handle_status<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let Some(session) = self.session.as_ref() else {
            return writeln!(out, "error no game in progress");
        };
        let winner = session.winner().map_or_else(|| "none".to_string(), |s| s.to_string());
        let battle = session
            .active_battle()
            .map_or_else(|| "none".to_string(), |b| b.number().to_string());
        writeln!(
            out,
            "status turn {} side {} state {} winner {} banked {} battle {}",
            session.turn_count(),
            session.current_side(),
            session.state(),
            winner,
            counts(&session.banked_reinforcements(session.current_side())),
            battle
        )
    }

    fn flush_lines<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if let Some(session) = self.session.as_mut() {
            for line in session.ui_mut().drain() {
                writeln!(out, "{line}")?;
            }
        }
        Ok(())
    }
}

/// Requests that map onto a single session command.
fn to_command(request: &Request) -> Option<Command> {
    Some(match *request {
        Request::Select(region) => Command::SelectOrigin(region),
        Request::Cancel => Command::Cancel,
        Request::EndTurn => Command::EndTurn,
        Request::Reinforce { region, counts } => Command::Reinforce { region, counts },
        Request::Dismiss => Command::DismissReinforcementNotice,
        Request::AllocBegin(t) => Command::BeginAllocation(t),
        Request::AllocApply { flank, count } => Command::ApplyAllocation { flank, count },
        Request::AllocCancel => Command::CancelAllocation,
        Request::AllocAuto => Command::AutoAllocate,
        Request::AllocCommit => Command::CommitAllocation,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::parser::parse_command;
    use crate::turn::TurnState;

    fn run(frontend: &mut Frontend, lines: &[&str]) -> Vec<String> {
        let mut out = Vec::new();
        for line in lines {
            if let Some(req) = parse_command(line) {
                frontend.handle(req, &mut out).unwrap();
            }
        }
        String::from_utf8(out).unwrap().lines().map(str::to_string).collect()
    }

    fn quick() -> Frontend {
        Frontend::new(GameConfig {
            seed: 21,
            tick_interval_ms: 0,
            auto_allocate_attacker: true,
            ..GameConfig::default()
        })
    }

    #[test]
    fn commands_need_a_game() {
        let mut f = quick();
        let out = run(&mut f, &["select e4", "status"]);
        assert_eq!(out, ["error no game in progress", "error no game in progress"]);
    }

    #[test]
    fn newgame_reports_reinforcements() {
        let mut f = quick();
        let out = run(&mut f, &["newgame", "status"]);
        assert!(out.contains(&"reinforcements bf 140 6 2".to_string()));
        assert!(out.iter().any(|l| l.starts_with("log reinforcement NATO has reinforcements")));
        assert!(out.iter().any(|l| l.starts_with("status turn 2 side bf state reinforcing")));
    }

    #[test]
    fn show_prints_force() {
        let mut f = quick();
        let out = run(&mut f, &["newgame", "show e3"]);
        assert_eq!(out.last().map(String::as_str), Some("force e3 of 1850 0 38 capital true"));
    }

    #[test]
    fn invalid_action_reports_error() {
        let mut f = quick();
        let out = run(&mut f, &["newgame", "reinforce a6", "move e4 j9"]);
        assert!(out.last().is_some_and(|l| l.starts_with("error ") && l.contains("not adjacent")));
    }

    #[test]
    fn rejected_move_leaves_no_origin_selected() {
        let mut f = quick();
        run(&mut f, &["newgame", "reinforce a6", "move e4 j9"]);
        assert_eq!(f.session().map(|s| s.state()), Some(TurnState::Initial));
    }

    #[test]
    fn attack_resolves_with_run() {
        let mut f = quick();
        let out = run(&mut f, &["newgame", "reinforce a6", "move e4 e3", "endturn", "run"]);
        assert!(out.contains(&"arrow bf e4 e3".to_string()));
        assert!(out.iter().any(|l| l == "log attack NATO attacks e3 from e4"));
        assert!(out.iter().any(|l| l.starts_with("battle 1 ")));
        assert_eq!(f.session().map(|s| s.current_side()), Some(Side::Opfor));
    }

    #[test]
    fn manual_allocation_prompts() {
        let mut f = Frontend::new(GameConfig {
            seed: 4,
            tick_interval_ms: 0,
            ..GameConfig::default()
        });
        let out = run(
            &mut f,
            &[
                "newgame",
                "reinforce a6",
                "move e4 e3",
                "endturn",
                "alloc begin infantry",
                "alloc apply middle 350",
                "alloc commit",
                "run",
            ],
        );
        assert!(out
            .iter()
            .any(|l| l.starts_with("prompt alloc 1 e4 e3 infantry 350 terrain ")));
        assert!(out.iter().any(|l| l.starts_with("battle 1 ")));
        assert!(f.session().is_some_and(|s| s.active_battle().is_none()));
    }

    #[test]
    fn setoption_errors_are_reported() {
        let mut f = quick();
        let out = run(&mut f, &["setoption name Threads value 2", "setoption name Seed value 7"]);
        assert_eq!(out, ["error unknown option 'Threads'"]);
        assert_eq!(f.options.seed, 7);
    }
}
