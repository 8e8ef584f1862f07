//! Battle-odds simulation.
//!
//! Runs many independent, auto-allocated battles for one attacker/defender
//! matchup and aggregates the results. Battles are spread over a rayon pool;
//! battle `i` is seeded with `seed + i` so a run is reproducible regardless
//! of thread count.

use std::io::Write;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;

use crate::battle::{Battle, BattleError, BattleResult, BattleRules};
use crate::board::region::r;
use crate::board::{Board, RegionId, Side, TroopCounts, TroopDelta};
use crate::config::CombatWidth;
use crate::presentation::NullPresentation;

#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub attacker: TroopCounts,
    pub defender: TroopCounts,
    pub attacker_region: RegionId,
    pub defender_region: RegionId,
    pub battles: usize,
    pub threads: usize,
    /// 0 draws every battle's seed from entropy.
    pub seed: u64,
    pub combat_width: CombatWidth,
    pub crater_accrual: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            attacker: TroopCounts::new(1000, 0, 0),
            defender: TroopCounts::new(500, 0, 0),
            attacker_region: r("e4"),
            defender_region: r("e5"),
            battles: 100,
            threads: 4,
            seed: 0,
            combat_width: CombatWidth::standard(),
            crater_accrual: true,
        }
    }
}

/// Outcome of one simulated battle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattleSample {
    pub index: usize,
    pub result: BattleResult,
    pub ticks: u32,
    pub attacker_after: TroopCounts,
    pub defender_after: TroopCounts,
    pub attacker_losses: TroopDelta,
    pub defender_losses: TroopDelta,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub battles: usize,
    pub attacker_wins: usize,
    pub attacker_win_rate: f64,
    pub mean_ticks: f64,
    /// Mean troops lost per battle, all types together.
    pub mean_attacker_losses: f64,
    pub mean_defender_losses: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error(transparent)]
    Battle(#[from] BattleError),
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Runs `config.battles` battles and returns them in index order.
pub fn run_simulation(config: &SimulationConfig) -> Result<Vec<BattleSample>, SimulationError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads.max(1))
        .build()?;
    let samples = pool.install(|| {
        (0..config.battles)
            .into_par_iter()
            .map(|i| simulate_one(config, i))
            .collect::<Result<Vec<_>, _>>()
    })?;
    tracing::info!(battles = samples.len(), "simulation finished");
    Ok(samples)
}

/// Fights battle number `index` of a run to completion.
pub fn simulate_one(config: &SimulationConfig, index: usize) -> Result<BattleSample, SimulationError> {
    let mut rng = match config.seed {
        0 => SmallRng::from_entropy(),
        seed => SmallRng::seed_from_u64(seed.wrapping_add(index as u64)),
    };
    let mut board = Board::standard(true);
    board.place(config.attacker_region, Side::Blufor, config.attacker);
    board.place(config.defender_region, Side::Opfor, config.defender);
    let rules = BattleRules {
        combat_width: config.combat_width,
        crater_accrual: config.crater_accrual,
    };
    let number = u32::try_from(index + 1).unwrap_or(u32::MAX);
    let mut battle = Battle::new(number, &board, config.attacker_region, config.defender_region, rules, &mut rng)?;
    battle.start(&mut rng)?;
    let report = battle.run_to_completion(&mut board, &mut rng, &mut NullPresentation)?;
    Ok(BattleSample {
        index,
        result: report.result,
        ticks: report.ticks,
        attacker_after: report.attacker_after,
        defender_after: report.defender_after,
        attacker_losses: report.attacker_losses(),
        defender_losses: report.defender_losses(),
    })
}

pub fn summarize(samples: &[BattleSample]) -> SimulationSummary {
    let n = samples.len();
    let attacker_wins = samples
        .iter()
        .filter(|s| s.result == BattleResult::AttackerCaptured)
        .count();
    let mean = |f: &dyn Fn(&BattleSample) -> f64| {
        if n == 0 {
            0.0
        } else {
            samples.iter().map(f).sum::<f64>() / n as f64
        }
    };
    let lost = |d: &TroopDelta| -(d.infantry + d.helicopter + d.armor) as f64;
    SimulationSummary {
        battles: n,
        attacker_wins,
        attacker_win_rate: if n == 0 { 0.0 } else { attacker_wins as f64 / n as f64 },
        mean_ticks: mean(&|s| f64::from(s.ticks)),
        mean_attacker_losses: mean(&|s| lost(&s.attacker_losses)),
        mean_defender_losses: mean(&|s| lost(&s.defender_losses)),
    }
}

/// Writes one JSON object per sample, one per line.
pub fn write_jsonl<W: Write>(samples: &[BattleSample], out: &mut W) -> std::io::Result<()> {
    for sample in samples {
        serde_json::to_writer(&mut *out, sample)?;
        writeln!(out)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(battles: usize) -> SimulationConfig {
        SimulationConfig {
            battles,
            threads: 2,
            seed: 99,
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let a = run_simulation(&config(8)).unwrap();
        let b = run_simulation(&SimulationConfig {
            threads: 1,
            ..config(8)
        })
        .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.iter().map(|s| s.index).collect::<Vec<_>>(), (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn lopsided_matchup_favours_attacker() {
        let samples = run_simulation(&SimulationConfig {
            attacker: TroopCounts::new(2000, 0, 0),
            defender: TroopCounts::new(50, 0, 0),
            ..config(10)
        })
        .unwrap();
        let summary = summarize(&samples);
        assert_eq!(summary.battles, 10);
        assert_eq!(summary.attacker_wins, 10);
        assert_eq!(summary.attacker_win_rate, 1.0);
        assert!(summary.mean_ticks >= 1.0);
    }

    #[test]
    fn empty_summary() {
        let s = summarize(&[]);
        assert_eq!(s.battles, 0);
        assert_eq!(s.attacker_win_rate, 0.0);
    }

    #[test]
    fn same_region_is_an_error() {
        let bad = SimulationConfig {
            defender_region: r("e4"),
            ..config(1)
        };
        assert!(matches!(
            run_simulation(&bad),
            Err(SimulationError::Battle(BattleError::SameRegion))
        ));
    }

    #[test]
    fn jsonl_one_line_per_sample() {
        let samples = run_simulation(&config(3)).unwrap();
        let mut buf = Vec::new();
        write_jsonl(&samples, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.lines().all(|l| l.starts_with("{\"index\":")));
    }
}
