//! Battle-odds simulation CLI.
//!
//! Fights one matchup many times and outputs every battle as JSONL.
//!
//! Usage:
//!   cargo run --release --bin simulate -- [OPTIONS]
//!
//! Options:
//!   --attacker I,H,A   Attacking troops (default: 1000,0,0)
//!   --defender I,H,A   Defending troops (default: 500,0,0)
//!   --from REGION      Attacking region (default: e4)
//!   --to REGION        Defending region (default: e5)
//!   --battles N        Number of battles (default: 100)
//!   --threads N        Number of parallel threads (default: 4)
//!   --seed N           Random seed, 0 for entropy (default: 0)
//!   --width NAME       Combat width: standard or expanded (default: standard)
//!   --no-craters       Disable crater accrual
//!   --output FILE      Output file path (default: stdout)
//!   --quiet            Suppress summary output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::time::Instant;

use frontline::board::TroopCounts;
use frontline::config::CombatWidth;
use frontline::simulate::{self, SimulationConfig};
use tracing_subscriber::EnvFilter;

fn parse_troops(s: &str) -> Option<TroopCounts> {
    let parts = s.split(',').map(|p| p.trim().parse()).collect::<Result<Vec<u32>, _>>().ok()?;
    match parts[..] {
        [i, h, a] => Some(TroopCounts::new(i, h, a)),
        _ => None,
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let mut config = SimulationConfig::default();
    let mut output_path: Option<String> = None;
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--attacker" => {
                i += 1;
                config.attacker = parse_troops(&args[i]).expect("invalid --attacker value");
            }
            "--defender" => {
                i += 1;
                config.defender = parse_troops(&args[i]).expect("invalid --defender value");
            }
            "--from" => {
                i += 1;
                config.attacker_region = args[i].parse().expect("invalid --from region");
            }
            "--to" => {
                i += 1;
                config.defender_region = args[i].parse().expect("invalid --to region");
            }
            "--battles" => {
                i += 1;
                config.battles = args[i].parse().expect("invalid --battles value");
            }
            "--threads" => {
                i += 1;
                config.threads = args[i].parse().expect("invalid --threads value");
            }
            "--seed" => {
                i += 1;
                config.seed = args[i].parse().expect("invalid --seed value");
            }
            "--width" => {
                i += 1;
                config.combat_width = CombatWidth::from_name(&args[i]).expect("invalid --width value");
            }
            "--no-craters" => {
                config.crater_accrual = false;
            }
            "--output" => {
                i += 1;
                output_path = Some(args[i].clone());
            }
            "--quiet" => {
                quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    if !quiet {
        eprintln!(
            "Simulating {} battles: {} -> {}, attacker {}, defender {}, {} threads",
            config.battles,
            config.attacker_region,
            config.defender_region,
            config.attacker,
            config.defender,
            config.threads
        );
    }

    let start = Instant::now();
    let samples = match simulate::run_simulation(&config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("simulation failed: {}", e);
            std::process::exit(1);
        }
    };
    let elapsed = start.elapsed();

    if !quiet {
        let summary = simulate::summarize(&samples);
        eprintln!(
            "Completed {} battles in {:.2}s: attacker won {:.1}%, mean {:.1} ticks, mean losses {:.1} / {:.1}",
            summary.battles,
            elapsed.as_secs_f64(),
            summary.attacker_win_rate * 100.0,
            summary.mean_ticks,
            summary.mean_attacker_losses,
            summary.mean_defender_losses
        );
    }

    match output_path {
        Some(path) => {
            let file = File::create(&path).expect("failed to create output file");
            let mut writer = BufWriter::new(file);
            simulate::write_jsonl(&samples, &mut writer).expect("failed to write output");
            if !quiet {
                eprintln!("Wrote {} battles to {}", samples.len(), path);
            }
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            simulate::write_jsonl(&samples, &mut writer).expect("failed to write output");
        }
    }
}

fn print_usage() {
    eprintln!("Usage: simulate [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --attacker I,H,A   Attacking troops (default: 1000,0,0)");
    eprintln!("  --defender I,H,A   Defending troops (default: 500,0,0)");
    eprintln!("  --from REGION      Attacking region (default: e4)");
    eprintln!("  --to REGION        Defending region (default: e5)");
    eprintln!("  --battles N        Number of battles (default: 100)");
    eprintln!("  --threads N        Number of parallel threads (default: 4)");
    eprintln!("  --seed N           Random seed, 0 for entropy (default: 0)");
    eprintln!("  --width NAME       standard or expanded (default: standard)");
    eprintln!("  --no-craters       Disable crater accrual");
    eprintln!("  --output FILE      Output file path (default: stdout)");
    eprintln!("  --quiet            Suppress summary output");
    eprintln!("  --help             Show this help");
}
