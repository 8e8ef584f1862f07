//! Integration tests for the frontline binary.
//!
//! Spawns the process, sends protocol requests on stdin, and checks the
//! lines it writes to stdout.

use std::io::{BufRead, Write};
use std::process::{Command, Stdio};

/// Sends a sequence of requests and collects stdout lines.
fn run_frontline(commands: &[&str]) -> Vec<String> {
    let exe = env!("CARGO_BIN_EXE_frontline");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start frontline");

    let mut stdin = child.stdin.take().unwrap();
    let stdout = child.stdout.take().unwrap();
    let reader = std::io::BufReader::new(stdout);

    for cmd in commands {
        writeln!(stdin, "{}", cmd).unwrap();
    }
    stdin.flush().unwrap();
    drop(stdin);

    let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
    let status = child.wait().expect("failed to wait on child");
    assert!(status.success());
    lines
}

/// Options that make a session deterministic and fast.
const FAST: [&str; 3] = [
    "setoption name Seed value 1234",
    "setoption name TickInterval value 0",
    "setoption name AutoAllocate value true",
];

fn session(commands: &[&str]) -> Vec<String> {
    let mut all: Vec<&str> = FAST.to_vec();
    all.push("newgame");
    all.extend_from_slice(commands);
    all.push("quit");
    run_frontline(&all)
}

#[test]
fn isready_response() {
    let lines = run_frontline(&["isready", "quit"]);
    assert_eq!(lines, ["readyok"]);
}

#[test]
fn unknown_commands_are_ignored() {
    let lines = run_frontline(&["fire e3", "", "isready", "quit"]);
    assert_eq!(lines, ["readyok"]);
}

#[test]
fn quit_stops_reading() {
    let lines = run_frontline(&["quit", "isready"]);
    assert!(lines.is_empty());
}

#[test]
fn requests_before_newgame_are_errors() {
    let lines = run_frontline(&["status", "quit"]);
    assert_eq!(lines, ["error no game in progress"]);
}

#[test]
fn unknown_option_is_reported() {
    let lines = run_frontline(&["setoption name Threads value 4", "quit"]);
    assert_eq!(lines, ["error unknown option 'Threads'"]);
}

#[test]
fn newgame_opens_with_blufor_reinforcements() {
    let lines = session(&["status"]);
    assert!(lines.iter().any(|l| l == "reinforcements bf 140 6 2"));
    let status = lines.last().unwrap();
    assert!(status.starts_with("status turn 2 side bf state reinforcing"), "{status}");
}

#[test]
fn show_reports_opening_forces() {
    let lines = session(&["show a6", "show a0"]);
    let n = lines.len();
    assert_eq!(lines[n - 2], "force a6 bf 1200 2 20 capital true");
    assert_eq!(lines[n - 1], "force a0 neutral 0 0 0 capital false");
}

#[test]
fn moves_are_applied_at_turn_end() {
    let lines = session(&["reinforce a6", "move e4 d1", "endturn", "show d1", "show e4", "status"]);
    assert!(lines.iter().any(|l| l == "arrow bf e4 d1"));
    assert!(lines.iter().any(|l| l == "log move NATO moves from e4 to d1"));
    assert!(lines.iter().any(|l| l == "force d1 bf 350 0 14 capital false"));
    assert!(lines.iter().any(|l| l == "force e4 neutral 0 0 0 capital false"));
    assert!(lines.last().unwrap().starts_with("status turn 3 side of"));
}

#[test]
fn rejected_move_does_not_block_the_next_one() {
    let lines = session(&["reinforce a6", "move e4 j9", "move e4 d1", "status"]);
    let errors: Vec<&String> = lines.iter().filter(|l| l.starts_with("error ")).collect();
    assert_eq!(errors.len(), 1, "{errors:?}");
    assert_eq!(errors[0], "error j9 is not adjacent to e4");
    assert!(lines.iter().any(|l| l == "arrow bf e4 d1"));
    assert!(lines.last().unwrap().starts_with("status turn 2 side bf state initial"));
}

#[test]
fn selection_errors_are_reported() {
    let lines = session(&["select e4", "reinforce a6", "select e3", "move e4 j9"]);
    let errors: Vec<&String> = lines.iter().filter(|l| l.starts_with("error ")).collect();
    assert_eq!(errors.len(), 3, "{errors:?}");
    assert!(errors[0].contains("in state reinforcing"));
    assert!(errors[1].contains("not held by bf"));
    assert!(errors[2].contains("not adjacent"));
}

#[test]
fn attack_produces_battle_report() {
    let lines = session(&["reinforce a6", "move e4 e3", "endturn", "run", "status"]);
    assert!(lines.iter().any(|l| l == "log attack NATO attacks e3 from e4"));
    assert!(lines.iter().any(|l| l == "log battle LOSSES:"));
    assert!(lines.iter().any(|l| l.starts_with("battle 1 ")));
    assert!(lines.iter().any(|l| l.starts_with("ratio ")));
    assert!(lines.last().unwrap().starts_with("status turn 3 side of"));
}

#[test]
fn manual_allocation_over_the_protocol() {
    let lines = run_frontline(&[
        "setoption name Seed value 77",
        "setoption name TickInterval value 0",
        "newgame",
        "reinforce a6",
        "move e4 e3",
        "endturn",
        "run",
        "alloc begin armor",
        "alloc apply left 100",
        "alloc auto",
        "alloc commit",
        "run",
        "status",
        "quit",
    ]);
    assert!(lines.iter().any(|l| l.starts_with("prompt alloc 1 e4 e3 infantry 350 terrain ")));
    assert!(lines.iter().any(|l| l.starts_with("battle 1 ")));
    assert!(lines.last().unwrap().ends_with("battle none"));
}
