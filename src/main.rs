//! Frontline text front end.
//!
//! Reads requests from stdin and writes protocol lines to stdout. Tracing
//! output goes to stderr so it never mixes with the protocol.

use std::io::{self, BufRead};

use frontline::config::GameConfig;
use frontline::protocol::{parse_command, Frontend};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let options = match std::env::args().nth(1) {
        Some(path) => GameConfig::load(&path).expect("failed to load config"),
        None => GameConfig::default(),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut frontend = Frontend::new(options);

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let request = match parse_command(&line) {
            Some(r) => r,
            None => continue,
        };

        match frontend.handle(request, &mut out) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                tracing::error!(error = %e, "failed to write response");
                break;
            }
        }
    }
}
