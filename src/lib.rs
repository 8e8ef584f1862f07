//! Frontline: a two-faction territorial wargame core.
//!
//! Exposes the board model, battle resolution, the turn engine, and the text
//! protocol for use by integration tests and the binary entry points.

pub mod battle;
pub mod board;
pub mod command;
pub mod config;
pub mod engine;
pub mod movegen;
pub mod presentation;
pub mod protocol;
pub mod simulate;
pub mod turn;
