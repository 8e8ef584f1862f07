//! Text protocol parser.
//!
//! Turns one input line into a `Request` the front end can act on.

use crate::battle::FlankPosition;
use crate::board::{RegionId, TroopCounts, TroopType};

/// A parsed client-to-game request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Start a fresh game with the current options.
    NewGame,

    /// Synchronization ping; answered with `readyok`.
    IsReady,

    /// `setoption name <id> [value <x>]`, applied on the next `newgame`.
    SetOption { name: String, value: Option<String> },

    /// Select an origin region.
    Select(RegionId),

    /// Select an origin and a destination in one go.
    Move { origin: RegionId, destination: RegionId },

    Cancel,
    EndTurn,

    /// Deposit reinforcements; without counts the whole bundle.
    Reinforce { region: RegionId, counts: Option<TroopCounts> },

    /// Stop showing reinforcement notices to the side to move.
    Dismiss,

    AllocBegin(TroopType),
    AllocApply { flank: FlankPosition, count: u32 },
    AllocCancel,
    AllocAuto,
    AllocCommit,

    /// Tick battles until none is fighting.
    Run,

    /// Print one region's force.
    Show(RegionId),

    Status,
    Quit,
}

/// Parses a single line of input into a `Request`.
///
/// Returns `None` for empty lines, unknown commands, and malformed
/// arguments; the latter two are reported through `tracing`.
pub fn parse_command(line: &str) -> Option<Request> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (&head, args) = tokens.split_first()?;

    match head {
        "newgame" => Some(Request::NewGame),
        "isready" => Some(Request::IsReady),
        "cancel" => Some(Request::Cancel),
        "endturn" => Some(Request::EndTurn),
        "dismiss" => Some(Request::Dismiss),
        "run" => Some(Request::Run),
        "status" => Some(Request::Status),
        "quit" => Some(Request::Quit),

        "setoption" => parse_setoption(args),
        "select" => parse_region(args, "select").map(Request::Select),
        "show" => parse_region(args, "show").map(Request::Show),
        "move" => parse_move(args),
        "reinforce" => parse_reinforce(args),
        "alloc" => parse_alloc(args),

        other => {
            tracing::warn!(command = other, "unknown command");
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(args: &[&str]) -> Option<Request> {
    if args.len() < 2 || args[0] != "name" {
        tracing::warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }
    let rest = &args[1..];
    let (name_parts, value_parts) = match rest.iter().position(|&t| t == "value") {
        Some(vi) => (&rest[..vi], &rest[vi + 1..]),
        None => (rest, &rest[rest.len()..]),
    };
    if name_parts.is_empty() {
        tracing::warn!("malformed setoption: empty name");
        return None;
    }
    let value = (!value_parts.is_empty()).then(|| value_parts.join(" "));
    Some(Request::SetOption {
        name: name_parts.join(" "),
        value,
    })
}

fn region(token: &str) -> Option<RegionId> {
    match token.parse() {
        Ok(id) => Some(id),
        Err(e) => {
            tracing::warn!(token, error = %e, "bad region");
            None
        }
    }
}

fn parse_region(args: &[&str], command: &str) -> Option<RegionId> {
    match args {
        [token] => region(token),
        _ => {
            tracing::warn!("malformed {command}: expected '{command} <region>'");
            None
        }
    }
}

/// Parses `move <origin> <destination>`.
fn parse_move(args: &[&str]) -> Option<Request> {
    match args {
        [o, d] => Some(Request::Move {
            origin: region(o)?,
            destination: region(d)?,
        }),
        _ => {
            tracing::warn!("malformed move: expected 'move <origin> <destination>'");
            None
        }
    }
}

/// Parses `reinforce <region> [<infantry> <helicopter> <armor>]`.
fn parse_reinforce(args: &[&str]) -> Option<Request> {
    match args {
        [r] => Some(Request::Reinforce {
            region: region(r)?,
            counts: None,
        }),
        [r, i, h, a] => {
            let counts = match (i.parse(), h.parse(), a.parse()) {
                (Ok(i), Ok(h), Ok(a)) => TroopCounts::new(i, h, a),
                _ => {
                    tracing::warn!("malformed reinforce: counts must be non-negative integers");
                    return None;
                }
            };
            Some(Request::Reinforce {
                region: region(r)?,
                counts: Some(counts),
            })
        }
        _ => {
            tracing::warn!("malformed reinforce: expected 'reinforce <region> [<inf> <heli> <armor>]'");
            None
        }
    }
}

/// Parses the `alloc` sub-commands.
fn parse_alloc(args: &[&str]) -> Option<Request> {
    match args {
        ["begin", troop] => match TroopType::from_name(troop) {
            Some(t) => Some(Request::AllocBegin(t)),
            None => {
                tracing::warn!(troop, "unknown troop type");
                None
            }
        },
        ["apply", flank, count] => {
            let Some(flank) = FlankPosition::from_name(flank) else {
                tracing::warn!(flank, "unknown flank");
                return None;
            };
            match count.parse() {
                Ok(count) => Some(Request::AllocApply { flank, count }),
                Err(_) => {
                    tracing::warn!(count, "invalid allocation count");
                    None
                }
            }
        }
        ["cancel"] => Some(Request::AllocCancel),
        ["auto"] => Some(Request::AllocAuto),
        ["commit"] => Some(Request::AllocCommit),
        _ => {
            tracing::warn!("malformed alloc: expected begin|apply|cancel|auto|commit");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::region::r;

    #[test]
    fn parse_bare_commands() {
        assert_eq!(parse_command("newgame"), Some(Request::NewGame));
        assert_eq!(parse_command("isready"), Some(Request::IsReady));
        assert_eq!(parse_command("endturn"), Some(Request::EndTurn));
        assert_eq!(parse_command("  run  "), Some(Request::Run));
        assert_eq!(parse_command("quit"), Some(Request::Quit));
    }

    #[test]
    fn parse_empty_line_returns_none() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("  "), None);
        assert_eq!(parse_command("\t"), None);
    }

    #[test]
    fn parse_unknown_command_returns_none() {
        assert_eq!(parse_command("attack e3"), None);
    }

    #[test]
    fn parse_setoption_with_value() {
        assert_eq!(
            parse_command("setoption name CombatWidth value expanded"),
            Some(Request::SetOption {
                name: "CombatWidth".to_string(),
                value: Some("expanded".to_string()),
            })
        );
    }

    #[test]
    fn parse_setoption_without_value() {
        assert_eq!(
            parse_command("setoption name AutoAllocate"),
            Some(Request::SetOption {
                name: "AutoAllocate".to_string(),
                value: None,
            })
        );
        assert_eq!(parse_command("setoption Seed 4"), None);
    }

    #[test]
    fn parse_regions() {
        assert_eq!(parse_command("select E4"), Some(Request::Select(r("e4"))));
        assert_eq!(parse_command("show a6"), Some(Request::Show(r("a6"))));
        assert_eq!(parse_command("select z4"), None);
        assert_eq!(parse_command("select"), None);
        assert_eq!(
            parse_command("move e4 e3"),
            Some(Request::Move {
                origin: r("e4"),
                destination: r("e3"),
            })
        );
        assert_eq!(parse_command("move e4"), None);
    }

    #[test]
    fn parse_reinforce_forms() {
        assert_eq!(
            parse_command("reinforce a6"),
            Some(Request::Reinforce {
                region: r("a6"),
                counts: None,
            })
        );
        assert_eq!(
            parse_command("reinforce a6 40 0 1"),
            Some(Request::Reinforce {
                region: r("a6"),
                counts: Some(TroopCounts::new(40, 0, 1)),
            })
        );
        assert_eq!(parse_command("reinforce a6 -1 0 0"), None);
        assert_eq!(parse_command("reinforce a6 1 2"), None);
    }

    #[test]
    fn parse_alloc_forms() {
        assert_eq!(parse_command("alloc begin armor"), Some(Request::AllocBegin(TroopType::Armor)));
        assert_eq!(parse_command("alloc begin inf"), Some(Request::AllocBegin(TroopType::Infantry)));
        assert_eq!(
            parse_command("alloc apply left 120"),
            Some(Request::AllocApply {
                flank: FlankPosition::Left,
                count: 120,
            })
        );
        assert_eq!(parse_command("alloc commit"), Some(Request::AllocCommit));
        assert_eq!(parse_command("alloc apply rear 1"), None);
        assert_eq!(parse_command("alloc begin tanks"), None);
        assert_eq!(parse_command("alloc"), None);
    }
}
