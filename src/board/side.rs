//! Faction identity.
//!
//! Every force and region belongs to Blufor, Opfor, or nobody. The protocol
//! abbreviations (`bf`, `of`, `neutral`) are kept for the text interface.

use serde::{Deserialize, Serialize};

/// Owner of a force or region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Blufor,
    Opfor,
    Neutral,
}

/// The two playable sides in turn order.
pub const PLAYABLE_SIDES: [Side; 2] = [Side::Blufor, Side::Opfor];

impl Side {
    /// Returns the protocol abbreviation.
    pub const fn abbr(self) -> &'static str {
        match self {
            Side::Blufor => "bf",
            Side::Opfor => "of",
            Side::Neutral => "neutral",
        }
    }

    /// Parses a side from its protocol abbreviation.
    pub fn from_abbr(s: &str) -> Option<Side> {
        match s {
            "bf" => Some(Side::Blufor),
            "of" => Some(Side::Opfor),
            "neutral" => Some(Side::Neutral),
            _ => None,
        }
    }

    /// Returns the player-facing faction name.
    pub const fn display_name(self) -> &'static str {
        match self {
            Side::Blufor => "NATO",
            Side::Opfor => "PACT",
            Side::Neutral => "NEUTRAL",
        }
    }

    /// Returns the opposing playable side. Neutral has no opponent.
    pub const fn opponent(self) -> Side {
        match self {
            Side::Blufor => Side::Opfor,
            Side::Opfor => Side::Blufor,
            Side::Neutral => Side::Neutral,
        }
    }

    pub const fn is_neutral(self) -> bool {
        matches!(self, Side::Neutral)
    }

    /// Index into per-player arrays. Neutral has none.
    pub const fn player_index(self) -> Option<usize> {
        match self {
            Side::Blufor => Some(0),
            Side::Opfor => Some(1),
            Side::Neutral => None,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.abbr())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abbr_roundtrip() {
        for s in [Side::Blufor, Side::Opfor, Side::Neutral] {
            assert_eq!(Side::from_abbr(s.abbr()), Some(s));
        }
        assert_eq!(Side::from_abbr("nato"), None);
    }

    #[test]
    fn opponents() {
        assert_eq!(Side::Blufor.opponent(), Side::Opfor);
        assert_eq!(Side::Opfor.opponent(), Side::Blufor);
        assert_eq!(Side::Neutral.opponent(), Side::Neutral);
    }

    #[test]
    fn player_index_excludes_neutral() {
        assert_eq!(Side::Blufor.player_index(), Some(0));
        assert_eq!(Side::Opfor.player_index(), Some(1));
        assert_eq!(Side::Neutral.player_index(), None);
    }
}
