//! Region identifiers and the static theater graph.
//!
//! The standard theater has 100 regions named `a0`..`j9`: ten zones (`a`..`j`)
//! of ten regions each. A `RegionId` packs zone and slot into one byte so it
//! can index per-region arrays directly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::adjacency::{neighbor_lists, REGION_LINKS};
use super::setup::{capital_reinforcement, REGION_TERRAIN};
use super::terrain::TerrainMix;
use super::unit::TroopCounts;

/// Regions in the standard theater.
pub const REGION_COUNT: usize = 100;

const ZONES: usize = 10;
const SLOTS_PER_ZONE: usize = 10;

/// A region, identified by its index `zone * 10 + slot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(u8);

impl RegionId {
    /// Wraps a raw index. Indices at or above `REGION_COUNT` never parse
    /// back from text but are otherwise usable in custom theaters.
    pub const fn new(index: u8) -> Self {
        RegionId(index)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Zone letter, `'a'` to `'j'`.
    pub const fn zone(self) -> char {
        (b'a' + self.0 / SLOTS_PER_ZONE as u8) as char
    }

    pub const fn slot(self) -> u8 {
        self.0 % SLOTS_PER_ZONE as u8
    }

    /// Every standard region in index order.
    pub fn all() -> impl Iterator<Item = RegionId> {
        (0..REGION_COUNT as u8).map(RegionId)
    }
}

/// Compile-time region literal for static tables. Panics during constant
/// evaluation on a malformed name.
pub(crate) const fn r(name: &str) -> RegionId {
    let b = name.as_bytes();
    assert!(b.len() == 2);
    assert!(b[0] >= b'a' && b[0] < b'a' + ZONES as u8);
    assert!(b[1] >= b'0' && b[1] <= b'9');
    RegionId((b[0] - b'a') * SLOTS_PER_ZONE as u8 + (b[1] - b'0'))
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.zone(), self.slot())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegionParseError {
    #[error("region name must be a zone letter and a digit, got '{0}'")]
    Malformed(String),
    #[error("unknown zone '{0}'")]
    UnknownZone(char),
}

impl FromStr for RegionId {
    type Err = RegionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (zone, slot) = match (chars.next(), chars.next(), chars.next()) {
            (Some(z), Some(d), None) => (z.to_ascii_lowercase(), d),
            _ => return Err(RegionParseError::Malformed(s.to_string())),
        };
        if !zone.is_ascii_lowercase() {
            return Err(RegionParseError::Malformed(s.to_string()));
        }
        let zone_idx = zone as u8 - b'a';
        if zone_idx as usize >= ZONES {
            return Err(RegionParseError::UnknownZone(zone));
        }
        let slot = slot
            .to_digit(10)
            .ok_or_else(|| RegionParseError::Malformed(s.to_string()))?;
        Ok(RegionId(zone_idx * SLOTS_PER_ZONE as u8 + slot as u8))
    }
}

impl Serialize for RegionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RegionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Static description of one region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionInfo {
    pub id: RegionId,
    pub neighbors: Vec<RegionId>,
    pub terrain: TerrainMix,
    /// Troops granted each turn to the controller. `Some` marks a capital.
    pub reinforcement: Option<TroopCounts>,
}

impl RegionInfo {
    pub fn is_capital(&self) -> bool {
        self.reinforcement.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TheaterError {
    #[error("region at position {position} has id {id}")]
    OutOfOrder { position: usize, id: RegionId },
    #[error("region {region} links to unknown region {neighbor}")]
    DanglingLink { region: RegionId, neighbor: RegionId },
}

/// The region graph: adjacency, base terrain, and capitals.
#[derive(Debug, Clone, PartialEq)]
pub struct Theater {
    regions: Vec<RegionInfo>,
}

impl Theater {
    /// The standard 100-region theater. With `symmetrize`, every link is
    /// made bidirectional.
    pub fn standard(symmetrize: bool) -> Theater {
        let neighbors = neighbor_lists(&REGION_LINKS, symmetrize);
        let regions = RegionId::all()
            .zip(neighbors)
            .map(|(id, neighbors)| RegionInfo {
                id,
                neighbors,
                terrain: REGION_TERRAIN[id.index()],
                reinforcement: capital_reinforcement(id),
            })
            .collect();
        Theater { regions }
    }

    /// Builds a custom theater. Regions must be listed in id order starting
    /// at zero, and every link must point inside the theater.
    pub fn from_regions(regions: Vec<RegionInfo>) -> Result<Theater, TheaterError> {
        for (position, info) in regions.iter().enumerate() {
            if info.id.index() != position {
                return Err(TheaterError::OutOfOrder {
                    position,
                    id: info.id,
                });
            }
            if let Some(&neighbor) = info.neighbors.iter().find(|n| n.index() >= regions.len()) {
                return Err(TheaterError::DanglingLink {
                    region: info.id,
                    neighbor,
                });
            }
        }
        Ok(Theater { regions })
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn contains(&self, id: RegionId) -> bool {
        id.index() < self.regions.len()
    }

    pub fn region(&self, id: RegionId) -> Option<&RegionInfo> {
        self.regions.get(id.index())
    }

    pub fn regions(&self) -> &[RegionInfo] {
        &self.regions
    }

    pub fn ids(&self) -> impl Iterator<Item = RegionId> + '_ {
        self.regions.iter().map(|r| r.id)
    }

    pub fn neighbors(&self, id: RegionId) -> &[RegionId] {
        self.region(id).map_or(&[][..], |r| r.neighbors.as_slice())
    }

    pub fn is_adjacent(&self, from: RegionId, to: RegionId) -> bool {
        self.neighbors(from).contains(&to)
    }

    pub fn is_capital(&self, id: RegionId) -> bool {
        self.region(id).is_some_and(RegionInfo::is_capital)
    }

    pub fn reinforcement(&self, id: RegionId) -> Option<TroopCounts> {
        self.region(id).and_then(|r| r.reinforcement)
    }

    /// Capitals in id order.
    pub fn capitals(&self) -> impl Iterator<Item = RegionId> + '_ {
        self.regions.iter().filter(|r| r.is_capital()).map(|r| r.id)
    }

    pub fn terrain(&self, id: RegionId) -> TerrainMix {
        self.region(id).map(|r| r.terrain).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display_roundtrip() {
        for id in RegionId::all() {
            let s = id.to_string();
            assert_eq!(s.parse::<RegionId>(), Ok(id));
        }
        assert_eq!("a6".parse::<RegionId>().map(RegionId::index), Ok(6));
        assert_eq!("J9".parse::<RegionId>().map(RegionId::index), Ok(99));
    }

    #[test]
    fn parse_rejects_bad_names() {
        assert!(matches!("k1".parse::<RegionId>(), Err(RegionParseError::UnknownZone('k'))));
        assert!(matches!("a".parse::<RegionId>(), Err(RegionParseError::Malformed(_))));
        assert!(matches!("a10".parse::<RegionId>(), Err(RegionParseError::Malformed(_))));
        assert!(matches!("ax".parse::<RegionId>(), Err(RegionParseError::Malformed(_))));
        assert!(matches!("1a".parse::<RegionId>(), Err(RegionParseError::Malformed(_))));
    }

    #[test]
    fn const_literal_matches_parse() {
        assert_eq!(r("e3"), "e3".parse().unwrap());
        assert_eq!(r("j9").index(), 99);
    }

    #[test]
    fn standard_theater_has_ten_capitals() {
        let t = Theater::standard(true);
        assert_eq!(t.len(), REGION_COUNT);
        let caps: Vec<String> = t.capitals().map(|c| c.to_string()).collect();
        assert_eq!(
            caps,
            ["a6", "b5", "c4", "d2", "e3", "f4", "g4", "h1", "i5", "j2"]
        );
        assert_eq!(t.reinforcement(r("d2")), Some(TroopCounts::new(40, 2, 1)));
        assert!(!t.is_capital(r("a0")));
    }

    #[test]
    fn symmetrized_theater_is_symmetric() {
        let t = Theater::standard(true);
        for id in t.ids() {
            for &n in t.neighbors(id) {
                assert!(t.is_adjacent(n, id), "{n} does not link back to {id}");
            }
        }
    }

    #[test]
    fn raw_theater_keeps_known_asymmetry() {
        let t = Theater::standard(false);
        assert!(t.is_adjacent(r("a3"), r("a5")));
        assert!(!t.is_adjacent(r("a5"), r("a3")));
        assert_eq!(t.neighbors(r("j4")), &[r("j3")]);
    }

    #[test]
    fn serde_uses_region_names() {
        let json = serde_json::to_string(&r("c4")).unwrap();
        assert_eq!(json, "\"c4\"");
        let back: RegionId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r("c4"));
    }

    #[test]
    fn from_regions_validates_order_and_links() {
        let ok = Theater::from_regions(vec![
            RegionInfo {
                id: RegionId::new(0),
                neighbors: vec![RegionId::new(1)],
                terrain: TerrainMix::default(),
                reinforcement: None,
            },
            RegionInfo {
                id: RegionId::new(1),
                neighbors: vec![RegionId::new(0)],
                terrain: TerrainMix::default(),
                reinforcement: None,
            },
        ]);
        assert!(ok.is_ok());

        let dangling = Theater::from_regions(vec![RegionInfo {
            id: RegionId::new(0),
            neighbors: vec![RegionId::new(5)],
            terrain: TerrainMix::default(),
            reinforcement: None,
        }]);
        assert!(matches!(dangling, Err(TheaterError::DanglingLink { .. })));

        let unordered = Theater::from_regions(vec![RegionInfo {
            id: RegionId::new(3),
            neighbors: vec![],
            terrain: TerrainMix::default(),
            reinforcement: None,
        }]);
        assert!(matches!(unordered, Err(TheaterError::OutOfOrder { .. })));
    }
}
