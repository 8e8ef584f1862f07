//! Region link table for the standard theater.
//!
//! The table is recorded as authored: a few entries are one-directional and
//! `j4` lists `j3` twice. `neighbor_lists` de-duplicates every list and can
//! add the missing reverse edges.

use super::region::{r, RegionId, REGION_COUNT};

/// Outgoing links per region, indexed by `RegionId::index`.
pub static REGION_LINKS: [&[RegionId]; REGION_COUNT] = [
    &[r("a1"), r("a3")], // a0
    &[r("a0"), r("a2"), r("a9")], // a1
    &[r("a1"), r("a3"), r("a6"), r("a9")], // a2
    &[r("a0"), r("a2"), r("a4"), r("a5"), r("a6")], // a3
    &[r("a3"), r("a5")], // a4
    &[r("a4"), r("a6"), r("a7")], // a5
    &[r("a2"), r("a5"), r("a7"), r("a8"), r("a9")], // a6
    &[r("j0"), r("j1"), r("a8"), r("a6"), r("a5")], // a7
    &[r("a6"), r("a7"), r("a9"), r("e0")], // a8
    &[r("a1"), r("a2"), r("a6"), r("a8"), r("b0")], // a9
    &[r("a9"), r("e0"), r("d1"), r("b2"), r("b1")], // b0
    &[r("b0"), r("b2"), r("b3")], // b1
    &[r("b0"), r("b1"), r("b3"), r("b5"), r("c1"), r("d0"), r("d1")], // b2
    &[r("b1"), r("b2"), r("b5"), r("b4")], // b3
    &[r("b3"), r("b5"), r("b8"), r("b9")], // b4
    &[r("b2"), r("b3"), r("b4"), r("b8"), r("b6"), r("c1")], // b5
    &[r("b5"), r("b7"), r("b8"), r("c1"), r("c0")], // b6
    &[r("b6"), r("b8")], // b7
    &[r("b4"), r("b5"), r("b6"), r("b7"), r("b9")], // b8
    &[r("b4"), r("b8")], // b9
    &[r("b6"), r("b7"), r("c1"), r("c2")], // c0
    &[r("b2"), r("b5"), r("b6"), r("c0"), r("c2"), r("c9")], // c1
    &[r("c0"), r("c1"), r("c4"), r("c3")], // c2
    &[r("c2"), r("c4"), r("c5")], // c3
    &[r("c2"), r("c3"), r("c5"), r("c6"), r("c7"), r("c8"), r("c9")], // c4
    &[r("c3"), r("c4"), r("c6")], // c5
    &[r("c4"), r("c5"), r("c7")], // c6
    &[r("d6"), r("c8"), r("c4"), r("c6")], // c7
    &[r("d0"), r("d5"), r("c7"), r("c4"), r("c9")], // c8
    &[r("b2"), r("d0"), r("c8"), r("c4"), r("c1")], // c9
    &[r("c9"), r("c8"), r("d5"), r("d2"), r("d1"), r("b2")], // d0
    &[r("b0"), r("b2"), r("d0"), r("d5"), r("d2"), r("e0"), r("e4")], // d1
    &[r("d0"), r("d1"), r("d3"), r("d4"), r("d5"), r("e4")], // d2
    &[r("d2"), r("d4"), r("e5"), r("e8")], // d3
    &[r("d2"), r("d3"), r("e9"), r("d8"), r("d6"), r("d5")], // d4
    &[r("d0"), r("d2"), r("d4"), r("d6"), r("c8")], // d5
    &[r("d4"), r("d5"), r("d7"), r("d8"), r("c7")], // d6
    &[r("d6"), r("d8"), r("d9"), r("f2"), r("f3")], // d7
    &[r("d4"), r("d6"), r("d7"), r("d9"), r("e9")], // d8
    &[r("d7"), r("d8"), r("e9"), r("f2")], // d9
    &[r("e1"), r("e4"), r("d1"), r("b0"), r("a8")], // e0
    &[r("a8"), r("e0"), r("e2"), r("e3"), r("j0"), r("j7")], // e1
    &[r("e1"), r("e3"), r("e6"), r("j8"), r("i0"), r("i1")], // e2
    &[r("e1"), r("e2"), r("e4"), r("e5")], // e3
    &[r("e0"), r("e3"), r("e5"), r("d2"), r("d1")], // e4
    &[r("d3"), r("e3"), r("e4"), r("e6"), r("e8")], // e5
    &[r("e2"), r("e5"), r("e7"), r("i2"), r("g0"), r("g1")], // e6
    &[r("e6"), r("e8"), r("e9"), r("f0"), r("f1"), r("g1")], // e7
    &[r("d3"), r("e5"), r("e7"), r("e9")], // e8
    &[r("e7"), r("e8"), r("f1"), r("f2"), r("d9"), r("d8"), r("d4")], // e9
    &[r("e7"), r("g1"), r("g3"), r("f1"), r("f5"), r("f6")], // f0
    &[r("f0"), r("f2"), r("f5"), r("e7"), r("e9")], // f1
    &[r("e9"), r("f1"), r("f3"), r("d7"), r("d9")], // f2
    &[r("d7"), r("f2"), r("f4")], // f3
    &[r("f3"), r("f5"), r("f7"), r("f9")], // f4
    &[r("f0"), r("f1"), r("f3"), r("f4"), r("f6"), r("f7")], // f5
    &[r("f0"), r("f5"), r("f7"), r("f8"), r("g4"), r("g3")], // f6
    &[r("f4"), r("f5"), r("f6"), r("f8"), r("f9")], // f7
    &[r("g4"), r("f6"), r("f7"), r("f9")], // f8
    &[r("f4"), r("f7"), r("f8")], // f9
    &[r("e6"), r("i2"), r("h0"), r("g1"), r("g2")], // g0
    &[r("e6"), r("e7"), r("f0"), r("g0"), r("g2"), r("g3")], // g1
    &[r("h0"), r("g0"), r("g1"), r("g3"), r("g5"), r("g6")], // g2
    &[r("g1"), r("g2"), r("g5"), r("g4"), r("f6"), r("f0")], // g3
    &[r("g3"), r("g5"), r("g9"), r("f6"), r("f8")], // g4
    &[r("g3"), r("g2"), r("g4"), r("g6"), r("g7"), r("g9")], // g5
    &[r("h0"), r("h2"), r("g2"), r("g5"), r("g7")], // g6
    &[r("h2"), r("h6"), r("h7"), r("g5"), r("g6"), r("g8"), r("g9")], // g7
    &[r("h7"), r("h8"), r("g7"), r("g9")], // g8
    &[r("g4"), r("g5"), r("g7"), r("g8")], // g9
    &[r("g0"), r("g2"), r("g6"), r("h1"), r("h2"), r("i2")], // h0
    &[r("i2"), r("i6"), r("h4"), r("h3"), r("h2"), r("h0")], // h1
    &[r("h0"), r("h1"), r("h3"), r("h6"), r("g6"), r("g7")], // h2
    &[r("h1"), r("h2"), r("h4"), r("h5"), r("h6")], // h3
    &[r("i6"), r("h1"), r("h3"), r("h5")], // h4
    &[r("h4"), r("h3"), r("h6"), r("h9")], // h5
    &[r("h2"), r("h3"), r("h5"), r("h7"), r("h9"), r("g7")], // h6
    &[r("g7"), r("h8"), r("h6"), r("h9"), r("h8")], // h7
    &[r("g8"), r("h7"), r("h9")], // h8
    &[r("h5"), r("h6"), r("h7"), r("h8")], // h9
    &[r("e2"), r("j8"), r("i1"), r("i3"), r("i4")], // i0
    &[r("e2"), r("i0"), r("i2"), r("i3")], // i1
    &[r("e6"), r("g0"), r("h0"), r("h1"), r("i1"), r("i3"), r("i6")], // i2
    &[r("i0"), r("i1"), r("i2"), r("i4"), r("i5"), r("i6")], // i3
    &[r("j8"), r("i9"), r("i5"), r("i3"), r("i0")], // i4
    &[r("i3"), r("i4"), r("i9"), r("i8"), r("i7"), r("i6")], // i5
    &[r("i3"), r("i5"), r("i7"), r("i2"), r("h4"), r("h1")], // i6
    &[r("i5"), r("i6"), r("i8")], // i7
    &[r("j9"), r("i5"), r("i7"), r("i9")], // i8
    &[r("i8"), r("i5"), r("i4"), r("j9")], // i9
    &[r("a7"), r("e1"), r("j7"), r("j1")], // j0
    &[r("j0"), r("j2"), r("a7")], // j1
    &[r("j1"), r("j3"), r("j5"), r("j6"), r("j7")], // j2
    &[r("j2"), r("j5"), r("j4")], // j3
    &[r("j3"), r("j3")], // j4
    &[r("j4"), r("j3"), r("j2"), r("j6"), r("j9")], // j5
    &[r("j2"), r("j5"), r("j8"), r("j7")], // j6
    &[r("e2"), r("e1"), r("j0"), r("j2"), r("j6"), r("j8")], // j7
    &[r("e2"), r("i0"), r("i4"), r("j9"), r("j6"), r("j7")], // j8
    &[r("j5"), r("j8"), r("i9"), r("i8")], // j9
];

/// Builds per-region neighbour lists from a link table.
///
/// Duplicates and self-links are dropped and first-seen order is kept. With
/// `symmetrize`, a link `a -> b` also adds `b -> a` (appended after `b`'s own
/// links).
pub fn neighbor_lists(links: &[&[RegionId]], symmetrize: bool) -> Vec<Vec<RegionId>> {
    let mut lists: Vec<Vec<RegionId>> = vec![Vec::new(); links.len()];
    for (idx, outgoing) in links.iter().enumerate() {
        let from = RegionId::new(idx as u8);
        for &to in outgoing.iter() {
            push_unique(&mut lists[idx], from, to);
        }
    }
    if symmetrize {
        for (idx, outgoing) in links.iter().enumerate() {
            let from = RegionId::new(idx as u8);
            for &to in outgoing.iter() {
                if let Some(back) = lists.get_mut(to.index()) {
                    push_unique(back, to, from);
                }
            }
        }
    }
    lists
}

fn push_unique(list: &mut Vec<RegionId>, owner: RegionId, id: RegionId) {
    if id != owner && !list.contains(&id) {
        list.push(id);
    }
}

/// Links `a -> b` whose reverse `b -> a` is missing from the table.
pub fn one_way_links(links: &[&[RegionId]]) -> Vec<(RegionId, RegionId)> {
    let mut out = Vec::new();
    for (idx, outgoing) in links.iter().enumerate() {
        let from = RegionId::new(idx as u8);
        for &to in outgoing.iter() {
            let back = links.get(to.index()).is_some_and(|l| l.contains(&from));
            if !back && !out.contains(&(from, to)) {
                out.push((from, to));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_every_region() {
        assert_eq!(REGION_LINKS.len(), REGION_COUNT);
        for (idx, links) in REGION_LINKS.iter().enumerate() {
            assert!(!links.is_empty(), "region {idx} has no links");
            for l in links.iter() {
                assert!(l.index() < REGION_COUNT);
            }
        }
    }

    #[test]
    fn spot_check_links() {
        assert_eq!(REGION_LINKS[r("a0").index()], &[r("a1"), r("a3")]);
        assert!(REGION_LINKS[r("a7").index()].contains(&r("j0")));
        assert_eq!(REGION_LINKS[r("j9").index()], &[r("j5"), r("j8"), r("i9"), r("i8")]);
    }

    #[test]
    fn one_way_links_are_detected() {
        let one_way = one_way_links(&REGION_LINKS);
        assert!(one_way.contains(&(r("a3"), r("a5"))));
        assert!(one_way.contains(&(r("j5"), r("j4"))));
        assert!(!one_way.contains(&(r("a0"), r("a1"))));
    }

    #[test]
    fn dedup_without_symmetrize() {
        let lists = neighbor_lists(&REGION_LINKS, false);
        assert_eq!(lists[r("j4").index()], vec![r("j3")]);
        assert_eq!(lists[r("h7").index()], vec![r("g7"), r("h8"), r("h6"), r("h9")]);
    }

    #[test]
    fn symmetrize_adds_reverse_edges() {
        let lists = neighbor_lists(&REGION_LINKS, true);
        assert!(lists[r("a5").index()].contains(&r("a3")));
        assert!(lists[r("j4").index()].contains(&r("j5")));
        for (idx, l) in lists.iter().enumerate() {
            let from = RegionId::new(idx as u8);
            for to in l {
                assert!(lists[to.index()].contains(&from));
            }
        }
    }

    #[test]
    fn small_table() {
        let a = RegionId::new(0);
        let b = RegionId::new(1);
        let c = RegionId::new(2);
        let links: [&[RegionId]; 3] = [&[b, b, a], &[c], &[]];
        let raw = neighbor_lists(&links, false);
        assert_eq!(raw, vec![vec![b], vec![c], vec![]]);
        let sym = neighbor_lists(&links, true);
        assert_eq!(sym, vec![vec![b], vec![c, a], vec![b]]);
    }
}
