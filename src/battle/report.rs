//! Post-battle loss accounting.

use std::fmt;

use serde::Serialize;

use crate::board::{RegionId, Side, TroopCounts, TroopDelta, ALL_TROOP_TYPES};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleResult {
    /// The attacker was wiped out; the region stays with the defender.
    DefenderHeld,
    /// The defender was wiped out; the attacker moved into the region.
    AttackerCaptured,
    /// Both regions ended up on the same side before the fight resolved.
    Merged,
}

/// Summary of a finished battle. Counts are taken after casualty restoration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattleReport {
    pub number: u32,
    pub attacker: RegionId,
    pub defender: RegionId,
    pub attacker_side: Side,
    pub defender_side: Side,
    pub result: BattleResult,
    pub attacker_before: TroopCounts,
    pub attacker_after: TroopCounts,
    pub defender_before: TroopCounts,
    /// Surviving defenders: in the region if it held, in the fallback if routed.
    pub defender_after: TroopCounts,
    /// Where routed defenders went, if anywhere.
    pub routed_to: Option<RegionId>,
    pub ticks: u32,
}

impl BattleReport {
    pub fn winner(&self) -> Side {
        match self.result {
            BattleResult::DefenderHeld => self.defender_side,
            BattleResult::AttackerCaptured | BattleResult::Merged => self.attacker_side,
        }
    }

    /// Signed change per type, `after - before`.
    pub fn attacker_losses(&self) -> TroopDelta {
        delta(&self.attacker_before, &self.attacker_after)
    }

    pub fn defender_losses(&self) -> TroopDelta {
        delta(&self.defender_before, &self.defender_after)
    }

    /// One-line headline used in the game log.
    pub fn headline(&self) -> String {
        let verb = match self.result {
            BattleResult::DefenderHeld => "maintains",
            BattleResult::AttackerCaptured => "takes",
            BattleResult::Merged => "consolidates",
        };
        format!(
            "{} {} control of {}.",
            self.winner().display_name(),
            verb,
            self.defender
        )
    }
}

fn delta(before: &TroopCounts, after: &TroopCounts) -> TroopDelta {
    after.as_delta().map(|t, &a| a - i64::from(before[t]))
}

impl fmt::Display for BattleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.headline())?;
        writeln!(f, "LOSSES:")?;
        writeln!(f, "-------")?;
        for (title, losses) in [
            ("ATTACKER", self.attacker_losses()),
            ("DEFENDER", self.defender_losses()),
        ] {
            writeln!(f, "             {title}")?;
            for t in ALL_TROOP_TYPES {
                let label = format!("{}:", t.name().to_uppercase());
                writeln!(f, "{label:<13}{}", losses[t])?;
            }
        }
        if let Some(fb) = self.routed_to {
            write!(
                f,
                "{} SURVIVING DEFENDERS ROUTED TO {}",
                self.defender_after.total(),
                fb.to_string().to_uppercase()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(result: BattleResult) -> BattleReport {
        BattleReport {
            number: 1,
            attacker: RegionId::new(40),
            defender: RegionId::new(41),
            attacker_side: Side::Blufor,
            defender_side: Side::Opfor,
            result,
            attacker_before: TroopCounts::new(100, 2, 4),
            attacker_after: TroopCounts::new(60, 2, 1),
            defender_before: TroopCounts::new(50, 0, 2),
            defender_after: TroopCounts::new(10, 0, 0),
            routed_to: Some(RegionId::new(43)),
            ticks: 9,
        }
    }

    #[test]
    fn losses_are_signed() {
        let r = report(BattleResult::AttackerCaptured);
        assert_eq!(r.attacker_losses(), TroopDelta::new(-40, 0, -3));
        assert_eq!(r.defender_losses(), TroopDelta::new(-40, 0, -2));
    }

    #[test]
    fn winner_follows_result() {
        assert_eq!(report(BattleResult::AttackerCaptured).winner(), Side::Blufor);
        assert_eq!(report(BattleResult::DefenderHeld).winner(), Side::Opfor);
    }

    #[test]
    fn display_has_loss_table_and_rout_note() {
        let text = report(BattleResult::AttackerCaptured).to_string();
        assert!(text.starts_with("NATO takes control of e1."));
        assert!(text.contains("INFANTRY:    -40"));
        assert!(text.contains("ARMOR:       -3"));
        assert!(text.ends_with("10 SURVIVING DEFENDERS ROUTED TO E3"));
    }
}
