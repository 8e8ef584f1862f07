//! Property tests for the health model, damage distribution, and battle loop.

use frontline::battle::{Battle, BattleOutcome, BattleResult, BattleRules};
use frontline::board::unit::count_for_health;
use frontline::board::{Board, Force, RegionId, Side, TroopCounts, TroopType, Unit, ALL_TROOP_TYPES};
use frontline::presentation::NullPresentation;
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn troop_type() -> impl Strategy<Value = TroopType> {
    prop_oneof![
        Just(TroopType::Infantry),
        Just(TroopType::Helicopter),
        Just(TroopType::Armor),
    ]
}

fn counts(max_inf: u32, max_heli: u32, max_armor: u32) -> impl Strategy<Value = TroopCounts> {
    (0..=max_inf, 0..=max_heli, 0..=max_armor).prop_map(|(i, h, a)| TroopCounts::new(i, h, a))
}

proptest! {
    #[test]
    fn count_brackets_health(t in troop_type(), health in 0.0f64..1e7) {
        let hp = t.hp_per_unit();
        let c = count_for_health(t, health);
        if c == 0 {
            prop_assert!(health <= hp * 1e-6);
        } else {
            prop_assert!(f64::from(c) * hp >= health - 1e-6);
            prop_assert!(f64::from(c - 1) * hp < health);
        }
    }

    #[test]
    fn fresh_unit_count_matches(t in troop_type(), n in 0u32..200_000) {
        let unit = Unit::new(t, Side::Blufor, RegionId::new(0), n);
        prop_assert_eq!(unit.count(), n);
    }

    #[test]
    fn whole_troop_changes_are_exact(t in troop_type(), n in 0u32..10_000, delta in -20_000i64..20_000) {
        let mut unit = Unit::new(t, Side::Opfor, RegionId::new(3), n);
        unit.alter_units(delta);
        let expected = (i64::from(n) + delta).max(0) as u32;
        prop_assert_eq!(unit.count(), expected);
        prop_assert!(unit.health() >= 0.0);
    }

    #[test]
    fn damage_never_exceeds_what_was_dealt(
        start in counts(5_000, 50, 80),
        damage in 0.0f64..200_000.0,
        seed in any::<u64>(),
    ) {
        let mut force = Force::new(RegionId::new(44), Side::Blufor, false, start);
        let mut rng = SmallRng::seed_from_u64(seed);
        let before = force.total_health();
        force.distribute_damage(damage, &mut rng, &mut NullPresentation);
        let lost = before - force.total_health();

        prop_assert!(lost >= -1e-9);
        prop_assert!(lost <= damage + 1e-6);
        for t in ALL_TROOP_TYPES {
            prop_assert!(force.count(t) <= start[t]);
        }
        if force.is_empty() {
            prop_assert_eq!(force.side(), Side::Neutral);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn battles_always_resolve(
        attacker in counts(800, 10, 20),
        defender in counts(800, 10, 20),
        seed in any::<u64>(),
    ) {
        prop_assume!(attacker.total() > 0 && defender.total() > 0);
        let (from, to): (RegionId, RegionId) = ("e4".parse().unwrap(), "e5".parse().unwrap());
        let mut board = Board::standard(true);
        board.place(from, Side::Blufor, attacker);
        board.place(to, Side::Opfor, defender);
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut battle = Battle::new(1, &board, from, to, BattleRules::default(), &mut rng).unwrap();
        battle.start(&mut rng).unwrap();

        let mut report = None;
        for _ in 0..5_000 {
            if let BattleOutcome::Resolved(r) = battle
                .advance_one_tick(&mut board, &mut rng, &mut NullPresentation)
                .unwrap()
            {
                report = Some(r);
                break;
            }
        }
        let report = report.expect("battle did not resolve");

        match report.result {
            BattleResult::AttackerCaptured => {
                prop_assert_eq!(board.side_of(to), Side::Blufor);
                prop_assert!(board.force(from).unwrap().is_empty());
            }
            BattleResult::DefenderHeld => prop_assert_eq!(board.side_of(to), Side::Opfor),
            BattleResult::Merged => prop_assert!(false, "no merge without a side change"),
        }
        for t in ALL_TROOP_TYPES {
            prop_assert!(report.attacker_after[t] <= attacker[t]);
            prop_assert!(report.defender_after[t] <= defender[t]);
        }
    }
}
