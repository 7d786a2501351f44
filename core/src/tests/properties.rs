use super::*;
use crate::allocation::apply_level_up;
use crate::reconciler::*;
use proptest::prelude::*;

fn stat_block() -> impl Strategy<Value = StatBlock> {
    (0i32..50, 0i32..50, 0i32..50, 0i32..50, 0i32..50)
        .prop_map(|(s, h, d, st, l)| StatBlock::new(s, h, d, st, l))
}

/// Non-negative allocations spending exactly `total` points
fn allocation_of(total: i32) -> impl Strategy<Value = StatBlock> {
    prop::collection::vec(0usize..5, total as usize).prop_map(|picks| {
        let mut block = StatBlock::default();
        for pick in picks {
            let stat = Stat::ALL[pick];
            block.set(stat, block.get(stat) + 1);
        }
        block
    })
}

fn creature_view() -> impl Strategy<Value = CreatureView> {
    ("[a-z]{1,8}", "[A-Z][a-z]{0,7}", 0i32..40, 1i32..40)
        .prop_map(|(id, name, hp, max_hp)| creature(&id, &name, hp, max_hp))
}

fn any_slot() -> impl Strategy<Value = Slot> {
    prop_oneof![Just(Slot::A), Just(Slot::B)]
}

proptest! {
    /// Property: remapping is a pure function of snapshot and slot
    #[test]
    fn prop_display_pair_is_stable(
        slot_a in creature_view(),
        slot_b in creature_view(),
        slot in any_slot(),
    ) {
        let snap = snapshot(slot_a.clone(), slot_b.clone());
        let pair = to_display_pair(&snap, slot);
        prop_assert_eq!(&pair, &to_display_pair(&snap, slot));

        let (a, b) = match slot {
            Slot::A => (pair.player, pair.opponent),
            Slot::B => (pair.opponent, pair.player),
        };
        prop_assert_eq!(a, slot_a);
        prop_assert_eq!(b, slot_b);
    }

    /// Property: the player's creature is always shown as the player
    #[test]
    fn prop_display_pair_shows_player(
        player_hp in 0i32..30,
        opponent_hp in 0i32..30,
        player_first in any::<bool>(),
    ) {
        let snap: MatchSnapshot = record("Bob", player_hp, "Rex", opponent_hp, player_first).into();
        let slot = resolve_player_slot(&snap, &profile("Bob"));
        let pair = to_display_pair(&snap, slot);
        prop_assert_eq!(&pair.player.name, "Bob");
        prop_assert_eq!(pair.player.hp, player_hp);
        prop_assert_eq!(&pair.opponent.name, "Rex");
        prop_assert_eq!(pair.opponent.hp, opponent_hp);
    }

    /// Property: resolving twice on the same snapshot is stable
    #[test]
    fn prop_slot_resolution_is_pure(player_first in any::<bool>()) {
        let snap: MatchSnapshot = record("Bob", 10, "Rex", 10, player_first).into();
        let me = profile("Bob");
        let first = try_resolve_player_slot(&snap, &me);
        prop_assert_eq!(first.clone(), try_resolve_player_slot(&snap, &me));
        prop_assert_eq!(first.ok(), Some(if player_first { Slot::A } else { Slot::B }));
    }

    /// Property: without a finished match or tournament, play continues
    #[test]
    fn prop_running_match_continues(
        won in proptest::option::of(any::<bool>()),
        points in proptest::option::of(0u32..10),
        just_completed in prop_oneof![Just(None), Just(Some(false))],
    ) {
        let result = MoveResponse {
            match_just_completed: just_completed,
            player_won_match: won,
            stat_points_available: points,
            ..Default::default()
        };
        prop_assert_eq!(next_transition(&result), Transition::ContinueRound);
    }

    /// Property: a named champion always ends the run on the victory screen
    #[test]
    fn prop_champion_means_victory(
        just_completed in proptest::option::of(any::<bool>()),
        won in proptest::option::of(any::<bool>()),
        points in proptest::option::of(0u32..10),
    ) {
        let result = MoveResponse {
            tournament_complete: true,
            champion_name: Some(String::from("Rex")),
            match_just_completed: just_completed,
            player_won_match: won,
            stat_points_available: points,
            ..Default::default()
        };
        let is_victory = matches!(next_transition(&result), Transition::ShowVictory { .. });
        prop_assert!(is_victory);
    }

    /// Property: a valid level-up adds exactly three points
    #[test]
    fn prop_level_up_adds_three(baseline in stat_block(), allocation in allocation_of(3)) {
        let stats = apply_level_up(&baseline, &allocation).unwrap();
        prop_assert_eq!(stats.total(), baseline.total() + 3);
        for (stat, value) in stats.iter() {
            prop_assert_eq!(value, baseline.get(stat) + allocation.get(stat));
        }
    }

    /// Property: any other non-negative total is refused
    #[test]
    fn prop_level_up_rejects_other_totals(
        baseline in stat_block(),
        allocation in (0i32..8).prop_filter("not three", |n| *n != 3).prop_flat_map(allocation_of),
    ) {
        prop_assert!(apply_level_up(&baseline, &allocation).is_err());
    }
}
