//! Card deck integration tests.
//!
//! Property-based checks of the draw cycle, plus the jail card moving
//! between a deck and a player through `GameData`.

use monopoly_engine::board::GameTables;
use monopoly_engine::cards::{
    standard_chance, standard_community_chest, CardEffect, Deck, DeckKind, DECK_SIZE,
};
use monopoly_engine::core::{init_game, GameRng, GameSettings, PlayerId};
use monopoly_engine::rules::TurnSequencer;
use proptest::prelude::*;
use rustc_hash::FxHashSet;

// Strategy picking one of the two standard decks
fn deck_strategy() -> impl Strategy<Value = Deck> {
    prop_oneof![
        Just(Deck::new(DeckKind::Chance, standard_chance())),
        Just(Deck::new(DeckKind::CommunityChest, standard_community_chest())),
    ]
}

proptest! {
    #[test]
    fn test_no_repeats_within_a_cycle(
        deck in deck_strategy(),
        seed in any::<u64>(),
        held in any::<bool>(),
        cycles in 1usize..4,
    ) {
        let mut deck = deck;
        let mut rng = GameRng::new(seed);
        let cycle_len = if held { DECK_SIZE - 1 } else { DECK_SIZE };

        for cycle in 0..cycles {
            let mut seen = FxHashSet::default();
            for _ in 0..cycle_len {
                let card = deck.draw(held, &mut rng).expect("standard deck always draws");
                prop_assert!(seen.insert(card.id), "card {} repeated in one cycle", card.id);
                if held {
                    prop_assert_ne!(card.effect, CardEffect::GetOutOfJailFree);
                }
            }
            // The cycle is used up exactly now; the next draw reshuffles.
            prop_assert_eq!(deck.state().remaining(), 0);
            prop_assert_eq!(deck.state().shuffles, cycle as u32 + 1);
        }
    }

    #[test]
    fn test_same_seed_same_order(seed in any::<u64>()) {
        let draw_all = |seed: u64| {
            let mut deck = Deck::new(DeckKind::Chance, standard_chance());
            let mut rng = GameRng::new(seed);
            (0..DECK_SIZE * 2)
                .filter_map(|_| deck.draw(false, &mut rng).map(|c| c.id))
                .collect::<Vec<_>>()
        };
        prop_assert_eq!(draw_all(seed), draw_all(seed));
    }

    #[test]
    fn test_arrange_fixes_draw_order(order in Just((0u8..16).collect::<Vec<_>>()).prop_shuffle()) {
        let mut deck = Deck::new(DeckKind::CommunityChest, standard_community_chest());
        let mut rng = GameRng::new(0);
        prop_assert!(deck.arrange(&order));

        for &idx in &order {
            let card = deck.draw(false, &mut rng).expect("arranged deck draws");
            prop_assert_eq!(card.id, idx + 1);
        }
        prop_assert_eq!(deck.state().shuffles, 0);
    }
}

/// Test an out-of-range arrangement is refused.
#[test]
fn test_arrange_rejects_bad_index() {
    let mut deck = Deck::new(DeckKind::Chance, standard_chance());
    assert!(!deck.arrange(&[0, 16]));
    assert!(deck.state().order.is_empty());
}

/// Test a held jail card leaves the deck until it is used.
#[test]
fn test_jail_card_leaves_and_returns() {
    let settings = GameSettings::default().with_seed(99);
    let mut game = init_game(settings, GameTables::standard()).unwrap();
    let p0 = PlayerId::new(0);

    assert!(game.chance.stack_next(16));
    let card = game.draw_card(DeckKind::Chance).unwrap();
    assert_eq!(card.effect, CardEffect::GetOutOfJailFree);
    game.player_mut(p0).jail_free_cards.push(DeckKind::Chance);

    // Finish the cycle; the reshuffle leaves the held card out.
    while game.chance.state().remaining() > 0 {
        game.draw_card(DeckKind::Chance);
    }
    game.draw_card(DeckKind::Chance);
    assert_eq!(game.chance.state().order.len(), DECK_SIZE - 1);

    TurnSequencer::send_to_jail(&mut game, p0);
    TurnSequencer::use_jail_free_card(&mut game, p0).unwrap();
    while game.chance.state().remaining() > 0 {
        game.draw_card(DeckKind::Chance);
    }
    game.draw_card(DeckKind::Chance);
    assert_eq!(game.chance.state().order.len(), DECK_SIZE);
}
