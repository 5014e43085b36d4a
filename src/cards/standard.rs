//! The classic US Chance and Community Chest decks.

use super::definition::{Card, CardEffect};
use crate::board::PropertyKind;

/// The 16 Chance cards.
#[must_use]
pub fn standard_chance() -> Vec<Card> {
    use CardEffect::*;

    vec![
        Card::new(1, "Advance to GO (Collect $200)", AdvanceTo { position: 0 }),
        Card::new(
            2,
            "Advance to Illinois Avenue. If you pass GO, collect $200",
            AdvanceTo { position: 24 },
        ),
        Card::new(
            3,
            "Advance to St. Charles Place. If you pass GO, collect $200",
            AdvanceTo { position: 11 },
        ),
        Card::new(
            4,
            "Advance to the nearest Utility. If owned, pay the owner ten times the amount thrown",
            AdvanceToNearest { kind: PropertyKind::Utility },
        ),
        Card::new(
            5,
            "Advance to the nearest Railroad. If owned, pay the owner twice the rental",
            AdvanceToNearest { kind: PropertyKind::Railroad },
        ),
        Card::new(6, "Bank pays you dividend of $50", Collect { amount: 50 }),
        Card::new(7, "Your building loan matures. Collect $100", Collect { amount: 100 }),
        Card::new(8, "Go back 3 spaces", MoveRelative { spaces: -3 }),
        Card::new(9, "Go to Jail. Do not pass GO, do not collect $200", GoToJail),
        Card::new(
            10,
            "Make general repairs on all your property: $25 per house, $100 per hotel",
            Repairs { per_house: 25, per_hotel: 100 },
        ),
        Card::new(11, "Speeding fine $15", Pay { amount: 15 }),
        Card::new(
            12,
            "Take a trip to Reading Railroad. If you pass GO, collect $200",
            AdvanceTo { position: 5 },
        ),
        Card::new(13, "Advance to Boardwalk", AdvanceTo { position: 39 }),
        Card::new(
            14,
            "You have been elected Chairman of the Board. Pay each player $50",
            PayEachPlayer { amount: 50 },
        ),
        Card::new(
            15,
            "You have won a crossword competition. Collect $150",
            Collect { amount: 150 },
        ),
        Card::new(16, "Get Out of Jail Free", GetOutOfJailFree),
    ]
}

/// The 16 Community Chest cards.
#[must_use]
pub fn standard_community_chest() -> Vec<Card> {
    use CardEffect::*;

    vec![
        Card::new(1, "Advance to GO (Collect $200)", AdvanceTo { position: 0 }),
        Card::new(2, "Bank error in your favor. Collect $200", Collect { amount: 200 }),
        Card::new(3, "Doctor's fee. Pay $50", Pay { amount: 50 }),
        Card::new(4, "From sale of stock you get $50", Collect { amount: 50 }),
        Card::new(5, "Holiday fund matures. Receive $100", Collect { amount: 100 }),
        Card::new(6, "Go to Jail. Do not pass GO, do not collect $200", GoToJail),
        Card::new(7, "Life insurance matures. Collect $100", Collect { amount: 100 }),
        Card::new(8, "Income tax refund. Collect $20", Collect { amount: 20 }),
        Card::new(
            9,
            "It is your birthday. Collect $10 from every player",
            CollectFromEachPlayer { amount: 10 },
        ),
        Card::new(10, "You inherit $100", Collect { amount: 100 }),
        Card::new(11, "Pay hospital fees of $100", Pay { amount: 100 }),
        Card::new(12, "Pay school fees of $50", Pay { amount: 50 }),
        Card::new(13, "Receive $25 consultancy fee", Collect { amount: 25 }),
        Card::new(
            14,
            "You are assessed for street repair: $40 per house, $115 per hotel",
            Repairs { per_house: 40, per_hotel: 115 },
        ),
        Card::new(
            15,
            "You have won second prize in a beauty contest. Collect $10",
            Collect { amount: 10 },
        ),
        Card::new(16, "Get Out of Jail Free", GetOutOfJailFree),
    ]
}
