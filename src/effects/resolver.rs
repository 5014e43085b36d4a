//! Card effect resolution - applying a drawn card to the game.
//!
//! `CardResolver` executes one `CardEffect` for the player who drew it.
//! Payments go through `BankruptcyResolver::collect_payment`, so a card
//! debit the player cannot cover liquidates and, failing that,
//! bankrupts them. Movement effects report the rent modifier the new
//! square should be resolved with; resolving that square is the caller's
//! job. An unknown player is refused before anything is applied.

use crate::board::{PropertyKind, BOARD_SIZE};
use crate::cards::{Card, CardEffect, DeckKind};
use crate::core::{GameData, PlayerId, RulesError};
use crate::rules::{
    BankruptcyResolver, Creditor, Payment, RentModifier, RulesEngine, TurnSequencer,
};

/// What the caller must do after a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardOutcome {
    /// Nothing further to resolve.
    Done,
    /// The player moved and the new square must be resolved.
    Moved { modifier: RentModifier },
    /// The player is now in jail; the turn ends.
    Jailed,
    /// The player who drew the card went bankrupt.
    Bankrupt,
}

/// Executes card effects.
pub struct CardResolver;

impl CardResolver {
    /// Draw from `deck` and execute the card for `player`.
    ///
    /// Returns `Ok(None)` only if the deck has no drawable cards.
    pub fn draw_and_execute(
        game: &mut GameData,
        player: PlayerId,
        deck: DeckKind,
    ) -> Result<Option<(Card, CardOutcome)>, RulesError> {
        game.check_player(player)?;
        let Some(card) = game.draw_card(deck) else {
            return Ok(None);
        };
        game.notify(format!("{deck}: {}", card.description));
        let outcome = Self::execute(game, player, &card, deck)?;
        Ok(Some((card, outcome)))
    }

    /// Apply `card`, drawn from `deck`, to `player`.
    pub fn execute(
        game: &mut GameData,
        player: PlayerId,
        card: &Card,
        deck: DeckKind,
    ) -> Result<CardOutcome, RulesError> {
        game.check_player(player)?;
        let outcome = match card.effect {
            CardEffect::AdvanceTo { position } => {
                TurnSequencer::move_to(game, player, position, true);
                CardOutcome::Moved { modifier: RentModifier::Standard }
            }

            CardEffect::AdvanceToNearest { kind } => {
                let from = game.player(player).position;
                match Self::nearest(game, from, kind) {
                    Some(position) => {
                        TurnSequencer::move_to(game, player, position, true);
                        let modifier = match kind {
                            PropertyKind::Railroad => RentModifier::DoubleRailroad,
                            PropertyKind::Utility => RentModifier::UtilityTimesTen,
                            PropertyKind::Street => RentModifier::Standard,
                        };
                        CardOutcome::Moved { modifier }
                    }
                    None => CardOutcome::Done,
                }
            }

            CardEffect::MoveRelative { spaces } => {
                let steps = spaces.unsigned_abs();
                if spaces >= 0 {
                    TurnSequencer::move_player(game, player, steps);
                } else {
                    TurnSequencer::move_back(game, player, steps);
                }
                CardOutcome::Moved { modifier: RentModifier::Standard }
            }

            CardEffect::Collect { amount } => {
                game.player_mut(player).money += amount;
                CardOutcome::Done
            }

            CardEffect::Pay { amount } => {
                let paid =
                    BankruptcyResolver::collect_payment(game, player, amount, Creditor::Bank)?;
                Self::settle(paid)
            }

            CardEffect::CollectFromEachPlayer { amount } => {
                let creditor = Creditor::Player(player);
                for other in Self::opponents(game, player) {
                    BankruptcyResolver::collect_payment(game, other, amount, creditor)?;
                }
                CardOutcome::Done
            }

            CardEffect::PayEachPlayer { amount } => {
                for other in Self::opponents(game, player) {
                    let paid = BankruptcyResolver::collect_payment(
                        game,
                        player,
                        amount,
                        Creditor::Player(other),
                    )?;
                    if paid == Payment::Bankrupt {
                        return Ok(CardOutcome::Bankrupt);
                    }
                }
                CardOutcome::Done
            }

            CardEffect::GetOutOfJailFree => {
                game.player_mut(player).jail_free_cards.push(deck);
                CardOutcome::Done
            }

            CardEffect::GoToJail => {
                TurnSequencer::send_to_jail(game, player);
                CardOutcome::Jailed
            }

            CardEffect::Repairs { per_house, per_hotel } => {
                let (houses, hotels) = RulesEngine::count_buildings(game, player);
                let fee = houses * per_house + hotels * per_hotel;
                let paid = BankruptcyResolver::collect_payment(game, player, fee, Creditor::Bank)?;
                Self::settle(paid)
            }
        };
        Ok(outcome)
    }

    fn opponents(game: &GameData, player: PlayerId) -> Vec<PlayerId> {
        game.solvent_players().filter(|&p| p != player).collect()
    }

    fn settle(payment: Payment) -> CardOutcome {
        match payment {
            Payment::Paid => CardOutcome::Done,
            Payment::Bankrupt => CardOutcome::Bankrupt,
        }
    }

    /// First square strictly ahead of `from` holding a property of `kind`.
    #[must_use]
    pub fn nearest(game: &GameData, from: u8, kind: PropertyKind) -> Option<u8> {
        (1..=BOARD_SIZE)
            .map(|step| (from + step) % BOARD_SIZE)
            .find(|&pos| {
                RulesEngine::property_at(game, pos).is_some_and(|id| game.property(id).kind == kind)
            })
    }
}
