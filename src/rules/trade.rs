//! Player-to-player trades.
//!
//! A `TradeOffer` lists properties and cash going each way. Properties in
//! a colour group with buildings cannot change hands; mortgaged
//! properties move still mortgaged.

use serde::Serialize;
use smallvec::SmallVec;

use crate::board::{Owner, PropertyId};
use crate::core::{GameData, Money, PlayerId, RulesError};

use super::engine::RulesEngine;

/// Terms of a proposed trade.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TradeOffer {
    pub proposer: PlayerId,
    pub partner: PlayerId,
    /// Proposer's properties going to the partner.
    pub offered: SmallVec<[PropertyId; 8]>,
    /// Partner's properties going to the proposer.
    pub requested: SmallVec<[PropertyId; 8]>,
    pub cash_offered: Money,
    pub cash_requested: Money,
}

impl TradeOffer {
    #[must_use]
    pub fn new(proposer: PlayerId, partner: PlayerId) -> Self {
        Self {
            proposer,
            partner,
            offered: SmallVec::new(),
            requested: SmallVec::new(),
            cash_offered: 0,
            cash_requested: 0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offered.is_empty()
            && self.requested.is_empty()
            && self.cash_offered == 0
            && self.cash_requested == 0
    }

    /// Add `property` to the offered side, or remove it if already there.
    pub fn toggle_offered(&mut self, property: PropertyId) {
        toggle(&mut self.offered, property);
    }

    /// Add `property` to the requested side, or remove it if already there.
    pub fn toggle_requested(&mut self, property: PropertyId) {
        toggle(&mut self.requested, property);
    }

    /// The same deal seen from the partner's side, for a counter-offer.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            proposer: self.partner,
            partner: self.proposer,
            offered: self.requested.clone(),
            requested: self.offered.clone(),
            cash_offered: self.cash_requested,
            cash_requested: self.cash_offered,
        }
    }
}

fn toggle(list: &mut SmallVec<[PropertyId; 8]>, property: PropertyId) {
    match list.iter().position(|&p| p == property) {
        Some(idx) => {
            list.remove(idx);
        }
        None => list.push(property),
    }
}

impl RulesEngine {
    /// Whether `property` may change hands: no buildings anywhere in its group.
    #[must_use]
    pub fn is_tradable(game: &GameData, property: PropertyId) -> bool {
        let group = game.property(property).group;
        game.group_members(group)
            .iter()
            .all(|&id| !game.property(id).has_buildings())
    }

    fn check_side(
        game: &GameData,
        owner: PlayerId,
        properties: &[PropertyId],
        cash: Money,
    ) -> Result<(), RulesError> {
        for &id in properties {
            if !game.check_property(id)?.is_owned_by(owner) {
                return Err(RulesError::NotOwner { player: owner, property: id });
            }
            if !Self::is_tradable(game, id) {
                return Err(RulesError::Untradable(id));
            }
        }
        let available = game.player(owner).money;
        if available < cash {
            return Err(RulesError::InsufficientFunds { player: owner, needed: cash, available });
        }
        Ok(())
    }

    /// Check a trade could be executed right now.
    pub fn validate_trade(game: &GameData, offer: &TradeOffer) -> Result<(), RulesError> {
        if offer.proposer == offer.partner {
            return Err(RulesError::SelfTrade);
        }
        for player in [offer.proposer, offer.partner] {
            if game.check_player(player)?.is_bankrupt {
                return Err(RulesError::PlayerBankrupt(player));
            }
        }
        if offer.is_empty() {
            return Err(RulesError::EmptyTrade);
        }
        Self::check_side(game, offer.proposer, &offer.offered, offer.cash_offered)?;
        Self::check_side(game, offer.partner, &offer.requested, offer.cash_requested)
    }

    /// Swap the cash and properties in `offer`.
    pub fn execute_trade(game: &mut GameData, offer: &TradeOffer) -> Result<(), RulesError> {
        Self::validate_trade(game, offer)?;

        let (a, b) = (offer.proposer, offer.partner);
        game.player_mut(a).money -= offer.cash_offered;
        game.player_mut(b).money += offer.cash_offered;
        game.player_mut(b).money -= offer.cash_requested;
        game.player_mut(a).money += offer.cash_requested;

        for &id in &offer.offered {
            Self::transfer_property(game, id, Owner::Player(b))?;
        }
        for &id in &offer.requested {
            Self::transfer_property(game, id, Owner::Player(a))?;
        }
        log::info!(
            "{a} traded {} properties and ${} with {b} for {} properties and ${}",
            offer.offered.len(),
            offer.cash_offered,
            offer.requested.len(),
            offer.cash_requested
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::GameTables;
    use crate::core::{init_game, GameSettings};

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);
    const MEDITERRANEAN: PropertyId = PropertyId(0);
    const BALTIC: PropertyId = PropertyId(1);
    const READING: PropertyId = PropertyId(2);

    fn game() -> GameData {
        let mut game =
            init_game(GameSettings::default().with_seed(12), GameTables::standard()).unwrap();
        RulesEngine::buy_property(&mut game, MEDITERRANEAN, P0).unwrap();
        RulesEngine::buy_property(&mut game, BALTIC, P1).unwrap();
        RulesEngine::buy_property(&mut game, READING, P1).unwrap();
        game
    }

    #[test]
    fn test_toggle() {
        let mut offer = TradeOffer::new(P0, P1);
        assert!(offer.is_empty());
        offer.toggle_offered(BALTIC);
        offer.toggle_offered(READING);
        offer.toggle_offered(BALTIC);
        assert_eq!(offer.offered.as_slice(), &[READING]);
    }

    #[test]
    fn test_execute_trade() {
        let mut game = game();
        let mut offer = TradeOffer::new(P0, P1);
        offer.toggle_offered(MEDITERRANEAN);
        offer.toggle_requested(BALTIC);
        offer.cash_offered = 40;

        RulesEngine::execute_trade(&mut game, &offer).unwrap();

        assert_eq!(game.property(MEDITERRANEAN).owner, Owner::Player(P1));
        assert_eq!(game.property(BALTIC).owner, Owner::Player(P0));
        assert_eq!(game.player(P0).money, 1440 - 40);
        assert_eq!(game.player(P1).money, 1240 + 40);
        assert!(game.validate_invariants().is_ok());
    }

    #[test]
    fn test_mortgaged_property_stays_mortgaged() {
        let mut game = game();
        game.property_mut(READING).is_mortgaged = true;
        let mut offer = TradeOffer::new(P0, P1);
        offer.toggle_requested(READING);

        RulesEngine::execute_trade(&mut game, &offer).unwrap();
        assert_eq!(game.property(READING).owner, Owner::Player(P0));
        assert!(game.property(READING).is_mortgaged);
    }

    #[test]
    fn test_rejects_foreign_property() {
        let game = game();
        let mut offer = TradeOffer::new(P0, P1);
        offer.toggle_offered(BALTIC);

        assert_eq!(
            RulesEngine::validate_trade(&game, &offer),
            Err(RulesError::NotOwner { player: P0, property: BALTIC })
        );
    }

    #[test]
    fn test_rejects_built_group() {
        let mut game = game();
        RulesEngine::transfer_property(&mut game, BALTIC, Owner::Player(P0)).unwrap();
        game.property_mut(BALTIC).houses = 1;
        game.house_supply -= 1;

        let mut offer = TradeOffer::new(P0, P1);
        offer.toggle_offered(MEDITERRANEAN);
        assert_eq!(
            RulesEngine::validate_trade(&game, &offer),
            Err(RulesError::Untradable(MEDITERRANEAN))
        );
    }

    #[test]
    fn test_rejects_empty_self_and_unaffordable() {
        let game = game();
        assert_eq!(
            RulesEngine::validate_trade(&game, &TradeOffer::new(P0, P1)),
            Err(RulesError::EmptyTrade)
        );
        let mut own = TradeOffer::new(P0, P0);
        own.cash_offered = 1;
        assert_eq!(RulesEngine::validate_trade(&game, &own), Err(RulesError::SelfTrade));

        let mut rich = TradeOffer::new(P0, P1);
        rich.cash_requested = 5000;
        assert!(matches!(
            RulesEngine::validate_trade(&game, &rich),
            Err(RulesError::InsufficientFunds { player: P1, .. })
        ));
    }

    #[test]
    fn test_reversed() {
        let mut offer = TradeOffer::new(P0, P1);
        offer.toggle_offered(MEDITERRANEAN);
        offer.cash_requested = 30;

        let counter = offer.reversed();
        assert_eq!(counter.proposer, P1);
        assert_eq!(counter.requested.as_slice(), &[MEDITERRANEAN]);
        assert_eq!(counter.cash_offered, 30);
        assert_eq!(counter.reversed(), offer);
    }
}
