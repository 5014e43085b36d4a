//! Forced payments, emergency liquidation and bankruptcy.
//!
//! ## Payment chain
//!
//! A forced payment (rent, tax, fine, card) first tries the payer's cash.
//! If that is short, the payer's holdings are liquidated in a fixed order
//! until the debt is covered. Only if liquidation falls short is the
//! payer declared bankrupt to the creditor.
//!
//! ## Liquidation order
//!
//! Owned properties are walked in table order three times: hotels are sold
//! outright (refund: four houses at half cost), then houses one at a time
//! (refund: half cost), then every unmortgaged property is mortgaged
//! (credit: half price). Liquidation stops as soon as cash covers the
//! amount needed.

use serde::Serialize;

use crate::board::{Owner, PropertyId};
use crate::core::{GameData, Money, PlayerId, RulesError};

use super::building::HOUSES_PER_HOTEL;
use super::engine::RulesEngine;

/// Who a debt is owed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Creditor {
    Bank,
    Player(PlayerId),
}

/// Result of a forced payment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Payment {
    Paid,
    /// The payer could not raise the amount and is out of the game.
    Bankrupt,
}

/// Liquidation and elimination.
pub struct BankruptcyResolver;

impl BankruptcyResolver {
    /// Owned properties in table order.
    fn holdings(game: &GameData, player: PlayerId) -> Vec<PropertyId> {
        let mut owned = game.player(player).properties.clone();
        owned.sort_unstable();
        owned
    }

    fn solvent(game: &GameData, player: PlayerId, amount_needed: Money) -> bool {
        game.player(player).money >= amount_needed
    }

    /// Sell a hotel outright, leaving the lot empty. Returns the refund.
    fn liquidate_hotel(game: &mut GameData, player: PlayerId, id: PropertyId) -> Money {
        let refund = game.property(id).house_cost * Money::from(HOUSES_PER_HOTEL) / 2;
        let prop = game.property_mut(id);
        prop.has_hotel = false;
        prop.houses = 0;
        game.hotel_supply += 1;
        game.player_mut(player).money += refund;
        refund
    }

    /// Sell one house. Returns the refund.
    fn liquidate_house(game: &mut GameData, player: PlayerId, id: PropertyId) -> Money {
        let refund = game.property(id).house_cost / 2;
        game.property_mut(id).houses -= 1;
        game.house_supply += 1;
        game.player_mut(player).money += refund;
        refund
    }

    /// Raise cash until `player` holds at least `amount_needed`.
    ///
    /// Returns whether that was reached. Whatever was sold stays sold
    /// even if it was not enough.
    pub fn attempt_emergency_liquidation(
        game: &mut GameData,
        player: PlayerId,
        amount_needed: Money,
    ) -> Result<bool, RulesError> {
        game.check_player(player)?;
        Ok(Self::liquidate(game, player, amount_needed))
    }

    fn liquidate(game: &mut GameData, player: PlayerId, amount_needed: Money) -> bool {
        if Self::solvent(game, player, amount_needed) {
            return true;
        }
        let owned = Self::holdings(game, player);
        log::debug!(
            "{player} liquidating to raise ${} (has ${})",
            amount_needed,
            game.player(player).money
        );

        for &id in &owned {
            if game.property(id).has_hotel {
                Self::liquidate_hotel(game, player, id);
                if Self::solvent(game, player, amount_needed) {
                    return true;
                }
            }
        }

        for &id in &owned {
            while game.property(id).houses > 0 {
                Self::liquidate_house(game, player, id);
                if Self::solvent(game, player, amount_needed) {
                    return true;
                }
            }
        }

        for &id in &owned {
            let prop = game.property(id);
            if !prop.is_mortgaged {
                let credit = prop.price / 2;
                game.property_mut(id).is_mortgaged = true;
                game.player_mut(player).money += credit;
                if Self::solvent(game, player, amount_needed) {
                    return true;
                }
            }
        }

        Self::solvent(game, player, amount_needed)
    }

    /// Take `player` out of the game, settling with `creditor`.
    ///
    /// To a solvent player creditor: remaining buildings are sold to the
    /// bank, all cash goes to the creditor, unmortgaged properties change
    /// hands as they are, and each mortgaged property goes across
    /// unmortgaged if the creditor can pay the unmortgage cost on the spot,
    /// otherwise back to the bank. Jail cards go to the creditor.
    ///
    /// To the bank: everything returns cleared and jail cards go back to
    /// their decks.
    ///
    /// Either way the player ends with no cash and no property, the active
    /// count drops by one and the game-over check runs. Bankrupting a
    /// player twice does nothing.
    pub fn trigger_bankruptcy(
        game: &mut GameData,
        player: PlayerId,
        creditor: Creditor,
    ) -> Result<(), RulesError> {
        Self::check_creditor(game, creditor)?;
        if game.check_player(player)?.is_bankrupt {
            return Ok(());
        }
        let owned = Self::holdings(game, player);

        let receiver = match creditor {
            Creditor::Player(c) if c != player && !game.player(c).is_bankrupt => Some(c),
            _ => None,
        };

        match receiver {
            Some(to) => {
                for &id in &owned {
                    if game.property(id).has_hotel {
                        Self::liquidate_hotel(game, player, id);
                    }
                    while game.property(id).houses > 0 {
                        Self::liquidate_house(game, player, id);
                    }
                }

                let cash = std::mem::take(&mut game.player_mut(player).money);
                game.player_mut(to).money += cash;

                for &id in &owned {
                    let prop = game.property(id);
                    if prop.is_mortgaged {
                        let cost = RulesEngine::unmortgage_cost(prop);
                        if game.player(to).money >= cost {
                            game.player_mut(to).money -= cost;
                            game.property_mut(id).is_mortgaged = false;
                            RulesEngine::transfer_property(game, id, Owner::Player(to))?;
                        } else {
                            RulesEngine::transfer_property(game, id, Owner::Bank)?;
                            game.property_mut(id).reset();
                        }
                    } else {
                        RulesEngine::transfer_property(game, id, Owner::Player(to))?;
                    }
                }

                let cards = std::mem::take(&mut game.player_mut(player).jail_free_cards);
                game.player_mut(to).jail_free_cards.extend(cards);
                log::info!(
                    "{player} is bankrupt to {to}; ${cash} and {} properties change hands",
                    owned.len()
                );
            }
            None => {
                for &id in &owned {
                    let prop = game.property(id);
                    let houses = prop.houses;
                    let hotel = prop.has_hotel;
                    game.house_supply += houses;
                    if hotel {
                        game.hotel_supply += 1;
                    }
                    RulesEngine::transfer_property(game, id, Owner::Bank)?;
                    game.property_mut(id).reset();
                }
                game.player_mut(player).jail_free_cards.clear();
                log::info!("{player} is bankrupt to the bank; {} properties return", owned.len());
            }
        }

        let data = game.player_mut(player);
        data.money = 0;
        data.jail_turns = 0;
        data.properties.clear();
        data.is_bankrupt = true;
        game.active_players -= 1;
        RulesEngine::check_game_over(game);
        Ok(())
    }

    fn check_creditor(game: &GameData, creditor: Creditor) -> Result<(), RulesError> {
        if let Creditor::Player(to) = creditor {
            game.check_player(to)?;
        }
        Ok(())
    }

    /// Make `payer` pay `amount` to `creditor`, liquidating or going
    /// bankrupt if needed.
    pub fn collect_payment(
        game: &mut GameData,
        payer: PlayerId,
        amount: Money,
        creditor: Creditor,
    ) -> Result<Payment, RulesError> {
        game.check_player(payer)?;
        Self::check_creditor(game, creditor)?;
        if amount == 0 {
            return Ok(Payment::Paid);
        }
        if !Self::liquidate(game, payer, amount) {
            Self::trigger_bankruptcy(game, payer, creditor)?;
            return Ok(Payment::Bankrupt);
        }

        game.player_mut(payer).money -= amount;
        if let Creditor::Player(to) = creditor {
            if !game.player(to).is_bankrupt {
                game.player_mut(to).money += amount;
            }
        }
        log::debug!("{payer} paid ${amount} to {creditor:?}");
        Ok(Payment::Paid)
    }
}
