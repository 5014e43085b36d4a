//! Purchase, rent and valuation.
//!
//! `RulesEngine` is a namespace of pure operations over `GameData`. Every
//! operation that can be refused returns `Result<_, RulesError>` and
//! leaves the state untouched on `Err`.
//!
//! Building, mortgages and trades extend the same type from their own
//! modules.

use serde::Serialize;

use crate::board::{ColorGroup, Owner, PropertyId, PropertyKind, SquareKind};
use crate::core::{GameData, Money, Player, PlayerId, RulesError};

use super::bankruptcy::{BankruptcyResolver, Creditor};

/// Utility multiplier with one utility owned.
pub const UTILITY_SINGLE_MULTIPLIER: Money = 4;
/// Utility multiplier with both owned, or when sent by a card.
pub const UTILITY_SET_MULTIPLIER: Money = 10;

/// Rent adjustment applied by "advance to nearest" cards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum RentModifier {
    #[default]
    Standard,
    /// Twice the normal railroad rent.
    DoubleRailroad,
    /// Ten times the dice, whatever the owner holds.
    UtilityTimesTen,
}

/// What happened when rent was settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RentOutcome {
    /// Unowned, self-owned, mortgaged or zero rent.
    NotDue,
    Paid { to: PlayerId, amount: Money },
    /// The payer could not cover it and was bankrupted to the owner.
    Bankrupt { to: PlayerId },
}

/// Core economic rules.
pub struct RulesEngine;

impl RulesEngine {
    /// Whether `player` holds `amount` in cash. Unknown players cannot.
    #[must_use]
    pub fn can_afford(game: &GameData, player: PlayerId, amount: Money) -> bool {
        game.check_player(player).is_ok_and(|p| p.money >= amount)
    }

    fn check_solvent(game: &GameData, player: PlayerId) -> Result<(), RulesError> {
        if game.check_player(player)?.is_bankrupt {
            return Err(RulesError::PlayerBankrupt(player));
        }
        Ok(())
    }

    /// Buy a bank-owned property at its list price.
    pub fn buy_property(
        game: &mut GameData,
        property: PropertyId,
        player: PlayerId,
    ) -> Result<(), RulesError> {
        let price = game.check_property(property)?.price;
        Self::buy_at(game, property, player, price)
    }

    /// `buy_property` restricted to railroads.
    pub fn buy_railroad(
        game: &mut GameData,
        property: PropertyId,
        player: PlayerId,
    ) -> Result<(), RulesError> {
        if game.check_property(property)?.kind != PropertyKind::Railroad {
            return Err(RulesError::WrongPropertyKind(property));
        }
        Self::buy_property(game, property, player)
    }

    /// `buy_property` restricted to utilities.
    pub fn buy_utility(
        game: &mut GameData,
        property: PropertyId,
        player: PlayerId,
    ) -> Result<(), RulesError> {
        if game.check_property(property)?.kind != PropertyKind::Utility {
            return Err(RulesError::WrongPropertyKind(property));
        }
        Self::buy_property(game, property, player)
    }

    /// Buy a bank-owned property for `price` (an auction's winning bid).
    pub fn buy_at(
        game: &mut GameData,
        property: PropertyId,
        player: PlayerId,
        price: Money,
    ) -> Result<(), RulesError> {
        Self::check_solvent(game, player)?;
        if game.check_property(property)?.owner != Owner::Bank {
            return Err(RulesError::AlreadyOwned(property));
        }
        let available = game.player(player).money;
        if available < price {
            return Err(RulesError::InsufficientFunds { player, needed: price, available });
        }

        game.player_mut(player).money -= price;
        game.property_mut(property).owner = Owner::Player(player);
        game.player_mut(player).properties.push(property);
        log::info!("{player} bought {} for ${price}", game.property(property).name);
        Ok(())
    }

    /// How many properties of `group` `owner` holds (mortgaged included).
    #[must_use]
    pub fn count_owned_in_group(game: &GameData, owner: PlayerId, group: ColorGroup) -> usize {
        game.group_members(group)
            .iter()
            .filter(|&&id| game.property(id).is_owned_by(owner))
            .count()
    }

    /// Whether `player` owns every property of `group`.
    #[must_use]
    pub fn owns_color_set(game: &GameData, player: PlayerId, group: ColorGroup) -> bool {
        let members = game.group_members(group);
        !members.is_empty() && members.iter().all(|&id| game.property(id).is_owned_by(player))
    }

    /// Rent owed on `property` by anyone but its owner, using the current dice.
    ///
    /// Zero when bank-owned or mortgaged. Streets charge the ladder entry
    /// once built on, double base rent unimproved with the full set, base
    /// rent otherwise. Railroads double per extra railroad held. Utilities
    /// multiply the dice sum by 4, or by 10 with both held.
    pub fn calculate_rent(game: &GameData, property: PropertyId) -> Result<Money, RulesError> {
        let prop = game.check_property(property)?;
        let owner = match prop.owner {
            Owner::Player(owner) if !prop.is_mortgaged => owner,
            _ => return Ok(0),
        };

        let rent = match prop.kind {
            PropertyKind::Street => {
                if prop.has_buildings() {
                    prop.rent_ladder[prop.building_level() as usize]
                } else if Self::owns_color_set(game, owner, prop.group) {
                    prop.rent_monopoly
                } else {
                    prop.rent_base
                }
            }
            PropertyKind::Railroad => {
                let held = Self::count_owned_in_group(game, owner, prop.group).max(1);
                prop.rent_base << (held - 1)
            }
            PropertyKind::Utility => {
                let multiplier = if Self::count_owned_in_group(game, owner, prop.group) >= 2 {
                    UTILITY_SET_MULTIPLIER
                } else {
                    UTILITY_SINGLE_MULTIPLIER
                };
                Money::from(game.dice.sum()) * multiplier
            }
        };
        Ok(rent)
    }

    /// Rent with a card modifier applied.
    pub fn rent_due(
        game: &GameData,
        property: PropertyId,
        modifier: RentModifier,
    ) -> Result<Money, RulesError> {
        let rent = Self::calculate_rent(game, property)?;
        if rent == 0 {
            return Ok(0);
        }
        let due = match (modifier, game.property(property).kind) {
            (RentModifier::DoubleRailroad, PropertyKind::Railroad) => rent * 2,
            (RentModifier::UtilityTimesTen, PropertyKind::Utility) => {
                Money::from(game.dice.sum()) * UTILITY_SET_MULTIPLIER
            }
            _ => rent,
        };
        Ok(due)
    }

    /// Settle rent for `payer` landing on `property`.
    ///
    /// Pays the owner if the payer has the cash. Otherwise everything the
    /// payer has goes to the owner and the payer is bankrupt. Callers run
    /// emergency liquidation first.
    pub fn pay_rent(
        game: &mut GameData,
        property: PropertyId,
        payer: PlayerId,
        modifier: RentModifier,
    ) -> Result<RentOutcome, RulesError> {
        game.check_player(payer)?;
        let owner = match game.check_property(property)?.owner {
            Owner::Player(owner) if owner != payer => owner,
            _ => return Ok(RentOutcome::NotDue),
        };
        let amount = Self::rent_due(game, property, modifier)?;
        if amount == 0 {
            return Ok(RentOutcome::NotDue);
        }

        if Self::can_afford(game, payer, amount) {
            game.player_mut(payer).money -= amount;
            game.player_mut(owner).money += amount;
            log::debug!("{payer} paid ${amount} rent to {owner}");
            Ok(RentOutcome::Paid { to: owner, amount })
        } else {
            BankruptcyResolver::trigger_bankruptcy(game, payer, Creditor::Player(owner))?;
            Ok(RentOutcome::Bankrupt { to: owner })
        }
    }

    /// Move `property` to a new owner, keeping buildings and mortgage.
    pub fn transfer_property(
        game: &mut GameData,
        property: PropertyId,
        to: Owner,
    ) -> Result<(), RulesError> {
        let from = game.check_property(property)?.owner;
        if let Owner::Player(new_owner) = to {
            game.check_player(new_owner)?;
        }

        if let Owner::Player(from) = from {
            game.player_mut(from).remove_property(property);
        }
        game.property_mut(property).owner = to;
        if let Owner::Player(new_owner) = to {
            game.player_mut(new_owner).properties.push(property);
        }
        Ok(())
    }

    /// Cash plus what the player's holdings are worth to the bank.
    ///
    /// Unmortgaged property counts at price, mortgaged at half. Buildings
    /// count at their sale value: half the house cost per house and twice
    /// the house cost per hotel.
    pub fn net_worth(game: &GameData, player: PlayerId) -> Result<Money, RulesError> {
        let data = game.check_player(player)?;
        Ok(Self::worth_of(game, data))
    }

    fn worth_of(game: &GameData, data: &Player) -> Money {
        let holdings: Money = data
            .properties
            .iter()
            .map(|&id| {
                let prop = game.property(id);
                let land = if prop.is_mortgaged { prop.price / 2 } else { prop.price };
                let houses = Money::from(prop.houses) * (prop.house_cost / 2);
                let hotel = if prop.has_hotel { prop.house_cost * 4 / 2 } else { 0 };
                land + houses + hotel
            })
            .sum();
        data.money + holdings
    }

    /// Players ranked by net worth, bankrupt players last.
    #[must_use]
    pub fn standings(game: &GameData) -> Vec<(PlayerId, Money)> {
        let mut ranked: Vec<(PlayerId, Money, bool)> = game
            .players
            .iter()
            .map(|(id, p)| (id, Self::worth_of(game, p), p.is_bankrupt))
            .collect();
        ranked.sort_by(|a, b| a.2.cmp(&b.2).then(b.1.cmp(&a.1)).then(a.0.cmp(&b.0)));
        ranked.into_iter().map(|(id, worth, _)| (id, worth)).collect()
    }

    /// The property on square `position`, if it is ownable.
    #[must_use]
    pub fn property_at(game: &GameData, position: u8) -> Option<PropertyId> {
        match game.square_at(position) {
            SquareKind::Property(id) => Some(id),
            _ => None,
        }
    }

    /// Stop the game once fewer than two players remain.
    ///
    /// Returns `true` if the game is (now) over.
    pub fn check_game_over(game: &mut GameData) -> bool {
        if game.active_players >= 2 {
            return !game.running;
        }
        if game.running {
            game.running = false;
            let winner = game.solvent_players().next();
            game.winner = winner;
            match game.winner {
                Some(winner) => log::info!("game over after round {}: {winner} wins", game.round),
                None => log::info!("game over after round {}: no players left", game.round),
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::GameTables;
    use crate::core::{init_game, Dice, GameSettings};

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);
    const MEDITERRANEAN: PropertyId = PropertyId(0);
    const BALTIC: PropertyId = PropertyId(1);
    const READING: PropertyId = PropertyId(2);
    const ELECTRIC: PropertyId = PropertyId(7);
    const WATER: PropertyId = PropertyId(20);

    fn game() -> GameData {
        init_game(GameSettings::default().with_seed(4), GameTables::standard()).unwrap()
    }

    #[test]
    fn test_buy_property() {
        let mut game = game();
        RulesEngine::buy_property(&mut game, BALTIC, P0).unwrap();

        assert_eq!(game.player(P0).money, 1440);
        assert_eq!(game.property(BALTIC).owner, Owner::Player(P0));
        assert_eq!(game.player(P0).properties, vec![BALTIC]);
    }

    #[test]
    fn test_buy_owned_is_rejected() {
        let mut game = game();
        RulesEngine::buy_property(&mut game, BALTIC, P0).unwrap();

        let err = RulesEngine::buy_property(&mut game, BALTIC, P1).unwrap_err();
        assert_eq!(err, RulesError::AlreadyOwned(BALTIC));
        assert_eq!(game.player(P1).money, 1500);
    }

    #[test]
    fn test_buy_unaffordable_is_rejected() {
        let mut game = game();
        game.player_mut(P0).money = 59;

        let err = RulesEngine::buy_property(&mut game, BALTIC, P0).unwrap_err();
        assert!(matches!(err, RulesError::InsufficientFunds { needed: 60, available: 59, .. }));
        assert_eq!(game.property(BALTIC).owner, Owner::Bank);
    }

    #[test]
    fn test_buy_kind_checks() {
        let mut game = game();
        assert_eq!(
            RulesEngine::buy_railroad(&mut game, BALTIC, P0),
            Err(RulesError::WrongPropertyKind(BALTIC))
        );
        assert!(RulesEngine::buy_railroad(&mut game, READING, P0).is_ok());
        assert!(RulesEngine::buy_utility(&mut game, ELECTRIC, P0).is_ok());
    }

    #[test]
    fn test_street_rent() {
        let mut game = game();
        RulesEngine::buy_property(&mut game, BALTIC, P0).unwrap();
        assert_eq!(RulesEngine::calculate_rent(&game, BALTIC).unwrap(), 4);

        RulesEngine::buy_property(&mut game, MEDITERRANEAN, P0).unwrap();
        assert_eq!(RulesEngine::calculate_rent(&game, BALTIC).unwrap(), 8);

        game.property_mut(BALTIC).houses = 2;
        game.house_supply -= 2;
        assert_eq!(RulesEngine::calculate_rent(&game, BALTIC).unwrap(), 60);

        game.property_mut(BALTIC).houses = 0;
        game.property_mut(BALTIC).has_hotel = true;
        assert_eq!(RulesEngine::calculate_rent(&game, BALTIC).unwrap(), 450);
    }

    #[test]
    fn test_utility_rent() {
        let mut game = game();
        game.dice = Dice::new(3, 4);
        RulesEngine::buy_property(&mut game, ELECTRIC, P0).unwrap();
        assert_eq!(RulesEngine::calculate_rent(&game, ELECTRIC).unwrap(), 28);
        assert_eq!(
            RulesEngine::rent_due(&game, ELECTRIC, RentModifier::UtilityTimesTen),
            Ok(70)
        );

        RulesEngine::buy_property(&mut game, WATER, P0).unwrap();
        assert_eq!(RulesEngine::calculate_rent(&game, ELECTRIC).unwrap(), 70);
    }

    #[test]
    fn test_mortgaged_and_bank_rent_is_zero() {
        let mut game = game();
        assert_eq!(RulesEngine::calculate_rent(&game, BALTIC).unwrap(), 0);

        RulesEngine::buy_property(&mut game, BALTIC, P0).unwrap();
        game.property_mut(BALTIC).is_mortgaged = true;
        assert_eq!(RulesEngine::calculate_rent(&game, BALTIC).unwrap(), 0);
    }

    #[test]
    fn test_pay_rent() {
        let mut game = game();
        RulesEngine::buy_property(&mut game, READING, P0).unwrap();

        let outcome =
            RulesEngine::pay_rent(&mut game, READING, P1, RentModifier::DoubleRailroad).unwrap();
        assert_eq!(outcome, RentOutcome::Paid { to: P0, amount: 50 });
        assert_eq!(game.player(P1).money, 1450);
        assert_eq!(game.player(P0).money, 1350);

        assert_eq!(
            RulesEngine::pay_rent(&mut game, READING, P0, RentModifier::Standard),
            Ok(RentOutcome::NotDue)
        );
    }

    #[test]
    fn test_pay_rent_bankrupts_when_short() {
        let mut game = game();
        RulesEngine::buy_property(&mut game, READING, P0).unwrap();
        game.player_mut(P1).money = 10;

        let outcome =
            RulesEngine::pay_rent(&mut game, READING, P1, RentModifier::Standard).unwrap();
        assert_eq!(outcome, RentOutcome::Bankrupt { to: P0 });
        assert!(game.player(P1).is_bankrupt);
        assert_eq!(game.player(P1).money, 0);
        assert_eq!(game.player(P0).money, 1310);
        assert_eq!(game.active_players, 1);
        assert!(!game.running);
        assert_eq!(game.winner, Some(P0));
    }

    #[test]
    fn test_transfer_property() {
        let mut game = game();
        RulesEngine::buy_property(&mut game, BALTIC, P0).unwrap();
        game.property_mut(BALTIC).is_mortgaged = true;

        RulesEngine::transfer_property(&mut game, BALTIC, Owner::Player(P1)).unwrap();
        assert!(game.player(P0).properties.is_empty());
        assert_eq!(game.player(P1).properties, vec![BALTIC]);
        assert!(game.property(BALTIC).is_mortgaged);
        assert!(game.validate_invariants().is_ok());
    }

    #[test]
    fn test_net_worth_and_standings() {
        let mut game = game();
        RulesEngine::buy_property(&mut game, BALTIC, P0).unwrap();
        RulesEngine::buy_property(&mut game, READING, P0).unwrap();
        game.property_mut(READING).is_mortgaged = true;

        assert_eq!(RulesEngine::net_worth(&game, P0), Ok(1240 + 60 + 100));

        game.player_mut(P1).money = 2000;
        let standings = RulesEngine::standings(&game);
        assert_eq!(standings[0], (P1, 2000));
        assert_eq!(standings[1], (P0, 1400));
    }

    #[test]
    fn test_property_at() {
        let game = game();
        assert_eq!(RulesEngine::property_at(&game, 5), Some(READING));
        assert_eq!(RulesEngine::property_at(&game, 7), None);
    }

    #[test]
    fn test_unknown_ids_are_refused() {
        let mut game = game();
        let nowhere = PropertyId(40);
        let nobody = PlayerId::new(5);
        RulesEngine::buy_property(&mut game, READING, P0).unwrap();

        assert_eq!(
            RulesEngine::calculate_rent(&game, PropertyId(99)),
            Err(RulesError::UnknownProperty(PropertyId(99)))
        );
        assert_eq!(
            RulesEngine::rent_due(&game, nowhere, RentModifier::DoubleRailroad),
            Err(RulesError::UnknownProperty(nowhere))
        );
        assert_eq!(
            RulesEngine::pay_rent(&mut game, nowhere, P1, RentModifier::Standard),
            Err(RulesError::UnknownProperty(nowhere))
        );
        assert_eq!(
            RulesEngine::pay_rent(&mut game, READING, nobody, RentModifier::Standard),
            Err(RulesError::UnknownPlayer(nobody))
        );
        assert_eq!(
            RulesEngine::transfer_property(&mut game, READING, Owner::Player(nobody)),
            Err(RulesError::UnknownPlayer(nobody))
        );
        assert_eq!(
            RulesEngine::transfer_property(&mut game, nowhere, Owner::Bank),
            Err(RulesError::UnknownProperty(nowhere))
        );
        assert_eq!(RulesEngine::net_worth(&game, nobody), Err(RulesError::UnknownPlayer(nobody)));
        assert!(!RulesEngine::can_afford(&game, nobody, 0));

        assert_eq!(game.property(READING).owner, Owner::Player(P0));
        assert_eq!(game.player(P1).money, 1500);
        assert!(game.validate_invariants().is_ok());
    }
}
