//! Houses and hotels.
//!
//! ## Even building
//!
//! A property's level is its house count, or 5 with a hotel. A house may
//! only go on a property tied for the lowest level in its colour group,
//! and a hotel only once every property in the group is at level 4 or
//! above. Selling runs the other way: only a property tied for the
//! highest level may sell a house.
//!
//! Building also needs the full colour set, no mortgage anywhere in the
//! group, the cash, and a building left in the bank's supply.

use crate::board::{Property, PropertyId};
use crate::core::{GameData, Money, PlayerId, RulesError};

use super::engine::RulesEngine;

/// Houses a hotel replaces.
pub const HOUSES_PER_HOTEL: u8 = 4;

impl RulesEngine {
    /// The property, if `player` is solvent and owns it and it is a street.
    fn owned_street(
        game: &GameData,
        property: PropertyId,
        player: PlayerId,
    ) -> Result<&Property, RulesError> {
        if game.check_player(player)?.is_bankrupt {
            return Err(RulesError::PlayerBankrupt(player));
        }
        let prop = game.check_property(property)?;
        if !prop.is_owned_by(player) {
            return Err(RulesError::NotOwner { player, property });
        }
        if !prop.is_street() {
            return Err(RulesError::NotAStreet(property));
        }
        Ok(prop)
    }

    fn check_group_buildable(
        game: &GameData,
        prop: &Property,
        property: PropertyId,
        player: PlayerId,
    ) -> Result<(), RulesError> {
        if prop.is_mortgaged {
            return Err(RulesError::Mortgaged(property));
        }
        if !Self::owns_color_set(game, player, prop.group) {
            return Err(RulesError::IncompleteColorSet(property));
        }
        if game
            .group_members(prop.group)
            .iter()
            .any(|&id| game.property(id).is_mortgaged)
        {
            return Err(RulesError::GroupMortgaged(property));
        }
        Ok(())
    }

    fn check_can_pay(game: &GameData, player: PlayerId, cost: Money) -> Result<(), RulesError> {
        let available = game.player(player).money;
        if available < cost {
            return Err(RulesError::InsufficientFunds { player, needed: cost, available });
        }
        Ok(())
    }

    fn group_levels(game: &GameData, prop: &Property) -> (u8, u8) {
        game.group_members(prop.group)
            .iter()
            .map(|&id| game.property(id).building_level())
            .fold((u8::MAX, 0), |(lo, hi), level| (lo.min(level), hi.max(level)))
    }

    /// Check a house may be built on `property` right now.
    pub fn can_build_house(
        game: &GameData,
        property: PropertyId,
        player: PlayerId,
    ) -> Result<(), RulesError> {
        let prop = Self::owned_street(game, property, player)?;
        Self::check_group_buildable(game, prop, property, player)?;
        if prop.has_hotel || prop.houses >= HOUSES_PER_HOTEL {
            return Err(RulesError::FullyDeveloped(property));
        }
        let (lowest, _) = Self::group_levels(game, prop);
        if prop.building_level() != lowest {
            return Err(RulesError::UnevenBuild(property));
        }
        if game.house_supply == 0 {
            return Err(RulesError::HouseSupplyExhausted);
        }
        Self::check_can_pay(game, player, prop.house_cost)
    }

    /// Build one house, paying the house cost.
    pub fn build_house(
        game: &mut GameData,
        property: PropertyId,
        player: PlayerId,
    ) -> Result<(), RulesError> {
        Self::can_build_house(game, property, player)?;

        let cost = game.property(property).house_cost;
        game.player_mut(player).money -= cost;
        game.property_mut(property).houses += 1;
        game.house_supply -= 1;
        log::debug!(
            "{player} built a house on {} ({} now)",
            game.property(property).name,
            game.property(property).houses
        );
        Ok(())
    }

    /// Check a hotel may be built on `property` right now.
    pub fn can_build_hotel(
        game: &GameData,
        property: PropertyId,
        player: PlayerId,
    ) -> Result<(), RulesError> {
        let prop = Self::owned_street(game, property, player)?;
        Self::check_group_buildable(game, prop, property, player)?;
        if prop.has_hotel {
            return Err(RulesError::FullyDeveloped(property));
        }
        if prop.houses < HOUSES_PER_HOTEL {
            return Err(RulesError::NeedsFourHouses(property));
        }
        let (lowest, _) = Self::group_levels(game, prop);
        if lowest < HOUSES_PER_HOTEL {
            return Err(RulesError::UnevenBuild(property));
        }
        if game.hotel_supply == 0 {
            return Err(RulesError::HotelSupplyExhausted);
        }
        Self::check_can_pay(game, player, prop.house_cost)
    }

    /// Trade four houses for a hotel, paying the house cost.
    pub fn build_hotel(
        game: &mut GameData,
        property: PropertyId,
        player: PlayerId,
    ) -> Result<(), RulesError> {
        Self::can_build_hotel(game, property, player)?;

        let cost = game.property(property).house_cost;
        game.player_mut(player).money -= cost;
        let prop = game.property_mut(property);
        prop.houses = 0;
        prop.has_hotel = true;
        game.house_supply += HOUSES_PER_HOTEL;
        game.hotel_supply -= 1;
        log::debug!("{player} built a hotel on {}", game.property(property).name);
        Ok(())
    }

    /// Check a house may be sold back from `property`.
    pub fn can_sell_house(
        game: &GameData,
        property: PropertyId,
        player: PlayerId,
    ) -> Result<(), RulesError> {
        let prop = Self::owned_street(game, property, player)?;
        if prop.houses == 0 {
            return Err(RulesError::NothingToSell(property));
        }
        let (_, highest) = Self::group_levels(game, prop);
        if prop.building_level() != highest {
            return Err(RulesError::UnevenSale(property));
        }
        Ok(())
    }

    /// Sell one house for half its cost. Returns the refund.
    pub fn sell_house(
        game: &mut GameData,
        property: PropertyId,
        player: PlayerId,
    ) -> Result<Money, RulesError> {
        Self::can_sell_house(game, property, player)?;

        let refund = game.property(property).house_cost / 2;
        game.property_mut(property).houses -= 1;
        game.house_supply += 1;
        game.player_mut(player).money += refund;
        log::debug!("{player} sold a house on {} for ${refund}", game.property(property).name);
        Ok(refund)
    }

    /// Check the hotel on `property` may be broken back down to four houses.
    pub fn can_sell_hotel(
        game: &GameData,
        property: PropertyId,
        player: PlayerId,
    ) -> Result<(), RulesError> {
        let prop = Self::owned_street(game, property, player)?;
        if !prop.has_hotel {
            return Err(RulesError::NothingToSell(property));
        }
        if game.house_supply < HOUSES_PER_HOTEL {
            return Err(RulesError::HouseSupplyExhausted);
        }
        Ok(())
    }

    /// Sell a hotel for half the house cost, putting four houses back.
    /// Returns the refund.
    pub fn sell_hotel(
        game: &mut GameData,
        property: PropertyId,
        player: PlayerId,
    ) -> Result<Money, RulesError> {
        Self::can_sell_hotel(game, property, player)?;

        let refund = game.property(property).house_cost / 2;
        let prop = game.property_mut(property);
        prop.has_hotel = false;
        prop.houses = HOUSES_PER_HOTEL;
        game.house_supply -= HOUSES_PER_HOTEL;
        game.hotel_supply += 1;
        game.player_mut(player).money += refund;
        log::debug!("{player} sold a hotel on {} for ${refund}", game.property(property).name);
        Ok(refund)
    }

    /// Houses and hotels `player` has standing, for repair assessments.
    #[must_use]
    pub fn count_buildings(game: &GameData, player: PlayerId) -> (u32, u32) {
        game.player(player)
            .properties
            .iter()
            .map(|&id| game.property(id))
            .fold((0, 0), |(houses, hotels), p| {
                (houses + u32::from(p.houses), hotels + u32::from(p.has_hotel))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::GameTables;
    use crate::core::{init_game, GameSettings};

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);
    const ORIENTAL: PropertyId = PropertyId(3);
    const VERMONT: PropertyId = PropertyId(4);
    const CONNECTICUT: PropertyId = PropertyId(5);

    /// Player 0 with the light blue set and plenty of cash.
    fn light_blue_game() -> GameData {
        let mut game =
            init_game(GameSettings::default().with_seed(8), GameTables::standard()).unwrap();
        game.player_mut(P0).money = 5000;
        for id in [ORIENTAL, VERMONT, CONNECTICUT] {
            RulesEngine::buy_property(&mut game, id, P0).unwrap();
        }
        game
    }

    #[test]
    fn test_build_requires_color_set() {
        let mut game =
            init_game(GameSettings::default().with_seed(8), GameTables::standard()).unwrap();
        RulesEngine::buy_property(&mut game, ORIENTAL, P0).unwrap();

        assert_eq!(
            RulesEngine::build_house(&mut game, ORIENTAL, P0),
            Err(RulesError::IncompleteColorSet(ORIENTAL))
        );
    }

    #[test]
    fn test_build_requires_ownership() {
        let mut game = light_blue_game();
        assert_eq!(
            RulesEngine::build_house(&mut game, ORIENTAL, P1),
            Err(RulesError::NotOwner { player: P1, property: ORIENTAL })
        );
    }

    #[test]
    fn test_even_build() {
        let mut game = light_blue_game();
        RulesEngine::build_house(&mut game, ORIENTAL, P0).unwrap();

        assert_eq!(
            RulesEngine::build_house(&mut game, ORIENTAL, P0),
            Err(RulesError::UnevenBuild(ORIENTAL))
        );
        RulesEngine::build_house(&mut game, VERMONT, P0).unwrap();
        RulesEngine::build_house(&mut game, CONNECTICUT, P0).unwrap();
        RulesEngine::build_house(&mut game, ORIENTAL, P0).unwrap();

        assert_eq!(game.property(ORIENTAL).houses, 2);
        assert_eq!(game.house_supply, 28);
        assert_eq!(game.player(P0).money, 5000 - 320 - 4 * 50);
    }

    #[test]
    fn test_build_blocked_by_group_mortgage() {
        let mut game = light_blue_game();
        game.property_mut(CONNECTICUT).is_mortgaged = true;

        assert_eq!(
            RulesEngine::build_house(&mut game, ORIENTAL, P0),
            Err(RulesError::GroupMortgaged(ORIENTAL))
        );
    }

    #[test]
    fn test_house_supply_cap() {
        let mut game = light_blue_game();
        game.house_supply = 0;
        game.settings.house_supply = 0;

        assert_eq!(
            RulesEngine::build_house(&mut game, ORIENTAL, P0),
            Err(RulesError::HouseSupplyExhausted)
        );
    }

    #[test]
    fn test_hotel_cycle() {
        let mut game = light_blue_game();
        for _ in 0..4 {
            for id in [ORIENTAL, VERMONT, CONNECTICUT] {
                RulesEngine::build_house(&mut game, id, P0).unwrap();
            }
        }
        assert_eq!(
            RulesEngine::build_house(&mut game, ORIENTAL, P0),
            Err(RulesError::FullyDeveloped(ORIENTAL))
        );

        RulesEngine::build_hotel(&mut game, ORIENTAL, P0).unwrap();
        assert!(game.property(ORIENTAL).has_hotel);
        assert_eq!(game.property(ORIENTAL).houses, 0);
        assert_eq!(game.house_supply, 32 - 12 + 4);
        assert_eq!(game.hotel_supply, 11);

        // Vermont is now below the hotel, so it cannot sell first.
        assert_eq!(
            RulesEngine::sell_house(&mut game, VERMONT, P0),
            Err(RulesError::UnevenSale(VERMONT))
        );

        let refund = RulesEngine::sell_hotel(&mut game, ORIENTAL, P0).unwrap();
        assert_eq!(refund, 25);
        assert_eq!(game.property(ORIENTAL).houses, 4);
        assert_eq!(game.house_supply, 20);
        assert_eq!(game.hotel_supply, 12);
        assert!(game.validate_invariants().is_ok());
    }

    #[test]
    fn test_hotel_needs_even_group() {
        let mut game = light_blue_game();
        for _ in 0..4 {
            for id in [ORIENTAL, VERMONT] {
                game.property_mut(id).houses += 1;
                game.house_supply -= 1;
            }
        }
        game.property_mut(CONNECTICUT).houses = 3;
        game.house_supply -= 3;

        assert_eq!(
            RulesEngine::build_hotel(&mut game, ORIENTAL, P0),
            Err(RulesError::UnevenBuild(ORIENTAL))
        );
        assert_eq!(
            RulesEngine::build_hotel(&mut game, CONNECTICUT, P0),
            Err(RulesError::NeedsFourHouses(CONNECTICUT))
        );
    }

    #[test]
    fn test_sell_house_refunds_half() {
        let mut game = light_blue_game();
        for id in [ORIENTAL, VERMONT, CONNECTICUT] {
            RulesEngine::build_house(&mut game, id, P0).unwrap();
        }
        RulesEngine::build_house(&mut game, VERMONT, P0).unwrap();

        assert_eq!(
            RulesEngine::sell_house(&mut game, ORIENTAL, P0),
            Err(RulesError::UnevenSale(ORIENTAL))
        );
        let before = game.player(P0).money;
        assert_eq!(RulesEngine::sell_house(&mut game, VERMONT, P0), Ok(25));
        assert_eq!(game.player(P0).money, before + 25);
    }

    #[test]
    fn test_sell_nothing() {
        let mut game = light_blue_game();
        assert_eq!(
            RulesEngine::sell_house(&mut game, ORIENTAL, P0),
            Err(RulesError::NothingToSell(ORIENTAL))
        );
        assert_eq!(
            RulesEngine::sell_hotel(&mut game, ORIENTAL, P0),
            Err(RulesError::NothingToSell(ORIENTAL))
        );
    }

    #[test]
    fn test_count_buildings() {
        let mut game = light_blue_game();
        game.property_mut(ORIENTAL).has_hotel = true;
        game.property_mut(VERMONT).houses = 3;
        assert_eq!(RulesEngine::count_buildings(&game, P0), (3, 1));
    }
}
