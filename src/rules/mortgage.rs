//! Mortgaging and lifting mortgages.

use crate::board::{Property, PropertyId};
use crate::core::{GameData, Money, PlayerId, RulesError};

use super::engine::RulesEngine;

impl RulesEngine {
    /// Cost to lift the mortgage: the mortgage value plus 10%, rounded down.
    #[must_use]
    pub fn unmortgage_cost(prop: &Property) -> Money {
        prop.mortgage_value + prop.mortgage_value / 10
    }

    fn owned_by(
        game: &GameData,
        property: PropertyId,
        player: PlayerId,
    ) -> Result<(), RulesError> {
        if game.check_player(player)?.is_bankrupt {
            return Err(RulesError::PlayerBankrupt(player));
        }
        if !game.check_property(property)?.is_owned_by(player) {
            return Err(RulesError::NotOwner { player, property });
        }
        Ok(())
    }

    /// Mortgage an unimproved property for half its price.
    /// Returns the amount credited.
    pub fn mortgage(
        game: &mut GameData,
        property: PropertyId,
        player: PlayerId,
    ) -> Result<Money, RulesError> {
        Self::owned_by(game, property, player)?;
        let prop = game.property(property);
        if prop.is_mortgaged {
            return Err(RulesError::Mortgaged(property));
        }
        if prop.has_buildings() {
            return Err(RulesError::HasBuildings(property));
        }

        let credit = prop.price / 2;
        game.property_mut(property).is_mortgaged = true;
        game.player_mut(player).money += credit;
        log::debug!("{player} mortgaged {} for ${credit}", game.property(property).name);
        Ok(credit)
    }

    /// Lift a mortgage. Returns the amount paid.
    pub fn unmortgage(
        game: &mut GameData,
        property: PropertyId,
        player: PlayerId,
    ) -> Result<Money, RulesError> {
        Self::owned_by(game, property, player)?;
        let prop = game.property(property);
        if !prop.is_mortgaged {
            return Err(RulesError::NotMortgaged(property));
        }
        let cost = Self::unmortgage_cost(prop);
        let available = game.player(player).money;
        if available < cost {
            return Err(RulesError::InsufficientFunds { player, needed: cost, available });
        }

        game.player_mut(player).money -= cost;
        game.property_mut(property).is_mortgaged = false;
        log::debug!("{player} unmortgaged {} for ${cost}", game.property(property).name);
        Ok(cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::GameTables;
    use crate::core::{init_game, GameSettings};

    const P0: PlayerId = PlayerId::new(0);
    const BALTIC: PropertyId = PropertyId(1);
    const CONNECTICUT: PropertyId = PropertyId(5);

    fn game() -> GameData {
        let mut game =
            init_game(GameSettings::default().with_seed(3), GameTables::standard()).unwrap();
        RulesEngine::buy_property(&mut game, BALTIC, P0).unwrap();
        RulesEngine::buy_property(&mut game, CONNECTICUT, P0).unwrap();
        game
    }

    #[test]
    fn test_mortgage_round_trip() {
        let mut game = game();
        let start = game.player(P0).money;

        assert_eq!(RulesEngine::mortgage(&mut game, BALTIC, P0), Ok(30));
        assert_eq!(game.player(P0).money, start + 30);
        assert_eq!(
            RulesEngine::mortgage(&mut game, BALTIC, P0),
            Err(RulesError::Mortgaged(BALTIC))
        );

        assert_eq!(RulesEngine::unmortgage(&mut game, BALTIC, P0), Ok(33));
        assert_eq!(game.player(P0).money, start - 3);
        assert!(!game.property(BALTIC).is_mortgaged);
    }

    #[test]
    fn test_unmortgage_cost_rounds_down() {
        let game = game();
        // 120 / 2 = 60, plus 6.
        assert_eq!(RulesEngine::unmortgage_cost(game.property(CONNECTICUT)), 66);

        let mut odd = game.property(BALTIC).clone();
        odd.mortgage_value = 75;
        assert_eq!(RulesEngine::unmortgage_cost(&odd), 82);
    }

    #[test]
    fn test_mortgage_rejects_buildings() {
        let mut game = game();
        game.property_mut(BALTIC).houses = 1;
        game.house_supply -= 1;

        assert_eq!(
            RulesEngine::mortgage(&mut game, BALTIC, P0),
            Err(RulesError::HasBuildings(BALTIC))
        );
    }

    #[test]
    fn test_unmortgage_needs_cash() {
        let mut game = game();
        RulesEngine::mortgage(&mut game, BALTIC, P0).unwrap();
        game.player_mut(P0).money = 32;

        assert!(matches!(
            RulesEngine::unmortgage(&mut game, BALTIC, P0),
            Err(RulesError::InsufficientFunds { needed: 33, available: 32, .. })
        ));
        assert!(game.property(BALTIC).is_mortgaged);
    }

    #[test]
    fn test_not_owner() {
        let mut game = game();
        let other = PlayerId::new(1);
        assert_eq!(
            RulesEngine::mortgage(&mut game, BALTIC, other),
            Err(RulesError::NotOwner { player: other, property: BALTIC })
        );
        assert_eq!(
            RulesEngine::unmortgage(&mut game, BALTIC, P0),
            Err(RulesError::NotMortgaged(BALTIC))
        );
    }
}
