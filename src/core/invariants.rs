//! Consistency checks over `GameData`, run after every phase step.

use super::error::InvariantViolation;
use super::state::GameData;
use crate::board::{Owner, PropertyId};

impl GameData {
    /// Return the first broken invariant, if any.
    ///
    /// Checks building state per property, owner/owned-list agreement in
    /// both directions, the active player count and the building supply.
    pub fn validate_invariants(&self) -> Result<(), InvariantViolation> {
        let mut houses_out: u32 = 0;
        let mut hotels_out: u32 = 0;

        for (idx, prop) in self.properties.iter().enumerate() {
            let id = PropertyId(idx as u8);
            if prop.is_mortgaged && prop.has_buildings() {
                return Err(InvariantViolation::MortgagedWithBuildings(id));
            }
            if prop.has_hotel && prop.houses > 0 {
                return Err(InvariantViolation::HotelWithHouses(id));
            }
            if prop.houses > 4 {
                return Err(InvariantViolation::TooManyHouses(id));
            }
            if !prop.is_street() && prop.has_buildings() {
                return Err(InvariantViolation::BuildingsOnNonStreet(id));
            }
            if let Owner::Player(owner) = prop.owner {
                if !self.players.contains(owner) || !self.player(owner).owns(id) {
                    return Err(InvariantViolation::OwnerListMismatch { property: id, owner });
                }
            }
            houses_out += u32::from(prop.houses);
            hotels_out += u32::from(prop.has_hotel);
        }

        for (player, data) in self.players.iter() {
            for &property in &data.properties {
                let owned = self
                    .properties
                    .get(property.index())
                    .is_some_and(|p| p.is_owned_by(player));
                if !owned {
                    return Err(InvariantViolation::StaleOwnedEntry { player, property });
                }
            }
        }

        let actual = self.players.iter().filter(|(_, p)| !p.is_bankrupt).count();
        if actual != self.active_players {
            return Err(InvariantViolation::ActiveCountMismatch {
                recorded: self.active_players,
                actual,
            });
        }

        if houses_out + u32::from(self.house_supply) != u32::from(self.settings.house_supply) {
            return Err(InvariantViolation::SupplyMismatch("houses"));
        }
        if hotels_out + u32::from(self.hotel_supply) != u32::from(self.settings.hotel_supply) {
            return Err(InvariantViolation::SupplyMismatch("hotels"));
        }
        Ok(())
    }
}
