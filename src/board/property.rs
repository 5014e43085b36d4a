//! Ownable squares: streets, railroads and utilities.
//!
//! A [`PropertyDefinition`] is the static table row; a [`Property`] is the
//! live record with owner, buildings and mortgage flag.

use serde::{Deserialize, Serialize};

use crate::core::{Money, PlayerId};

/// Index into the property table (0-27 on the standard board).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PropertyId(pub u8);

impl PropertyId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PropertyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyKind {
    Street,
    Railroad,
    Utility,
}

/// Colour group. Railroads and utilities form their own groups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorGroup {
    Brown,
    LightBlue,
    Pink,
    Orange,
    Red,
    Yellow,
    Green,
    DarkBlue,
    Railroad,
    Utility,
}

impl std::fmt::Display for ColorGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ColorGroup::Brown => "Brown",
            ColorGroup::LightBlue => "Light Blue",
            ColorGroup::Pink => "Pink",
            ColorGroup::Orange => "Orange",
            ColorGroup::Red => "Red",
            ColorGroup::Yellow => "Yellow",
            ColorGroup::Green => "Green",
            ColorGroup::DarkBlue => "Dark Blue",
            ColorGroup::Railroad => "Railroads",
            ColorGroup::Utility => "Utilities",
        };
        f.write_str(name)
    }
}

/// Who holds a property. `Bank` means unowned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    #[default]
    Bank,
    Player(PlayerId),
}

impl Owner {
    #[must_use]
    pub fn player(self) -> Option<PlayerId> {
        match self {
            Owner::Bank => None,
            Owner::Player(p) => Some(p),
        }
    }
}

/// Static table row for one ownable square.
///
/// `rent` is the six-step ladder for streets (unimproved, 1-4 houses,
/// hotel). Railroads use `rent[0]` as the one-railroad rent; utilities
/// ignore it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDefinition {
    pub name: String,
    pub kind: PropertyKind,
    pub group: ColorGroup,
    pub position: u8,
    pub price: Money,
    #[serde(default)]
    pub house_cost: Money,
    #[serde(default)]
    pub rent: [Money; 6],
}

impl PropertyDefinition {
    /// A street with its rent ladder and house cost.
    pub fn street(
        name: impl Into<String>,
        group: ColorGroup,
        position: u8,
        price: Money,
        house_cost: Money,
        rent: [Money; 6],
    ) -> Self {
        Self {
            name: name.into(),
            kind: PropertyKind::Street,
            group,
            position,
            price,
            house_cost,
            rent,
        }
    }

    pub fn railroad(name: impl Into<String>, position: u8, price: Money, base_rent: Money) -> Self {
        Self {
            name: name.into(),
            kind: PropertyKind::Railroad,
            group: ColorGroup::Railroad,
            position,
            price,
            house_cost: 0,
            rent: [base_rent, 0, 0, 0, 0, 0],
        }
    }

    pub fn utility(name: impl Into<String>, position: u8, price: Money) -> Self {
        Self {
            name: name.into(),
            kind: PropertyKind::Utility,
            group: ColorGroup::Utility,
            position,
            price,
            house_cost: 0,
            rent: [0; 6],
        }
    }
}

/// Live state of an ownable square.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub kind: PropertyKind,
    pub group: ColorGroup,
    pub position: u8,
    pub price: Money,
    pub mortgage_value: Money,
    /// Cost of one house; a hotel costs the same.
    pub house_cost: Money,
    pub rent_base: Money,
    /// Unimproved rent with the full colour set.
    pub rent_monopoly: Money,
    pub rent_ladder: [Money; 6],
    pub houses: u8,
    pub has_hotel: bool,
    pub owner: Owner,
    pub is_mortgaged: bool,
}

impl Property {
    /// Build the live record for a table row, owned by the bank.
    #[must_use]
    pub fn from_definition(def: &PropertyDefinition) -> Self {
        Self {
            name: def.name.clone(),
            kind: def.kind,
            group: def.group,
            position: def.position,
            price: def.price,
            mortgage_value: def.price / 2,
            house_cost: def.house_cost,
            rent_base: def.rent[0],
            rent_monopoly: def.rent[0] * 2,
            rent_ladder: def.rent,
            houses: 0,
            has_hotel: false,
            owner: Owner::Bank,
            is_mortgaged: false,
        }
    }

    #[must_use]
    pub fn is_street(&self) -> bool {
        self.kind == PropertyKind::Street
    }

    /// 0-4 houses, 5 for a hotel.
    #[must_use]
    pub fn building_level(&self) -> u8 {
        if self.has_hotel {
            5
        } else {
            self.houses
        }
    }

    #[must_use]
    pub fn has_buildings(&self) -> bool {
        self.houses > 0 || self.has_hotel
    }

    #[must_use]
    pub fn is_owned_by(&self, player: PlayerId) -> bool {
        self.owner == Owner::Player(player)
    }

    /// Return the property to the bank, cleared of buildings and mortgage.
    pub fn reset(&mut self) {
        self.owner = Owner::Bank;
        self.houses = 0;
        self.has_hotel = false;
        self.is_mortgaged = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_definition_derives_values() {
        let def = PropertyDefinition::street(
            "Baltic Avenue",
            ColorGroup::Brown,
            3,
            60,
            50,
            [4, 20, 60, 180, 320, 450],
        );
        let prop = Property::from_definition(&def);

        assert_eq!(prop.mortgage_value, 30);
        assert_eq!(prop.rent_base, 4);
        assert_eq!(prop.rent_monopoly, 8);
        assert_eq!(prop.owner, Owner::Bank);
        assert!(prop.is_street());
    }

    #[test]
    fn test_building_level() {
        let def = PropertyDefinition::street("X", ColorGroup::Red, 21, 220, 150, [18; 6]);
        let mut prop = Property::from_definition(&def);

        prop.houses = 3;
        assert_eq!(prop.building_level(), 3);
        prop.houses = 0;
        prop.has_hotel = true;
        assert_eq!(prop.building_level(), 5);
        assert!(prop.has_buildings());
    }

    #[test]
    fn test_reset() {
        let def = PropertyDefinition::railroad("Reading Railroad", 5, 200, 25);
        let mut prop = Property::from_definition(&def);
        prop.owner = Owner::Player(PlayerId::new(1));
        prop.is_mortgaged = true;

        prop.reset();
        assert_eq!(prop.owner, Owner::Bank);
        assert!(!prop.is_mortgaged);
        assert_eq!(prop.owner.player(), None);
    }
}
