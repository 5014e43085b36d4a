//! Static tables: the property list and both card decks.
//!
//! `GameTables` is the already-parsed data a front end hands to
//! `init_game`. Loading it from disk is the caller's business; it derives
//! serde so any format works.

use serde::{Deserialize, Serialize};

use super::property::{ColorGroup, PropertyDefinition, PropertyKind};
use super::square::layout_board;
use crate::cards::{standard_chance, standard_community_chest, Card, CardEffect, DECK_SIZE};
use crate::core::GameError;

/// Number of ownable squares on the board.
pub const PROPERTY_COUNT: usize = 28;

/// Property and card tables for one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameTables {
    pub properties: Vec<PropertyDefinition>,
    pub chance: Vec<Card>,
    pub community_chest: Vec<Card>,
}

impl GameTables {
    /// The classic US board and decks.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            properties: standard_properties(),
            chance: standard_chance(),
            community_chest: standard_community_chest(),
        }
    }

    /// Check the tables can be laid out and drawn from.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.properties.len() != PROPERTY_COUNT {
            return Err(GameError::InvalidTables(format!(
                "expected {PROPERTY_COUNT} properties, got {}",
                self.properties.len()
            )));
        }
        layout_board(&self.properties).map_err(GameError::InvalidTables)?;

        for def in &self.properties {
            let group_ok = match def.kind {
                PropertyKind::Street => {
                    !matches!(def.group, ColorGroup::Railroad | ColorGroup::Utility)
                }
                PropertyKind::Railroad => def.group == ColorGroup::Railroad,
                PropertyKind::Utility => def.group == ColorGroup::Utility,
            };
            if !group_ok {
                return Err(GameError::InvalidTables(format!(
                    "{} has kind {:?} but group {:?}",
                    def.name, def.kind, def.group
                )));
            }
        }

        validate_deck("chance", &self.chance)?;
        validate_deck("community chest", &self.community_chest)?;
        Ok(())
    }
}

fn validate_deck(name: &str, cards: &[Card]) -> Result<(), GameError> {
    if cards.len() != DECK_SIZE {
        return Err(GameError::InvalidTables(format!(
            "{name} deck needs {DECK_SIZE} cards, got {}",
            cards.len()
        )));
    }
    let mut ids: Vec<u8> = cards.iter().map(|c| c.id).collect();
    ids.sort_unstable();
    ids.dedup();
    if ids.len() != cards.len() {
        return Err(GameError::InvalidTables(format!("{name} deck has duplicate card ids")));
    }
    let jail_cards = cards
        .iter()
        .filter(|c| c.effect == CardEffect::GetOutOfJailFree)
        .count();
    if jail_cards > 1 {
        return Err(GameError::InvalidTables(format!(
            "{name} deck has {jail_cards} Get Out of Jail Free cards"
        )));
    }
    Ok(())
}

/// The 28 properties of the US board, in board order.
#[must_use]
pub fn standard_properties() -> Vec<PropertyDefinition> {
    use ColorGroup::*;
    type Def = PropertyDefinition;

    vec![
        Def::street("Mediterranean Avenue", Brown, 1, 60, 50, [2, 10, 30, 90, 160, 250]),
        Def::street("Baltic Avenue", Brown, 3, 60, 50, [4, 20, 60, 180, 320, 450]),
        Def::railroad("Reading Railroad", 5, 200, 25),
        Def::street("Oriental Avenue", LightBlue, 6, 100, 50, [6, 30, 90, 270, 400, 550]),
        Def::street("Vermont Avenue", LightBlue, 8, 100, 50, [6, 30, 90, 270, 400, 550]),
        Def::street("Connecticut Avenue", LightBlue, 9, 120, 50, [8, 40, 100, 300, 450, 600]),
        Def::street("St. Charles Place", Pink, 11, 140, 100, [10, 50, 150, 450, 625, 750]),
        Def::utility("Electric Company", 12, 150),
        Def::street("States Avenue", Pink, 13, 140, 100, [10, 50, 150, 450, 625, 750]),
        Def::street("Virginia Avenue", Pink, 14, 160, 100, [12, 60, 180, 500, 700, 900]),
        Def::railroad("Pennsylvania Railroad", 15, 200, 25),
        Def::street("St. James Place", Orange, 16, 180, 100, [14, 70, 200, 550, 750, 950]),
        Def::street("Tennessee Avenue", Orange, 18, 180, 100, [14, 70, 200, 550, 750, 950]),
        Def::street("New York Avenue", Orange, 19, 200, 100, [16, 80, 220, 600, 800, 1000]),
        Def::street("Kentucky Avenue", Red, 21, 220, 150, [18, 90, 250, 700, 875, 1050]),
        Def::street("Indiana Avenue", Red, 23, 220, 150, [18, 90, 250, 700, 875, 1050]),
        Def::street("Illinois Avenue", Red, 24, 240, 150, [20, 100, 300, 750, 925, 1100]),
        Def::railroad("B. & O. Railroad", 25, 200, 25),
        Def::street("Atlantic Avenue", Yellow, 26, 260, 150, [22, 110, 330, 800, 975, 1150]),
        Def::street("Ventnor Avenue", Yellow, 27, 260, 150, [22, 110, 330, 800, 975, 1150]),
        Def::utility("Water Works", 28, 150),
        Def::street("Marvin Gardens", Yellow, 29, 280, 150, [24, 120, 360, 850, 1025, 1200]),
        Def::street("Pacific Avenue", Green, 31, 300, 200, [26, 130, 390, 900, 1100, 1275]),
        Def::street("North Carolina Avenue", Green, 32, 300, 200, [26, 130, 390, 900, 1100, 1275]),
        Def::street("Pennsylvania Avenue", Green, 34, 320, 200, [28, 150, 450, 1000, 1200, 1400]),
        Def::railroad("Short Line", 35, 200, 25),
        Def::street("Park Place", DarkBlue, 37, 350, 200, [35, 175, 500, 1100, 1300, 1500]),
        Def::street("Boardwalk", DarkBlue, 39, 400, 200, [50, 200, 600, 1400, 1700, 2000]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_tables_validate() {
        assert!(GameTables::standard().validate().is_ok());
    }

    #[test]
    fn test_standard_group_sizes() {
        let props = standard_properties();
        let count = |g: ColorGroup| props.iter().filter(|p| p.group == g).count();

        assert_eq!(count(ColorGroup::Brown), 2);
        assert_eq!(count(ColorGroup::LightBlue), 3);
        assert_eq!(count(ColorGroup::Railroad), 4);
        assert_eq!(count(ColorGroup::Utility), 2);
        assert_eq!(count(ColorGroup::DarkBlue), 2);
    }

    #[test]
    fn test_rejects_short_deck() {
        let mut tables = GameTables::standard();
        tables.chance.pop();
        assert!(matches!(tables.validate(), Err(GameError::InvalidTables(_))));
    }

    #[test]
    fn test_rejects_duplicate_card_ids() {
        let mut tables = GameTables::standard();
        tables.community_chest[1].id = tables.community_chest[0].id;
        assert!(tables.validate().is_err());
    }

    #[test]
    fn test_rejects_mismatched_group() {
        let mut tables = GameTables::standard();
        tables.properties[2].group = ColorGroup::Brown;
        assert!(tables.validate().is_err());
    }

    #[test]
    fn test_tables_json_round_trip() {
        let tables = GameTables::standard();
        let json = serde_json::to_string(&tables).unwrap();
        let restored: GameTables = serde_json::from_str(&json).unwrap();
        assert_eq!(tables, restored);
    }
}
