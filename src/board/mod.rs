//! Board layout and property data.
//!
//! - `property`: property ids, kinds, colour groups, owner and live record
//! - `square`: the 40 squares and their classification
//! - `tables`: the static tables handed to `init_game`

pub mod property;
pub mod square;
pub mod tables;

pub use property::{ColorGroup, Owner, Property, PropertyDefinition, PropertyId, PropertyKind};
pub use square::{
    layout_board, SquareKind, BOARD_SIZE, CHANCE_POSITIONS, COMMUNITY_CHEST_POSITIONS,
    FREE_PARKING_POSITION, GO_POSITION, GO_TO_JAIL_POSITION, INCOME_TAX_POSITION,
    JAIL_POSITION, LUXURY_TAX_POSITION,
};
pub use tables::{standard_properties, GameTables, PROPERTY_COUNT};
