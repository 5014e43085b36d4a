//! The 40 board squares.
//!
//! Corner, tax and card squares sit at fixed positions; every other
//! square is ownable and must be covered by exactly one property row.

use serde::{Deserialize, Serialize};

use super::property::{PropertyDefinition, PropertyId};

/// Number of squares around the board.
pub const BOARD_SIZE: u8 = 40;

pub const GO_POSITION: u8 = 0;
pub const JAIL_POSITION: u8 = 10;
pub const FREE_PARKING_POSITION: u8 = 20;
pub const GO_TO_JAIL_POSITION: u8 = 30;
pub const INCOME_TAX_POSITION: u8 = 4;
pub const LUXURY_TAX_POSITION: u8 = 38;
pub const CHANCE_POSITIONS: [u8; 3] = [7, 22, 36];
pub const COMMUNITY_CHEST_POSITIONS: [u8; 3] = [2, 17, 33];

/// What a board square does when landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SquareKind {
    Go,
    Property(PropertyId),
    Chance,
    CommunityChest,
    IncomeTax,
    LuxuryTax,
    /// Just visiting, or the cell itself when jailed.
    Jail,
    GoToJail,
    FreeParking,
}

impl SquareKind {
    /// Classify a fixed square, or `None` for an ownable position.
    #[must_use]
    pub fn fixed(position: u8) -> Option<SquareKind> {
        match position {
            GO_POSITION => Some(SquareKind::Go),
            JAIL_POSITION => Some(SquareKind::Jail),
            FREE_PARKING_POSITION => Some(SquareKind::FreeParking),
            GO_TO_JAIL_POSITION => Some(SquareKind::GoToJail),
            INCOME_TAX_POSITION => Some(SquareKind::IncomeTax),
            LUXURY_TAX_POSITION => Some(SquareKind::LuxuryTax),
            p if CHANCE_POSITIONS.contains(&p) => Some(SquareKind::Chance),
            p if COMMUNITY_CHEST_POSITIONS.contains(&p) => Some(SquareKind::CommunityChest),
            _ => None,
        }
    }

    /// Display name for non-property squares.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SquareKind::Go => "GO",
            SquareKind::Property(_) => "Property",
            SquareKind::Chance => "Chance",
            SquareKind::CommunityChest => "Community Chest",
            SquareKind::IncomeTax => "Income Tax",
            SquareKind::LuxuryTax => "Luxury Tax",
            SquareKind::Jail => "Jail",
            SquareKind::GoToJail => "Go To Jail",
            SquareKind::FreeParking => "Free Parking",
        }
    }
}

/// Lay out the board for a property table.
///
/// Fails if a row sits on a fixed square, two rows share a square, or an
/// ownable square is left uncovered.
pub fn layout_board(properties: &[PropertyDefinition]) -> Result<[SquareKind; 40], String> {
    let mut squares: [Option<SquareKind>; 40] = [None; 40];
    for pos in 0..BOARD_SIZE {
        squares[pos as usize] = SquareKind::fixed(pos);
    }

    for (idx, def) in properties.iter().enumerate() {
        if def.position >= BOARD_SIZE {
            return Err(format!("{} is off the board at {}", def.name, def.position));
        }
        let slot = &mut squares[def.position as usize];
        if slot.is_some() {
            return Err(format!(
                "{} at {} overlaps another square",
                def.name, def.position
            ));
        }
        *slot = Some(SquareKind::Property(PropertyId(idx as u8)));
    }

    let mut board = [SquareKind::Go; 40];
    for (pos, square) in squares.iter().enumerate() {
        board[pos] = square.ok_or_else(|| format!("square {pos} has no property"))?;
    }
    Ok(board)
}
