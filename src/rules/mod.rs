//! Game rules over `GameData`.
//!
//! - `RulesEngine`: purchase, rent, building, mortgages, trades, valuation
//! - `BankruptcyResolver`: forced payments, liquidation, elimination
//! - `TurnSequencer`: turn order, dice, movement, jail

pub mod bankruptcy;
pub mod building;
pub mod engine;
pub mod mortgage;
pub mod trade;
pub mod turn;

pub use bankruptcy::{BankruptcyResolver, Creditor, Payment};
pub use building::HOUSES_PER_HOTEL;
pub use engine::{
    RentModifier, RentOutcome, RulesEngine, UTILITY_SET_MULTIPLIER, UTILITY_SINGLE_MULTIPLIER,
};
pub use trade::TradeOffer;
pub use turn::TurnSequencer;
