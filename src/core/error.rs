//! Error types.
//!
//! ## Tiers
//!
//! - [`RulesError`]: a request the rules refuse (not enough cash, uneven
//!   build, ...). State is untouched and the player is asked again.
//! - Financial failure is not an error. Forced payments go through
//!   liquidation and, if that fails, bankruptcy.
//! - [`InvariantViolation`]: the engine reached a state that should be
//!   impossible. Surfaced to the driver instead of being ignored.
//!
//! [`GameError`] wraps both for the top-level entry points.

use thiserror::Error;

use crate::board::PropertyId;
use crate::core::player::{Money, Piece, PlayerId};

/// A rules operation was refused. No state was changed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("{player} needs ${needed} but has ${available}")]
    InsufficientFunds {
        player: PlayerId,
        needed: Money,
        available: Money,
    },
    #[error("property {0} is already owned")]
    AlreadyOwned(PropertyId),
    #[error("{player} does not own property {property}")]
    NotOwner { player: PlayerId, property: PropertyId },
    #[error("property {0} is mortgaged")]
    Mortgaged(PropertyId),
    #[error("property {0} is not mortgaged")]
    NotMortgaged(PropertyId),
    #[error("property {0} has buildings")]
    HasBuildings(PropertyId),
    #[error("property {0} is not a street")]
    NotAStreet(PropertyId),
    #[error("property {0} is not of the requested kind")]
    WrongPropertyKind(PropertyId),
    #[error("the colour set of property {0} is not complete")]
    IncompleteColorSet(PropertyId),
    #[error("a property in the colour group of {0} is mortgaged")]
    GroupMortgaged(PropertyId),
    #[error("building on property {0} would break even building")]
    UnevenBuild(PropertyId),
    #[error("selling from property {0} would break even building")]
    UnevenSale(PropertyId),
    #[error("the bank has no houses left")]
    HouseSupplyExhausted,
    #[error("the bank has no hotels left")]
    HotelSupplyExhausted,
    #[error("property {0} cannot be developed further")]
    FullyDeveloped(PropertyId),
    #[error("property {0} needs four houses first")]
    NeedsFourHouses(PropertyId),
    #[error("property {0} has nothing to sell")]
    NothingToSell(PropertyId),
    #[error("{0} has no Get Out of Jail Free card")]
    NoJailFreeCard(PlayerId),
    #[error("{0} is not in jail")]
    NotInJail(PlayerId),
    #[error("{0} is bankrupt")]
    PlayerBankrupt(PlayerId),
    #[error("no such player: {0}")]
    UnknownPlayer(PlayerId),
    #[error("no such property: {0}")]
    UnknownProperty(PropertyId),
    #[error("property {0} cannot be traded while its colour group has buildings")]
    Untradable(PropertyId),
    #[error("a player cannot trade with themselves")]
    SelfTrade,
    #[error("the trade is empty")]
    EmptyTrade,
    #[error("the {0} is already taken")]
    PieceTaken(Piece),
}

/// The engine reached a state its own rules should have prevented.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("phase stack overflow (depth {0})")]
    PhaseStackOverflow(usize),
    #[error("no active phase")]
    NoActivePhase,
    #[error("landing on square {0} was already resolved")]
    SquareAlreadyResolved(u8),
    #[error("property {property} lists owner {owner} but is missing from their list")]
    OwnerListMismatch { property: PropertyId, owner: PlayerId },
    #[error("{player} lists property {property} they do not own")]
    StaleOwnedEntry { player: PlayerId, property: PropertyId },
    #[error("mortgaged property {0} has buildings")]
    MortgagedWithBuildings(PropertyId),
    #[error("property {0} has a hotel and houses")]
    HotelWithHouses(PropertyId),
    #[error("property {0} has more than four houses")]
    TooManyHouses(PropertyId),
    #[error("non-street property {0} has buildings")]
    BuildingsOnNonStreet(PropertyId),
    #[error("active player count {recorded} does not match {actual} solvent players")]
    ActiveCountMismatch { recorded: usize, actual: usize },
    #[error("building supply does not add up: {0}")]
    SupplyMismatch(&'static str),
    #[error("{player} acted on property {property} they do not own")]
    ActedOnForeignProperty { player: PlayerId, property: PropertyId },
    #[error("pre-validated rules call was refused: {0}")]
    UnexpectedRejection(RulesError),
}

/// Top-level error from the engine entry points.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[error("invalid tables: {0}")]
    InvalidTables(String),
    #[error(transparent)]
    Rules(#[from] RulesError),
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}
