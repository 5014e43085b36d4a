//! Player identification, per-player storage and the player record.
//!
//! ## PlayerId
//!
//! Type-safe seat identifier. Seats are 0-based internally and shown
//! 1-based to people ("Player 1").
//!
//! ## PlayerMap
//!
//! Per-player storage backed by `Vec` for O(1) access, indexable by
//! `PlayerId`.
//!
//! ## Player
//!
//! Cash, board position, jail counter, piece, held jail cards and the
//! ordered list of owned properties. Players are never removed from the
//! map; elimination sets `is_bankrupt`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::ops::{Index, IndexMut};

use crate::board::PropertyId;
use crate::cards::DeckKind;

/// Amount of money. Cash never goes negative.
pub type Money = u32;

/// Capacity reserved for a player's owned-property list.
///
/// Larger than the 28 ownable squares so transient trade and sale offers
/// never reallocate.
pub const PROPERTY_LIST_CAPACITY: usize = 35;

/// Maximum number of seats at the table.
pub const MAX_PLAYERS: usize = 6;

/// Player identifier.
///
/// Player indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0 + 1)
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use monopoly_engine::core::{PlayerId, PlayerMap};
///
/// let mut cash: PlayerMap<u32> = PlayerMap::new(4, |_| 1500);
/// cash[PlayerId::new(1)] -= 200;
/// assert_eq!(cash[PlayerId::new(1)], 1300);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Whether `player` is a seat in this map.
    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        player.index() < self.data.len()
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// Playing piece shown on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Piece {
    Battleship,
    RaceCar,
    TopHat,
    Boot,
    Thimble,
    Iron,
}

impl Piece {
    /// All pieces, in default seat assignment order.
    pub const ALL: [Piece; MAX_PLAYERS] = [
        Piece::Battleship,
        Piece::RaceCar,
        Piece::TopHat,
        Piece::Boot,
        Piece::Thimble,
        Piece::Iron,
    ];
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Piece::Battleship => "Battleship",
            Piece::RaceCar => "Race Car",
            Piece::TopHat => "Top Hat",
            Piece::Boot => "Boot",
            Piece::Thimble => "Thimble",
            Piece::Iron => "Iron",
        };
        f.write_str(name)
    }
}

/// A seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Cash on hand.
    pub money: Money,
    /// Board square, 0-39.
    pub position: u8,
    /// 0 when free; otherwise 1 + failed escape attempts so far.
    pub jail_turns: u8,
    pub piece: Piece,
    /// Get Out of Jail Free cards held, tagged with the deck they belong to.
    pub jail_free_cards: SmallVec<[DeckKind; 2]>,
    pub is_bankrupt: bool,
    /// Owned properties in acquisition order.
    pub properties: Vec<PropertyId>,
}

impl Player {
    /// Create a player on GO with `money` cash.
    #[must_use]
    pub fn new(money: Money, piece: Piece) -> Self {
        Self {
            money,
            position: 0,
            jail_turns: 0,
            piece,
            jail_free_cards: SmallVec::new(),
            is_bankrupt: false,
            properties: Vec::with_capacity(PROPERTY_LIST_CAPACITY),
        }
    }

    #[must_use]
    pub fn is_in_jail(&self) -> bool {
        self.jail_turns > 0
    }

    #[must_use]
    pub fn has_jail_free_card(&self) -> bool {
        !self.jail_free_cards.is_empty()
    }

    #[must_use]
    pub fn owns(&self, property: PropertyId) -> bool {
        self.properties.contains(&property)
    }

    /// Remove `property` from the owned list, keeping the order of the rest.
    ///
    /// Returns `false` if it was not in the list.
    pub fn remove_property(&mut self, property: PropertyId) -> bool {
        match self.properties.iter().position(|&p| p == property) {
            Some(idx) => {
                self.properties.remove(idx);
                true
            }
            None => false,
        }
    }
}
