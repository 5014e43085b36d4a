//! Game settings.
//!
//! A front end builds a `GameSettings` (defaults follow the US rules) and
//! hands it to `init_game` together with the static tables.
//!
//! ```
//! use monopoly_engine::core::GameSettings;
//!
//! let settings = GameSettings::default()
//!     .with_player_count(4)
//!     .with_starting_money(2000)
//!     .with_seed(7);
//! assert!(settings.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use super::error::GameError;
use super::player::{Money, MAX_PLAYERS};

/// Fewest players a game can start with.
pub const MIN_PLAYERS: usize = 2;

/// Table rules and startup parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Cash each player starts with.
    pub starting_money: Money,

    /// Fine to leave jail.
    pub jail_fine: Money,

    /// Number of seats (2-6).
    pub player_count: usize,

    /// RNG seed. `None` picks a fresh one.
    pub seed: Option<u64>,

    /// Salary for passing or landing on GO.
    pub go_salary: Money,

    pub income_tax: Money,
    pub luxury_tax: Money,

    /// Houses in the bank at the start.
    pub house_supply: u8,

    /// Hotels in the bank at the start.
    pub hotel_supply: u8,

    /// Escape rolls allowed before the fine is forced.
    pub max_jail_attempts: u8,

    /// How long a notification stays up.
    pub notification_seconds: f32,

    /// Whether rolling doubles (outside jail) grants another roll.
    pub doubles_grant_extra_turn: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            starting_money: 1500,
            jail_fine: 50,
            player_count: 2,
            seed: None,
            go_salary: 200,
            income_tax: 200,
            luxury_tax: 100,
            house_supply: 32,
            hotel_supply: 12,
            max_jail_attempts: 3,
            notification_seconds: 3.0,
            doubles_grant_extra_turn: true,
        }
    }
}

impl GameSettings {
    #[must_use]
    pub fn with_player_count(mut self, player_count: usize) -> Self {
        self.player_count = player_count;
        self
    }

    #[must_use]
    pub fn with_starting_money(mut self, money: Money) -> Self {
        self.starting_money = money;
        self
    }

    #[must_use]
    pub fn with_jail_fine(mut self, fine: Money) -> Self {
        self.jail_fine = fine;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_building_supply(mut self, houses: u8, hotels: u8) -> Self {
        self.house_supply = houses;
        self.hotel_supply = hotels;
        self
    }

    #[must_use]
    pub fn with_doubles_extra_turn(mut self, enabled: bool) -> Self {
        self.doubles_grant_extra_turn = enabled;
        self
    }

    /// Check the settings describe a playable game.
    pub fn validate(&self) -> Result<(), GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(GameError::InvalidSettings(format!(
                "player_count must be between {MIN_PLAYERS} and {MAX_PLAYERS}, got {}",
                self.player_count
            )));
        }
        if self.max_jail_attempts == 0 {
            return Err(GameError::InvalidSettings(
                "max_jail_attempts must be at least 1".to_string(),
            ));
        }
        if self.notification_seconds.is_nan() || self.notification_seconds <= 0.0 {
            return Err(GameError::InvalidSettings(
                "notification_seconds must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
