//! A roll of two six-sided dice.

use serde::{Deserialize, Serialize};

/// Result of rolling both dice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dice {
    pub die1: u8,
    pub die2: u8,
}

impl Dice {
    #[must_use]
    pub const fn new(die1: u8, die2: u8) -> Self {
        Self { die1, die2 }
    }

    #[must_use]
    pub const fn sum(self) -> u8 {
        self.die1 + self.die2
    }

    #[must_use]
    pub const fn is_double(self) -> bool {
        self.die1 == self.die2
    }

    /// Whether both faces are in 1..=6.
    #[must_use]
    pub fn is_valid(self) -> bool {
        (1..=6).contains(&self.die1) && (1..=6).contains(&self.die2)
    }
}

impl Default for Dice {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl std::fmt::Display for Dice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} + {} = {}", self.die1, self.die2, self.sum())
    }
}
