//! Card effects.
//!
//! - `CardResolver`: executes a drawn Chance or Community Chest card
//! - `CardOutcome`: what the turn flow must do next (resolve a new
//!   square, end the turn in jail, handle a bankruptcy)

mod resolver;

pub use resolver::{CardOutcome, CardResolver};
