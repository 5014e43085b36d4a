//! Turn order, dice and movement.

use crate::board::{BOARD_SIZE, GO_POSITION, JAIL_POSITION};
use crate::cards::DeckKind;
use crate::core::{Dice, GameData, PlayerId, RulesError};

/// Whose turn it is and how pieces move.
pub struct TurnSequencer;

impl TurnSequencer {
    /// Pass the turn to the next solvent player.
    ///
    /// Wrapping back to seat 0 starts a new round. If a full cycle finds
    /// nobody solvent the game stops and `None` is returned.
    pub fn advance_turn(game: &mut GameData) -> Option<PlayerId> {
        let count = game.player_count();
        let mut idx = game.current_player.index();

        for _ in 0..count {
            idx = (idx + 1) % count;
            if idx == 0 {
                game.round += 1;
            }
            let next = PlayerId::new(idx as u8);
            if !game.player(next).is_bankrupt {
                game.current_player = next;
                log::debug!("turn passes to {next} (round {})", game.round);
                return Some(next);
            }
        }

        game.running = false;
        log::warn!("no solvent players left to take a turn");
        None
    }

    /// Roll both dice and record the result.
    pub fn roll_dice(game: &mut GameData) -> Dice {
        let dice = game.roll();
        log::debug!("{} rolled {dice}", game.current_player);
        dice
    }

    /// Move forward `steps` squares, collecting GO salary on wrapping.
    ///
    /// Returns `true` if GO was passed or landed on.
    pub fn move_player(game: &mut GameData, player: PlayerId, steps: u8) -> bool {
        let salary = game.settings.go_salary;
        let data = game.player_mut(player);
        let target = u16::from(data.position) + u16::from(steps);
        data.position = (target % u16::from(BOARD_SIZE)) as u8;
        let passed_go = target >= u16::from(BOARD_SIZE);
        if passed_go {
            data.money += salary;
            log::debug!("{player} passed GO and collected ${salary}");
        }
        passed_go
    }

    /// Move forward to `position`. GO salary is paid if the move wraps
    /// and `collect_go` is set.
    ///
    /// Returns `true` if salary was paid.
    pub fn move_to(game: &mut GameData, player: PlayerId, position: u8, collect_go: bool) -> bool {
        let current = game.player(player).position;
        let position = position % BOARD_SIZE;
        let wraps = position < current || (position == GO_POSITION && current != GO_POSITION);
        game.player_mut(player).position = position;

        if wraps && collect_go {
            let salary = game.settings.go_salary;
            game.player_mut(player).money += salary;
            log::debug!("{player} passed GO and collected ${salary}");
            true
        } else {
            false
        }
    }

    /// Move backward `steps` squares. Never pays salary.
    pub fn move_back(game: &mut GameData, player: PlayerId, steps: u8) {
        let data = game.player_mut(player);
        let back = steps % BOARD_SIZE;
        data.position = (data.position + BOARD_SIZE - back) % BOARD_SIZE;
    }

    /// Put the player in jail without passing GO.
    pub fn send_to_jail(game: &mut GameData, player: PlayerId) {
        let data = game.player_mut(player);
        data.position = JAIL_POSITION;
        data.jail_turns = 1;
        log::debug!("{player} was sent to jail");
    }

    pub fn release_from_jail(game: &mut GameData, player: PlayerId) {
        game.player_mut(player).jail_turns = 0;
    }

    fn check_jailed(game: &GameData, player: PlayerId) -> Result<(), RulesError> {
        let data = game.check_player(player)?;
        if data.is_bankrupt {
            return Err(RulesError::PlayerBankrupt(player));
        }
        if !data.is_in_jail() {
            return Err(RulesError::NotInJail(player));
        }
        Ok(())
    }

    /// Pay the fine to the bank and leave jail.
    pub fn pay_jail_fine(game: &mut GameData, player: PlayerId) -> Result<(), RulesError> {
        Self::check_jailed(game, player)?;
        let fine = game.jail_fine;
        let available = game.player(player).money;
        if available < fine {
            return Err(RulesError::InsufficientFunds { player, needed: fine, available });
        }
        game.player_mut(player).money -= fine;
        Self::release_from_jail(game, player);
        log::debug!("{player} paid ${fine} to leave jail");
        Ok(())
    }

    /// Spend a Get Out of Jail Free card. The card becomes drawable again
    /// from the deck it came from. Returns that deck.
    pub fn use_jail_free_card(
        game: &mut GameData,
        player: PlayerId,
    ) -> Result<DeckKind, RulesError> {
        Self::check_jailed(game, player)?;
        let deck = game
            .player_mut(player)
            .jail_free_cards
            .pop()
            .ok_or(RulesError::NoJailFreeCard(player))?;
        Self::release_from_jail(game, player);
        log::debug!("{player} used a {deck} Get Out of Jail Free card");
        Ok(deck)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::GameTables;
    use crate::core::{init_game, GameSettings};

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);
    const P2: PlayerId = PlayerId::new(2);

    fn game(players: usize) -> GameData {
        init_game(
            GameSettings::default().with_seed(5).with_player_count(players),
            GameTables::standard(),
        )
        .unwrap()
    }

    #[test]
    fn test_advance_turn_wraps_round() {
        let mut game = game(3);
        assert_eq!(TurnSequencer::advance_turn(&mut game), Some(P1));
        assert_eq!(TurnSequencer::advance_turn(&mut game), Some(P2));
        assert_eq!(game.round, 1);
        assert_eq!(TurnSequencer::advance_turn(&mut game), Some(P0));
        assert_eq!(game.round, 2);
    }

    #[test]
    fn test_advance_turn_skips_bankrupt() {
        let mut game = game(3);
        game.player_mut(P1).is_bankrupt = true;
        assert_eq!(TurnSequencer::advance_turn(&mut game), Some(P2));
    }

    #[test]
    fn test_advance_turn_all_bankrupt_stops() {
        let mut game = game(2);
        game.player_mut(P0).is_bankrupt = true;
        game.player_mut(P1).is_bankrupt = true;
        assert_eq!(TurnSequencer::advance_turn(&mut game), None);
        assert!(!game.running);
    }

    #[test]
    fn test_move_player_passes_go() {
        let mut game = game(2);
        game.player_mut(P0).position = 35;

        assert!(TurnSequencer::move_player(&mut game, P0, 8));
        assert_eq!(game.player(P0).position, 3);
        assert_eq!(game.player(P0).money, 1700);
    }

    #[test]
    fn test_move_player_landing_on_go_pays_once() {
        let mut game = game(2);
        game.player_mut(P0).position = 32;

        assert!(TurnSequencer::move_player(&mut game, P0, 8));
        assert_eq!(game.player(P0).position, 0);
        assert_eq!(game.player(P0).money, 1700);
    }

    #[test]
    fn test_move_to() {
        let mut game = game(2);
        game.player_mut(P0).position = 36;

        assert!(TurnSequencer::move_to(&mut game, P0, 5, true));
        assert_eq!(game.player(P0).money, 1700);
        assert!(!TurnSequencer::move_to(&mut game, P0, 24, true));
        assert!(TurnSequencer::move_to(&mut game, P0, 0, true));
        assert_eq!(game.player(P0).money, 1900);
    }

    #[test]
    fn test_move_back_wraps_without_salary() {
        let mut game = game(2);
        game.player_mut(P0).position = 2;

        TurnSequencer::move_back(&mut game, P0, 3);
        assert_eq!(game.player(P0).position, 39);
        assert_eq!(game.player(P0).money, 1500);
    }

    #[test]
    fn test_send_to_jail() {
        let mut game = game(2);
        game.player_mut(P0).position = 30;

        TurnSequencer::send_to_jail(&mut game, P0);
        assert_eq!(game.player(P0).position, JAIL_POSITION);
        assert!(game.player(P0).is_in_jail());
        TurnSequencer::release_from_jail(&mut game, P0);
        assert!(!game.player(P0).is_in_jail());
    }

    #[test]
    fn test_pay_jail_fine() {
        let mut game = game(2);
        assert_eq!(
            TurnSequencer::pay_jail_fine(&mut game, P0),
            Err(RulesError::NotInJail(P0))
        );

        TurnSequencer::send_to_jail(&mut game, P0);
        game.player_mut(P0).money = 40;
        assert!(matches!(
            TurnSequencer::pay_jail_fine(&mut game, P0),
            Err(RulesError::InsufficientFunds { needed: 50, available: 40, .. })
        ));

        game.player_mut(P0).money = 60;
        TurnSequencer::pay_jail_fine(&mut game, P0).unwrap();
        assert_eq!(game.player(P0).money, 10);
        assert!(!game.player(P0).is_in_jail());
    }

    #[test]
    fn test_use_jail_free_card() {
        let mut game = game(2);
        TurnSequencer::send_to_jail(&mut game, P0);
        assert_eq!(
            TurnSequencer::use_jail_free_card(&mut game, P0),
            Err(RulesError::NoJailFreeCard(P0))
        );

        game.player_mut(P0).jail_free_cards.push(DeckKind::Chance);
        assert!(game.jail_card_held(DeckKind::Chance));
        assert_eq!(TurnSequencer::use_jail_free_card(&mut game, P0), Ok(DeckKind::Chance));
        assert!(!game.player(P0).is_in_jail());
        assert!(!game.jail_card_held(DeckKind::Chance));
    }
}
