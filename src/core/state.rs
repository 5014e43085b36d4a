//! Game state: the entity tables and global counters.
//!
//! `GameData` is plain data plus accessors. Rules live in `rules`,
//! sequencing in `flow`; both mutate it through `&mut GameData`.
//!
//! ## Creating a game
//!
//! ```
//! use monopoly_engine::board::GameTables;
//! use monopoly_engine::core::{init_game, GameSettings, PlayerId};
//!
//! let game = init_game(GameSettings::default().with_seed(1), GameTables::standard()).unwrap();
//! assert_eq!(game.player_count(), 2);
//! assert_eq!(game.player(PlayerId::new(0)).money, 1500);
//! ```

use rustc_hash::FxHashMap;
use serde::Serialize;
use smallvec::SmallVec;
use std::collections::VecDeque;

use super::config::GameSettings;
use super::dice::Dice;
use super::error::{GameError, RulesError};
use super::player::{Money, Piece, Player, PlayerId, PlayerMap};
use super::rng::{GameRng, GameRngState};
use crate::board::{layout_board, ColorGroup, GameTables, Property, PropertyId, SquareKind};
use crate::cards::{Deck, DeckKind};

/// Transient message for the player, with seconds left on screen.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Notification {
    pub text: String,
    pub remaining: f32,
}

impl Notification {
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.remaining > 0.0 && !self.text.is_empty()
    }
}

/// All mutable state of one game.
#[derive(Clone, Debug)]
pub struct GameData {
    pub players: PlayerMap<Player>,
    pub properties: Vec<Property>,
    pub chance: Deck,
    pub community_chest: Deck,
    /// Most recent roll.
    pub dice: Dice,
    pub current_player: PlayerId,
    /// Players not yet bankrupt.
    pub active_players: usize,
    pub round: u32,
    pub jail_fine: Money,
    pub house_supply: u8,
    pub hotel_supply: u8,
    pub running: bool,
    pub winner: Option<PlayerId>,
    pub notification: Notification,
    pub settings: GameSettings,
    rng: GameRng,
    scripted_rolls: VecDeque<Dice>,
    squares: [SquareKind; 40],
    groups: FxHashMap<ColorGroup, SmallVec<[PropertyId; 4]>>,
}

/// Build a fresh game: everyone on GO with starting cash, all property
/// with the bank, decks unshuffled, first player to move.
pub fn init_game(settings: GameSettings, tables: GameTables) -> Result<GameData, GameError> {
    settings.validate()?;
    tables.validate()?;

    let squares = layout_board(&tables.properties).map_err(GameError::InvalidTables)?;
    let properties: Vec<Property> =
        tables.properties.iter().map(Property::from_definition).collect();

    let mut groups: FxHashMap<ColorGroup, SmallVec<[PropertyId; 4]>> = FxHashMap::default();
    for (idx, prop) in properties.iter().enumerate() {
        groups.entry(prop.group).or_default().push(PropertyId(idx as u8));
    }

    let rng = match settings.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };
    let players = PlayerMap::new(settings.player_count, |p| {
        Player::new(settings.starting_money, Piece::ALL[p.index()])
    });

    log::info!(
        "new game: {} players, ${} each, seed {}",
        settings.player_count,
        settings.starting_money,
        rng.seed()
    );

    Ok(GameData {
        active_players: settings.player_count,
        players,
        properties,
        chance: Deck::new(DeckKind::Chance, tables.chance),
        community_chest: Deck::new(DeckKind::CommunityChest, tables.community_chest),
        dice: Dice::default(),
        current_player: PlayerId::new(0),
        round: 1,
        jail_fine: settings.jail_fine,
        house_supply: settings.house_supply,
        hotel_supply: settings.hotel_supply,
        running: true,
        winner: None,
        notification: Notification::default(),
        rng,
        scripted_rolls: VecDeque::new(),
        squares,
        groups,
        settings,
    })
}

impl GameData {
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id]
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current(&self) -> &Player {
        &self.players[self.current_player]
    }

    #[must_use]
    pub fn property(&self, id: PropertyId) -> &Property {
        &self.properties[id.index()]
    }

    pub fn property_mut(&mut self, id: PropertyId) -> &mut Property {
        &mut self.properties[id.index()]
    }

    /// Bounds-checked player lookup for rules entry points.
    pub fn check_player(&self, id: PlayerId) -> Result<&Player, RulesError> {
        if self.players.contains(id) {
            Ok(&self.players[id])
        } else {
            Err(RulesError::UnknownPlayer(id))
        }
    }

    /// Bounds-checked property lookup for rules entry points.
    pub fn check_property(&self, id: PropertyId) -> Result<&Property, RulesError> {
        self.properties
            .get(id.index())
            .ok_or(RulesError::UnknownProperty(id))
    }

    /// What sits on square `position` (taken modulo 40).
    #[must_use]
    pub fn square_at(&self, position: u8) -> SquareKind {
        self.squares[(position % 40) as usize]
    }

    /// Property ids in `group`, in table order.
    #[must_use]
    pub fn group_members(&self, group: ColorGroup) -> &[PropertyId] {
        self.groups.get(&group).map_or(&[], |g| g.as_slice())
    }

    #[must_use]
    pub fn deck(&self, kind: DeckKind) -> &Deck {
        match kind {
            DeckKind::Chance => &self.chance,
            DeckKind::CommunityChest => &self.community_chest,
        }
    }

    pub fn deck_mut(&mut self, kind: DeckKind) -> &mut Deck {
        match kind {
            DeckKind::Chance => &mut self.chance,
            DeckKind::CommunityChest => &mut self.community_chest,
        }
    }

    /// Whether any player holds this deck's jail card.
    #[must_use]
    pub fn jail_card_held(&self, kind: DeckKind) -> bool {
        self.players
            .iter()
            .any(|(_, p)| p.jail_free_cards.contains(&kind))
    }

    /// Draw from a deck, honouring the held jail card.
    pub fn draw_card(&mut self, kind: DeckKind) -> Option<crate::cards::Card> {
        let held = self.jail_card_held(kind);
        let deck = match kind {
            DeckKind::Chance => &mut self.chance,
            DeckKind::CommunityChest => &mut self.community_chest,
        };
        deck.draw(held, &mut self.rng)
    }

    /// Queue rolls to be used, in order, before the RNG.
    pub fn script_rolls(&mut self, rolls: impl IntoIterator<Item = Dice>) {
        self.scripted_rolls.extend(rolls);
    }

    #[must_use]
    pub fn scripted_rolls_pending(&self) -> usize {
        self.scripted_rolls.len()
    }

    /// Roll both dice and record the result as the current roll.
    pub fn roll(&mut self) -> Dice {
        let dice = match self.scripted_rolls.pop_front() {
            Some(d) if d.is_valid() => d,
            _ => Dice::new(self.rng.roll_die(), self.rng.roll_die()),
        };
        self.dice = dice;
        dice
    }

    /// Checkpoint of the dice and shuffle RNG.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Rewind the RNG to a checkpoint from [`rng_state`](Self::rng_state).
    ///
    /// Only the random stream moves back; decks and scripted rolls are left
    /// as they are.
    pub fn restore_rng(&mut self, state: &GameRngState) {
        log::debug!("RNG restored to word {} of seed {}", state.word_pos, state.seed);
        self.rng = GameRng::from_state(state);
    }

    /// Show a message for the configured duration.
    pub fn notify(&mut self, text: impl Into<String>) {
        let text = text.into();
        log::debug!("notify: {text}");
        self.notification = Notification {
            text,
            remaining: self.settings.notification_seconds,
        };
    }

    /// Count the notification down; clears it once expired.
    pub fn tick_notification(&mut self, dt: f32) {
        if self.notification.remaining > 0.0 {
            self.notification.remaining -= dt;
            if self.notification.remaining <= 0.0 {
                self.notification = Notification::default();
            }
        }
    }

    /// Players who are still in the game.
    pub fn solvent_players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players
            .iter()
            .filter(|(_, p)| !p.is_bankrupt)
            .map(|(id, _)| id)
    }

    /// Display name of the square at `position`.
    #[must_use]
    pub fn square_name(&self, position: u8) -> &str {
        match self.square_at(position) {
            SquareKind::Property(id) => self.property(id).name.as_str(),
            other => other.label(),
        }
    }

    /// Change a player's token. Each piece may be used by one player.
    pub fn set_piece(&mut self, player: PlayerId, piece: Piece) -> Result<(), RulesError> {
        self.check_player(player)?;
        if self.players.iter().any(|(id, p)| id != player && p.piece == piece) {
            return Err(RulesError::PieceTaken(piece));
        }
        self.player_mut(player).piece = piece;
        Ok(())
    }
}
