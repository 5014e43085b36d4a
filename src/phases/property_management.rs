//! Building, selling and mortgaging between rolls.

use serde::Serialize;

use crate::board::PropertyId;
use crate::core::{InvariantViolation, Money, PlayerId, RulesError};
use crate::flow::FlowContext;
use crate::rules::RulesEngine;

use super::{pick, PhaseResult, PhaseStep, PhaseTag, Prompt};

/// An entry of the management menu, numbered as the front end shows it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ManagementAction {
    BuildHouse = 1,
    SellHouse = 2,
    BuildHotel = 3,
    SellHotel = 4,
    Mortgage = 5,
    Unmortgage = 6,
}

impl ManagementAction {
    pub const ALL: [ManagementAction; 6] = [
        ManagementAction::BuildHouse,
        ManagementAction::SellHouse,
        ManagementAction::BuildHotel,
        ManagementAction::SellHotel,
        ManagementAction::Mortgage,
        ManagementAction::Unmortgage,
    ];

    #[must_use]
    pub fn from_choice(choice: i32) -> Option<Self> {
        pick(&Self::ALL, choice)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ManagementAction::BuildHouse => "Build house",
            ManagementAction::SellHouse => "Sell house",
            ManagementAction::BuildHotel => "Build hotel",
            ManagementAction::SellHotel => "Sell hotel",
            ManagementAction::Mortgage => "Mortgage",
            ManagementAction::Unmortgage => "Unmortgage",
        }
    }

    /// Apply the action. The returned amount is cash received (positive)
    /// or paid (negative).
    fn apply(
        self,
        ctx: &mut FlowContext,
        property: PropertyId,
        player: PlayerId,
    ) -> Result<i64, RulesError> {
        let game = &mut ctx.game;
        let paid = |amount: Money| -i64::from(amount);
        match self {
            ManagementAction::BuildHouse => {
                let cost = game.check_property(property)?.house_cost;
                RulesEngine::build_house(game, property, player).map(|()| paid(cost))
            }
            ManagementAction::BuildHotel => {
                let cost = game.check_property(property)?.house_cost;
                RulesEngine::build_hotel(game, property, player).map(|()| paid(cost))
            }
            ManagementAction::SellHouse => {
                RulesEngine::sell_house(game, property, player).map(i64::from)
            }
            ManagementAction::SellHotel => {
                RulesEngine::sell_hotel(game, property, player).map(i64::from)
            }
            ManagementAction::Mortgage => {
                RulesEngine::mortgage(game, property, player).map(i64::from)
            }
            ManagementAction::Unmortgage => {
                RulesEngine::unmortgage(game, property, player).map(paid)
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Menu,
    Select(ManagementAction),
}

/// Manage the current player's holdings. Choosing "done" (0) returns to
/// the turn menu.
#[derive(Debug)]
pub struct PropertyManagementPhase {
    stage: Stage,
}

impl Default for PropertyManagementPhase {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyManagementPhase {
    #[must_use]
    pub fn new() -> Self {
        Self { stage: Stage::Menu }
    }

    fn select(
        ctx: &mut FlowContext,
        action: ManagementAction,
        choice: i32,
    ) -> Result<(), InvariantViolation> {
        let player = ctx.player();
        let Some(property) = pick(&ctx.game.player(player).properties, choice) else {
            ctx.game.notify("Invalid property");
            return Ok(());
        };

        match action.apply(ctx, property, player) {
            Ok(delta) => {
                let name = ctx.game.property(property).name.clone();
                let cash = if delta >= 0 {
                    format!("received ${delta}")
                } else {
                    format!("paid ${}", -delta)
                };
                ctx.game.notify(format!("{}: {name}, {cash}", action.label()));
                Ok(())
            }
            Err(RulesError::NotOwner { player, property }) => {
                Err(InvariantViolation::ActedOnForeignProperty { player, property })
            }
            Err(err) => {
                ctx.game.notify(err.to_string());
                Ok(())
            }
        }
    }
}

impl PhaseStep for PropertyManagementPhase {
    fn step(&mut self, ctx: &mut FlowContext, _dt: f32) -> Result<PhaseResult, InvariantViolation> {
        let Some(input) = ctx.input.take() else {
            return Ok(PhaseResult::Running);
        };
        let choice = input.as_int();

        match (self.stage, choice) {
            (Stage::Menu, Some(0)) => return Ok(PhaseResult::Complete),
            (Stage::Menu, Some(n)) => match ManagementAction::from_choice(n) {
                Some(action) if ctx.game.current().properties.is_empty() => {
                    ctx.game.notify(format!("{}: you own no properties", action.label()));
                }
                Some(action) => self.stage = Stage::Select(action),
                None => ctx.game.notify("Invalid choice"),
            },
            (Stage::Select(_), Some(0)) => self.stage = Stage::Menu,
            (Stage::Select(action), Some(n)) => {
                Self::select(ctx, action, n)?;
                self.stage = Stage::Menu;
            }
            (_, None) => ctx.game.notify("Invalid choice"),
        }
        Ok(PhaseResult::Running)
    }

    fn tag(&self) -> PhaseTag {
        PhaseTag::PropertyManagement
    }

    fn prompt(&self, _ctx: &FlowContext) -> Option<Prompt> {
        Some(match self.stage {
            Stage::Menu => Prompt::ManagementMenu,
            Stage::Select(action) => Prompt::SelectProperty { action },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::GameTables;
    use crate::core::{init_game, GameSettings};

    const P0: PlayerId = PlayerId::new(0);

    fn ctx() -> FlowContext {
        let game = init_game(GameSettings::default().with_seed(9), GameTables::standard()).unwrap();
        let mut ctx = FlowContext::new(game);
        RulesEngine::buy_property(&mut ctx.game, PropertyId(0), P0).unwrap();
        RulesEngine::buy_property(&mut ctx.game, PropertyId(1), P0).unwrap();
        ctx
    }

    fn send(
        phase: &mut PropertyManagementPhase,
        ctx: &mut FlowContext,
        choice: i32,
    ) -> PhaseResult {
        ctx.input.set_int(choice);
        phase.step(ctx, 0.0).unwrap()
    }

    #[test]
    fn test_action_numbering() {
        assert_eq!(ManagementAction::from_choice(1), Some(ManagementAction::BuildHouse));
        assert_eq!(ManagementAction::from_choice(6), Some(ManagementAction::Unmortgage));
        assert_eq!(ManagementAction::from_choice(7), None);
        assert_eq!(ManagementAction::SellHotel as i32, 4);
    }

    #[test]
    fn test_build_then_done() {
        let mut ctx = ctx();
        let mut phase = PropertyManagementPhase::new();

        send(&mut phase, &mut ctx, 1);
        assert_eq!(
            phase.prompt(&ctx),
            Some(Prompt::SelectProperty { action: ManagementAction::BuildHouse })
        );
        send(&mut phase, &mut ctx, 1);
        assert_eq!(ctx.game.property(PropertyId(0)).houses, 1);
        assert_eq!(ctx.game.player(P0).money, 1500 - 60 - 60 - 50);
        assert_eq!(ctx.game.notification.text, "Build house: Mediterranean Avenue, paid $50");

        assert!(matches!(send(&mut phase, &mut ctx, 0), PhaseResult::Complete));
    }

    #[test]
    fn test_refusal_is_notified() {
        let mut ctx = ctx();
        let mut phase = PropertyManagementPhase::new();

        send(&mut phase, &mut ctx, 2);
        send(&mut phase, &mut ctx, 1);
        assert_eq!(
            ctx.game.notification.text,
            RulesError::NothingToSell(PropertyId(0)).to_string()
        );
        assert_eq!(phase.prompt(&ctx), Some(Prompt::ManagementMenu));
    }

    #[test]
    fn test_mortgage_and_back_out() {
        let mut ctx = ctx();
        let mut phase = PropertyManagementPhase::new();

        send(&mut phase, &mut ctx, 5);
        send(&mut phase, &mut ctx, 2);
        assert!(ctx.game.property(PropertyId(1)).is_mortgaged);
        assert_eq!(ctx.game.player(P0).money, 1380 + 30);

        send(&mut phase, &mut ctx, 6);
        send(&mut phase, &mut ctx, 0);
        assert_eq!(phase.prompt(&ctx), Some(Prompt::ManagementMenu));
        send(&mut phase, &mut ctx, 6);
        send(&mut phase, &mut ctx, 9);
        assert_eq!(ctx.game.notification.text, "Invalid property");
    }
}
