//! After the roll: move, then resolve the square landed on.
//!
//! ## Stages
//!
//! 1. `Move`: count doubles (the third in a row goes straight to jail),
//!    move the piece and classify the square.
//! 2. `Resolve`: settle the landing exactly once. A card that moves the
//!    player produces a fresh landing to resolve.
//! 3. `AwaitPurchase`: an unowned property waits for buy or auction.
//! 4. `Finished`: same player again on doubles, otherwise next player.

use crate::board::{Owner, PropertyId, SquareKind};
use crate::cards::DeckKind;
use crate::core::{Dice, InvariantViolation, RulesError};
use crate::effects::{CardOutcome, CardResolver};
use crate::flow::FlowContext;
use crate::rules::{
    BankruptcyResolver, Creditor, Payment, RentModifier, RentOutcome, RulesEngine, TurnSequencer,
};

use super::{AuctionPhase, PhaseResult, PhaseStep, PhaseTag, PreRollPhase, Prompt};

/// Doubles in a row that send a player to jail.
const DOUBLES_TO_JAIL: u8 = 3;

/// A square the player arrived on and how to charge rent there.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Landing {
    position: u8,
    square: SquareKind,
    modifier: RentModifier,
    handled: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Move,
    Resolve,
    AwaitPurchase(PropertyId),
    InAuction,
    Finished,
}

#[derive(Debug)]
pub struct PostRollPhase {
    dice: Dice,
    from_jail: bool,
    stage: Stage,
    landing: Option<Landing>,
}

impl PostRollPhase {
    /// Resolve a normal roll.
    #[must_use]
    pub fn new(dice: Dice) -> Self {
        Self {
            dice,
            from_jail: false,
            stage: Stage::Move,
            landing: None,
        }
    }

    /// Resolve the doubles that got the player out of jail. They move,
    /// but do not roll again.
    #[must_use]
    pub fn from_jail(dice: Dice) -> Self {
        Self {
            from_jail: true,
            ..Self::new(dice)
        }
    }

    #[must_use]
    pub fn dice(&self) -> Dice {
        self.dice
    }

    fn land(&mut self, ctx: &FlowContext, modifier: RentModifier) {
        let position = ctx.game.player(ctx.player()).position;
        self.landing = Some(Landing {
            position,
            square: ctx.game.square_at(position),
            modifier,
            handled: false,
        });
        self.stage = Stage::Resolve;
    }

    fn step_move(&mut self, ctx: &mut FlowContext) {
        let player = ctx.player();
        if !self.from_jail && self.dice.is_double() {
            ctx.turn.doubles_rolled += 1;
            if ctx.turn.doubles_rolled >= DOUBLES_TO_JAIL {
                TurnSequencer::send_to_jail(&mut ctx.game, player);
                ctx.game.notify(format!("{player} rolled doubles three times and goes to jail"));
                self.stage = Stage::Finished;
                return;
            }
        }

        let passed_go = TurnSequencer::move_player(&mut ctx.game, player, self.dice.sum());
        if passed_go {
            let salary = ctx.game.settings.go_salary;
            ctx.game.notify(format!("{player} passed GO and collected ${salary}"));
        }
        self.land(ctx, RentModifier::Standard);
    }

    fn step_resolve(&mut self, ctx: &mut FlowContext) -> Result<(), InvariantViolation> {
        let landing = match self.landing.as_mut() {
            Some(l) if l.handled => {
                return Err(InvariantViolation::SquareAlreadyResolved(l.position));
            }
            Some(l) => {
                l.handled = true;
                *l
            }
            None => return Err(InvariantViolation::NoActivePhase),
        };
        let player = ctx.player();
        self.stage = Stage::Finished;

        match landing.square {
            SquareKind::Go | SquareKind::FreeParking | SquareKind::Jail => {}
            SquareKind::GoToJail => {
                TurnSequencer::send_to_jail(&mut ctx.game, player);
                ctx.game.notify(format!("{player} goes to jail"));
            }
            SquareKind::IncomeTax | SquareKind::LuxuryTax => {
                let tax = if landing.square == SquareKind::IncomeTax {
                    ctx.game.settings.income_tax
                } else {
                    ctx.game.settings.luxury_tax
                };
                let paid =
                    BankruptcyResolver::collect_payment(&mut ctx.game, player, tax, Creditor::Bank)
                        .map_err(InvariantViolation::UnexpectedRejection)?;
                let text = match paid {
                    Payment::Paid => format!("{player} paid ${tax} tax"),
                    Payment::Bankrupt => format!("{player} could not pay the tax and is bankrupt"),
                };
                ctx.game.notify(text);
            }
            SquareKind::Chance | SquareKind::CommunityChest => {
                let deck = if landing.square == SquareKind::Chance {
                    DeckKind::Chance
                } else {
                    DeckKind::CommunityChest
                };
                let drawn = CardResolver::draw_and_execute(&mut ctx.game, player, deck)
                    .map_err(InvariantViolation::UnexpectedRejection)?;
                if let Some((_, CardOutcome::Moved { modifier })) = drawn {
                    self.land(ctx, modifier);
                }
            }
            SquareKind::Property(id) => self
                .resolve_property(ctx, id, landing.modifier)
                .map_err(InvariantViolation::UnexpectedRejection)?,
        }
        Ok(())
    }

    fn resolve_property(
        &mut self,
        ctx: &mut FlowContext,
        id: PropertyId,
        modifier: RentModifier,
    ) -> Result<(), RulesError> {
        let player = ctx.player();
        let (owner, mortgaged) = {
            let prop = ctx.game.property(id);
            (prop.owner, prop.is_mortgaged)
        };
        match owner {
            Owner::Bank => self.stage = Stage::AwaitPurchase(id),
            Owner::Player(owner) if owner == player => {}
            Owner::Player(_) if mortgaged => {
                let name = ctx.game.property(id).name.clone();
                ctx.game.notify(format!("{name} is mortgaged; no rent due"));
            }
            Owner::Player(_) => {
                let due = RulesEngine::rent_due(&ctx.game, id, modifier)?;
                BankruptcyResolver::attempt_emergency_liquidation(&mut ctx.game, player, due)?;
                match RulesEngine::pay_rent(&mut ctx.game, id, player, modifier)? {
                    RentOutcome::Paid { to, amount } => {
                        ctx.game.notify(format!("{player} paid ${amount} rent to {to}"));
                    }
                    RentOutcome::Bankrupt { to } => {
                        ctx.game.notify(format!("{player} is bankrupt to {to}"));
                    }
                    RentOutcome::NotDue => {}
                }
            }
        }
        Ok(())
    }

    fn step_purchase(
        &mut self,
        ctx: &mut FlowContext,
        id: PropertyId,
    ) -> Result<PhaseResult, InvariantViolation> {
        let Some(input) = ctx.input.take() else {
            return Ok(PhaseResult::Running);
        };
        let player = ctx.player();
        match input.as_int() {
            Some(1) => match RulesEngine::buy_property(&mut ctx.game, id, player) {
                Ok(()) => {
                    let name = ctx.game.property(id).name.clone();
                    ctx.game.notify(format!("{player} bought {name}"));
                    self.stage = Stage::Finished;
                    Ok(PhaseResult::Running)
                }
                Err(err @ RulesError::InsufficientFunds { .. }) => {
                    ctx.game.notify(format!("{err}; choose auction instead"));
                    Ok(PhaseResult::Running)
                }
                Err(err) => Err(InvariantViolation::UnexpectedRejection(err)),
            },
            Some(2) => {
                self.stage = Stage::InAuction;
                Ok(PhaseResult::Push(AuctionPhase::new(&ctx.game, id, player).into()))
            }
            _ => {
                ctx.game.notify("Invalid choice");
                Ok(PhaseResult::Running)
            }
        }
    }

    fn step_finish(&mut self, ctx: &mut FlowContext) -> PhaseResult {
        let player = ctx.game.player(ctx.player());
        let again = ctx.game.settings.doubles_grant_extra_turn
            && !self.from_jail
            && self.dice.is_double()
            && !player.is_in_jail()
            && !player.is_bankrupt
            && ctx.turn.doubles_rolled > 0;

        if again {
            let id = ctx.player();
            ctx.game.notify(format!("{id} rolled doubles and goes again"));
        } else {
            ctx.end_turn();
        }
        PhaseResult::Replace(PreRollPhase::new().into())
    }
}

impl PhaseStep for PostRollPhase {
    fn step(&mut self, ctx: &mut FlowContext, _dt: f32) -> Result<PhaseResult, InvariantViolation> {
        match self.stage {
            Stage::Move => {
                self.step_move(ctx);
                Ok(PhaseResult::Running)
            }
            Stage::Resolve => {
                self.step_resolve(ctx)?;
                Ok(PhaseResult::Running)
            }
            Stage::AwaitPurchase(id) => self.step_purchase(ctx, id),
            Stage::InAuction | Stage::Finished => Ok(self.step_finish(ctx)),
        }
    }

    fn tag(&self) -> PhaseTag {
        PhaseTag::PostRoll
    }

    fn prompt(&self, ctx: &FlowContext) -> Option<Prompt> {
        match self.stage {
            Stage::AwaitPurchase(property) => Some(Prompt::BuyOrAuction {
                property,
                price: ctx.game.property(property).price,
            }),
            _ => None,
        }
    }
}
