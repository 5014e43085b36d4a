//! A jailed player's turn: pay, use a card, or try for doubles.

use crate::core::{InvariantViolation, RulesError};
use crate::flow::{FlowContext, JailOutcome};
use crate::rules::{BankruptcyResolver, Creditor, Payment, TurnSequencer};

use super::{PhaseResult, PhaseStep, PhaseTag, Prompt};

/// Pushed over the turn menu while the current player is in jail.
/// Records a [`JailOutcome`] and completes.
#[derive(Debug, Default)]
pub struct JailPhase;

impl JailPhase {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn finish(ctx: &mut FlowContext, outcome: JailOutcome) -> PhaseResult {
        ctx.turn.jail_outcome = Some(outcome);
        PhaseResult::Complete
    }

    fn refused(
        ctx: &mut FlowContext,
        err: RulesError,
    ) -> Result<PhaseResult, InvariantViolation> {
        match err {
            RulesError::InsufficientFunds { .. } | RulesError::NoJailFreeCard(_) => {
                ctx.game.notify(err.to_string());
                Ok(PhaseResult::Running)
            }
            other => Err(InvariantViolation::UnexpectedRejection(other)),
        }
    }

    fn roll(ctx: &mut FlowContext) -> Result<PhaseResult, InvariantViolation> {
        let player = ctx.player();
        let dice = TurnSequencer::roll_dice(&mut ctx.game);

        if dice.is_double() {
            TurnSequencer::release_from_jail(&mut ctx.game, player);
            ctx.game.notify(format!("{player} rolled {dice} and is out of jail"));
            return Ok(Self::finish(ctx, JailOutcome::RolledOut(dice)));
        }

        let attempts = ctx.game.player(player).jail_turns;
        if attempts >= ctx.game.settings.max_jail_attempts {
            let fine = ctx.game.jail_fine;
            let paid =
                BankruptcyResolver::collect_payment(&mut ctx.game, player, fine, Creditor::Bank)
                    .map_err(InvariantViolation::UnexpectedRejection)?;
            let text = match paid {
                Payment::Paid => {
                    TurnSequencer::release_from_jail(&mut ctx.game, player);
                    format!("{player} rolled {dice} and must pay the ${fine} fine")
                }
                Payment::Bankrupt => {
                    format!("{player} could not pay the jail fine and is bankrupt")
                }
            };
            ctx.game.notify(text);
        } else {
            ctx.game.player_mut(player).jail_turns += 1;
            ctx.game.notify(format!("{player} rolled {dice} and stays in jail"));
        }
        Ok(Self::finish(ctx, JailOutcome::TurnOver))
    }
}

impl PhaseStep for JailPhase {
    fn step(&mut self, ctx: &mut FlowContext, _dt: f32) -> Result<PhaseResult, InvariantViolation> {
        let player = ctx.player();
        if !ctx.game.player(player).is_in_jail() {
            return Ok(Self::finish(ctx, JailOutcome::Released));
        }
        let Some(input) = ctx.input.take() else {
            return Ok(PhaseResult::Running);
        };

        match input.as_int() {
            Some(1) => match TurnSequencer::pay_jail_fine(&mut ctx.game, player) {
                Ok(()) => {
                    let fine = ctx.game.jail_fine;
                    ctx.game.notify(format!("{player} paid ${fine} and is out of jail"));
                    Ok(Self::finish(ctx, JailOutcome::Released))
                }
                Err(err) => Self::refused(ctx, err),
            },
            Some(2) => match TurnSequencer::use_jail_free_card(&mut ctx.game, player) {
                Ok(_) => {
                    ctx.game.notify(format!("{player} used a Get Out of Jail Free card"));
                    Ok(Self::finish(ctx, JailOutcome::Released))
                }
                Err(err) => Self::refused(ctx, err),
            },
            Some(3) => Self::roll(ctx),
            _ => {
                ctx.game.notify("Invalid choice");
                Ok(PhaseResult::Running)
            }
        }
    }

    fn tag(&self) -> PhaseTag {
        PhaseTag::Jail
    }

    fn prompt(&self, ctx: &FlowContext) -> Option<Prompt> {
        let player = ctx.game.player(ctx.player());
        player.is_in_jail().then(|| Prompt::JailMenu {
            fine: ctx.game.jail_fine,
            has_card: player.has_jail_free_card(),
            attempt: player.jail_turns,
        })
    }
}
