//! Negotiating a trade between the current player and one other.
//!
//! The initiator picks a partner and edits an offer (properties each
//! way, cash each way). Proposing validates the offer and hands it to the
//! partner, who accepts, rejects, or counters. A counter mirrors the
//! terms and gives the partner the editing role.

use serde::Serialize;

use crate::core::{InvariantViolation, Money, PlayerId};
use crate::flow::FlowContext;
use crate::rules::{RulesEngine, TradeOffer};

use super::{pick, PhaseResult, PhaseStep, PhaseTag, Prompt};

/// Which way something moves, relative to the offer's proposer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TradeSide {
    /// From the proposer to the partner.
    Offered,
    /// From the partner to the proposer.
    Requested,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TradeStep {
    SelectPartner,
    BuildOffer,
    SelectProperty(TradeSide),
    EnterCash(TradeSide),
    AwaitingResponse,
}

/// Read-only view of a trade in progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TradeSnapshot {
    pub initiator: PlayerId,
    pub step: TradeStep,
    pub offer: Option<TradeOffer>,
}

#[derive(Debug)]
pub struct TradePhase {
    initiator: PlayerId,
    offer: Option<TradeOffer>,
    step: TradeStep,
}

impl TradePhase {
    #[must_use]
    pub fn new(initiator: PlayerId) -> Self {
        Self {
            initiator,
            offer: None,
            step: TradeStep::SelectPartner,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> TradeSnapshot {
        TradeSnapshot {
            initiator: self.initiator,
            step: self.step,
            offer: self.offer.clone(),
        }
    }

    fn select_partner(&mut self, ctx: &mut FlowContext, choice: i32) -> PhaseResult {
        let partner = usize::try_from(choice)
            .ok()
            .and_then(|n| n.checked_sub(1))
            .filter(|&idx| idx < ctx.game.player_count())
            .map(|idx| PlayerId::new(idx as u8));

        match partner {
            Some(p) if p != self.initiator && !ctx.game.player(p).is_bankrupt => {
                self.offer = Some(TradeOffer::new(self.initiator, p));
                self.step = TradeStep::BuildOffer;
            }
            _ => ctx.game.notify("Choose another player who is still in the game"),
        }
        PhaseResult::Running
    }

    fn build_offer(ctx: &mut FlowContext, offer: &TradeOffer, choice: i32) -> Option<TradeStep> {
        match choice {
            1 => Some(TradeStep::SelectProperty(TradeSide::Offered)),
            2 => Some(TradeStep::SelectProperty(TradeSide::Requested)),
            3 => Some(TradeStep::EnterCash(TradeSide::Offered)),
            4 => Some(TradeStep::EnterCash(TradeSide::Requested)),
            5 => match RulesEngine::validate_trade(&ctx.game, offer) {
                Ok(()) => {
                    let (from, to) = (offer.proposer, offer.partner);
                    ctx.game.notify(format!("{from} proposes a trade to {to}"));
                    Some(TradeStep::AwaitingResponse)
                }
                Err(err) => {
                    ctx.game.notify(err.to_string());
                    None
                }
            },
            _ => {
                ctx.game.notify("Invalid choice");
                None
            }
        }
    }

    fn toggle_property(
        ctx: &mut FlowContext,
        offer: &mut TradeOffer,
        side: TradeSide,
        choice: i32,
    ) {
        let owner = match side {
            TradeSide::Offered => offer.proposer,
            TradeSide::Requested => offer.partner,
        };
        let Some(property) = pick(&ctx.game.player(owner).properties, choice) else {
            ctx.game.notify("Invalid property");
            return;
        };
        if !RulesEngine::is_tradable(&ctx.game, property) {
            let name = ctx.game.property(property).name.clone();
            ctx.game.notify(format!("{name} cannot be traded while its group has buildings"));
            return;
        }
        match side {
            TradeSide::Offered => offer.toggle_offered(property),
            TradeSide::Requested => offer.toggle_requested(property),
        }
    }

    fn respond(
        &mut self,
        ctx: &mut FlowContext,
        offer: TradeOffer,
        choice: i32,
    ) -> Result<PhaseResult, InvariantViolation> {
        let responder = offer.partner;
        match choice {
            1 => {
                RulesEngine::execute_trade(&mut ctx.game, &offer)
                    .map_err(InvariantViolation::UnexpectedRejection)?;
                ctx.game.notify(format!("{responder} accepted the trade"));
                Ok(PhaseResult::Complete)
            }
            2 => {
                ctx.game.notify(format!("{responder} rejected the trade"));
                log::debug!("{responder} rejected a trade from {}", offer.proposer);
                Ok(PhaseResult::Complete)
            }
            3 => {
                ctx.game.notify(format!("{responder} makes a counter-offer"));
                self.offer = Some(offer.reversed());
                self.step = TradeStep::BuildOffer;
                Ok(PhaseResult::Running)
            }
            _ => {
                ctx.game.notify("Invalid choice");
                self.offer = Some(offer);
                Ok(PhaseResult::Running)
            }
        }
    }
}

impl PhaseStep for TradePhase {
    fn step(&mut self, ctx: &mut FlowContext, _dt: f32) -> Result<PhaseResult, InvariantViolation> {
        let Some(input) = ctx.input.take() else {
            return Ok(PhaseResult::Running);
        };
        let Some(choice) = input.as_int() else {
            ctx.game.notify("Enter a number");
            return Ok(PhaseResult::Running);
        };

        if self.step == TradeStep::SelectPartner {
            if choice == 0 {
                return Ok(PhaseResult::Complete);
            }
            return Ok(self.select_partner(ctx, choice));
        }
        let Some(mut offer) = self.offer.take() else {
            return Err(InvariantViolation::NoActivePhase);
        };

        match self.step {
            TradeStep::BuildOffer if choice == 0 => {
                ctx.game.notify("Trade cancelled");
                return Ok(PhaseResult::Complete);
            }
            TradeStep::BuildOffer => {
                if let Some(next) = Self::build_offer(ctx, &offer, choice) {
                    self.step = next;
                }
            }
            TradeStep::SelectProperty(side) => {
                if choice != 0 {
                    Self::toggle_property(ctx, &mut offer, side, choice);
                }
                self.step = TradeStep::BuildOffer;
            }
            TradeStep::EnterCash(side) => match Money::try_from(choice) {
                Ok(cash) => {
                    match side {
                        TradeSide::Offered => offer.cash_offered = cash,
                        TradeSide::Requested => offer.cash_requested = cash,
                    }
                    self.step = TradeStep::BuildOffer;
                }
                Err(_) => ctx.game.notify("Cash cannot be negative"),
            },
            TradeStep::AwaitingResponse => return self.respond(ctx, offer, choice),
            TradeStep::SelectPartner => {}
        }
        self.offer = Some(offer);
        Ok(PhaseResult::Running)
    }

    fn tag(&self) -> PhaseTag {
        PhaseTag::Trade
    }

    fn prompt(&self, _ctx: &FlowContext) -> Option<Prompt> {
        Some(match self.step {
            TradeStep::SelectPartner => Prompt::SelectTradePartner,
            TradeStep::BuildOffer => Prompt::TradeMenu,
            TradeStep::SelectProperty(side) => Prompt::SelectTradeProperty { side },
            TradeStep::EnterCash(side) => Prompt::EnterTradeCash { side },
            TradeStep::AwaitingResponse => Prompt::TradeResponse {
                responder: self.offer.as_ref()?.partner,
            },
        })
    }
}
