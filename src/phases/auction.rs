//! Auctioning a property the lander declined.
//!
//! Bidders take turns in seat order starting with the player who
//! declined. Each either bids more than the standing high bid (and no
//! more than their cash) or drops out. The auction ends when the turn
//! comes back round to the high bidder, who buys at their bid, or when
//! everyone drops out without bidding and the bank keeps the property.

use serde::Serialize;
use smallvec::SmallVec;

use crate::board::PropertyId;
use crate::core::{GameData, InvariantViolation, Money, PlayerId, MAX_PLAYERS};
use crate::flow::FlowContext;
use crate::rules::RulesEngine;

use super::{PhaseResult, PhaseStep, PhaseTag, Prompt};

/// Read-only view of an auction in progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AuctionSnapshot {
    pub property: PropertyId,
    pub high_bid: Money,
    pub high_bidder: Option<PlayerId>,
    pub current_bidder: Option<PlayerId>,
    /// Players still in, in bidding order.
    pub bidders: Vec<PlayerId>,
}

#[derive(Debug)]
pub struct AuctionPhase {
    property: PropertyId,
    bidders: SmallVec<[PlayerId; MAX_PLAYERS]>,
    turn: usize,
    high_bid: Money,
    high_bidder: Option<PlayerId>,
}

impl AuctionPhase {
    /// Open bidding on `property`, starting with `opener`.
    #[must_use]
    pub fn new(game: &GameData, property: PropertyId, opener: PlayerId) -> Self {
        let count = game.player_count();
        let bidders = (0..count)
            .map(|offset| PlayerId::new(((opener.index() + offset) % count) as u8))
            .filter(|&p| !game.player(p).is_bankrupt)
            .collect();
        Self {
            property,
            bidders,
            turn: 0,
            high_bid: 0,
            high_bidder: None,
        }
    }

    fn current_bidder(&self) -> Option<PlayerId> {
        self.bidders.get(self.turn).copied()
    }

    #[must_use]
    pub fn snapshot(&self) -> AuctionSnapshot {
        AuctionSnapshot {
            property: self.property,
            high_bid: self.high_bid,
            high_bidder: self.high_bidder,
            current_bidder: self.current_bidder(),
            bidders: self.bidders.to_vec(),
        }
    }

    fn next_bidder(&mut self) {
        if !self.bidders.is_empty() {
            self.turn = (self.turn + 1) % self.bidders.len();
        }
    }

    fn drop_out(&mut self) {
        self.bidders.remove(self.turn);
        if self.turn >= self.bidders.len() {
            self.turn = 0;
        }
    }

    /// Close the auction if it is decided.
    fn settle(&self, ctx: &mut FlowContext) -> Result<Option<PhaseResult>, InvariantViolation> {
        let name = ctx.game.property(self.property).name.clone();
        match (self.high_bidder, self.current_bidder()) {
            (None, None) => {
                ctx.game.notify(format!("No bids; {name} stays with the bank"));
                log::debug!("auction for {name} closed with no bids");
                Ok(Some(PhaseResult::Complete))
            }
            (Some(winner), current) if current.is_none() || current == Some(winner) => {
                RulesEngine::buy_at(&mut ctx.game, self.property, winner, self.high_bid)
                    .map_err(InvariantViolation::UnexpectedRejection)?;
                ctx.game.notify(format!("{winner} won {name} for ${}", self.high_bid));
                Ok(Some(PhaseResult::Complete))
            }
            _ => Ok(None),
        }
    }
}

impl PhaseStep for AuctionPhase {
    fn step(&mut self, ctx: &mut FlowContext, _dt: f32) -> Result<PhaseResult, InvariantViolation> {
        if let Some(done) = self.settle(ctx)? {
            return Ok(done);
        }
        let Some(bidder) = self.current_bidder() else {
            return Ok(PhaseResult::Running);
        };
        let Some(input) = ctx.input.take() else {
            return Ok(PhaseResult::Running);
        };

        match input.as_int() {
            Some(0) => {
                ctx.game.notify(format!("{bidder} drops out"));
                self.drop_out();
            }
            Some(bid) if bid > 0 && bid as Money > self.high_bid => {
                let bid = bid as Money;
                if RulesEngine::can_afford(&ctx.game, bidder, bid) {
                    self.high_bid = bid;
                    self.high_bidder = Some(bidder);
                    ctx.game.notify(format!("{bidder} bids ${bid}"));
                    self.next_bidder();
                } else {
                    ctx.game.notify(format!("{bidder} cannot afford ${bid}"));
                }
            }
            _ => ctx.game.notify(format!("Bid more than ${}, or 0 to drop out", self.high_bid)),
        }
        Ok(PhaseResult::Running)
    }

    fn tag(&self) -> PhaseTag {
        PhaseTag::Auction
    }

    fn prompt(&self, _ctx: &FlowContext) -> Option<Prompt> {
        let bidder = self.current_bidder()?;
        if self.high_bidder == Some(bidder) {
            return None;
        }
        Some(Prompt::Bid {
            bidder,
            property: self.property,
            high_bid: self.high_bid,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{GameTables, Owner};
    use crate::core::{init_game, GameSettings};

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);
    const P2: PlayerId = PlayerId::new(2);
    const BOARDWALK: PropertyId = PropertyId(27);

    fn ctx(players: usize) -> FlowContext {
        FlowContext::new(
            init_game(
                GameSettings::default().with_seed(4).with_player_count(players),
                GameTables::standard(),
            )
            .unwrap(),
        )
    }

    fn bid(phase: &mut AuctionPhase, ctx: &mut FlowContext, amount: i32) -> PhaseResult {
        ctx.input.set_int(amount);
        phase.step(ctx, 0.0).unwrap()
    }

    #[test]
    fn test_bidding_order_starts_with_opener() {
        let ctx = ctx(3);
        let phase = AuctionPhase::new(&ctx.game, BOARDWALK, P1);
        assert_eq!(phase.snapshot().bidders, vec![P1, P2, P0]);
        assert_eq!(phase.snapshot().current_bidder, Some(P1));
    }

    #[test]
    fn test_high_bidder_wins_when_turn_returns() {
        let mut ctx = ctx(3);
        let mut phase = AuctionPhase::new(&ctx.game, BOARDWALK, P0);

        bid(&mut phase, &mut ctx, 100);
        bid(&mut phase, &mut ctx, 150);
        bid(&mut phase, &mut ctx, 0);
        bid(&mut phase, &mut ctx, 0);
        assert_eq!(phase.snapshot().high_bidder, Some(P1));
        assert_eq!(phase.prompt(&ctx), None);

        assert!(matches!(phase.step(&mut ctx, 0.0), Ok(PhaseResult::Complete)));
        assert_eq!(ctx.game.property(BOARDWALK).owner, Owner::Player(P1));
        assert_eq!(ctx.game.player(P1).money, 1350);
    }

    #[test]
    fn test_no_bids_stays_with_bank() {
        let mut ctx = ctx(2);
        let mut phase = AuctionPhase::new(&ctx.game, BOARDWALK, P0);

        bid(&mut phase, &mut ctx, 0);
        assert_eq!(
            phase.prompt(&ctx),
            Some(Prompt::Bid { bidder: P1, property: BOARDWALK, high_bid: 0 })
        );
        bid(&mut phase, &mut ctx, 0);
        assert!(matches!(phase.step(&mut ctx, 0.0), Ok(PhaseResult::Complete)));
        assert_eq!(ctx.game.property(BOARDWALK).owner, Owner::Bank);
    }

    #[test]
    fn test_rejects_low_and_unaffordable_bids() {
        let mut ctx = ctx(2);
        ctx.game.player_mut(P1).money = 120;
        let mut phase = AuctionPhase::new(&ctx.game, BOARDWALK, P0);

        bid(&mut phase, &mut ctx, 100);
        bid(&mut phase, &mut ctx, 100);
        assert_eq!(phase.snapshot().current_bidder, Some(P1));
        bid(&mut phase, &mut ctx, 200);
        assert_eq!(phase.snapshot().high_bid, 100);
        bid(&mut phase, &mut ctx, -5);
        assert_eq!(phase.snapshot().current_bidder, Some(P1));

        bid(&mut phase, &mut ctx, 0);
        assert!(matches!(phase.step(&mut ctx, 0.0), Ok(PhaseResult::Complete)));
        assert_eq!(ctx.game.property(BOARDWALK).owner, Owner::Player(P0));
        assert_eq!(ctx.game.player(P0).money, 1400);
    }

    #[test]
    fn test_skips_bankrupt_players() {
        let mut ctx = ctx(3);
        ctx.game.player_mut(P1).is_bankrupt = true;
        let phase = AuctionPhase::new(&ctx.game, BOARDWALK, P0);
        assert_eq!(phase.snapshot().bidders, vec![P0, P2]);
    }
}
