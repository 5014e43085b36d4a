//! The six phases of a turn.
//!
//! Each phase is a struct owning its private data. `Phase` is the enum of
//! all of them, dispatched through [`PhaseStep`] with `enum_dispatch`.
//! A phase never touches the stack itself: it returns a [`PhaseResult`]
//! and `GameFlow` applies it.
//!
//! | Phase | Entered by | Left by |
//! |-------|------------|---------|
//! | `PreRoll` | start of turn | replaced by `PostRoll`; pushes `Jail`, `Trade` or management |
//! | `PostRoll` | rolling | replaced by `PreRoll`; pushes `Auction` |
//! | `Jail` | pushed by `PreRoll` | completes |
//! | `PropertyManagement` | pushed by `PreRoll` | completes on "done" |
//! | `Auction` | pushed by `PostRoll` | completes when sold or abandoned |
//! | `Trade` | pushed by `PreRoll` | completes on accept, reject or cancel |

use enum_dispatch::enum_dispatch;
use serde::Serialize;

use crate::board::PropertyId;
use crate::core::{InvariantViolation, Money, PlayerId};
use crate::flow::FlowContext;

mod auction;
mod jail;
mod post_roll;
mod pre_roll;
mod property_management;
mod trade;

pub use auction::{AuctionPhase, AuctionSnapshot};
pub use jail::JailPhase;
pub use post_roll::PostRollPhase;
pub use pre_roll::PreRollPhase;
pub use property_management::{ManagementAction, PropertyManagementPhase};
pub use trade::{TradePhase, TradeSide, TradeSnapshot, TradeStep};

/// Phase identity, for the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum PhaseTag {
    PreRoll,
    PostRoll,
    Jail,
    PropertyManagement,
    Auction,
    Trade,
}

/// What the flow should do after a step.
#[derive(Debug)]
pub enum PhaseResult {
    /// Stay on this phase.
    Running,
    /// Finished; return to the phase below.
    Complete,
    /// Suspend this phase and start another on top.
    Push(Phase),
    /// Swap this phase for another at the same depth.
    Replace(Phase),
}

/// The decision a phase is waiting for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Prompt {
    /// 1 roll, 2 manage properties, 3 trade, 4 view status.
    TurnMenu,
    /// 1 buy, 2 auction.
    BuyOrAuction { property: PropertyId, price: Money },
    /// 1 pay fine, 2 use card, 3 roll for doubles.
    JailMenu { fine: Money, has_card: bool, attempt: u8 },
    /// 1-6 pick an action (see [`ManagementAction`]), 0 done.
    ManagementMenu,
    /// 1-based index into the player's owned list, 0 back.
    SelectProperty { action: ManagementAction },
    /// An amount above `high_bid`, or 0 to drop out.
    Bid { bidder: PlayerId, property: PropertyId, high_bid: Money },
    /// 1-based player number, 0 cancel.
    SelectTradePartner,
    /// 1 toggle own property, 2 toggle partner property, 3 cash offered,
    /// 4 cash requested, 5 propose, 0 cancel.
    TradeMenu,
    /// 1-based index into the side owner's list, 0 back.
    SelectTradeProperty { side: TradeSide },
    /// Amount of cash for a side.
    EnterTradeCash { side: TradeSide },
    /// `responder` answers: 1 accept, 2 reject, 3 counter.
    TradeResponse { responder: PlayerId },
}

/// One phase's behaviour.
#[enum_dispatch]
pub trait PhaseStep {
    /// Advance by one tick, taking at most one input.
    fn step(&mut self, ctx: &mut FlowContext, dt: f32) -> Result<PhaseResult, InvariantViolation>;

    fn tag(&self) -> PhaseTag;

    /// The pending question, or `None` if the next step needs no input.
    fn prompt(&self, ctx: &FlowContext) -> Option<Prompt>;
}

/// A phase activation and its private data.
#[enum_dispatch(PhaseStep)]
#[derive(Debug)]
pub enum Phase {
    PreRoll(PreRollPhase),
    PostRoll(PostRollPhase),
    Jail(JailPhase),
    PropertyManagement(PropertyManagementPhase),
    Auction(AuctionPhase),
    Trade(TradePhase),
}

/// A 1-based menu index into `list`.
pub(crate) fn pick<T: Copy>(list: &[T], choice: i32) -> Option<T> {
    usize::try_from(choice)
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|idx| list.get(idx).copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick() {
        let list = [10, 20, 30];
        assert_eq!(pick(&list, 1), Some(10));
        assert_eq!(pick(&list, 3), Some(30));
        assert_eq!(pick(&list, 0), None);
        assert_eq!(pick(&list, 4), None);
        assert_eq!(pick(&list, -1), None);
    }
}
