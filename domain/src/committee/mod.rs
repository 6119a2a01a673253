//! Committee majority vote
//!
//! Non-chairman committee members each hold one *current* vote per form.
//! After every vote the tally is recomputed over all votes of the form and,
//! once a strict majority of the eligible voters agrees, the form moves to
//! status 10 (approved) or 11 (rejected). The chairman does not vote; their
//! signature is a separate step after approval.
//!
//! # Majority rule
//!
//! ```text
//! half = N / 2            (integer division, N = eligible voters)
//! approve  ⇔  approvals > half
//! reject   ⇔  rejections > half
//! ```
//!
//! For odd N this is a simple majority; for even N a tie at `half` decides
//! nothing either way.

pub mod tally;
pub mod vote;

pub use tally::{CommitteeOutcome, CommitteeRule, CommitteeVoteResult, VoteTally};
pub use vote::{Ballot, VoteLog, VoteOperation};
