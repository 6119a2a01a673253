//! Review chain: the status state machine and its audit trail
//!
//! ```text
//!  1 ──HoD──▶ 2 ──AD──▶ 4 ──Dean──▶ 6 ──SD──▶ 8 ══committee vote══▶ 10 ──chair──▶ 12 ──chancellor──▶ 13
//!  │          │         │           │         ║
//!  ▼          ▼         ▼           ▼         ╚════════════════════▶ 11
//!  3          5         7           9
//! ```
//!
//! Reject and return statuses (3, 5, 7, 9, 11) are terminal and carry a
//! mandatory reason.

pub mod audit;
pub mod transition;

pub use audit::{ApprovalLog, AuditEntry, SignedLog, TypeLog, TypeLogKind};
pub use transition::{
    StatusChange, TransitionPath, allowed_targets, plan_chairman_signature, plan_status_change,
};
