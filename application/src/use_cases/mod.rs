//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod cast_vote;
pub mod change_status;
pub mod queries;
pub mod resolve_scope;
pub mod set_chairman;
pub mod sign_nomination;
pub mod submit_nomination;
pub mod update_award_type;

#[cfg(test)]
pub(crate) mod test_support;
