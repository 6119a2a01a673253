//! Storage adapters
//!
//! [`InMemoryAwardStore`] implements every storage port over one
//! [`AwardSnapshot`] behind a single async lock; each mutating call holds
//! the write lock for its whole read-modify-write, which makes it one
//! transaction. [`StateSession`] extends that across processes by locking
//! the snapshot file from load until save.

mod memory;
mod session;
mod snapshot;

pub use memory::InMemoryAwardStore;
pub use session::{StateLock, StateSession};
pub use snapshot::{AwardSnapshot, ProfileRecord};
