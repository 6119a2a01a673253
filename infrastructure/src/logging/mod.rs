//! Logging infrastructure: structured workflow journal.
//!
//! Provides [`JsonlEventJournal`], a JSONL file writer that implements
//! the [`EventJournal`](award_application::EventJournal) port.

mod jsonl_journal;

pub use jsonl_journal::JsonlEventJournal;
