//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod academic_calendar;
pub mod attachment_store;
pub mod award_repository;
pub mod event_journal;
pub mod profile_directory;
