//! Core domain concepts shared across all subdomains.
//!
//! - [`ids`] : strongly typed identifiers for users, forms and log rows
//! - [`period::AcademicPeriod`] : the (year, semester) submission window
//! - [`error::DomainError`] : semantic error categories

pub mod error;
pub mod ids;
pub mod period;
