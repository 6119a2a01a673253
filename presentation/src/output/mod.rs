//! Text and JSON rendering of command results

pub mod console;
pub mod formatter;
pub mod views;
