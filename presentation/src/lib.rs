//! Presentation layer for award-workflow
//!
//! This crate contains CLI definitions and output formatters.

pub mod cli;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{
    Cli, Command, ConfigCommand, HistoryCommand, NomineeArgs, OutputFormat, PagingArgs,
    SearchArgs, StatusArgs, SubmitArgs,
};
pub use output::console::ConsoleFormatter;
pub use output::formatter::Report;
pub use output::views::{
    AwardTypeList, AwardTypeUpdate, ConfigIssueList, ConfigIssueView, ConfigKeyList,
    ConfigKeyView, ConfigSourceList, ConfigSourceView, FormDetail, FormList,
};
