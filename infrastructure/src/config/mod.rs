//! Configuration file loading for award-workflow
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./award.toml` or `./.award.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/award-workflow/config.toml`
//! 4. Fallback: `~/.config/award-workflow/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileCommitteeConfig, FileConfig, FileJournalConfig, FileOutputConfig, FileOutputFormat,
    FileSearchConfig, FileStorageConfig, FileUploadsConfig,
};
pub use loader::{ConfigLoader, ConfigSource};
