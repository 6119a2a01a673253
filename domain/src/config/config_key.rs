//! Config key registry.
//!
//! Defines metadata for known configuration keys: name, description
//! and valid values. Used by the `config` subcommand to list settings.

/// Metadata for a single config key.
#[derive(Debug, Clone)]
pub struct ConfigKeyInfo {
    /// Dotted key path (e.g., `"uploads.max_total_bytes"`).
    pub key: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Valid string values (empty if freeform).
    pub valid_values: &'static [&'static str],
}

/// All known config keys with their metadata.
pub fn known_keys() -> &'static [ConfigKeyInfo] {
    &KNOWN_KEYS
}

/// Look up a config key by its dotted path.
pub fn lookup_key(key: &str) -> Option<&'static ConfigKeyInfo> {
    KNOWN_KEYS.iter().find(|k| k.key == key)
}

static KNOWN_KEYS: [ConfigKeyInfo; 10] = [
    ConfigKeyInfo {
        key: "uploads.directory",
        description: "Directory where attachments are stored",
        valid_values: &[],
    },
    ConfigKeyInfo {
        key: "uploads.allowed_extensions",
        description: "Accepted attachment extensions",
        valid_values: &[],
    },
    ConfigKeyInfo {
        key: "uploads.max_total_bytes",
        description: "Aggregate size cap for one submission",
        valid_values: &[],
    },
    ConfigKeyInfo {
        key: "committee.reject_reason",
        description: "Reason recorded when the committee majority rejects",
        valid_values: &[],
    },
    ConfigKeyInfo {
        key: "search.default_page_size",
        description: "Page size when none is requested",
        valid_values: &[],
    },
    ConfigKeyInfo {
        key: "search.max_page_size",
        description: "Upper bound for the form search page size",
        valid_values: &[],
    },
    ConfigKeyInfo {
        key: "search.history_page_size",
        description: "Page size of the paged personal history",
        valid_values: &[],
    },
    ConfigKeyInfo {
        key: "journal.enabled",
        description: "Write workflow events to a JSONL journal",
        valid_values: &["true", "false"],
    },
    ConfigKeyInfo {
        key: "journal.path",
        description: "Journal file location",
        valid_values: &[],
    },
    ConfigKeyInfo {
        key: "storage.snapshot",
        description: "JSON snapshot the store is loaded from and saved to",
        valid_values: &[],
    },
];
