//! Output formatter trait

use serde::Serialize;

/// A command result that can be printed as text or JSON
pub trait Report: Serialize {
    /// Human-readable rendering
    fn to_text(&self) -> String;

    /// Pretty-printed JSON rendering
    fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
