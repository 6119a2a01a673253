//! Search configuration from TOML (`[search]` section)

use award_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Raw paging configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSearchConfig {
    pub default_page_size: usize,
    pub max_page_size: usize,
    pub history_page_size: usize,
}

impl Default for FileSearchConfig {
    fn default() -> Self {
        Self {
            default_page_size: 5,
            max_page_size: 5,
            history_page_size: 10,
        }
    }
}

impl FileSearchConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        for (field, value) in [
            ("search.default_page_size", self.default_page_size),
            ("search.max_page_size", self.max_page_size),
            ("search.history_page_size", self.history_page_size),
        ] {
            if value == 0 {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::ZeroPageSize,
                    format!("{}: must be greater than 0", field),
                ));
            }
        }
        if self.max_page_size > 0 && self.default_page_size > self.max_page_size {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::PageSizeAboveCap,
                format!(
                    "search.default_page_size: {} exceeds max_page_size {}, pages are capped",
                    self.default_page_size, self.max_page_size
                ),
            ));
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use award_domain::Severity;

    #[test]
    fn test_default_above_cap_warns() {
        let config = FileSearchConfig {
            default_page_size: 10,
            max_page_size: 5,
            history_page_size: 10,
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
    }

    #[test]
    fn test_zero_page_size_is_error() {
        let config = FileSearchConfig {
            history_page_size: 0,
            ..Default::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
        assert!(issues[0].message.contains("history_page_size"));
    }
}
