//! Structured configuration issues.
//!
//! Configuration is loaded leniently; problems that would make the
//! workflow misbehave are reported as issues with a severity instead of
//! failing the load. The caller decides whether an `Error` aborts.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// No file extension is accepted, so every upload fails.
    NoAllowedExtensions,
    /// Aggregate upload cap of zero bytes.
    ZeroUploadLimit,
    /// A page size of zero.
    ZeroPageSize,
    /// Default page size above the cap; it will be clamped.
    PageSizeAboveCap,
    /// Empty committee reject reason.
    EmptyRejectReason,
    /// Journal enabled without a writable path.
    JournalWithoutPath,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
