//! Result shapes assembled by the binary for printing

use award_application::AuditTrail;
use award_domain::{ConfigIssue, ConfigKeyInfo, Form, FormId, Severity};
use serde::Serialize;
use std::path::PathBuf;

/// A form together with its audit trail
#[derive(Debug, Clone, Serialize)]
pub struct FormDetail {
    pub form: Form,
    pub trail: AuditTrail,
}

/// Outcome of an award type correction
#[derive(Debug, Clone, Serialize)]
pub struct AwardTypeUpdate {
    pub form_id: FormId,
    pub award_type: String,
    pub changed: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct AwardTypeList(pub Vec<String>);

/// Forms listed without paging
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct FormList(pub Vec<Form>);

#[derive(Debug, Clone, Serialize)]
pub struct ConfigKeyView {
    pub key: &'static str,
    pub description: &'static str,
    pub valid_values: Vec<&'static str>,
}

impl From<&ConfigKeyInfo> for ConfigKeyView {
    fn from(info: &ConfigKeyInfo) -> Self {
        Self {
            key: info.key,
            description: info.description,
            valid_values: info.valid_values.to_vec(),
        }
    }
}

/// One configuration file location and whether it exists
#[derive(Debug, Clone, Serialize)]
pub struct ConfigSourceView {
    pub label: String,
    pub path: PathBuf,
    pub found: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigIssueView {
    pub severity: &'static str,
    pub code: String,
    pub message: String,
}

impl From<&ConfigIssue> for ConfigIssueView {
    fn from(issue: &ConfigIssue) -> Self {
        Self {
            severity: match issue.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            },
            code: format!("{:?}", issue.code),
            message: issue.message.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct ConfigKeyList(pub Vec<ConfigKeyView>);

#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct ConfigSourceList(pub Vec<ConfigSourceView>);

#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct ConfigIssueList(pub Vec<ConfigIssueView>);
