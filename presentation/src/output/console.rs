//! Console output formatter for workflow results

use crate::cli::commands::OutputFormat;
use crate::output::formatter::Report;
use crate::output::views::{
    AwardTypeList, AwardTypeUpdate, ConfigIssueList, ConfigKeyList, ConfigSourceList,
    FormDetail, FormList,
};
use award_application::{ApprovalLogDetail, CommitteeMember, StatusChangeOutcome};
use award_domain::{
    ActorProfile, ApprovalHistoryRow, CommitteeVoteResult, Decision, Form, FormStatus, Page,
};
use colored::{ColoredString, Colorize};

/// Formats workflow results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Render a result in the requested format
    pub fn render<R: Report + ?Sized>(report: &R, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => report.to_text(),
            OutputFormat::Json => report.to_json(),
        }
    }

    /// Status code and label, colored by outcome
    pub fn status(status: FormStatus) -> ColoredString {
        let text = format!("{} ({})", status.code(), status.label());
        if status.is_signing() {
            text.cyan()
        } else {
            match status.decision() {
                Some(Decision::Approve) => text.green(),
                Some(Decision::Reject) => text.red(),
                None => text.yellow(),
            }
        }
    }

    fn decision(decision: Decision) -> ColoredString {
        match decision {
            Decision::Approve => decision.as_str().green(),
            Decision::Reject => decision.as_str().red(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn field(label: &str, value: impl std::fmt::Display) -> String {
        format!("{} {}\n", format!("{}:", label).cyan().bold(), value)
    }

    /// One line per form, used in listings
    fn form_line(form: &Form) -> String {
        format!(
            "  #{:<5} {:<28} {:<10} {:<16} {} {}",
            form.id,
            form.nominee_name(),
            form.student_number,
            form.award_type,
            form.period,
            Self::status(form.status)
        )
    }

    fn page_footer<T>(page: &Page<T>) -> String {
        format!(
            "\n{}\n",
            format!(
                "Page {}/{} ({} items, {} per page)",
                page.current_page,
                page.total_pages.max(1),
                page.total_items,
                page.limit
            )
            .dimmed()
        )
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Report for Form {
    fn to_text(&self) -> String {
        let mut output = String::new();
        output.push_str(&ConsoleFormatter::header(&format!("Nomination #{}", self.id)));
        output.push('\n');

        output.push_str(&ConsoleFormatter::field("Status", ConsoleFormatter::status(self.status)));
        if let Some(reason) = &self.reject_reason {
            output.push_str(&ConsoleFormatter::field("Reason", reason.red()));
        }
        output.push_str(&ConsoleFormatter::field("Period", self.period));
        output.push_str(&ConsoleFormatter::field("Award type", &self.award_type));
        output.push_str(&ConsoleFormatter::field("Submitted by", self.user_id));
        if let Some(org) = &self.organization {
            output.push_str(&ConsoleFormatter::field(
                "Organization",
                format!("{} ({}, {})", org.name, org.kind, org.location),
            ));
        }

        output.push_str(&ConsoleFormatter::section_header("Nominee"));
        output.push_str(&ConsoleFormatter::field("Name", self.nominee_name()));
        output.push_str(&ConsoleFormatter::field("Student number", &self.student_number));
        output.push_str(&ConsoleFormatter::field("Email", &self.student_email));
        output.push_str(&ConsoleFormatter::field(
            "Faculty/Department/Campus",
            format!("{}/{}/{}", self.faculty_id, self.department_id, self.campus_id),
        ));
        output.push_str(&ConsoleFormatter::field("Year", self.student_year));
        output.push_str(&ConsoleFormatter::field("GPA", format!("{:.2}", self.gpa)));
        output.push_str(&ConsoleFormatter::field("Advisor", &self.advisor_name));

        output.push_str(&ConsoleFormatter::section_header("Detail"));
        output.push_str(&ConsoleFormatter::indent(&self.form_detail, "  "));
        output.push('\n');

        if !self.attachments.is_empty() {
            output.push_str(&ConsoleFormatter::section_header("Attachments"));
            for file in &self.attachments {
                output.push_str(&format!(
                    "  * {} ({}, {} bytes)\n",
                    file.file_path, file.file_type, file.file_size
                ));
            }
        }

        output.push_str(&format!(
            "\n{}\n",
            format!(
                "Created {} / updated {}",
                self.created_at.to_rfc3339(),
                self.latest_update.to_rfc3339()
            )
            .dimmed()
        ));
        output
    }
}

impl Report for FormDetail {
    fn to_text(&self) -> String {
        let mut output = self.form.to_text();
        let trail = &self.trail;

        output.push_str(&ConsoleFormatter::section_header("Approval log"));
        if trail.approvals.is_empty() {
            output.push_str(&format!("  {}\n", "(none)".dimmed()));
        }
        for log in &trail.approvals {
            output.push_str(&format!(
                "  #{} user {} {} at {}",
                log.id,
                log.user_id,
                ConsoleFormatter::decision(log.decision),
                log.approved_at.to_rfc3339()
            ));
            if let Some(reason) = &log.reject_reason {
                output.push_str(&format!(" ({})", reason));
            }
            output.push('\n');
        }

        if !trail.type_logs.is_empty() {
            output.push_str(&ConsoleFormatter::section_header("Student development log"));
            for log in &trail.type_logs {
                output.push_str(&format!(
                    "  #{} user {} {} {}",
                    log.id,
                    log.user_id,
                    log.log_type.as_str(),
                    ConsoleFormatter::decision(log.status)
                ));
                if let Some(old) = &log.old_value {
                    output.push_str(&format!(" [award type was {}]", old));
                }
                if let Some(reason) = &log.reject_reason {
                    output.push_str(&format!(" ({})", reason));
                }
                output.push('\n');
            }
        }

        if !trail.votes.is_empty() {
            output.push_str(&ConsoleFormatter::section_header("Committee votes"));
            for vote in &trail.votes {
                let operation = if vote.operation.is_approve() {
                    vote.operation.as_str().green()
                } else {
                    vote.operation.as_str().red()
                };
                output.push_str(&format!(
                    "  user {} {} at {}\n",
                    vote.voter_id,
                    operation,
                    vote.voted_at.to_rfc3339()
                ));
            }
        }

        if !trail.signed.is_empty() {
            output.push_str(&ConsoleFormatter::section_header("Signatures"));
            for log in &trail.signed {
                output.push_str(&format!(
                    "  user {} {} at {}\n",
                    log.user_id,
                    ConsoleFormatter::status(log.signed_status),
                    log.signed_at.to_rfc3339()
                ));
            }
        }
        output
    }
}

impl Report for FormList {
    fn to_text(&self) -> String {
        if self.0.is_empty() {
            return format!("{}\n", "No forms found".dimmed());
        }
        let mut output = String::new();
        for form in &self.0 {
            output.push_str(&ConsoleFormatter::form_line(form));
            output.push('\n');
        }
        output
    }
}

impl Report for Page<Form> {
    fn to_text(&self) -> String {
        let mut output = FormList(self.items.clone()).to_text();
        output.push_str(&ConsoleFormatter::page_footer(self));
        output
    }
}

impl Report for Page<ApprovalHistoryRow> {
    fn to_text(&self) -> String {
        let mut output = String::new();
        if self.items.is_empty() {
            output.push_str(&format!("{}\n", "No decisions found".dimmed()));
        }
        for row in &self.items {
            output.push_str(&format!(
                "  log #{:<5} form #{:<5} {:<28} {:<10} {:<16} {} {}\n",
                row.approval_log_id,
                row.form_id,
                format!("{} {}", row.student_firstname, row.student_lastname),
                row.student_number,
                row.award_type,
                ConsoleFormatter::decision(row.operation),
                row.operation_date.format("%Y-%m-%d")
            ));
        }
        output.push_str(&ConsoleFormatter::page_footer(self));
        output
    }
}

impl Report for StatusChangeOutcome {
    fn to_text(&self) -> String {
        if self.changed {
            format!(
                "Form #{}: {} -> {}\n",
                self.form_id,
                ConsoleFormatter::status(self.previous),
                ConsoleFormatter::status(self.status)
            )
        } else {
            format!(
                "Form #{} already at {}\n",
                self.form_id,
                ConsoleFormatter::status(self.status)
            )
        }
    }
}

impl Report for CommitteeVoteResult {
    fn to_text(&self) -> String {
        let mut output = String::new();
        output.push_str(&ConsoleFormatter::field("Vote", self.operation));
        output.push_str(&ConsoleFormatter::field(
            "Tally",
            format!(
                "{} approve / {} reject ({} of {} voted)",
                self.approve_count.to_string().green(),
                self.reject_count.to_string().red(),
                self.voted_count,
                self.total_voters
            ),
        ));
        output.push_str(&ConsoleFormatter::field(
            "Majority",
            if self.has_majority {
                format!("reached (target {})", self.majority_target).green()
            } else {
                format!("pending (target {})", self.majority_target).yellow()
            },
        ));
        output.push_str(&ConsoleFormatter::field(
            "Form status",
            ConsoleFormatter::status(self.form_status),
        ));
        if self.status_changed {
            output.push_str(&format!("{}\n", "Status changed by this vote".bold()));
        }
        output
    }
}

impl Report for Vec<CommitteeMember> {
    fn to_text(&self) -> String {
        let mut output = ConsoleFormatter::section_header("Committee");
        for member in self {
            if member.profile.is_chairman {
                output.push_str(&format!(
                    "  user {} {}\n",
                    member.user_id,
                    "chairman".cyan().bold()
                ));
            } else {
                output.push_str(&format!("  user {}\n", member.user_id));
            }
        }
        output
    }
}

impl Report for ApprovalLogDetail {
    fn to_text(&self) -> String {
        let log = &self.log;
        let mut output = String::new();
        output.push_str(&ConsoleFormatter::field("Log", log.id));
        output.push_str(&ConsoleFormatter::field("Form", log.form_id));
        output.push_str(&ConsoleFormatter::field(
            "Decision",
            ConsoleFormatter::decision(log.decision),
        ));
        if let Some(reason) = &log.reject_reason {
            output.push_str(&ConsoleFormatter::field("Reason", reason));
        }
        output.push_str(&ConsoleFormatter::field("At", log.approved_at.to_rfc3339()));

        let reviewer = match &self.reviewer {
            Some(ActorProfile::HeadOfDepartment(p)) => format!(
                "user {} head of department (faculty {}, department {})",
                log.user_id, p.faculty_id, p.department_id
            ),
            Some(ActorProfile::AssociateDean(p)) => format!(
                "user {} associate dean (faculty {})",
                log.user_id, p.faculty_id
            ),
            Some(ActorProfile::Dean(p)) => {
                format!("user {} dean (faculty {})", log.user_id, p.faculty_id)
            }
            Some(profile) => format!("user {} {}", log.user_id, profile.role()),
            None => format!("user {} {}", log.user_id, "(profile unavailable)".dimmed()),
        };
        output.push_str(&ConsoleFormatter::field("Reviewer", reviewer));
        output
    }
}

impl Report for AwardTypeUpdate {
    fn to_text(&self) -> String {
        if self.changed {
            format!("Form #{} award type set to {}\n", self.form_id, self.award_type.bold())
        } else {
            format!("Form #{} already has award type {}\n", self.form_id, self.award_type)
        }
    }
}

impl Report for AwardTypeList {
    fn to_text(&self) -> String {
        self.0.iter().map(|t| format!("  {}\n", t)).collect()
    }
}

impl Report for ConfigKeyList {
    fn to_text(&self) -> String {
        let mut output = ConsoleFormatter::section_header("Configuration keys");
        for key in &self.0 {
            output.push_str(&format!("  {:<28} {}", key.key.bold(), key.description));
            if !key.valid_values.is_empty() {
                output.push_str(&format!(" [{}]", key.valid_values.join(", ")));
            }
            output.push('\n');
        }
        output
    }
}

impl Report for ConfigSourceList {
    fn to_text(&self) -> String {
        let mut output = ConsoleFormatter::section_header("Configuration sources");
        for source in &self.0 {
            let mark = if source.found {
                "found".green()
            } else {
                "not found".dimmed()
            };
            output.push_str(&format!(
                "  {:<10} {} {}\n",
                source.label,
                source.path.display(),
                mark
            ));
        }
        output
    }
}

impl Report for ConfigIssueList {
    fn to_text(&self) -> String {
        if self.0.is_empty() {
            return format!("{}\n", "Configuration OK".green());
        }
        let mut output = String::new();
        for issue in &self.0 {
            let severity = if issue.severity == "error" {
                issue.severity.red().bold()
            } else {
                issue.severity.yellow()
            };
            output.push_str(&format!("  {} {}: {}\n", severity, issue.code, issue.message));
        }
        output
    }
}
