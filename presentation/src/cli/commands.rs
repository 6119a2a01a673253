//! CLI command definitions

use award_domain::{Role, SortKey, SortOrder};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON output
    Json,
}

impl From<award_domain::OutputFormat> for OutputFormat {
    fn from(format: award_domain::OutputFormat) -> Self {
        match format {
            award_domain::OutputFormat::Text => OutputFormat::Text,
            award_domain::OutputFormat::Json => OutputFormat::Json,
        }
    }
}

/// CLI arguments for award-workflow
#[derive(Parser, Debug)]
#[command(name = "award-workflow")]
#[command(author, version, about = "Award nomination workflow - review chain and committee vote")]
#[command(long_about = r#"
Award Workflow tracks student award nominations through the review chain.

A nomination moves through these stages:
1. Submission: a student or organization submits one form per academic period
2. Review: head of department, associate dean, dean and student development
3. Committee: members vote, a strict majority decides
4. Signing: the committee chairman, then the chancellor

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./award.toml        Project-level config (or ./.award.toml)
3. ~/.config/award-workflow/config.toml   Global config

Example:
  award-workflow submit --user 1 --role student --award-type academic ...
  award-workflow status 12 2 --user 20 --role hod
  award-workflow vote 12 approve --user 31
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format (defaults to the configured format, then text)
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// State snapshot file (overrides storage.snapshot)
    #[arg(long, value_name = "PATH", global = true)]
    pub state: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Also write diagnostic logs to this file
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Submit a nomination for the current academic period
    Submit(SubmitArgs),

    /// Move a form to a new status as a reviewer
    Status(StatusArgs),

    /// Correct the award type of a form
    AwardType {
        /// Form id
        form: u64,
        /// New award type
        award_type: String,
    },

    /// Cast or change a committee vote
    Vote {
        /// Form id
        form: u64,
        /// approve(d) or reject(ed)
        operation: String,
        /// Voting committee member
        #[arg(long)]
        user: u64,
    },

    /// Sign a committee-approved form as the chairman
    Sign {
        /// Form id
        form: u64,
        /// Committee chairman
        #[arg(long)]
        user: u64,
    },

    /// Promote a committee member to chairman, or demote them
    Chairman {
        /// Committee member
        user: u64,
        /// Clear the chairman flag instead of setting it
        #[arg(long)]
        demote: bool,
    },

    /// Show a form with its audit trail
    Show {
        /// Form id
        form: u64,
    },

    /// Search the forms visible to a reviewer
    Search(SearchArgs),

    /// Personal and reviewer history
    #[command(subcommand)]
    History(HistoryCommand),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Submitting user
    #[arg(long)]
    pub user: u64,

    /// Submitting role (student or organization)
    #[arg(long, value_parser = parse_role, default_value = "student")]
    pub role: Role,

    #[arg(long)]
    pub award_type: String,

    #[arg(long)]
    pub student_year: u8,

    #[arg(long)]
    pub advisor: String,

    #[arg(long)]
    pub phone: String,

    #[arg(long)]
    pub address: String,

    #[arg(long)]
    pub gpa: f64,

    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    pub birth_date: String,

    #[arg(long)]
    pub detail: String,

    /// Attachment to upload (repeatable)
    #[arg(long = "file", value_name = "PATH")]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub nominee: NomineeArgs,
}

/// Nominee details, required when an organization submits
#[derive(Args, Debug, Default)]
pub struct NomineeArgs {
    #[arg(long)]
    pub nominee_firstname: Option<String>,

    #[arg(long)]
    pub nominee_lastname: Option<String>,

    #[arg(long)]
    pub nominee_email: Option<String>,

    #[arg(long)]
    pub nominee_number: Option<String>,

    #[arg(long)]
    pub nominee_faculty: Option<u32>,

    #[arg(long)]
    pub nominee_department: Option<u32>,
}

impl NomineeArgs {
    pub fn is_empty(&self) -> bool {
        self.nominee_firstname.is_none()
            && self.nominee_lastname.is_none()
            && self.nominee_email.is_none()
            && self.nominee_number.is_none()
            && self.nominee_faculty.is_none()
            && self.nominee_department.is_none()
    }
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Form id
    pub form: u64,

    /// Target status code (1-13)
    pub status: u8,

    /// Acting reviewer
    #[arg(long)]
    pub user: u64,

    /// Reviewer role (name, alias or numeric id)
    #[arg(long, value_parser = parse_role)]
    pub role: Role,

    /// Reason, required for reject and return statuses
    #[arg(long, default_value = "")]
    pub reason: String,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Searching user
    #[arg(long)]
    pub user: u64,

    /// Role of the searching user
    #[arg(long, value_parser = parse_role)]
    pub role: Role,

    #[arg(long)]
    pub campus: Option<u32>,

    /// Matches first name, last name, full name or student number
    #[arg(long)]
    pub keyword: Option<String>,

    /// Creation date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    #[arg(long)]
    pub student_year: Option<u8>,

    #[arg(long)]
    pub award_type: Option<String>,

    #[command(flatten)]
    pub paging: PagingArgs,
}

/// Sorting and paging shared by list commands
#[derive(Args, Debug, Clone)]
pub struct PagingArgs {
    /// name, student_number, academic_year, award_type or date
    #[arg(long, default_value = "date", value_parser = parse_sort_key)]
    pub sort: SortKey,

    /// asc or desc
    #[arg(long, default_value = "desc", value_parser = parse_sort_order)]
    pub order: SortOrder,

    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Page size (0 uses the configured default)
    #[arg(long, default_value_t = 0)]
    pub limit: usize,
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommand {
    /// Forms submitted by a user
    Forms {
        #[arg(long)]
        user: u64,

        /// Academic years to include (repeatable); all forms when omitted
        #[arg(long = "year")]
        years: Vec<i32>,

        /// Single semester, used together with exactly one --year
        #[arg(long)]
        semester: Option<u8>,

        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Decisions recorded by a reviewer
    Approvals {
        #[arg(long)]
        user: u64,

        #[arg(long)]
        campus: u32,

        #[arg(long)]
        keyword: Option<String>,

        /// Decision date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        award_type: Option<String>,

        /// approve(d), reject(ed) or return(ed)
        #[arg(long)]
        operation: Option<String>,

        #[command(flatten)]
        paging: PagingArgs,
    },

    /// One approval log entry with the reviewer's profile
    Log {
        /// Approval log id
        id: u64,
    },

    /// Distinct award types across all forms
    AwardTypes,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// List known configuration keys
    Keys,
    /// Show configuration file locations
    Sources,
    /// Validate the effective configuration
    Check,
}

fn parse_role(s: &str) -> Result<Role, String> {
    s.parse()
}

fn parse_sort_key(s: &str) -> Result<SortKey, String> {
    Ok(SortKey::parse_lenient(s))
}

fn parse_sort_order(s: &str) -> Result<SortOrder, String> {
    Ok(SortOrder::parse_lenient(s))
}
