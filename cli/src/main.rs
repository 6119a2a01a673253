//! CLI entrypoint for award-workflow
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use award_application::{
    CastVoteInput, CastVoteUseCase, ChangeStatusInput, ChangeStatusUseCase, EventJournal,
    NoEventJournal, NominationQueries, ScopeResolver, SetChairmanUseCase, SignNominationUseCase,
    SubmitNominationInput, SubmitNominationUseCase, UpdateAwardTypeUseCase, WorkflowPolicy,
};
use award_domain::{
    Actor, ApprovalHistoryFilter, ConfigIssue, Decision, FormFilter, FormId, FormStatus, LogId,
    NominationInput, NomineeInput, PageRequest, Role, Severity, StoredFile, UserId, known_keys,
    nomination::parse_date,
};
use award_infrastructure::{
    ConfigLoader, FileConfig, InMemoryAwardStore, JsonlEventJournal, LocalAttachmentStore,
    StateSession,
};
use award_presentation::{
    AwardTypeList, AwardTypeUpdate, Cli, Command, ConfigCommand, ConfigIssueList,
    ConfigIssueView, ConfigKeyList, ConfigKeyView, ConfigSourceList, ConfigSourceView,
    ConsoleFormatter, FormDetail, FormList, HistoryCommand, NomineeArgs, OutputFormat,
    SearchArgs, SubmitArgs,
};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting award-workflow");

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };

    let issues = config.validate();

    // `config` inspects the configuration, so it runs before validation aborts
    if let Command::Config(command) = &cli.command {
        let format = output_format(&cli, &config);
        let output = match command {
            ConfigCommand::Keys => ConsoleFormatter::render(
                &ConfigKeyList(known_keys().iter().map(ConfigKeyView::from).collect()),
                format,
            ),
            ConfigCommand::Sources => ConsoleFormatter::render(
                &ConfigSourceList(
                    ConfigLoader::sources(cli.config.as_ref())
                        .into_iter()
                        .map(|s| ConfigSourceView {
                            label: s.label.to_string(),
                            path: s.path,
                            found: s.found,
                        })
                        .collect(),
                ),
                format,
            ),
            ConfigCommand::Check => ConsoleFormatter::render(
                &ConfigIssueList(issues.iter().map(ConfigIssueView::from).collect()),
                format,
            ),
        };
        print!("{}", ensure_newline(output));
        return Ok(());
    }

    check_config(&issues)?;

    if !config.output.color {
        colored::control::set_override(false);
    }
    let format = output_format(&cli, &config);

    // === Dependency Injection ===
    let state_path = cli
        .state
        .clone()
        .unwrap_or_else(|| config.storage.snapshot.clone());
    // Held until the state is saved so concurrent invocations serialize
    let session = StateSession::open(&state_path)
        .await
        .with_context(|| format!("Failed to load state from {}", state_path.display()))?;

    let journal: Arc<dyn EventJournal> = if config.journal.enabled {
        match JsonlEventJournal::new(&config.journal.path) {
            Some(journal) => Arc::new(journal),
            None => {
                warn!(
                    "Journal at {} unavailable, continuing without it",
                    config.journal.path.display()
                );
                Arc::new(NoEventJournal)
            }
        }
    } else {
        Arc::new(NoEventJournal)
    };

    let app = App::new(session.store(), journal, &config);

    let outcome = app.run(cli.command, format).await?;

    if outcome.mutated {
        session
            .commit(&outcome.written, &*app.attachments)
            .await
            .with_context(|| format!("Failed to save state to {}", state_path.display()))?;
        info!("State saved to {}", state_path.display());
    }
    print!("{}", ensure_newline(outcome.output));

    Ok(())
}

/// Install the tracing subscriber, optionally teeing into a log file
fn init_logging(
    verbose: u8,
    log_file: Option<&Path>,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    // Initialize logging based on verbosity level
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(level))
            .with_target(false)
            .init();
        return Ok(None);
    };

    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .context("Log file path has no file name")?;
    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();
    Ok(Some(guard))
}

fn check_config(issues: &[ConfigIssue]) -> Result<()> {
    for issue in issues {
        match issue.severity {
            Severity::Warning => warn!("Config: {}", issue.message),
            Severity::Error => eprintln!("Config error: {}", issue.message),
        }
    }
    if issues.iter().any(ConfigIssue::is_error) {
        bail!("Invalid configuration; run `award-workflow config check` for details");
    }
    Ok(())
}

fn output_format(cli: &Cli, config: &FileConfig) -> OutputFormat {
    cli.format
        .or_else(|| config.output.format.map(OutputFormat::from))
        .unwrap_or(OutputFormat::Text)
}

fn ensure_newline(mut output: String) -> String {
    if !output.ends_with('\n') {
        output.push('\n');
    }
    output
}

/// What a command printed and changed
struct Outcome {
    output: String,
    /// Whether state must be saved
    mutated: bool,
    /// Attachment files referenced only by the unsaved state
    written: Vec<StoredFile>,
}

impl Outcome {
    fn read(output: String) -> Self {
        Self::new(output, false)
    }

    fn new(output: String, mutated: bool) -> Self {
        Self {
            output,
            mutated,
            written: Vec::new(),
        }
    }
}

/// Use cases wired against one store
struct App {
    submit: SubmitNominationUseCase,
    change_status: ChangeStatusUseCase,
    award_type: UpdateAwardTypeUseCase,
    vote: CastVoteUseCase,
    sign: SignNominationUseCase,
    chairman: SetChairmanUseCase,
    queries: NominationQueries,
    attachments: Arc<LocalAttachmentStore>,
    policy: WorkflowPolicy,
}

impl App {
    fn new(
        store: Arc<InMemoryAwardStore>,
        journal: Arc<dyn EventJournal>,
        config: &FileConfig,
    ) -> Self {
        let policy = config.to_policy();
        let scopes = Arc::new(ScopeResolver::new(store.clone()));
        let attachments = Arc::new(LocalAttachmentStore::new(config.uploads.directory.clone()));

        Self {
            submit: SubmitNominationUseCase::new(
                store.clone(),
                store.clone(),
                store.clone(),
                attachments.clone(),
                journal.clone(),
                policy.clone(),
            ),
            change_status: ChangeStatusUseCase::new(store.clone(), scopes.clone(), journal.clone()),
            award_type: UpdateAwardTypeUseCase::new(store.clone(), journal.clone()),
            vote: CastVoteUseCase::new(
                store.clone(),
                store.clone(),
                journal.clone(),
                policy.committee.clone(),
            ),
            sign: SignNominationUseCase::new(store.clone(), store.clone(), journal.clone()),
            chairman: SetChairmanUseCase::new(store.clone(), journal),
            queries: NominationQueries::new(store.clone(), store.clone(), scopes, policy.paging),
            attachments,
            policy,
        }
    }

    async fn run(&self, command: Command, format: OutputFormat) -> Result<Outcome> {
        match command {
            Command::Submit(args) => {
                let input = self.submit_input(args).await?;
                let form = self.submit.execute(input).await?;
                Ok(Outcome {
                    output: ConsoleFormatter::render(&form, format),
                    mutated: true,
                    written: form.attachments.iter().map(|a| a.stored_file()).collect(),
                })
            }
            Command::Status(args) => {
                let requested = FormStatus::try_from(args.status).map_err(anyhow::Error::msg)?;
                let outcome = self
                    .change_status
                    .execute(ChangeStatusInput {
                        form_id: FormId(args.form),
                        requested,
                        reason: args.reason,
                        actor: Actor::new(args.user, args.role),
                    })
                    .await?;
                Ok(Outcome::new(ConsoleFormatter::render(&outcome, format), outcome.changed))
            }
            Command::AwardType { form, award_type } => {
                let changed = self.award_type.execute(FormId(form), &award_type).await?;
                let update = AwardTypeUpdate {
                    form_id: FormId(form),
                    award_type: award_type.trim().to_string(),
                    changed,
                };
                Ok(Outcome::new(ConsoleFormatter::render(&update, format), changed))
            }
            Command::Vote {
                form,
                operation,
                user,
            } => {
                let result = self
                    .vote
                    .execute(CastVoteInput {
                        form_id: FormId(form),
                        actor: Actor::new(user, Role::Committee),
                        operation,
                    })
                    .await?;
                Ok(Outcome::new(ConsoleFormatter::render(&result, format), true))
            }
            Command::Sign { form, user } => {
                let outcome = self
                    .sign
                    .execute(FormId(form), Actor::new(user, Role::Committee))
                    .await?;
                Ok(Outcome::new(ConsoleFormatter::render(&outcome, format), outcome.changed))
            }
            Command::Chairman { user, demote } => {
                let members = self.chairman.execute(UserId(user), !demote).await?;
                Ok(Outcome::new(ConsoleFormatter::render(&members, format), true))
            }
            Command::Show { form } => {
                let form_id = FormId(form);
                let detail = FormDetail {
                    form: self.queries.form(form_id).await?,
                    trail: self.queries.audit_trail(form_id).await?,
                };
                Ok(Outcome::read(ConsoleFormatter::render(&detail, format)))
            }
            Command::Search(args) => {
                let page = self.search(args).await?;
                Ok(Outcome::read(ConsoleFormatter::render(&page, format)))
            }
            Command::History(command) => Ok(Outcome::read(self.history(command, format).await?)),
            Command::Config(_) => bail!("config is handled before the store is opened"),
        }
    }

    async fn submit_input(&self, args: SubmitArgs) -> Result<SubmitNominationInput> {
        let policy = &self.policy.attachments;
        let mut uploads = Vec::with_capacity(args.files.len());
        let mut total: u64 = 0;
        for path in &args.files {
            let metadata = tokio::fs::metadata(path)
                .await
                .with_context(|| format!("Cannot read {}", path.display()))?;
            total = total.saturating_add(metadata.len());
            // Refuse to buffer an oversized set; the use case reports the same limit
            if total > policy.max_total_bytes {
                bail!(
                    "Attachments exceed the {} byte limit",
                    policy.max_total_bytes
                );
            }
            let content = tokio::fs::read(path)
                .await
                .with_context(|| format!("Cannot read {}", path.display()))?;
            uploads.push(award_domain::Upload::new(file_name(path), content));
        }

        let nomination = NominationInput {
            award_type: args.award_type,
            student_year: args.student_year,
            advisor_name: args.advisor,
            student_phone_number: args.phone,
            student_address: args.address,
            gpa: args.gpa,
            student_date_of_birth: args.birth_date,
            form_detail: args.detail,
            nominee: nominee(args.nominee),
        };

        Ok(
            SubmitNominationInput::new(Actor::new(args.user, args.role), nomination)
                .with_uploads(uploads),
        )
    }

    async fn search(&self, args: SearchArgs) -> Result<award_domain::Page<award_domain::Form>> {
        let filter = FormFilter {
            campus_id: args.campus,
            keyword: args.keyword,
            date: args
                .date
                .as_deref()
                .map(|d| parse_date("date", d))
                .transpose()?,
            student_year: args.student_year,
            award_type: args.award_type,
            sort_by: args.paging.sort,
            sort_order: args.paging.order,
            ..FormFilter::default()
        };
        let page = PageRequest::new(args.paging.page, args.paging.limit);
        Ok(self
            .queries
            .search(Actor::new(args.user, args.role), filter, page)
            .await?)
    }

    async fn history(&self, command: HistoryCommand, format: OutputFormat) -> Result<String> {
        let output = match command {
            HistoryCommand::Forms {
                user,
                years,
                semester,
                page,
            } => {
                let user_id = UserId(user);
                match (years.as_slice(), semester) {
                    ([], None) => ConsoleFormatter::render(
                        &FormList(self.queries.forms_by_user(user_id).await?),
                        format,
                    ),
                    ([year], Some(semester)) => {
                        let period = award_domain::AcademicPeriod::new(*year, semester);
                        let form = self.queries.form_by_user_and_period(user_id, period).await?;
                        ConsoleFormatter::render(&form, format)
                    }
                    ([year], None) => ConsoleFormatter::render(
                        &FormList(self.queries.forms_by_user_and_year(user_id, *year).await?),
                        format,
                    ),
                    (years, None) => {
                        let page = self
                            .queries
                            .history(user_id, years, PageRequest::new(page, 0))
                            .await?;
                        ConsoleFormatter::render(&page, format)
                    }
                    (_, Some(_)) => bail!("--semester needs exactly one --year"),
                }
            }
            HistoryCommand::Approvals {
                user,
                campus,
                keyword,
                date,
                award_type,
                operation,
                paging,
            } => {
                let mut filter = ApprovalHistoryFilter::new(UserId(user), campus);
                filter.keyword = keyword;
                filter.date = date
                    .as_deref()
                    .map(|d| parse_date("date", d))
                    .transpose()?;
                filter.award_type = award_type;
                // Unknown operations leave the filter open
                filter.operation = operation.as_deref().and_then(Decision::parse_filter);
                filter.sort_by = paging.sort;
                filter.sort_order = paging.order;
                let page = self
                    .queries
                    .approval_history(&filter, PageRequest::new(paging.page, paging.limit))
                    .await?;
                ConsoleFormatter::render(&page, format)
            }
            HistoryCommand::Log { id } => {
                let detail = self.queries.approval_log_detail(LogId(id)).await?;
                ConsoleFormatter::render(&detail, format)
            }
            HistoryCommand::AwardTypes => {
                let types = AwardTypeList(self.queries.award_types().await?);
                ConsoleFormatter::render(&types, format)
            }
        };
        Ok(output)
    }
}

fn nominee(args: NomineeArgs) -> Option<NomineeInput> {
    if args.is_empty() {
        return None;
    }
    Some(NomineeInput {
        firstname: args.nominee_firstname.unwrap_or_default(),
        lastname: args.nominee_lastname.unwrap_or_default(),
        email: args.nominee_email.unwrap_or_default(),
        student_number: args.nominee_number.unwrap_or_default(),
        faculty_id: args.nominee_faculty.unwrap_or_default(),
        department_id: args.nominee_department.unwrap_or_default(),
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
