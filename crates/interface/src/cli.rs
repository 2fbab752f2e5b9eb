//! CLI - Command Line Interface
//!
//! Available Commands (short aliases in parentheses):
//! - nin list (l)              - List todos
//! - nin add (a) desc...       - Add a todo
//! - nin update (u, e) id desc - Update a todo
//! - nin delete (d) id...      - Remove todos
//! - nin complete (c) id...    - Toggle completion
//! - nin archive (ar) id...    - Toggle archival
//! - nin delete-archived (da)  - Remove all archived todos
//! - nin prioritize (p) id     - Move a todo within its day
//! - nin analyze (an)          - Completed todos per day
//! - nin sync (s)              - Pull todos from the integrated client
//!
//! An unknown or missing command prints usage and exits successfully.

use chrono::{Local, NaiveDate};
use clap::error::ErrorKind;
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

use nin_core::{ConfigError, ItemId, NinConfig, StoreFormat, Todo, TodoError, TodoOptions};

use crate::dates::{format_day, parse_date_arg};
use crate::presenter::presenter_for;

/// CLI Errors
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Todo(#[from] TodoError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid date: {0} (expected today, tomorrow, yesterday, none or YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("{0}")]
    Usage(String),

    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

/// CLI Configuration
#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    /// Config file path
    pub config_path: Option<PathBuf>,

    /// Store path override
    pub store_path: Option<PathBuf>,

    /// Verbose output
    pub verbose: bool,

    /// Output format
    pub output_format: OutputFormat,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            config_path: None,
            store_path: None,
            verbose: false,
            output_format: OutputFormat::Pretty,
        }
    }
}

impl CliConfig {
    /// Fold command-line overrides into the loaded configuration
    pub fn apply(&self, config: &mut NinConfig) {
        if let Some(path) = &self.store_path {
            config.store.format = match path.extension().and_then(|ext| ext.to_str()) {
                Some("json") => StoreFormat::Json,
                Some("toml") => StoreFormat::Toml,
                _ => config.store.format,
            };
            config.store.path = Some(path.clone());
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
    Minimal,
}

/// nin CLI
#[derive(Parser, Debug)]
#[command(name = "nin")]
#[command(author, version, about = "Personal command-line todo manager", long_about = None)]
pub(crate) struct Cli {
    /// Config file
    #[arg(short, long, global = true)]
    pub(crate) config: Option<PathBuf>,

    /// Store file (.toml or .json)
    #[arg(short, long, global = true)]
    pub(crate) store: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum)]
    pub(crate) output: Option<OutputFormat>,

    #[command(subcommand)]
    pub(crate) command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// List todos
    #[command(visible_alias = "l")]
    List(ListArgs),

    /// Add a todo
    #[command(visible_alias = "a")]
    Add(AddArgs),

    /// Update a todo
    #[command(visible_aliases = ["u", "e", "edit"])]
    Update(UpdateArgs),

    /// Remove todos
    #[command(visible_alias = "d")]
    Delete(IdsArgs),

    /// Toggle completion of todos
    #[command(visible_alias = "c")]
    Complete(IdsArgs),

    /// Toggle archival of todos
    #[command(visible_alias = "ar")]
    Archive(IdsArgs),

    /// Remove all archived todos
    #[command(name = "delete-archived", visible_alias = "da")]
    DeleteArchived,

    /// Move a todo up (positive step) or down within its day
    #[command(visible_alias = "p")]
    Prioritize(PrioritizeArgs),

    /// Show completed todos per day
    #[command(visible_alias = "an")]
    Analyze,

    /// Pull todos from the integrated client
    #[command(visible_alias = "s")]
    Sync,
}

#[derive(Args, Debug)]
pub(crate) struct ListArgs {
    /// Include archived todos
    #[arg(short, long)]
    pub archived: bool,
}

#[derive(Args, Debug)]
pub(crate) struct AddArgs {
    /// Description
    #[arg(required = true, num_args = 1..)]
    pub desc: Vec<String>,

    /// Date (today, tomorrow, yesterday, none or YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Tag, repeatable
    #[arg(short, long = "tag")]
    pub tags: Vec<String>,
}

#[derive(Args, Debug)]
pub(crate) struct UpdateArgs {
    /// Todo id
    pub id: ItemId,

    /// New description
    #[arg(required = true, num_args = 1..)]
    pub desc: Vec<String>,

    /// New date; kept when omitted
    #[arg(long)]
    pub date: Option<String>,

    /// New tags; kept when omitted
    #[arg(short, long = "tag")]
    pub tags: Vec<String>,
}

#[derive(Args, Debug)]
pub(crate) struct IdsArgs {
    /// Todo ids
    #[arg(required = true, num_args = 1..)]
    pub ids: Vec<ItemId>,
}

#[derive(Args, Debug)]
pub(crate) struct PrioritizeArgs {
    /// Todo id
    pub id: ItemId,

    /// Slots to move; negative moves down
    #[arg(short = 'n', long, default_value_t = 1, allow_negative_numbers = true)]
    pub step: i64,
}

/// Parse process arguments and execute the command
pub fn run() -> Result<(), CliError> {
    let mut stdout = std::io::stdout();
    run_from(std::env::args_os(), &mut stdout)
}

/// Parse `args` and execute, writing command output to `out`
pub fn run_from<I, T>(args: I, out: &mut dyn Write) -> Result<(), CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let cli = match Cli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(e) => return handle_parse_error(e, &args, out),
    };

    let Some(command) = cli.command else {
        write_usage(out)?;
        return Ok(());
    };

    let cli_config = CliConfig {
        config_path: cli.config,
        store_path: cli.store,
        verbose: cli.verbose,
        output_format: cli.output.unwrap_or(OutputFormat::Pretty),
    };

    execute(command, &cli_config, Local::now().date_naive(), out)
}

fn handle_parse_error(
    e: clap::Error,
    args: &[OsString],
    out: &mut dyn Write,
) -> Result<(), CliError> {
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            write!(out, "{e}")?;
            Ok(())
        }
        ErrorKind::MissingSubcommand | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            write_usage(out)
        }
        ErrorKind::InvalidSubcommand | ErrorKind::UnknownArgument
            if !names_known_command(args) =>
        {
            write_usage(out)
        }
        _ => Err(CliError::Usage(e.to_string())),
    }
}

/// Whether the first positional argument is a subcommand name or alias
fn names_known_command(args: &[OsString]) -> bool {
    const VALUE_FLAGS: [&str; 5] = ["-c", "--config", "-s", "--store", "--output"];

    let command = Cli::command();
    let mut rest = args.iter().skip(1).filter_map(|arg| arg.to_str());
    while let Some(arg) = rest.next() {
        if VALUE_FLAGS.contains(&arg) {
            rest.next();
        } else if !arg.starts_with('-') {
            return command.find_subcommand(arg).is_some();
        }
    }
    false
}

fn write_usage(out: &mut dyn Write) -> Result<(), CliError> {
    let help = Cli::command().render_help();
    writeln!(out, "{help}")?;
    Ok(())
}

/// Install the stderr subscriber; returns whether this call installed it
pub(crate) fn init_logging(verbose: bool, level: Option<&str>) -> bool {
    let filter = match (verbose, level) {
        (_, Some(level)) => level.to_string(),
        (true, None) => "debug".to_string(),
        (false, None) => return false,
    };
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .try_init()
    {
        Ok(()) => true,
        Err(e) => {
            warn!("Logging not initialized: {e}");
            false
        }
    }
}

pub(crate) fn execute(
    command: Commands,
    cli_config: &CliConfig,
    today: NaiveDate,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let mut config = NinConfig::load(cli_config.config_path.as_deref())?;
    cli_config.apply(&mut config);
    init_logging(cli_config.verbose, config.log_level.as_deref());

    let archived = config.list.archived || matches!(&command, Commands::List(args) if args.archived);
    let store = nin_storage::create_store(&config.store);
    info!("Using store {}", config.store.resolved_path().display());

    let mut todo = Todo::new(store, TodoOptions { archived })?;
    if let Some(integration) = &config.integration {
        todo = todo.with_client(nin_storage::create_client(integration));
    }

    match command {
        Commands::List(_) => cmd_list(&todo, cli_config.output_format, today, out),
        Commands::Add(args) => cmd_add(&mut todo, args, today, out),
        Commands::Update(args) => cmd_update(&mut todo, args, today, out),
        Commands::Delete(args) => {
            todo.delete(&args.ids)?;
            writeln!(out, "Deleted {}", join_ids(&args.ids))?;
            Ok(())
        }
        Commands::Complete(args) => {
            todo.complete(&args.ids)?;
            writeln!(out, "Toggled completion of {}", join_ids(&args.ids))?;
            Ok(())
        }
        Commands::Archive(args) => {
            todo.archive(&args.ids)?;
            writeln!(out, "Toggled archival of {}", join_ids(&args.ids))?;
            Ok(())
        }
        Commands::DeleteArchived => {
            let removed = todo.delete_archived()?;
            writeln!(out, "Deleted {removed} archived")?;
            Ok(())
        }
        Commands::Prioritize(args) => {
            let new_id = todo.prioritize(args.id, args.step)?;
            writeln!(out, "Moved {} to {}", args.id, new_id)?;
            Ok(())
        }
        Commands::Analyze => cmd_analyze(&todo, today, out),
        Commands::Sync => {
            let summary = todo.sync_down()?;
            writeln!(out, "Synced: {} added, {} updated", summary.added, summary.updated)?;
            Ok(())
        }
    }
}

fn cmd_list(
    todo: &Todo,
    format: OutputFormat,
    today: NaiveDate,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let presenter = presenter_for(format, today);
    write!(out, "{}", todo.list(presenter.as_ref()))?;
    Ok(())
}

fn cmd_add(
    todo: &mut Todo,
    args: AddArgs,
    today: NaiveDate,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let date = match args.date.as_deref() {
        Some(raw) => parse_date_arg(raw, today)?,
        None => Some(today),
    };
    let desc = args.desc.join(" ");
    let id = todo.add(desc.clone(), date, args.tags)?;
    debug!(id, "Added from CLI");

    writeln!(out, "Added {id}: {desc}")?;
    Ok(())
}

fn cmd_update(
    todo: &mut Todo,
    args: UpdateArgs,
    today: NaiveDate,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let existing = todo
        .items()
        .find_by_id(args.id)
        .ok_or(TodoError::ItemNotFound(args.id))?;
    let date = match args.date.as_deref() {
        Some(raw) => parse_date_arg(raw, today)?,
        None => existing.date,
    };
    let tags = if args.tags.is_empty() {
        existing.tags.clone()
    } else {
        args.tags
    };

    let desc = args.desc.join(" ");
    todo.edit(args.id, desc.clone(), date, tags)?;

    writeln!(out, "Updated {}: {}", args.id, desc)?;
    Ok(())
}

fn cmd_analyze(todo: &Todo, today: NaiveDate, out: &mut dyn Write) -> Result<(), CliError> {
    for (date, count) in todo.analyze() {
        writeln!(out, "{} : {}", format_day(date, today), "*".repeat(count))?;
    }
    Ok(())
}

fn join_ids(ids: &[ItemId]) -> String {
    ids.iter()
        .map(ItemId::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
