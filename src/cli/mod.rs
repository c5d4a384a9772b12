//! Command-line interface for backlog
//!
//! This module defines the CLI structure using clap derive macros.
//! Each command group lives in its own submodule. The interactive shell
//! re-parses its input lines through this same command tree, so the
//! one-shot and interactive surfaces stay identical.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::session::Session;
use crate::storage::Storage;

mod export;
mod item;
mod project;

/// backlog - Product backlog manager
///
/// Tracks backlog items per project in plain data files, with filtering
/// and CSV/XLSX export.
#[derive(Parser, Debug)]
#[command(name = "backlog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding project data files
    #[arg(long, global = true, env = "BACKLOG_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Project to operate on (defaults to the selected project)
    #[arg(short, long, global = true, env = "BACKLOG_PROJECT")]
    pub project: Option<String>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Set for commands dispatched from the interactive shell
    #[arg(long, hide = true)]
    pub interactive: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all projects
    Projects,

    /// Create a new project and select it
    CreateProject {
        /// Project name (letters, digits, '-' and '_')
        name: String,
    },

    /// Switch to a project
    Use {
        /// Project name
        name: String,
    },

    /// Delete a project and its data file
    DeleteProject {
        /// Project name
        name: String,
    },

    /// List items in the current project
    Items {
        /// Filter by priority (low, medium, high, critical)
        #[arg(long)]
        priority: Option<String>,

        /// Filter by status (todo, in_progress, done, blocked)
        #[arg(long)]
        status: Option<String>,

        /// Filter by sprint
        #[arg(long)]
        sprint: Option<String>,

        /// Filter by epic
        #[arg(long)]
        epic: Option<String>,

        /// Filter by assignee
        #[arg(long)]
        assignee: Option<String>,
    },

    /// Add an item to the current project
    Add {
        /// Item title
        title: String,

        /// Item description
        #[arg(default_value = "")]
        description: String,

        /// Priority (low, medium, high, critical)
        #[arg(long)]
        priority: Option<String>,

        /// Sprint label
        #[arg(long)]
        sprint: Option<String>,

        /// Epic label
        #[arg(long)]
        epic: Option<String>,

        /// Assignee name
        #[arg(long)]
        assignee: Option<String>,

        /// Story points estimate
        #[arg(long)]
        points: Option<u32>,
    },

    /// Update fields of an item
    Update {
        /// Item ID (e.g. WEB-1)
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// New priority (low, medium, high, critical)
        #[arg(long)]
        priority: Option<String>,

        /// New status (todo, in_progress, done, blocked)
        #[arg(long)]
        status: Option<String>,

        /// New sprint label (empty string clears it)
        #[arg(long)]
        sprint: Option<String>,

        /// New epic label (empty string clears it)
        #[arg(long)]
        epic: Option<String>,

        /// New assignee (empty string clears it)
        #[arg(long)]
        assignee: Option<String>,

        /// New story points estimate
        #[arg(long)]
        points: Option<u32>,
    },

    /// Show item details
    Show {
        /// Item ID
        id: String,
    },

    /// Delete an item
    Delete {
        /// Item ID
        id: String,
    },

    /// Show the current selection and item counts
    Status,

    /// Export the current project to CSV
    ExportCsv {
        /// Output file (default: <project>_backlog.csv)
        filename: Option<PathBuf>,
    },

    /// Export the current project to an XLSX spreadsheet
    ExportXlsx {
        /// Output file (default: <project>_backlog.xlsx)
        filename: Option<PathBuf>,
    },

    /// Start the interactive shell
    Shell,
}

/// Shared per-invocation context: resolved storage, persisted selection and
/// the project override from `--project`.
pub(crate) struct Context {
    pub storage: Storage,
    pub session: Session,
    pub export_dir: PathBuf,
    project_override: Option<String>,
}

impl Context {
    pub fn load(data_dir: Option<PathBuf>, project: Option<String>) -> Result<Self> {
        let config = Config::load_or_default();
        let storage = Storage::new(config.resolve_data_dir(data_dir));
        let session = Session::load(&storage);
        Ok(Self {
            storage,
            session,
            export_dir: config.export_dir(),
            project_override: project,
        })
    }

    /// The project a command operates on: `--project` wins, then the
    /// persisted selection; `NoProjectSelected` otherwise.
    pub fn active_project(&self) -> Result<String> {
        if let Some(name) = &self.project_override {
            return Ok(name.clone());
        }
        self.session.require_current().map(str::to_string)
    }
}

/// Ask before destructive operations in the interactive shell. One-shot
/// invocations, `--yes`, and piped stdin proceed without prompting.
pub(crate) fn confirm_delete(prompt: &str, interactive: bool, yes: bool) -> Result<bool> {
    use std::io::IsTerminal;

    if !interactive || yes || !std::io::stdin().is_terminal() {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(std::io::Error::other)?;
    Ok(confirmed)
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Projects => project::run_list(project::ListOptions {
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::CreateProject { name } => project::run_create(project::CreateOptions {
                name,
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Use { name } => project::run_use(project::UseOptions {
                name,
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::DeleteProject { name } => project::run_delete(project::DeleteOptions {
                name,
                yes: self.yes,
                interactive: self.interactive,
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Status => project::run_status(project::StatusOptions {
                project: self.project,
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Items {
                priority,
                status,
                sprint,
                epic,
                assignee,
            } => item::run_list(item::ListOptions {
                priority,
                status,
                sprint,
                epic,
                assignee,
                project: self.project,
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Add {
                title,
                description,
                priority,
                sprint,
                epic,
                assignee,
                points,
            } => item::run_add(item::AddOptions {
                title,
                description,
                priority,
                sprint,
                epic,
                assignee,
                points,
                project: self.project,
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Update {
                id,
                title,
                description,
                priority,
                status,
                sprint,
                epic,
                assignee,
                points,
            } => item::run_update(item::UpdateOptions {
                id,
                title,
                description,
                priority,
                status,
                sprint,
                epic,
                assignee,
                points,
                project: self.project,
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Show { id } => item::run_show(item::ShowOptions {
                id,
                project: self.project,
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Delete { id } => item::run_delete(item::DeleteOptions {
                id,
                yes: self.yes,
                interactive: self.interactive,
                project: self.project,
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::ExportCsv { filename } => export::run(export::ExportOptions {
                format: export::ExportFormat::Csv,
                filename,
                project: self.project,
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::ExportXlsx { filename } => export::run(export::ExportOptions {
                format: export::ExportFormat::Xlsx,
                filename,
                project: self.project,
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Shell => {
                if self.interactive {
                    return Err(Error::Validation(
                        "already inside the interactive shell".to_string(),
                    ));
                }
                crate::shell::run(self.data_dir)
            }
        }
    }
}
