//! backlog project command implementations.

use std::path::PathBuf;

use serde::Serialize;

use crate::cli::{confirm_delete, Context};
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::registry::{ProjectRegistry, StatusCount};
use crate::ui;

pub struct ListOptions {
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct CreateOptions {
    pub name: String,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct UseOptions {
    pub name: String,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct DeleteOptions {
    pub name: String,
    pub yes: bool,
    pub interactive: bool,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct StatusOptions {
    pub project: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub fn run_list(options: ListOptions) -> Result<()> {
    let ctx = Context::load(options.data_dir, None)?;
    let registry = ProjectRegistry::new(ctx.storage.clone());
    let listing = registry.list()?;

    if options.json {
        let mut human = HumanOutput::new("Projects");
        for warning in &listing.warnings {
            human.push_warning(warning.clone());
        }
        return emit_success(
            OutputOptions {
                json: true,
                quiet: options.quiet,
            },
            "projects",
            &listing,
            Some(&human),
        );
    }

    if !options.quiet {
        if listing.projects.is_empty() {
            println!("No projects found.");
        } else {
            println!("{}", ui::projects_table(&listing.projects));
        }
    }
    for warning in &listing.warnings {
        eprintln!("warning: {warning}");
    }
    Ok(())
}

#[derive(Serialize)]
struct ProjectCreatedOutput {
    project: String,
    selected: bool,
}

pub fn run_create(options: CreateOptions) -> Result<()> {
    let mut ctx = Context::load(options.data_dir, None)?;
    let registry = ProjectRegistry::new(ctx.storage.clone());

    registry.create(&options.name)?;
    // A freshly created project becomes the selection.
    registry.select(&options.name, &mut ctx.session)?;

    let output = ProjectCreatedOutput {
        project: options.name.clone(),
        selected: true,
    };

    let mut human = HumanOutput::new("Project created");
    human.push_summary("Name", options.name.clone());
    human.push_summary("Selected", "yes");
    human.push_next_step(format!("backlog add \"<title>\" --project {}", options.name));

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "create-project",
        &output,
        Some(&human),
    )
}

#[derive(Serialize)]
struct ProjectSelectedOutput {
    project: String,
}

pub fn run_use(options: UseOptions) -> Result<()> {
    let mut ctx = Context::load(options.data_dir, None)?;
    let registry = ProjectRegistry::new(ctx.storage.clone());

    registry.select(&options.name, &mut ctx.session)?;

    let output = ProjectSelectedOutput {
        project: options.name.clone(),
    };

    let mut human = HumanOutput::new(format!("Switched to project '{}'", options.name));
    human.push_summary("Project", options.name.clone());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "use",
        &output,
        Some(&human),
    )
}

#[derive(Serialize)]
struct ProjectDeletedOutput {
    project: String,
}

pub fn run_delete(options: DeleteOptions) -> Result<()> {
    let mut ctx = Context::load(options.data_dir, None)?;
    let registry = ProjectRegistry::new(ctx.storage.clone());

    if !registry.storage().exists(&options.name) {
        return Err(Error::ProjectNotFound(options.name));
    }

    let prompt = format!("Delete project '{}' and all its items?", options.name);
    if !confirm_delete(&prompt, options.interactive, options.yes)? {
        if !options.quiet && !options.json {
            println!("Cancelled.");
        }
        return Ok(());
    }

    registry.delete(&options.name, &mut ctx.session)?;

    let output = ProjectDeletedOutput {
        project: options.name.clone(),
    };

    let mut human = HumanOutput::new("Project deleted");
    human.push_summary("Name", options.name.clone());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "delete-project",
        &output,
        Some(&human),
    )
}

#[derive(Serialize)]
struct StatusOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    current: Option<String>,
    data_dir: String,
    projects: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    items: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status_counts: Option<Vec<StatusCount>>,
}

pub fn run_status(options: StatusOptions) -> Result<()> {
    let ctx = Context::load(options.data_dir, options.project)?;
    let registry = ProjectRegistry::new(ctx.storage.clone());

    let current = ctx.active_project().ok();
    let projects = registry.names()?.len();

    let mut human = HumanOutput::new("Status");
    human.push_summary(
        "Active project",
        current.clone().unwrap_or_else(|| "none".to_string()),
    );
    human.push_summary("Projects", projects.to_string());
    human.push_summary("Data directory", ctx.storage.data_dir().display().to_string());

    let mut items = None;
    let mut status_counts = None;
    if let Some(name) = &current {
        match ctx.storage.load(name) {
            Ok(project) => {
                items = Some(project.items.len());
                let counts: Vec<StatusCount> = project
                    .status_counts()
                    .into_iter()
                    .map(|(status, count)| StatusCount { status, count })
                    .collect();
                for entry in &counts {
                    human.push_detail(format!("{}: {}", entry.status, entry.count));
                }
                human.push_summary("Items", project.items.len().to_string());
                status_counts = Some(counts);
            }
            Err(err) => {
                human.push_warning(format!("selected project unavailable: {err}"));
            }
        }
    }

    let output = StatusOutput {
        current,
        data_dir: ctx.storage.data_dir().display().to_string(),
        projects,
        items,
        status_counts,
    };

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "status",
        &output,
        Some(&human),
    )
}
