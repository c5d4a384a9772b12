//! backlog item command implementations.

use std::path::PathBuf;

use serde::Serialize;

use crate::cli::{confirm_delete, Context};
use crate::error::Result;
use crate::filter::FilterCriteria;
use crate::item::{Item, ItemDraft, ItemPatch, Priority, Status};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::repo::ItemRepository;
use crate::ui;

pub struct ListOptions {
    pub priority: Option<String>,
    pub status: Option<String>,
    pub sprint: Option<String>,
    pub epic: Option<String>,
    pub assignee: Option<String>,
    pub project: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct AddOptions {
    pub title: String,
    pub description: String,
    pub priority: Option<String>,
    pub sprint: Option<String>,
    pub epic: Option<String>,
    pub assignee: Option<String>,
    pub points: Option<u32>,
    pub project: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct UpdateOptions {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub sprint: Option<String>,
    pub epic: Option<String>,
    pub assignee: Option<String>,
    pub points: Option<u32>,
    pub project: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct ShowOptions {
    pub id: String,
    pub project: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct DeleteOptions {
    pub id: String,
    pub yes: bool,
    pub interactive: bool,
    pub project: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

/// Parse an optional enum-valued flag, rejecting unknown values before any
/// mutation happens.
fn parse_flag<T: std::str::FromStr<Err = crate::error::Error>>(
    value: Option<&str>,
) -> Result<Option<T>> {
    value.map(str::parse).transpose()
}

#[derive(Serialize)]
struct ItemListOutput {
    project: String,
    total: usize,
    items: Vec<Item>,
}

pub fn run_list(options: ListOptions) -> Result<()> {
    let ctx = Context::load(options.data_dir, options.project)?;
    let project = ctx.active_project()?;
    let repo = ItemRepository::new(ctx.storage.clone());

    let criteria = FilterCriteria {
        priority: parse_flag::<Priority>(options.priority.as_deref())?,
        status: parse_flag::<Status>(options.status.as_deref())?,
        sprint: options.sprint,
        epic: options.epic,
        assignee: options.assignee,
    };

    let all = repo.list(&project)?;
    let items = criteria.apply(&all);

    if options.json {
        let output = ItemListOutput {
            project: project.clone(),
            total: items.len(),
            items,
        };
        return emit_success(
            OutputOptions {
                json: true,
                quiet: options.quiet,
            },
            "items",
            &output,
            None,
        );
    }

    if options.quiet {
        return Ok(());
    }

    if items.is_empty() {
        if criteria.is_empty() {
            println!("No items in project '{project}'.");
        } else {
            println!("No items in project '{project}' match the filters.");
        }
    } else {
        println!("{}", ui::items_table(&items));
    }
    Ok(())
}

pub fn run_add(options: AddOptions) -> Result<()> {
    let ctx = Context::load(options.data_dir, options.project)?;
    let project = ctx.active_project()?;
    let repo = ItemRepository::new(ctx.storage.clone());

    let draft = ItemDraft {
        title: options.title,
        description: options.description,
        priority: parse_flag::<Priority>(options.priority.as_deref())?,
        sprint: options.sprint,
        epic: options.epic,
        assignee: options.assignee,
        story_points: options.points,
    };

    let item = repo.add(&project, draft)?;

    let mut human = HumanOutput::new("Item added");
    human.push_summary("ID", item.id.clone());
    human.push_summary("Project", project);
    human.push_summary("Priority", item.priority.to_string());
    human.push_summary("Status", item.status.to_string());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "add",
        &item,
        Some(&human),
    )
}

pub fn run_update(options: UpdateOptions) -> Result<()> {
    let ctx = Context::load(options.data_dir, options.project)?;
    let project = ctx.active_project()?;
    let repo = ItemRepository::new(ctx.storage.clone());

    let patch = ItemPatch {
        title: options.title,
        description: options.description,
        priority: parse_flag::<Priority>(options.priority.as_deref())?,
        status: parse_flag::<Status>(options.status.as_deref())?,
        sprint: options.sprint,
        epic: options.epic,
        assignee: options.assignee,
        story_points: options.points,
    };

    let item = repo.update(&project, &options.id, patch)?;

    let mut human = HumanOutput::new("Item updated");
    human.push_summary("ID", item.id.clone());
    human.push_summary("Priority", item.priority.to_string());
    human.push_summary("Status", item.status.to_string());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "update",
        &item,
        Some(&human),
    )
}

pub fn run_show(options: ShowOptions) -> Result<()> {
    let ctx = Context::load(options.data_dir, options.project)?;
    let project = ctx.active_project()?;
    let repo = ItemRepository::new(ctx.storage.clone());

    let item = repo.get(&project, &options.id)?;

    if options.json {
        return emit_success(
            OutputOptions {
                json: true,
                quiet: options.quiet,
            },
            "show",
            &item,
            None,
        );
    }

    if !options.quiet {
        ui::print_item_details(&item);
    }
    Ok(())
}

#[derive(Serialize)]
struct ItemDeletedOutput {
    id: String,
    title: String,
}

pub fn run_delete(options: DeleteOptions) -> Result<()> {
    let ctx = Context::load(options.data_dir, options.project)?;
    let project = ctx.active_project()?;
    let repo = ItemRepository::new(ctx.storage.clone());

    // Fetch first so the confirmation can name the item.
    let item = repo.get(&project, &options.id)?;

    let prompt = format!("Delete item '{}: {}'?", item.id, item.title);
    if !confirm_delete(&prompt, options.interactive, options.yes)? {
        if !options.quiet && !options.json {
            println!("Cancelled.");
        }
        return Ok(());
    }

    let removed = repo.remove(&project, &options.id)?;

    let output = ItemDeletedOutput {
        id: removed.id.clone(),
        title: removed.title.clone(),
    };

    let mut human = HumanOutput::new("Item deleted");
    human.push_summary("ID", removed.id);
    human.push_summary("Title", removed.title);

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "delete",
        &output,
        Some(&human),
    )
}
