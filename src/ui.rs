//! Terminal rendering helpers for tables and item details.
//!
//! This module uses println! for CLI output, which is appropriate
//! for terminal user interfaces.

#![allow(clippy::disallowed_macros)]

use colored::Colorize;
use comfy_table::{Cell, Color, ContentArrangement, Table};

use crate::item::{Item, Priority, Status};
use crate::registry::ProjectSummary;

const TITLE_WIDTH: usize = 50;

/// Get colored status string
pub fn status_colored(status: Status) -> String {
    match status {
        Status::Todo => "todo".blue().to_string(),
        Status::InProgress => "in_progress".yellow().to_string(),
        Status::Done => "done".green().to_string(),
        Status::Blocked => "blocked".red().to_string(),
    }
}

/// Get colored priority string
pub fn priority_colored(priority: Priority) -> String {
    match priority {
        Priority::Low => "low".green().to_string(),
        Priority::Medium => "medium".yellow().to_string(),
        Priority::High => "high".red().to_string(),
        Priority::Critical => "critical".red().bold().to_string(),
    }
}

fn status_color(status: Status) -> Color {
    match status {
        Status::Todo => Color::Blue,
        Status::InProgress => Color::Yellow,
        Status::Done => Color::Green,
        Status::Blocked => Color::Red,
    }
}

fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::Low => Color::Green,
        Priority::Medium => Color::Yellow,
        Priority::High => Color::Red,
        Priority::Critical => Color::DarkRed,
    }
}

/// Create a table for displaying backlog items
pub fn items_table(items: &[Item]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("ID").fg(Color::Cyan),
        Cell::new("Title").fg(Color::Cyan),
        Cell::new("Priority").fg(Color::Cyan),
        Cell::new("Status").fg(Color::Cyan),
        Cell::new("Sprint").fg(Color::Cyan),
        Cell::new("Epic").fg(Color::Cyan),
        Cell::new("Assignee").fg(Color::Cyan),
        Cell::new("Points").fg(Color::Cyan),
    ]);

    for item in items {
        table.add_row(vec![
            Cell::new(&item.id),
            Cell::new(truncate(&item.title, TITLE_WIDTH)),
            Cell::new(item.priority.to_string()).fg(priority_color(item.priority)),
            Cell::new(item.status.to_string()).fg(status_color(item.status)),
            Cell::new(item.sprint.as_deref().unwrap_or("-")),
            Cell::new(item.epic.as_deref().unwrap_or("-")),
            Cell::new(item.assignee.as_deref().unwrap_or("-")),
            Cell::new(
                item.story_points
                    .map(|points| points.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]);
    }

    table
}

/// Create a table for displaying project summaries
pub fn projects_table(projects: &[ProjectSummary]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Project").fg(Color::Cyan),
        Cell::new("Items").fg(Color::Cyan),
        Cell::new("Status").fg(Color::Cyan),
    ]);

    for project in projects {
        let status = if project.status_counts.is_empty() {
            "Empty".to_string()
        } else {
            project
                .status_counts
                .iter()
                .map(|entry| format!("{}: {}", entry.status, entry.count))
                .collect::<Vec<_>>()
                .join(" | ")
        };

        table.add_row(vec![
            Cell::new(&project.name),
            Cell::new(project.items),
            Cell::new(status),
        ]);
    }

    table
}

/// Display item details in a formatted way
pub fn print_item_details(item: &Item) {
    println!("{}", "═".repeat(60).dimmed());
    println!(
        "{} {} {}",
        "Item".cyan().bold(),
        item.id.cyan().bold(),
        format!("[{}]", status_colored(item.status))
    );
    println!("{}", "═".repeat(60).dimmed());
    println!("{:<14} {}", "Title:".cyan(), item.title);
    println!("{:<14} {}", "Description:".cyan(), item.description);
    println!("{:<14} {}", "Priority:".cyan(), priority_colored(item.priority));
    println!("{:<14} {}", "Status:".cyan(), status_colored(item.status));
    println!(
        "{:<14} {}",
        "Sprint:".cyan(),
        item.sprint.as_deref().unwrap_or("Not assigned")
    );
    println!(
        "{:<14} {}",
        "Epic:".cyan(),
        item.epic.as_deref().unwrap_or("Not assigned")
    );
    println!(
        "{:<14} {}",
        "Assignee:".cyan(),
        item.assignee.as_deref().unwrap_or("Unassigned")
    );
    println!(
        "{:<14} {}",
        "Story points:".cyan(),
        item.story_points
            .map(|points| points.to_string())
            .unwrap_or_else(|| "Not estimated".to_string())
    );
    println!(
        "{:<14} {}",
        "Created:".cyan(),
        item.created_at.format("%Y-%m-%d %H:%M:%S")
    );
    println!(
        "{:<14} {}",
        "Updated:".cyan(),
        item.updated_at.format("%Y-%m-%d %H:%M:%S")
    );
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let cut: String = text.chars().take(width).collect();
        format!("{cut}...")
    }
}
