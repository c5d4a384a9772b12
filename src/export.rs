//! Export adapter: item lists to CSV and XLSX files.
//!
//! Both formats share one header and column order. Unset optional fields
//! render as empty cells. Output files are overwritten, never merged with
//! previous export content.

use std::path::Path;

use rust_xlsxwriter::Workbook;

use crate::error::Result;
use crate::item::Item;

/// Fixed column order for every export format
pub const COLUMNS: [&str; 11] = [
    "id",
    "title",
    "description",
    "priority",
    "status",
    "sprint",
    "epic",
    "assignee",
    "story_points",
    "created_at",
    "updated_at",
];

/// One export row per item, columns in [`COLUMNS`] order
pub fn row(item: &Item) -> Vec<String> {
    vec![
        item.id.clone(),
        item.title.clone(),
        item.description.clone(),
        item.priority.to_string(),
        item.status.to_string(),
        item.sprint.clone().unwrap_or_default(),
        item.epic.clone().unwrap_or_default(),
        item.assignee.clone().unwrap_or_default(),
        item.story_points
            .map(|points| points.to_string())
            .unwrap_or_default(),
        item.created_at.to_rfc3339(),
        item.updated_at.to_rfc3339(),
    ]
}

/// Default export filename for a project
pub fn default_filename(project_name: &str, extension: &str) -> String {
    format!("{project_name}_backlog.{extension}")
}

/// Write items as CSV. An empty item list produces a header-only file.
pub fn write_csv(path: &Path, items: &[Item]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(COLUMNS)?;
    for item in items {
        writer.write_record(row(item))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write items as a single-sheet XLSX workbook with the same header
pub fn write_xlsx(path: &Path, items: &[Item]) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in COLUMNS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }
    for (idx, item) in items.iter().enumerate() {
        let row_num = (idx + 1) as u32;
        for (col, cell) in row(item).into_iter().enumerate() {
            worksheet.write_string(row_num, col as u16, cell)?;
        }
    }

    workbook.save(path)?;
    Ok(())
}
