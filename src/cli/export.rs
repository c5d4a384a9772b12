//! backlog export command implementations.

use std::path::PathBuf;

use serde::Serialize;

use crate::cli::Context;
use crate::error::Result;
use crate::export;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::repo::ItemRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    fn command(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "export-csv",
            ExportFormat::Xlsx => "export-xlsx",
        }
    }
}

pub struct ExportOptions {
    pub format: ExportFormat,
    pub filename: Option<PathBuf>,
    pub project: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct ExportOutput {
    project: String,
    path: String,
    rows: usize,
}

pub fn run(options: ExportOptions) -> Result<()> {
    let ctx = Context::load(options.data_dir, options.project)?;
    let project = ctx.active_project()?;
    let repo = ItemRepository::new(ctx.storage.clone());

    let items = repo.list(&project)?;

    let path = match options.filename {
        Some(path) => path,
        None => ctx
            .export_dir
            .join(export::default_filename(&project, options.format.extension())),
    };

    match options.format {
        ExportFormat::Csv => export::write_csv(&path, &items)?,
        ExportFormat::Xlsx => export::write_xlsx(&path, &items)?,
    }

    let output = ExportOutput {
        project: project.clone(),
        path: path.display().to_string(),
        rows: items.len(),
    };

    let mut human = HumanOutput::new(format!("Exported to {}", path.display()));
    human.push_summary("Project", project);
    human.push_summary("Rows", items.len().to_string());
    if items.is_empty() {
        human.push_warning("project has no items; wrote header only".to_string());
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        options.format.command(),
        &output,
        Some(&human),
    )
}
