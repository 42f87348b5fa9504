//! Export functionality: JSON and CSV attachment lists.

pub mod csv;
pub mod json;

use std::path::Path;

use crate::error::ThreadMediaError;
use crate::model::attachment::Attachment;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl std::str::FromStr for ExportFormat {
    type Err = ThreadMediaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(ThreadMediaError::ExportError(format!(
                "Unknown export format '{other}'. Supported: json, csv"
            ))),
        }
    }
}

/// Write `attachments` to `output_path` in the given format, creating
/// parent directories as needed.
pub fn export(
    attachments: &[Attachment],
    format: ExportFormat,
    output_path: &Path,
) -> anyhow::Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    match format {
        ExportFormat::Json => json::export_json(attachments, output_path),
        ExportFormat::Csv => csv::export_csv(attachments, output_path),
    }
}
