// src/report/mod.rs
use std::fs;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::Workbook;
use serde::Serialize;

use crate::extractors::tab::Report;
use crate::utils::error::ReportError;

// Fixed column widths, sized for readable labels and values.
const LABEL_COLUMN_WIDTH: f64 = 30.0;
const VALUE_COLUMN_WIDTH: f64 = 50.0;

#[derive(Serialize)]
struct TabSummary {
    tab: &'static str,
    field_count: usize,
    found_count: usize,
}

#[derive(Serialize)]
struct ReportMetadata {
    record_id: String,
    tabs: Vec<TabSummary>,
    extraction_timestamp: String,
}

pub struct ReportWriter {
    base_dir: PathBuf,
}

impl ReportWriter {
    /// Creates a new ReportWriter with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, ReportError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(ReportError::Io)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// Path the workbook for `record_id` is written to.
    pub fn report_path(&self, record_id: &str) -> PathBuf {
        self.base_dir.join(format!("{record_id}_property_data.xlsx"))
    }

    /// Writes the assembled report as one workbook: one sheet per tab in
    /// fixed tab order, a Label/Value header row, and rows in schema order.
    pub fn save_report(&self, report: &Report) -> Result<PathBuf, ReportError> {
        let file_path = self.report_path(&report.record_id);

        let mut workbook = Workbook::new();

        for result in &report.tabs {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(result.tab.name())?;

            worksheet.write_string(0, 0, "Label")?;
            worksheet.write_string(0, 1, "Value")?;

            for (i, record) in result.fields.iter().enumerate() {
                let row = (i + 1) as u32;
                worksheet.write_string(row, 0, record.label)?;
                worksheet.write_string(row, 1, record.value.as_text())?;
            }

            worksheet.set_column_width(0, LABEL_COLUMN_WIDTH)?;
            worksheet.set_column_width(1, VALUE_COLUMN_WIDTH)?;

            tracing::info!("Data for '{}' tab saved.", result.tab.name());
        }

        workbook.save(&file_path)?;

        tracing::info!("Saved report to {}", file_path.display());

        Ok(file_path)
    }

    /// Saves a JSON sidecar summarizing the report. The sentinel makes a
    /// genuinely absent field indistinguishable from a failed lookup in the
    /// workbook; the per-tab found counts here surface the hit rate.
    pub fn save_report_metadata(&self, report: &Report) -> Result<PathBuf, ReportError> {
        let filename = format!("{}_property_data_meta.json", report.record_id);
        let file_path = self.base_dir.join(filename);

        let metadata = ReportMetadata {
            record_id: report.record_id.clone(),
            tabs: report
                .tabs
                .iter()
                .map(|result| TabSummary {
                    tab: result.tab.name(),
                    field_count: result.len(),
                    found_count: result.found_count(),
                })
                .collect(),
            extraction_timestamp: chrono::Utc::now().to_rfc3339(),
        };

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| ReportError::Serialization(e.to_string()))?;

        fs::write(&file_path, metadata_str).map_err(ReportError::Io)?;

        tracing::info!("Saved metadata to {}", file_path.display());

        Ok(file_path)
    }
}
