use std::path::Path;

use async_trait::async_trait;
use loginventory_application::ReportWriter;
use loginventory_core::{AppError, AppResult};
use loginventory_domain::{InventoryReport, ReportCell};
use rust_xlsxwriter::{Format, FormatAlign, Workbook, XlsxError};
use tracing::debug;

const WORKSHEET_NAME: &str = "Sheet";

/// Report writer producing a single-sheet `.xlsx` workbook.
#[derive(Clone, Default)]
pub struct XlsxReportWriter;

impl XlsxReportWriter {
    /// Creates a new xlsx report writer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ReportWriter for XlsxReportWriter {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    async fn write_report(&self, report: &InventoryReport, path: &Path) -> AppResult<()> {
        let report = report.clone();
        let path = path.to_path_buf();

        tokio::task::spawn_blocking(move || write_workbook(&report, &path))
            .await
            .map_err(|error| AppError::Internal(format!("report writer task failed: {error}")))?
    }
}

fn write_workbook(report: &InventoryReport, path: &Path) -> AppResult<()> {
    let write_error = |error: XlsxError| {
        AppError::Write(format!(
            "failed to write report '{}': {error}",
            path.display()
        ))
    };

    let left_aligned = Format::new().set_align(FormatAlign::Left);
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(WORKSHEET_NAME).map_err(write_error)?;

    for (column, header) in report.columns().iter().enumerate() {
        worksheet
            .write_string_with_format(0, column_number(column)?, *header, &left_aligned)
            .map_err(write_error)?;
    }

    for (offset, row) in report.rows().enumerate() {
        let row_number = u32::try_from(offset + 1)
            .map_err(|_| AppError::Write("report has more rows than a worksheet holds".to_owned()))?;

        for (column, cell) in row.iter().enumerate() {
            let column = column_number(column)?;
            match cell {
                ReportCell::Text(text) => {
                    worksheet.write_string_with_format(row_number, column, *text, &left_aligned)
                }
                ReportCell::Integer(value) => {
                    worksheet.write_number_with_format(row_number, column, *value, &left_aligned)
                }
            }
            .map_err(write_error)?;
        }
    }

    worksheet.autofit();
    workbook.save(path).map_err(write_error)?;
    debug!(path = %path.display(), row_count = report.len(), "wrote xlsx report");

    Ok(())
}

fn column_number(index: usize) -> AppResult<u16> {
    u16::try_from(index)
        .map_err(|_| AppError::Write(format!("report column {index} exceeds worksheet width")))
}
