//! Spreadsheet export in the HR system's upload layouts
//!
//! Each export builds an in-memory table first so the layouts are
//! testable without touching the filesystem, then writes it as a
//! single-sheet xlsx file.

use std::path::Path;

use rust_xlsxwriter::Workbook;
use tracing::info;

use crate::error::{Error, Result};
use crate::models::{MonitoringEntry, ScheduleRow, SetKind};
use crate::monitoring::MonitoringStats;

const SHEET_NAME: &str = "HRIS Upload";

/// A rectangular table ready to be written to a worksheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTable {
    pub sheet_name: String,
    pub rows: Vec<Vec<String>>,
}

/// Shift codes upload with whitespace stripped and letters uppercased,
/// so `8am - 5pm` and `8AM-5PM` land identically.
#[must_use]
pub fn clean_shift_code(shift: &str) -> String {
    shift
        .split_whitespace()
        .collect::<String>()
        .to_uppercase()
}

/// Output file name for a schedule export.
#[must_use]
pub fn schedule_file_name(kind: SetKind, branch: &str) -> String {
    match kind {
        SetKind::Work => format!("{branch}_WORK_SCHEDULE.xlsx"),
        SetKind::Rest => format!("{branch}_REST_DAY_UPLOAD.xlsx"),
    }
}

/// Output file name for a monitoring export.
#[must_use]
pub fn monitoring_file_name(month: &str, year: i32) -> String {
    format!("Monitoring_{month}_{year}.xlsx")
}

fn require_exportable(kind: SetKind, branch: &str, rows: &[ScheduleRow]) -> Result<()> {
    if branch.trim().is_empty() {
        return Err(Error::InvalidInput(format!(
            "no branch name set for the {kind} export"
        )));
    }
    if rows.is_empty() {
        return Err(Error::InvalidInput(format!("no {kind} data to export")));
    }
    Ok(())
}

/// Build the upload table for one schedule set.
///
/// The work layout carries employee number, date and cleaned shift
/// code; the rest layout carries employee number and date only.
pub fn schedule_table(kind: SetKind, branch: &str, rows: &[ScheduleRow]) -> Result<UploadTable> {
    require_exportable(kind, branch, rows)?;

    let mut table = match kind {
        SetKind::Work => vec![vec![
            "Employee Number".to_string(),
            "Work Date".to_string(),
            "Shift Code".to_string(),
        ]],
        SetKind::Rest => vec![vec![
            "Employee No".to_string(),
            "Rest Day Date".to_string(),
        ]],
    };

    for row in rows {
        table.push(match kind {
            SetKind::Work => vec![
                row.employee_id.clone(),
                row.date.clone(),
                clean_shift_code(&row.shift),
            ],
            SetKind::Rest => vec![row.employee_id.clone(), row.date.clone()],
        });
    }

    Ok(UploadTable {
        sheet_name: SHEET_NAME.to_string(),
        rows: table,
    })
}

/// Build the monitoring board export with its progress banner.
#[must_use]
pub fn monitoring_table(
    entries: &[MonitoringEntry],
    stats: MonitoringStats,
    month: &str,
    year: i32,
) -> UploadTable {
    let yes_no = |flag: bool| if flag { "Yes" } else { "No" }.to_string();

    let mut rows = vec![
        vec![format!("Monitoring Progress: {}%", stats.percent)],
        vec![format!("Month: {month} {year}")],
        vec![
            "Branch Name".to_string(),
            "Checked".to_string(),
            "Uploaded".to_string(),
            "Uploaded By".to_string(),
            "Remarks".to_string(),
        ],
    ];

    for entry in entries {
        rows.push(vec![
            entry.branch_name.clone(),
            yes_no(entry.checked),
            yes_no(entry.uploaded),
            entry.uploaded_by.clone(),
            entry.remarks.clone(),
        ]);
    }

    UploadTable {
        sheet_name: SHEET_NAME.to_string(),
        rows,
    }
}

/// Write a table to an xlsx file at `path`.
#[allow(clippy::cast_possible_truncation)]
pub fn write_xlsx(path: &Path, table: &UploadTable) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&table.sheet_name)?;

    for (row_index, row) in table.rows.iter().enumerate() {
        for (col_index, cell) in row.iter().enumerate() {
            worksheet.write_string(row_index as u32, col_index as u16, cell)?;
        }
    }

    workbook.save(path)?;
    info!(path = %path.display(), rows = table.rows.len(), "xlsx written");
    Ok(())
}
