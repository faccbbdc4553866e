//! Export renderer
//!
//! Pure request/response transform: loads the roster and record maps
//! fresh, then paints a styled xlsx workbook against the computed column
//! schema. Totals are always recomputed from the raw day maps at render
//! time; the stored counters are never trusted.

use std::collections::HashMap;

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};
use sqlx::SqlitePool;

use crate::attendance::{AttendanceStatus, DayMap, ShiftMap};
use crate::db::repository;
use crate::utils::time::{
    days_in_month, ensure_not_future, month_name, validate_month, validate_year,
};
use crate::utils::{AppError, AppResult};

use super::schema::{Column, ColumnRole, TableKind, build_columns};

// Status fill bands (light pastel backgrounds)
const FILL_PRESENT: u32 = 0xC6EFCE;
const FILL_ABSENT: u32 = 0xFFC7CE;
const FILL_OVERTIME: u32 = 0xFFEB9C;
const FILL_LEAVE: u32 = 0xBDD7EE;
const FILL_HOLIDAY: u32 = 0xD9D9D9;

// Shift sub-column tints, distinct from the attendance bands
const FILL_SHIFT_DAY: u32 = 0xFFF2CC;
const FILL_SHIFT_NIGHT: u32 = 0xDDEBF7;

const FILL_HEADER: u32 = 0x4472C4;

/// Finished export artifact
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub bytes: Vec<u8>,
    pub filename: String,
}

/// One employee row, with both maps decoded
#[derive(Debug, Clone)]
pub struct ExportRow {
    pub name: String,
    pub designation: Option<String>,
    pub days: DayMap,
    pub shifts: ShiftMap,
    pub remarks: Option<String>,
}

impl ExportRow {
    /// Shift cells are the join of both maps: a day counts only when the
    /// attendance status allows a shift AND an assignment exists
    fn effective_shift(&self, day: u8) -> Option<crate::attendance::ShiftCode> {
        let allows = self
            .days
            .get(day)
            .map(AttendanceStatus::allows_shift)
            .unwrap_or(false);
        if allows { self.shifts.get(day) } else { None }
    }

    fn effective_shift_days(&self, days_in_month: u8) -> i64 {
        (1..=days_in_month)
            .filter(|d| self.effective_shift(*d).is_some())
            .count() as i64
    }
}

/// Everything the painting pass needs, assembled up front
#[derive(Debug, Clone)]
pub struct ExportData {
    pub company_name: String,
    pub rig_name: String,
    pub month: u32,
    pub year: i32,
    pub kind: TableKind,
    pub with_colors: bool,
    pub rows: Vec<ExportRow>,
}

/// Load and validate everything needed for one export
///
/// `employee_ids: Some(..)` restricts to that subset; inactive employees
/// are excluded unconditionally, selected or not.
pub async fn load(
    pool: &SqlitePool,
    workspace_id: i64,
    month: u32,
    year: i32,
    employee_ids: Option<&[i64]>,
    kind: TableKind,
    with_colors: bool,
) -> AppResult<ExportData> {
    validate_month(month)?;
    validate_year(year)?;
    ensure_not_future(month, year)?;

    if repository::workspace::find_by_id(pool, workspace_id)
        .await?
        .is_none()
    {
        return Err(AppError::not_found(format!(
            "Workspace {} not found",
            workspace_id
        )));
    }

    let mut employees = repository::employee::find_active_for_workspace(pool, workspace_id).await?;
    if let Some(ids) = employee_ids {
        employees.retain(|e| ids.contains(&e.id));
    }
    if employees.is_empty() {
        return Err(AppError::not_found(
            "No employees match the export filter".to_string(),
        ));
    }

    let attendance: HashMap<i64, (DayMap, Option<String>)> =
        repository::attendance::find_for_workspace_month(pool, workspace_id, month, year)
            .await?
            .into_iter()
            .map(|r| (r.employee_id, (r.days(), r.remarks)))
            .collect();
    let shifts: HashMap<i64, ShiftMap> =
        repository::shift::find_for_workspace_month(pool, workspace_id, month, year)
            .await?
            .iter()
            .map(|r| (r.employee_id, r.days()))
            .collect();

    let settings = repository::settings::get(pool).await?;

    let rows = employees
        .into_iter()
        .map(|e| {
            let (days, remarks) = attendance.get(&e.id).cloned().unwrap_or_default();
            ExportRow {
                name: e.name,
                designation: e.designation,
                days,
                shifts: shifts.get(&e.id).cloned().unwrap_or_default(),
                remarks,
            }
        })
        .collect();

    Ok(ExportData {
        company_name: settings.company_name,
        rig_name: settings.rig_name,
        month,
        year,
        kind,
        with_colors,
        rows,
    })
}

/// Paint the workbook and return the finished bytes plus filename
///
/// CPU-bound; callers run it under `spawn_blocking` with a timeout so a
/// huge roster never streams a partial document.
pub fn render(data: &ExportData) -> AppResult<ExportFile> {
    let bytes = render_workbook(data)
        .map_err(|e| AppError::internal(format!("Workbook rendering failed: {e}")))?;
    let filename = build_filename(
        data.kind,
        data.month,
        data.year,
        chrono::Local::now().naive_local(),
    );
    Ok(ExportFile { bytes, filename })
}

/// Filename encodes kind, month name, year and a generation timestamp to
/// avoid client-side caching collisions
pub fn build_filename(
    kind: TableKind,
    month: u32,
    year: i32,
    now: chrono::NaiveDateTime,
) -> String {
    format!(
        "{}_{}_{}_{}.xlsx",
        kind.as_str(),
        month_name(month),
        year,
        now.format("%Y%m%d%H%M%S")
    )
}

fn render_workbook(data: &ExportData) -> Result<Vec<u8>, XlsxError> {
    let dim = days_in_month(data.month, data.year) as u8;
    let columns = build_columns(dim, data.kind);

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(match data.kind {
        TableKind::Attendance => "Attendance",
        TableKind::Shifts => "Shift Attendance",
    })?;

    for (col, column) in columns.iter().enumerate() {
        worksheet.set_column_width(col as u16, column.width)?;
    }

    paint_title_block(worksheet, data, columns.len() as u16)?;
    let data_start = paint_headers(worksheet, data.kind, &columns)?;
    paint_rows(worksheet, data, &columns, data_start, dim)?;

    worksheet.set_freeze_panes(data_start, 3)?;

    workbook.save_to_buffer()
}

/// Three title rows, each spanning the full column width
fn paint_title_block(
    worksheet: &mut Worksheet,
    data: &ExportData,
    column_count: u16,
) -> Result<(), XlsxError> {
    let title_format = Format::new()
        .set_bold()
        .set_font_size(14)
        .set_align(FormatAlign::Center);
    let subtitle_format = Format::new().set_bold().set_align(FormatAlign::Center);

    let last_col = column_count - 1;
    worksheet.merge_range(0, 0, 0, last_col, &data.company_name, &title_format)?;
    worksheet.merge_range(1, 0, 1, last_col, "Attendance", &subtitle_format)?;
    worksheet.merge_range(
        2,
        0,
        2,
        last_col,
        &format!(
            "{} - {} {}",
            data.rig_name,
            month_name(data.month),
            data.year
        ),
        &subtitle_format,
    )?;
    Ok(())
}

/// Header row(s); returns the first data row
///
/// Attendance mode uses a single header row. Shift mode uses two: day
/// numbers merged across each D/N pair, sub-labels below, and the fixed
/// and summary columns merged vertically across both rows.
fn paint_headers(
    worksheet: &mut Worksheet,
    kind: TableKind,
    columns: &[Column],
) -> Result<u32, XlsxError> {
    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(FILL_HEADER))
        .set_font_color(Color::White)
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);

    match kind {
        TableKind::Attendance => {
            for (col, column) in columns.iter().enumerate() {
                worksheet.write_string_with_format(3, col as u16, &column.label, &header_format)?;
            }
            Ok(4)
        }
        TableKind::Shifts => {
            for (col, column) in columns.iter().enumerate() {
                let col = col as u16;
                match column.role {
                    ColumnRole::ShiftDay(day, crate::attendance::ShiftCode::Day) => {
                        // Day number spans the D/N pair
                        worksheet.merge_range(
                            3,
                            col,
                            3,
                            col + 1,
                            &day.to_string(),
                            &header_format,
                        )?;
                        worksheet.write_string_with_format(4, col, "D", &header_format)?;
                    }
                    ColumnRole::ShiftDay(_, crate::attendance::ShiftCode::Night) => {
                        worksheet.write_string_with_format(4, col, "N", &header_format)?;
                    }
                    _ => {
                        worksheet.merge_range(3, col, 4, col, &column.label, &header_format)?;
                    }
                }
            }
            Ok(5)
        }
    }
}

fn status_fill(status: &AttendanceStatus) -> Option<u32> {
    match status {
        AttendanceStatus::Present => Some(FILL_PRESENT),
        AttendanceStatus::Absent => Some(FILL_ABSENT),
        AttendanceStatus::Overtime => Some(FILL_OVERTIME),
        AttendanceStatus::Leave => Some(FILL_LEAVE),
        AttendanceStatus::Holiday => Some(FILL_HOLIDAY),
        AttendanceStatus::Other(_) => None,
    }
}

fn value_format(fill: Option<u32>) -> Format {
    let format = Format::new().set_bold().set_align(FormatAlign::Center);
    match fill {
        Some(rgb) => format.set_background_color(Color::RGB(rgb)),
        None => format,
    }
}

fn paint_rows(
    worksheet: &mut Worksheet,
    data: &ExportData,
    columns: &[Column],
    data_start: u32,
    days_in_month: u8,
) -> Result<(), XlsxError> {
    // Serial numbers are bold; name/designation/remarks are never bold;
    // every other data cell is bold when it holds a value
    let serial_format = Format::new().set_bold().set_align(FormatAlign::Center);
    let text_format = Format::new();
    let plain_value_format = value_format(None);

    for (index, row) in data.rows.iter().enumerate() {
        let r = data_start + index as u32;
        for (col, column) in columns.iter().enumerate() {
            let c = col as u16;
            match &column.role {
                ColumnRole::Serial => {
                    // Renumbered per export; not the stored serial
                    worksheet.write_number_with_format(
                        r,
                        c,
                        (index + 1) as f64,
                        &serial_format,
                    )?;
                }
                ColumnRole::Name => {
                    worksheet.write_string_with_format(r, c, &row.name, &text_format)?;
                }
                ColumnRole::Designation => {
                    if let Some(designation) = &row.designation {
                        worksheet.write_string_with_format(r, c, designation, &text_format)?;
                    }
                }
                ColumnRole::Day(day) => {
                    // Blank days stay genuinely empty: no value, no fill
                    if let Some(status) = row.days.get(*day) {
                        let fill = if data.with_colors {
                            status_fill(status)
                        } else {
                            None
                        };
                        worksheet.write_string_with_format(
                            r,
                            c,
                            status.code(),
                            &value_format(fill),
                        )?;
                    }
                }
                ColumnRole::ShiftDay(day, code) => {
                    if row.effective_shift(*day) == Some(*code) {
                        let fill = if data.with_colors {
                            Some(match code {
                                crate::attendance::ShiftCode::Day => FILL_SHIFT_DAY,
                                crate::attendance::ShiftCode::Night => FILL_SHIFT_NIGHT,
                            })
                        } else {
                            None
                        };
                        worksheet.write_string_with_format(
                            r,
                            c,
                            code.code(),
                            &value_format(fill),
                        )?;
                    }
                }
                ColumnRole::OnDuty => {
                    let value = match data.kind {
                        TableKind::Attendance => row.days.present_days(),
                        TableKind::Shifts => row.effective_shift_days(days_in_month),
                    };
                    worksheet.write_number_with_format(
                        r,
                        c,
                        value as f64,
                        &plain_value_format,
                    )?;
                }
                ColumnRole::OtDays => {
                    worksheet.write_number_with_format(
                        r,
                        c,
                        row.days.ot_days() as f64,
                        &plain_value_format,
                    )?;
                }
                ColumnRole::Remarks => {
                    if let Some(remarks) = &row.remarks {
                        worksheet.write_string_with_format(r, c, remarks, &text_format)?;
                    }
                }
            }
        }
    }
    Ok(())
}
