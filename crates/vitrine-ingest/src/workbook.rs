// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use calamine::{Data, ExcelDateTime, Reader, Xlsx};
use chrono::NaiveTime;
use std::io::Cursor;
use vitrine_app::CellValue;

use crate::{Table, ValidationError, ValidationResult};

/// Reads the first worksheet of an XLSX workbook. The first row of the used
/// range is the header.
pub fn parse_xlsx(bytes: &[u8]) -> ValidationResult<Table> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
        .map_err(|error| ValidationError::parse_failure(format!("open workbook: {error}")))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ValidationError::parse_failure("workbook has no worksheets"))?
        .map_err(|error| ValidationError::parse_failure(format!("read first worksheet: {error}")))?;

    let mut rows = range.rows();
    let header = match rows.next() {
        Some(cells) => cells
            .iter()
            .map(|cell| convert_cell(cell).map(|value| value.display()))
            .collect::<ValidationResult<Vec<_>>>()?,
        None => Vec::new(),
    };

    // Rows with no cell content at all are gaps in the sheet, not records.
    let body = rows
        .filter(|cells| !cells.iter().all(|cell| matches!(cell, Data::Empty)))
        .map(|cells| cells.iter().map(convert_cell).collect::<ValidationResult<Vec<_>>>())
        .collect::<ValidationResult<Vec<_>>>()?;

    Ok(Table::new(header, body))
}

fn convert_cell(cell: &Data) -> ValidationResult<CellValue> {
    let value = match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(value) if value.is_empty() => CellValue::Empty,
        Data::String(value) => CellValue::text(value.as_str()),
        Data::Int(value) => CellValue::Number(*value as f64),
        Data::Float(value) => CellValue::Number(*value),
        Data::Bool(value) => CellValue::text(value.to_string()),
        Data::DateTime(value) if value.is_duration() => CellValue::Number(value.as_f64()),
        Data::DateTime(value) => CellValue::Text(format_excel_datetime(value)?),
        Data::DateTimeIso(value) | Data::DurationIso(value) => CellValue::text(value.as_str()),
    };
    Ok(value)
}

/// Formats a date cell as `YYYY-MM-DD`, adding `HH:MM:SS` when the cell
/// carries a time of day. calamine accounts for the 1904 date system and the
/// 1900 leap-year quirk.
fn format_excel_datetime(value: &ExcelDateTime) -> ValidationResult<String> {
    let serial = value.as_f64();
    let datetime = serial
        .is_finite()
        .then(|| value.as_datetime())
        .flatten()
        .ok_or_else(|| {
            ValidationError::parse_failure(format!("date serial {serial} is out of range"))
        })?;

    let formatted = if datetime.time() == NaiveTime::MIN {
        datetime.format("%Y-%m-%d")
    } else {
        datetime.format("%Y-%m-%d %H:%M:%S")
    };
    Ok(formatted.to_string())
}
