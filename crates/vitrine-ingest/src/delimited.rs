// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use vitrine_app::CellValue;

use crate::{Table, ValidationError, ValidationResult};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Parses comma-separated bytes whose first record is the header.
///
/// Cells stay text so prices like `1.50` display exactly as written. Rows
/// shorter than the header are padded; longer rows are rejected.
pub fn parse_csv(bytes: &[u8]) -> ValidationResult<Table> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let header: Vec<String> = reader
        .headers()
        .map_err(csv_failure)?
        .iter()
        .map(str::to_owned)
        .collect();
    if header.is_empty() {
        return Err(ValidationError::parse_failure("no columns to parse"));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_failure)?;
        if record.len() > header.len() {
            let line = record.position().map_or(0, csv::Position::line);
            return Err(ValidationError::parse_failure(format!(
                "line {line}: expected {} fields, saw {}",
                header.len(),
                record.len()
            )));
        }
        rows.push(record.iter().map(text_cell).collect());
    }

    Ok(Table::new(header, rows))
}

fn text_cell(raw: &str) -> CellValue {
    if raw.is_empty() {
        CellValue::Empty
    } else {
        CellValue::text(raw)
    }
}

fn csv_failure(error: csv::Error) -> ValidationError {
    ValidationError::parse_failure(format!("invalid CSV: {error}"))
}
