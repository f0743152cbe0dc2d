// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod delimited;
mod error;
pub mod remote;
pub mod sample;
mod table;
mod workbook;

pub use delimited::parse_csv;
pub use error::{ValidationError, ValidationResult};
pub use remote::{DEFAULT_SHEET_NAME, DEFAULT_SHEETS_BASE_URL, SheetClient, SheetLocator};
pub use sample::{SAMPLE_FILE_NAME, sample_workbook, write_sample_workbook};
pub use table::Table;
pub use workbook::parse_xlsx;

use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};
use vitrine_app::{Collection, Profile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Spreadsheet,
}

impl SourceFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Spreadsheet => "spreadsheet",
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" | "xlsm" => Some(Self::Spreadsheet),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Bytes { format: SourceFormat, bytes: Vec<u8> },
    Remote(SheetLocator),
}

pub fn parse_bytes(format: SourceFormat, bytes: &[u8]) -> ValidationResult<Table> {
    debug!(format = format.as_str(), bytes = bytes.len(), "parsing source");
    match format {
        SourceFormat::Csv => parse_csv(bytes),
        SourceFormat::Spreadsheet => parse_xlsx(bytes),
    }
}

/// Parses, normalizes, and validates local bytes under `profile`.
pub fn ingest_bytes(
    format: SourceFormat,
    bytes: &[u8],
    profile: Profile,
) -> ValidationResult<Collection> {
    let result = parse_bytes(format, bytes).and_then(|table| table.into_collection(profile));
    log_outcome(&result);
    result
}

/// Entry point for every source kind. Owns the remote client so callers only
/// pick a profile once.
#[derive(Debug, Clone)]
pub struct Ingestor {
    profile: Profile,
    sheets: SheetClient,
}

impl Ingestor {
    pub fn new(profile: Profile, sheets: SheetClient) -> Self {
        Self { profile, sheets }
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    pub fn sheets(&self) -> &SheetClient {
        &self.sheets
    }

    pub fn ingest(&self, source: &Source) -> ValidationResult<Collection> {
        match source {
            Source::Bytes { format, bytes } => ingest_bytes(*format, bytes, self.profile),
            Source::Remote(locator) => self.ingest_sheet(locator),
        }
    }

    pub fn ingest_sheet(&self, locator: &SheetLocator) -> ValidationResult<Collection> {
        let result = self
            .sheets
            .fetch_csv(locator)
            .and_then(|bytes| parse_csv(&bytes))
            .and_then(|table| table.into_collection(self.profile));
        log_outcome(&result);
        result
    }

    /// Reads a local file, picking the format from its extension.
    pub fn ingest_path(&self, path: &Path) -> ValidationResult<Collection> {
        let format = SourceFormat::from_path(path).ok_or_else(|| {
            ValidationError::parse_failure(format!(
                "unsupported file type {}; use .csv or .xlsx",
                path.display()
            ))
        })?;
        let bytes = fs::read(path).map_err(|error| {
            ValidationError::parse_failure(format!("read {}: {error}", path.display()))
        })?;
        ingest_bytes(format, &bytes, self.profile)
    }
}

fn log_outcome(result: &ValidationResult<Collection>) {
    match result {
        Ok(collection) => info!(records = collection.len(), "ingested collection"),
        Err(error) => warn!(%error, "source rejected"),
    }
}

#[cfg(test)]
mod tests {
    use super::SourceFormat;
    use std::path::Path;

    #[test]
    fn format_follows_extension_case_insensitively() {
        assert_eq!(
            SourceFormat::from_path(Path::new("products.CSV")),
            Some(SourceFormat::Csv)
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("/tmp/catalog.xlsx")),
            Some(SourceFormat::Spreadsheet)
        );
        assert_eq!(SourceFormat::from_path(Path::new("notes.txt")), None);
        assert_eq!(SourceFormat::from_path(Path::new("no_extension")), None);
    }
}
