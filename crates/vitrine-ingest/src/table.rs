// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::{BTreeSet, HashSet};
use vitrine_app::{
    CellValue, Collection, Field, IMAGE_ALIAS_COLUMN, IMAGE_LINK_COLUMN, Profile, Record,
};

use crate::{ValidationError, ValidationResult};

/// Parsed rows under unique column names. Every row has exactly one cell per
/// column. Rows with only blank values are kept; a blank value is present but
/// empty, not missing.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(header: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = rows
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
            .max(header.len());

        let mut header = header;
        header.resize(width, String::new());
        let columns = unique_columns(header);

        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Empty);
                row
            })
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column == name)
    }

    /// Renames `image` to `image link` unless `image link` is already present.
    pub fn normalize(&mut self) -> bool {
        if self.has_column(IMAGE_LINK_COLUMN) {
            return false;
        }
        match self
            .columns
            .iter_mut()
            .find(|column| column.as_str() == IMAGE_ALIAS_COLUMN)
        {
            Some(column) => {
                *column = IMAGE_LINK_COLUMN.to_owned();
                true
            }
            None => false,
        }
    }

    pub fn missing_columns(&self, profile: Profile) -> BTreeSet<String> {
        profile
            .required_columns()
            .iter()
            .filter(|required| !self.has_column(required))
            .map(|required| (*required).to_owned())
            .collect()
    }

    pub fn into_records(self) -> Vec<Record> {
        let columns = self.columns;
        self.rows
            .into_iter()
            .map(|row| {
                Record::new(
                    columns
                        .iter()
                        .cloned()
                        .zip(row)
                        .map(|(column, value)| Field { column, value })
                        .collect(),
                )
            })
            .collect()
    }

    /// Normalizes, checks required columns, and converts rows to records.
    pub fn into_collection(mut self, profile: Profile) -> ValidationResult<Collection> {
        self.normalize();

        let missing = self.missing_columns(profile);
        if !missing.is_empty() {
            return Err(ValidationError::MissingColumns(missing));
        }

        let records = self.into_records();
        if records.is_empty() {
            return Err(ValidationError::EmptyDataset);
        }
        Ok(Collection::new(records))
    }
}

fn unique_columns(header: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(header.len());
    let mut columns = Vec::with_capacity(header.len());

    for (index, raw) in header.into_iter().enumerate() {
        let base = if raw.trim().is_empty() {
            format!("Unnamed: {index}")
        } else {
            raw
        };

        let mut candidate = base.clone();
        let mut suffix = 1;
        while seen.contains(&candidate) {
            candidate = format!("{base}.{suffix}");
            suffix += 1;
        }
        seen.insert(candidate.clone());
        columns.push(candidate);
    }

    columns
}

#[cfg(test)]
mod tests {
    use super::Table;
    use crate::ValidationError;
    use std::collections::BTreeSet;
    use vitrine_app::{CellValue, Profile};

    fn text_row(cells: &[&str]) -> Vec<CellValue> {
        cells
            .iter()
            .map(|cell| {
                if cell.is_empty() {
                    CellValue::Empty
                } else {
                    CellValue::text(*cell)
                }
            })
            .collect()
    }

    fn header(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_owned()).collect()
    }

    #[test]
    fn blank_and_duplicate_headers_get_unique_names() {
        let table = Table::new(header(&["name", "", "name", "name"]), Vec::new());
        assert_eq!(
            table.columns(),
            ["name", "Unnamed: 1", "name.1", "name.2"]
        );
    }

    #[test]
    fn short_rows_are_padded_and_blank_rows_kept() {
        let table = Table::new(
            header(&["name", "details"]),
            vec![text_row(&["A"]), text_row(&["", ""]), text_row(&["B", "d"])],
        );
        assert_eq!(table.rows().len(), 3);
        assert_eq!(table.rows()[0], vec![CellValue::text("A"), CellValue::Empty]);
        assert_eq!(table.rows()[1], vec![CellValue::Empty, CellValue::Empty]);
    }

    #[test]
    fn wide_rows_extend_header_with_unnamed_columns() {
        let table = Table::new(header(&["name"]), vec![text_row(&["A", "extra"])]);
        assert_eq!(table.columns(), ["name", "Unnamed: 1"]);
    }

    #[test]
    fn normalize_renames_image_only_without_image_link() {
        let mut aliased = Table::new(header(&["name", "image"]), Vec::new());
        assert!(aliased.normalize());
        assert_eq!(aliased.columns(), ["name", "image link"]);

        let mut both = Table::new(header(&["image", "image link"]), Vec::new());
        assert!(!both.normalize());
        assert_eq!(both.columns(), ["image", "image link"]);
    }

    #[test]
    fn missing_columns_lists_all_absent_fields() {
        let table = Table::new(header(&["name"]), vec![text_row(&["A"])]);
        let error = table
            .into_collection(Profile::Priced)
            .expect_err("should reject missing columns");
        assert_eq!(
            error,
            ValidationError::MissingColumns(BTreeSet::from([
                "details".to_owned(),
                "image link".to_owned(),
                "price".to_owned(),
            ]))
        );
    }

    #[test]
    fn header_only_table_is_empty_dataset() {
        let table = Table::new(header(&["name", "image", "details"]), Vec::new());
        assert_eq!(
            table.into_collection(Profile::Basic),
            Err(ValidationError::EmptyDataset)
        );
    }

    #[test]
    fn blank_image_link_is_accepted_and_extra_columns_kept() {
        let table = Table::new(
            header(&["name", "image link", "details", "sku"]),
            vec![text_row(&["A", "", "d", "X-1"])],
        );
        let collection = table
            .into_collection(Profile::Basic)
            .expect("blank image link is valid");
        let record = &collection.records()[0];
        assert_eq!(record.get("image link"), Some(&CellValue::Empty));
        assert_eq!(record.display("sku"), "X-1");
    }
}
