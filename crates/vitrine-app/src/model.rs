// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::Deserialize;

pub const NAME_COLUMN: &str = "name";
pub const IMAGE_LINK_COLUMN: &str = "image link";
pub const IMAGE_ALIAS_COLUMN: &str = "image";
pub const DETAILS_COLUMN: &str = "details";
pub const PRICE_COLUMN: &str = "price";

const BASIC_COLUMNS: [&str; 3] = [NAME_COLUMN, IMAGE_LINK_COLUMN, DETAILS_COLUMN];
const PRICED_COLUMNS: [&str; 4] = [NAME_COLUMN, IMAGE_LINK_COLUMN, DETAILS_COLUMN, PRICE_COLUMN];

/// Required-column set in effect for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    Basic,
    #[default]
    Priced,
}

impl Profile {
    pub const ALL: [Self; 2] = [Self::Basic, Self::Priced];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Priced => "priced",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "basic" => Some(Self::Basic),
            "priced" => Some(Self::Priced),
            _ => None,
        }
    }

    pub const fn required_columns(self) -> &'static [&'static str] {
        match self {
            Self::Basic => &BASIC_COLUMNS,
            Self::Priced => &PRICED_COLUMNS,
        }
    }
}

/// One spreadsheet cell. CSV cells are always text; only workbooks carry numbers.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(value) => value.trim().is_empty(),
            Self::Number(_) => false,
            Self::Empty => true,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::Number(_) | Self::Empty => None,
        }
    }

    pub fn display(&self) -> String {
        match self {
            Self::Text(value) => value.clone(),
            Self::Number(value) => format_number(*value),
            Self::Empty => String::new(),
        }
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub column: String,
    pub value: CellValue,
}

/// One source row, keyed by column name in source column order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<Field>,
}

impl Record {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, CellValue)>,
        S: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(column, value)| Field {
                    column: column.into(),
                    value,
                })
                .collect(),
        }
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|field| field.column == column)
            .map(|field| &field.value)
    }

    /// Display text for `column`; missing columns render as the empty string.
    pub fn display(&self, column: &str) -> String {
        self.get(column).map(CellValue::display).unwrap_or_default()
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.column.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Ordered records in source row order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Collection {
    records: Vec<Record>,
}

impl Collection {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

impl From<Vec<Record>> for Collection {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}
