// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeSet;
use thiserror::Error;

/// Reasons a source is rejected. All are recoverable: the caller reports them
/// and keeps whatever collection it already had.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("failed to parse source: {0}")]
    ParseFailure(String),

    #[error("missing columns: {}", join_columns(.0))]
    MissingColumns(BTreeSet<String>),

    #[error("the file is empty or contains no products")]
    EmptyDataset,
}

impl ValidationError {
    pub fn parse_failure(message: impl Into<String>) -> Self {
        Self::ParseFailure(message.into())
    }
}

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

fn join_columns(columns: &BTreeSet<String>) -> String {
    columns
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
