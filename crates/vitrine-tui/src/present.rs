// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use vitrine_app::{
    CellValue, DETAILS_COLUMN, IMAGE_LINK_COLUMN, NAME_COLUMN, PRICE_COLUMN, Record,
};

pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/400";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageView {
    Link(String),
    Placeholder(String),
}

impl ImageView {
    pub fn url(&self) -> &str {
        match self {
            Self::Link(url) | Self::Placeholder(url) => url,
        }
    }
}

/// What the body panel shows for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordView {
    pub name: String,
    pub details: String,
    pub price: Option<String>,
    pub image: ImageView,
}

pub fn present(record: &Record, placeholder_image: &str) -> RecordView {
    let image = match record.get(IMAGE_LINK_COLUMN) {
        Some(value) if is_image_link(value) => ImageView::Link(value.display().trim().to_owned()),
        _ => ImageView::Placeholder(placeholder_image.to_owned()),
    };

    RecordView {
        name: record.display(NAME_COLUMN),
        details: record.display(DETAILS_COLUMN),
        price: record.get(PRICE_COLUMN).map(CellValue::display),
        image,
    }
}

/// Only text that starts with `http` is treated as a usable image address.
pub fn is_image_link(value: &CellValue) -> bool {
    value
        .as_text()
        .is_some_and(|text| text.trim_start().starts_with("http"))
}
