// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;
use std::fs;
use std::path::PathBuf;
use vitrine_app::{CellValue, Collection, Record};

const PRODUCT_NAMES: [&str; 8] = [
    "Brass Lamp",
    "Linen Throw",
    "Oak Stool",
    "Clay Vase",
    "Wool Rug",
    "Copper Kettle",
    "Glass Carafe",
    "Cedar Tray",
];

const PRICES: [&str; 8] = [
    "120 SAR", "85 SAR", "240 SAR", "60 SAR", "410 SAR", "150 SAR", "45 SAR", "70 SAR",
];

/// A cell written to a fixture workbook.
#[derive(Debug, Clone, PartialEq)]
pub enum FixtureCell {
    Text(&'static str),
    Number(f64),
    Blank,
}

impl From<&'static str> for FixtureCell {
    fn from(value: &'static str) -> Self {
        if value.is_empty() {
            Self::Blank
        } else {
            Self::Text(value)
        }
    }
}

impl From<f64> for FixtureCell {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

pub fn product_name(index: usize) -> &'static str {
    PRODUCT_NAMES[index % PRODUCT_NAMES.len()]
}

pub fn image_url(index: usize) -> String {
    format!("http://img.test/{index}.png")
}

/// Priced-profile CSV with `rows` products. Uses the `image` alias header.
pub fn products_csv(rows: usize) -> String {
    let mut csv = String::from("name,image,details,price\n");
    for index in 0..rows {
        csv.push_str(&format!(
            "{},{},Details about {},{}\n",
            product_name(index),
            image_url(index),
            product_name(index),
            PRICES[index % PRICES.len()],
        ));
    }
    csv
}

pub fn csv_text(header: &[&str], rows: &[&[&str]]) -> String {
    let mut lines = vec![header.join(",")];
    lines.extend(rows.iter().map(|row| row.join(",")));
    lines.join("\n")
}

/// XLSX bytes with `header` in row 1 and `rows` below it on `Sheet1`.
pub fn xlsx_bytes(header: &[&str], rows: &[Vec<FixtureCell>]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Sheet1").context("name fixture sheet")?;

    for (col, title) in header.iter().enumerate() {
        sheet
            .write_string(0, col as u16, *title)
            .context("write fixture header")?;
    }
    for (index, cells) in rows.iter().enumerate() {
        let row = index as u32 + 1;
        for (col, cell) in cells.iter().enumerate() {
            let col = col as u16;
            match cell {
                FixtureCell::Text(value) => {
                    sheet
                        .write_string(row, col, *value)
                        .context("write fixture text")?;
                }
                FixtureCell::Number(value) => {
                    sheet
                        .write_number(row, col, *value)
                        .context("write fixture number")?;
                }
                FixtureCell::Blank => {}
            }
        }
    }

    workbook.save_to_buffer().context("serialize fixture workbook")
}

/// A workbook with no cells at all.
pub fn empty_xlsx_bytes() -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    workbook.add_worksheet();
    workbook.save_to_buffer().context("serialize empty workbook")
}

pub fn product_record(index: usize) -> Record {
    Record::from_pairs([
        ("name", CellValue::text(product_name(index))),
        ("image link", CellValue::Text(image_url(index))),
        (
            "details",
            CellValue::Text(format!("Details about {}", product_name(index))),
        ),
        ("price", CellValue::text(PRICES[index % PRICES.len()])),
    ])
}

pub fn products(len: usize) -> Collection {
    Collection::new((0..len).map(product_record).collect())
}

/// Writes `contents` to `name` inside a fresh temp dir. Keep the dir alive
/// for as long as the file is needed.
pub fn write_temp_file(name: &str, contents: &[u8]) -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let path = dir.path().join(name);
    fs::write(&path, contents).with_context(|| format!("write fixture {}", path.display()))?;
    Ok((dir, path))
}
