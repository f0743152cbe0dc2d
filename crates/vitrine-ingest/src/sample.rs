// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;
use std::fs;
use std::path::Path;
use vitrine_app::{DETAILS_COLUMN, IMAGE_ALIAS_COLUMN, NAME_COLUMN, PRICE_COLUMN, Profile};

pub const SAMPLE_FILE_NAME: &str = "sample_product_data.xlsx";
pub const SAMPLE_SHEET_NAME: &str = "Sheet1";

struct SampleProduct {
    name: &'static str,
    image: &'static str,
    details: &'static str,
    price: &'static str,
}

const SAMPLE_PRODUCTS: [SampleProduct; 3] = [
    SampleProduct {
        name: "Product A",
        image: "https://images.pexels.com/photos/19254458/pexels-photo-19254458/free-photo-of-elegant-couple-walking-on-the-pavement-in-city.jpeg",
        details: "Details about Product A",
        price: "2115 SAR",
    },
    SampleProduct {
        name: "Product B",
        image: "https://images.pexels.com/photos/19986440/pexels-photo-19986440/free-photo-of-sweet-cake-with-heart-and-letter.jpeg",
        details: "Details about Product B",
        price: "250 SAR",
    },
    SampleProduct {
        name: "Product C",
        image: "https://images.unsplash.com/photo-1576566588028-4147f3842f27",
        details: "Details about Product C",
        price: "2300 SAR",
    },
];

pub fn sample_header(profile: Profile) -> Vec<&'static str> {
    let mut header = vec![NAME_COLUMN, IMAGE_ALIAS_COLUMN, DETAILS_COLUMN];
    if profile == Profile::Priced {
        header.push(PRICE_COLUMN);
    }
    header
}

/// Builds the downloadable example workbook for `profile`.
pub fn sample_workbook(profile: Profile) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet
        .set_name(SAMPLE_SHEET_NAME)
        .context("name sample worksheet")?;

    for (col, title) in sample_header(profile).into_iter().enumerate() {
        sheet
            .write_string(0, col as u16, title)
            .context("write sample header")?;
    }

    for (index, product) in SAMPLE_PRODUCTS.iter().enumerate() {
        let row = index as u32 + 1;
        let mut cells = vec![product.name, product.image, product.details];
        if profile == Profile::Priced {
            cells.push(product.price);
        }
        for (col, value) in cells.into_iter().enumerate() {
            sheet
                .write_string(row, col as u16, value)
                .context("write sample row")?;
        }
    }

    workbook.save_to_buffer().context("serialize sample workbook")
}

pub fn write_sample_workbook(path: &Path, profile: Profile) -> Result<()> {
    let bytes = sample_workbook(profile)?;
    fs::write(path, bytes).with_context(|| format!("write sample workbook {}", path.display()))
}
