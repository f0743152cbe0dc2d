// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, anyhow};
use std::collections::BTreeSet;
use std::thread;
use std::time::Duration;
use tiny_http::{Header, Response, Server};
use vitrine_app::{CellValue, Profile};
use vitrine_ingest::{
    Ingestor, SheetClient, SheetLocator, Source, SourceFormat, ValidationError, ingest_bytes,
    sample_workbook,
};
use vitrine_testkit::{
    FixtureCell, csv_text, empty_xlsx_bytes, products_csv, write_temp_file, xlsx_bytes,
};

fn ingestor(profile: Profile, base_url: &str) -> Result<Ingestor> {
    let client = SheetClient::new(base_url, Duration::from_secs(2))?;
    Ok(Ingestor::new(profile, client))
}

fn offline_ingestor(profile: Profile) -> Result<Ingestor> {
    ingestor(profile, "http://127.0.0.1:1")
}

#[test]
fn csv_example_normalizes_image_column() -> Result<()> {
    let csv = "name,image,details\nA,http://x/1.png,d1\nB,http://x/2.png,d2";
    let collection = ingest_bytes(SourceFormat::Csv, csv.as_bytes(), Profile::Basic)?;

    assert_eq!(collection.len(), 2);
    let first = &collection.records()[0];
    assert_eq!(first.display("name"), "A");
    assert_eq!(first.display("image link"), "http://x/1.png");
    assert_eq!(first.display("details"), "d1");
    assert!(first.get("image").is_none());
    assert_eq!(collection.records()[1].display("name"), "B");
    Ok(())
}

#[test]
fn collection_length_and_order_follow_source_rows() -> Result<()> {
    let csv = products_csv(7);
    let collection = ingest_bytes(SourceFormat::Csv, csv.as_bytes(), Profile::Priced)?;

    assert_eq!(collection.len(), 7);
    let names: Vec<String> = collection
        .records()
        .iter()
        .map(|record| record.display("name"))
        .collect();
    let expected: Vec<String> = (0..7)
        .map(|index| vitrine_testkit::product_name(index).to_owned())
        .collect();
    assert_eq!(names, expected);
    Ok(())
}

#[test]
fn missing_details_column_is_reported() {
    let csv = csv_text(&["name", "image"], &[&["A", "http://x/1.png"]]);
    let error = ingest_bytes(SourceFormat::Csv, csv.as_bytes(), Profile::Basic)
        .expect_err("details is required");
    assert_eq!(
        error,
        ValidationError::MissingColumns(BTreeSet::from(["details".to_owned()]))
    );
}

#[test]
fn priced_profile_reports_every_missing_column() {
    let csv = csv_text(&["title", "image link"], &[&["A", "http://x/1.png"]]);
    let error = ingest_bytes(SourceFormat::Csv, csv.as_bytes(), Profile::Priced)
        .expect_err("several columns missing");
    assert_eq!(
        error,
        ValidationError::MissingColumns(BTreeSet::from([
            "details".to_owned(),
            "name".to_owned(),
            "price".to_owned(),
        ]))
    );
}

#[test]
fn column_names_are_case_sensitive() {
    let csv = csv_text(&["Name", "image", "details"], &[&["A", "http://x", "d"]]);
    let error = ingest_bytes(SourceFormat::Csv, csv.as_bytes(), Profile::Basic)
        .expect_err("Name is not name");
    assert_eq!(
        error,
        ValidationError::MissingColumns(BTreeSet::from(["name".to_owned()]))
    );
}

#[test]
fn header_only_csv_is_empty_dataset() {
    let error = ingest_bytes(
        SourceFormat::Csv,
        b"name,image link,details,price\n",
        Profile::Priced,
    )
    .expect_err("no rows");
    assert_eq!(error, ValidationError::EmptyDataset);
}

#[test]
fn blank_valued_csv_rows_are_kept_as_records() -> Result<()> {
    let collection = ingest_bytes(
        SourceFormat::Csv,
        b"name,image link,details\nA,,d\n  ,  ,  \nB,,d\n",
        Profile::Basic,
    )?;
    assert_eq!(collection.len(), 3);
    assert_eq!(collection.records()[1].display("name"), "  ");
    assert_eq!(collection.records()[2].display("name"), "B");

    let only_commas = ingest_bytes(
        SourceFormat::Csv,
        b"name,image link,details\n,,\n",
        Profile::Basic,
    )?;
    assert_eq!(only_commas.len(), 1);
    assert_eq!(
        only_commas.records()[0].get("details"),
        Some(&CellValue::Empty)
    );
    Ok(())
}

#[test]
fn xlsx_gap_rows_are_not_records() -> Result<()> {
    let bytes = xlsx_bytes(
        &["name", "image link", "details"],
        &[
            vec!["A".into(), "http://x/1.png".into(), "d1".into()],
            Vec::new(),
            vec!["B".into(), FixtureCell::Blank, "d2".into()],
        ],
    )?;
    let collection = ingest_bytes(SourceFormat::Spreadsheet, &bytes, Profile::Basic)?;
    assert_eq!(collection.len(), 2);
    assert_eq!(collection.records()[1].display("name"), "B");
    Ok(())
}

#[test]
fn bad_image_link_still_ingests() -> Result<()> {
    let csv = csv_text(
        &["name", "image link", "details"],
        &[&["A", "not-a-url", "d1"], &["B", "", "d2"]],
    );
    let collection = ingest_bytes(SourceFormat::Csv, csv.as_bytes(), Profile::Basic)?;
    assert_eq!(collection.len(), 2);
    assert_eq!(collection.records()[0].display("image link"), "not-a-url");
    assert_eq!(
        collection.records()[1].get("image link"),
        Some(&CellValue::Empty)
    );
    Ok(())
}

#[test]
fn xlsx_source_keeps_numeric_cells_and_extra_columns() -> Result<()> {
    let bytes = xlsx_bytes(
        &["name", "image", "details", "price", "stock"],
        &[
            vec![
                "Lamp".into(),
                "http://img.test/lamp.png".into(),
                "Brass".into(),
                2115.0.into(),
                4.0.into(),
            ],
            vec![
                "Vase".into(),
                FixtureCell::Blank,
                "Clay".into(),
                "250 SAR".into(),
            ],
        ],
    )?;

    let collection = ingest_bytes(SourceFormat::Spreadsheet, &bytes, Profile::Priced)?;
    assert_eq!(collection.len(), 2);

    let lamp = &collection.records()[0];
    assert_eq!(lamp.get("price"), Some(&CellValue::Number(2115.0)));
    assert_eq!(lamp.display("price"), "2115");
    assert_eq!(lamp.display("stock"), "4");
    assert_eq!(lamp.display("image link"), "http://img.test/lamp.png");

    let vase = &collection.records()[1];
    assert_eq!(vase.get("image link"), Some(&CellValue::Empty));
    assert_eq!(vase.get("stock"), Some(&CellValue::Empty));
    Ok(())
}

#[test]
fn empty_workbook_reports_missing_columns() -> Result<()> {
    let bytes = empty_xlsx_bytes()?;
    let error = ingest_bytes(SourceFormat::Spreadsheet, &bytes, Profile::Basic)
        .expect_err("no header at all");
    assert!(matches!(error, ValidationError::MissingColumns(ref missing) if missing.len() == 3));
    Ok(())
}

#[test]
fn csv_bytes_given_as_spreadsheet_fail_to_parse() {
    let error = ingest_bytes(
        SourceFormat::Spreadsheet,
        b"name,image,details\nA,b,c\n",
        Profile::Basic,
    )
    .expect_err("not a workbook");
    assert!(matches!(error, ValidationError::ParseFailure(_)));
}

#[test]
fn sample_workbook_ingests_for_each_profile() -> Result<()> {
    for profile in Profile::ALL {
        let bytes = sample_workbook(profile)?;
        let collection = ingest_bytes(SourceFormat::Spreadsheet, &bytes, profile)?;
        assert_eq!(collection.len(), 3);
        assert_eq!(collection.records()[0].display("name"), "Product A");
        assert!(collection.records()[0].display("image link").starts_with("https://"));
    }

    let basic = sample_workbook(Profile::Basic)?;
    let error = ingest_bytes(SourceFormat::Spreadsheet, &basic, Profile::Priced)
        .expect_err("basic sample has no price column");
    assert_eq!(
        error,
        ValidationError::MissingColumns(BTreeSet::from(["price".to_owned()]))
    );
    Ok(())
}

#[test]
fn ingest_path_detects_format_from_extension() -> Result<()> {
    let ingestor = offline_ingestor(Profile::Priced)?;

    let (_csv_dir, csv_path) = write_temp_file("products.csv", products_csv(2).as_bytes())?;
    assert_eq!(ingestor.ingest_path(&csv_path)?.len(), 2);

    let (_xlsx_dir, xlsx_path) =
        write_temp_file("products.xlsx", &sample_workbook(Profile::Priced)?)?;
    assert_eq!(ingestor.ingest_path(&xlsx_path)?.len(), 3);
    Ok(())
}

#[test]
fn ingest_path_rejects_unknown_extension_and_missing_file() -> Result<()> {
    let ingestor = offline_ingestor(Profile::Basic)?;

    let (_dir, path) = write_temp_file("products.txt", b"name,image,details\n")?;
    let error = ingestor.ingest_path(&path).expect_err("txt unsupported");
    assert!(error.to_string().contains("unsupported file type"));

    let missing = path.with_file_name("missing.csv");
    let error = ingestor.ingest_path(&missing).expect_err("file missing");
    assert!(matches!(error, ValidationError::ParseFailure(_)));
    Ok(())
}

#[test]
fn remote_sheet_is_fetched_as_csv() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let base_url = format!("http://{}", server.server_addr());

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        assert_eq!(
            request.url(),
            "/spreadsheets/d/sheet%20id/gviz/tq?tqx=out:csv&sheet=Spring%20Sale"
        );
        let response = Response::from_string(products_csv(3))
            .with_status_code(200)
            .with_header(
                Header::from_bytes("Content-Type", "text/csv; charset=utf-8")
                    .expect("valid content type header"),
            );
        request.respond(response).expect("response should succeed");
    });

    let ingestor = ingestor(Profile::Priced, &base_url)?;
    let collection = ingestor.ingest(&Source::Remote(SheetLocator::new(
        "sheet id",
        "Spring Sale",
    )))?;
    assert_eq!(collection.len(), 3);
    assert_eq!(collection.records()[2].display("price"), "240 SAR");

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn remote_error_status_is_parse_failure() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let base_url = format!("http://{}", server.server_addr());

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        request
            .respond(Response::from_string("not found").with_status_code(404))
            .expect("response should succeed");
    });

    let ingestor = ingestor(Profile::Basic, &base_url)?;
    let error = ingestor
        .ingest_sheet(&SheetLocator::new("missing", "Sheet1"))
        .expect_err("404 should fail");
    match error {
        ValidationError::ParseFailure(message) => {
            assert!(message.contains("404"), "unexpected message: {message}");
        }
        other => panic!("unexpected error {other:?}"),
    }

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn remote_html_page_is_parse_failure() -> Result<()> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let base_url = format!("http://{}", server.server_addr());

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        let response = Response::from_string("<html><body>Sign in</body></html>")
            .with_status_code(200)
            .with_header(
                Header::from_bytes("Content-Type", "text/html; charset=utf-8")
                    .expect("valid content type header"),
            );
        request.respond(response).expect("response should succeed");
    });

    let ingestor = ingestor(Profile::Basic, &base_url)?;
    let error = ingestor
        .ingest_sheet(&SheetLocator::new("private", "Sheet1"))
        .expect_err("html should fail");
    assert!(error.to_string().contains("HTML page"));

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn unreachable_remote_is_parse_failure() -> Result<()> {
    let client = SheetClient::new("http://127.0.0.1:1", Duration::from_millis(200))?;
    let ingestor = Ingestor::new(Profile::Basic, client);

    let error = ingestor
        .ingest_sheet(&SheetLocator::new("abc", "Sheet1"))
        .expect_err("nothing listens on port 1");
    match error {
        ValidationError::ParseFailure(message) => {
            assert!(message.contains("cannot reach"), "unexpected message: {message}");
        }
        other => panic!("unexpected error {other:?}"),
    }
    Ok(())
}
