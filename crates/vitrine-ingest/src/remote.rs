// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use reqwest::blocking::Client as HttpClient;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::{ValidationError, ValidationResult};

pub const DEFAULT_SHEETS_BASE_URL: &str = "https://docs.google.com";
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// A published Google Sheet tab. Internal spaces are stored percent-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLocator {
    sheet_id: String,
    sheet_name: String,
}

impl SheetLocator {
    pub fn new(sheet_id: &str, sheet_name: &str) -> Self {
        Self {
            sheet_id: sheet_id.replace(' ', "%20"),
            sheet_name: sheet_name.replace(' ', "%20"),
        }
    }

    pub fn sheet_id(&self) -> &str {
        &self.sheet_id
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    pub fn has_sheet_id(&self) -> bool {
        !self.sheet_id.replace("%20", "").trim().is_empty()
    }

    pub fn csv_export_url(&self, base_url: &str) -> String {
        format!(
            "{}/spreadsheets/d/{}/gviz/tq?tqx=out:csv&sheet={}",
            base_url.trim_end_matches('/'),
            self.sheet_id,
            self.sheet_name
        )
    }
}

/// Blocking fetcher for the CSV export of a published sheet. One request per
/// call, no retries.
#[derive(Debug, Clone)]
pub struct SheetClient {
    base_url: String,
    timeout: Duration,
    http: HttpClient,
}

impl SheetClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        if base_url.is_empty() {
            bail!("remote.base_url must not be empty");
        }
        let parsed = Url::parse(&base_url)
            .with_context(|| format!("remote.base_url {base_url:?} is not a valid URL"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!(
                "remote.base_url {base_url:?} must use http or https, got {}",
                parsed.scheme()
            );
        }

        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self {
            base_url,
            timeout,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn fetch_csv(&self, locator: &SheetLocator) -> ValidationResult<Vec<u8>> {
        if !locator.has_sheet_id() {
            return Err(ValidationError::parse_failure("sheet id must not be empty"));
        }

        let raw_url = locator.csv_export_url(&self.base_url);
        let url = Url::parse(&raw_url).map_err(|error| {
            ValidationError::parse_failure(format!("invalid sheet locator {raw_url:?}: {error}"))
        })?;
        debug!(%url, "fetching sheet");

        let response = self.http.get(url).send().map_err(|error| {
            warn!(%error, "sheet request failed");
            ValidationError::parse_failure(format!(
                "cannot reach {}: {error}",
                self.base_url
            ))
        })?;

        let status = response.status();
        debug!(status = status.as_u16(), "sheet response");
        if !status.is_success() {
            return Err(ValidationError::parse_failure(format!(
                "sheet request returned {}; check the sheet id and name and make sure the sheet is shared publicly",
                status.as_u16()
            )));
        }

        let is_html = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("text/html"));
        if is_html {
            return Err(ValidationError::parse_failure(
                "sheet returned an HTML page instead of CSV; publish the sheet or check the sheet id",
            ));
        }

        let body = response.bytes().map_err(|error| {
            ValidationError::parse_failure(format!("read sheet response: {error}"))
        })?;
        Ok(body.to_vec())
    }
}
