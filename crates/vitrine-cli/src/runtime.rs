// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use std::path::Path;
use vitrine_app::Collection;
use vitrine_ingest::{Ingestor, SheetLocator, ValidationResult, write_sample_workbook};

pub struct IngestRuntime<'a> {
    ingestor: &'a Ingestor,
}

impl<'a> IngestRuntime<'a> {
    pub fn new(ingestor: &'a Ingestor) -> Self {
        Self { ingestor }
    }
}

impl vitrine_tui::AppRuntime for IngestRuntime<'_> {
    fn load_file(&mut self, path: &Path) -> ValidationResult<Collection> {
        self.ingestor.ingest_path(path)
    }

    fn load_sheet(&mut self, locator: &SheetLocator) -> ValidationResult<Collection> {
        self.ingestor.ingest_sheet(locator)
    }

    fn export_sample(&mut self, path: &Path) -> Result<()> {
        write_sample_workbook(path, self.ingestor.profile())
    }
}
