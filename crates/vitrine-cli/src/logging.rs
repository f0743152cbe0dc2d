// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

pub const LOG_FILTER_ENV: &str = "VITRINE_LOG";

/// Installs the global subscriber when `[log].file` is set. The terminal
/// belongs to the viewer, so nothing is ever written to stdout or stderr.
pub fn init(config: &Config) -> Result<bool> {
    let Some(path) = config.log_file() else {
        return Ok(false);
    };

    let filter = filter(config.log_level())?;
    let file = open_log_file(&path)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|error| anyhow!("install log subscriber: {error}"))?;

    tracing::info!(path = %path.display(), "logging started");
    Ok(true)
}

fn filter(configured_level: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_env(LOG_FILTER_ENV) {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(configured_level)
            .with_context(|| format!("invalid log level {configured_level:?}")),
    }
}

fn open_log_file(path: &Path) -> Result<fs::File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))
}
