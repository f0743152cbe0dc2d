// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use vitrine_app::{Profile, SourceKind};
use vitrine_ingest::{DEFAULT_SHEET_NAME, DEFAULT_SHEETS_BASE_URL};
use vitrine_tui::DEFAULT_PLACEHOLDER_IMAGE;

pub const APP_NAME: &str = "vitrine";
pub const CONFIG_PATH_ENV: &str = "VITRINE_CONFIG_PATH";

const CONFIG_VERSION: i64 = 1;
const DEFAULT_TIMEOUT: &str = "10s";
const DEFAULT_LOG_LEVEL: &str = "info";
const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub catalog: Catalog,
    #[serde(default)]
    pub remote: Remote,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            catalog: Catalog::default(),
            remote: Remote::default(),
            ui: Ui::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    pub profile: Option<Profile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Remote {
    pub base_url: Option<String>,
    pub timeout: Option<String>,
    pub sheet_id: Option<String>,
    pub sheet_name: Option<String>,
}

impl Default for Remote {
    fn default() -> Self {
        Self {
            base_url: Some(DEFAULT_SHEETS_BASE_URL.to_owned()),
            timeout: Some(DEFAULT_TIMEOUT.to_owned()),
            sheet_id: None,
            sheet_name: Some(DEFAULT_SHEET_NAME.to_owned()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    pub default_source: Option<String>,
    pub placeholder_image: Option<String>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            default_source: Some("sheet".to_owned()),
            placeholder_image: Some(DEFAULT_PLACEHOLDER_IMAGE.to_owned()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Log {
    pub file: Option<String>,
    pub level: Option<String>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set {CONFIG_PATH_ENV} to the config file")
        })?;
        Ok(config_root.join(APP_NAME).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and put values under [catalog], [remote], [ui], and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(base_url) = &self.remote.base_url {
            let trimmed = base_url.trim();
            if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
                bail!(
                    "remote.base_url in {} must start with http:// or https://, got {:?}",
                    path.display(),
                    base_url
                );
            }
        }

        if let Some(timeout) = &self.remote.timeout {
            let parsed = parse_duration(timeout)?;
            if parsed <= Duration::ZERO {
                bail!(
                    "remote.timeout in {} must be positive, got {}",
                    path.display(),
                    timeout
                );
            }
        }

        if let Some(source) = &self.ui.default_source
            && SourceKind::parse(source).is_none()
        {
            bail!(
                "ui.default_source in {} must be \"sheet\" or \"file\", got {:?}",
                path.display(),
                source
            );
        }

        if let Some(level) = &self.log.level
            && !LOG_LEVELS.contains(&level.as_str())
        {
            bail!(
                "log.level in {} must be one of {}, got {:?}",
                path.display(),
                LOG_LEVELS.join(", "),
                level
            );
        }

        Ok(())
    }

    pub fn profile(&self) -> Profile {
        self.catalog.profile.unwrap_or_default()
    }

    pub fn remote_base_url(&self) -> &str {
        self.remote
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_SHEETS_BASE_URL)
            .trim()
            .trim_end_matches('/')
    }

    pub fn remote_timeout(&self) -> Result<Duration> {
        parse_duration(self.remote.timeout.as_deref().unwrap_or(DEFAULT_TIMEOUT))
    }

    pub fn sheet_id(&self) -> &str {
        self.remote.sheet_id.as_deref().unwrap_or("")
    }

    pub fn sheet_name(&self) -> &str {
        self.remote
            .sheet_name
            .as_deref()
            .unwrap_or(DEFAULT_SHEET_NAME)
    }

    pub fn default_source(&self) -> SourceKind {
        self.ui
            .default_source
            .as_deref()
            .and_then(SourceKind::parse)
            .unwrap_or(SourceKind::Sheet)
    }

    pub fn placeholder_image(&self) -> &str {
        self.ui
            .placeholder_image
            .as_deref()
            .unwrap_or(DEFAULT_PLACEHOLDER_IMAGE)
    }

    pub fn log_file(&self) -> Option<PathBuf> {
        self.log
            .file
            .as_deref()
            .map(str::trim)
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
    }

    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# vitrine config\n# Place this file at: {}\n\nversion = 1\n\n[catalog]\n# \"priced\" requires name, image link, details, price; \"basic\" drops price\nprofile = \"priced\"\n\n[remote]\nbase_url = \"{}\"\ntimeout = \"{}\"\n# Pre-filled into the Google Sheet prompt\n# sheet_id = \"1AbC...\"\nsheet_name = \"{}\"\n\n[ui]\n# \"sheet\" or \"file\"\ndefault_source = \"sheet\"\nplaceholder_image = \"{}\"\n\n[log]\n# Logging is off unless a file is set; VITRINE_LOG overrides the level\n# file = \"/tmp/vitrine.log\"\nlevel = \"{}\"\n",
            path.display(),
            DEFAULT_SHEETS_BASE_URL,
            DEFAULT_TIMEOUT,
            DEFAULT_SHEET_NAME,
            DEFAULT_PLACEHOLDER_IMAGE,
            DEFAULT_LOG_LEVEL,
        )
    }
}

fn parse_duration(raw: &str) -> Result<Duration> {
    if let Some(value) = raw.strip_suffix("ms") {
        let millis: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(value) = raw.strip_suffix('s') {
        let secs: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_secs(secs));
    }
    if let Some(value) = raw.strip_suffix('m') {
        let mins: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        let secs = mins
            .checked_mul(60)
            .ok_or_else(|| anyhow!("timeout duration {raw:?} is too large"))?;
        return Ok(Duration::from_secs(secs));
    }

    bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 500ms or 10s)")
}
