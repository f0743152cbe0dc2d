// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result, anyhow, bail};
use config::Config;
use runtime::IngestRuntime;
use std::env;
use std::path::PathBuf;
use vitrine_app::{AppCommand, AppState, Collection, SourceKind};
use vitrine_ingest::{Ingestor, SheetClient, SheetLocator, write_sample_workbook};
use vitrine_tui::ViewerSettings;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `vitrine --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;
    logging::init(&config)?;

    let sheets = SheetClient::new(config.remote_base_url(), config.remote_timeout()?)
        .with_context(|| {
            format!(
                "invalid [remote] config in {}; fix base_url/timeout values",
                options.config_path.display()
            )
        })?;
    let ingestor = Ingestor::new(config.profile(), sheets);

    if let Some(path) = &options.export_sample {
        write_sample_workbook(path, ingestor.profile())?;
        println!("sample workbook written to {}", path.display());
        return Ok(());
    }

    let preload = preload(&ingestor, &options, &config)?;
    if options.check_only {
        match &preload {
            Some((collection, origin)) => {
                println!("{} products loaded from {origin}", collection.len());
            }
            None => println!("config ok: {}", options.config_path.display()),
        }
        return Ok(());
    }

    let mut state = AppState::with_source(config.default_source());
    if let Some((collection, origin)) = preload {
        let len = collection.len();
        state.dispatch(AppCommand::Load(collection));
        state.dispatch(AppCommand::SetStatus(format!(
            "loaded {len} products from {origin}"
        )));
    }
    if options.file.is_some() {
        state.dispatch(AppCommand::SelectSource(SourceKind::File));
    }

    let settings = ViewerSettings {
        profile: ingestor.profile(),
        placeholder_image: config.placeholder_image().to_owned(),
        sheet_id: options
            .sheet_id
            .clone()
            .unwrap_or_else(|| config.sheet_id().to_owned()),
        sheet_name: options
            .sheet_name
            .clone()
            .unwrap_or_else(|| config.sheet_name().to_owned()),
    };
    let mut runtime = IngestRuntime::new(&ingestor);
    vitrine_tui::run_app(&mut state, &mut runtime, &settings)
}

/// Ingests the source named on the command line, if any. Rejections are
/// fatal here since there is no viewer yet to report them in.
fn preload(
    ingestor: &Ingestor,
    options: &CliOptions,
    config: &Config,
) -> Result<Option<(Collection, String)>> {
    if let Some(path) = &options.file {
        let collection = ingestor
            .ingest_path(path)
            .with_context(|| format!("load {}", path.display()))?;
        return Ok(Some((collection, path.display().to_string())));
    }

    if let Some(sheet_id) = &options.sheet_id {
        let sheet_name = options
            .sheet_name
            .as_deref()
            .unwrap_or_else(|| config.sheet_name());
        let locator = SheetLocator::new(sheet_id, sheet_name);
        let collection = ingestor.ingest_sheet(&locator).with_context(|| {
            format!("load Google Sheet {sheet_id:?}; make sure it is shared publicly")
        })?;
        return Ok(Some((collection, format!("sheet {sheet_name:?}"))));
    }

    Ok(None)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_example: bool,
    file: Option<PathBuf>,
    sheet_id: Option<String>,
    sheet_name: Option<String>,
    export_sample: Option<PathBuf>,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        print_config_path: false,
        print_example: false,
        file: None,
        sheet_id: None,
        sheet_name: None,
        export_sample: None,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--file" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--file requires a .csv or .xlsx path"))?;
                options.file = Some(PathBuf::from(value.as_ref()));
            }
            "--sheet-id" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--sheet-id requires a Google Sheet id"))?;
                options.sheet_id = Some(value.as_ref().to_owned());
            }
            "--sheet-name" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--sheet-name requires a sheet tab name"))?;
                options.sheet_name = Some(value.as_ref().to_owned());
            }
            "--export-sample" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--export-sample requires an output path"))?;
                options.export_sample = Some(PathBuf::from(value.as_ref()));
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                bail!("unknown argument {unknown:?}; run with --help to see supported options");
            }
        }
    }

    if options.file.is_some() && options.sheet_id.is_some() {
        bail!("--file and --sheet-id cannot be combined; pick one data source");
    }

    Ok(options)
}

fn print_help() {
    println!("vitrine: browse a product catalog from a spreadsheet");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a config template");
    println!("  --file <path>            Load a .csv or .xlsx file on startup");
    println!("  --sheet-id <id>          Load a public Google Sheet on startup");
    println!("  --sheet-name <name>      Sheet tab to load (default from config, Sheet1)");
    println!("  --export-sample <path>   Write the sample workbook and exit");
    println!("  --check                  Validate config and the startup source, then exit");
    println!("  --help                   Show this help");
}

#[cfg(test)]
mod tests {
    use super::{CliOptions, parse_cli_args};
    use anyhow::Result;
    use std::path::PathBuf;

    fn default_options_path() -> PathBuf {
        PathBuf::from("/tmp/vitrine-config.toml")
    }

    #[test]
    fn parse_cli_args_defaults_to_provided_config_path() -> Result<()> {
        let options = parse_cli_args(Vec::<String>::new(), default_options_path())?;
        assert_eq!(
            options,
            CliOptions {
                config_path: default_options_path(),
                print_config_path: false,
                print_example: false,
                file: None,
                sheet_id: None,
                sheet_name: None,
                export_sample: None,
                check_only: false,
                show_help: false,
            }
        );
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_config_path_override() -> Result<()> {
        let options = parse_cli_args(
            vec!["--config", "/custom/config.toml"],
            default_options_path(),
        )?;
        assert_eq!(options.config_path, PathBuf::from("/custom/config.toml"));
        Ok(())
    }

    #[test]
    fn parse_cli_args_errors_for_missing_values() {
        for (flag, hint) in [
            ("--config", "requires a file path"),
            ("--file", "requires a .csv or .xlsx path"),
            ("--sheet-id", "requires a Google Sheet id"),
            ("--export-sample", "requires an output path"),
        ] {
            let error = parse_cli_args(vec![flag], default_options_path())
                .expect_err("missing value should fail");
            assert!(error.to_string().contains(hint), "flag {flag}");
        }
    }

    #[test]
    fn parse_cli_args_errors_for_unknown_argument() {
        let error = parse_cli_args(vec!["--wat"], default_options_path())
            .expect_err("unknown arg should fail");
        let message = error.to_string();
        assert!(message.contains("unknown argument"));
        assert!(message.contains("--help"));
    }

    #[test]
    fn parse_cli_args_reads_sheet_source() -> Result<()> {
        let options = parse_cli_args(
            vec!["--sheet-id", "abc", "--sheet-name", "Spring Sale", "--check"],
            default_options_path(),
        )?;
        assert_eq!(options.sheet_id.as_deref(), Some("abc"));
        assert_eq!(options.sheet_name.as_deref(), Some("Spring Sale"));
        assert!(options.check_only);
        assert!(options.file.is_none());
        Ok(())
    }

    #[test]
    fn parse_cli_args_rejects_two_sources() {
        let error = parse_cli_args(
            vec!["--file", "items.csv", "--sheet-id", "abc"],
            default_options_path(),
        )
        .expect_err("two sources should fail");
        assert!(error.to_string().contains("cannot be combined"));
    }

    #[test]
    fn parse_cli_args_sets_print_and_export_flags() -> Result<()> {
        let options = parse_cli_args(
            vec![
                "--print-config-path",
                "--print-example-config",
                "--export-sample",
                "out.xlsx",
            ],
            default_options_path(),
        )?;
        assert!(options.print_config_path);
        assert!(options.print_example);
        assert_eq!(options.export_sample, Some(PathBuf::from("out.xlsx")));
        assert!(!options.show_help);
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_help_flag_for_long_and_short_variants() -> Result<()> {
        let long = parse_cli_args(vec!["--help"], default_options_path())?;
        assert!(long.show_help);

        let short = parse_cli_args(vec!["-h"], default_options_path())?;
        assert!(short.show_help);
        Ok(())
    }
}
