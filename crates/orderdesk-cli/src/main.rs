// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;

use anyhow::{Context, Result, bail};
use config::Config;
use orderdesk_app::{OrderTableView, sample_orders};
use orderdesk_tui::UiOptions;
use std::env;
use std::path::PathBuf;

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
            "load config {}; run `orderdesk --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;

    if options.print_orders {
        let json =
            serde_json::to_string_pretty(&sample_orders()).context("encode seed orders as JSON")?;
        println!("{json}");
        return Ok(());
    }

    let log_path = config.log_file()?;
    logging::init(config.log_filter(), &log_path)?;
    tracing::debug!(
        config = %options.config_path.display(),
        log = %log_path.display(),
        "config loaded"
    );

    let ui_options = UiOptions {
        title: config.title().to_owned(),
        status_clear: config.status_clear()?,
    };
    let mut view = OrderTableView::seeded();
    if options.check_only {
        tracing::info!(orders = view.orders().len(), "startup check passed");
        return Ok(());
    }

    orderdesk_tui::run_app(&mut view, &ui_options)
}

const USAGE: &str = "\
usage: orderdesk [options]

Browse, edit, and delete the sample orders in a terminal table.

options:
  --config <path>          read settings from <path> instead of the default
  --print-config-path      show where orderdesk looks for its config and exit
  --print-example-config   write a commented config template to stdout and exit
  --print-orders           dump the seeded orders as JSON and exit
  --check                  load config, logging, and orders, then exit
  -h, --help               show this message
";

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_example: bool,
    print_orders: bool,
    check_only: bool,
    show_help: bool,
}

impl CliOptions {
    fn with_config_path(config_path: PathBuf) -> Self {
        Self {
            config_path,
            print_config_path: false,
            print_example: false,
            print_orders: false,
            check_only: false,
            show_help: false,
        }
    }
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions::with_config_path(default_config_path);
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_ref() {
            "--config" => {
                let Some(path) = args.next() else {
                    bail!("--config needs a path, for example `--config ~/orders.toml`");
                };
                options.config_path = PathBuf::from(path.as_ref());
            }
            "--print-config-path" => options.print_config_path = true,
            "--print-example-config" => options.print_example = true,
            "--print-orders" => options.print_orders = true,
            "--check" => options.check_only = true,
            "--help" | "-h" => options.show_help = true,
            other => bail!("unrecognized option {other:?}; `orderdesk --help` lists the options"),
        }
    }
    Ok(options)
}

fn print_help() {
    print!("{USAGE}");
}
