//! `sift`: validate JSON submissions against declarative input specs.
//!
//! ```text
//! sift check --spec signup.yaml --data submission.json [--reject-unknown] [--pretty]
//! sift explain --spec signup.yaml
//! ```
//!
//! `check` prints a JSON report and exits 0 when the submission is valid,
//! 1 when it is not and 2 on usage errors (unreadable files, malformed
//! specs, unknown filter or validator names, non-object data).

mod config;
mod explain;
mod logging;
mod report;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::Value;
use sift_factory::{Factory, GroupSpec};

use config::{Config, LogFormat, Overrides};
use report::Report;

const EXIT_INVALID: u8 = 1;
const EXIT_USAGE: u8 = 2;

#[derive(Debug, Parser)]
#[command(name = "sift", version, about = "Filter and validate nested input")]
struct Cli {
    /// Config file (defaults to ./sift.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Default log filter, e.g. `debug` or `sift_input=trace`
    #[arg(long, global = true, value_name = "FILTER")]
    log_level: Option<String>,

    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate a JSON document against a spec and print the report
    Check {
        /// Spec file, YAML (`.yaml`/`.yml`) or JSON
        #[arg(long, value_name = "FILE")]
        spec: PathBuf,

        /// JSON data file, `-` for stdin
        #[arg(long, value_name = "FILE")]
        data: PathBuf,

        /// Fail when the data carries keys no input claims
        #[arg(long)]
        reject_unknown: bool,

        /// Pretty-print the report
        #[arg(long)]
        pretty: bool,
    },
    /// Print the input tree described by a spec
    Explain {
        #[arg(long, value_name = "FILE")]
        spec: PathBuf,
    },
}

impl Cli {
    fn overrides(&self) -> Overrides {
        let (reject_unknown, pretty) = match &self.command {
            Command::Check {
                reject_unknown,
                pretty,
                ..
            } => (reject_unknown.then_some(true), pretty.then_some(true)),
            Command::Explain { .. } => (None, None),
        };
        Overrides {
            log_level: self.log_level.clone(),
            log_format: self.log_format,
            reject_unknown,
            pretty,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_USAGE)
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let config = Config::load(cli.config.as_deref(), &cli.overrides())?;
    logging::init(&config)?;
    tracing::debug!(?config, "configuration loaded");

    match &cli.command {
        Command::Check { spec, data, .. } => check(&config, spec, data),
        Command::Explain { spec } => {
            print!("{}", explain::render(&load_spec(spec)?));
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn check(config: &Config, spec: &Path, data: &Path) -> anyhow::Result<ExitCode> {
    let mut group = Factory::default()
        .build(&load_spec(spec)?)
        .with_context(|| format!("cannot build `{}`", spec.display()))?;
    let data = load_data(data)?;

    let report = Report::collect(&mut group, data, config.reject_unknown)?;
    tracing::info!(valid = report.valid, "check finished");
    println!("{}", report.to_json(config.pretty)?);

    Ok(if report.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_INVALID)
    })
}

fn load_spec(path: &Path) -> anyhow::Result<GroupSpec> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read spec `{}`", path.display()))?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    if is_yaml {
        GroupSpec::from_yaml(&text).with_context(|| format!("invalid spec `{}`", path.display()))
    } else {
        GroupSpec::from_json(&text).with_context(|| format!("invalid spec `{}`", path.display()))
    }
}

fn load_data(path: &Path) -> anyhow::Result<Value> {
    let text = if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("cannot read data from stdin")?;
        text
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("cannot read data `{}`", path.display()))?
    };
    serde_json::from_str(&text).with_context(|| format!("invalid JSON in `{}`", path.display()))
}
