//! Measure command: run registered measurements over files.

use std::collections::BTreeMap;

use anyhow::{Context, bail};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use stylometry_core::{Argument, Arguments, Measurement, Measurer, Value};

/// Arguments for the `measure` subcommand.
#[derive(Args, Debug)]
pub struct MeasureArgs {
    /// Files to measure.
    #[arg(required = true)]
    pub files: Vec<Utf8PathBuf>,

    /// Run only this measurement (repeatable; default: all).
    #[arg(long = "only", value_name = "NAME")]
    pub only: Vec<String>,

    /// Set a parameter for every selected measurement that takes it
    /// (repeatable; e.g. --param base=10).
    #[arg(long = "param", value_name = "NAME=VALUE", value_parser = parse_param)]
    pub params: Vec<(String, String)>,
}

/// Result of one measurement on one file.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Outcome {
    Value(Value),
    Undefined { error: String },
}

#[derive(Debug, Serialize)]
struct FileReport {
    file: Utf8PathBuf,
    words: usize,
    sentences: usize,
    measurements: BTreeMap<&'static str, Outcome>,
}

/// Run the selected measurements on each file and print a report.
///
/// Measurements that are undefined for a file (no words, no sentences) are
/// reported, not treated as failures.
#[instrument(name = "cmd_measure", skip_all, fields(files = args.files.len()))]
pub fn cmd_measure(
    args: MeasureArgs,
    global_json: bool,
    measurer: &Measurer,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    debug!(only = ?args.only, params = ?args.params, "executing measure command");

    let selected = select(measurer, &args.only)?;
    let overrides = args
        .params
        .iter()
        .map(|(name, raw)| Ok((name.as_str(), parse_value(name, raw)?)))
        .collect::<anyhow::Result<Vec<_>>>()?;
    for (name, _) in &overrides {
        if !selected.iter().any(|m| m.params.iter().any(|p| p.name == *name)) {
            bail!("no selected measurement takes a parameter named {name}");
        }
    }

    let progress = if args.files.len() > 1 && !global_json {
        let bar = ProgressBar::new(args.files.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .context("invalid progress template")?
                .progress_chars("#>-"),
        );
        bar
    } else {
        ProgressBar::hidden()
    };

    let mut reports = Vec::with_capacity(args.files.len());
    for file in &args.files {
        progress.set_message(file.to_string());
        let content = super::read_input_file(file, max_input)?;
        reports.push(measure_file(measurer, file, &content, &selected, &overrides)?);
        progress.inc(1);
    }
    progress.finish_and_clear();

    if global_json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print_report(report);
        }
    }
    Ok(())
}

/// Resolve `--only` names, or every registered measurement.
fn select<'m>(measurer: &'m Measurer, only: &[String]) -> anyhow::Result<Vec<&'m Measurement>> {
    if only.is_empty() {
        return Ok(measurer.registry().iter().collect());
    }
    only.iter()
        .map(|name| measurer.registry().get(name).map_err(anyhow::Error::from))
        .collect()
}

fn measure_file(
    measurer: &Measurer,
    file: &Utf8Path,
    content: &str,
    selected: &[&Measurement],
    overrides: &[(&str, Argument<'static>)],
) -> anyhow::Result<FileReport> {
    let document = measurer.document(content);
    let mut measurements = BTreeMap::new();

    for measurement in selected {
        let mut call = Arguments::with_text(&*document);
        for (name, value) in overrides {
            if measurement.params.iter().any(|p| p.name == *name) {
                call = call.named(*name, value.clone());
            }
        }
        let outcome = match measurer.measure(measurement.name, call) {
            Ok(value) => Outcome::Value(value),
            Err(e @ stylometry_core::MeasureError::Degenerate { .. }) => {
                Outcome::Undefined { error: e.to_string() }
            }
            Err(e) => return Err(e).with_context(|| format!("{} failed on {file}", measurement.name)),
        };
        measurements.insert(measurement.name, outcome);
    }

    Ok(FileReport {
        file: file.to_path_buf(),
        words: document.words().count(),
        sentences: document.sentences().len(),
        measurements,
    })
}

fn print_report(report: &FileReport) {
    println!(
        "{} {}",
        report.file.bold(),
        format!("({} words, {} sentences)", report.words, report.sentences).dimmed()
    );
    let width = report.measurements.keys().map(|k| k.len()).max().unwrap_or(0);
    for (name, outcome) in &report.measurements {
        match outcome {
            Outcome::Value(value) => println!("  {name:<width$}  {}", format_value(value)),
            Outcome::Undefined { error } => {
                println!("  {name:<width$}  {}", format!("undefined: {error}").yellow());
            }
        }
    }
}

/// Render a value for terminal output.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Count(n) => n.to_string(),
        Value::Scalar(x) => format!("{x:.4}"),
        Value::Distribution(dist) => dist
            .buckets()
            .iter()
            .map(|b| format!("{}: {:.3}", b.value, b.probability))
            .collect::<Vec<_>>()
            .join(", "),
        Value::RangeDistribution(dist) => dist
            .buckets()
            .iter()
            .map(|b| format!("{}-{}: {:.3}", b.low, b.high, b.probability))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// Parse `NAME=VALUE`.
fn parse_param(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got {s:?}"))?;
    if name.is_empty() {
        return Err(format!("missing parameter name in {s:?}"));
    }
    Ok((name.to_string(), value.to_string()))
}

/// Interpret a parameter value as a flag or a number.
fn parse_value(name: &str, raw: &str) -> anyhow::Result<Argument<'static>> {
    match raw {
        "true" => Ok(Argument::Flag(true)),
        "false" => Ok(Argument::Flag(false)),
        _ => raw
            .parse::<f64>()
            .map(Argument::Number)
            .with_context(|| format!("invalid value for {name}: {raw:?}")),
    }
}
