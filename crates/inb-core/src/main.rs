//! Command-line entry point for the INB toolkit.
//!
//! Evaluates scenario files into renderer-ready numeric sequences. Chart
//! drawing itself is left to external tooling; this binary only emits JSON
//! or CSV.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use inb_common::{Error, OutputFormat, Result};
use inb_core::scenario::{Scenario, ScenarioError, SweepReport};
use inb_core::sweep::SweepError;
use inb_math::CombinationMode;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "inb",
    about = "Incremental net benefit curves for diagnostic test strategies",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate a scenario file and print the report.
    Sweep {
        /// Path to the scenario JSON file.
        #[arg(long)]
        scenario: PathBuf,

        /// Report encoding.
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Keep negative INB values instead of applying the display filter.
        #[arg(long)]
        raw: bool,
    },
    /// List the available combination modes.
    Modes,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(err.code() as u8)
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Sweep {
            scenario,
            format,
            raw,
        } => {
            let scenario = Scenario::from_file(&scenario).map_err(map_scenario_err)?;
            let report = scenario.sweep().map_err(map_scenario_err)?;
            match format {
                OutputFormat::Json => print_json(&report, raw)?,
                OutputFormat::Csv => print_csv(&report, raw),
            }
            Ok(())
        }
        Command::Modes => {
            for mode in CombinationMode::ALL {
                println!("{} ({} tests)", mode.name(), mode.arity());
            }
            Ok(())
        }
    }
}

/// Map scenario-layer errors onto the unified error taxonomy so each class
/// keeps its stable exit code.
fn map_scenario_err(err: ScenarioError) -> Error {
    match err {
        ScenarioError::Io(message) => Error::Io(std::io::Error::other(message)),
        ScenarioError::Parse(message) => Error::Scenario(message),
        ScenarioError::SchemaVersion { .. } => Error::SchemaValidation(err.to_string()),
        ScenarioError::Threshold { .. }
        | ScenarioError::NoStrategies
        | ScenarioError::Strategy { .. } => Error::Scenario(err.to_string()),
        ScenarioError::Sweep(SweepError::Formula(formula)) => Error::Domain(formula.to_string()),
        ScenarioError::Sweep(other) => Error::Sweep(other.to_string()),
        ScenarioError::Envelope(envelope) => Error::Envelope(envelope.to_string()),
    }
}

#[derive(Serialize)]
struct DisplayCurve<'a> {
    label: &'a str,
    points: Vec<inb_core::CurvePoint>,
}

#[derive(Serialize)]
struct DisplayReport<'a> {
    treatment_threshold: f64,
    curves: Vec<DisplayCurve<'a>>,
    hull: Vec<inb_core::CurvePoint>,
}

fn print_json(report: &SweepReport, raw: bool) -> Result<()> {
    let rendered = if raw {
        serde_json::to_string_pretty(report)?
    } else {
        let curves = report
            .curves
            .iter()
            .enumerate()
            .map(|(index, curve)| DisplayCurve {
                label: &curve.label,
                points: report.display_curve(index).unwrap_or_default(),
            })
            .collect();
        serde_json::to_string_pretty(&DisplayReport {
            treatment_threshold: report.treatment_threshold,
            curves,
            hull: report.display_hull(),
        })?
    };
    println!("{rendered}");
    Ok(())
}

fn print_csv(report: &SweepReport, raw: bool) {
    let mut header = String::from("p");
    for curve in &report.curves {
        header.push(',');
        header.push_str(&curve.label);
    }
    header.push_str(",hull");
    println!("{header}");

    for (i, p) in report.points.iter().enumerate() {
        let mut row = format!("{p}");
        for curve in &report.curves {
            row.push(',');
            let value = curve.values[i];
            if raw || value >= 0.0 {
                row.push_str(&value.to_string());
            }
        }
        row.push(',');
        let value = report.hull[i];
        if raw || value >= 0.0 {
            row.push_str(&value.to_string());
        }
        println!("{row}");
    }
}
