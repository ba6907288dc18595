//! Roster converter
//!
//! Converts list-builder roster exports into battle-ready armies and prints
//! the result as JSON or as a text summary.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use muster::convert::{convert_all, ConversionReport};
use muster::core::{load_config, ConversionConfig};
use muster::roster::{load_roster, RawRoster};
use serde::Serialize;

/// Convert list-builder rosters into battle-ready armies
#[derive(Parser, Debug)]
#[command(name = "convert_roster")]
#[command(about = "Convert roster exports into battle-ready armies")]
struct Args {
    /// Roster JSON files to convert
    #[arg(required = true)]
    rosters: Vec<PathBuf>,

    /// Conversion config (TOML); defaults apply when omitted
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Exit non-zero on validation errors too, not only on skipped units
    #[arg(long)]
    strict: bool,
}

/// JSON output structure
#[derive(Serialize)]
struct ConversionOutput<'a> {
    source: String,
    success: bool,
    warnings: Vec<String>,
    errors: Vec<String>,
    army: &'a muster::army::ResolvedArmy,
}

fn print_text(source: &str, report: &ConversionReport) {
    let army = &report.army;
    println!("{} ({})", army.name, source);
    println!("{}", "=".repeat(army.name.len() + source.len() + 3));
    println!(
        "Points: {} / {}   Models: {}   Activations: {}   Command points: {}",
        army.list_points,
        army.points_limit,
        army.model_count,
        army.activation_count,
        army.command_points
    );
    println!();

    for unit in &army.units {
        let mut flags = Vec::new();
        if unit.is_combined {
            flags.push("combined");
        }
        if unit.is_joined {
            flags.push("joined");
        }
        if unit.has_caster {
            flags.push("caster");
        }
        println!(
            "{} [Q{}+ D{}+] {} models, {} pts {}",
            unit.name,
            unit.quality,
            unit.defense,
            unit.model_count,
            unit.cost,
            if flags.is_empty() { String::new() } else { format!("({})", flags.join(", ")) }
        );
        for model in unit.models() {
            let weapons: Vec<String> = model
                .weapons
                .iter()
                .map(|w| {
                    if w.count > 1 {
                        format!("{}x {}", w.count, w.label)
                    } else {
                        w.label.clone()
                    }
                })
                .collect();
            println!(
                "  {} T{} - {}",
                model.name.as_deref().unwrap_or(&model.model_id),
                model.max_tough,
                weapons.join(", ")
            );
        }
    }

    for warning in report.warnings() {
        println!("warning: {}", warning);
    }
    for error in report.errors() {
        println!("error: {}", error);
    }
    println!();
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!("Failed to load config {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => ConversionConfig::default(),
    };

    let mut sources = Vec::new();
    let mut rosters: Vec<RawRoster> = Vec::new();
    let mut failed = false;
    for path in &args.rosters {
        match load_roster(path) {
            Ok(roster) => {
                sources.push(path.display().to_string());
                rosters.push(roster);
            }
            Err(e) => {
                tracing::error!("Failed to load roster {}: {}", path.display(), e);
                failed = true;
            }
        }
    }

    let reports = convert_all(&rosters, &config);
    for report in &reports {
        failed |= !report.is_success() || (args.strict && !report.errors().is_empty());
    }

    match args.format.as_str() {
        "text" => {
            for (source, report) in sources.iter().zip(&reports) {
                print_text(source, report);
            }
        }
        other => {
            if other != "json" {
                eprintln!("Unknown format '{}', defaulting to json", other);
            }
            let output: Vec<ConversionOutput> = sources
                .iter()
                .zip(&reports)
                .map(|(source, report)| ConversionOutput {
                    source: source.clone(),
                    success: report.is_success(),
                    warnings: report.warnings(),
                    errors: report.errors(),
                    army: &report.army,
                })
                .collect();
            match serde_json::to_string_pretty(&output) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    tracing::error!("Failed to serialize output: {}", e);
                    return ExitCode::FAILURE;
                }
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
