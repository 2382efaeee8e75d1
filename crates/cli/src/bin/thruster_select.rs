use std::io::{IsTerminal, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use thruster_select::config::{DEFAULT_CATALOG, load_catalog_or_empty};
use thruster_select::export::{json, table, text, writer_for_path};
use thruster_select::propulsion::MissionConstraints;
use thruster_select::ranking::evaluate;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Rank catalog thrusters by total wet mass for a delta-v and power budget",
    allow_negative_numbers = true
)]
struct Cli {
    /// Target delta-v (m/s)
    #[arg(long, value_parser = finite_f64)]
    dv: f64,

    /// Maximum thruster power draw (W), inclusive
    #[arg(long, value_parser = finite_f64)]
    power: f64,

    /// Satellite dry mass excluding thruster and propellant (kg)
    #[arg(long, value_parser = finite_f64)]
    mass: f64,

    /// Thruster catalog: JSON, YAML or TOML file, or a directory of TOML records
    #[arg(long, env = "THRUSTER_CATALOG", default_value = DEFAULT_CATALOG)]
    catalog: PathBuf,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Output path (use '-' for stdout)
    #[arg(long, default_value = "-")]
    output: PathBuf,

    /// List thrusters dropped by the power or Isp checks (text format only)
    #[arg(long, default_value_t = false)]
    show_excluded: bool,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum OutputFormat {
    Text,
    Json,
    Csv,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let constraints = MissionConstraints::new(cli.dv, cli.power, cli.mass)?;
    let catalog = load_catalog_or_empty(&cli.catalog)
        .with_context(|| format!("failed to load thruster catalog {}", cli.catalog.display()))?;

    let evaluation = evaluate(&catalog, &constraints);
    info!(
        catalog = catalog.len(),
        ranked = evaluation.ranked.len(),
        excluded = evaluation.excluded.len(),
        "thruster evaluation complete"
    );

    let mut writer = writer_for_path(&cli.output)
        .with_context(|| format!("failed to open output {}", cli.output.display()))?;
    match cli.format {
        OutputFormat::Text => text::write_report(
            writer.as_mut(),
            &constraints,
            &evaluation,
            text::ReportOptions {
                show_excluded: cli.show_excluded,
            },
        )?,
        OutputFormat::Json => json::write_report(writer.as_mut(), &constraints, &evaluation)?,
        OutputFormat::Csv => table::write_table(writer.as_mut(), &evaluation.ranked)?,
    }
    writer.flush()?;

    Ok(())
}

/// Logs go to stderr so the report on stdout stays machine-readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn finite_f64(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{raw}' is not a number"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("'{raw}' is not a finite number"))
    }
}
