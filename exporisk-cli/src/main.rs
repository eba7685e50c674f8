//! ExpoRisk CLI — run and inspect risk calculations from the command line.
//!
//! Commands:
//! - `calculate` — run the engine over a windows JSON file and a config file
//! - `check-config` — parse and lint a configuration file offline
//! - `sample` — write a deterministic synthetic windows fixture

use anyhow::{bail, Context, Result};
use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use exporisk_core::config::RiskCalculationConfiguration;
use exporisk_core::domain::ExposureWindow;
use exporisk_core::engine::calculate_risk_now;
use exporisk_core::fixtures::synthetic_windows;

#[derive(Parser)]
#[command(name = "exporisk", about = "ExpoRisk CLI — exposure risk calculation engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a risk calculation over a windows file with a given configuration.
    Calculate {
        /// Path to a configuration file (TOML, or JSON with a .json extension).
        #[arg(long)]
        config: PathBuf,

        /// Path to a JSON array of exposure windows.
        #[arg(long)]
        windows: PathBuf,

        /// Write the result JSON here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Pretty-print the result JSON.
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
    /// Parse a configuration file and report validation findings.
    CheckConfig {
        /// Path to a configuration file (TOML or JSON).
        #[arg(long)]
        config: PathBuf,
    },
    /// Generate a deterministic synthetic windows fixture.
    Sample {
        /// Number of days to cover, ending today.
        #[arg(long, default_value_t = 14)]
        days: u32,

        /// Windows per day.
        #[arg(long, default_value_t = 10)]
        per_day: u32,

        /// RNG seed. Same seed, same fixture.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Output path for the windows JSON.
        #[arg(long, default_value = "windows.json")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Calculate {
            config,
            windows,
            output,
            pretty,
        } => cmd_calculate(&config, &windows, output.as_deref(), pretty),
        Commands::CheckConfig { config } => cmd_check_config(&config),
        Commands::Sample {
            days,
            per_day,
            seed,
            output,
        } => cmd_sample(days, per_day, seed, &output),
    }
}

fn cmd_calculate(
    config_path: &Path,
    windows_path: &Path,
    output: Option<&Path>,
    pretty: bool,
) -> Result<()> {
    let config = load_config(config_path)?;
    let validation = config.validate();
    if !validation.is_valid {
        eprintln!("warning: configuration has validation findings:");
        for error in &validation.errors {
            eprintln!("  - {}", error);
        }
    }

    let windows_json = std::fs::read_to_string(windows_path)
        .with_context(|| format!("reading windows file {}", windows_path.display()))?;
    let windows: Vec<ExposureWindow> =
        serde_json::from_str(&windows_json).context("parsing windows JSON")?;

    let result = calculate_risk_now(&windows, &config)
        .context("risk calculation failed; refresh the configuration")?;

    let json = if pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    match output {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("writing result to {}", path.display()))?;
            println!(
                "{} windows over {} days -> {:?} (written to {})",
                windows.len(),
                result.risk_level_per_date.len(),
                result.risk_level,
                path.display()
            );
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn cmd_check_config(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let validation = config.validate();
    if validation.is_valid {
        println!(
            "{}: ok ({} mapping ranges, {} attenuation filters)",
            config_path.display(),
            config.normalized_time_per_day_to_risk_level_mapping.len(),
            config.minutes_at_attenuation_filters.len()
        );
        Ok(())
    } else {
        for error in &validation.errors {
            eprintln!("  - {}", error);
        }
        bail!(
            "{}: {} validation finding(s)",
            config_path.display(),
            validation.errors.len()
        );
    }
}

fn cmd_sample(days: u32, per_day: u32, seed: u64, output: &Path) -> Result<()> {
    if days == 0 || per_day == 0 {
        bail!("--days and --per-day must both be at least 1");
    }
    let base_date = Utc::now().date_naive() - Duration::days(days as i64 - 1);
    let windows = synthetic_windows(base_date, days, per_day, seed);
    let json = serde_json::to_string_pretty(&windows)?;
    std::fs::write(output, &json)
        .with_context(|| format!("writing fixture to {}", output.display()))?;
    println!(
        "wrote {} windows ({} days x {}/day, seed {}) to {}",
        windows.len(),
        days,
        per_day,
        seed,
        output.display()
    );
    Ok(())
}

/// Load a configuration file, choosing the parser by extension: `.json` is
/// JSON, everything else is treated as TOML.
fn load_config(path: &Path) -> Result<RiskCalculationConfiguration> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    let config = if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::from_str(&raw).context("parsing JSON config")?
    } else {
        toml::from_str(&raw).context("parsing TOML config")?
    };
    Ok(config)
}
