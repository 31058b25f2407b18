//! # ISM File Reader
//!
//! A command-line tool for inspecting Zahner Thales ISM
//! impedance-spectroscopy files.
//!
//! ## Usage
//!
//! ```bash
//! # Summarize a measurement
//! ismread info measurement.ism
//!
//! # Print the decoded samples
//! ismread dump measurement.ism
//!
//! # Print the raw untrimmed arrays in storage order
//! ismread dump --raw measurement.ism
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::path::{Path, PathBuf};

use ismread::IsmRecord;

/// ismread - Zahner Thales ISM File Reader
#[derive(Parser)]
#[command(name = "ismread")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display summary information about an ISM file
    Info {
        /// Input ISM file path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print decoded sample values as a table
    Dump {
        /// Input ISM file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the raw untrimmed arrays in storage order instead of the
        /// trimmed views
        #[arg(long)]
        raw: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Info { file } => cmd_info(file),
        Commands::Dump { file, raw } => cmd_dump(file, raw),
    }
}

fn decode(file: &Path) -> Result<IsmRecord> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }
    let record = IsmRecord::open(file)
        .with_context(|| format!("Failed to decode {}", file.display()))?;
    info!("decoded {} samples", record.element_count());
    Ok(record)
}

fn cmd_info(file: PathBuf) -> Result<()> {
    let record = decode(&file)?;

    println!("ISM File Information");
    println!("====================");
    println!("File: {}", file.display());
    println!();

    println!("Measurement:");
    println!("  Date:            {}", record.measurement_date());
    println!("  End time:        {}", record.measurement_end_datetime());
    println!("  Samples:         {}", record.element_count());
    println!();

    println!("Sweep:");
    println!(
        "  First direction: {}",
        if record.first_up() {
            "ascending"
        } else {
            "descending"
        }
    );
    match record.reverse_index() {
        Some(i) => println!("  Reversal index:  {i}"),
        None => println!("  Reversal index:  none (monotonic sweep)"),
    }

    let frequency = record.frequency_array();
    println!("  Trimmed samples: {}", frequency.len());
    let (min, max) = frequency
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &f| {
            (lo.min(f), hi.max(f))
        });
    println!("  Frequency range: {min:.6} Hz - {max:.6} Hz");

    Ok(())
}

fn cmd_dump(file: PathBuf, raw: bool) -> Result<()> {
    let record = decode(&file)?;

    println!(
        "{:>14}  {:>14}  {:>10}  {:>5}  {}",
        "frequency/Hz", "impedance/Ohm", "phase/rad", "sig", "timestamp"
    );

    if raw {
        for i in 0..record.element_count() {
            println!(
                "{:>14.6}  {:>14.6}  {:>10.6}  {:>5}  {}",
                record.raw_frequency()[i],
                record.raw_impedance()[i],
                record.raw_phase()[i],
                record.raw_significance()[i],
                record.raw_timestamps()[i]
            );
        }
    } else {
        let frequency = record.frequency_array();
        let impedance = record.impedance_array();
        let phase = record.phase_array();
        let significance = record.significance_array();
        let timestamps = record.measurement_datetime_array();
        for i in 0..frequency.len() {
            println!(
                "{:>14.6}  {:>14.6}  {:>10.6}  {:>5}  {}",
                frequency[i], impedance[i], phase[i], significance[i], timestamps[i]
            );
        }
    }

    Ok(())
}
