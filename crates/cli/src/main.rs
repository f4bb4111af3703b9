//! xdr-brightness CLI: read and set Apple Pro Display XDR brightness.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing::debug;
use xdr_brightness_core::backend::HidApiBackend;
use xdr_brightness_core::brightness::BrightnessValue;
use xdr_brightness_core::command;
use xdr_brightness_core::device::{self, ProbeStatus};
use xdr_brightness_core::error::{Error, ResultCode};
use xdr_brightness_core::transport::{check_api_version, HidBackend};

const EXAMPLES: &str = "\
Brightness value:
  Valid integer values are in the range [400, 50000], inclusive.
  Percentage values are also accepted, e.g. \"50%\".

Examples:
  xdr-brightness get -%
  xdr-brightness set 400
  xdr-brightness set 30%";

#[derive(Parser)]
#[command(
    name = "xdr-brightness",
    version,
    about = "Apple Pro Display XDR brightness control",
    after_help = EXAMPLES
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get current brightness.
    Get {
        /// Print the value as a percentage.
        #[arg(short = '%', long = "percent")]
        percent: bool,
        /// Print both units as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Set brightness to an integer in [400, 50000] or a percentage such as "50%".
    Set {
        /// Brightness value.
        value: BrightnessValue,
    },
    /// List Pro Display XDR HID interfaces and which one controls brightness.
    List {
        /// Print the listing as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn open_backend() -> Result<HidApiBackend> {
    let backend = HidApiBackend::new()?;
    check_api_version(backend.api_versions())?;
    Ok(backend)
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Get { percent, json } => {
            let backend = open_backend()?;
            let reading = command::get(&backend).context("failed to read brightness")?;
            if *json {
                println!("{}", serde_json::to_string(&reading)?);
            } else {
                println!("{}", reading.format(*percent));
            }
        }
        Commands::Set { value } => {
            // Range errors are reported before the HID library is touched.
            let target = value.resolve()?;
            debug!(requested = %value, brightness = target.get(), "Brightness request validated");
            let backend = open_backend()?;
            command::set(&backend, *value)
                .with_context(|| format!("failed to set brightness to {value}"))?;
        }
        Commands::List { json } => {
            let backend = open_backend()?;
            let probes = device::survey(&backend)?;
            if *json {
                let rows: Vec<serde_json::Value> = probes
                    .iter()
                    .map(|p| {
                        serde_json::json!({
                            "path": p.info.display_path(),
                            "interface": p.info.interface_number,
                            "serial": p.info.serial,
                            "brightness_control": p.status == ProbeStatus::BrightnessControl,
                            "available": p.status != ProbeStatus::Unavailable,
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else if probes.is_empty() {
                println!("No Apple Pro Display XDR found.");
            } else {
                for p in &probes {
                    let status = match p.status {
                        ProbeStatus::BrightnessControl => "brightness control",
                        ProbeStatus::Other => "other",
                        ProbeStatus::Unavailable => "could not be opened",
                    };
                    println!(
                        "{} (interface {}, serial {}): {status}",
                        p.info.display_path(),
                        p.info.interface_number,
                        p.info.serial.as_deref().unwrap_or("unknown"),
                    );
                }
            }
        }
    }

    Ok(())
}

/// Exit status for a failed run: the core result code when there is one.
fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<Error>()
        .map(ResultCode::from)
        .unwrap_or(ResultCode::Transport)
        .as_u8()
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(ResultCode::InvalidInput.as_u8())
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(exit_code(&e))
        }
    }
}
