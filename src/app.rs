//! Core application runner for `salter-listener`.
//!
//! Decoupled from CLI parsing, logging setup and process exit codes so it
//! can be driven by a fake scanner in tests.

use crate::advertisement::Advertisement;
use crate::measurement::Measurement;
use crate::observer::Observer;
use crate::output::OutputFormatter;
use crate::output::influxdb::InfluxDbFormatter;
use crate::scanner::ScanError;
use crate::sensor::TemperatureSensor;
use crate::setup::{SetupError, SetupFlow, UserInput};
use crate::subscription::Subscription;
use clap::{Parser, Subcommand};
use std::future::Future;
use std::io;
use std::io::Write;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;

/// Passive BLE listener for Salter kitchen thermometers.
#[derive(Parser, Debug, Clone)]
#[command(author, about, version)]
pub struct Options {
    #[command(subcommand)]
    pub command: Command,

    /// Bluetooth adapter to scan with, e.g. hci1. Defaults to the system default.
    #[arg(long, global = true)]
    pub adapter: Option<String>,

    /// Verbose output: log rejected advertisements and decode details
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print each newly seen Salter thermometer as `ADDRESS<TAB>NAME`.
    Discover,
    /// Print temperature readings from one thermometer in InfluxDB line protocol.
    Listen {
        /// Address of the thermometer, e.g. AA:BB:CC:DD:EE:FF
        #[arg(long)]
        address: String,

        /// Display name used in the `name` tag
        #[arg(long)]
        name: Option<String>,

        /// The name of the measurement in InfluxDB line protocol.
        #[arg(long, default_value = "salter_temperature")]
        influxdb_measurement: String,
    },
}

/// Errors returned by the core run loop.
#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Setup(#[from] SetupError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Scanner abstraction to enable deterministic unit tests without Bluetooth hardware.
pub trait Scanner: Send + Sync {
    fn start_scan(
        &self,
        adapter: Option<String>,
    ) -> Pin<Box<dyn Future<Output = Result<mpsc::Receiver<Advertisement>, ScanError>> + Send + '_>>;
}

/// Real scanner implementation that delegates to the compiled-in backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealScanner;

impl Scanner for RealScanner {
    fn start_scan(
        &self,
        adapter: Option<String>,
    ) -> Pin<Box<dyn Future<Output = Result<mpsc::Receiver<Advertisement>, ScanError>> + Send + '_>>
    {
        Box::pin(async move { crate::scanner::start_scan(adapter).await })
    }
}

fn write_measurement(
    formatter: &dyn OutputFormatter,
    measurement: &Measurement,
    out: &mut dyn Write,
) -> io::Result<()> {
    let line = formatter.format(measurement);
    writeln!(out, "{line}")
}

/// Run the selected command until the scanner stops, writing results to `out`.
pub async fn run_with_io(
    options: Options,
    scanner: &dyn Scanner,
    observer: Arc<dyn Observer>,
    out: &mut dyn Write,
) -> Result<(), RunError> {
    let mut flow = SetupFlow::new(observer.clone());

    match options.command {
        Command::Discover => {
            let mut advertisements = scanner.start_scan(options.adapter).await?;
            discover(&mut flow, &mut advertisements, out).await
        }
        Command::Listen {
            address,
            name,
            influxdb_measurement,
        } => {
            let config = flow.user(UserInput { address, name })?;
            let sensor = TemperatureSensor::new(config, observer);
            let formatter = InfluxDbFormatter::new(influxdb_measurement);
            let advertisements = scanner.start_scan(options.adapter).await?;
            listen(sensor, advertisements, &formatter, out).await
        }
    }
}

async fn discover(
    flow: &mut SetupFlow,
    advertisements: &mut mpsc::Receiver<Advertisement>,
    out: &mut dyn Write,
) -> Result<(), RunError> {
    while let Some(advertisement) = advertisements.recv().await {
        match flow.discovered(&advertisement) {
            Ok(config) => writeln!(out, "{}\t{}", config.identity, config.name)?,
            Err(SetupError::NotSupported(_) | SetupError::AlreadyConfigured(_)) => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

async fn listen(
    sensor: TemperatureSensor,
    advertisements: mpsc::Receiver<Advertisement>,
    formatter: &dyn OutputFormatter,
    out: &mut dyn Write,
) -> Result<(), RunError> {
    let (tx, mut readings) = mpsc::channel(crate::scanner::ADVERTISEMENT_CHANNEL_BUFFER_SIZE);
    let subscription = Subscription::register(sensor, advertisements, tx);

    while let Some(measurement) = readings.recv().await {
        write_measurement(formatter, &measurement, out)?;
    }

    subscription.finished().await;
    Ok(())
}
