#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{NaiveDate, NaiveDateTime};
use clap::{ArgAction, Parser, Subcommand, ValueHint};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use gw_monitor::app::GwMonitor;
use gw_monitor::data::parse_timestamp;
use gw_monitor::pipeline::{HourFilter, TimeWindow, export, window};
use gw_monitor::{DashboardConfig, GwError, Preset, Result, TimeSeriesStore, fetch};

#[derive(Parser, Debug)]
#[command(author, version, about = "Groundwater level monitoring dashboard", long_about = None)]
struct Cli {
    /// CSV source (path or http(s) URL); overrides the config
    #[arg(long, global = true, value_hint = ValueHint::AnyPath)]
    source: Option<String>,

    /// JSON config file (default: ./gw-monitor.json when present)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Built-in deployment to start from
    #[arg(long, global = true, value_enum)]
    preset: Option<Preset>,

    /// Debug logging
    #[arg(short, long, global = true, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List stations with their first and last reading
    Stations,
    /// Write CSV without opening the dashboard
    Export(ExportArgs),
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Destination file
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    output: PathBuf,

    /// Export one station; without it the whole table is written
    #[arg(long)]
    station: Option<String>,

    /// Keep only readings taken during this hour (0-23)
    #[arg(long, requires = "station")]
    hour: Option<u32>,

    /// Period start (date or timestamp; default: first reading)
    #[arg(long, requires = "station")]
    from: Option<String>,

    /// Period end (a plain date means the end of that day; default: last reading)
    #[arg(long, requires = "station")]
    to: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        None => run_dashboard(config),
        Some(Command::Stations) => list_stations(&config),
        Some(Command::Export(args)) => run_export(&config, args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

/// Preset or config file, then `--source` on top
fn resolve_config(cli: &Cli) -> Result<DashboardConfig> {
    let mut config = match (cli.preset, &cli.config) {
        (Some(preset), None) => preset.config(),
        (_, path) => DashboardConfig::load_or_default(path.as_deref())?,
    };
    if cli.preset.is_some() && cli.config.is_some() {
        warn!("both --preset and --config given; using the config file");
    }
    if let Some(source) = &cli.source {
        config.source = source.clone();
    }
    config.check_source()?;
    Ok(config)
}

fn run_dashboard(config: DashboardConfig) -> Result<()> {
    #[cfg(feature = "profile-with-puffin")]
    let _puffin_server = {
        puffin::set_scopes_on(true);
        match puffin_http::Server::new("127.0.0.1:8585") {
            Ok(server) => {
                tracing::info!("puffin server on 127.0.0.1:8585");
                Some(server)
            }
            Err(e) => {
                warn!("puffin server not started: {e}");
                None
            }
        }
    };

    let title = config.title.clone();
    let options = eframe::NativeOptions::default();
    let outcome = eframe::run_native(
        &title,
        options,
        Box::new(|_| Ok(Box::new(GwMonitor::new(config)))),
    );
    if let Err(e) = outcome {
        error!("dashboard exited with an error: {e}");
        return Err(GwError::Config(format!("could not start the window: {e}")));
    }
    Ok(())
}

fn load(config: &DashboardConfig) -> Result<TimeSeriesStore> {
    let store = fetch::load_source(&config.source, config.fetch_timeout())?;
    if store.is_empty() {
        return Err(GwError::EmptyStore);
    }
    Ok(store)
}

fn list_stations(config: &DashboardConfig) -> Result<()> {
    let store = load(config)?;
    for (station, coverage) in store.coverages() {
        match coverage {
            Some(c) => println!(
                "{}\t{}\t{}\t{}",
                station,
                c.first.format("%Y-%m-%d %H:%M"),
                c.last.format("%Y-%m-%d %H:%M"),
                c.count
            ),
            None => println!("{}\t-\t-\t0", station),
        }
    }
    Ok(())
}

fn run_export(config: &DashboardConfig, args: ExportArgs) -> Result<()> {
    let store = load(config)?;

    let csv = match &args.station {
        None => export::encode_store(&store)?,
        Some(station) => {
            let (min, max) = store.extent()?;
            let start = match &args.from {
                Some(raw) => parse_timestamp(raw)?,
                None => min,
            };
            let end = match &args.to {
                Some(raw) => parse_period_end(raw)?,
                None => max,
            };
            let hour_filter = match args.hour {
                Some(hour) => HourFilter::hour(hour)?,
                None => HourFilter::All,
            };

            let period = TimeWindow::new(start, end, hour_filter);
            let series = window::filter(&store, station, &period)?;
            if series.is_inverted() {
                return Err(GwError::InvalidWindow { start, end });
            }
            if series.is_empty() {
                warn!(station = %station, "no readings in {}", period.label());
            }
            export::encode_series(&series, store.time_column())?
        }
    };

    export::save_csv(&args.output, &csv)
}

/// Inclusive period end: a bare date covers the whole day
fn parse_period_end(raw: &str) -> Result<NaiveDateTime> {
    if let Ok(date) = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        if let Some(end) = date.and_hms_opt(23, 59, 59) {
            return Ok(end);
        }
    }
    parse_timestamp(raw)
}
