//! Command-line driver for a tripboard database.
//!
//! # Responsibility
//! - Resolve configuration (environment, then flags) and start logging.
//! - Load the user's trips, run one subcommand, and save when it changed state.

mod opts;

use clap::Parser;
use log::info;
use opts::{Command, Opts};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::process::ExitCode;
use tripboard_core::db::open_db;
use tripboard_core::export::outline::{export_file_name, render_outline};
use tripboard_core::{
    ingest_itinerary, init_logging, parse_proposal, AppConfig, MutationOutcome,
    SqliteTripDocumentRepository, TripCommand, TripId, TripStore,
    TripSync,
};

#[derive(Debug)]
enum CliError {
    TripNotFound(TripId),
    InvalidCommand(serde_json::Error),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TripNotFound(id) => write!(f, "trip not found: {id}"),
            Self::InvalidCommand(err) => write!(f, "invalid command JSON: {err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::TripNotFound(_) => None,
            Self::InvalidCommand(err) => Some(err),
        }
    }
}

fn main() -> ExitCode {
    let opts = Opts::parse();
    match run(opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(opts: Opts) -> Result<(), Box<dyn Error>> {
    let config = resolve_config(&opts)?;
    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir)?;
    }

    let conn = open_db(&config.db_path)?;
    let mut sync = TripSync::new(SqliteTripDocumentRepository::new(&conn));
    let mut store = TripStore::new();
    sync.on_auth_changed(Some(opts.user.clone()), &mut store)?;

    let changed = run_command(opts.command, &mut store)?;
    if changed {
        sync.save_now(&store)?;
        info!("event=cli_save module=cli status=ok trips={}", store.len());
    }
    Ok(())
}

fn resolve_config(opts: &Opts) -> Result<AppConfig, Box<dyn Error>> {
    let mut config = AppConfig::from_env()?;
    if let Some(db) = &opts.db {
        config.db_path = db.clone();
    }
    if let Some(level) = &opts.log_level {
        config.log_level = level.clone();
    }
    if let Some(log_dir) = &opts.log_dir {
        config.log_dir = Some(log_dir.clone());
    }
    Ok(config)
}

/// Runs one subcommand; returns whether the trip list changed.
fn run_command(command: Command, store: &mut TripStore) -> Result<bool, Box<dyn Error>> {
    match command {
        Command::Show { trip: None } => {
            for trip in store.trips() {
                println!(
                    "{}\t{}\titems={}\tdays={}",
                    trip.id,
                    trip.name,
                    trip.item_count(),
                    trip.days.len()
                );
            }
            Ok(false)
        }
        Command::Show {
            trip: Some(trip_id),
        } => {
            let trip = store.trip(trip_id).ok_or(CliError::TripNotFound(trip_id))?;
            println!("{}", serde_json::to_string_pretty(trip)?);
            Ok(false)
        }
        Command::NewTrip { name } => {
            let trip_id = store.add_trip();
            if let Some(name) = name {
                store.rename_trip(trip_id, name);
            }
            println!("{trip_id}");
            Ok(true)
        }
        Command::Apply { command } => {
            let command: TripCommand =
                serde_json::from_str(&command).map_err(CliError::InvalidCommand)?;
            let outcome = store.apply(&command);
            match outcome {
                MutationOutcome::Applied => println!("applied"),
                MutationOutcome::Created(id) => println!("created {id}"),
                MutationOutcome::NoOp(reason) => println!("noop {reason}"),
            }
            Ok(outcome.is_applied())
        }
        Command::Itinerary { trip, file } => {
            let json = std::fs::read_to_string(&file)?;
            let days = parse_proposal(&json)?;
            let added = ingest_itinerary(store, trip, days)?;
            println!("added {added} day(s)");
            Ok(true)
        }
        Command::Export { trip, out } => {
            let trip = store.trip(trip).ok_or(CliError::TripNotFound(trip))?;
            let outline = render_outline(trip);
            match out {
                Some(dir) => {
                    let path = dir.join(export_file_name(trip));
                    std::fs::write(&path, outline)?;
                    println!("{}", path.display());
                }
                None => print!("{outline}"),
            }
            Ok(false)
        }
    }
}
