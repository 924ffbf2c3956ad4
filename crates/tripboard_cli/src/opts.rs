use clap::{Parser, Subcommand};
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "tripboard")]
#[command(bin_name = "tripboard")]
#[command(version, about, long_about = None)]
pub(crate) struct Opts {
    #[command(subcommand)]
    pub(crate) command: Command,

    /// Trip database file (overrides TRIPBOARD_DB_PATH)
    #[arg(long, value_name = "DB_FILE")]
    pub(crate) db: Option<PathBuf>,

    /// Signed-in user whose trips are loaded and saved
    #[arg(long, env = "TRIPBOARD_USER")]
    pub(crate) user: String,

    /// Log level: trace|debug|info|warn|error (overrides TRIPBOARD_LOG_LEVEL)
    #[arg(long)]
    pub(crate) log_level: Option<String>,

    /// Absolute log directory; logging stays off without it (overrides TRIPBOARD_LOG_DIR)
    #[arg(long, value_name = "DIR")]
    pub(crate) log_dir: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// List trips, or print one trip as JSON
    Show {
        #[arg(long, value_name = "TRIP_ID")]
        trip: Option<Uuid>,
    },
    /// Create an empty trip and print its id
    NewTrip {
        #[arg(long)]
        name: Option<String>,
    },
    /// Apply one JSON-encoded command, e.g. '{"op":"add_day_section","tripId":"..."}'
    Apply {
        #[arg(value_name = "COMMAND_JSON")]
        command: String,
    },
    /// Append an itinerary proposal (JSON array of days) to a trip
    Itinerary {
        #[arg(long, value_name = "TRIP_ID")]
        trip: Uuid,

        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Print a trip as a text outline, or write it into a directory
    Export {
        #[arg(long, value_name = "TRIP_ID")]
        trip: Uuid,

        /// Directory to write `<trip name>.txt` into instead of stdout
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
}
