//! detour - build a list of favourite places and stop at one on the way
//!
//! Usage:
//!   detour aggregate <folder> --output <csv> [--pattern <regex>]
//!   detour favorites --output <csv>
//!   detour map <csv> [--output-dir <dir>] [--top <n>]
//!   detour directions <csv> [--origin <addr>] [--destination <addr>]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::error;
use tracing_subscriber::EnvFilter;

use detour_planner::error::Error;
use detour_planner::favorites::{StdinInput, collect_favorites};
use detour_planner::google::{GoogleMapsClient, GoogleMapsConfig, TravelMode};
use detour_planner::history::aggregate_exports;
use detour_planner::links::directions_link;
use detour_planner::map::build_marker_map;
use detour_planner::places::{read_places, write_places};
use detour_planner::selector::{SelectOptions, select_waypoint};
use detour_planner::traits::InputSource;

#[derive(Parser)]
#[command(name = "detour")]
#[command(about = "Suggest a favourite place to stop at on the way", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Google Maps API key
    #[arg(long, env = "GOOGLE_MAPS_API_KEY", global = true, hide_env_values = true)]
    api_key: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value = "10", global = true)]
    timeout: u64,

    /// Travel mode used for route durations and links
    #[arg(long, value_enum, default_value = "walking", global = true)]
    mode: Mode,

    /// Enable verbose debug output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Count visited places in location-history exports
    Aggregate {
        /// Folder containing JSON exports
        folder: PathBuf,

        /// Output CSV file
        #[arg(short, long)]
        output: PathBuf,

        /// Only keep addresses matching this regular expression
        #[arg(short, long)]
        pattern: Option<String>,
    },

    /// Enter favourite places interactively
    Favorites {
        /// Output CSV file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Render the top places as a marker map
    Map {
        /// Places CSV file
        places: PathBuf,

        /// Directory for the generated HTML page
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Number of places to show
        #[arg(short, long, default_value = "16")]
        top: usize,
    },

    /// Suggest a waypoint between origin and destination
    Directions {
        /// Places CSV file
        places: PathBuf,

        #[arg(long)]
        origin: Option<String>,

        #[arg(long)]
        destination: Option<String>,

        /// Number of top places considered
        #[arg(long, default_value = "20")]
        max_candidates: usize,

        /// Largest acceptable detour in seconds
        #[arg(long, default_value = "120")]
        max_detour: u32,

        /// Look up candidate distances concurrently
        #[arg(long)]
        parallel: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Driving,
    Walking,
    Bicycling,
    Transit,
}

impl From<Mode> for TravelMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Driving => TravelMode::Driving,
            Mode::Walking => TravelMode::Walking,
            Mode::Bicycling => TravelMode::Bicycling,
            Mode::Transit => TravelMode::Transit,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let mode = TravelMode::from(cli.mode);
    let config = GoogleMapsConfig::new(cli.api_key.clone().unwrap_or_default())
        .with_travel_mode(mode)
        .with_timeout_secs(cli.timeout);

    match cli.command {
        Commands::Aggregate {
            folder,
            output,
            pattern,
        } => {
            let places = aggregate_exports(&folder, pattern.as_deref())?;
            write_places(&output, &places)?;
            println!("Wrote {} places to {}", places.len(), output.display());
        }
        Commands::Favorites { output } => {
            let client = GoogleMapsClient::new(config)?;
            let favorites = collect_favorites(&mut StdinInput, &client);
            write_places(&output, &favorites)?;
            println!("Wrote {} favorites to {}", favorites.len(), output.display());
        }
        Commands::Map {
            places,
            output_dir,
            top,
        } => {
            let client = GoogleMapsClient::new(config)?;
            let places = read_places(&places)?;
            match build_marker_map(&client, places.as_slice(), top) {
                Some(map) => {
                    let path = map_path(&output_dir, top);
                    map.save(&path)?;
                    println!("Saved map to {}", path.display());
                }
                None => println!("None of the places could be located; no map written."),
            }
        }
        Commands::Directions {
            places,
            origin,
            destination,
            max_candidates,
            max_detour,
            parallel,
        } => {
            let client = GoogleMapsClient::new(config)?;
            let places = read_places(&places)?;

            let mut input = StdinInput;
            let Some(origin) = origin.or_else(|| input.prompt("Enter your origin: ")) else {
                return Ok(());
            };
            let Some(destination) =
                destination.or_else(|| input.prompt("Enter the destination: "))
            else {
                return Ok(());
            };

            let options = SelectOptions {
                max_candidates,
                max_detour_seconds: max_detour,
                parallel_lookups: parallel,
            };
            match select_waypoint(&client, &origin, &destination, &places, &options) {
                Some(selection) => {
                    let place = selection.place;
                    println!(
                        "Go to {}, and then follow the instructions:\n {}",
                        place.label(),
                        directions_link(&place.address, &destination, mode)
                    );
                }
                None => println!("{}", directions_link(&origin, &destination, mode)),
            }
        }
    }

    Ok(())
}

fn map_path(dir: &Path, top: usize) -> PathBuf {
    dir.join(format!("top_{top}_places.html"))
}
