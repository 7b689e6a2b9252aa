use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use routemap_cli::commands::distance::handle_distance;
use routemap_cli::commands::render::{handle_render, parse_size, RenderCommandArgs};
use routemap_cli::commands::validate::handle_validate;
use routemap_cli::commands::ServiceArgs;
use routemap_cli::output::OutputFormat;
use routemap_lib::{Location, TravelMode};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Resolve travel paths between points and compose static map requests"
)]
struct Cli {
    /// Directions service key (defaults to ROUTEMAP_DIRECTIONS_KEY).
    #[arg(long, global = true)]
    directions_key: Option<String>,

    /// Static map service key (defaults to ROUTEMAP_STATIC_MAP_KEY).
    #[arg(long, global = true)]
    static_map_key: Option<String>,

    /// Travel mode: driving, walking, bicycling or transit.
    #[arg(long, global = true, default_value = "walking")]
    mode: TravelMode,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Install keys without probing both services first.
    #[arg(long, global = true)]
    skip_validation: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve paths between the points in a file and print the map request.
    Render {
        /// Point file: `width height` header, then `lng lat [label]` per line.
        #[arg(long)]
        input: PathBuf,
        /// Show the closed tour through the points in file order.
        #[arg(long)]
        tour: bool,
        /// Canvas size as WIDTHxHEIGHT, overriding the file header.
        #[arg(long, value_parser = parse_size)]
        size: Option<(u32, u32)>,
        /// Path color as 0xRRGGBB.
        #[arg(long)]
        path_color: Option<String>,
        /// Marker color as 0xRRGGBB.
        #[arg(long)]
        point_color: Option<String>,
        /// Fixed map center as lng,lat (used with --zoom).
        #[arg(long, allow_hyphen_values = true)]
        center: Option<Location>,
        /// Fixed zoom level, 0 to 21.
        #[arg(long)]
        zoom: Option<u8>,
        /// Leave point markers off the map.
        #[arg(long)]
        no_markers: bool,
    },
    /// Distance and travel time between two locations.
    Distance {
        /// Origin as lng,lat.
        #[arg(long = "from", allow_hyphen_values = true)]
        from: Location,
        /// Destination as lng,lat.
        #[arg(long = "to", allow_hyphen_values = true)]
        to: Location,
    },
    /// Check both keys against the live services.
    Validate,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let service = ServiceArgs {
        directions_key: cli.directions_key,
        static_map_key: cli.static_map_key,
        mode: cli.mode,
        skip_validation: cli.skip_validation,
    };

    match cli.command {
        Command::Render {
            input,
            tour,
            size,
            path_color,
            point_color,
            center,
            zoom,
            no_markers,
        } => {
            let args = RenderCommandArgs {
                input,
                tour,
                size,
                path_color,
                point_color,
                center,
                zoom,
                no_markers,
            };
            handle_render(&service, &args, cli.format)
        }
        Command::Distance { from, to } => handle_distance(&service, from, to, cli.format),
        Command::Validate => handle_validate(&service),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
