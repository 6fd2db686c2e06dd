use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use route_flythrough::directions::{DirectionsClient, DirectionsConfig, DEFAULT_MAPS_API_URL};
use route_flythrough::flythrough::{frames, save_frames, write_frame_urls};
use route_flythrough::streetview::{StreetViewClient, StreetViewConfig};
use route_flythrough::traits::DirectionsProvider;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Max distance allowed between points before linear interpolation kicks in.
const MAX_DISTANCE: f64 = 0.00025;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "List or download street view frames along the driving route between two addresses"
)]
struct Args {
    /// Starting address
    start: String,

    /// Destination address
    end: String,

    /// Maximum spacing between frames in degrees; 0 disables interpolation
    #[arg(long, default_value_t = MAX_DISTANCE)]
    max_distance: f64,

    /// Download frames into this directory instead of printing their URLs
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Frame size as WIDTHxHEIGHT
    #[arg(long, default_value = "600x300")]
    size: String,

    /// Concurrent frame downloads
    #[arg(long, default_value_t = 4)]
    jobs: usize,

    /// Maps API key
    #[arg(long, env = "GOOGLE_MAPS_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[arg(long, default_value = DEFAULT_MAPS_API_URL)]
    directions_url: String,

    #[arg(long, default_value = DEFAULT_MAPS_API_URL)]
    streetview_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let directions = DirectionsClient::new(DirectionsConfig {
        base_url: args.directions_url,
        api_key: args.api_key.clone(),
        timeout_secs: args.timeout,
    })?;
    let streetview = StreetViewClient::new(StreetViewConfig {
        base_url: args.streetview_url,
        size: args.size,
        api_key: args.api_key,
        timeout_secs: args.timeout,
    })?;

    let route = directions
        .route_between(&args.start, &args.end)
        .map_err(|err| format!("Error fetching directions: {err}"))?;

    match args.output_dir {
        Some(dir) => {
            save_frames(frames(&route, args.max_distance), &streetview, &dir, args.jobs)?;
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            let count = write_frame_urls(frames(&route, args.max_distance), &streetview, &mut out)?;
            out.flush()?;
            tracing::info!(frames = count, "listed frames");
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();
    tracing::info!("routing {:?} -> {:?}", args.start, args.end);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
