//! Plan a ski route through a list of stops.
//!
//! Usage:
//!   cargo run -p powderpath-cli --bin powderpath-plan -- \
//!     --stop 45.30,6.58,Saulire --stop 45.29,6.59,Courchevel

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use powderpath_cli::{parse_stop, render_itinerary, StopArg};
use powderpath_core::{Route, SavedRoute};
use powderpath_sdk::config::parse_difficulty_list;
use powderpath_sdk::{PlanOutcome, PlannerConfig, RoutePlanner};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about = "Plan a multi-leg ski route", long_about = None)]
struct Args {
    /// Stop as LAT,LNG[,NAME]; repeat in route order
    #[arg(long = "stop", value_parser = parse_stop)]
    stops: Vec<StopArg>,

    /// Saved route JSON file ({start, end, route_name?})
    #[arg(long, conflicts_with = "stops")]
    saved: Option<PathBuf>,

    /// Allowed piste difficulty; repeat or comma-separate
    #[arg(long = "allow")]
    allow: Vec<String>,

    /// Leg router URL (overrides POWDERPATH_LEG_URL)
    #[arg(long)]
    leg_url: Option<String>,

    /// Walking router URL (overrides POWDERPATH_WALK_URL)
    #[arg(long)]
    walk_url: Option<String>,

    /// Minimum gap in meters before a connector is drawn
    #[arg(long)]
    connector_min_m: Option<f64>,

    /// Emit the plan and logs as JSON
    #[arg(long)]
    json: bool,
}

fn init_tracing(json: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("powderpath=info".parse()?);
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
    Ok(())
}

fn build_route(args: &Args) -> Result<Route> {
    if let Some(path) = &args.saved {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let saved: SavedRoute = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid saved route in {}", path.display()))?;
        tracing::info!("Planning saved route {}", saved.display_name());
        return Ok(Route::from_saved(&saved));
    }

    if args.stops.len() < 2 {
        bail!("At least two --stop values are required");
    }
    let mut route = Route::new();
    for _ in 2..args.stops.len() {
        route.add_stop_before_destination();
    }
    for (idx, stop) in args.stops.iter().enumerate() {
        route.set_place_at(idx, stop.point, stop.name.clone());
    }
    Ok(route)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.json)?;

    let mut config = PlannerConfig::from_env();
    if let Some(url) = &args.leg_url {
        config.leg_url = url.clone();
    }
    if let Some(url) = &args.walk_url {
        config.walk_url = url.clone();
    }
    if let Some(min) = args.connector_min_m {
        config.connector_min_m = min.max(0.0);
    }
    let allowed: Vec<String> = args
        .allow
        .iter()
        .flat_map(|raw| parse_difficulty_list(raw))
        .collect();
    if !allowed.is_empty() {
        config.allowed_difficulties = Some(allowed);
    }

    let route = build_route(&args)?;
    let planner = RoutePlanner::new(&config).context("Failed to create HTTP clients")?;

    tracing::info!("Routing {} stops via {}", route.filled_points().len(), config.leg_url);
    match planner.plan_route(&route).await {
        PlanOutcome::Planned(plan) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                print!("{}", render_itinerary(&plan.itinerary));
            }
        }
        PlanOutcome::Cleared => bail!("Route needs at least two filled stops"),
        PlanOutcome::Cancelled => tracing::warn!("Route computation was cancelled"),
    }
    Ok(())
}
