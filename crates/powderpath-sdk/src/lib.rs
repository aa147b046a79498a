//! PowderPath SDK - route assembly against remote routing services
//!
//! Fetches legs between consecutive stops, resolves walking connectors around
//! snapped endpoints and turns the result into an ordered itinerary.

pub mod cancel;
pub mod config;
mod geometry;
pub mod leg;
pub mod multi_leg;
pub mod photos;
pub mod planner;
pub mod pool;
pub mod walking;

pub use cancel::{CancelToken, Cancelled};
pub use config::PlannerConfig;
pub use leg::{FallbackReason, LegClient, LegOutcome};
pub use multi_leg::{fetch_multi_leg, MultiLeg};
pub use photos::{enrich_recent_with_photos, PlaceLookup};
pub use planner::{Plan, PlanOutcome, RoutePlanner};
pub use pool::run_bounded;
pub use walking::{resolve_walking, WalkingClient, WalkingResolution};
