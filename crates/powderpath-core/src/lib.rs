pub mod chrono_order;
pub mod compact;
pub mod connectors;
pub mod geo;
pub mod itinerary;
pub mod models;
pub mod names;
pub mod polyline;
pub mod route;

pub use chrono_order::{compute_sort_key, order_steps, UNMATCHED_SORT_KEY};
pub use compact::{compact_segments, compact_walks};
pub use connectors::{walking_connectors, Connector};
pub use geo::{haversine_distance, nearest_vertex_index, path_length_m};
pub use itinerary::{build_itinerary, format_km, Itinerary, ItinerarySummary};
pub use models::{
    Fallback, ItineraryStep, LatLng, Leg, NamedPoint, RecentLocation, SavedRoute, Segment,
    SnapHint, StepKind, WalkRequest,
};
pub use names::normalize_name_key;
pub use polyline::{decode_polyline, PolylineError};
pub use route::{Route, Stop, StopRole};
