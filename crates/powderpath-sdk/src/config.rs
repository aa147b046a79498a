//! Planner configuration from environment.

use std::env;
use std::time::Duration;

pub const DEFAULT_LEG_URL: &str = "http://localhost:8080/route";
pub const DEFAULT_WALK_URL: &str = "https://routes.googleapis.com/directions/v2:computeRoutes";

#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Leg routing endpoint (piste/lift network)
    pub leg_url: String,
    /// Pedestrian routing endpoint
    pub walk_url: String,
    pub walk_api_key: String,
    pub request_timeout: Duration,
    /// Worker count for bounded lookups
    pub max_concurrency: usize,
    /// Gap in meters below which no connector is drawn
    pub connector_min_m: f64,
    /// Difficulties forwarded to the leg router; `None` allows everything
    pub allowed_difficulties: Option<Vec<String>>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            leg_url: DEFAULT_LEG_URL.to_string(),
            walk_url: DEFAULT_WALK_URL.to_string(),
            walk_api_key: String::new(),
            request_timeout: Duration::from_secs(15),
            max_concurrency: 4,
            connector_min_m: 0.0,
            allowed_difficulties: None,
        }
    }
}

impl PlannerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            leg_url: env::var("POWDERPATH_LEG_URL").unwrap_or(defaults.leg_url),
            walk_url: env::var("POWDERPATH_WALK_URL").unwrap_or(defaults.walk_url),
            walk_api_key: env::var("POWDERPATH_WALK_API_KEY").unwrap_or_default(),
            request_timeout: env::var("POWDERPATH_REQUEST_TIMEOUT_S")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            max_concurrency: env::var("POWDERPATH_MAX_CONCURRENCY")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|n: &usize| *n > 0)
                .unwrap_or(defaults.max_concurrency),
            connector_min_m: env::var("POWDERPATH_CONNECTOR_MIN_M")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|m: &f64| m.is_finite() && *m >= 0.0)
                .unwrap_or(defaults.connector_min_m),
            allowed_difficulties: env::var("POWDERPATH_ALLOWED_DIFFICULTIES")
                .ok()
                .map(|raw| parse_difficulty_list(&raw))
                .filter(|list| !list.is_empty()),
        }
    }
}

/// Split a comma-separated difficulty list, dropping blanks.
pub fn parse_difficulty_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|value| value.trim().to_lowercase())
        .filter(|value| !value.is_empty())
        .collect()
}
