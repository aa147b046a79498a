//! Planning session: one live route computation at a time.

use std::sync::{Mutex, PoisonError};

use powderpath_core::{
    build_itinerary, Connector, Fallback, Itinerary, LatLng, RecentLocation, Route, SavedRoute, Segment,
};
use serde::Serialize;

use crate::cancel::{CancelToken, Cancelled};
use crate::config::PlannerConfig;
use crate::leg::LegClient;
use crate::multi_leg::fetch_multi_leg;
use crate::photos::{enrich_recent_with_photos, PlaceLookup};
use crate::walking::{resolve_walking, WalkingClient};

/// Everything a renderer needs for one computed route.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Plan {
    pub path: Vec<LatLng>,
    pub segments: Vec<Segment>,
    pub fallbacks: Vec<Fallback>,
    pub walk_paths: Vec<Vec<LatLng>>,
    pub connectors: Vec<Connector>,
    pub itinerary: Itinerary,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    Planned(Plan),
    /// Fewer than two filled stops: clear the map.
    Cleared,
    /// Superseded by a newer computation: leave the map untouched.
    Cancelled,
}

pub struct RoutePlanner {
    legs: LegClient,
    walking: WalkingClient,
    connector_min_m: f64,
    max_concurrency: usize,
    current: Mutex<Option<CancelToken>>,
}

impl RoutePlanner {
    pub fn new(config: &PlannerConfig) -> reqwest::Result<Self> {
        let legs = LegClient::new(&config.leg_url, config.request_timeout)?
            .with_allowed_difficulties(config.allowed_difficulties.clone());
        let walking = WalkingClient::new(&config.walk_url, &config.walk_api_key, config.request_timeout)?;
        Ok(Self::from_clients(legs, walking, config.connector_min_m)
            .with_max_concurrency(config.max_concurrency))
    }

    pub fn from_clients(legs: LegClient, walking: WalkingClient, connector_min_m: f64) -> Self {
        Self {
            legs,
            walking,
            connector_min_m,
            max_concurrency: PlannerConfig::default().max_concurrency,
            current: Mutex::new(None),
        }
    }

    /// Worker count for background lookups; at least one.
    pub fn with_max_concurrency(mut self, workers: usize) -> Self {
        self.max_concurrency = workers.max(1);
        self
    }

    /// Attach photos to recent locations using the configured worker count.
    pub async fn enrich_recent<L: PlaceLookup>(
        &self,
        items: Vec<RecentLocation>,
        places: &L,
        cancel: &CancelToken,
    ) -> Result<Vec<RecentLocation>, Cancelled> {
        enrich_recent_with_photos(items, places, self.max_concurrency, cancel).await
    }

    /// Start a new computation, cancelling the one in flight.
    pub fn begin(&self) -> CancelToken {
        let token = CancelToken::new();
        let previous = self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(token.clone());
        if let Some(previous) = previous {
            tracing::debug!("Superseding in-flight route computation");
            previous.cancel();
        }
        token
    }

    pub fn cancel_current(&self) {
        let current = self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(token) = current {
            token.cancel();
        }
    }

    /// Compute a route through `stops`, superseding any earlier call.
    pub async fn plan(&self, stops: &[LatLng]) -> PlanOutcome {
        let token = self.begin();
        self.plan_with(stops, &token).await
    }

    pub async fn plan_route(&self, route: &Route) -> PlanOutcome {
        self.plan(&route.filled_points()).await
    }

    pub async fn plan_saved(&self, saved: &SavedRoute) -> PlanOutcome {
        self.plan_route(&Route::from_saved(saved)).await
    }

    /// Compute under an explicit token. Nothing is produced once the token
    /// is cancelled.
    pub async fn plan_with(&self, stops: &[LatLng], cancel: &CancelToken) -> PlanOutcome {
        if stops.len() < 2 {
            return PlanOutcome::Cleared;
        }
        match self.compute(stops, cancel).await {
            Ok(plan) => PlanOutcome::Planned(plan),
            Err(Cancelled) => {
                tracing::debug!("Route computation dropped after cancellation");
                PlanOutcome::Cancelled
            }
        }
    }

    async fn compute(&self, stops: &[LatLng], cancel: &CancelToken) -> Result<Plan, Cancelled> {
        let multi = fetch_multi_leg(&self.legs, stops, cancel).await?;
        let walking = resolve_walking(&self.walking, &multi.walking, cancel, self.connector_min_m).await?;
        cancel.check()?;

        let itinerary = build_itinerary(&multi.segments, &multi.fallbacks, &walking.paths, &multi.path);
        tracing::info!(
            steps = itinerary.steps.len(),
            total_m = itinerary.summary.total_m,
            "Route planned"
        );

        Ok(Plan {
            path: multi.path,
            segments: multi.segments,
            fallbacks: multi.fallbacks,
            walk_paths: walking.paths,
            connectors: walking.connectors,
            itinerary,
        })
    }
}
