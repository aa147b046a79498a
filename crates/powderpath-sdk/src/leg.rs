//! Leg router HTTP client.
//!
//! One request per pair of consecutive stops. Every non-cancelled failure is
//! absorbed into a straight-line fallback so the caller can keep rendering.

use std::time::Duration;

use powderpath_core::{LatLng, Leg, Segment};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cancel::CancelToken;
use crate::geometry::geometry_lines;

/// Why a leg was replaced by a straight line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// Router answered with a non-success status
    Status(u16),
    /// Request or body read failed
    Transport(String),
    /// Body was not a usable route payload
    Malformed,
    /// Route decoded but produced no points
    EmptyRoute,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LegOutcome {
    Routed(Leg),
    Fallback { leg: Leg, reason: FallbackReason },
    /// Superseded; nothing should be merged or drawn.
    Cancelled,
}

impl LegOutcome {
    fn fallback(start: LatLng, end: LatLng, reason: FallbackReason) -> Self {
        Self::Fallback {
            leg: Leg::with_fallback(start, end),
            reason,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// The leg to merge. A cancelled outcome yields an empty leg.
    pub fn into_leg(self) -> Leg {
        match self {
            Self::Routed(leg) | Self::Fallback { leg, .. } => leg,
            Self::Cancelled => Leg::default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct LegRequest<'a> {
    start: [f64; 2],
    end: [f64; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    allowed: Option<&'a [String]>,
}

/// Leg router payload, either direct or wrapped once in a `body` string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LegPayload {
    Direct(RouteBody),
    Enveloped { body: String },
}

#[derive(Debug, Deserialize)]
struct RouteBody {
    route: Vec<Value>,
    #[serde(default)]
    snapped_start: Option<[f64; 2]>,
    #[serde(default)]
    snapped_end: Option<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
struct RouteEntry {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    geometry: Option<geojson::Geometry>,
}

fn snapped(pair: Option<[f64; 2]>) -> Option<LatLng> {
    pair.map(|[lat, lon]| LatLng::new(lat, lon))
        .filter(LatLng::is_finite)
}

impl LegPayload {
    /// Resolve to a route body, unwrapping at most one envelope.
    fn into_body(self) -> Option<RouteBody> {
        match self {
            Self::Direct(body) => Some(body),
            Self::Enveloped { body } => serde_json::from_str::<RouteBody>(&body).ok(),
        }
    }
}

impl RouteBody {
    fn into_leg(self) -> Leg {
        let mut leg = Leg {
            snapped_start: snapped(self.snapped_start),
            snapped_end: snapped(self.snapped_end),
            ..Leg::default()
        };

        for raw in self.route {
            let entry = match serde_json::from_value::<RouteEntry>(raw) {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!("Skipping malformed route entry: {}", err);
                    continue;
                }
            };
            let Some(geometry) = entry.geometry else {
                continue;
            };
            let lines = geometry_lines(geometry.value);
            for path in lines.into_iter().filter(|path| !path.is_empty()) {
                leg.path.extend_from_slice(&path);
                leg.segments.push(Segment {
                    name: entry.name.clone(),
                    difficulty: entry.difficulty.clone(),
                    path,
                });
            }
        }
        leg
    }
}

/// HTTP client for the piste/lift leg router.
pub struct LegClient {
    client: Client,
    url: String,
    allowed_difficulties: Option<Vec<String>>,
}

impl LegClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, url))
    }

    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            allowed_difficulties: None,
        }
    }

    /// Restrict routing to the given difficulties. An empty list clears the
    /// restriction.
    pub fn with_allowed_difficulties(mut self, allowed: Option<Vec<String>>) -> Self {
        self.allowed_difficulties = allowed.filter(|list| !list.is_empty());
        self
    }

    /// Route one leg. Never fails: errors become a fallback, cancellation
    /// becomes `LegOutcome::Cancelled`.
    pub async fn fetch_leg(&self, start: LatLng, end: LatLng, cancel: &CancelToken) -> LegOutcome {
        if cancel.is_cancelled() {
            return LegOutcome::Cancelled;
        }
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!("Leg request cancelled");
                LegOutcome::Cancelled
            }
            outcome = self.request_leg(start, end) => outcome,
        }
    }

    async fn request_leg(&self, start: LatLng, end: LatLng) -> LegOutcome {
        let request = LegRequest {
            start: start.to_pair(),
            end: end.to_pair(),
            allowed: self.allowed_difficulties.as_deref(),
        };

        let response = match self.client.post(&self.url).json(&request).send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!("Leg request to {} failed: {}", self.url, err);
                return LegOutcome::fallback(start, end, FallbackReason::Transport(err.to_string()));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), body = %body, "Leg router returned an error");
            return LegOutcome::fallback(start, end, FallbackReason::Status(status.as_u16()));
        }

        let text = match response.text().await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!("Failed to read leg response body: {}", err);
                return LegOutcome::fallback(start, end, FallbackReason::Transport(err.to_string()));
            }
        };

        let body = serde_json::from_str::<LegPayload>(&text)
            .ok()
            .and_then(LegPayload::into_body);
        let Some(body) = body else {
            tracing::warn!("Leg router returned an unusable payload");
            return LegOutcome::fallback(start, end, FallbackReason::Malformed);
        };

        let leg = body.into_leg();
        if leg.path.is_empty() {
            tracing::warn!("Leg router returned an empty route");
            return LegOutcome::fallback(start, end, FallbackReason::EmptyRoute);
        }

        tracing::debug!(
            points = leg.path.len(),
            segments = leg.segments.len(),
            "Leg routed"
        );
        LegOutcome::Routed(leg)
    }
}
