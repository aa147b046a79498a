//! Pedestrian routing around snapped leg endpoints.

use std::time::Duration;

use futures::future::join_all;
use powderpath_core::{decode_polyline, walking_connectors, Connector, LatLng, SnapHint, WalkRequest};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::cancel::{CancelToken, Cancelled};
use crate::geometry::geometry_lines;

const FIELD_MASK: &str = "routes.polyline,routes.legs.distanceMeters,routes.legs.duration,routes.warnings";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ComputeRoutesRequest {
    origin: Waypoint,
    destination: Waypoint,
    travel_mode: &'static str,
    polyline_encoding: &'static str,
}

#[derive(Debug, Serialize)]
struct Waypoint {
    location: Location,
}

#[derive(Debug, Serialize)]
struct Location {
    #[serde(rename = "latLng")]
    lat_lng: ApiLatLng,
}

#[derive(Debug, Serialize)]
struct ApiLatLng {
    latitude: f64,
    longitude: f64,
}

impl From<LatLng> for Waypoint {
    fn from(point: LatLng) -> Self {
        Self {
            location: Location {
                lat_lng: ApiLatLng {
                    latitude: point.lat,
                    longitude: point.lng,
                },
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ComputeRoutesResponse {
    #[serde(default)]
    routes: Vec<ApiRoute>,
}

#[derive(Debug, Deserialize)]
struct ApiRoute {
    #[serde(default)]
    polyline: Option<ApiPolyline>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiPolyline {
    #[serde(default)]
    encoded_polyline: Option<String>,
    #[serde(default)]
    geo_json_linestring: Option<geojson::Geometry>,
}

impl ApiPolyline {
    fn into_path(self) -> Vec<LatLng> {
        if let Some(encoded) = self.encoded_polyline.filter(|e| !e.is_empty()) {
            match decode_polyline(&encoded) {
                Ok(path) => return path,
                Err(err) => tracing::warn!("Undecodable walking polyline: {}", err),
            }
        }
        self.geo_json_linestring
            .map(|geometry| geometry_lines(geometry.value).into_iter().flatten().collect())
            .unwrap_or_default()
    }
}

/// HTTP client for the pedestrian routing API.
pub struct WalkingClient {
    client: Client,
    url: String,
    api_key: String,
}

impl WalkingClient {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, url, api_key))
    }

    pub fn with_client(client: Client, url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            api_key: api_key.into(),
        }
    }

    /// Walking path between two points, or empty when the service has
    /// nothing usable. Only cancellation is an error.
    pub async fn get_walking_path(
        &self,
        origin: LatLng,
        destination: LatLng,
        cancel: &CancelToken,
    ) -> Result<Vec<LatLng>, Cancelled> {
        cancel.check()?;
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(Cancelled),
            path = self.request_path(origin, destination) => Ok(path),
        }
    }

    async fn request_path(&self, origin: LatLng, destination: LatLng) -> Vec<LatLng> {
        let request = ComputeRoutesRequest {
            origin: origin.into(),
            destination: destination.into(),
            travel_mode: "WALK",
            polyline_encoding: "ENCODED_POLYLINE",
        };

        let response = match self
            .client
            .post(&self.url)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", FIELD_MASK)
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!("Walking request failed: {}", err);
                return Vec::new();
            }
        };

        if !response.status().is_success() {
            tracing::warn!("Walking service returned {}", response.status());
            return Vec::new();
        }

        let body: ComputeRoutesResponse = match response.json().await {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!("Invalid walking response: {}", err);
                return Vec::new();
            }
        };

        let path = body
            .routes
            .into_iter()
            .next()
            .and_then(|route| route.polyline)
            .map(ApiPolyline::into_path)
            .unwrap_or_default();

        if path.len() < 2 {
            tracing::debug!("Walking route has fewer than two points");
            return Vec::new();
        }
        path
    }
}

/// Walking paths and straight connectors for one computation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WalkingResolution {
    pub paths: Vec<Vec<LatLng>>,
    pub connectors: Vec<Connector>,
}

/// Fetch every present walking half concurrently.
///
/// Results keep hint order (`to_snap` before `from_snap`). Paths with fewer
/// than two points are dropped; connectors are kept for every request.
pub async fn resolve_walking(
    client: &WalkingClient,
    hints: &[SnapHint],
    cancel: &CancelToken,
    connector_min_m: f64,
) -> Result<WalkingResolution, Cancelled> {
    let requests: Vec<WalkRequest> = hints
        .iter()
        .flat_map(|hint| hint.requests().copied())
        .collect();
    if requests.is_empty() {
        return Ok(WalkingResolution::default());
    }

    let results = join_all(
        requests
            .iter()
            .map(|request| client.get_walking_path(request.origin, request.destination, cancel)),
    )
    .await;

    let mut resolution = WalkingResolution::default();
    for (request, result) in requests.iter().zip(results) {
        let path = result?;
        resolution.connectors.extend(walking_connectors(
            &request.origin,
            &request.destination,
            &path,
            connector_min_m,
        ));
        if path.len() > 1 {
            resolution.paths.push(path);
        }
    }

    tracing::debug!(
        requests = requests.len(),
        paths = resolution.paths.len(),
        connectors = resolution.connectors.len(),
        "Walking resolved"
    );
    Ok(resolution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_body_shape() {
        let request = ComputeRoutesRequest {
            origin: LatLng::new(45.3, 6.58).into(),
            destination: LatLng::new(45.29, 6.59).into(),
            travel_mode: "WALK",
            polyline_encoding: "ENCODED_POLYLINE",
        };
        let value = serde_json::to_value(&request).expect("serializes");
        assert_eq!(
            value,
            json!({
                "origin": {"location": {"latLng": {"latitude": 45.3, "longitude": 6.58}}},
                "destination": {"location": {"latLng": {"latitude": 45.29, "longitude": 6.59}}},
                "travelMode": "WALK",
                "polylineEncoding": "ENCODED_POLYLINE"
            })
        );
    }

    #[test]
    fn geojson_line_is_used_without_encoded_polyline() {
        let polyline: ApiPolyline = serde_json::from_value(json!({
            "geoJsonLinestring": {"type": "LineString", "coordinates": [[6.58, 45.30], [6.581, 45.301]]}
        }))
        .expect("parses");
        assert_eq!(
            polyline.into_path(),
            vec![LatLng::new(45.30, 6.58), LatLng::new(45.301, 6.581)]
        );
    }

    #[test]
    fn encoded_polyline_wins() {
        let polyline: ApiPolyline = serde_json::from_value(json!({
            "encodedPolyline": "_p~iF~ps|U_ulLnnqC",
            "geoJsonLinestring": {"type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]]}
        }))
        .expect("parses");
        let path = polyline.into_path();
        assert_eq!(path.len(), 2);
        assert!((path[0].lat - 38.5).abs() < 1e-9);
        assert!((path[0].lng + 120.2).abs() < 1e-9);
    }
}
