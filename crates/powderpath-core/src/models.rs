//! Core data models for route assembly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A geographic point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Build from a GeoJSON-ordered `[lon, lat]` pair.
    pub fn from_lon_lat(lon: f64, lat: f64) -> Self {
        Self { lat, lng: lon }
    }

    /// `[lat, lon]` pair as sent to the leg router.
    pub fn to_pair(self) -> [f64; 2] {
        [self.lat, self.lng]
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// A raw routed fragment as returned by the leg router.
///
/// Difficulty present means a ski piste; absent means a lift. Raw segments
/// are never walking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    pub path: Vec<LatLng>,
}

impl Segment {
    /// Trimmed difficulty, `None` when absent or blank.
    pub fn difficulty_label(&self) -> Option<&str> {
        self.difficulty
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    pub fn kind(&self) -> StepKind {
        if self.difficulty_label().is_some() {
            StepKind::Ski
        } else {
            StepKind::Lift
        }
    }

    /// Non-blank name, if any.
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .filter(|value| !value.trim().is_empty())
    }
}

/// Straight-line stand-in for a leg the router could not serve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fallback {
    pub start: LatLng,
    pub end: LatLng,
}

impl Fallback {
    /// The fallback as an unnamed, difficulty-less segment along the
    /// straight line, ready to be fed to the compactor.
    pub fn as_segment(&self) -> Segment {
        Segment {
            name: None,
            difficulty: None,
            path: vec![self.start, self.end],
        }
    }
}

/// Result of routing between two consecutive filled stops.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    pub path: Vec<LatLng>,
    pub segments: Vec<Segment>,
    pub fallback: Option<Fallback>,
    pub snapped_start: Option<LatLng>,
    pub snapped_end: Option<LatLng>,
}

impl Leg {
    /// Empty leg that asks the renderer for a dashed straight line.
    pub fn with_fallback(start: LatLng, end: LatLng) -> Self {
        Self {
            fallback: Some(Fallback { start, end }),
            ..Self::default()
        }
    }
}

/// A pedestrian request between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WalkRequest {
    pub origin: LatLng,
    pub destination: LatLng,
}

/// Walking gaps around one leg: from the literal stop to where routing
/// starts, and from where routing ends to the next stop.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapHint {
    pub to_snap: Option<WalkRequest>,
    pub from_snap: Option<WalkRequest>,
}

impl SnapHint {
    pub fn for_leg(stop: LatLng, next_stop: LatLng, leg: &Leg) -> Self {
        Self {
            to_snap: leg.snapped_start.map(|snapped| WalkRequest {
                origin: stop,
                destination: snapped,
            }),
            from_snap: leg.snapped_end.map(|snapped| WalkRequest {
                origin: snapped,
                destination: next_stop,
            }),
        }
    }

    /// Present requests, `to_snap` first.
    pub fn requests(&self) -> impl Iterator<Item = &WalkRequest> {
        self.to_snap.iter().chain(self.from_snap.iter())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Ski,
    Lift,
    Walk,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StepKind::Ski => "ski",
            StepKind::Lift => "lift",
            StepKind::Walk => "walk",
        };
        f.write_str(label)
    }
}

/// A compacted, display-ready unit of the itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryStep {
    pub kind: StepKind,
    /// Display name, best available label among merged fragments
    pub name: String,
    /// Normalized key used for merging (see `names::normalize_name_key`)
    pub name_key: String,
    /// Trimmed difficulty, ski steps only
    pub difficulty: Option<String>,
    pub length_m: f64,
    /// Concatenation of all fragment paths
    pub path: Vec<LatLng>,
    /// Fragment paths in emission order
    pub parts: Vec<Vec<LatLng>>,
    /// Position along the merged route; `usize::MAX` when unmatched
    pub sort_key: usize,
}

impl ItineraryStep {
    /// Label shown when the step has no usable name.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            match self.kind {
                StepKind::Lift => "Lift",
                StepKind::Ski => "Piste",
                StepKind::Walk => "Walk connector",
            }
        } else {
            &self.name
        }
    }
}

/// A named endpoint as exchanged with the saved-routes endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedPoint {
    #[serde(default)]
    pub name: Option<String>,
    pub lat: f64,
    pub lng: f64,
}

impl NamedPoint {
    pub fn point(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

/// A saved origin/destination pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedRoute {
    pub start: NamedPoint,
    pub end: NamedPoint,
    #[serde(default)]
    pub route_name: Option<String>,
}

impl SavedRoute {
    /// Stored name, or `"<start> → <end>"`.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.route_name.as_deref().filter(|n| !n.trim().is_empty()) {
            return name.to_string();
        }
        let start = self.start.name.as_deref().unwrap_or("Start");
        let end = self.end.name.as_deref().unwrap_or("End");
        format!("{} → {}", start, end)
    }
}

/// A recently selected location, optionally enriched with a photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentLocation {
    #[serde(default)]
    pub name: Option<String>,
    pub lat: f64,
    pub lng: f64,
    #[serde(default, rename = "photoUrl")]
    pub photo_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_difficulty_is_a_lift() {
        let seg = Segment {
            name: Some("Chair".into()),
            difficulty: Some("  ".into()),
            path: vec![],
        };
        assert_eq!(seg.kind(), StepKind::Lift);
        assert_eq!(seg.difficulty_label(), None);
    }

    #[test]
    fn snap_hint_skips_missing_snaps() {
        let a = LatLng::new(45.30, 6.58);
        let b = LatLng::new(45.29, 6.59);
        let leg = Leg {
            snapped_end: Some(LatLng::new(45.291, 6.589)),
            ..Leg::default()
        };
        let hint = SnapHint::for_leg(a, b, &leg);
        assert!(hint.to_snap.is_none());
        let requests: Vec<_> = hint.requests().collect();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].destination, b);
    }

    #[test]
    fn saved_route_name_defaults() {
        let saved = SavedRoute {
            start: NamedPoint { name: Some("Meribel".into()), lat: 45.39, lng: 6.56 },
            end: NamedPoint { name: None, lat: 45.30, lng: 6.58 },
            route_name: None,
        };
        assert_eq!(saved.display_name(), "Meribel → End");
    }
}
