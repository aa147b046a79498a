//! Itinerary assembly: compaction, ordering and per-kind totals.

use serde::{Deserialize, Serialize};

use crate::chrono_order::order_steps;
use crate::compact::{compact_segments, compact_walks};
use crate::models::{Fallback, ItineraryStep, LatLng, Segment, StepKind};

/// Distance totals shown above the step list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItinerarySummary {
    pub total_m: f64,
    pub ski_m: f64,
    pub lift_m: f64,
    pub walk_m: f64,
    pub fallback_count: usize,
}

impl ItinerarySummary {
    fn from_steps(steps: &[ItineraryStep], fallback_count: usize) -> Self {
        let mut summary = Self {
            fallback_count,
            ..Self::default()
        };
        for step in steps {
            match step.kind {
                StepKind::Ski => summary.ski_m += step.length_m,
                StepKind::Lift => summary.lift_m += step.length_m,
                StepKind::Walk => summary.walk_m += step.length_m,
            }
        }
        summary.total_m = summary.ski_m + summary.lift_m + summary.walk_m;
        summary
    }
}

/// Ordered, display-ready itinerary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    pub steps: Vec<ItineraryStep>,
    pub summary: ItinerarySummary,
}

impl Itinerary {
    /// Paths to highlight when step `idx` is selected.
    pub fn highlight(&self, idx: usize) -> Option<&[Vec<LatLng>]> {
        self.steps
            .get(idx)
            .map(|step| step.parts.as_slice())
            .filter(|parts| !parts.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Build the itinerary for one route computation.
///
/// Fallback legs join the ski/lift compaction as unnamed straight segments;
/// walking paths become standalone walk steps. Everything is then ordered
/// along `route_path`.
pub fn build_itinerary(
    segments: &[Segment],
    fallbacks: &[Fallback],
    walk_paths: &[Vec<LatLng>],
    route_path: &[LatLng],
) -> Itinerary {
    let mixed: Vec<Segment> = segments
        .iter()
        .cloned()
        .chain(fallbacks.iter().map(Fallback::as_segment))
        .collect();

    let mut steps = compact_segments(&mixed);
    steps.extend(compact_walks(walk_paths));

    let steps = order_steps(steps, route_path);
    let summary = ItinerarySummary::from_steps(&steps, fallbacks.len());
    Itinerary { steps, summary }
}

/// Format meters as kilometers with two decimals.
pub fn format_km(meters: f64) -> String {
    format!("{:.2} km", meters / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::offset_position;

    #[test]
    fn summary_totals_by_kind() {
        let start = LatLng::new(45.30, 6.58);
        let lift_top = offset_position(&start, 1000.0, 0.0);
        let run_end = offset_position(&lift_top, -800.0, 200.0);
        let route_path = vec![start, lift_top, run_end];

        let segments = vec![
            Segment {
                name: Some("Saulire".into()),
                difficulty: None,
                path: vec![start, lift_top],
            },
            Segment {
                name: Some("Combe".into()),
                difficulty: Some("advanced".into()),
                path: vec![lift_top, run_end],
            },
        ];
        let walk = vec![offset_position(&start, -30.0, 0.0), start];

        let itinerary = build_itinerary(&segments, &[], &[walk], &route_path);
        let kinds: Vec<StepKind> = itinerary.steps.iter().map(|s| s.kind).collect();
        // Walk ends at the route start, lift starts there too; lift was emitted first.
        assert_eq!(kinds, vec![StepKind::Lift, StepKind::Walk, StepKind::Ski]);
        assert!((itinerary.summary.lift_m - 1000.0).abs() < 2.0);
        assert!((itinerary.summary.walk_m - 30.0).abs() < 0.5);
        let expected_total =
            itinerary.summary.ski_m + itinerary.summary.lift_m + itinerary.summary.walk_m;
        assert!((itinerary.summary.total_m - expected_total).abs() < 1e-9);
        assert_eq!(itinerary.summary.fallback_count, 0);
    }

    #[test]
    fn fallbacks_become_unnamed_lift_steps() {
        let a = LatLng::new(45.30, 6.58);
        let b = LatLng::new(45.29, 6.59);
        let itinerary = build_itinerary(&[], &[Fallback { start: a, end: b }], &[], &[]);
        assert_eq!(itinerary.steps.len(), 1);
        assert_eq!(itinerary.steps[0].kind, StepKind::Lift);
        assert_eq!(itinerary.steps[0].name, "Unnamed lift");
        assert_eq!(itinerary.summary.fallback_count, 1);
        assert!(itinerary.summary.lift_m > 1000.0);
    }

    #[test]
    fn fallback_after_named_lift_keeps_its_own_step() {
        let a = LatLng::new(45.30, 6.58);
        let b = offset_position(&a, 1000.0, 0.0);
        let c = offset_position(&b, 0.0, 8000.0);
        let segments = vec![Segment {
            name: Some("Saulire Express".into()),
            difficulty: None,
            path: vec![a, b],
        }];

        let itinerary = build_itinerary(&segments, &[Fallback { start: b, end: c }], &[], &[a, b]);
        assert_eq!(itinerary.steps.len(), 2);
        assert_eq!(itinerary.steps[0].name, "Saulire Express");
        assert!((itinerary.steps[0].length_m - 1000.0).abs() < 2.0);
        assert_eq!(itinerary.steps[1].name, "Unnamed lift");
        assert!((itinerary.steps[1].length_m - 8000.0).abs() < 10.0);
        assert_eq!(itinerary.summary.fallback_count, 1);
    }

    #[test]
    fn highlight_returns_step_parts() {
        let a = LatLng::new(45.30, 6.58);
        let b = offset_position(&a, 100.0, 0.0);
        let walk = vec![a, b];
        let itinerary = build_itinerary(&[], &[], &[walk.clone()], &[a, b]);
        assert_eq!(itinerary.highlight(0), Some(&[walk][..]));
        assert_eq!(itinerary.highlight(5), None);
    }

    #[test]
    fn km_formatting() {
        assert_eq!(format_km(1234.0), "1.23 km");
        assert_eq!(format_km(0.0), "0.00 km");
    }
}
