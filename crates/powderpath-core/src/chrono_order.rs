//! Chronological ordering of itinerary steps along the merged route path.

use crate::geo::nearest_vertex_index;
use crate::models::{ItineraryStep, LatLng};

/// Sort key for steps that cannot be matched to any route vertex.
pub const UNMATCHED_SORT_KEY: usize = usize::MAX;

/// Position of a step along `route_path`.
///
/// Minimum nearest-vertex index over the first and last point of every
/// sub-path the step owns, so the key does not depend on fragment direction.
pub fn compute_sort_key(step: &ItineraryStep, route_path: &[LatLng]) -> usize {
    if route_path.is_empty() {
        return UNMATCHED_SORT_KEY;
    }

    step.parts
        .iter()
        .filter_map(|part| Some((part.first()?, part.last()?)))
        .flat_map(|(first, last)| [first, last])
        .filter_map(|point| nearest_vertex_index(route_path, point))
        .min()
        .unwrap_or(UNMATCHED_SORT_KEY)
}

/// Assign sort keys and order steps ascending along the route.
///
/// The sort is stable: steps with equal keys keep their emission order.
pub fn order_steps(steps: Vec<ItineraryStep>, route_path: &[LatLng]) -> Vec<ItineraryStep> {
    let mut steps: Vec<ItineraryStep> = steps
        .into_iter()
        .map(|mut step| {
            step.sort_key = compute_sort_key(&step, route_path);
            step
        })
        .collect();
    steps.sort_by_key(|step| step.sort_key);
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::offset_position;
    use crate::models::StepKind;

    fn route(n: usize) -> Vec<LatLng> {
        let start = LatLng::new(45.30, 6.58);
        (0..n)
            .map(|i| offset_position(&start, -(i as f64) * 100.0, 0.0))
            .collect()
    }

    fn step(name: &str, parts: Vec<Vec<LatLng>>) -> ItineraryStep {
        ItineraryStep {
            kind: StepKind::Ski,
            name: name.to_string(),
            name_key: name.to_lowercase(),
            difficulty: Some("easy".into()),
            length_m: 0.0,
            path: parts.concat(),
            parts,
            sort_key: UNMATCHED_SORT_KEY,
        }
    }

    #[test]
    fn steps_follow_route_order() {
        let path = route(10);
        let late = step("Late", vec![vec![path[7], path[9]]]);
        let early = step("Early", vec![vec![path[1], path[3]]]);
        let ordered = order_steps(vec![late, early], &path);
        assert_eq!(ordered[0].name, "Early");
        assert_eq!(ordered[0].sort_key, 1);
        assert_eq!(ordered[1].sort_key, 7);
    }

    #[test]
    fn reversed_fragment_uses_either_endpoint() {
        let path = route(10);
        let reversed = step("Reversed", vec![vec![path[6], path[2]]]);
        assert_eq!(compute_sort_key(&reversed, &path), 2);
    }

    #[test]
    fn ties_keep_emission_order() {
        let path = route(10);
        let first = step("First", vec![vec![path[4], path[5]]]);
        let second = step("Second", vec![vec![path[4], path[8]]]);
        let ordered = order_steps(vec![first, second], &path);
        assert_eq!(ordered[0].sort_key, 4);
        assert_eq!(ordered[1].sort_key, 4);
        assert_eq!(ordered[0].name, "First");
        assert_eq!(ordered[1].name, "Second");
    }

    #[test]
    fn multi_part_step_takes_minimum_over_parts() {
        let path = route(10);
        let merged = step("Merged", vec![vec![path[5], path[6]], vec![path[2], path[3]]]);
        assert_eq!(compute_sort_key(&merged, &path), 2);
    }

    #[test]
    fn unmatched_steps_sort_last() {
        let path = route(10);
        let empty = step("Empty", vec![]);
        let normal = step("Normal", vec![vec![path[9]]]);
        let ordered = order_steps(vec![empty, normal], &path);
        assert_eq!(ordered[0].name, "Normal");
        assert_eq!(ordered[1].sort_key, UNMATCHED_SORT_KEY);

        let lonely = step("Lonely", vec![vec![path[0]]]);
        assert_eq!(compute_sort_key(&lonely, &[]), UNMATCHED_SORT_KEY);
    }
}
