//! Segment compaction: fold raw routed fragments into named itinerary steps.
//!
//! Consecutive fragments merge when they share type, difficulty and
//! normalized name key. Keys come from the display name, so a nameless piste
//! ("Unnamed piste") normalizes to `unnamed` and fuses into the preceding
//! piste group of the same difficulty. A nameless lift keeps the key
//! `unnamed lift` and always stands alone.

use crate::chrono_order::UNMATCHED_SORT_KEY;
use crate::geo::path_length_m;
use crate::models::{ItineraryStep, LatLng, Segment, StepKind};
use crate::names::{is_unnamed_label, normalize_name_key, UNNAMED_KEY};

const UNNAMED_LIFT: &str = "Unnamed lift";
const UNNAMED_PISTE: &str = "Unnamed piste";

fn default_name(kind: StepKind) -> &'static str {
    match kind {
        StepKind::Lift => UNNAMED_LIFT,
        _ => UNNAMED_PISTE,
    }
}

fn extends(group: &ItineraryStep, kind: StepKind, difficulty: Option<&str>) -> bool {
    group.kind == kind && group.difficulty.as_deref() == difficulty
}

/// Merge consecutive raw segments into ski/lift itinerary steps.
///
/// Pure and order-preserving; feeding the same input twice yields the same
/// output. Sort keys are left unmatched until `order_steps` runs.
pub fn compact_segments(segments: &[Segment]) -> Vec<ItineraryStep> {
    let mut out: Vec<ItineraryStep> = Vec::new();

    for segment in segments {
        let kind = segment.kind();
        let difficulty = segment.difficulty_label();
        let raw_name = segment.display_name().unwrap_or(default_name(kind));
        let mut key = normalize_name_key(raw_name);
        let length_m = path_length_m(&segment.path);

        if let Some(last) = out.last_mut() {
            if key == UNNAMED_KEY && extends(last, kind, difficulty) {
                key = last.name_key.clone();
            }

            if extends(last, kind, difficulty) && last.name_key == key {
                last.length_m += length_m;
                if !segment.path.is_empty() {
                    last.path.extend_from_slice(&segment.path);
                    last.parts.push(segment.path.clone());
                }
                if is_unnamed_label(&last.name) && !is_unnamed_label(raw_name) {
                    last.name = raw_name.to_string();
                }
                continue;
            }
        }

        out.push(ItineraryStep {
            kind,
            name: raw_name.to_string(),
            name_key: key,
            difficulty: difficulty.map(str::to_string),
            length_m,
            path: segment.path.clone(),
            parts: if segment.path.is_empty() {
                Vec::new()
            } else {
                vec![segment.path.clone()]
            },
            sort_key: UNMATCHED_SORT_KEY,
        });
    }

    out
}

/// One walk step per non-trivial walking path. Walks are never merged.
pub fn compact_walks(paths: &[Vec<LatLng>]) -> Vec<ItineraryStep> {
    paths
        .iter()
        .filter(|path| path.len() > 1)
        .map(|path| ItineraryStep {
            kind: StepKind::Walk,
            name: String::new(),
            name_key: String::new(),
            difficulty: None,
            length_m: path_length_m(path),
            path: path.clone(),
            parts: vec![path.clone()],
            sort_key: UNMATCHED_SORT_KEY,
        })
        .collect()
}
