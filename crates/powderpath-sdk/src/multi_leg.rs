//! Sequential multi-leg orchestration.

use powderpath_core::{Fallback, LatLng, Segment, SnapHint};
use serde::Serialize;

use crate::cancel::{CancelToken, Cancelled};
use crate::leg::LegClient;

/// Concatenated result of routing every consecutive stop pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MultiLeg {
    pub path: Vec<LatLng>,
    pub segments: Vec<Segment>,
    pub fallbacks: Vec<Fallback>,
    /// One hint per leg, in leg order
    pub walking: Vec<SnapHint>,
}

/// Route `stops[i] -> stops[i + 1]` for every pair, in order, one at a time.
///
/// Fewer than two stops yields an empty result without any request.
/// Cancellation before or during a leg aborts the whole computation.
pub async fn fetch_multi_leg(
    client: &LegClient,
    stops: &[LatLng],
    cancel: &CancelToken,
) -> Result<MultiLeg, Cancelled> {
    let mut merged = MultiLeg::default();
    if stops.len() < 2 {
        return Ok(merged);
    }

    for (idx, pair) in stops.windows(2).enumerate() {
        if cancel.is_cancelled() {
            tracing::debug!("Multi-leg cancelled before leg {}", idx);
            return Err(Cancelled);
        }
        let (start, end) = (pair[0], pair[1]);

        let outcome = client.fetch_leg(start, end, cancel).await;
        if outcome.is_cancelled() {
            tracing::debug!("Multi-leg cancelled during leg {}", idx);
            return Err(Cancelled);
        }
        let leg = outcome.into_leg();

        merged.walking.push(SnapHint::for_leg(start, end, &leg));
        merged.path.extend_from_slice(&leg.path);
        merged.segments.extend(leg.segments);
        if let Some(fallback) = leg.fallback {
            merged.fallbacks.push(fallback);
        }
    }

    tracing::info!(
        legs = stops.len() - 1,
        points = merged.path.len(),
        fallbacks = merged.fallbacks.len(),
        "Multi-leg route assembled"
    );
    Ok(merged)
}
