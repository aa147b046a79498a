//! Straight connector stubs between literal stops and walking paths.

use crate::geo::distance_m;
use crate::models::LatLng;

/// A two-point straight segment.
pub type Connector = [LatLng; 2];

/// Connectors bridging `origin` to the start of `path` and the end of `path`
/// to `destination`, each emitted only when the gap exceeds `min_meters`.
///
/// An empty `path` yields no connectors; callers that need a direct
/// origin→destination stub must draw it themselves.
pub fn walking_connectors(
    origin: &LatLng,
    destination: &LatLng,
    path: &[LatLng],
    min_meters: f64,
) -> Vec<Connector> {
    let (Some(first), Some(last)) = (path.first(), path.last()) else {
        return Vec::new();
    };

    let mut connectors = Vec::with_capacity(2);
    if distance_m(origin, first) > min_meters {
        connectors.push([*origin, *first]);
    }
    if distance_m(destination, last) > min_meters {
        connectors.push([*last, *destination]);
    }
    connectors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::offset_position;

    #[test]
    fn only_destination_side_when_origin_coincides() {
        let origin = LatLng::new(45.30, 6.58);
        let path_end = offset_position(&origin, -80.0, 0.0);
        let destination = offset_position(&path_end, 0.0, 50.0);
        let path = vec![origin, path_end];

        let connectors = walking_connectors(&origin, &destination, &path, 0.0);
        assert_eq!(connectors.len(), 1);
        assert_eq!(connectors[0], [path_end, destination]);
    }

    #[test]
    fn both_sides_when_path_is_detached() {
        let origin = LatLng::new(45.30, 6.58);
        let destination = offset_position(&origin, -200.0, 0.0);
        let path = vec![
            offset_position(&origin, -10.0, 5.0),
            offset_position(&destination, 10.0, 5.0),
        ];
        let connectors = walking_connectors(&origin, &destination, &path, 0.0);
        assert_eq!(connectors.len(), 2);
        assert_eq!(connectors[0][0], origin);
        assert_eq!(connectors[1][1], destination);
    }

    #[test]
    fn threshold_suppresses_short_gaps() {
        let origin = LatLng::new(45.30, 6.58);
        let destination = offset_position(&origin, -200.0, 0.0);
        let path = vec![
            offset_position(&origin, -3.0, 0.0),
            offset_position(&destination, 30.0, 0.0),
        ];
        let connectors = walking_connectors(&origin, &destination, &path, 5.0);
        assert_eq!(connectors, vec![[path[1], destination]]);
    }

    #[test]
    fn empty_path_yields_nothing() {
        let origin = LatLng::new(45.30, 6.58);
        let destination = offset_position(&origin, -200.0, 0.0);
        assert!(walking_connectors(&origin, &destination, &[], 0.0).is_empty());
    }
}
