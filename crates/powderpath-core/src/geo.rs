//! Great-circle math over point sequences.

use crate::models::LatLng;

/// Mean Earth radius used for all distance calculations.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Calculate distance between two points in meters (Haversine formula).
///
/// # Arguments
/// * `lat1`, `lon1` - First point coordinates in decimal degrees
/// * `lat2`, `lon2` - Second point coordinates in decimal degrees
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();
    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Distance between two points in meters.
pub fn distance_m(a: &LatLng, b: &LatLng) -> f64 {
    haversine_distance(a.lat, a.lng, b.lat, b.lng)
}

/// Sum of great-circle distances along a path. Paths with fewer than two
/// points have zero length.
pub fn path_length_m(path: &[LatLng]) -> f64 {
    path.windows(2).map(|pair| distance_m(&pair[0], &pair[1])).sum()
}

/// Index of the vertex in `poly` closest to `point`.
///
/// Linear scan; the first occurrence wins on ties. Returns `None` for an
/// empty polyline.
pub fn nearest_vertex_index(poly: &[LatLng], point: &LatLng) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, vertex) in poly.iter().enumerate() {
        let dist = distance_m(vertex, point);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((idx, dist)),
        }
    }
    best.map(|(idx, _)| idx)
}

// ==== Local metre offsets ====

/// Meters per degree of latitude at a given latitude (WGS84 approximation).
pub fn meters_per_deg_lat(lat_deg: f64) -> f64 {
    let lat_rad = lat_deg.to_radians();
    111_132.954 - 559.822 * (2.0 * lat_rad).cos() + 1.175 * (4.0 * lat_rad).cos()
        - 0.0023 * (6.0 * lat_rad).cos()
}

/// Meters per degree of longitude at a given latitude (WGS84 approximation).
pub fn meters_per_deg_lon(lat_deg: f64) -> f64 {
    let lat_rad = lat_deg.to_radians();
    111_412.84 * lat_rad.cos() - 93.5 * (3.0 * lat_rad).cos() + 0.118 * (5.0 * lat_rad).cos()
}

/// Offset a position by meters in the north and east directions.
pub fn offset_position(point: &LatLng, north_m: f64, east_m: f64) -> LatLng {
    let dlat = north_m / meters_per_deg_lat(point.lat).max(1e-9);
    let dlng = east_m / meters_per_deg_lon(point.lat).max(1e-9);
    LatLng::new(point.lat + dlat, point.lng + dlng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_known_distance() {
        // ~111km between these points (1 degree latitude)
        let dist = haversine_distance(0.0, 0.0, 1.0, 0.0);
        assert!((dist - 111_194.0).abs() < 100.0);
    }

    #[test]
    fn test_haversine_same_point() {
        let dist = haversine_distance(45.297, 6.58, 45.297, 6.58);
        assert!(dist < 0.001);
    }

    #[test]
    fn path_length_sums_each_hop() {
        let a = LatLng::new(45.30, 6.58);
        let b = offset_position(&a, 100.0, 0.0);
        let c = offset_position(&b, 0.0, 50.0);
        let total = path_length_m(&[a, b, c]);
        assert!((total - 150.0).abs() < 1.0, "got {total}");
    }

    #[test]
    fn path_length_of_degenerate_paths_is_zero() {
        assert_eq!(path_length_m(&[]), 0.0);
        assert_eq!(path_length_m(&[LatLng::new(45.0, 6.0)]), 0.0);
    }

    #[test]
    fn nearest_vertex_prefers_first_on_tie() {
        let p = LatLng::new(45.30, 6.58);
        let poly = vec![LatLng::new(45.31, 6.58), p, p];
        assert_eq!(nearest_vertex_index(&poly, &p), Some(1));
        assert_eq!(nearest_vertex_index(&[], &p), None);
    }

    #[test]
    fn offset_position_moves_requested_distance() {
        let origin = LatLng::new(45.30, 6.58);
        let moved = offset_position(&origin, 30.0, 40.0);
        assert!((distance_m(&origin, &moved) - 50.0).abs() < 0.5);
    }
}
