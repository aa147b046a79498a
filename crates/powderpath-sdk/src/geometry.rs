//! GeoJSON geometry to route paths.

use geojson::{Position, Value};
use powderpath_core::LatLng;

fn position_to_latlng(position: &Position) -> Option<LatLng> {
    match position.as_slice() {
        [lon, lat, ..] => Some(LatLng::from_lon_lat(*lon, *lat)),
        _ => None,
    }
}

fn line_to_path(line: &[Position]) -> Vec<LatLng> {
    line.iter().filter_map(position_to_latlng).collect()
}

/// Paths carried by a line geometry, one per line string. Other geometry
/// types yield nothing.
pub(crate) fn geometry_lines(value: Value) -> Vec<Vec<LatLng>> {
    match value {
        Value::LineString(line) => vec![line_to_path(&line)],
        Value::MultiLineString(lines) => lines.iter().map(|line| line_to_path(line)).collect(),
        _ => Vec::new(),
    }
}
