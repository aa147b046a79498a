//! Ordered stop list with origin/destination roles.

use crate::models::{LatLng, SavedRoute};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopRole {
    Origin,
    Intermediate,
    Destination,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub role: StopRole,
    #[serde(default)]
    pub point: Option<LatLng>,
    #[serde(default)]
    pub name: Option<String>,
}

impl Stop {
    fn empty(role: StopRole) -> Self {
        Self {
            role,
            point: None,
            name: None,
        }
    }

    pub fn is_filled(&self) -> bool {
        self.point.is_some()
    }
}

/// An ordered route. Always holds at least an origin and a destination;
/// roles are re-derived after every structural change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    stops: Vec<Stop>,
}

impl Default for Route {
    fn default() -> Self {
        Self::new()
    }
}

impl Route {
    pub fn new() -> Self {
        Self {
            stops: vec![Stop::empty(StopRole::Origin), Stop::empty(StopRole::Destination)],
        }
    }

    /// Origin and destination filled from a saved route.
    pub fn from_saved(saved: &SavedRoute) -> Self {
        let mut route = Self::new();
        route.set_place_at(0, saved.start.point(), saved.start.name.clone());
        route.set_place_at(1, saved.end.point(), saved.end.name.clone());
        route
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    fn sync_roles(&mut self) {
        let last = self.stops.len() - 1;
        for (idx, stop) in self.stops.iter_mut().enumerate() {
            stop.role = if idx == 0 {
                StopRole::Origin
            } else if idx == last {
                StopRole::Destination
            } else {
                StopRole::Intermediate
            };
        }
    }

    /// Insert an empty intermediate stop just before the destination.
    pub fn add_stop_before_destination(&mut self) {
        let at = self.stops.len() - 1;
        self.stops.insert(at, Stop::empty(StopRole::Intermediate));
        self.sync_roles();
    }

    /// Remove an intermediate stop. The ends are never removed; returns
    /// whether anything changed.
    pub fn remove_stop_at(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.stops.len() - 1 {
            return false;
        }
        self.stops.remove(index);
        self.sync_roles();
        true
    }

    /// Swap origin and destination.
    pub fn swap_ends(&mut self) {
        let last = self.stops.len() - 1;
        self.stops.swap(0, last);
        self.sync_roles();
    }

    pub fn set_place_at(&mut self, index: usize, point: LatLng, name: Option<String>) -> bool {
        let Some(stop) = self.stops.get_mut(index) else {
            return false;
        };
        stop.point = Some(point);
        stop.name = name;
        true
    }

    pub fn clear_place_at(&mut self, index: usize) -> bool {
        let Some(stop) = self.stops.get_mut(index) else {
            return false;
        };
        stop.point = None;
        stop.name = None;
        true
    }

    /// Selected points of filled stops, in route order.
    pub fn filled_points(&self) -> Vec<LatLng> {
        self.stops.iter().filter_map(|stop| stop.point).collect()
    }
}
