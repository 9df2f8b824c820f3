use serde::{Deserialize, Serialize};

use crate::entities::Coordinates;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    #[serde(rename = "stop_id", default)]
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub time: String,
}

impl Stop {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// Ordered stops for one variant of a route. The first stop is the origin,
/// the last the destination, everything in between a waypoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopList(Vec<Stop>);

impl StopList {
    pub fn new(stops: Vec<Stop>) -> Self {
        Self(stops)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A path needs at least an origin and a destination.
    pub fn is_renderable(&self) -> bool {
        self.0.len() >= 2
    }

    pub fn get(&self, index: usize) -> Option<&Stop> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stop> {
        self.0.iter()
    }

    /// Splits a copy of the list into (origin, waypoints, destination),
    /// leaving `self` intact. Returns `None` when the list is not renderable.
    pub fn endpoints(&self) -> Option<(Stop, Vec<Stop>, Stop)> {
        if !self.is_renderable() {
            return None;
        }

        let mut waypoints = self.0.clone();
        let origin = waypoints.remove(0);
        let destination = waypoints.pop()?;

        Some((origin, waypoints, destination))
    }
}

impl From<Vec<Stop>> for StopList {
    fn from(stops: Vec<Stop>) -> Self {
        Self(stops)
    }
}
