use serde::{Deserialize, Serialize};

use crate::status::Named;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Boundaries {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl Boundaries {
    pub fn contains(&self, point: Coord) -> bool {
        point.lat <= self.north
            && point.lat >= self.south
            && point.lng <= self.east
            && point.lng >= self.west
    }
}

/// A turbine or drone pinned on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl MapMarker {
    pub fn coord(&self) -> Coord {
        Coord {
            lat: self.lat,
            lng: self.lng,
        }
    }
}

impl Named for MapMarker {
    fn name(&self) -> &str {
        &self.id
    }

    fn raw_status(&self) -> &str {
        self.status.as_deref().unwrap_or_default()
    }
}

/// Map layout served by `/map`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapConfig {
    #[serde(default)]
    pub area: Vec<Coord>,
    pub boundaries: Boundaries,
    pub center: Coord,
    pub default_zoom: u32,
    pub min_zoom: u32,
    #[serde(default)]
    pub turbines: Vec<MapMarker>,
    #[serde(default)]
    pub drones: Vec<MapMarker>,
}

impl MapConfig {
    pub fn drone(&self, id: &str) -> Option<&MapMarker> {
        self.drones.iter().find(|drone| drone.id == id)
    }

    /// Drones currently outside the configured boundaries.
    pub fn drones_out_of_bounds(&self) -> Vec<&MapMarker> {
        self.drones
            .iter()
            .filter(|drone| !self.boundaries.contains(drone.coord()))
            .collect()
    }
}
