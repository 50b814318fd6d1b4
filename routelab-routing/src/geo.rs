//! Great-circle distances and the distance-to-time conversion shared by edge
//! weights and the A* heuristic

use geo::{HaversineDistance, Point};
use serde::{Deserialize, Serialize};

/// Latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    fn to_point(self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self::new(lat, lon)
    }
}

/// Haversine distance in kilometers
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    a.to_point().haversine_distance(&b.to_point()) / 1000.0
}

/// Minutes needed to cover `distance_km` at a constant `speed_kmh`
pub fn minutes_at_speed(distance_km: f64, speed_kmh: f64) -> f64 {
    distance_km / (speed_kmh / 60.0)
}
