//! Road classes and the travel-time convention for edge weights
//!
//! Edge weight = segment length at the class speed + a fixed intersection delay,
//! in minutes. The A* heuristic uses the same minutes unit, with the fastest
//! class speed as its default, so it never overestimates on graphs built here.

use serde::{Deserialize, Serialize};

use crate::geo::minutes_at_speed;

/// Average delay added to every segment (~9 seconds)
pub const INTERSECTION_DELAY_MINUTES: f64 = 0.15;

/// OSM `highway=*` classes that carry traffic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadClass {
    Motorway,
    Trunk,
    Primary,
    Secondary,
    Tertiary,
    Residential,
    Service,
    Unclassified,
    LivingStreet,
}

impl RoadClass {
    pub fn all() -> &'static [RoadClass] {
        &[
            RoadClass::Motorway,
            RoadClass::Trunk,
            RoadClass::Primary,
            RoadClass::Secondary,
            RoadClass::Tertiary,
            RoadClass::Residential,
            RoadClass::Service,
            RoadClass::Unclassified,
            RoadClass::LivingStreet,
        ]
    }

    /// Realistic average speed in km/h, traffic and lights included
    pub fn speed_kmh(&self) -> f64 {
        match self {
            RoadClass::Motorway => 85.0,
            RoadClass::Trunk => 70.0,
            RoadClass::Primary => 45.0,
            RoadClass::Secondary => 35.0,
            RoadClass::Tertiary => 30.0,
            RoadClass::Residential => 20.0,
            RoadClass::Service => 15.0,
            RoadClass::Unclassified => 25.0,
            RoadClass::LivingStreet => 10.0,
        }
    }

    pub fn fastest_speed_kmh() -> f64 {
        Self::all()
            .iter()
            .map(RoadClass::speed_kmh)
            .fold(0.0, f64::max)
    }
}

/// Travel time in minutes for a segment of `distance_km` on a road of `class`
pub fn edge_minutes(distance_km: f64, class: RoadClass) -> f64 {
    minutes_at_speed(distance_km, class.speed_kmh()) + INTERSECTION_DELAY_MINUTES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fastest_speed_is_motorway() {
        assert_eq!(RoadClass::fastest_speed_kmh(), 85.0);
    }

    #[test]
    fn test_edge_minutes_includes_delay() {
        // 1 km of residential road at 20 km/h is 3 minutes
        let t = edge_minutes(1.0, RoadClass::Residential);
        assert!((t - 3.15).abs() < 1e-12);
        assert_eq!(edge_minutes(0.0, RoadClass::Motorway), INTERSECTION_DELAY_MINUTES);
    }

    #[test]
    fn test_edge_never_faster_than_fastest_class() {
        for class in RoadClass::all() {
            let t = edge_minutes(10.0, *class);
            assert!(t >= minutes_at_speed(10.0, RoadClass::fastest_speed_kmh()));
        }
    }

    #[test]
    fn test_class_names_deserialize() {
        let class: RoadClass = serde_json::from_str("\"living_street\"").unwrap();
        assert_eq!(class, RoadClass::LivingStreet);
    }
}
