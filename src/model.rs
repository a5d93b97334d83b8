//! Domain values flowing through the ranking pipeline.
//!
//! Everything here is created per request and dropped once the response has
//! been formatted.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// A driving route as returned by a route lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Route {
    pub legs: Vec<RouteLeg>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteLeg {
    pub steps: Vec<RouteStep>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteStep {
    pub end_location: GeoPoint,
}

impl Route {
    /// Single-leg route whose steps end at the given points.
    pub fn from_step_ends(points: impl IntoIterator<Item = GeoPoint>) -> Self {
        let steps = points
            .into_iter()
            .map(|end_location| RouteStep { end_location })
            .collect();
        Self {
            legs: vec![RouteLeg { steps }],
        }
    }
}

/// A place record returned by a nearby search.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub id: String,
    pub name: String,
    pub address: String,
    pub location: GeoPoint,
}

/// An EV charging location. Identity is `id`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargingStation {
    pub id: String,
    pub name: String,
    pub address: String,
    pub location: GeoPoint,
}

impl From<Place> for ChargingStation {
    fn from(place: Place) -> Self {
        Self {
            id: place.id,
            name: place.name,
            address: place.address,
            location: place.location,
        }
    }
}

/// A restaurant found near a station, with its distance to that station.
#[derive(Debug, Clone, PartialEq)]
pub struct Restaurant {
    pub name: String,
    pub address: String,
    pub location: GeoPoint,
    /// Great-circle distance to the station in meters.
    pub distance: f64,
}

/// A station that qualified for ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedStation {
    pub station: ChargingStation,
    /// Discovery order, not re-sorted.
    pub restaurants: Vec<Restaurant>,
    pub relevance_score: f64,
    /// 1-based; zero until the formatter assigns it.
    pub rank: usize,
}
