//! The geo lookup seam.
//!
//! The ranking pipeline never talks to a maps vendor directly. It calls the
//! two operations below, so a scripted implementation can stand in for the
//! real service in tests.

use crate::error::LookupError;
use crate::model::{GeoPoint, Place, Route};

/// Kind of place a nearby search asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceCategory {
    ChargingStation,
    Restaurant,
}

impl PlaceCategory {
    /// Place type name on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            PlaceCategory::ChargingStation => "charging_station",
            PlaceCategory::Restaurant => "restaurant",
        }
    }
}

/// A radius search around a point.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyQuery {
    pub center: GeoPoint,
    pub radius_m: u32,
    pub category: PlaceCategory,
    pub keyword: Option<String>,
}

/// Route and place lookups backing the planner.
///
/// Implementations are shared across worker threads during fan-out.
pub trait GeoLookup: Send + Sync {
    /// Driving route between two free-form locations.
    fn route(&self, origin: &str, destination: &str) -> Result<Route, LookupError>;

    /// Places of a category within a radius, in the order the source ranks them.
    fn nearby(&self, query: &NearbyQuery) -> Result<Vec<Place>, LookupError>;
}
