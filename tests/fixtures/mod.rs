//! Test fixtures for eco-route.
//!
//! Provides a scripted in-memory `GeoLookup` that answers from canned data
//! and records every nearby query it receives.

use std::sync::Mutex;

use eco_route::error::LookupError;
use eco_route::haversine::EARTH_RADIUS_M;
use eco_route::model::{GeoPoint, Place, Route};
use eco_route::traits::{GeoLookup, NearbyQuery, PlaceCategory};

/// A point on the equator `meters` east of `origin`'s longitude.
pub fn east_of(origin: GeoPoint, meters: f64) -> GeoPoint {
    GeoPoint::new(0.0, origin.longitude + (meters / EARTH_RADIUS_M).to_degrees())
}

pub fn place(id: &str, name: &str, location: GeoPoint) -> Place {
    Place {
        id: id.to_string(),
        name: name.to_string(),
        address: format!("{name} address"),
        location,
    }
}

/// Builder for a scripted lookup with sensible defaults (empty route, no
/// places anywhere).
#[derive(Default)]
pub struct ScriptedLookup {
    route: Route,
    fail_route: bool,
    stations: Vec<(GeoPoint, Vec<Place>)>,
    restaurants: Vec<(GeoPoint, Vec<Place>)>,
    failing_centers: Vec<GeoPoint>,
    queries: Mutex<Vec<NearbyQuery>>,
}

impl ScriptedLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route_through(mut self, points: &[GeoPoint]) -> Self {
        self.route = Route::from_step_ends(points.iter().copied());
        self
    }

    pub fn with_route(mut self, route: Route) -> Self {
        self.route = route;
        self
    }

    pub fn failing_route(mut self) -> Self {
        self.fail_route = true;
        self
    }

    pub fn stations_near(mut self, waypoint: GeoPoint, stations: Vec<Place>) -> Self {
        self.stations.push((waypoint, stations));
        self
    }

    pub fn restaurants_near(mut self, station: GeoPoint, restaurants: Vec<Place>) -> Self {
        self.restaurants.push((station, restaurants));
        self
    }

    /// Any nearby search centered here fails.
    pub fn failing_at(mut self, center: GeoPoint) -> Self {
        self.failing_centers.push(center);
        self
    }

    pub fn queries(&self, category: PlaceCategory) -> Vec<NearbyQuery> {
        self.queries
            .lock()
            .unwrap()
            .iter()
            .filter(|q| q.category == category)
            .cloned()
            .collect()
    }
}

fn canned(entries: &[(GeoPoint, Vec<Place>)], center: GeoPoint) -> Vec<Place> {
    entries
        .iter()
        .filter(|(point, _)| *point == center)
        .flat_map(|(_, places)| places.iter().cloned())
        .collect()
}

impl GeoLookup for ScriptedLookup {
    fn route(&self, _origin: &str, _destination: &str) -> Result<Route, LookupError> {
        if self.fail_route {
            return Err(LookupError::Http { status: 503 });
        }
        Ok(self.route.clone())
    }

    fn nearby(&self, query: &NearbyQuery) -> Result<Vec<Place>, LookupError> {
        self.queries.lock().unwrap().push(query.clone());

        if self.failing_centers.contains(&query.center) {
            return Err(LookupError::Status {
                status: "OVER_QUERY_LIMIT".to_string(),
                message: None,
            });
        }

        Ok(match query.category {
            PlaceCategory::ChargingStation => canned(&self.stations, query.center),
            PlaceCategory::Restaurant => canned(&self.restaurants, query.center),
        })
    }
}
