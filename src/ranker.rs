//! Restaurant lookup and relevance scoring per station.

use rayon::prelude::*;

use crate::error::PlanError;
use crate::haversine::distance_m;
use crate::model::{ChargingStation, Place, RankedStation, Restaurant};
use crate::traits::{GeoLookup, NearbyQuery, PlaceCategory};

/// Scoring parameters for [`rank_stations`].
#[derive(Debug, Clone)]
pub struct RankOptions {
    /// Search radius around each station in meters.
    pub restaurant_radius_m: u32,
    /// Stand-in distance for a restaurant exactly at the station.
    pub zero_distance_floor_m: f64,
    /// Fan lookups out over the rayon pool.
    pub parallel: bool,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            restaurant_radius_m: 500,
            zero_distance_floor_m: 0.0001,
            parallel: true,
        }
    }
}

/// Looks up restaurants matching `food_preference` near each station and
/// scores the station.
///
/// Stations without a single matching restaurant are dropped. Output keeps
/// the input station order. The first failing lookup aborts ranking.
pub fn rank_stations<L: GeoLookup + ?Sized>(
    lookup: &L,
    stations: Vec<ChargingStation>,
    food_preference: &str,
    options: &RankOptions,
) -> Result<Vec<RankedStation>, PlanError> {
    let evaluate = |station: ChargingStation| {
        evaluate_station(lookup, station, food_preference, options)
    };

    let evaluated: Vec<Option<RankedStation>> = if options.parallel {
        stations.into_par_iter().map(evaluate).collect::<Result<_, _>>()?
    } else {
        stations.into_iter().map(evaluate).collect::<Result<_, _>>()?
    };

    Ok(evaluated.into_iter().flatten().collect())
}

fn evaluate_station<L: GeoLookup + ?Sized>(
    lookup: &L,
    station: ChargingStation,
    food_preference: &str,
    options: &RankOptions,
) -> Result<Option<RankedStation>, PlanError> {
    let query = NearbyQuery {
        center: station.location,
        radius_m: options.restaurant_radius_m,
        category: PlaceCategory::Restaurant,
        keyword: Some(food_preference.to_string()),
    };

    let places = match lookup.nearby(&query) {
        Ok(places) => places,
        Err(source) => {
            tracing::warn!(station = %station.id, error = %source, "restaurant search failed");
            return Err(PlanError::RestaurantSearch {
                station_id: station.id,
                source,
            });
        }
    };

    if places.is_empty() {
        tracing::debug!(station = %station.id, "no matching restaurants, skipping");
        return Ok(None);
    }

    let restaurants = places_to_restaurants(&station, places);
    let relevance_score = relevance_score(&restaurants, options.zero_distance_floor_m);

    Ok(Some(RankedStation {
        station,
        restaurants,
        relevance_score,
        rank: 0,
    }))
}

fn places_to_restaurants(station: &ChargingStation, places: Vec<Place>) -> Vec<Restaurant> {
    places
        .into_iter()
        .map(|place| Restaurant {
            distance: distance_m(station.location, place.location),
            name: place.name,
            address: place.address,
            location: place.location,
        })
        .collect()
}

/// Sum of inverse distances, with `floor_m` substituted for zero distances.
pub fn relevance_score(restaurants: &[Restaurant], floor_m: f64) -> f64 {
    restaurants
        .iter()
        .map(|r| {
            let effective = if r.distance != 0.0 { r.distance } else { floor_m };
            1.0 / effective
        })
        .sum()
}
