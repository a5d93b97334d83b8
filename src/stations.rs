//! Charging station discovery along a route.

use std::collections::HashMap;

use rayon::prelude::*;

use crate::error::PlanError;
use crate::model::{ChargingStation, GeoPoint, Place};
use crate::traits::{GeoLookup, NearbyQuery, PlaceCategory};

/// Searches for charging stations within `ev_range_m` of every waypoint and
/// returns the deduplicated set.
///
/// The first failing search aborts discovery. With `parallel` set the
/// searches fan out over the rayon pool; results are reassembled in waypoint
/// order either way.
pub fn locate_stations<L: GeoLookup + ?Sized>(
    lookup: &L,
    waypoints: &[GeoPoint],
    ev_range_m: u32,
    parallel: bool,
) -> Result<Vec<ChargingStation>, PlanError> {
    let search = |waypoint: &GeoPoint| search_waypoint(lookup, *waypoint, ev_range_m);

    let per_waypoint: Vec<Vec<Place>> = if parallel {
        waypoints.par_iter().map(search).collect::<Result<_, _>>()?
    } else {
        waypoints.iter().map(search).collect::<Result<_, _>>()?
    };

    let candidates: Vec<ChargingStation> = per_waypoint
        .into_iter()
        .flatten()
        .map(ChargingStation::from)
        .collect();
    tracing::info!(
        waypoints = waypoints.len(),
        candidates = candidates.len(),
        "station search complete"
    );

    Ok(dedup_stations(candidates))
}

fn search_waypoint<L: GeoLookup + ?Sized>(
    lookup: &L,
    waypoint: GeoPoint,
    ev_range_m: u32,
) -> Result<Vec<Place>, PlanError> {
    let query = NearbyQuery {
        center: waypoint,
        radius_m: ev_range_m,
        category: PlaceCategory::ChargingStation,
        keyword: None,
    };
    lookup.nearby(&query).map_err(|source| {
        tracing::warn!(
            lat = waypoint.latitude,
            lng = waypoint.longitude,
            error = %source,
            "station search failed"
        );
        PlanError::StationSearch { waypoint, source }
    })
}

/// Collapses stations sharing an id into one record.
///
/// The surviving record is the last one seen for that id; it takes the
/// position where the id first appeared.
pub fn dedup_stations(candidates: Vec<ChargingStation>) -> Vec<ChargingStation> {
    let mut slot_by_id: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<ChargingStation> = Vec::new();

    for station in candidates {
        match slot_by_id.get(&station.id) {
            Some(&slot) => unique[slot] = station,
            None => {
                slot_by_id.insert(station.id.clone(), unique.len());
                unique.push(station);
            }
        }
    }

    unique
}
