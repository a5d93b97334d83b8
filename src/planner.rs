//! Ranking pipeline entry point.
//!
//! route lookup -> waypoints -> station search + dedup -> restaurant search +
//! scoring -> sort, truncate and rank.

use crate::error::PlanError;
use crate::format::{DEFAULT_MAX_RESULTS, EcoRouteResponse, to_response, top_ranked};
use crate::ranker::{RankOptions, rank_stations};
use crate::stations::locate_stations;
use crate::traits::GeoLookup;
use crate::waypoints::extract_waypoints;

/// One trip to rank stations for.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRequest {
    pub origin: String,
    pub destination: String,
    pub food_preference: String,
    /// Single-charge range, used as the station search radius.
    pub ev_range_m: u32,
}

#[derive(Debug, Clone)]
pub struct PlanOptions {
    pub max_results: usize,
    /// Restaurant search and scoring; `rank.parallel` also governs the
    /// station search fan-out.
    pub rank: RankOptions,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            rank: RankOptions::default(),
        }
    }
}

/// Ranks charging stations along the route by how close matching
/// restaurants are.
///
/// Any lookup failure aborts the whole request. No qualifying stations is
/// not an error and yields an empty result list.
#[tracing::instrument(
    skip_all,
    fields(origin = %request.origin, destination = %request.destination, food = %request.food_preference)
)]
pub fn plan<L: GeoLookup + ?Sized>(
    request: &PlanRequest,
    lookup: &L,
    options: &PlanOptions,
) -> Result<EcoRouteResponse, PlanError> {
    let route = lookup
        .route(&request.origin, &request.destination)
        .map_err(|err| {
            tracing::warn!(error = %err, "route lookup failed");
            PlanError::Route(err)
        })?;

    let waypoints = extract_waypoints(&route);
    tracing::info!(waypoints = waypoints.len(), "route resolved");

    let stations = locate_stations(lookup, &waypoints, request.ev_range_m, options.rank.parallel)?;
    tracing::info!(unique_stations = stations.len(), "stations deduplicated");

    let ranked = rank_stations(lookup, stations, &request.food_preference, &options.rank)?;
    tracing::info!(qualifying = ranked.len(), "stations scored");

    let top = top_ranked(ranked, options.max_results);
    Ok(to_response(top))
}
