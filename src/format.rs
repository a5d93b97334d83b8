//! Final ordering and the serialisable response shape.

use serde::{Deserialize, Serialize};

use crate::model::{GeoPoint, RankedStation};

/// Number of stations returned by default.
pub const DEFAULT_MAX_RESULTS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EcoRouteResponse {
    pub results: Vec<RankedResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub rank: usize,
    pub relevance_score: f64,
    #[serde(rename = "ev_station")]
    pub station: StationSummary,
    pub restaurants: Vec<RestaurantSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationSummary {
    pub name: String,
    pub address: String,
    pub location: GeoPoint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantSummary {
    pub name: String,
    pub address: String,
    pub location: GeoPoint,
    pub distance: f64,
}

/// Orders stations by score (highest first), keeps the top `max_results`
/// and assigns ranks `1..=K`.
///
/// The sort is stable, so equal scores keep their incoming order.
pub fn top_ranked(mut ranked: Vec<RankedStation>, max_results: usize) -> Vec<RankedStation> {
    ranked.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
    ranked.truncate(max_results);
    for (index, entry) in ranked.iter_mut().enumerate() {
        entry.rank = index + 1;
    }
    ranked
}

/// Projects ranked stations onto the response shape.
pub fn to_response(ranked: Vec<RankedStation>) -> EcoRouteResponse {
    let results = ranked
        .into_iter()
        .map(|entry| RankedResult {
            rank: entry.rank,
            relevance_score: entry.relevance_score,
            station: StationSummary {
                name: entry.station.name,
                address: entry.station.address,
                location: entry.station.location,
            },
            restaurants: entry
                .restaurants
                .into_iter()
                .map(|r| RestaurantSummary {
                    name: r.name,
                    address: r.address,
                    location: r.location,
                    distance: r.distance,
                })
                .collect(),
        })
        .collect();

    EcoRouteResponse { results }
}
