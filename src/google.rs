//! Google Maps HTTP adapter for route and nearby place lookups.

use serde::Deserialize;

use crate::error::LookupError;
use crate::model::{GeoPoint, Place, Route, RouteLeg, RouteStep};
use crate::traits::{GeoLookup, NearbyQuery};

#[derive(Debug, Clone)]
pub struct GoogleMapsConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
    /// Result language, e.g. "en".
    pub language: Option<String>,
}

impl Default for GoogleMapsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://maps.googleapis.com".to_string(),
            api_key: String::new(),
            timeout_secs: 10,
            language: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GoogleMapsClient {
    config: GoogleMapsConfig,
    client: reqwest::blocking::Client,
}

impl GoogleMapsClient {
    /// Must be built outside an async runtime.
    pub fn new(config: GoogleMapsConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    #[cfg(test)]
    fn with_http_client(config: GoogleMapsConfig, client: reqwest::blocking::Client) -> Self {
        Self { config, client }
    }

    fn get<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, LookupError> {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        tracing::debug!(%url, ?params, "maps request");

        let mut request = self
            .client
            .get(url)
            .query(params)
            .query(&[("key", self.config.api_key.as_str())]);
        if let Some(language) = &self.config.language {
            request = request.query(&[("language", language.as_str())]);
        }

        let body = request.send()?.error_for_status()?.json::<T>()?;
        Ok(body)
    }
}

impl GeoLookup for GoogleMapsClient {
    fn route(&self, origin: &str, destination: &str) -> Result<Route, LookupError> {
        let body: DirectionsResponse = self.get(
            "/maps/api/directions/json",
            &[
                ("origin", origin.to_string()),
                ("destination", destination.to_string()),
            ],
        )?;
        route_from_directions(body)
    }

    fn nearby(&self, query: &NearbyQuery) -> Result<Vec<Place>, LookupError> {
        let mut params = vec![
            (
                "location",
                format!("{:.7},{:.7}", query.center.latitude, query.center.longitude),
            ),
            ("radius", query.radius_m.to_string()),
            ("type", query.category.as_str().to_string()),
        ];
        if let Some(keyword) = &query.keyword {
            params.push(("keyword", keyword.clone()));
        }

        let body: NearbyResponse = self.get("/maps/api/place/nearbysearch/json", &params)?;
        places_from_nearby(body)
    }
}

fn check_status(status: String, message: Option<String>) -> Result<bool, LookupError> {
    match status.as_str() {
        "OK" => Ok(true),
        "ZERO_RESULTS" => Ok(false),
        _ => Err(LookupError::Status { status, message }),
    }
}

/// Uses the first route; every leg's steps in order.
fn route_from_directions(body: DirectionsResponse) -> Result<Route, LookupError> {
    if !check_status(body.status, body.error_message)? {
        return Ok(Route::default());
    }

    let legs = body
        .routes
        .into_iter()
        .next()
        .map(|route| route.legs)
        .unwrap_or_default()
        .into_iter()
        .map(|leg| RouteLeg {
            steps: leg
                .steps
                .into_iter()
                .map(|step| RouteStep {
                    end_location: step.end_location.into(),
                })
                .collect(),
        })
        .collect();

    Ok(Route { legs })
}

fn places_from_nearby(body: NearbyResponse) -> Result<Vec<Place>, LookupError> {
    if !check_status(body.status, body.error_message)? {
        return Ok(Vec::new());
    }

    Ok(body
        .results
        .into_iter()
        .map(|result| Place {
            id: result.place_id,
            name: result.name,
            address: result.vicinity.unwrap_or_default(),
            location: result.geometry.location.into(),
        })
        .collect())
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl From<LatLng> for GeoPoint {
    fn from(value: LatLng) -> Self {
        GeoPoint::new(value.lat, value.lng)
    }
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    status: String,
    error_message: Option<String>,
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    #[serde(default)]
    legs: Vec<DirectionsLeg>,
}

#[derive(Debug, Deserialize)]
struct DirectionsLeg {
    #[serde(default)]
    steps: Vec<DirectionsStep>,
}

#[derive(Debug, Deserialize)]
struct DirectionsStep {
    end_location: LatLng,
}

#[derive(Debug, Deserialize)]
struct NearbyResponse {
    status: String,
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<NearbyResult>,
}

#[derive(Debug, Deserialize)]
struct NearbyResult {
    place_id: String,
    name: String,
    vicinity: Option<String>,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}
