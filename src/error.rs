//! Error types for lookups and the ranking pipeline.

use std::fmt;

use crate::model::GeoPoint;

/// A failure from the external geo lookup.
#[derive(Debug)]
pub enum LookupError {
    /// The request never produced a response (connect, timeout, TLS...).
    Transport(reqwest::Error),
    /// The service answered with a non-success HTTP status.
    Http { status: u16 },
    /// The service answered, but reported an API-level error status.
    Status { status: String, message: Option<String> },
    /// The response body could not be decoded.
    Decode(String),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::Transport(err) => write!(f, "lookup request failed: {err}"),
            LookupError::Http { status } => write!(f, "lookup returned HTTP {status}"),
            LookupError::Status {
                status,
                message: Some(message),
            } => write!(f, "lookup returned status {status}: {message}"),
            LookupError::Status {
                status,
                message: None,
            } => write!(f, "lookup returned status {status}"),
            LookupError::Decode(detail) => write!(f, "invalid lookup response: {detail}"),
        }
    }
}

impl std::error::Error for LookupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LookupError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for LookupError {
    /// Strips the request URL, which carries the API key.
    fn from(err: reqwest::Error) -> Self {
        let err = err.without_url();
        if err.is_decode() {
            LookupError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            LookupError::Http {
                status: status.as_u16(),
            }
        } else {
            LookupError::Transport(err)
        }
    }
}

/// A ranking request aborted by a lookup failure, tagged with the stage that
/// failed. No partial results survive.
#[derive(Debug)]
pub enum PlanError {
    Route(LookupError),
    StationSearch {
        waypoint: GeoPoint,
        source: LookupError,
    },
    RestaurantSearch {
        station_id: String,
        source: LookupError,
    },
}

impl PlanError {
    pub fn lookup(&self) -> &LookupError {
        match self {
            PlanError::Route(source)
            | PlanError::StationSearch { source, .. }
            | PlanError::RestaurantSearch { source, .. } => source,
        }
    }
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::Route(err) => write!(f, "route lookup failed: {err}"),
            PlanError::StationSearch { waypoint, source } => write!(
                f,
                "station search near ({:.6}, {:.6}) failed: {source}",
                waypoint.latitude, waypoint.longitude
            ),
            PlanError::RestaurantSearch { station_id, source } => {
                write!(f, "restaurant search for station {station_id} failed: {source}")
            }
        }
    }
}

impl std::error::Error for PlanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.lookup())
    }
}
