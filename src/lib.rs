//! eco-route core
//!
//! Ranks EV charging stations along a driving route by how close
//! restaurants matching a food preference are to each station.

pub mod config;
pub mod error;
pub mod format;
pub mod google;
pub mod haversine;
pub mod model;
pub mod planner;
pub mod ranker;
pub mod service;
pub mod stations;
pub mod traits;
pub mod waypoints;
