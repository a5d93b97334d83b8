//! Waypoint extraction from a driving route.

use crate::model::{GeoPoint, Route};

/// Flattens a route into the end location of every step, across all legs,
/// in traversal order.
///
/// Repeated points are kept; an empty route yields no waypoints.
pub fn extract_waypoints(route: &Route) -> Vec<GeoPoint> {
    route
        .legs
        .iter()
        .flat_map(|leg| leg.steps.iter())
        .map(|step| step.end_location)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RouteLeg, RouteStep};

    fn leg(points: &[(f64, f64)]) -> RouteLeg {
        RouteLeg {
            steps: points
                .iter()
                .map(|&(lat, lng)| RouteStep {
                    end_location: GeoPoint::new(lat, lng),
                })
                .collect(),
        }
    }

    #[test]
    fn test_single_leg_in_order() {
        let route = Route {
            legs: vec![leg(&[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)])],
        };
        let waypoints = extract_waypoints(&route);
        assert_eq!(
            waypoints,
            vec![
                GeoPoint::new(1.0, 1.0),
                GeoPoint::new(2.0, 2.0),
                GeoPoint::new(3.0, 3.0)
            ]
        );
    }

    #[test]
    fn test_legs_are_flattened_in_order() {
        let route = Route {
            legs: vec![leg(&[(1.0, 0.0)]), leg(&[(2.0, 0.0), (3.0, 0.0)])],
        };
        let lats: Vec<f64> = extract_waypoints(&route).iter().map(|p| p.latitude).collect();
        assert_eq!(lats, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let route = Route {
            legs: vec![leg(&[(5.0, 5.0), (5.0, 5.0)])],
        };
        assert_eq!(extract_waypoints(&route).len(), 2);
    }

    #[test]
    fn test_empty_route() {
        assert!(extract_waypoints(&Route::default()).is_empty());
        let no_steps = Route {
            legs: vec![RouteLeg::default(), RouteLeg::default()],
        };
        assert!(extract_waypoints(&no_steps).is_empty());
    }
}
