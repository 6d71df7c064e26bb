//! Route planner.
//!
//! Answers: "how do I get from this coordinate to that one by rail?"
//!
//! Both coordinates are snapped to their nearest stations, a fresh graph is
//! built from the line routes, the K shortest loopless paths between the two
//! stations are found by deviation search, and each path is turned into a
//! walk/ride/change itinerary.

mod builder;
mod config;
mod ksp;
mod shortest_path;

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::cache::PathCache;
use crate::domain::{Coordinate, InvalidCoordinate, Itinerary};
use crate::graph::{GraphError, Path};
use crate::network::Network;

pub use builder::{RouteBuilder, RouteError};
pub use config::RouterConfig;
pub use ksp::{KShortestPaths, RankedPath, k_shortest_paths};
pub use shortest_path::shortest_path;

/// Error from route planning.
///
/// "No route" is not an error: disconnected stations and coordinates outside
/// the service area give an empty route list. Apart from a bad query
/// coordinate, these errors mean the network data or the search itself is
/// broken.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    /// Origin or destination is not a finite, in-range coordinate
    #[error(transparent)]
    InvalidCoordinate(#[from] InvalidCoordinate),

    /// Graph operation referenced a missing node
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// A path could not be turned into an itinerary
    #[error(transparent)]
    Route(#[from] RouteError),
}

/// A planned route: the itinerary, the stations it passes, and its length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    #[serde(flatten)]
    pub itinerary: Itinerary,
    pub path: Path,
    /// Total rail distance in km.
    pub distance_km: f64,
}

/// Route planner over a static network.
///
/// Each call to [`Planner::plan`] builds its own graph, so one planner can
/// serve concurrent queries.
pub struct Planner<'a> {
    network: &'a Network,
    config: &'a RouterConfig,
    cache: Option<&'a PathCache>,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(network: &'a Network, config: &'a RouterConfig) -> Self {
        Self {
            network,
            config,
            cache: None,
        }
    }

    /// Reuse paths computed by earlier queries.
    pub fn with_cache(mut self, cache: &'a PathCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Plan up to `k` routes from `origin` to `destination`, best first.
    ///
    /// Returns an empty list if either coordinate is further than the
    /// service radius from every station, or if no path connects the two
    /// nearest stations. Non-finite or out-of-range coordinates are an error.
    pub fn plan(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        k: usize,
    ) -> Result<Vec<Route>, PlanError> {
        origin.validate()?;
        destination.validate()?;

        let (Some(source), Some(dest)) = (
            self.network.nearest(origin),
            self.network.nearest(destination),
        ) else {
            return Ok(Vec::new());
        };

        let radius = self.config.service_radius_km;
        // NaN distances count as out of range
        if !(source.distance_km <= radius && dest.distance_km <= radius) {
            debug!(
                origin_km = source.distance_km,
                destination_km = dest.distance_km,
                radius_km = radius,
                "Out of service area"
            );
            return Ok(Vec::new());
        }

        debug!(
            source = %source.station,
            dest = %dest.station,
            k,
            "Planning routes"
        );

        let search = || -> Result<Vec<RankedPath>, GraphError> {
            let mut graph = self.network.build_graph()?;
            KShortestPaths::new(k)
                .with_spur_budget(self.config.max_spur_searches)
                .run(&mut graph, &source.station, &dest.station)
        };
        let paths = match self.cache {
            Some(cache) => cache.get_or_try_insert(&source.station, &dest.station, k, search)?,
            None => Arc::new(search()?),
        };

        let builder = RouteBuilder::new(self.network.index());
        paths
            .iter()
            .map(|ranked| -> Result<Route, PlanError> {
                let itinerary = builder.build(&ranked.path, &source, &dest)?;
                Ok(Route {
                    itinerary,
                    path: ranked.path.clone(),
                    distance_km: (ranked.weight * 1000.0).round() / 1000.0,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Endpoint, Step, StationId};
    use crate::network::tests::{cross_network, line};
    use std::collections::BTreeMap;

    fn c(lat: f64, lng: f64) -> Coordinate {
        Coordinate { lat, lng }
    }

    #[test]
    fn plans_across_a_change() {
        let net = cross_network();
        let config = RouterConfig::default();
        let routes = Planner::new(&net, &config)
            .plan(c(1.3, 103.8001), c(1.3099, 103.81), 3)
            .unwrap();

        assert_eq!(routes.len(), 1);
        let route = &routes[0];
        let names: Vec<&str> = route.path.stations().iter().map(StationId::as_str).collect();
        assert_eq!(names, vec!["a1", "x", "b2"]);
        assert_eq!(route.itinerary.change_count(), 1);
        assert!(route.distance_km > 2.0 && route.distance_km < 2.5);

        let steps = route.itinerary.steps();
        assert!(matches!(&steps[0], Step::Walk { from: Endpoint::Origin, .. }));
        assert!(matches!(
            steps.last(),
            Some(Step::Walk {
                to: Endpoint::Destination,
                ..
            })
        ));
    }

    #[test]
    fn out_of_service_area_is_empty() {
        let net = cross_network();
        let config = RouterConfig::default();
        // 0.054 degrees of latitude south of b1 is about 6 km
        let far = c(1.29 - 0.054, 103.81);
        let near = c(1.3, 103.81);

        let planner = Planner::new(&net, &config);
        assert!(planner.plan(far, near, 3).unwrap().is_empty());
        assert!(planner.plan(near, far, 3).unwrap().is_empty());
    }

    #[test]
    fn rejects_invalid_coordinates() {
        let net = cross_network();
        let config = RouterConfig::default();
        let planner = Planner::new(&net, &config);
        let near = c(1.3, 103.81);

        assert!(matches!(
            planner.plan(c(f64::NAN, 103.8), near, 3),
            Err(PlanError::InvalidCoordinate(_))
        ));
        assert!(matches!(
            planner.plan(near, c(1.3, f64::INFINITY), 3),
            Err(PlanError::InvalidCoordinate(_))
        ));
        assert!(matches!(
            planner.plan(near, c(-91.0, 103.8), 3),
            Err(PlanError::InvalidCoordinate(_))
        ));
    }

    #[test]
    fn radius_is_configurable() {
        let net = cross_network();
        let config = RouterConfig {
            service_radius_km: 10.0,
            ..RouterConfig::default()
        };
        let far = c(1.29 - 0.054, 103.81);
        let routes = Planner::new(&net, &config)
            .plan(far, c(1.31, 103.81), 3)
            .unwrap();
        assert_eq!(routes.len(), 1);
        assert!(matches!(
            &routes[0].itinerary.steps()[0],
            Step::Walk { distance, .. } if distance.ends_with(" km")
        ));
    }

    #[test]
    fn same_station_is_walk_only() {
        let net = cross_network();
        let config = RouterConfig::default();
        let routes = Planner::new(&net, &config)
            .plan(c(1.3, 103.8101), c(1.3, 103.8099), 3)
            .unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].itinerary.steps().len(), 2);
        assert_eq!(routes[0].distance_km, 0.0);
    }

    #[test]
    fn disconnected_stations_give_no_routes() {
        let stations: BTreeMap<_, _> = [
            ("a", 0.0, 0.0),
            ("b", 0.0, 0.01),
            ("c", 0.0, 0.03),
            ("d", 0.0, 0.04),
        ]
        .into_iter()
        .map(|(id, lat, lng)| (StationId::new(id), c(lat, lng)))
        .collect();
        let net = Network::new(stations, vec![line("L", &["a", "b"]), line("M", &["c", "d"])])
            .unwrap();
        let config = RouterConfig::default();

        let routes = Planner::new(&net, &config)
            .plan(c(0.0, 0.0), c(0.0, 0.04), 3)
            .unwrap();
        assert!(routes.is_empty());
    }

    #[test]
    fn uses_cache() {
        let net = cross_network();
        let config = RouterConfig::default();
        let cache = PathCache::new(&config);
        let planner = Planner::new(&net, &config).with_cache(&cache);

        let first = planner.plan(c(1.3, 103.8001), c(1.3099, 103.81), 3).unwrap();
        let second = planner.plan(c(1.3, 103.8002), c(1.3098, 103.81), 3).unwrap();
        assert_eq!(first[0].path, second[0].path);
        // Walk labels follow the new coordinates, not the cached ones
        assert_ne!(first[0].itinerary, second[0].itinerary);
    }
}
