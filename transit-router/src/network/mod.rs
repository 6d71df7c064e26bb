//! Static rail network data.
//!
//! Stations with their coordinates and lines with their ordered routes,
//! loaded once at startup and shared read-only between queries.

mod error;
mod geo;
mod index;
mod load;

use std::collections::BTreeMap;

use crate::domain::{Coordinate, LineId, StationId};
use crate::graph::{GraphError, WeightedGraph};

pub use error::NetworkError;
pub use geo::{distance_km, format_distance};
pub use index::StationLineIndex;

/// A line and the stations it serves, in route order.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub id: LineId,
    /// Display colour, as given in the network data (e.g. `"#009645"`).
    pub color: String,
    pub route: Vec<StationId>,
}

/// The station a coordinate snaps to, and how far away it is.
#[derive(Debug, Clone, PartialEq)]
pub struct Snap {
    pub station: StationId,
    pub distance_km: f64,
}

/// Immutable network of stations and lines.
///
/// Construction validates that every line route is non-empty, references
/// only known stations, and never repeats a station back-to-back.
#[derive(Debug, Clone)]
pub struct Network {
    stations: BTreeMap<StationId, Coordinate>,
    lines: Vec<Line>,
    index: StationLineIndex,
}

impl Network {
    /// Build a network from station and line tables.
    ///
    /// Lines are kept in identifier order.
    pub fn new(
        stations: BTreeMap<StationId, Coordinate>,
        mut lines: Vec<Line>,
    ) -> Result<Self, NetworkError> {
        for (id, coord) in &stations {
            if id.is_empty() {
                return Err(NetworkError::EmptyStationId);
            }
            coord
                .validate()
                .map_err(|source| NetworkError::InvalidCoordinate {
                    station: id.clone(),
                    source,
                })?;
        }

        for line in &lines {
            if line.route.is_empty() {
                return Err(NetworkError::EmptyRoute(line.id.clone()));
            }
            for station in &line.route {
                if !stations.contains_key(station) {
                    return Err(NetworkError::UnknownStation {
                        line: line.id.clone(),
                        station: station.clone(),
                    });
                }
            }
            if let Some(pair) = line.route.windows(2).find(|w| w[0] == w[1]) {
                return Err(NetworkError::RepeatedStation {
                    line: line.id.clone(),
                    station: pair[0].clone(),
                });
            }
        }

        lines.sort_by(|a, b| a.id.cmp(&b.id));
        let index = StationLineIndex::from_lines(&lines);

        Ok(Self {
            stations,
            lines,
            index,
        })
    }

    /// Returns the coordinate of a station.
    pub fn station(&self, id: &StationId) -> Option<Coordinate> {
        self.stations.get(id).copied()
    }

    /// Iterate stations in identifier order.
    pub fn stations(&self) -> impl Iterator<Item = (&StationId, Coordinate)> {
        self.stations.iter().map(|(id, c)| (id, *c))
    }

    /// Returns the lines in identifier order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Returns the station → lines index.
    pub fn index(&self) -> &StationLineIndex {
        &self.index
    }

    /// Returns the number of stations.
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Find the station closest to a coordinate.
    ///
    /// Linear scan over every station. Ties go to the smallest identifier.
    /// Returns `None` only for a network without stations.
    pub fn nearest(&self, location: Coordinate) -> Option<Snap> {
        let mut best: Option<Snap> = None;
        for (id, coord) in &self.stations {
            let d = distance_km(*coord, location);
            if best.as_ref().is_none_or(|b| d < b.distance_km) {
                best = Some(Snap {
                    station: id.clone(),
                    distance_km: d,
                });
            }
        }
        best
    }

    /// Build a fresh search graph.
    ///
    /// Every station becomes a node; consecutive stations on each line are
    /// joined by an edge weighted with their great-circle distance in km.
    pub fn build_graph(&self) -> Result<WeightedGraph, GraphError> {
        let mut graph = WeightedGraph::new();
        for id in self.stations.keys() {
            graph.add_node(id);
        }

        for line in &self.lines {
            for hop in line.route.windows(2) {
                let (a, b) = (&hop[0], &hop[1]);
                let (Some(ca), Some(cb)) = (self.station(a), self.station(b)) else {
                    return Err(GraphError::InvalidNode(a.clone()));
                };
                graph.add_edge(a, b, distance_km(ca, cb))?;
            }
        }

        Ok(graph)
    }
}
