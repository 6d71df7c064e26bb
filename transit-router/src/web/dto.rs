//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, LineId, StationId};
use crate::network::{Line, Network};
use crate::planner::Route;

/// Request to plan routes between two coordinates.
#[derive(Debug, Deserialize)]
pub struct PlanRoutesRequest {
    /// Where the rider starts
    pub origin: Coordinate,

    /// Where the rider wants to go
    pub destination: Coordinate,

    /// Number of alternative routes (defaults to the configured value)
    pub k: Option<usize>,
}

/// Response for route planning.
#[derive(Debug, Serialize)]
pub struct PlanRoutesResponse {
    /// Routes, best first. Empty if out of service area or unreachable.
    pub routes: Vec<Route>,
}

/// A station in the network listing.
#[derive(Debug, Serialize)]
pub struct StationResult {
    pub id: StationId,
    pub lat: f64,
    pub lng: f64,
    /// Lines serving this station
    pub lines: Vec<LineId>,
}

/// Response listing all stations.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub stations: Vec<StationResult>,
}

impl StationsResponse {
    /// Build the listing from a network, in station identifier order.
    pub fn from_network(network: &Network) -> Self {
        let stations = network
            .stations()
            .map(|(id, coord)| StationResult {
                id: id.clone(),
                lat: coord.lat,
                lng: coord.lng,
                lines: network.index().lines_at(id).to_vec(),
            })
            .collect();
        Self { stations }
    }
}

/// A line in the network listing.
#[derive(Debug, Serialize)]
pub struct LineResult {
    pub id: LineId,
    pub color: String,
    /// Stations in route order
    pub stations: Vec<StationId>,
}

impl LineResult {
    /// Convert a network line.
    pub fn from_line(line: &Line) -> Self {
        Self {
            id: line.id.clone(),
            color: line.color.clone(),
            stations: line.route.clone(),
        }
    }
}

/// Response listing all lines.
#[derive(Debug, Serialize)]
pub struct LinesResponse {
    pub lines: Vec<LineResult>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
