//! Network data file format.
//!
//! ```json
//! {
//!   "stations": { "bugis": { "lat": 1.3009, "lng": 103.8559 } },
//!   "lines": { "EW": { "color": "#009645", "route": ["bugis", "..."] } }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use super::{Line, Network, NetworkError};
use crate::domain::{Coordinate, LineId, StationId};

#[derive(Debug, Deserialize)]
struct NetworkFile {
    stations: BTreeMap<StationId, Coordinate>,
    lines: BTreeMap<LineId, LineRecord>,
}

#[derive(Debug, Deserialize)]
struct LineRecord {
    #[serde(default)]
    color: String,
    route: Vec<StationId>,
}

impl Network {
    /// Parse and validate a network from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, NetworkError> {
        let file: NetworkFile = serde_json::from_str(json)?;
        let lines = file
            .lines
            .into_iter()
            .map(|(id, record)| Line {
                id,
                color: record.color,
                route: record.route,
            })
            .collect();
        Network::new(file.stations, lines)
    }

    /// Read a network from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, NetworkError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| NetworkError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let network = Self::from_json(&json)?;
        info!(
            path = %path.display(),
            stations = network.station_count(),
            lines = network.lines().len(),
            "Loaded network"
        );
        Ok(network)
    }
}
