//! Network data error types.

use std::path::PathBuf;

use crate::domain::{InvalidCoordinate, LineId, StationId};

/// Errors from loading or validating network data.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// Failed to read the network file
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Network file is not valid JSON for the expected shape
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A station has an empty identifier
    #[error("station identifiers must not be empty")]
    EmptyStationId,

    /// A station coordinate is out of range
    #[error("station {station}: {source}")]
    InvalidCoordinate {
        station: StationId,
        source: InvalidCoordinate,
    },

    /// A line has no stations
    #[error("line {0} has an empty route")]
    EmptyRoute(LineId),

    /// A line route names a station not in the station table
    #[error("line {line} references unknown station {station}")]
    UnknownStation { line: LineId, station: StationId },

    /// A line route lists the same station twice in a row
    #[error("line {line} repeats station {station} consecutively")]
    RepeatedStation { line: LineId, station: StationId },
}
