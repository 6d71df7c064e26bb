//! Station → line index.

use std::collections::HashMap;

use super::Line;
use crate::domain::{LineId, StationId};

/// Lines serving each station.
///
/// For each station the lines are listed in the order they were given to
/// [`StationLineIndex::from_lines`], without duplicates (a loop line that
/// passes a station twice is listed once).
#[derive(Debug, Clone, Default)]
pub struct StationLineIndex {
    lines: HashMap<StationId, Vec<LineId>>,
}

impl StationLineIndex {
    /// Build the index from line routes.
    pub fn from_lines(lines: &[Line]) -> Self {
        let mut index: HashMap<StationId, Vec<LineId>> = HashMap::new();
        for line in lines {
            for station in &line.route {
                let serving = index.entry(station.clone()).or_default();
                if !serving.contains(&line.id) {
                    serving.push(line.id.clone());
                }
            }
        }
        Self { lines: index }
    }

    /// Returns the lines serving a station (empty if none).
    pub fn lines_at(&self, station: &StationId) -> &[LineId] {
        self.lines.get(station).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns true if `line` serves `station`.
    pub fn serves(&self, station: &StationId, line: &LineId) -> bool {
        self.lines_at(station).contains(line)
    }

    /// Lines serving both stations, in the order listed for `a`.
    pub fn common_lines<'a>(&'a self, a: &StationId, b: &StationId) -> Vec<&'a LineId> {
        let at_b = self.lines_at(b);
        self.lines_at(a)
            .iter()
            .filter(|line| at_b.contains(*line))
            .collect()
    }

    /// Returns the number of indexed stations.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if no station is indexed.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
