//! Turning station paths into walk/ride/change itineraries.

use crate::domain::{Endpoint, InvalidItinerary, Itinerary, LineId, StationId, Step};
use crate::graph::Path;
use crate::network::{Snap, StationLineIndex, format_distance};

/// Errors from itinerary construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RouteError {
    /// Two consecutive stations on a path share no line
    #[error("inconsistent network: no line serves both {from} and {to}")]
    InconsistentNetwork { from: StationId, to: StationId },

    /// Path has no stations
    #[error("cannot build an itinerary from an empty path")]
    EmptyPath,

    /// Built steps violate the itinerary shape
    #[error(transparent)]
    Invalid(#[from] InvalidItinerary),
}

/// Builds itineraries from paths using the station → line index.
///
/// A ride continues for as long as its line serves both ends of the next
/// hop. When it does not, the rider changes at the current station. Where
/// several lines serve a hop, the builder picks the one that serves the
/// longest run of the path from there, falling back to index order on
/// ties; this keeps changes to a minimum.
#[derive(Debug, Clone, Copy)]
pub struct RouteBuilder<'a> {
    index: &'a StationLineIndex,
}

impl<'a> RouteBuilder<'a> {
    /// Create a builder over a station → line index.
    pub fn new(index: &'a StationLineIndex) -> Self {
        Self { index }
    }

    /// Build the itinerary for `path`.
    ///
    /// `source` and `dest` are the snaps of the rider's coordinates onto
    /// the first and last stations; their distances label the walks.
    pub fn build(&self, path: &Path, source: &Snap, dest: &Snap) -> Result<Itinerary, RouteError> {
        let stations = path.stations();
        let (Some(first), Some(last)) = (stations.first(), stations.last()) else {
            return Err(RouteError::EmptyPath);
        };

        let mut steps = vec![Step::Walk {
            from: Endpoint::Origin,
            to: Endpoint::Station(first.clone()),
            distance: format_distance(source.distance_km),
        }];

        if stations.len() > 1 {
            let end = stations.len() - 1;
            let mut start = 0;
            let mut line = self.pick_line(stations, 0)?;

            for i in 1..end {
                let (here, next) = (&stations[i], &stations[i + 1]);
                if self.index.serves(here, line) && self.index.serves(next, line) {
                    continue;
                }

                let new_line = self.pick_line(stations, i)?;
                steps.push(ride(line, stations, start, i));
                steps.push(Step::Change {
                    station: here.clone(),
                    from_line: line.clone(),
                    to_line: new_line.clone(),
                });
                line = new_line;
                start = i;
            }

            steps.push(ride(line, stations, start, end));
        }

        steps.push(Step::Walk {
            from: Endpoint::Station(last.clone()),
            to: Endpoint::Destination,
            distance: format_distance(dest.distance_km),
        });

        Ok(Itinerary::new(steps)?)
    }

    /// Choose the line for the hop `stations[i] -> stations[i + 1]`.
    fn pick_line(&self, stations: &[StationId], i: usize) -> Result<&'a LineId, RouteError> {
        let (from, to) = (&stations[i], &stations[i + 1]);
        self.index
            .common_lines(from, to)
            .into_iter()
            .min_by_key(|line| std::cmp::Reverse(self.run_length(stations, i, line)))
            .ok_or_else(|| RouteError::InconsistentNetwork {
                from: from.clone(),
                to: to.clone(),
            })
    }

    /// Number of consecutive hops from `i` that `line` serves at both ends.
    fn run_length(&self, stations: &[StationId], i: usize, line: &LineId) -> usize {
        stations[i..]
            .windows(2)
            .take_while(|hop| self.index.serves(&hop[0], line) && self.index.serves(&hop[1], line))
            .count()
    }
}

fn ride(line: &LineId, stations: &[StationId], start: usize, end: usize) -> Step {
    Step::Ride {
        line: line.clone(),
        from: stations[start].clone(),
        to: stations[end].clone(),
        stations_passed: end - start - 1,
    }
}
