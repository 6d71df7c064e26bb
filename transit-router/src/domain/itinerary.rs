//! Itinerary types.
//!
//! An `Itinerary` is the rider-facing decomposition of a path through the
//! network: walk to the first station, ride one or more lines with changes
//! in between, then walk to the destination.

use serde::{Serialize, Serializer};

use super::{LineId, StationId};

/// One end of a walk step.
///
/// Serializes as `"origin"`, `"destination"` or the station identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// The rider's starting coordinate.
    Origin,
    /// The rider's target coordinate.
    Destination,
    /// A station in the network.
    Station(StationId),
}

impl Endpoint {
    /// Returns the serialized label of this endpoint.
    pub fn as_str(&self) -> &str {
        match self {
            Endpoint::Origin => "origin",
            Endpoint::Destination => "destination",
            Endpoint::Station(id) => id.as_str(),
        }
    }
}

impl Serialize for Endpoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A single step of an itinerary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Step {
    /// Walk between a coordinate and a station.
    Walk {
        from: Endpoint,
        to: Endpoint,
        /// Human-readable walking distance, e.g. `"500 m"` or `"1.20 km"`.
        distance: String,
    },
    /// Ride a line between two stations.
    Ride {
        line: LineId,
        from: StationId,
        to: StationId,
        /// Number of intermediate stations passed (0 if adjacent).
        stations_passed: usize,
    },
    /// Change lines at a station.
    Change {
        station: StationId,
        #[serde(rename = "from")]
        from_line: LineId,
        #[serde(rename = "to")]
        to_line: LineId,
    },
}

impl Step {
    /// Returns true if this is a walk step.
    pub fn is_walk(&self) -> bool {
        matches!(self, Step::Walk { .. })
    }

    /// Returns true if this is a ride step.
    pub fn is_ride(&self) -> bool {
        matches!(self, Step::Ride { .. })
    }

    /// Returns true if this is a change step.
    pub fn is_change(&self) -> bool {
        matches!(self, Step::Change { .. })
    }
}

/// Error returned when a step sequence violates the itinerary shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid itinerary: {0}")]
pub struct InvalidItinerary(&'static str);

/// A complete itinerary from origin to destination.
///
/// # Invariants
///
/// - The first step is the only walk from `origin`
/// - The last step is the only walk to `destination`
/// - Every ride is preceded by the initial walk or a change, and followed
///   by a change or the final walk
/// - Every change sits between two rides
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Itinerary {
    steps: Vec<Step>,
}

impl Itinerary {
    /// Constructs an itinerary, checking the step ordering invariants.
    pub fn new(steps: Vec<Step>) -> Result<Self, InvalidItinerary> {
        if steps.len() < 2 {
            return Err(InvalidItinerary("must have at least two walk steps"));
        }

        let last = steps.len() - 1;
        for (i, step) in steps.iter().enumerate() {
            match step {
                Step::Walk { from, to, .. } => {
                    if i == 0 {
                        if *from != Endpoint::Origin {
                            return Err(InvalidItinerary("first walk must start at origin"));
                        }
                    } else if i == last {
                        if *to != Endpoint::Destination {
                            return Err(InvalidItinerary("last walk must end at destination"));
                        }
                    } else {
                        return Err(InvalidItinerary("walks are only allowed at either end"));
                    }
                }
                Step::Ride { .. } => {
                    if i == 0 || i == last {
                        return Err(InvalidItinerary("must start and end with a walk"));
                    }
                    let before = &steps[i - 1];
                    let after = &steps[i + 1];
                    if !(i == 1 || before.is_change()) || !(i + 1 == last || after.is_change()) {
                        return Err(InvalidItinerary("rides must be separated by changes"));
                    }
                }
                Step::Change { .. } => {
                    if i == 0 || i == last || !steps[i - 1].is_ride() || !steps[i + 1].is_ride() {
                        return Err(InvalidItinerary("changes must sit between two rides"));
                    }
                }
            }
        }

        Ok(Self { steps })
    }

    /// Returns the steps in travel order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Returns the number of line changes.
    pub fn change_count(&self) -> usize {
        self.steps.iter().filter(|s| s.is_change()).count()
    }

    /// Returns the ride steps in travel order.
    pub fn rides(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter().filter(|s| s.is_ride())
    }
}
