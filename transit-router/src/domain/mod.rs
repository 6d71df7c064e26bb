//! Domain types for the transit router.
//!
//! Identifiers, coordinates and the rider-facing itinerary model. Station
//! and line identifiers are plain string keys; coordinates are validated
//! before they reach the planner.

mod coordinate;
mod ids;
mod itinerary;

pub use coordinate::{Coordinate, InvalidCoordinate};
pub use ids::{LineId, StationId};
pub use itinerary::{Endpoint, InvalidItinerary, Itinerary, Step};
