//! Geographic coordinates.

use serde::{Deserialize, Serialize};

/// Error returned when a coordinate is outside the valid range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid coordinate: {reason}")]
pub struct InvalidCoordinate {
    reason: &'static str,
}

/// A WGS84 latitude/longitude pair in degrees.
///
/// Serialized as `{"lat": .., "lng": ..}`, matching the network data format
/// and the requests sent by map front-ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting non-finite or out-of-range values.
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_router::domain::Coordinate;
    ///
    /// assert!(Coordinate::new(1.2931, 103.852).is_ok());
    /// assert!(Coordinate::new(91.0, 0.0).is_err());
    /// assert!(Coordinate::new(f64::NAN, 0.0).is_err());
    /// ```
    pub fn new(lat: f64, lng: f64) -> Result<Self, InvalidCoordinate> {
        let coord = Self { lat, lng };
        coord.validate()?;
        Ok(coord)
    }

    /// Check the invariants of a coordinate built by deserialization.
    pub fn validate(&self) -> Result<(), InvalidCoordinate> {
        if !self.lat.is_finite() || !self.lng.is_finite() {
            return Err(InvalidCoordinate {
                reason: "latitude and longitude must be finite",
            });
        }
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(InvalidCoordinate {
                reason: "latitude must be within [-90, 90]",
            });
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(InvalidCoordinate {
                reason: "longitude must be within [-180, 180]",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid() {
        assert!(Coordinate::new(0.0, 0.0).is_ok());
        assert!(Coordinate::new(-90.0, 180.0).is_ok());
        assert!(Coordinate::new(1.322522, 103.815403).is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Coordinate::new(90.1, 0.0).is_err());
        assert!(Coordinate::new(0.0, -180.5).is_err());
    }

    #[test]
    fn rejects_non_finite() {
        assert!(Coordinate::new(f64::INFINITY, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::NAN).is_err());
    }

    #[test]
    fn error_display() {
        let err = Coordinate::new(95.0, 0.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid coordinate: latitude must be within [-90, 90]"
        );
    }

    #[test]
    fn deserializes_lat_lng() {
        let c: Coordinate = serde_json::from_str(r#"{"lat": 1.5, "lng": 103.8}"#).unwrap();
        assert_eq!(c, Coordinate { lat: 1.5, lng: 103.8 });
    }
}
