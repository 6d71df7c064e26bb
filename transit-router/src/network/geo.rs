//! Great-circle distance and distance labels.

use crate::domain::Coordinate;

/// Mean Earth diameter in km.
const EARTH_DIAMETER_KM: f64 = 12742.0;

/// Haversine distance between two coordinates, in km rounded to 3 decimals.
///
/// # Examples
///
/// ```
/// use transit_router::domain::Coordinate;
/// use transit_router::network::distance_km;
///
/// let a = Coordinate { lat: 0.0, lng: 0.0 };
/// let b = Coordinate { lat: 0.0, lng: 1.0 };
/// assert_eq!(distance_km(a, b), 111.195);
/// ```
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let p = std::f64::consts::PI / 180.0;
    let h = 0.5 - ((b.lat - a.lat) * p).cos() / 2.0
        + (a.lat * p).cos() * (b.lat * p).cos() * (1.0 - ((b.lng - a.lng) * p).cos()) / 2.0;
    let km = EARTH_DIAMETER_KM * h.clamp(0.0, 1.0).sqrt().asin();
    (km * 1000.0).round() / 1000.0
}

/// Format a walking distance for display.
///
/// Distances that round to under 1000 m are given in whole metres,
/// otherwise in km with two decimals.
///
/// # Examples
///
/// ```
/// use transit_router::network::format_distance;
///
/// assert_eq!(format_distance(0.5), "500 m");
/// assert_eq!(format_distance(1.2), "1.20 km");
/// ```
pub fn format_distance(km: f64) -> String {
    let metres = (km * 1000.0).round();
    if metres < 1000.0 {
        format!("{} m", metres as i64)
    } else {
        format!("{km:.2} km")
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Sub-kilometre distances are labelled in metres, never as "1000 m"
        #[test]
        fn metres_below_one_km(km in 0.0f64..1.0) {
            let label = format_distance(km);
            match label.strip_suffix(" m") {
                Some(metres) => prop_assert!(metres.parse::<i64>().unwrap() < 1000),
                None => prop_assert_eq!(label, "1.00 km"),
            }
        }

        /// Distances from 1 km up are labelled with two decimals
        #[test]
        fn kilometres_from_one_km(km in 1.0f64..100.0) {
            let label = format_distance(km);
            let number = label.strip_suffix(" km").unwrap();
            prop_assert_eq!(number.split('.').nth(1).map(str::len), Some(2));
        }

        /// Triangle inequality, up to rounding
        #[test]
        fn triangle_inequality(
            lat in -60.0f64..60.0, lng in -170.0f64..170.0,
            d1 in -0.5f64..0.5, d2 in -0.5f64..0.5,
        ) {
            let a = c(lat, lng);
            let b = c(lat + d1, lng + d2);
            let m = c(lat + d1 / 2.0, lng);
            prop_assert!(distance_km(a, b) <= distance_km(a, m) + distance_km(m, b) + 0.002);
        }
    }

    fn c(lat: f64, lng: f64) -> Coordinate {
        Coordinate { lat, lng }
    }
}
