//! Coordinate pairs and rounding

use serde::{Deserialize, Serialize};
use std::fmt;

/// Decimal digits kept for primitive geometries
pub const PRIMITIVE_PRECISION: u32 = 4;

/// Decimal digits kept for hotel parts
pub const HOTEL_PRECISION: u32 = 5;

/// Round `value` to `digits` decimal places
pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}

/// A longitude/latitude pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Longitude (x)
    pub lon: f64,
    /// Latitude (y)
    pub lat: f64,
}

impl Point {
    /// Create a point from raw coordinates
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Create a point with both coordinates rounded to `digits` decimal places
    pub fn rounded(lon: f64, lat: f64, digits: u32) -> Self {
        Self { lon: round_to(lon, digits), lat: round_to(lat, digits) }
    }

    /// Euclidean distance in coordinate space
    pub fn distance(&self, other: &Point) -> f64 {
        ((self.lon - other.lon).powi(2) + (self.lat - other.lat).powi(2)).sqrt()
    }

    /// This point moved by `(d_lon, d_lat)`
    pub fn offset(&self, d_lon: f64, d_lat: f64) -> Point {
        Point::new(self.lon + d_lon, self.lat + d_lat)
    }
}

impl fmt::Display for Point {
    /// WKT coordinate pair, `lon lat`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.lon, self.lat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(13.741_26, 4), 13.7413);
        assert_eq!(round_to(51.049_994, 5), 51.04999);
        assert_eq!(round_to(-0.000_04, 4), -0.0);
    }

    #[test]
    fn test_rounded_point() {
        let p = Point::rounded(13.741_26, 51.049_94, 4);
        assert_eq!(p, Point::new(13.7413, 51.0499));
    }

    #[test]
    fn test_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(b.distance(&a), 5.0);
    }

    #[test]
    fn test_display_is_wkt_pair() {
        assert_eq!(Point::new(13.7412, 51.05).to_string(), "13.7412 51.05");
    }
}
