//! Axis-aligned squares
//!
//! Every hotel part (hotel footprint, rooms, reception, parking lot) is a
//! square, so they all share this one primitive.

use super::point::Point;
use super::shape::Polygon;

/// An axis-aligned square given by its center and side length
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Square {
    /// Center of the square (unrounded)
    pub center: Point,
    /// Side length in degrees
    pub side: f64,
}

impl Square {
    /// Create a square
    pub fn new(center: Point, side: f64) -> Self {
        Self { center, side }
    }

    /// Closed 5-point ring, clockwise from the upper-left corner, rounded to `digits`
    pub fn to_polygon(&self, digits: u32) -> Polygon {
        let d = self.side / 2.0;
        let Point { lon, lat } = self.center;

        Polygon::from_open_ring(vec![
            Point::rounded(lon - d, lat + d, digits),
            Point::rounded(lon + d, lat + d, digits),
            Point::rounded(lon + d, lat - d, digits),
            Point::rounded(lon - d, lat - d, digits),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_ring() {
        let polygon = Square::new(Point::new(10.0, 20.0), 2.0).to_polygon(5);
        let expected = [
            Point::new(9.0, 21.0),
            Point::new(11.0, 21.0),
            Point::new(11.0, 19.0),
            Point::new(9.0, 19.0),
            Point::new(9.0, 21.0),
        ];
        assert_eq!(polygon.ring(), &expected);
    }

    #[test]
    fn test_square_rounding() {
        let polygon = Square::new(Point::new(13.740_001_2, 51.05), 0.0001).to_polygon(5);
        for point in polygon.ring() {
            assert_eq!(point.lon, (point.lon * 1e5).round() / 1e5);
            assert_eq!(point.lat, (point.lat * 1e5).round() / 1e5);
        }
        assert_eq!(
            polygon.to_wkt(),
            "POLYGON((13.73995 51.05005, 13.74005 51.05005, 13.74005 51.04995, \
             13.73995 51.04995, 13.73995 51.05005))"
        );
    }
}
