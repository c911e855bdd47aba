//! Geometry values and their WKT rendering

use super::point::Point;
use crate::types::{GeometryKind, ResourceKey};
use geo::BoundingRect;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered, open sequence of points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineString {
    /// Points in drawing order
    pub points: Vec<Point>,
}

impl LineString {
    /// Create a line string from ordered points
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the line string has no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether two neighbouring points share coordinates
    pub fn has_repeated_consecutive_points(&self) -> bool {
        self.points.windows(2).any(|pair| pair[0] == pair[1])
    }
}

/// A closed ring of points; the first and last point are identical
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    ring: Vec<Point>,
}

impl Polygon {
    /// Build a polygon from the open ring `points`, appending the first point again
    pub fn from_open_ring(mut points: Vec<Point>) -> Self {
        if let Some(first) = points.first().copied() {
            points.push(first);
        }
        Self { ring: points }
    }

    /// Build a polygon from a ring that is already closed
    ///
    /// Returns `None` when the ring is empty or its first and last point differ.
    pub fn from_closed_ring(ring: Vec<Point>) -> Option<Self> {
        match (ring.first(), ring.last()) {
            (Some(first), Some(last)) if first == last => Some(Self { ring }),
            _ => None,
        }
    }

    /// The closed ring, including the repeated first point
    pub fn ring(&self) -> &[Point] {
        &self.ring
    }

    /// Number of points in the ring, including the closing duplicate
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// Whether the ring has no points
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Whether the first and last point coincide
    pub fn is_closed(&self) -> bool {
        matches!((self.ring.first(), self.ring.last()), (Some(a), Some(b)) if a == b)
    }

    /// Whether two neighbouring ring points share coordinates
    pub fn has_repeated_consecutive_points(&self) -> bool {
        self.ring.windows(2).any(|pair| pair[0] == pair[1])
    }

    /// This ring as a `geo` polygon without holes
    pub fn to_geo(&self) -> geo_types::Polygon<f64> {
        let exterior: Vec<geo_types::Coord<f64>> =
            self.ring.iter().map(|p| geo_types::coord! { x: p.lon, y: p.lat }).collect();
        geo_types::Polygon::new(geo_types::LineString::new(exterior), Vec::new())
    }

    /// Bounding box of the ring, `None` when empty
    pub fn bounding_rect(&self) -> Option<geo_types::Rect<f64>> {
        self.to_geo().bounding_rect()
    }

    /// Center of the bounding box
    pub fn center(&self) -> Option<Point> {
        let center = self.bounding_rect()?.center();
        Some(Point::new(center.x, center.y))
    }

    /// WKT rendering, `POLYGON((lon lat, ...))`
    pub fn to_wkt(&self) -> String {
        format!("POLYGON(({}))", join_points(&self.ring))
    }

    /// Content key of this polygon's WKT
    pub fn resource_key(&self) -> ResourceKey {
        ResourceKey::from_wkt(&self.to_wkt())
    }
}

/// Any generated or parsed geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    /// A single point
    Point(Point),
    /// An open line string
    LineString(LineString),
    /// A closed polygon ring
    Polygon(Polygon),
}

impl Geometry {
    /// The kind tag of this geometry
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::LineString(_) => GeometryKind::LineString,
            Geometry::Polygon(_) => GeometryKind::Polygon,
        }
    }

    /// All coordinates in rendering order
    pub fn points(&self) -> &[Point] {
        match self {
            Geometry::Point(point) => std::slice::from_ref(point),
            Geometry::LineString(line) => &line.points,
            Geometry::Polygon(polygon) => polygon.ring(),
        }
    }

    /// WKT rendering of this geometry
    pub fn to_wkt(&self) -> String {
        match self {
            Geometry::Point(point) => format!("POINT({})", point),
            Geometry::LineString(line) => format!("LINESTRING({})", join_points(&line.points)),
            Geometry::Polygon(polygon) => polygon.to_wkt(),
        }
    }

    /// Content key of this geometry's WKT
    pub fn resource_key(&self) -> ResourceKey {
        ResourceKey::from_wkt(&self.to_wkt())
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wkt())
    }
}

impl From<Point> for Geometry {
    fn from(point: Point) -> Self {
        Geometry::Point(point)
    }
}

impl From<LineString> for Geometry {
    fn from(line: LineString) -> Self {
        Geometry::LineString(line)
    }
}

impl From<Polygon> for Geometry {
    fn from(polygon: Polygon) -> Self {
        Geometry::Polygon(polygon)
    }
}

fn join_points(points: &[Point]) -> String {
    points.iter().map(Point::to_string).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Polygon {
        Polygon::from_open_ring(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
        ])
    }

    #[test]
    fn test_point_wkt() {
        let geometry = Geometry::from(Point::new(13.7412, 51.0501));
        assert_eq!(geometry.to_wkt(), "POINT(13.7412 51.0501)");
        assert_eq!(geometry.kind(), GeometryKind::Point);
    }

    #[test]
    fn test_line_string_wkt() {
        let line = LineString::new(vec![Point::new(1.5, 2.5), Point::new(3.25, 4.0)]);
        assert_eq!(Geometry::from(line).to_wkt(), "LINESTRING(1.5 2.5, 3.25 4)");
    }

    #[test]
    fn test_polygon_closure() {
        let polygon = triangle();
        assert_eq!(polygon.len(), 4);
        assert!(polygon.is_closed());
        assert_eq!(polygon.to_wkt(), "POLYGON((0 0, 1 0, 1 1, 0 0))");
    }

    #[test]
    fn test_polygon_from_closed_ring() {
        let closed = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 0.0)];
        assert!(Polygon::from_closed_ring(closed).is_some());

        let open = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)];
        assert!(Polygon::from_closed_ring(open).is_none());
        assert!(Polygon::from_closed_ring(Vec::new()).is_none());
    }

    #[test]
    fn test_repeated_consecutive_points() {
        let line = LineString::new(vec![Point::new(0.0, 0.0), Point::new(0.0, 0.0)]);
        assert!(line.has_repeated_consecutive_points());

        let line = LineString::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)]);
        assert!(!line.has_repeated_consecutive_points());
    }

    #[test]
    fn test_bounding_rect_and_center() {
        let polygon = triangle();
        let rect = polygon.bounding_rect().unwrap();
        assert_eq!(rect.min().x, 0.0);
        assert_eq!(rect.max().y, 1.0);
        assert_eq!(polygon.center(), Some(Point::new(0.5, 0.5)));

        assert_eq!(polygon.to_geo().exterior().0.len(), 4);
        assert!(!polygon.has_repeated_consecutive_points());
    }

    #[test]
    fn test_resource_key_follows_wkt() {
        let geometry = Geometry::from(triangle());
        assert_eq!(geometry.resource_key(), ResourceKey::from_wkt(&geometry.to_wkt()));
        assert_eq!(triangle().resource_key(), geometry.resource_key());
    }
}
