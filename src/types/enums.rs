//! Enumeration types for the spatial data generator
//!
//! This module contains the enumeration types shared by the generators and the
//! output renderers: sides of a square footprint, geometry kinds and the
//! categories of non-car-friendly hotel samples.

use crate::geometry::wkt::WktError;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Side of a square footprint a hotel part is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Upper side (increasing latitude)
    North,
    /// Right side (increasing longitude)
    East,
    /// Lower side (decreasing latitude)
    South,
    /// Left side (decreasing longitude)
    West,
}

impl Orientation {
    /// All four orientations in clockwise order starting at north
    pub const ALL: [Orientation; 4] =
        [Orientation::North, Orientation::East, Orientation::South, Orientation::West];

    /// Unit direction `(d_lon, d_lat)` pointing from a square's center towards this side
    pub fn unit_vector(self) -> (f64, f64) {
        match self {
            Orientation::North => (0.0, 1.0),
            Orientation::East => (1.0, 0.0),
            Orientation::South => (0.0, -1.0),
            Orientation::West => (-1.0, 0.0),
        }
    }

    /// Unit direction running along this side, always towards increasing coordinates
    pub fn along_side(self) -> (f64, f64) {
        match self {
            Orientation::North | Orientation::South => (1.0, 0.0),
            Orientation::East | Orientation::West => (0.0, 1.0),
        }
    }

    /// Draw one of the four orientations uniformly
    pub fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Draw uniformly until the result differs from every orientation in `excluded`
    ///
    /// `excluded` must leave at least one orientation available.
    pub fn random_excluding<R: RngCore + ?Sized>(rng: &mut R, excluded: &[Orientation]) -> Self {
        loop {
            let candidate = Self::random(rng);
            if !excluded.contains(&candidate) {
                return candidate;
            }
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::North => write!(f, "North"),
            Orientation::East => write!(f, "East"),
            Orientation::South => write!(f, "South"),
            Orientation::West => write!(f, "West"),
        }
    }
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "north" | "n" => Ok(Orientation::North),
            "east" | "e" => Ok(Orientation::East),
            "south" | "s" => Ok(Orientation::South),
            "west" | "w" => Ok(Orientation::West),
            _ => Err(format!("Unknown orientation: {}", s)),
        }
    }
}

/// Kind of a geometry, used to select target tables and feature classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
    /// A single coordinate pair
    Point,
    /// An open sequence of coordinates
    LineString,
    /// A closed ring of coordinates
    Polygon,
}

impl GeometryKind {
    /// All kinds in the order the primitive generator draws them from
    pub const ALL: [GeometryKind; 3] =
        [GeometryKind::Point, GeometryKind::LineString, GeometryKind::Polygon];

    /// Classify a WKT string by its leading keyword
    ///
    /// The match is case-insensitive and accepts any keyword starting with
    /// `POINT`, `LINE` or `POLY`. Anything else is an
    /// [`WktError::UnknownGeometryKind`].
    pub fn from_wkt(wkt: &str) -> Result<Self, WktError> {
        let upper = wkt.trim_start().to_uppercase();
        if upper.starts_with("POINT") {
            Ok(GeometryKind::Point)
        } else if upper.starts_with("LINE") {
            Ok(GeometryKind::LineString)
        } else if upper.starts_with("POLY") {
            Ok(GeometryKind::Polygon)
        } else {
            Err(WktError::UnknownGeometryKind(wkt.to_string()))
        }
    }

    /// Name of the SQL table geometries of this kind are loaded into
    pub fn table_name(self) -> &'static str {
        match self {
            GeometryKind::Point => "point",
            GeometryKind::LineString => "line_string",
            GeometryKind::Polygon => "polygon",
        }
    }

    /// Local name of the RDF feature class for this kind
    pub fn feature_class(self) -> &'static str {
        match self {
            GeometryKind::Point => "PointFeature",
            GeometryKind::LineString => "LineFeature",
            GeometryKind::Polygon => "AreaFeature",
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryKind::Point => write!(f, "point"),
            GeometryKind::LineString => write!(f, "line string"),
            GeometryKind::Polygon => write!(f, "polygon"),
        }
    }
}

impl FromStr for GeometryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "point" => Ok(GeometryKind::Point),
            "line string" | "linestring" | "line_string" | "line" => Ok(GeometryKind::LineString),
            "polygon" | "area" => Ok(GeometryKind::Polygon),
            _ => Err(format!("Unknown geometry kind: {}", s)),
        }
    }
}

/// Ways a generated hotel fails to be car friendly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NegativeCase {
    /// There is no parking lot at all
    NoParkingLot,
    /// The parking lot is disconnected from the hotel
    DisconnectedParkingLot,
    /// The parking lot touches the hotel but not the reception
    MisplacedParkingLot,
}

impl NegativeCase {
    /// All negative cases, drawn uniformly per sample
    pub const ALL: [NegativeCase; 3] = [
        NegativeCase::NoParkingLot,
        NegativeCase::DisconnectedParkingLot,
        NegativeCase::MisplacedParkingLot,
    ];
}

impl fmt::Display for NegativeCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NegativeCase::NoParkingLot => write!(f, "No Parking Lot"),
            NegativeCase::DisconnectedParkingLot => write!(f, "Disconnected Parking Lot"),
            NegativeCase::MisplacedParkingLot => write!(f, "Misplaced Parking Lot"),
        }
    }
}

/// Output label of a hotel sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HotelLabel {
    /// Parking lot touches both the hotel and the reception
    CarFriendly,
    /// One of the negative cases
    NotCarFriendly(NegativeCase),
}

impl HotelLabel {
    /// Whether this is the positive class
    pub fn is_positive(self) -> bool {
        matches!(self, HotelLabel::CarFriendly)
    }
}

impl fmt::Display for HotelLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HotelLabel::CarFriendly => write!(f, "Car Friendly"),
            HotelLabel::NotCarFriendly(case) => write!(f, "Not Car Friendly ({})", case),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_orientation_vectors_are_unit_and_perpendicular() {
        for orientation in Orientation::ALL {
            let (dx, dy) = orientation.unit_vector();
            let (ax, ay) = orientation.along_side();
            assert_eq!(dx.abs() + dy.abs(), 1.0);
            assert_eq!(dx * ax + dy * ay, 0.0);
        }
    }

    #[test]
    fn test_orientation_random_excluding() {
        let mut rng = StdRng::seed_from_u64(7);
        let excluded = [Orientation::North, Orientation::East, Orientation::South];
        for _ in 0..50 {
            assert_eq!(Orientation::random_excluding(&mut rng, &excluded), Orientation::West);
        }
    }

    #[test]
    fn test_orientation_from_str() {
        assert_eq!("north".parse::<Orientation>().unwrap(), Orientation::North);
        assert_eq!("W".parse::<Orientation>().unwrap(), Orientation::West);
        assert!("up".parse::<Orientation>().is_err());
    }

    #[test]
    fn test_geometry_kind_from_wkt() {
        assert_eq!(GeometryKind::from_wkt("POINT(1 2)").unwrap(), GeometryKind::Point);
        assert_eq!(
            GeometryKind::from_wkt("LINESTRING(1 2, 3 4)").unwrap(),
            GeometryKind::LineString
        );
        assert_eq!(
            GeometryKind::from_wkt("polygon((0 0, 1 0, 1 1, 0 0))").unwrap(),
            GeometryKind::Polygon
        );

        match GeometryKind::from_wkt("MULTIPOINT((1 2))") {
            Err(WktError::UnknownGeometryKind(wkt)) => assert_eq!(wkt, "MULTIPOINT((1 2))"),
            other => panic!("Expected UnknownGeometryKind, got {:?}", other),
        }
    }

    #[test]
    fn test_geometry_kind_tables_and_classes() {
        assert_eq!(GeometryKind::Point.table_name(), "point");
        assert_eq!(GeometryKind::LineString.table_name(), "line_string");
        assert_eq!(GeometryKind::Polygon.table_name(), "polygon");
        assert_eq!(GeometryKind::Polygon.feature_class(), "AreaFeature");
    }

    #[test]
    fn test_hotel_label_display() {
        assert_eq!(HotelLabel::CarFriendly.to_string(), "Car Friendly");
        assert_eq!(
            HotelLabel::NotCarFriendly(NegativeCase::NoParkingLot).to_string(),
            "Not Car Friendly (No Parking Lot)"
        );
        assert!(HotelLabel::CarFriendly.is_positive());
    }
}
