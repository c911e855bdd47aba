//! Region connection relations between polygons
//!
//! Relations are decided on `geo` polygons through the DE-9IM matrix of
//! [`geo::Relate`]. Bounding rectangles that do not meet short-circuit to
//! [`SpatialRelation::Disconnected`].

use super::shape::Polygon;
use geo::{Intersects, Relate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// RCC8 relation of a region `a` towards a region `b`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpatialRelation {
    /// No common point
    Disconnected,
    /// Boundaries touch, interiors do not overlap
    ExternallyConnected,
    /// Interiors overlap, neither contains the other
    PartiallyOverlapping,
    /// Identical regions
    Equal,
    /// `a` inside `b`, touching its boundary
    TangentialProperPart,
    /// `a` strictly inside `b`
    NonTangentialProperPart,
    /// `b` inside `a`, touching its boundary
    TangentialProperPartInverse,
    /// `b` strictly inside `a`
    NonTangentialProperPartInverse,
}

impl SpatialRelation {
    /// Whether the regions share at least one point
    pub fn is_connected(self) -> bool {
        self != SpatialRelation::Disconnected
    }
}

impl fmt::Display for SpatialRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SpatialRelation::Disconnected => "DC",
            SpatialRelation::ExternallyConnected => "EC",
            SpatialRelation::PartiallyOverlapping => "PO",
            SpatialRelation::Equal => "EQ",
            SpatialRelation::TangentialProperPart => "TPP",
            SpatialRelation::NonTangentialProperPart => "NTPP",
            SpatialRelation::TangentialProperPartInverse => "TPPi",
            SpatialRelation::NonTangentialProperPartInverse => "NTPPi",
        };
        f.write_str(name)
    }
}

/// Relation of region `a` towards region `b`
///
/// Empty rings share no point with anything.
pub fn relate(a: &Polygon, b: &Polygon) -> SpatialRelation {
    match (a.bounding_rect(), b.bounding_rect()) {
        (Some(rect_a), Some(rect_b)) if rect_a.intersects(&rect_b) => {}
        _ => return SpatialRelation::Disconnected,
    }

    let (a, b) = (a.to_geo(), b.to_geo());
    let matrix = a.relate(&b);

    if matrix.is_disjoint() {
        SpatialRelation::Disconnected
    } else if matrix.is_equal_topo() {
        SpatialRelation::Equal
    } else if matrix.is_touches() {
        SpatialRelation::ExternallyConnected
    } else if matrix.is_within() {
        if boundaries_meet(&a, &b) {
            SpatialRelation::TangentialProperPart
        } else {
            SpatialRelation::NonTangentialProperPart
        }
    } else if matrix.is_contains() {
        if boundaries_meet(&a, &b) {
            SpatialRelation::TangentialProperPartInverse
        } else {
            SpatialRelation::NonTangentialProperPartInverse
        }
    } else {
        SpatialRelation::PartiallyOverlapping
    }
}

fn boundaries_meet(a: &geo_types::Polygon<f64>, b: &geo_types::Polygon<f64>) -> bool {
    a.exterior().intersects(b.exterior())
}
