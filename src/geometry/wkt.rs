//! Well-Known Text parsing
//!
//! Parses the subset of WKT the generators emit: `POINT`, `LINESTRING` and
//! single-ring `POLYGON`. Keywords are case-insensitive and whitespace between
//! tokens is free.

use super::point::Point;
use super::shape::{Geometry, LineString, Polygon};
use crate::types::GeometryKind;
use thiserror::Error;

/// Errors raised while reading WKT
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WktError {
    /// The leading keyword names no supported geometry kind
    #[error("Unknown geometry kind for WKT: {0}")]
    UnknownGeometryKind(String),

    /// The text does not follow the WKT grammar
    #[error("Malformed WKT: {0}")]
    Malformed(String),

    /// A coordinate could not be read as a number
    #[error("Invalid coordinate '{0}'")]
    InvalidCoordinate(String),

    /// A polygon ring whose first and last point differ
    #[error("Polygon ring is not closed: {0}")]
    UnclosedRing(String),
}

/// Parse a WKT string into a [`Geometry`]
pub fn parse(wkt: &str) -> Result<Geometry, WktError> {
    let text = wkt.trim();
    let kind = GeometryKind::from_wkt(text)?;

    let open = text
        .find('(')
        .ok_or_else(|| WktError::Malformed(format!("missing '(' in {}", text)))?;
    let keyword = text[..open].trim().to_uppercase();
    let body = strip_parens(&text[open..])
        .ok_or_else(|| WktError::Malformed(format!("unbalanced parentheses in {}", text)))?;

    match (kind, keyword.as_str()) {
        (GeometryKind::Point, "POINT") => {
            let mut points = parse_points(body)?;
            if points.len() != 1 {
                return Err(WktError::Malformed(format!(
                    "POINT needs exactly one coordinate pair, got {}",
                    points.len()
                )));
            }
            Ok(Geometry::Point(points.remove(0)))
        }
        (GeometryKind::LineString, "LINESTRING") => {
            let points = parse_points(body)?;
            if points.len() < 2 {
                return Err(WktError::Malformed(format!(
                    "LINESTRING needs at least two points, got {}",
                    points.len()
                )));
            }
            Ok(Geometry::LineString(LineString::new(points)))
        }
        (GeometryKind::Polygon, "POLYGON") => {
            let ring = strip_parens(body.trim()).ok_or_else(|| {
                WktError::Malformed(format!("POLYGON needs exactly one ring in {}", text))
            })?;
            if ring.contains('(') || ring.contains(')') {
                return Err(WktError::Malformed(format!(
                    "POLYGON with interior rings is not supported: {}",
                    text
                )));
            }
            let points = parse_points(ring)?;
            if points.len() < 4 {
                return Err(WktError::Malformed(format!(
                    "POLYGON ring needs at least four points, got {}",
                    points.len()
                )));
            }
            Polygon::from_closed_ring(points)
                .map(Geometry::Polygon)
                .ok_or_else(|| WktError::UnclosedRing(text.to_string()))
        }
        _ => Err(WktError::UnknownGeometryKind(text.to_string())),
    }
}

/// Strip one pair of enclosing parentheses, requiring them to match each other
fn strip_parens(text: &str) -> Option<&str> {
    let inner = text.strip_prefix('(')?.strip_suffix(')')?;

    let mut depth = 0i32;
    for c in inner.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return None;
                }
            }
            _ => {}
        }
    }
    (depth == 0).then_some(inner)
}

fn parse_points(body: &str) -> Result<Vec<Point>, WktError> {
    body.split(',').map(parse_point).collect()
}

fn parse_point(pair: &str) -> Result<Point, WktError> {
    let mut parts = pair.split_whitespace();
    let (lon, lat) = match (parts.next(), parts.next(), parts.next()) {
        (Some(lon), Some(lat), None) => (lon, lat),
        _ => return Err(WktError::Malformed(format!("expected 'lon lat', got '{}'", pair.trim()))),
    };

    let lon = lon.parse::<f64>().map_err(|_| WktError::InvalidCoordinate(lon.to_string()))?;
    let lat = lat.parse::<f64>().map_err(|_| WktError::InvalidCoordinate(lat.to_string()))?;
    Ok(Point::new(lon, lat))
}
