//! Random point, line string and polygon generation
//!
//! Geometries are scattered uniformly around a center coordinate. The spread is
//! coupled to the number of requested samples so that larger datasets cover a
//! proportionally larger area at roughly constant density.

use crate::geometry::{LineString, Point, Polygon, Geometry, PRIMITIVE_PRECISION};
use crate::types::GeometryKind;
use rand::{prelude::*, rngs::StdRng, RngCore, SeedableRng};
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use tracing::{debug, instrument};

/// Area (in squared degrees) covered by every ten samples
pub const AREA_PER_10_SAMPLES: f64 = 0.00002;

/// Standard deviation of a random-walk step between line string points
pub const NEIGHBOR_DISTANCE: f64 = 0.0005;

/// Largest step between two consecutive polygon points
pub const MAX_POLY_NEIGHBOR_DIST: f64 = 0.001;

/// Scale applied to the angular polygon steps
pub const POLYGON_STRETCH: f64 = 0.9;

/// Center and point-count bounds of the primitive generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveSettings {
    /// Longitude all geometries are scattered around
    pub center_lon: f64,
    /// Latitude all geometries are scattered around
    pub center_lat: f64,
    /// Fewest points of a line string
    pub min_line_points: usize,
    /// Most points of a line string
    pub max_line_points: usize,
    /// Fewest distinct points of a polygon
    pub min_polygon_points: usize,
    /// Most distinct points of a polygon
    pub max_polygon_points: usize,
}

impl PrimitiveSettings {
    /// Settings around a center with the default point-count bounds
    pub fn around(center_lon: f64, center_lat: f64) -> Self {
        Self { center_lon, center_lat, ..Self::default() }
    }
}

impl Default for PrimitiveSettings {
    fn default() -> Self {
        Self {
            center_lon: 13.74,
            center_lat: 51.05,
            min_line_points: 3,
            max_line_points: 16,
            min_polygon_points: 3,
            max_polygon_points: 20,
        }
    }
}

/// Generator for random primitive geometries
pub struct PrimitiveGeometryGenerator {
    rng: Box<dyn RngCore>,
    settings: PrimitiveSettings,
    span: f64,
}

impl fmt::Debug for PrimitiveGeometryGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrimitiveGeometryGenerator")
            .field("settings", &self.settings)
            .field("span", &self.span)
            .finish()
    }
}

impl PrimitiveGeometryGenerator {
    /// Create a generator drawing from the thread-local random source
    pub fn new(settings: PrimitiveSettings) -> Self {
        Self::with_rng(settings, Box::new(thread_rng()))
    }

    /// Create a generator with a specific seed
    pub fn with_seed(settings: PrimitiveSettings, seed: u64) -> Self {
        Self::with_rng(settings, Box::new(StdRng::seed_from_u64(seed)))
    }

    /// Create a generator drawing from `rng`
    pub fn with_rng(settings: PrimitiveSettings, rng: Box<dyn RngCore>) -> Self {
        Self { rng, settings, span: 0.0 }
    }

    /// Replace center and point-count bounds
    pub fn configure(&mut self, settings: PrimitiveSettings) {
        self.settings = settings;
    }

    /// Current settings
    pub fn settings(&self) -> &PrimitiveSettings {
        &self.settings
    }

    /// Derive the sampling half-width from the number of requested samples
    pub fn set_span(&mut self, num_samples: usize) {
        self.span = ((num_samples as f64 / 10.0) * AREA_PER_10_SAMPLES).sqrt();
    }

    /// Current sampling half-width
    pub fn span(&self) -> f64 {
        self.span
    }

    /// A point drawn uniformly from the square `center ± span`
    pub fn generate_point(&mut self) -> Point {
        let PrimitiveSettings { center_lon, center_lat, .. } = self.settings;
        let span = self.span;

        let lon = self.rng.gen_range(center_lon - span..=center_lon + span);
        let lat = self.rng.gen_range(center_lat - span..=center_lat + span);
        Point::rounded(lon, lat, PRIMITIVE_PRECISION)
    }

    /// A point drawn from a normal distribution around `origin`
    pub fn generate_neighboring_point(&mut self, origin: &Point) -> Point {
        let d_lon: f64 = self.rng.sample(StandardNormal);
        let d_lat: f64 = self.rng.sample(StandardNormal);
        Point::rounded(
            origin.lon + d_lon * NEIGHBOR_DISTANCE,
            origin.lat + d_lat * NEIGHBOR_DISTANCE,
            PRIMITIVE_PRECISION,
        )
    }

    /// A random walk re-ordered into a greedy nearest-neighbour tour
    pub fn generate_line_string(&mut self) -> LineString {
        let num_points =
            self.rng.gen_range(self.settings.min_line_points..=self.settings.max_line_points);
        let start = self.generate_point();

        let mut walk: Vec<Point> = Vec::with_capacity(num_points.saturating_sub(1));
        let mut previous = start;
        for _ in 1..num_points {
            // Rounding can land on a coordinate already drawn; redraw those
            let next = loop {
                let candidate = self.generate_neighboring_point(&previous);
                if candidate != start && !walk.contains(&candidate) {
                    break candidate;
                }
                debug!("Redrawing walk point {} at {}, already drawn", walk.len() + 1, candidate);
            };
            walk.push(next);
            previous = next;
        }

        LineString::new(line_up_points(start, walk))
    }

    /// A closed ring whose successive steps turn once around a full circle
    ///
    /// Only the start point is rounded; later vertices keep the exact walk so
    /// short steps cannot collapse onto their predecessor.
    pub fn generate_polygon(&mut self) -> Polygon {
        let num_points = self
            .rng
            .gen_range(self.settings.min_polygon_points..=self.settings.max_polygon_points);
        let start = self.generate_point();
        let step = 2.0 * PI / num_points as f64;

        let mut points = Vec::with_capacity(num_points + 1);
        points.push(start);
        for i in 1..num_points {
            let previous = points[i - 1];
            let angle = step * i as f64;

            let next = loop {
                let reach = self.rng.gen::<f64>() * MAX_POLY_NEIGHBOR_DIST * POLYGON_STRETCH;
                let candidate = previous.offset(reach * angle.sin(), reach * angle.cos());
                if candidate != previous {
                    break candidate;
                }
                debug!("Redrawing polygon step {} of {}", i, num_points);
            };
            points.push(next);
        }

        Polygon::from_open_ring(points)
    }

    /// A geometry of the requested kind
    pub fn generate(&mut self, kind: GeometryKind) -> Geometry {
        match kind {
            GeometryKind::Point => Geometry::Point(self.generate_point()),
            GeometryKind::LineString => Geometry::LineString(self.generate_line_string()),
            GeometryKind::Polygon => Geometry::Polygon(self.generate_polygon()),
        }
    }

    /// Draw a geometry kind, favouring polygons
    ///
    /// A kind is drawn uniformly and redrawn once when it is not a polygon, so
    /// polygons make up 5/9 of a batch and points and line strings 2/9 each.
    pub fn pick_kind(&mut self) -> GeometryKind {
        let first = GeometryKind::ALL[self.rng.gen_range(0..GeometryKind::ALL.len())];
        if first == GeometryKind::Polygon {
            return first;
        }
        GeometryKind::ALL[self.rng.gen_range(0..GeometryKind::ALL.len())]
    }

    /// Generate `num_samples` geometries of mixed kinds
    #[instrument(skip(self))]
    pub fn generate_batch(&mut self, num_samples: usize) -> Vec<Geometry> {
        if num_samples == 0 {
            return Vec::new();
        }

        self.set_span(num_samples);
        debug!("Sampling {} geometries with span {:.6}", num_samples, self.span);

        (0..num_samples)
            .map(|_| {
                let kind = self.pick_kind();
                self.generate(kind)
            })
            .collect()
    }
}

/// Order `candidates` into a greedy nearest-neighbour tour starting at `start`
///
/// From the last placed point, the closest remaining candidate is appended
/// next. On equal distances the candidate that comes first in `candidates`
/// wins. The returned sequence starts with `start`.
pub fn line_up_points(start: Point, mut candidates: Vec<Point>) -> Vec<Point> {
    let mut ordered = Vec::with_capacity(candidates.len() + 1);
    ordered.push(start);

    let mut current = start;
    while !candidates.is_empty() {
        let mut nearest_idx = 0;
        let mut shortest = f64::INFINITY;
        for (idx, candidate) in candidates.iter().enumerate() {
            let distance = current.distance(candidate);
            if distance < shortest {
                shortest = distance;
                nearest_idx = idx;
            }
        }

        current = candidates.remove(nearest_idx);
        ordered.push(current);
    }

    ordered
}
