//! GPS trace to move conversion
//!
//! A trace file holds one fix per line as five double-quoted CSV fields:
//! `"user","timestamp","lon","lat","label"`. The fixes of a file form one move:
//! a line string through all fixes plus the mean and standard deviation of
//! the speeds between consecutive fixes.

use crate::geometry::{LineString, Point};
use crate::output::{vocab, Term, TurtleGraph};
use chrono::{DateTime, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Earth radius used for great-circle distances, in kilometers
pub const EARTH_RADIUS_KM: f64 = 6367.4445;

/// Local name of the move class
pub const MOVE_CLASS: &str = "Move";
/// Local name of the average speed property
pub const HAS_SPEED_AVG: &str = "has_speed_avg";
/// Local name of the speed deviation property
pub const HAS_SPEED_STDEV: &str = "has_speed_stdev";

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Errors raised while reading a trace
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TraceError {
    /// A line does not consist of five quoted fields
    #[error("Line {line}: malformed record: {reason}")]
    MalformedRecord {
        /// One-based line number
        line: usize,
        /// What is wrong with the record
        reason: String,
    },

    /// The timestamp field is not ISO-8601
    #[error("Line {line}: invalid timestamp '{value}'")]
    InvalidTimestamp {
        /// One-based line number
        line: usize,
        /// Offending field
        value: String,
    },

    /// A coordinate field is not a number
    #[error("Line {line}: invalid coordinate '{value}'")]
    InvalidCoordinate {
        /// One-based line number
        line: usize,
        /// Offending field
        value: String,
    },
}

/// One parsed trace record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpsFix {
    /// User the fix belongs to
    pub user: String,
    /// Local time of the fix
    pub timestamp: NaiveDateTime,
    /// Position
    pub position: Point,
    /// Transport mode label
    pub label: String,
}

impl GpsFix {
    /// Parse a CSV record; `line` is only used for error messages
    pub fn parse(record: &str, line: usize) -> Result<Self, TraceError> {
        let fields = record
            .trim()
            .split(',')
            .map(|field| {
                field.strip_prefix('"').and_then(|f| f.strip_suffix('"')).ok_or_else(|| {
                    TraceError::MalformedRecord {
                        line,
                        reason: format!("field {} is not double-quoted", field),
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let [user, timestamp, lon, lat, label] = fields[..] else {
            return Err(TraceError::MalformedRecord {
                line,
                reason: format!("expected 5 fields, got {}", fields.len()),
            });
        };

        let coordinate = |value: &str| {
            value
                .trim()
                .parse::<f64>()
                .map_err(|_| TraceError::InvalidCoordinate { line, value: value.to_string() })
        };

        Ok(Self {
            user: user.to_string(),
            timestamp: parse_timestamp(timestamp)
                .ok_or_else(|| TraceError::InvalidTimestamp { line, value: timestamp.to_string() })?,
            position: Point::new(coordinate(lon)?, coordinate(lat)?),
            label: label.to_string(),
        })
    }
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.naive_local()))
}

/// ISO-8601 rendering with `:` replaced so it can be part of a file name
fn file_safe_timestamp(timestamp: &NaiveDateTime) -> String {
    let format = if timestamp.nanosecond() == 0 { "%Y-%m-%dT%H:%M:%S" } else { "%Y-%m-%dT%H:%M:%S%.6f" };
    timestamp.format(format).to_string().replace(':', "-")
}

/// Great-circle distance in kilometers
pub fn haversine_km(from: &Point, to: &Point) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (to.lon - from.lon).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Mean and sample standard deviation of segment speeds, in km/h
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedStatistics {
    /// Mean speed
    pub average: f64,
    /// Sample standard deviation
    pub stdev: f64,
}

impl SpeedStatistics {
    /// Statistics of `speeds`, `None` for fewer than two values
    pub fn from_speeds(speeds: &[f64]) -> Option<Self> {
        if speeds.len() < 2 {
            return None;
        }
        let n = speeds.len() as f64;
        let average = speeds.iter().sum::<f64>() / n;
        let variance = speeds.iter().map(|s| (s - average).powi(2)).sum::<f64>() / (n - 1.0);
        Some(Self { average, stdev: variance.sqrt() })
    }
}

/// A converted move
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveDescription {
    /// `move_{user}_{from}_-_{to}`
    pub move_id: String,
    /// User of the first fix
    pub user: String,
    /// Label of the first fix
    pub label: String,
    /// Path through all fixes
    pub path: LineString,
    /// Speeds of every segment with a positive time delta
    pub speeds: Vec<f64>,
    /// Speed statistics when at least two speeds are known
    pub statistics: Option<SpeedStatistics>,
}

impl MoveDescription {
    /// Output file name, `{label}_{move id}.ttl`
    pub fn file_name(&self) -> String {
        format!("{}_{}.ttl", self.label, self.move_id)
    }

    /// IRI of the move resource
    pub fn iri(&self) -> String {
        format!("{}{}", vocab::SPATIAL_RES_NS, self.move_id)
    }

    /// IRI of the move's geometry
    pub fn geometry_iri(&self) -> String {
        format!("{}_geom", self.iri())
    }

    /// WKT of the path
    pub fn wkt(&self) -> String {
        crate::geometry::Geometry::LineString(self.path.clone()).to_wkt()
    }

    /// Speed property declarations followed by the move and its geometry
    pub fn to_graph(&self) -> TurtleGraph {
        let mut graph = trace_ontology();
        let iri = self.iri();
        let geometry = self.geometry_iri();

        graph.add_type(&iri, ontology_term(MOVE_CLASS));
        if let Some(stats) = self.statistics {
            graph.add(&iri, ontology_term(HAS_SPEED_AVG), Term::double(stats.average));
            graph.add(&iri, ontology_term(HAS_SPEED_STDEV), Term::double(stats.stdev));
        }
        graph.add(&iri, vocab::GEO_HAS_GEOMETRY, Term::iri(&geometry));
        graph.add_type(&geometry, vocab::GEO_GEOMETRY);
        graph.add(&geometry, vocab::GEO_AS_WKT, Term::wkt(self.wkt()));

        graph
    }

    /// Turtle rendering of [`MoveDescription::to_graph`]
    pub fn to_turtle(&self) -> String {
        self.to_graph().to_turtle()
    }
}

fn ontology_term(local: &str) -> String {
    format!("{}{}", vocab::SPATIAL_ONT_NS, local)
}

/// Declarations of the speed properties
pub fn trace_ontology() -> TurtleGraph {
    let mut graph = TurtleGraph::with_default_prefixes()
        .with_prefix("spont", vocab::SPATIAL_ONT_NS)
        .with_prefix("spres", vocab::SPATIAL_RES_NS);
    let move_class = ontology_term(MOVE_CLASS);

    for property in [HAS_SPEED_AVG, HAS_SPEED_STDEV] {
        let property = ontology_term(property);
        graph.add_type(&property, vocab::OWL_DATATYPE_PROPERTY);
        graph.add(&property, vocab::RDFS_DOMAIN, Term::iri(&move_class));
        graph.add(&property, vocab::RDFS_RANGE, Term::iri(vocab::XSD_DOUBLE));
    }

    graph
}

/// Convert the records of one trace into a move
///
/// Blank lines are ignored. Returns `Ok(None)` for traces with fewer than two
/// fixes.
pub fn convert_trace(input: &str) -> Result<Option<MoveDescription>, TraceError> {
    let fixes = input
        .lines()
        .enumerate()
        .filter(|(_, record)| !record.trim().is_empty())
        .map(|(idx, record)| GpsFix::parse(record, idx + 1))
        .collect::<Result<Vec<_>, _>>()?;

    let (first, last) = match (fixes.first(), fixes.last()) {
        (Some(first), Some(last)) if fixes.len() >= 2 => (first, last),
        _ => {
            debug!("Trace with {} fixes yields no move", fixes.len());
            return Ok(None);
        }
    };

    if fixes.iter().any(|fix| fix.user != first.user || fix.label != first.label) {
        warn!("Trace mixes users or labels; using user {} and label {}", first.user, first.label);
    }

    let mut speeds = Vec::with_capacity(fixes.len() - 1);
    for pair in fixes.windows(2) {
        let seconds = (pair[1].timestamp - pair[0].timestamp).num_milliseconds() as f64 / 1000.0;
        if seconds <= 0.0 {
            warn!(
                "Skipping segment {} -> {} with non-positive time delta",
                pair[0].timestamp, pair[1].timestamp
            );
            continue;
        }
        let km = haversine_km(&pair[0].position, &pair[1].position);
        speeds.push(km / (seconds / 3600.0));
    }

    let move_id = format!(
        "move_{}_{}_-_{}",
        first.user,
        file_safe_timestamp(&first.timestamp),
        file_safe_timestamp(&last.timestamp)
    );

    let statistics = SpeedStatistics::from_speeds(&speeds);
    if statistics.is_none() {
        warn!("Too few speeds for {} to compute statistics", move_id);
    }

    Ok(Some(MoveDescription {
        move_id,
        user: first.user.clone(),
        label: first.label.clone(),
        path: LineString::new(fixes.iter().map(|fix| fix.position).collect()),
        speeds,
        statistics,
    }))
}
