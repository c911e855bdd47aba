//! Geometry values, WKT and topological relations
//!
//! This module holds the value types every generator produces and every
//! renderer consumes.
//!
//! # Overview
//!
//! - **Point**: longitude/latitude pair with fixed-precision rounding
//! - **Geometry**: point, line string or closed polygon with WKT rendering
//! - **Square**: the axis-aligned square all hotel parts are built from
//! - **Topology**: RCC8 relations between polygons via `geo`
//! - **WKT**: parsing of the WKT subset the generators emit
//!
//! # Usage Example
//!
//! ```rust
//! use spatial_learning_data::geometry::*;
//!
//! let room = Square::new(Point::new(13.74, 51.05), 0.0001).to_polygon(HOTEL_PRECISION);
//! let wkt = room.to_wkt();
//! assert!(wkt.starts_with("POLYGON(("));
//!
//! let parsed = parse(&wkt).unwrap();
//! assert_eq!(parsed, Geometry::Polygon(room));
//! ```

pub mod point;
pub mod shape;
pub mod square;
pub mod topology;
pub mod wkt;

// Re-export all public types for convenience
pub use point::*;
pub use shape::*;
pub use square::*;
pub use topology::*;
pub use wkt::{parse, WktError};
