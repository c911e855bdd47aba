//! Synthetic geometry and hotel generators
//!
//! Both generators own their random source. Construct them with `with_seed`
//! for reproducible datasets or `new` for entropy-seeded ones.
//!
//! # Usage Example
//!
//! ```rust
//! use spatial_learning_data::generator::*;
//! use spatial_learning_data::types::GeometryKind;
//!
//! let mut primitives = PrimitiveGeometryGenerator::with_seed(PrimitiveSettings::default(), 42);
//! primitives.set_span(100);
//! let polygon = primitives.generate(GeometryKind::Polygon);
//! assert!(polygon.to_wkt().starts_with("POLYGON"));
//!
//! let mut hotels = HotelLayoutGenerator::with_seed(HotelSettings::default(), 42);
//! let samples = hotels.generate(2, 2);
//! assert!(samples.positive.iter().all(|hotel| hotel.is_car_friendly()));
//! ```

pub mod hotel;
pub mod primitive;

pub use hotel::*;
pub use primitive::*;
