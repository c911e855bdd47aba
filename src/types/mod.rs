//! Core types, identifiers and configuration
//!
//! This module contains the enumerations, content keys and configuration
//! structures shared by the generators, renderers and the pipeline.
//!
//! # Overview
//!
//! - **Identifiers**: [`ResourceKey`], a UUID v5 content key over WKT text
//! - **Enums**: orientations, geometry kinds and hotel labels
//! - **Configuration**: [`GeneratorConfig`] with validation and CLI support
//!
//! # Usage Example
//!
//! ```rust
//! use spatial_learning_data::types::*;
//!
//! let key = ResourceKey::from_wkt("POINT(13.74 51.05)");
//! assert_eq!(key, ResourceKey::from_wkt("POINT(13.74 51.05)"));
//!
//! let kind = GeometryKind::from_wkt("POLYGON((0 0, 1 0, 1 1, 0 0))").unwrap();
//! assert_eq!(kind.table_name(), "polygon");
//!
//! let config = GeneratorConfig { num_positive: 10, ..Default::default() };
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
