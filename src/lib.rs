//! Spatial Learning Data
//!
//! Synthetic geospatial training data for spatial concept learning: random
//! primitive geometries and labelled hotel layouts, rendered as RDF
//! knowledge bases, PostGIS load scripts and example lists.
//!
//! # Overview
//!
//! This library generates the datasets a concept learner is trained and
//! evaluated on. Every geometry is produced as WKT and named by a content
//! key, so the same geometry always maps to the same RDF resources.
//!
//! ## Key Features
//!
//! - **Primitive Geometries**: Points, line strings and polygons scattered around a center coordinate
//! - **Hotel Layouts**: Car-friendly hotels and three kinds of not-car-friendly hotels
//! - **Topology**: RCC8 relations between polygons, used to verify hotel labels
//! - **Output Renderers**: Turtle knowledge bases, SQL insert scripts and label lists
//! - **Trace Conversion**: GPS trace CSV files turned into moves with speed statistics
//! - **Dataset Sampling**: Proportional random subsets of existing N-Triples datasets
//! - **Reproducibility**: Seeded generators produce identical datasets across runs
//!
//! ## Quick Start
//!
//! ```rust
//! use spatial_learning_data::*;
//!
//! let mut generator = HotelLayoutGenerator::with_seed(HotelSettings::default(), 7);
//! let samples = generator.generate(3, 3);
//!
//! let kb = hotel_kb(&samples).to_turtle();
//! assert!(kb.contains("geo:asWKT"));
//! assert!(samples.iter().all(|hotel| hotel.label_matches_geometry()));
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Enums, content keys and configuration
//! - [`geometry`]: Points, line strings, polygons, WKT parsing and topology
//! - [`generator`]: Primitive and hotel generators
//! - [`output`]: Turtle, SQL and label renderers
//! - [`trace`]: GPS trace conversion
//! - [`sample`]: N-Triples reading and dataset sampling
//! - [`pipeline`]: Orchestration, statistics, errors and logging
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Types     │    │  Geometry   │    │  Generator  │
//! │             │    │             │    │             │
//! │ Keys        │◄───┤ WKT         │◄───┤ Primitives  │
//! │ Enums       │    │ Topology    │    │ Hotels      │
//! │ Config      │    │             │    │             │
//! └─────────────┘    └─────────────┘    └─────────────┘
//!        ▲                   ▲                   ▲
//!        │                   │                   │
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Trace     │    │   Output    │    │  Pipeline   │
//! │             │    │             │    │             │
//! │ GPS Fixes   │───►│ Turtle      │◄───┤ Orchestrator│
//! │ Moves       │    │ SQL, Labels │    │ Statistics  │
//! └─────────────┘    └─────────────┘    └─────────────┘
//!                           ▲
//!                    ┌─────────────┐
//!                    │   Sample    │
//!                    │ N-Triples   │
//!                    │ Sampler     │
//!                    └─────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod generator;
pub mod geometry;
pub mod output;
pub mod pipeline;
pub mod sample;
pub mod trace;

pub mod types;

// Core types and configuration
pub use types::{
    CliArgs, Command, ConfigValidationError, GeneratorConfig, GeometryKind, HotelLabel,
    NegativeCase, Orientation, ResourceKey,
};

// Geometry
pub use geometry::{Geometry, LineString, Point, Polygon, SpatialRelation, WktError};

// Generators
pub use generator::{
    Hotel, HotelLayoutGenerator, HotelSamples, HotelSettings, PrimitiveGeometryGenerator,
    PrimitiveSettings,
};

// Renderers
pub use output::{hotel_kb, hotel_sql, label_list, primitive_kb, primitive_sql, TurtleGraph};

// Trace conversion
pub use trace::{convert_trace, MoveDescription, TraceError};

// Dataset sampling
pub use sample::{DataSampler, NTriplesError, SampleSet, SourceDataset};

// Pipeline
pub use pipeline::{
    DatasetOrchestrator, GenerationStatistics, GeneratorError, GeneratorResult, LoggingConfig,
};
