//! Generation pipeline
//!
//! This module wires configuration, generators and renderers together and
//! carries the ambient concerns of a run.
//!
//! # Overview
//!
//! - **DatasetOrchestrator**: Builds the generators from a configuration and writes every output file
//! - **GenerationStatistics**: Counts geometries, hotels, moves and files of a run
//! - **GeneratorError**: Error taxonomy with recoverability and categories
//! - **LoggingConfig**: Tracing subscriber setup for the binary and tests
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use spatial_learning_data::pipeline::*;
//! use spatial_learning_data::types::*;
//!
//! let config = GeneratorConfig {
//!     sample_sizes: vec![10],
//!     num_positive: 5,
//!     num_negative: 5,
//!     seed: Some(1),
//!     ..Default::default()
//! };
//!
//! let mut orchestrator = DatasetOrchestrator::new(config)?;
//! let stats = orchestrator.run(None)?;
//! println!("{}", stats.compact_summary());
//! # Ok::<(), GeneratorError>(())
//! ```

pub mod error;
pub mod logging;
pub mod orchestrator;
pub mod statistics;

pub use error::*;
pub use logging::*;
pub use orchestrator::*;
pub use statistics::*;
