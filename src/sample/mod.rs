//! Dataset sampling
//!
//! Reads existing N-Triples geometry datasets and draws proportional random
//! subsets of given sizes from them, written back as N-Triples knowledge
//! bases with matching PostGIS load scripts.
//!
//! # Usage Example
//!
//! ```rust
//! use spatial_learning_data::sample::*;
//!
//! let nt = "<http://x/f> <http://geovocab.org/geometry#geometry> <http://x/g> .\n\
//!           <http://x/g> <http://www.opengis.net/ont/geosparql#asWKT> \"POINT(1 2)\" .\n";
//! let source = SourceDataset::parse("points.nt", nt).unwrap();
//! let set = DataSampler::with_seed(1).sample(&[source], 1);
//! assert_eq!(set.len(), 1);
//! assert_eq!(set.ntriples_file_name(), "sample_1.nt");
//! ```

pub mod ntriples;
pub mod sampler;

pub use ntriples::{parse_document, parse_line, NTriplesError};
pub use sampler::*;
