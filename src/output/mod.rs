//! Renderers turning generated data into files
//!
//! Every renderer returns a `String`; writing the files is left to the
//! pipeline orchestrator.
//!
//! - **rdf**: [`TurtleGraph`] with prefix abbreviation
//! - **kb**: primitive and hotel knowledge bases
//! - **sql**: `INSERT` scripts for a PostGIS database
//! - **labels**: positive / negative example IRI lists

pub mod kb;
pub mod labels;
pub mod rdf;
pub mod sql;

pub use kb::*;
pub use labels::*;
pub use rdf::{vocab, Term, Triple, TurtleGraph};
pub use sql::*;
