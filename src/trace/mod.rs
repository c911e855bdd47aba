//! GPS trace conversion
//!
//! Turns a CSV file of GPS fixes into a move: a line string through all fixes
//! annotated with speed statistics, rendered as Turtle.
//!
//! # Usage Example
//!
//! ```rust
//! use spatial_learning_data::trace::*;
//!
//! let csv = "\"7\",\"2008-10-23 02:53:04\",\"116.3184\",\"39.9847\",\"walk\"\n\
//!            \"7\",\"2008-10-23 02:53:10\",\"116.3185\",\"39.9846\",\"walk\"\n";
//! let movement = convert_trace(csv).unwrap().unwrap();
//! assert_eq!(movement.file_name(), "walk_move_7_2008-10-23T02-53-04_-_2008-10-23T02-53-10.ttl");
//! ```

pub mod converter;

pub use converter::*;
