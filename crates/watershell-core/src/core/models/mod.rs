//! # Core Models Module
//!
//! Data structures describing the molecular input and the numeric arrays that
//! flow through shell extraction.
//!
//! ## Key Components
//!
//! - [`atom`] - A single atom record as read from a structure file
//! - [`system`] - The ordered topology of all atoms
//! - [`trajectory`] - A topology together with one coordinate set per frame
//! - [`distances`] - Dense `(frames, waters, width)` distance arrays
//!
//! ## Usage
//!
//! ```ignore
//! use watershell::core::models::distances::DistanceTensor;
//!
//! let tensor = DistanceTensor::new(1, 2, vec![0.0, 2.8, 2.8, 0.0])?;
//! assert_eq!(tensor.row(0, 0), &[0.0, 2.8]);
//! ```

pub mod atom;
pub mod distances;
pub mod system;
pub mod trajectory;
