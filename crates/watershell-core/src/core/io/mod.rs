//! Provides input/output functionality for trajectories and shell distance tables.
//!
//! Trajectories are read through the [`traits::TrajectoryFile`] interface; the
//! [`bgf`] module implements it for multi-frame BGF files. Extraction results are
//! written as CSV tables by [`table`].

pub mod bgf;
pub mod table;
pub mod traits;
