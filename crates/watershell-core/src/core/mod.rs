//! # Core Module
//!
//! Fundamental building blocks for water structure analysis.
//!
//! - **Molecular Representation** ([`models`]) - Atoms, systems, trajectories and
//!   dense distance arrays
//! - **Geometry** ([`geometry`]) - Per-frame pairwise distances and square-form conversion
//! - **File I/O** ([`io`]) - Multi-frame BGF reading and CSV output of shell distances
//! - **Structural Knowledge** ([`topology`]) - Selection of water oxygen atoms

pub mod geometry;
pub mod io;
pub mod models;
pub mod topology;
