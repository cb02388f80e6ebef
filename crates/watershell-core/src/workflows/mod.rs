//! # Workflows Module
//!
//! End-to-end entry points that take a parsed trajectory and a configuration and
//! return finished results, reporting progress along the way.
//!
//! - **Oxygen-oxygen distances** ([`oo_distances`]): water selection, per-frame
//!   pair distances and shell extraction in one call.

pub mod oo_distances;
