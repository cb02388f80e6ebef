//! Pairwise geometry between selected atoms.

pub mod distance;
