//! # WaterShell Core Library
//!
//! Extraction of water oxygen-oxygen (O-O) distances from multi-frame molecular
//! trajectories, with classification of each water's neighbours into solvation
//! shells.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`MolecularSystem`,
//!   `Trajectory`, `DistanceTensor`), water oxygen selection, pairwise geometry
//!   and file I/O.
//!
//! - **[`engine`]: The Logic Core.** The `ShellExtractor`, which turns a dense
//!   distance tensor into the sorted, first-shell, second-shell or combined
//!   distance views, together with its configuration and error types.
//!
//! - **[`workflows`]: The Public API.** End-to-end procedures that go from a
//!   loaded trajectory to per-water shell distances in a single call.

pub mod core;
pub mod engine;
pub mod workflows;
