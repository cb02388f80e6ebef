//! # Topology Module
//!
//! Structural knowledge used to pick atoms out of a molecular system. Currently
//! this covers the identification of water oxygens, whose order defines the water
//! axis of every distance array produced by the library.

pub mod water;
