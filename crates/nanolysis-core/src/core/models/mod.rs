//! # Core Models Module
//!
//! Plain data structures shared by the codec, the engine and the workflows.
//!
//! - [`bead`] - A single bead record of a snapshot
//! - [`chain`] - The chain ("walk") index built from the origin file
//! - [`snapshot`] - One timestep: header, box lengths and bead records
//! - [`selection`] - The caller-owned accumulator of selected beads

pub mod bead;
pub mod chain;
pub mod selection;
pub mod snapshot;
