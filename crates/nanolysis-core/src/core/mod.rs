//! # Core Module
//!
//! Stateless building blocks for working with coarse-grained polymer trajectories.
//!
//! - **Data Models** ([`models`]) - Bead records, the chain index, snapshots and the
//!   selection buffer
//! - **File I/O** ([`io`]) - Readers for origin and dump files and the reduced-dump writer
//! - **Geometry** ([`geometry`]) - Closed axis ranges, cells and bounding boxes
//!
//! Nothing in this layer keeps state between calls; the [`engine`](crate::engine) ties
//! these pieces together.

pub mod geometry;
pub mod io;
pub mod models;
