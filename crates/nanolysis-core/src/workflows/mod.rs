//! # Workflows Module
//!
//! High-level entry points built on top of the [`engine`](crate::engine). A workflow
//! handles directory traversal, output placement, progress reporting and logging,
//! leaving the engine itself free of I/O policy.
//!
//! - **Batch Reduction** ([`reduce`]) - Reduce every dump file in a directory to the
//!   beads matched by a list of queries, one output file per timestep.

pub mod reduce;
