//! # Nanolysis Core Library
//!
//! Post-processing of molecular-dynamics dumps of polymer chains built from beads. The
//! library maps every bead to the chain ("walk") it belongs to, reads per-timestep
//! snapshots, selects beads by chain, type or spatial cell, and writes reduced snapshots
//! in the same text format for visualization.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Plain data models, the text codec and geometry.
//!
//! - **[`engine`]: The Stateful Layer.** [`engine::Engine`] owns the chain index and the
//!   current snapshot, answers selection queries into a caller-owned
//!   [`SelectionBuffer`](core::models::selection::SelectionBuffer), computes bounding
//!   boxes and writes reduced files.
//!
//! - **[`workflows`]: Orchestration.** Batch reduction of a directory of dumps on top of
//!   the engine, with progress reporting and logging.
//!
//! ```no_run
//! use nanolysis::core::models::selection::SelectionBuffer;
//! use nanolysis::engine::Engine;
//! use nanolysis::engine::config::{EngineConfigBuilder, CoordinateMode};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = EngineConfigBuilder::new()
//!     .coordinate_mode(CoordinateMode::ScaledByBox)
//!     .build()?;
//! let mut engine = Engine::new(config);
//! engine.set_origin("structure.in")?;
//! engine.read("dump_100000.in")?;
//!
//! let mut selection = SelectionBuffer::new();
//! engine.select_by_chain(&mut selection, 1050)?;
//! engine.select_by_type(&mut selection, 2)?;
//! engine.write(&mut selection, "reduced-100000.in", true)?;
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod engine;
pub mod workflows;
