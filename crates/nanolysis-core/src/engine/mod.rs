//! # Engine Module
//!
//! The engine holds the state a post-processing session needs: the chain index built
//! from the origin file, the most recently read snapshot, and the parsing
//! configuration. Queries against that state append into a caller-owned
//! [`SelectionBuffer`](crate::core::models::selection::SelectionBuffer), and the buffer
//! is written back out as a reduced dump file.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Coordinate mode, row policy and tokenizer
//! - **Snapshot Storage** ([`store`]) - The current snapshot and its id index
//! - **Progress Monitoring** ([`progress`]) - Callback hooks for batch workflows
//! - **Error Handling** ([`error`]) - The engine error taxonomy
//!
//! The [`Engine`] facade itself is split by concern: loading and lookups, selection
//! queries, and the reduced-file writer each live in their own submodule.

pub mod config;
mod context;
pub mod error;
pub mod progress;
mod selector;
pub mod store;
mod writer;

pub use context::Engine;
pub use selector::Query;
