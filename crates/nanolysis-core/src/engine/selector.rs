use super::context::Engine;
use super::error::EngineError;
use crate::core::geometry::Cell;
use crate::core::models::bead::BeadType;
use crate::core::models::chain::ChainId;
use crate::core::models::selection::SelectionBuffer;
use std::fmt;

/// A selection query, as data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Query {
    /// Every bead of a chain, in chain order.
    Chain(ChainId),
    /// Every bead of a type, in snapshot order.
    Type(BeadType),
    /// Every bead inside a closed cell, in snapshot order.
    Cell(Cell),
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::Chain(chain) => write!(f, "chain {}", chain),
            Query::Type(bead_type) => write!(f, "type {}", bead_type),
            Query::Cell(cell) => write!(
                f,
                "cell x[{}, {}] y[{}, {}] z[{}, {}]",
                cell.x.low, cell.x.high, cell.y.low, cell.y.high, cell.z.low, cell.z.high
            ),
        }
    }
}

/// Selection queries. Each appends to `buffer` without clearing it first and returns
/// the number of beads appended.
impl Engine {
    /// Appends every bead of `chain`, in chain order.
    ///
    /// All ids are resolved before anything is appended: an unknown chain or a bead
    /// missing from the current snapshot fails with [`EngineError::Lookup`] and leaves
    /// `buffer` untouched.
    pub fn select_by_chain(
        &self,
        buffer: &mut SelectionBuffer,
        chain: ChainId,
    ) -> Result<usize, EngineError> {
        let (chains, _) = self.ready()?;
        let resolved = self.store().resolve_all(chains.chains_for(chain)?)?;
        let count = resolved.len();
        buffer.extend(resolved);
        Ok(count)
    }

    /// Appends every bead whose type equals `bead_type`. Matching nothing is not an error.
    pub fn select_by_type(
        &self,
        buffer: &mut SelectionBuffer,
        bead_type: BeadType,
    ) -> Result<usize, EngineError> {
        let (_, snapshot) = self.ready()?;
        let before = buffer.len();
        buffer.extend(
            snapshot
                .beads
                .iter()
                .filter(|bead| bead.bead_type == bead_type)
                .cloned(),
        );
        Ok(buffer.len() - before)
    }

    /// Appends every bead inside `cell`, bounds included.
    ///
    /// A range with `low > high` or a NaN bound is rejected with
    /// [`EngineError::Configuration`] before anything is appended.
    pub fn select_by_cell(
        &self,
        buffer: &mut SelectionBuffer,
        cell: &Cell,
    ) -> Result<usize, EngineError> {
        let (_, snapshot) = self.ready()?;
        cell.validate()?;
        let before = buffer.len();
        buffer.extend(
            snapshot
                .beads
                .iter()
                .filter(|bead| cell.contains(&bead.position))
                .cloned(),
        );
        Ok(buffer.len() - before)
    }

    pub fn select(&self, buffer: &mut SelectionBuffer, query: &Query) -> Result<usize, EngineError> {
        match query {
            Query::Chain(chain) => self.select_by_chain(buffer, *chain),
            Query::Type(bead_type) => self.select_by_type(buffer, *bead_type),
            Query::Cell(cell) => self.select_by_cell(buffer, cell),
        }
    }
}
