use super::bead::BeadId;
use std::collections::HashMap;
use thiserror::Error;

/// Identifier of a chain ("walk") as given in the second column of the origin file.
pub type ChainId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Unknown chain: {0}")]
    UnknownChain(ChainId),

    #[error("Bead {0} is not present in the current snapshot")]
    UnknownBead(BeadId),

    #[error("Position {position} is out of range for chain {chain} (length {len})")]
    PositionOutOfRange {
        chain: ChainId,
        position: usize,
        len: usize,
    },
}

/// Maps every chain to the ordered global IDs of its beads.
///
/// Bead order within a chain is the order of appearance in the origin file. The index
/// is built once through [`ChainIndexBuilder`] and is read-only afterwards, so it can
/// be shared between workers behind an `Arc`.
///
/// Membership is not checked against any snapshot: a chain may name beads that a
/// later snapshot does not contain, which surfaces as a lookup failure at query time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainIndex {
    chains: HashMap<ChainId, Vec<BeadId>>,
}

impl ChainIndex {
    /// Returns the ordered bead IDs of `chain`.
    pub fn chains_for(&self, chain: ChainId) -> Result<&[BeadId], LookupError> {
        self.chains
            .get(&chain)
            .map(Vec::as_slice)
            .ok_or(LookupError::UnknownChain(chain))
    }

    /// Returns the global ID of the bead at the 0-indexed `position` of `chain`.
    pub fn bead_at(&self, chain: ChainId, position: usize) -> Result<BeadId, LookupError> {
        let beads = self.chains_for(chain)?;
        beads
            .get(position)
            .copied()
            .ok_or(LookupError::PositionOutOfRange {
                chain,
                position,
                len: beads.len(),
            })
    }

    pub fn contains(&self, chain: ChainId) -> bool {
        self.chains.contains_key(&chain)
    }

    /// Number of chains.
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// All chain IDs in ascending order.
    pub fn chain_ids(&self) -> Vec<ChainId> {
        let mut ids: Vec<ChainId> = self.chains.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Iterates over `(chain, beads)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (ChainId, &[BeadId])> {
        self.chains.iter().map(|(&id, beads)| (id, beads.as_slice()))
    }
}

#[derive(Debug, Default)]
pub struct ChainIndexBuilder {
    chains: HashMap<ChainId, Vec<BeadId>>,
}

impl ChainIndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `bead` to `chain`, creating the chain on first sight.
    pub fn push(&mut self, bead: BeadId, chain: ChainId) -> &mut Self {
        self.chains.entry(chain).or_default().push(bead);
        self
    }

    pub fn build(self) -> ChainIndex {
        ChainIndex {
            chains: self.chains,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> ChainIndex {
        let mut builder = ChainIndexBuilder::new();
        builder.push(1, 10).push(2, 10).push(3, 20).push(4, 10);
        builder.build()
    }

    #[test]
    fn chains_preserve_insertion_order() {
        let index = sample_index();
        assert_eq!(index.chains_for(10).unwrap(), &[1, 2, 4]);
        assert_eq!(index.chains_for(20).unwrap(), &[3]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.chain_ids(), vec![10, 20]);
    }

    #[test]
    fn unknown_chain_is_a_lookup_error() {
        let index = sample_index();
        assert_eq!(index.chains_for(99), Err(LookupError::UnknownChain(99)));
        assert_eq!(index.bead_at(99, 0), Err(LookupError::UnknownChain(99)));
    }

    #[test]
    fn bead_at_resolves_positions_and_rejects_out_of_range() {
        let index = sample_index();
        assert_eq!(index.bead_at(10, 0), Ok(1));
        assert_eq!(index.bead_at(10, 2), Ok(4));
        assert_eq!(
            index.bead_at(10, 3),
            Err(LookupError::PositionOutOfRange {
                chain: 10,
                position: 3,
                len: 3
            })
        );
    }

    #[test]
    fn empty_builder_yields_empty_index() {
        let index = ChainIndexBuilder::new().build();
        assert!(index.is_empty());
        assert!(!index.contains(1));
    }
}
