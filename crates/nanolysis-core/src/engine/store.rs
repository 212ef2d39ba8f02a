use crate::core::models::bead::{BeadId, BeadRecord};
use crate::core::models::chain::LookupError;
use crate::core::models::snapshot::Snapshot;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Holds the most recently read snapshot.
///
/// Lookups by global id go through a hash index from id to position in the bead list.
/// The index is built on first use and discarded whenever the snapshot is replaced, so
/// resolving a whole chain costs one pass over the snapshot rather than one per bead.
/// If a snapshot repeats an id, the first occurrence is the one found.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    current: Option<Snapshot>,
    id_index: OnceLock<HashMap<BeadId, usize>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the stored snapshot wholesale.
    pub fn replace(&mut self, snapshot: Snapshot) -> &Snapshot {
        self.id_index = OnceLock::new();
        self.current.insert(snapshot)
    }

    pub fn current(&self) -> Option<&Snapshot> {
        self.current.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }

    /// Finds the bead with global id `id`. With no snapshot loaded every id is unknown.
    pub fn find_by_id(&self, id: BeadId) -> Result<&BeadRecord, LookupError> {
        let snapshot = self.current.as_ref().ok_or(LookupError::UnknownBead(id))?;
        self.index()
            .get(&id)
            .map(|&idx| &snapshot.beads[idx])
            .ok_or(LookupError::UnknownBead(id))
    }

    /// Resolves every id in order, failing on the first one that is absent.
    pub fn resolve_all(&self, ids: &[BeadId]) -> Result<Vec<BeadRecord>, LookupError> {
        ids.iter()
            .map(|&id| self.find_by_id(id).cloned())
            .collect()
    }

    fn index(&self) -> &HashMap<BeadId, usize> {
        self.id_index.get_or_init(|| {
            let mut index = HashMap::new();
            if let Some(snapshot) = &self.current {
                index.reserve(snapshot.beads.len());
                for (idx, bead) in snapshot.beads.iter().enumerate() {
                    index.entry(bead.id).or_insert(idx);
                }
            }
            index
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::snapshot::SnapshotHeader;
    use nalgebra::Point3;

    fn snapshot(timestep: u64, ids: &[BeadId]) -> Snapshot {
        Snapshot {
            header: SnapshotHeader::default(),
            timestep,
            box_lengths: None,
            beads: ids
                .iter()
                .map(|&id| BeadRecord::new(id, 1, Point3::new(id as f64, 0.0, 0.0)))
                .collect(),
        }
    }

    #[test]
    fn empty_store_knows_no_beads() {
        let store = SnapshotStore::new();
        assert!(!store.is_loaded());
        assert_eq!(store.find_by_id(1), Err(LookupError::UnknownBead(1)));
    }

    #[test]
    fn find_by_id_returns_matching_record() {
        let mut store = SnapshotStore::new();
        store.replace(snapshot(10, &[5, 3, 8]));
        assert_eq!(store.find_by_id(3).unwrap().position.x, 3.0);
        assert_eq!(store.find_by_id(4), Err(LookupError::UnknownBead(4)));
    }

    #[test]
    fn replacing_the_snapshot_discards_the_index() {
        let mut store = SnapshotStore::new();
        store.replace(snapshot(10, &[1, 2]));
        assert!(store.find_by_id(2).is_ok());

        let current = store.replace(snapshot(20, &[7]));
        assert_eq!(current.timestep, 20);
        assert_eq!(store.find_by_id(2), Err(LookupError::UnknownBead(2)));
        assert!(store.find_by_id(7).is_ok());
    }

    #[test]
    fn first_occurrence_wins_for_repeated_ids() {
        let mut store = SnapshotStore::new();
        let mut snap = snapshot(0, &[1, 1]);
        snap.beads[1].bead_type = 9;
        store.replace(snap);
        assert_eq!(store.find_by_id(1).unwrap().bead_type, 1);
    }

    #[test]
    fn resolve_all_keeps_order_and_fails_on_missing_id() {
        let mut store = SnapshotStore::new();
        store.replace(snapshot(0, &[1, 2, 3]));

        let resolved = store.resolve_all(&[3, 1]).unwrap();
        let ids: Vec<_> = resolved.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![3, 1]);

        assert_eq!(
            store.resolve_all(&[1, 4, 2]),
            Err(LookupError::UnknownBead(4))
        );
    }
}
