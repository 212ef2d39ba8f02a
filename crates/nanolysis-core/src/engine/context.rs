use super::config::EngineConfig;
use super::error::EngineError;
use super::store::SnapshotStore;
use crate::core::geometry::BoundingBox;
use crate::core::io::dump::DumpFile;
use crate::core::io::origin::OriginFile;
use crate::core::io::traits::FormatReader;
use crate::core::models::bead::{BeadId, BeadRecord};
use crate::core::models::chain::{ChainId, ChainIndex};
use crate::core::models::snapshot::Snapshot;
use std::path::Path;
use std::sync::Arc;

/// Ties the chain index, the current snapshot and the parsing configuration together.
///
/// An engine is built once per worker. The chain index is immutable after loading and
/// may be shared between engines through [`Engine::with_chain_index`]; the snapshot
/// store is private to each engine. Selections are accumulated in a caller-owned
/// [`SelectionBuffer`](crate::core::models::selection::SelectionBuffer), which is why the
/// query methods only need `&self`.
///
/// Every operation other than loading the chain index requires one; every operation
/// other than loading the index or reading a snapshot also requires a snapshot. Missing
/// either is a [`EngineError::Configuration`].
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    chains: Option<Arc<ChainIndex>>,
    store: SnapshotStore,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            chains: None,
            store: SnapshotStore::new(),
        }
    }

    /// Creates an engine around an already loaded chain index.
    pub fn with_chain_index(config: EngineConfig, chains: Arc<ChainIndex>) -> Self {
        Self {
            config,
            chains: Some(chains),
            store: SnapshotStore::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Loads the origin file and replaces any previously loaded chain index.
    ///
    /// Returns the shared handle so the index can be handed to further engines.
    pub fn set_origin<P: AsRef<Path>>(&mut self, path: P) -> Result<Arc<ChainIndex>, EngineError> {
        let path = path.as_ref();
        let index = OriginFile::read_from_path(path, &self.config.row_policy)
            .map_err(|e| EngineError::from_format(path, e))?;
        let index = Arc::new(index);
        self.chains = Some(Arc::clone(&index));
        Ok(index)
    }

    pub fn chain_index(&self) -> Result<&ChainIndex, EngineError> {
        self.chains
            .as_deref()
            .ok_or_else(|| EngineError::Configuration("origin file has not been set".into()))
    }

    pub fn shared_chain_index(&self) -> Option<Arc<ChainIndex>> {
        self.chains.clone()
    }

    /// Reads a dump file and makes it the current snapshot.
    ///
    /// On failure the previous snapshot, if any, stays current.
    pub fn read<P: AsRef<Path>>(&mut self, path: P) -> Result<&Snapshot, EngineError> {
        self.chain_index()?;
        let path = path.as_ref();
        let snapshot = DumpFile::read_from_path(path, &self.config.dump_options())
            .map_err(|e| EngineError::from_format(path, e))?;
        Ok(self.store.replace(snapshot))
    }

    pub fn current(&self) -> Result<&Snapshot, EngineError> {
        self.ready().map(|(_, snapshot)| snapshot)
    }

    pub fn find_by_id(&self, id: BeadId) -> Result<&BeadRecord, EngineError> {
        self.ready()?;
        Ok(self.store.find_by_id(id)?)
    }

    /// Resolves the bead at the 0-indexed `position` of `chain` in the current snapshot.
    pub fn bead_at(&self, chain: ChainId, position: usize) -> Result<&BeadRecord, EngineError> {
        let (chains, _) = self.ready()?;
        let id = chains.bead_at(chain, position)?;
        Ok(self.store.find_by_id(id)?)
    }

    pub fn bounding_box(&self) -> Result<BoundingBox, EngineError> {
        let (_, snapshot) = self.ready()?;
        Ok(BoundingBox::compute(snapshot)?)
    }

    pub(crate) fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Checks both preconditions and hands out what they guard.
    pub(crate) fn ready(&self) -> Result<(&ChainIndex, &Snapshot), EngineError> {
        let chains = self.chain_index()?;
        let snapshot = self
            .store
            .current()
            .ok_or_else(|| EngineError::Configuration("no snapshot has been read".into()))?;
        Ok((chains, snapshot))
    }
}
