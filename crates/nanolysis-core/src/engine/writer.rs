use super::context::Engine;
use super::error::EngineError;
use crate::core::io::dump::DumpFile;
use crate::core::models::selection::SelectionBuffer;
use std::path::Path;

impl Engine {
    /// Writes the buffered beads to `path` as a reduced snapshot.
    ///
    /// The header comes from the current snapshot with its atom count replaced by the
    /// number of buffered beads. The buffer is cleared only when `flush` is set and the
    /// write succeeded.
    pub fn write<P: AsRef<Path>>(
        &self,
        buffer: &mut SelectionBuffer,
        path: P,
        flush: bool,
    ) -> Result<(), EngineError> {
        let (_, snapshot) = self.ready()?;
        if buffer.is_empty() {
            return Err(EngineError::Precondition("nothing has been selected"));
        }

        let path = path.as_ref();
        DumpFile::write_to_path(&snapshot.header, buffer.as_slice(), path)
            .map_err(|e| EngineError::from_format(path, e))?;

        if flush {
            buffer.clear();
        }
        Ok(())
    }
}
