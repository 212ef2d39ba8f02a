use crate::core::geometry::GeometryError;
use crate::core::io::FormatError;
use crate::core::models::chain::LookupError;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Lookup failed: {0}")]
    Lookup(#[from] LookupError),

    #[error("Precondition failed: {0}")]
    Precondition(&'static str),

    #[error("Empty data: {0}")]
    EmptyData(String),

    #[error("Malformed file '{path}': {source}", path = path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: FormatError,
    },

    #[error(
        "Duplicate timestep: '{later}' would overwrite '{output}', already produced from '{first}'",
        later = later.display(),
        output = output.display(),
        first = first.display()
    )]
    OutputConflict {
        output: PathBuf,
        first: PathBuf,
        later: PathBuf,
    },

    #[error("I/O error on '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl EngineError {
    /// Attaches `path` to a codec error, keeping file-system failures apart from
    /// malformed content.
    pub(crate) fn from_format(path: &Path, err: FormatError) -> Self {
        match err {
            FormatError::Io(source) => Self::Io {
                path: path.to_path_buf(),
                source,
            },
            source => Self::Format {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}

impl From<GeometryError> for EngineError {
    fn from(err: GeometryError) -> Self {
        match err {
            GeometryError::EmptySnapshot => Self::EmptyData(err.to_string()),
            GeometryError::InvertedRange { .. } | GeometryError::NanBound { .. } => {
                Self::Configuration(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Axis;

    #[test]
    fn io_failures_stay_distinct_from_format_failures() {
        let path = Path::new("dump.in");
        let io_err = FormatError::Io(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(matches!(
            EngineError::from_format(path, io_err),
            EngineError::Io { .. }
        ));

        let format_err = FormatError::DuplicateBead(3);
        let err = EngineError::from_format(path, format_err);
        assert!(matches!(err, EngineError::Format { .. }));
        assert!(err.to_string().contains("dump.in"));
    }

    #[test]
    fn output_conflict_names_both_inputs() {
        let err = EngineError::OutputConflict {
            output: PathBuf::from("out/test-100.in"),
            first: PathBuf::from("a.in"),
            later: PathBuf::from("b.in"),
        };
        assert_eq!(
            err.to_string(),
            "Duplicate timestep: 'b.in' would overwrite 'out/test-100.in', already produced from 'a.in'"
        );
    }

    #[test]
    fn geometry_errors_map_to_taxonomy() {
        assert!(matches!(
            EngineError::from(GeometryError::EmptySnapshot),
            EngineError::EmptyData(_)
        ));
        assert!(matches!(
            EngineError::from(GeometryError::NanBound { axis: Axis::X }),
            EngineError::Configuration(_)
        ));
    }
}
