use crate::error::{CliError, Result};
use nanolysis::core::geometry::{AxisRange, Cell};
use nanolysis::engine::Query;
use nanolysis::engine::config::{CoordinateMode, RowPolicy, Tokenizer};
use nanolysis::workflows::reduce::ErrorPolicy;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileEngineConfig {
    pub coordinate_mode: Option<CoordinateMode>,
    pub row_policy: Option<RowPolicy>,
    pub tokenizer: Option<Tokenizer>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileOutputConfig {
    pub prefix: Option<String>,
    pub on_error: Option<ErrorPolicy>,
}

/// One `[[select]]` entry.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case", tag = "by")]
pub enum FileQuery {
    Chain { id: u64 },
    Type { id: u32 },
    Cell { x: [f64; 2], y: [f64; 2], z: [f64; 2] },
}

impl From<FileQuery> for Query {
    fn from(q: FileQuery) -> Self {
        let range = |[low, high]: [f64; 2]| AxisRange::new(low, high);
        match q {
            FileQuery::Chain { id } => Query::Chain(id),
            FileQuery::Type { id } => Query::Type(id),
            FileQuery::Cell { x, y, z } => Query::Cell(Cell::new(range(x), range(y), range(z))),
        }
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub engine: Option<FileEngineConfig>,
    pub output: Option<FileOutputConfig>,
    #[serde(default)]
    pub select: Vec<FileQuery>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
