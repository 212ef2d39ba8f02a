use crate::core::io::dump::DumpReadOptions;
pub use crate::core::io::{CoordinateMode, RowPolicy, Tokenizer};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

/// Parsing behavior of an [`Engine`](super::Engine).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub coordinate_mode: CoordinateMode,
    pub row_policy: RowPolicy,
    pub tokenizer: Tokenizer,
}

impl EngineConfig {
    pub(crate) fn dump_options(&self) -> DumpReadOptions {
        DumpReadOptions {
            coordinate_mode: self.coordinate_mode,
            row_policy: self.row_policy,
            tokenizer: self.tokenizer,
        }
    }
}

/// Builds an [`EngineConfig`].
///
/// The coordinate mode has no default because raw and box-scaled dumps are not
/// distinguishable from their content; the row policy defaults to
/// [`RowPolicy::Lenient`] and the tokenizer to [`Tokenizer::SingleSpace`].
#[derive(Default)]
pub struct EngineConfigBuilder {
    coordinate_mode: Option<CoordinateMode>,
    row_policy: Option<RowPolicy>,
    tokenizer: Option<Tokenizer>,
}

impl EngineConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn coordinate_mode(mut self, mode: CoordinateMode) -> Self {
        self.coordinate_mode = Some(mode);
        self
    }
    pub fn row_policy(mut self, policy: RowPolicy) -> Self {
        self.row_policy = Some(policy);
        self
    }
    pub fn strict(self, strict: bool) -> Self {
        self.row_policy(if strict {
            RowPolicy::Strict
        } else {
            RowPolicy::Lenient
        })
    }
    pub fn tokenizer(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizer = Some(tokenizer);
        self
    }

    pub fn build(self) -> Result<EngineConfig, ConfigError> {
        Ok(EngineConfig {
            coordinate_mode: self
                .coordinate_mode
                .ok_or(ConfigError::MissingParameter("coordinate_mode"))?,
            row_policy: self.row_policy.unwrap_or_default(),
            tokenizer: self.tokenizer.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_requires_coordinate_mode() {
        let result = EngineConfigBuilder::new().strict(true).build();
        assert_eq!(
            result,
            Err(ConfigError::MissingParameter("coordinate_mode"))
        );
    }

    #[test]
    fn build_applies_defaults() {
        let config = EngineConfigBuilder::new()
            .coordinate_mode(CoordinateMode::ScaledByBox)
            .build()
            .unwrap();
        assert_eq!(config.coordinate_mode, CoordinateMode::ScaledByBox);
        assert_eq!(config.row_policy, RowPolicy::Lenient);
        assert_eq!(config.tokenizer, Tokenizer::SingleSpace);
    }

    #[test]
    fn dump_options_mirror_config() {
        let config = EngineConfigBuilder::new()
            .coordinate_mode(CoordinateMode::Raw)
            .strict(true)
            .tokenizer(Tokenizer::Whitespace)
            .build()
            .unwrap();
        let options = config.dump_options();
        assert_eq!(options.row_policy, RowPolicy::Strict);
        assert_eq!(options.tokenizer, Tokenizer::Whitespace);
        assert_eq!(options.coordinate_mode, CoordinateMode::Raw);
    }
}
