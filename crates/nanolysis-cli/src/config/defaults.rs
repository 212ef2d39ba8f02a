use nanolysis::engine::config::{CoordinateMode, RowPolicy, Tokenizer};
use nanolysis::workflows::reduce::{DEFAULT_PREFIX, ErrorPolicy};

pub struct DefaultsConfig {
    pub coordinate_mode: CoordinateMode,
    pub row_policy: RowPolicy,
    pub tokenizer: Tokenizer,
    pub prefix: String,
    pub on_error: ErrorPolicy,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            coordinate_mode: CoordinateMode::Raw,
            row_policy: RowPolicy::Lenient,
            tokenizer: Tokenizer::SingleSpace,
            prefix: DEFAULT_PREFIX.to_string(),
            on_error: ErrorPolicy::Abort,
        }
    }
}
