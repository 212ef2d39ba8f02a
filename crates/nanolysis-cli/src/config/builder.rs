use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::ReduceArgs;
use crate::error::{CliError, Result};
use nanolysis::engine::Query;
use nanolysis::engine::config::{CoordinateMode, EngineConfigBuilder, RowPolicy};
use nanolysis::workflows::reduce::{ErrorPolicy, ReduceJob};
use serde::de::{DeserializeOwned, IntoDeserializer, value::StrDeserializer};

pub fn build_config(args: &ReduceArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let engine_file = file_config.engine.take().unwrap_or_default();
    let coordinate_mode = if args.scaled {
        CoordinateMode::ScaledByBox
    } else {
        engine_file
            .coordinate_mode
            .unwrap_or(defaults.coordinate_mode)
    };
    let row_policy = if args.strict {
        RowPolicy::Strict
    } else {
        engine_file.row_policy.unwrap_or(defaults.row_policy)
    };
    let tokenizer = engine_file.tokenizer.unwrap_or(defaults.tokenizer);

    let engine = EngineConfigBuilder::new()
        .coordinate_mode(coordinate_mode)
        .row_policy(row_policy)
        .tokenizer(tokenizer)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let output_file = file_config.output.take().unwrap_or_default();
    let prefix = args
        .prefix
        .clone()
        .or(output_file.prefix)
        .unwrap_or(defaults.prefix);
    if prefix.is_empty() || prefix.contains(['/', '\\']) {
        return Err(CliError::Argument(format!(
            "Invalid output prefix '{}'. It must be a non-empty file name.",
            prefix
        )));
    }
    let on_error = if args.skip_errors {
        ErrorPolicy::Skip
    } else {
        output_file.on_error.unwrap_or(defaults.on_error)
    };

    let queries = merge_queries(args, file_config)?;

    let job = ReduceJob::new(&args.input, &args.output)
        .with_prefix(prefix)
        .with_queries(queries)
        .on_error(on_error);

    Ok(AppConfig {
        origin_path: args.origin.clone(),
        engine,
        job,
    })
}

/// Queries given on the command line replace the file's `[[select]]` list; within the
/// command line, chains come first, then types, then cells.
fn merge_queries(args: &ReduceArgs, file_config: FileConfig) -> Result<Vec<Query>> {
    let cli_queries: Vec<Query> = args
        .chains
        .iter()
        .map(|&id| Query::Chain(id))
        .chain(args.types.iter().map(|&id| Query::Type(id)))
        .chain(args.cells.iter().map(|&cell| Query::Cell(cell)))
        .collect();

    let queries = if cli_queries.is_empty() {
        file_config.select.into_iter().map(Into::into).collect()
    } else {
        cli_queries
    };

    if queries.is_empty() {
        return Err(CliError::Config(
            "At least one selection is required, via --chain/--type/--cell or [[select]] in the config file."
                .to_string(),
        ));
    }
    Ok(queries)
}

fn parse_keyword<T: DeserializeOwned>(key: &str, value_str: &str) -> Result<T> {
    let de: StrDeserializer<'_, serde::de::value::Error> = value_str.into_deserializer();
    T::deserialize(de)
        .map_err(|e| CliError::Config(format!("Invalid value for {}: {} ({})", key, value_str, e)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    if set_values.is_empty() {
        return Ok(config);
    }
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key {
            "engine.coordinate-mode" => {
                config
                    .engine
                    .get_or_insert_with(Default::default)
                    .coordinate_mode = Some(parse_keyword(key, value_str)?);
            }
            "engine.row-policy" => {
                config
                    .engine
                    .get_or_insert_with(Default::default)
                    .row_policy = Some(parse_keyword(key, value_str)?);
            }
            "engine.tokenizer" => {
                config
                    .engine
                    .get_or_insert_with(Default::default)
                    .tokenizer = Some(parse_keyword(key, value_str)?);
            }
            "output.prefix" => {
                config.output.get_or_insert_with(Default::default).prefix =
                    Some(value_str.to_string());
            }
            "output.on-error" => {
                config.output.get_or_insert_with(Default::default).on_error =
                    Some(parse_keyword(key, value_str)?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nanolysis::core::geometry::{AxisRange, Cell};
    use nanolysis::engine::config::Tokenizer;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn base_reduce_args() -> ReduceArgs {
        ReduceArgs {
            origin: PathBuf::from("structure.in"),
            input: PathBuf::from("dumps"),
            output: PathBuf::from("reduced"),
            config: None,
            prefix: None,
            chains: vec![],
            types: vec![],
            cells: vec![],
            scaled: false,
            strict: false,
            skip_errors: false,
            set_values: vec![],
        }
    }

    fn write_config(dir: &tempfile::TempDir, toml: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        fs::write(&path, toml).unwrap();
        path
    }

    #[test]
    fn build_config_with_cli_selection_and_defaults_for_rest() {
        let mut args = base_reduce_args();
        args.chains = vec![1050];
        args.types = vec![2];

        let app = build_config(&args).expect("build ok");
        let defaults = DefaultsConfig::default();

        assert_eq!(app.origin_path, PathBuf::from("structure.in"));
        assert_eq!(app.engine.coordinate_mode, defaults.coordinate_mode);
        assert_eq!(app.engine.row_policy, defaults.row_policy);
        assert_eq!(app.engine.tokenizer, defaults.tokenizer);
        assert_eq!(app.job.prefix, defaults.prefix);
        assert_eq!(app.job.on_error, defaults.on_error);
        assert_eq!(app.job.queries, vec![Query::Chain(1050), Query::Type(2)]);
        assert_eq!(app.job.input_dir, PathBuf::from("dumps"));
        assert_eq!(app.job.output_dir, PathBuf::from("reduced"));
    }

    #[test]
    fn build_config_reads_file_and_merges() {
        let dir = tempdir().unwrap();
        let mut args = base_reduce_args();
        args.config = Some(write_config(
            &dir,
            r#"
            [engine]
            coordinate-mode = "scaled-by-box"
            tokenizer = "whitespace"

            [output]
            prefix = "frame"
            on-error = "skip"

            [[select]]
            by = "type"
            id = 3
            "#,
        ));

        let app = build_config(&args).expect("build ok");
        assert_eq!(app.engine.coordinate_mode, CoordinateMode::ScaledByBox);
        assert_eq!(app.engine.tokenizer, Tokenizer::Whitespace);
        assert_eq!(app.engine.row_policy, RowPolicy::Lenient);
        assert_eq!(app.job.prefix, "frame");
        assert_eq!(app.job.on_error, ErrorPolicy::Skip);
        assert_eq!(app.job.queries, vec![Query::Type(3)]);
    }

    #[test]
    fn cli_overrides_file_values() {
        let dir = tempdir().unwrap();
        let mut args = base_reduce_args();
        args.config = Some(write_config(
            &dir,
            r#"
            [output]
            prefix = "frame"

            [[select]]
            by = "chain"
            id = 7
            "#,
        ));
        args.prefix = Some("cli".to_string());
        args.scaled = true;
        args.strict = true;
        args.cells = vec![Cell::new(
            AxisRange::new(0.0, 1.0),
            AxisRange::new(0.0, 1.0),
            AxisRange::new(0.0, 1.0),
        )];

        let app = build_config(&args).expect("build ok");
        assert_eq!(app.job.prefix, "cli");
        assert_eq!(app.engine.coordinate_mode, CoordinateMode::ScaledByBox);
        assert_eq!(app.engine.row_policy, RowPolicy::Strict);
        assert_eq!(app.job.queries.len(), 1);
        assert!(matches!(app.job.queries[0], Query::Cell(_)));
    }

    #[test]
    fn set_values_override_file() {
        let dir = tempdir().unwrap();
        let mut args = base_reduce_args();
        args.types = vec![1];
        args.config = Some(write_config(
            &dir,
            "[engine]\ntokenizer = \"whitespace\"\n[output]\nprefix = \"frame\"\n",
        ));
        args.set_values = vec![
            "engine.tokenizer=single-space".to_string(),
            "engine.row-policy=strict".to_string(),
            "engine.coordinate-mode=scaled-by-box".to_string(),
            "output.prefix=snap".to_string(),
            "output.on-error=skip".to_string(),
        ];

        let app = build_config(&args).expect("build ok");
        assert_eq!(app.engine.tokenizer, Tokenizer::SingleSpace);
        assert_eq!(app.engine.row_policy, RowPolicy::Strict);
        assert_eq!(app.engine.coordinate_mode, CoordinateMode::ScaledByBox);
        assert_eq!(app.job.prefix, "snap");
        assert_eq!(app.job.on_error, ErrorPolicy::Skip);
    }

    #[test]
    fn invalid_set_values_are_config_errors() {
        let mut args = base_reduce_args();
        args.types = vec![1];

        args.set_values = vec!["engine.tokenizer".to_string()];
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));

        args.set_values = vec!["engine.tokenizer=tabs".to_string()];
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));

        args.set_values = vec!["engine.colour=blue".to_string()];
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));
    }

    #[test]
    fn missing_selection_is_rejected() {
        let args = base_reduce_args();
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));
    }

    #[test]
    fn prefix_must_be_a_plain_file_name() {
        let mut args = base_reduce_args();
        args.types = vec![1];
        args.prefix = Some("../escape".to_string());
        assert!(matches!(build_config(&args), Err(CliError::Argument(_))));
    }
}
