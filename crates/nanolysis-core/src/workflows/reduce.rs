use crate::core::io::dump::DumpFile;
use crate::core::models::chain::ChainIndex;
use crate::core::models::selection::SelectionBuffer;
use crate::engine::Engine;
use crate::engine::Query;
use crate::engine::config::EngineConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub const DEFAULT_PREFIX: &str = "test";

/// What to do when one file of a batch cannot be reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorPolicy {
    #[default]
    Abort,
    Skip,
}

#[derive(Debug, Clone)]
pub struct ReduceJob {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub prefix: String,
    pub queries: Vec<Query>,
    pub on_error: ErrorPolicy,
}

impl ReduceJob {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            prefix: DEFAULT_PREFIX.to_string(),
            queries: Vec::new(),
            on_error: ErrorPolicy::default(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_queries(mut self, queries: impl IntoIterator<Item = Query>) -> Self {
        self.queries.extend(queries);
        self
    }

    pub fn on_error(mut self, policy: ErrorPolicy) -> Self {
        self.on_error = policy;
        self
    }

    fn output_path(&self, timestep: u64) -> PathBuf {
        self.output_dir
            .join(format!("{}-{}.in", self.prefix, timestep))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReduceSummary {
    /// Written files, in input order.
    pub written: Vec<PathBuf>,
    /// Input files that were skipped, with the reason.
    pub skipped: Vec<(PathBuf, String)>,
}

/// An input whose output path has been claimed during planning.
struct PlannedFile {
    input: PathBuf,
    output: PathBuf,
}

struct FileOutcome {
    output: PathBuf,
    timestep: u64,
    beads: usize,
}

/// Reduces every regular file of `job.input_dir` to the beads matched by `job.queries`.
///
/// Files are visited in file-name order. A first pass reads only the headers and
/// assigns each file its output path; a file whose timestep was already claimed by an
/// earlier file fails with [`EngineError::OutputConflict`]. The second pass reads each
/// file with its own [`Engine`] sharing `chains`, concurrently with the `parallel`
/// feature; the summary is still in input order.
///
/// Under [`ErrorPolicy::Abort`] the first failing file in input order ends the batch
/// with its error. Header failures and conflicts abort before anything is written;
/// later failures stop every file after the failing one that has not started yet.
#[instrument(skip_all, name = "reduce_workflow")]
pub fn run(
    config: &EngineConfig,
    chains: Arc<ChainIndex>,
    job: &ReduceJob,
    reporter: &ProgressReporter,
) -> Result<ReduceSummary, EngineError> {
    if job.queries.is_empty() {
        return Err(EngineError::Configuration(
            "no selection queries configured".into(),
        ));
    }

    let inputs = list_inputs(&job.input_dir)?;
    info!(
        files = inputs.len(),
        queries = job.queries.len(),
        input = %job.input_dir.display(),
        output = %job.output_dir.display(),
        "Starting batch reduction."
    );
    reporter.report(Progress::BatchStart {
        total_files: inputs.len() as u64,
    });

    let mut summary = ReduceSummary::default();
    let planned = plan_outputs(config, job, inputs, reporter, &mut summary)?;
    reporter.report(Progress::Message(format!(
        "Reducing {} file(s) against {} chain(s)",
        planned.len(),
        chains.len()
    )));

    fs::create_dir_all(&job.output_dir).map_err(|source| EngineError::Io {
        path: job.output_dir.clone(),
        source,
    })?;

    let abort = job.on_error == ErrorPolicy::Abort;
    let first_failure = AtomicUsize::new(usize::MAX);
    let process = |(position, file): (usize, &PlannedFile)| {
        if abort && position > first_failure.load(Ordering::Acquire) {
            return None;
        }
        let outcome = reduce_file(config, &chains, &job.queries, file);
        match &outcome {
            Ok(done) => {
                debug!(
                    input = %file.input.display(),
                    timestep = done.timestep,
                    beads = done.beads,
                    "Reduced snapshot."
                );
                reporter.report(Progress::FileFinished {
                    timestep: done.timestep,
                    beads: done.beads,
                });
            }
            Err(_) if abort => {
                first_failure.fetch_min(position, Ordering::AcqRel);
            }
            Err(_) => {}
        }
        Some(outcome)
    };

    #[cfg(feature = "parallel")]
    let outcomes: Vec<_> = planned.par_iter().enumerate().map(process).collect();
    #[cfg(not(feature = "parallel"))]
    let outcomes: Vec<_> = planned.iter().enumerate().map(process).collect();

    for (file, outcome) in planned.into_iter().zip(outcomes) {
        match outcome {
            Some(Ok(done)) => summary.written.push(done.output),
            Some(Err(err)) => record_failure(job, file.input, err, reporter, &mut summary)?,
            None => {}
        }
    }
    summary.skipped.sort_by(|a, b| a.0.cmp(&b.0));

    reporter.report(Progress::BatchFinish);
    info!(
        written = summary.written.len(),
        skipped = summary.skipped.len(),
        "Batch reduction finished."
    );
    Ok(summary)
}

/// Reads every header and claims one output path per input, first file first.
fn plan_outputs(
    config: &EngineConfig,
    job: &ReduceJob,
    inputs: Vec<PathBuf>,
    reporter: &ProgressReporter,
    summary: &mut ReduceSummary,
) -> Result<Vec<PlannedFile>, EngineError> {
    let mut claimed: HashMap<PathBuf, usize> = HashMap::new();
    let mut planned: Vec<PlannedFile> = Vec::with_capacity(inputs.len());

    for input in inputs {
        let timestep = match DumpFile::read_header_from_path(&input, config.tokenizer) {
            Ok((_, timestep)) => timestep,
            Err(e) => {
                let err = EngineError::from_format(&input, e);
                record_failure(job, input, err, reporter, summary)?;
                continue;
            }
        };

        let output = job.output_path(timestep);
        if let Some(&first) = claimed.get(&output) {
            let err = EngineError::OutputConflict {
                output,
                first: planned[first].input.clone(),
                later: input.clone(),
            };
            record_failure(job, input, err, reporter, summary)?;
            continue;
        }
        claimed.insert(output.clone(), planned.len());
        planned.push(PlannedFile { input, output });
    }
    Ok(planned)
}

/// Applies the job's error policy to one failed input.
fn record_failure(
    job: &ReduceJob,
    input: PathBuf,
    err: EngineError,
    reporter: &ProgressReporter,
    summary: &mut ReduceSummary,
) -> Result<(), EngineError> {
    match job.on_error {
        ErrorPolicy::Abort => Err(err),
        ErrorPolicy::Skip => {
            warn!(input = %input.display(), error = %err, "Skipping file.");
            reporter.report(Progress::FileSkipped {
                path: input.clone(),
                reason: err.to_string(),
            });
            summary.skipped.push((input, err.to_string()));
            Ok(())
        }
    }
}

fn reduce_file(
    config: &EngineConfig,
    chains: &Arc<ChainIndex>,
    queries: &[Query],
    file: &PlannedFile,
) -> Result<FileOutcome, EngineError> {
    let mut engine = Engine::with_chain_index(*config, Arc::clone(chains));
    let timestep = engine.read(&file.input)?.timestep;

    let mut buffer = SelectionBuffer::new();
    for query in queries {
        engine.select(&mut buffer, query)?;
    }
    let beads = buffer.len();

    engine.write(&mut buffer, &file.output, true)?;
    Ok(FileOutcome {
        output: file.output.clone(),
        timestep,
        beads,
    })
}

fn list_inputs(dir: &Path) -> Result<Vec<PathBuf>, EngineError> {
    let io_err = |source| EngineError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        if entry.file_type().map_err(io_err)?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}
