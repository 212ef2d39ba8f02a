use crate::cli::ReduceArgs;
use crate::config::build_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use nanolysis::{
    engine::{Engine, progress::ProgressReporter},
    workflows,
};
use tracing::{info, warn};

pub fn run(args: ReduceArgs) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let app = build_config(&args)?;
    for query in &app.job.queries {
        info!("Selection: {}", query);
    }

    info!("Loading origin file from {:?}", &app.origin_path);
    let mut engine = Engine::new(app.engine);
    let chains = engine.set_origin(&app.origin_path)?;
    info!("Chain index holds {} chain(s).", chains.len());

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Reducing dump files in {} into {}...",
        app.job.input_dir.display(),
        app.job.output_dir.display()
    );
    let summary = workflows::reduce::run(&app.engine, chains, &app.job, &reporter)?;

    if summary.written.is_empty() {
        warn!("Batch completed but no reduced file was written.");
        println!("Warning: no reduced file was written.");
    } else {
        println!(
            "✓ {} reduced file(s) written to: {}",
            summary.written.len(),
            app.job.output_dir.display()
        );
    }
    for (path, reason) in &summary.skipped {
        println!("  Skipped {}: {}", path.display(), reason);
    }

    Ok(())
}
