use log::info;
use manuscript_grid::config::load_batch_config;
use manuscript_grid::{GridError, GridSegmenter, Result};
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    match run() {
        Ok(0) => {}
        Ok(failed) => {
            eprintln!("{failed} job(s) failed");
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}

/// Returns the number of failed jobs.
fn run() -> Result<usize> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_batch_config(Path::new(&config_path))?;
    info!("running {} jobs", config.jobs.len());

    let segmenter = GridSegmenter::new(config.params.clone())?;
    let outcomes = segmenter.segment_batch(&config.jobs, &config.artifacts)?;

    let mut failed = 0;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(report) => println!(
                "ok    {} -> {} ({} cells, skew {:.3} via {})",
                outcome.job.input.display(),
                outcome.job.output_dir.display(),
                report.cells,
                report.skew.angle,
                report.skew.method
            ),
            Err(err) => {
                failed += 1;
                println!("fail  {}: {err}", outcome.job.input.display());
            }
        }
    }
    Ok(failed)
}

fn usage() -> GridError {
    GridError::config("Usage: segment_batch <batch.json>")
}
