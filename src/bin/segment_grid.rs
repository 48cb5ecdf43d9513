use log::info;
use manuscript_grid::config::load_config;
use manuscript_grid::{GridError, GridSegmenter, Result};
use std::env;
use std::error::Error as _;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        let mut source = err.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;
    info!(
        "segmenting {} into {}",
        config.input.display(),
        config.output_dir.display()
    );

    let segmenter = GridSegmenter::new(config.params.clone())?;
    let page = segmenter.run(&config.input, &config.output_dir, &config.artifacts)?;

    let skew = page.skew();
    let grid = page.grid();
    println!("Segmentation summary");
    println!("  skew: {:.3} deg ({})", skew.angle, skew.method);
    println!(
        "  grid: {} rows x {} cols ({} vertical, {} horizontal lines)",
        grid.rows(),
        grid.cols(),
        grid.xs.len(),
        grid.ys.len()
    );
    println!("  cells: {}", page.cells().len());
    println!("  total_ms: {:.3}", page.timings().total_ms);
    println!("Artifacts written to {}", config.output_dir.display());
    Ok(())
}

fn usage() -> GridError {
    GridError::config("Usage: segment_grid <config.json>")
}
