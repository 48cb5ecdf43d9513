use manuscript_grid::{sequence_cell_files, GridError, Result};
use std::env;
use std::path::PathBuf;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

/// Print the cell files of a directory in manuscript reading order.
fn run() -> Result<()> {
    let mut args = env::args().skip(1);
    let dir = args.next().map(PathBuf::from).ok_or_else(usage)?;
    let ext = args.next().unwrap_or_else(|| "png".to_string());
    if !dir.is_dir() {
        return Err(GridError::config(format!("{} is not a directory", dir.display())));
    }

    for (id, path) in sequence_cell_files(&dir, &ext)? {
        println!("{id}\t{}", path.display());
    }
    Ok(())
}

fn usage() -> GridError {
    GridError::config("Usage: cell_order <cells_dir> [ext]")
}
