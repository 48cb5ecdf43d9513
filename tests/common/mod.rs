#![allow(dead_code)]

pub mod synthetic_image;

use std::path::Path;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Write a synthetic page as PNG so file-based entry points can read it.
pub fn save_png(image: &manuscript_grid::RasterImage, path: &Path) {
    image
        .to_gray_image()
        .save(path)
        .expect("failed to write synthetic test image");
}
