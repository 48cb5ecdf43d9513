//! I/O helpers for grayscale images, JSON and text artifacts.
//!
//! - `load_grayscale_image`: read a PNG/JPEG/etc. into an owned 8-bit raster.
//! - `decode_grayscale`: same, from an in-memory encoded buffer.
//! - `save_raster`: write a raster; format follows the file extension.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::RasterImage;
use crate::error::{GridError, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk and convert to 8-bit grayscale.
pub fn load_grayscale_image(path: &Path) -> Result<RasterImage> {
    if !path.is_file() {
        return Err(GridError::InputMissing {
            path: path.to_path_buf(),
        });
    }
    let img = image::open(path)
        .map_err(|source| GridError::InputDecode {
            path: path.to_path_buf(),
            source,
        })?
        .into_luma8();
    Ok(RasterImage::from_gray_image(img))
}

/// Decode an encoded image held in memory (e.g. an upload body).
pub fn decode_grayscale(bytes: &[u8]) -> Result<RasterImage> {
    let img = image::load_from_memory(bytes)
        .map_err(|source| GridError::InputDecode {
            path: "<memory>".into(),
            source,
        })?
        .into_luma8();
    Ok(RasterImage::from_gray_image(img))
}

/// Save a raster, creating parent directories.
pub fn save_raster(image: &RasterImage, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    image
        .to_gray_image()
        .save(path)
        .map_err(|source| GridError::Encode {
            path: path.to_path_buf(),
            source,
        })
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).map_err(|e| GridError::io(path, e))
}

pub fn write_text_file(path: &Path, contents: &str) -> Result<()> {
    ensure_parent_dir(path)?;
    fs::write(path, contents).map_err(|e| GridError::io(path, e))
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| GridError::io(parent, e))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_grayscale_image(&dir.path().join("absent.png")).unwrap_err();
        assert!(matches!(err, GridError::InputMissing { .. }));
    }

    #[test]
    fn garbage_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        fs::write(&path, b"definitely not a png").unwrap();
        let err = load_grayscale_image(&path).unwrap_err();
        assert!(matches!(err, GridError::InputDecode { .. }));
        assert!(err.is_input_error());
    }

    #[test]
    fn png_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.png");
        let img = RasterImage::from_fn(7, 4, |x, y| (x * 30 + y * 5) as u8);
        save_raster(&img, &path).unwrap();
        let loaded = load_grayscale_image(&path).unwrap();
        assert_eq!(img, loaded);
    }
}
