use super::ArtifactOptions;
use crate::detector::{check_distinct_outputs, BatchJob, SegmentationParams};
use crate::error::{GridError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// JSON run file for `segment_grid`.
///
/// ```json
/// { "input": "sheet.jpg", "output_dir": "out", "params": { "tol": 12 } }
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    #[serde(default)]
    pub params: SegmentationParams,
    #[serde(default)]
    pub artifacts: ArtifactOptions,
}

impl RunConfig {
    pub fn validate(&self) -> Result<()> {
        self.params.validate()?;
        self.artifacts.validate()
    }
}

/// JSON file for `segment_batch`: shared settings plus one job per page.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchConfig {
    pub jobs: Vec<BatchJob>,
    #[serde(default)]
    pub params: SegmentationParams,
    #[serde(default)]
    pub artifacts: ArtifactOptions,
}

impl BatchConfig {
    pub fn validate(&self) -> Result<()> {
        self.params.validate()?;
        self.artifacts.validate()?;
        check_distinct_outputs(&self.jobs)
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read_to_string(path).map_err(|e| GridError::io(path, e))?;
    serde_json::from_str(&data)
        .map_err(|e| GridError::config(format!("failed to parse config {}: {e}", path.display())))
}

/// Read, parse and validate a run file.
pub fn load_config(path: &Path) -> Result<RunConfig> {
    let config: RunConfig = read_json(path)?;
    config.validate()?;
    Ok(config)
}

/// Read, parse and validate a batch file.
pub fn load_batch_config(path: &Path) -> Result<BatchConfig> {
    let config: BatchConfig = read_json(path)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        fs::write(&path, r#"{"input": "a.png", "output_dir": "out"}"#).unwrap();
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.input, PathBuf::from("a.png"));
        assert_eq!(cfg.params, SegmentationParams::default());
        assert_eq!(cfg.artifacts, ArtifactOptions::default());
    }

    #[test]
    fn out_of_range_params_fail_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        fs::write(
            &path,
            r#"{"input": "a.png", "output_dir": "out", "params": {"tol": 0}}"#,
        )
        .unwrap();
        assert!(matches!(load_config(&path), Err(GridError::Config(_))));
    }

    #[test]
    fn batch_jobs_need_distinct_output_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("batch.json");
        fs::write(
            &path,
            r#"{"jobs": [
                {"input": "a.png", "output_dir": "out/a"},
                {"input": "b.png", "output_dir": "out/b"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(load_batch_config(&path).unwrap().jobs.len(), 2);

        fs::write(
            &path,
            r#"{"jobs": [
                {"input": "a.png", "output_dir": "out"},
                {"input": "b.png", "output_dir": "out"}
            ]}"#,
        )
        .unwrap();
        assert!(load_batch_config(&path).is_err());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_config(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, GridError::Io { .. }));
    }
}
