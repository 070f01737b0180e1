//! Run-artifact persistence.
//!
//! At the end of a training run the trainer hands off its best
//! reconstruction, the reference signals, and the metric history; this
//! module owns the filesystem layout: one directory per run holding
//! `metrics.json`, `.vol` dumps of the buffers, and a preview PNG.

use std::fs;
use std::path::{Path, PathBuf};

use image::{GrayImage, RgbImage};
use inr_core::GridShape;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::signal::{save_volume, Signal};

/// Filesystem roots for run outputs.
///
/// Passed explicitly into persistence calls rather than read from ambient
/// process state; [`RunPaths::from_env`] exists for the driver boundary.
#[derive(Debug, Clone)]
pub struct RunPaths {
    /// Root directory for metrics, reconstructions, and previews.
    pub results_dir: PathBuf,
    /// Root directory for model checkpoints.
    pub models_dir: PathBuf,
}

impl RunPaths {
    /// Create run paths from explicit directories.
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(results_dir: P, models_dir: Q) -> Self {
        Self {
            results_dir: results_dir.into(),
            models_dir: models_dir.into(),
        }
    }

    /// Read `RESULTS_SAVE_PATH` / `MODEL_SAVE_PATH`, defaulting to
    /// `results/` and `models/` in the working directory.
    pub fn from_env() -> Self {
        let results = std::env::var("RESULTS_SAVE_PATH").unwrap_or_else(|_| "results".into());
        let models = std::env::var("MODEL_SAVE_PATH").unwrap_or_else(|_| "models".into());
        Self::new(results, models)
    }

    /// Directory for one run's result artifacts.
    pub fn run_dir(&self, run_name: &str) -> PathBuf {
        self.results_dir.join(run_name)
    }

    /// Checkpoint directory for one run.
    pub fn checkpoint_dir(&self, run_name: &str) -> PathBuf {
        self.models_dir.join(run_name)
    }
}

/// Per-epoch metric history in serializable form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MetricsRecord {
    /// Mean minibatch loss per epoch.
    pub loss: Vec<f32>,
    /// Tracked metric per epoch (PSNR against the training target, or IoU).
    pub metric: Vec<f32>,
    /// Reporting metric per epoch (against ground truth).
    pub report_metric: Vec<f32>,
    /// Elapsed wall-clock seconds at the end of each epoch.
    pub elapsed_s: Vec<f32>,
}

impl MetricsRecord {
    /// Number of recorded epochs.
    pub fn len(&self) -> usize {
        self.loss.len()
    }

    /// Whether no epochs were recorded.
    pub fn is_empty(&self) -> bool {
        self.loss.is_empty()
    }
}

/// Everything a finished run hands to persistence.
#[derive(Debug, Clone)]
pub struct RunArtifacts {
    /// Best reconstruction seen during training.
    pub best: Signal,
    /// Ground-truth signal.
    pub reference: Signal,
    /// Noisy observation, when the task trained against one.
    pub noisy: Option<Signal>,
    /// Metric history.
    pub metrics: MetricsRecord,
}

/// Persist a run's artifacts under `paths.run_dir(run_name)`.
///
/// Writes `metrics.json`, `reconstruction.vol`, `reference.vol`, optionally
/// `noisy.vol`, and `preview.png`.
pub fn save_run(paths: &RunPaths, run_name: &str, artifacts: &RunArtifacts) -> Result<PathBuf> {
    let dir = paths.run_dir(run_name);
    fs::create_dir_all(&dir)?;

    let metrics_json = serde_json::to_string_pretty(&artifacts.metrics)?;
    fs::write(dir.join("metrics.json"), metrics_json)?;

    save_volume(dir.join("reconstruction.vol"), &artifacts.best)?;
    save_volume(dir.join("reference.vol"), &artifacts.reference)?;
    if let Some(noisy) = &artifacts.noisy {
        save_volume(dir.join("noisy.vol"), noisy)?;
    }

    save_preview(dir.join("preview.png"), &artifacts.best)?;

    log::info!("saved run artifacts to {:?}", dir);

    Ok(dir)
}

/// Load a previously saved metric history.
pub fn load_metrics<P: AsRef<Path>>(path: P) -> Result<MetricsRecord> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Render a signal to a PNG preview.
///
/// Planes render directly (grayscale or RGB); volumes render their middle
/// slice along the innermost axis.
pub fn save_preview<P: AsRef<Path>>(path: P, signal: &Signal) -> Result<()> {
    let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;

    match signal.shape {
        GridShape::Plane { h, w } if signal.channels == 3 => {
            let mut img = RgbImage::new(w as u32, h as u32);
            for i in 0..h {
                for j in 0..w {
                    let base = (i * w + j) * 3;
                    img.get_pixel_mut(j as u32, i as u32).0 = [
                        to_u8(signal.data[base]),
                        to_u8(signal.data[base + 1]),
                        to_u8(signal.data[base + 2]),
                    ];
                }
            }
            img.save(path)?;
        }
        GridShape::Plane { h, w } => {
            let mut img = GrayImage::new(w as u32, h as u32);
            for i in 0..h {
                for j in 0..w {
                    img.get_pixel_mut(j as u32, i as u32).0 = [to_u8(signal.data[i * w + j])];
                }
            }
            img.save(path)?;
        }
        GridShape::Volume { h, w, t } => {
            let mid = t / 2;
            let mut img = GrayImage::new(w as u32, h as u32);
            for i in 0..h {
                for j in 0..w {
                    img.get_pixel_mut(j as u32, i as u32).0 =
                        [to_u8(signal.data[(i * w + j) * t + mid])];
                }
            }
            img.save(path)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_plane() -> Signal {
        Signal {
            data: (0..16).map(|i| i as f32 / 15.0).collect(),
            shape: GridShape::Plane { h: 4, w: 4 },
            channels: 1,
        }
    }

    #[test]
    fn test_save_run_layout() {
        let dir = tempfile::tempdir().unwrap();
        let paths = RunPaths::new(dir.path().join("results"), dir.path().join("models"));

        let artifacts = RunArtifacts {
            best: gray_plane(),
            reference: gray_plane(),
            noisy: Some(gray_plane()),
            metrics: MetricsRecord {
                loss: vec![0.5, 0.25],
                metric: vec![10.0, 14.0],
                report_metric: vec![11.0, 15.0],
                elapsed_s: vec![0.1, 0.2],
            },
        };

        let run_dir = save_run(&paths, "wire_test_denoise", &artifacts).unwrap();

        assert!(run_dir.join("metrics.json").exists());
        assert!(run_dir.join("reconstruction.vol").exists());
        assert!(run_dir.join("reference.vol").exists());
        assert!(run_dir.join("noisy.vol").exists());
        assert!(run_dir.join("preview.png").exists());
    }

    #[test]
    fn test_metrics_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let paths = RunPaths::new(dir.path().join("results"), dir.path().join("models"));

        let metrics = MetricsRecord {
            loss: vec![1.0, 0.5, 0.1],
            metric: vec![0.2, 0.5, 0.8],
            report_metric: vec![0.25, 0.55, 0.85],
            elapsed_s: vec![1.0, 2.0, 3.0],
        };
        let artifacts = RunArtifacts {
            best: gray_plane(),
            reference: gray_plane(),
            noisy: None,
            metrics: metrics.clone(),
        };

        let run_dir = save_run(&paths, "roundtrip", &artifacts).unwrap();
        let restored = load_metrics(run_dir.join("metrics.json")).unwrap();

        assert_eq!(restored, metrics);
        assert_eq!(restored.len(), 3);
    }

    #[test]
    fn test_volume_preview_uses_mid_slice() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preview.png");

        let volume = Signal {
            data: vec![0.7; 4 * 4 * 3],
            shape: GridShape::Volume { h: 4, w: 4, t: 3 },
            channels: 1,
        };
        save_preview(&path, &volume).unwrap();
        assert!(path.exists());
    }
}
