//! Experiment tracking sinks.
//!
//! The trainer streams per-epoch scalars through the [`Tracker`] trait.
//! Sinks are best-effort: a failing write is logged and the sink disables
//! itself, but training is never interrupted by a reporting problem.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::Nonlinearity;

/// Generate a run name from its defining parameters.
///
/// Format: `{nonlinearity}_{input}_{task}__{unix_seconds}`.
pub fn run_name(nonlinearity: Nonlinearity, input_id: &str, task: &str) -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("{}_{}_{}__{}", nonlinearity, input_id, task, timestamp)
}

/// A sink for per-epoch training scalars.
pub trait Tracker {
    /// Record named scalars for one epoch.
    fn log_scalars(&mut self, epoch: usize, scalars: &[(&str, f32)]);

    /// Flush any buffered output; called once at the end of a run.
    fn finish(&mut self) {}
}

/// Tracker that discards everything.
pub struct NoopTracker;

impl Tracker for NoopTracker {
    fn log_scalars(&mut self, _epoch: usize, _scalars: &[(&str, f32)]) {}
}

/// Tracker that appends one JSON object per epoch to a file.
pub struct JsonlTracker {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl JsonlTracker {
    /// Open (or create) a JSONL stream at `path`.
    ///
    /// Never fails: if the file cannot be created the tracker logs a
    /// warning and behaves like [`NoopTracker`].
    pub fn create<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let writer = match File::create(&path) {
            Ok(file) => Some(BufWriter::new(file)),
            Err(e) => {
                log::warn!("tracking disabled, cannot create {:?}: {}", path, e);
                None
            }
        };
        Self { path, writer }
    }
}

impl Tracker for JsonlTracker {
    fn log_scalars(&mut self, epoch: usize, scalars: &[(&str, f32)]) {
        let Some(writer) = self.writer.as_mut() else {
            return;
        };

        let mut line = serde_json::json!({ "epoch": epoch });
        for (name, value) in scalars {
            line[*name] = serde_json::json!(value);
        }

        if let Err(e) = writeln!(writer, "{}", line) {
            log::warn!("tracking disabled, write to {:?} failed: {}", self.path, e);
            self.writer = None;
        }
    }

    fn finish(&mut self) {
        if let Some(writer) = self.writer.as_mut() {
            if let Err(e) = writer.flush() {
                log::warn!("tracking flush to {:?} failed: {}", self.path, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_name_components() {
        let name = run_name(Nonlinearity::Wire, "parrot", "denoise");
        assert!(name.starts_with("wire_parrot_denoise__"));
    }

    #[test]
    fn test_jsonl_tracker_writes_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("track.jsonl");

        let mut tracker = JsonlTracker::create(&path);
        tracker.log_scalars(0, &[("loss", 0.5), ("psnr", 12.0)]);
        tracker.log_scalars(1, &[("loss", 0.25), ("psnr", 15.0)]);
        tracker.finish();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["epoch"], 0);
        assert_eq!(first["loss"], 0.5);
    }

    #[test]
    fn test_unwritable_path_degrades_to_noop() {
        let mut tracker = JsonlTracker::create("/definitely/not/a/dir/track.jsonl");
        // Must not panic or error.
        tracker.log_scalars(0, &[("loss", 1.0)]);
        tracker.finish();
    }
}
