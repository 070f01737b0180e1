//! Volumetric signal loading and cropping.

use std::path::Path;

use inr_core::GridShape;

use crate::error::{IoError, Result};
use crate::format::{self, VolHeader};

use super::Signal;

/// Load a 3D signal from a `.vol` container, max-normalized to `[0, 1]`.
///
/// Fails with [`IoError::RankMismatch`] when the file holds a 2D plane
/// (t = 1).
pub fn load_volume<P: AsRef<Path>>(path: P) -> Result<Signal> {
    let (header, mut data) = format::read_file(path)?;

    if header.t <= 1 {
        return Err(IoError::RankMismatch { expected: 3, got: 2 });
    }

    let max = data.iter().copied().fold(0.0f32, f32::max);
    if max > 1e-6 {
        for v in data.iter_mut() {
            *v /= max;
        }
    }

    log::debug!(
        "loaded volume: {}x{}x{}",
        header.h,
        header.w,
        header.t
    );

    Ok(Signal {
        data,
        shape: GridShape::Volume {
            h: header.h as usize,
            w: header.w as usize,
            t: header.t as usize,
        },
        channels: header.channels as usize,
    })
}

/// Save any signal to a `.vol` container (planes use t = 1).
pub fn save_volume<P: AsRef<Path>>(path: P, signal: &Signal) -> Result<()> {
    let (h, w, t) = signal.shape.dims();
    let header = VolHeader::new(h as u32, w as u32, t as u32, signal.channels as u16);
    format::write_file(path, &header, &signal.data)
}

/// Crop a volume to the tightest bounding box of samples above `threshold`.
///
/// Used for occupancy volumes to discard empty space before training.
/// Fails with [`IoError::RankMismatch`] on a plane and
/// [`IoError::EmptyCrop`] when nothing exceeds the threshold.
pub fn crop_to_occupied(signal: &Signal, threshold: f32) -> Result<Signal> {
    let (h, w, t) = match signal.shape {
        GridShape::Volume { h, w, t } => (h, w, t),
        GridShape::Plane { .. } => {
            return Err(IoError::RankMismatch { expected: 3, got: 2 })
        }
    };

    let mut min = [usize::MAX; 3];
    let mut max = [0usize; 3];
    let mut found = false;

    for i in 0..h {
        for j in 0..w {
            for k in 0..t {
                if signal.data[(i * w + j) * t + k] > threshold {
                    found = true;
                    min[0] = min[0].min(i);
                    min[1] = min[1].min(j);
                    min[2] = min[2].min(k);
                    max[0] = max[0].max(i);
                    max[1] = max[1].max(j);
                    max[2] = max[2].max(k);
                }
            }
        }
    }

    if !found {
        return Err(IoError::EmptyCrop { threshold });
    }

    let (ch, cw, ct) = (
        max[0] - min[0] + 1,
        max[1] - min[1] + 1,
        max[2] - min[2] + 1,
    );

    let mut data = Vec::with_capacity(ch * cw * ct);
    for i in min[0]..=max[0] {
        for j in min[1]..=max[1] {
            for k in min[2]..=max[2] {
                data.push(signal.data[(i * w + j) * t + k]);
            }
        }
    }

    log::debug!(
        "cropped volume {}x{}x{} -> {}x{}x{}",
        h, w, t, ch, cw, ct
    );

    Ok(Signal {
        data,
        shape: GridShape::Volume { h: ch, w: cw, t: ct },
        channels: signal.channels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn box_volume(n: usize, lo: usize, hi: usize) -> Signal {
        let mut data = vec![0.0f32; n * n * n];
        for i in lo..hi {
            for j in lo..hi {
                for k in lo..hi {
                    data[(i * n + j) * n + k] = 1.0;
                }
            }
        }
        Signal {
            data,
            shape: GridShape::Volume { h: n, w: n, t: n },
            channels: 1,
        }
    }

    #[test]
    fn test_volume_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cube.vol");

        let signal = box_volume(6, 2, 4);
        save_volume(&path, &signal).unwrap();

        let restored = load_volume(&path).unwrap();
        assert_eq!(restored.shape, signal.shape);
        assert_eq!(restored.data, signal.data);
    }

    #[test]
    fn test_load_volume_normalizes_by_max() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scaled.vol");

        let mut signal = box_volume(4, 1, 3);
        for v in signal.data.iter_mut() {
            *v *= 8.0;
        }
        save_volume(&path, &signal).unwrap();

        let restored = load_volume(&path).unwrap();
        assert!((restored.max_value() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_plane_file_rejected_as_volume() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plane.vol");

        let plane = Signal {
            data: vec![0.5; 16],
            shape: GridShape::Plane { h: 4, w: 4 },
            channels: 1,
        };
        save_volume(&path, &plane).unwrap();

        let err = load_volume(&path).unwrap_err();
        assert!(matches!(err, IoError::RankMismatch { expected: 3, got: 2 }));
    }

    #[test]
    fn test_crop_to_occupied() {
        let signal = box_volume(8, 2, 5);
        let cropped = crop_to_occupied(&signal, 0.5).unwrap();

        assert_eq!(cropped.shape, GridShape::Volume { h: 3, w: 3, t: 3 });
        assert!(cropped.data.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_crop_empty_fails() {
        let signal = box_volume(4, 0, 0);
        let err = crop_to_occupied(&signal, 0.5).unwrap_err();
        assert!(matches!(err, IoError::EmptyCrop { .. }));
    }

    #[test]
    fn test_crop_rejects_plane() {
        let plane = Signal {
            data: vec![1.0; 4],
            shape: GridShape::Plane { h: 2, w: 2 },
            channels: 1,
        };
        assert!(crop_to_occupied(&plane, 0.5).is_err());
    }
}
