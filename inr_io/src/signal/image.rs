//! Raster image loading.

use std::path::Path;

use image::DynamicImage;
use inr_core::GridShape;

use crate::error::Result;

use super::{normalize_min_max, Signal};

/// Load a raster image as a 2D signal, min-max normalized to `[0, 1]`.
///
/// Grayscale images load with one channel, everything else is converted to
/// RGB with three. Fails with a decode error on unreadable files.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<Signal> {
    let decoded = image::open(path)?;

    let (data, h, w, channels) = match decoded {
        DynamicImage::ImageLuma8(img) => {
            let (w, h) = img.dimensions();
            let data: Vec<f32> = img.pixels().map(|p| p.0[0] as f32).collect();
            (data, h as usize, w as usize, 1)
        }
        DynamicImage::ImageLuma16(img) => {
            let (w, h) = img.dimensions();
            let data: Vec<f32> = img.pixels().map(|p| p.0[0] as f32).collect();
            (data, h as usize, w as usize, 1)
        }
        other => {
            let img = other.to_rgb8();
            let (w, h) = img.dimensions();
            let data: Vec<f32> = img
                .pixels()
                .flat_map(|p| p.0.iter().map(|&c| c as f32).collect::<Vec<_>>())
                .collect();
            (data, h as usize, w as usize, 3)
        }
    };

    let mut data = data;
    normalize_min_max(&mut data);

    log::debug!("loaded image: {}x{} with {} channels", h, w, channels);

    Ok(Signal {
        data,
        shape: GridShape::Plane { h, w },
        channels,
    })
}
