//! Reconstruction quality metrics.
//!
//! PSNR for continuous signals, IoU for binarized occupancy. Both operate on
//! flat sample buffers; callers are responsible for passing buffers of equal
//! length (checked in debug builds).

/// Mean squared error between two equal-length buffers.
pub fn mse(reference: &[f32], estimate: &[f32]) -> f32 {
    debug_assert_eq!(reference.len(), estimate.len());
    if reference.is_empty() {
        return 0.0;
    }

    let sum: f64 = reference
        .iter()
        .zip(estimate.iter())
        .map(|(&r, &e)| {
            let d = (r - e) as f64;
            d * d
        })
        .sum();

    (sum / reference.len() as f64) as f32
}

/// Peak signal-to-noise ratio in decibels, assuming a `[0, 1]` dynamic range.
///
/// A zero mean-squared error (identical buffers) propagates
/// `f32::INFINITY`; callers reporting the value should treat it as a
/// saturated maximum.
pub fn psnr(reference: &[f32], estimate: &[f32]) -> f32 {
    let err = mse(reference, estimate);
    if err == 0.0 {
        return f32::INFINITY;
    }
    -10.0 * err.log10()
}

/// Intersection-over-union of two buffers binarized at `threshold`.
///
/// A sample is "occupied" when its value is strictly greater than the
/// threshold. An empty union yields `0.0` rather than a division fault.
pub fn iou(estimate: &[f32], reference: &[f32], threshold: f32) -> f32 {
    debug_assert_eq!(estimate.len(), reference.len());

    let mut intersection = 0usize;
    let mut union = 0usize;

    for (&e, &r) in estimate.iter().zip(reference.iter()) {
        let e_in = e > threshold;
        let r_in = r > threshold;
        if e_in && r_in {
            intersection += 1;
        }
        if e_in || r_in {
            union += 1;
        }
    }

    if union == 0 {
        0.0
    } else {
        intersection as f32 / union as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mse_zero_for_identical() {
        let a = vec![0.1, 0.5, 0.9];
        assert_eq!(mse(&a, &a), 0.0);
    }

    #[test]
    fn test_mse_constant_offset() {
        let a = vec![0.0, 0.0, 0.0, 0.0];
        let b = vec![0.5, 0.5, 0.5, 0.5];
        assert!((mse(&a, &b) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_psnr_self_is_infinite() {
        let a = vec![0.3, 0.7, 1.0];
        assert!(psnr(&a, &a).is_infinite());
    }

    #[test]
    fn test_psnr_known_value() {
        // MSE = 0.01 -> PSNR = 20 dB.
        let a = vec![0.5; 10];
        let b = vec![0.6; 10];
        assert!((psnr(&a, &b) - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_psnr_monotone_in_error() {
        let reference = vec![0.5; 16];
        let close = vec![0.52; 16];
        let far = vec![0.8; 16];
        assert!(psnr(&reference, &close) > psnr(&reference, &far));
    }

    #[test]
    fn test_iou_self_identity() {
        let a = vec![0.0, 0.2, 0.8, 1.0];
        for &t in &[0.1, 0.5, 0.9] {
            assert_eq!(iou(&a, &a, t), 1.0);
        }
    }

    #[test]
    fn test_iou_disjoint_support() {
        let a = vec![1.0, 1.0, 0.0, 0.0];
        let b = vec![0.0, 0.0, 1.0, 1.0];
        assert_eq!(iou(&a, &b, 0.5), 0.0);
    }

    #[test]
    fn test_iou_empty_union() {
        let a = vec![0.0; 8];
        assert_eq!(iou(&a, &a, 0.5), 0.0);
    }

    #[test]
    fn test_iou_partial_overlap() {
        let a = vec![1.0, 1.0, 1.0, 0.0];
        let b = vec![1.0, 1.0, 0.0, 1.0];
        // Intersection 2, union 4.
        assert!((iou(&a, &b, 0.5) - 0.5).abs() < 1e-6);
    }
}
