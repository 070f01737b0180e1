//! Cross-module tests for inr_core.

use inr_core::prelude::*;
use proptest::prelude::*;

#[test]
fn grid_matches_signal_flattening() {
    // A volume sample's coordinate must sit at the slot of its flat index.
    let shape = GridShape::Volume { h: 3, w: 4, t: 5 };
    let coords = build_grid(shape);

    let (h, w, t) = shape.dims();
    for i in 0..h {
        for j in 0..w {
            for k in 0..t {
                let flat = (i * w + j) * t + k;
                let c = &coords[flat * 3..flat * 3 + 3];
                assert_eq!(c[0], axis_position(h, i));
                assert_eq!(c[1], axis_position(w, j));
                assert_eq!(c[2], axis_position(t, k));
            }
        }
    }
}

#[test]
fn mesh_vertices_stay_in_grid_space() {
    // A centered box crosses 0.5 well inside the volume.
    let (h, w, t) = (10, 10, 10);
    let mut volume = vec![0.0f32; h * w * t];
    for i in 3..7 {
        for j in 3..7 {
            for k in 3..7 {
                volume[(i * w + j) * t + k] = 1.0;
            }
        }
    }

    let mesh = extract_mesh(&volume, (h, w, t), 0.5).unwrap();
    assert!(mesh.triangle_count() > 0);

    for v in &mesh.vertices {
        for c in v {
            assert!((-1.0..=1.0).contains(c));
        }
    }
}

#[test]
fn iou_against_mesh_threshold_agree() {
    // If two volumes are identical, IoU is 1 and both mesh or fail together.
    let mut volume = vec![0.0f32; 6 * 6 * 6];
    volume[(3 * 6 + 3) * 6 + 3] = 1.0;

    assert_eq!(iou(&volume, &volume, 0.5), 1.0);

    let a = extract_mesh(&volume, (6, 6, 6), 0.5);
    let b = extract_mesh(&volume, (6, 6, 6), 0.5);
    assert_eq!(a.is_ok(), b.is_ok());
}

proptest! {
    #[test]
    fn prop_grid_length_planes(h in 1usize..32, w in 1usize..32) {
        let shape = GridShape::Plane { h, w };
        prop_assert_eq!(build_grid(shape).len(), h * w * 2);
    }

    #[test]
    fn prop_grid_length_volumes(h in 1usize..12, w in 1usize..12, t in 1usize..12) {
        let shape = GridShape::Volume { h, w, t };
        prop_assert_eq!(build_grid(shape).len(), h * w * t * 3);
    }

    #[test]
    fn prop_iou_self_is_one_or_zero(values in prop::collection::vec(0.0f32..1.0, 1..64), threshold in 0.0f32..1.0) {
        let result = iou(&values, &values, threshold);
        // 1.0 when anything exceeds the threshold, 0.0 for an empty union.
        if values.iter().any(|&v| v > threshold) {
            prop_assert_eq!(result, 1.0);
        } else {
            prop_assert_eq!(result, 0.0);
        }
    }

    #[test]
    fn prop_psnr_nonnegative_mse(a in prop::collection::vec(0.0f32..1.0, 8..64)) {
        let shifted: Vec<f32> = a.iter().map(|v| (v + 0.1).min(1.0)).collect();
        let err = mse(&a, &shifted);
        prop_assert!(err >= 0.0);
        prop_assert!(psnr(&a, &a).is_infinite());
    }
}
