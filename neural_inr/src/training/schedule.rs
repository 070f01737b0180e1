//! Learning-rate decay schedule.

/// Learning-rate multiplier at a given epoch.
///
/// Exponential decay that reaches `decay_factor` of the base rate at the
/// final epoch and holds there: `decay_factor ^ min(epoch / total_epochs, 1)`.
/// The multiplier is `1.0` at epoch 0 and monotonically non-increasing for
/// decay factors in `(0, 1]`.
pub fn decay_multiplier(epoch: usize, total_epochs: usize, decay_factor: f64) -> f64 {
    if total_epochs == 0 {
        return decay_factor;
    }
    let progress = (epoch as f64 / total_epochs as f64).min(1.0);
    decay_factor.powf(progress)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_one() {
        assert_eq!(decay_multiplier(0, 100, 0.1), 1.0);
    }

    #[test]
    fn test_reaches_decay_factor_at_budget() {
        assert!((decay_multiplier(100, 100, 0.1) - 0.1).abs() < 1e-12);
        // Past the budget the multiplier holds.
        assert!((decay_multiplier(250, 100, 0.1) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_monotonically_non_increasing() {
        let mut previous = f64::INFINITY;
        for epoch in 0..300 {
            let multiplier = decay_multiplier(epoch, 200, 0.2);
            assert!(multiplier <= previous, "epoch {}", epoch);
            previous = multiplier;
        }
    }

    #[test]
    fn test_unit_factor_is_constant() {
        for epoch in [0, 10, 1000] {
            assert_eq!(decay_multiplier(epoch, 100, 1.0), 1.0);
        }
    }
}
