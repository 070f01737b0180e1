//! Minibatch index sampling.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Generates a fresh uniform permutation of all sample indices each epoch
/// and partitions it into contiguous minibatches.
///
/// The full reshuffle every epoch is a convergence requirement, not an
/// optimization. The final chunk of an epoch may be smaller than
/// `batch_size`; no padding is applied.
pub struct BatchSampler {
    indices: Vec<i64>,
    batch_size: usize,
    rng: StdRng,
}

impl BatchSampler {
    /// Create a sampler over `sample_count` indices.
    pub fn new(sample_count: usize, batch_size: usize, seed: u64) -> Self {
        Self {
            indices: (0..sample_count as i64).collect(),
            batch_size: batch_size.max(1).min(sample_count.max(1)),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draw a fresh uniform permutation for the coming epoch.
    pub fn reshuffle(&mut self) {
        self.indices.shuffle(&mut self.rng);
    }

    /// The epoch's minibatches, in order.
    pub fn batches(&self) -> impl Iterator<Item = &[i64]> {
        self.indices.chunks(self.batch_size)
    }

    /// Number of minibatches per epoch.
    pub fn batches_per_epoch(&self) -> usize {
        (self.indices.len() + self.batch_size - 1) / self.batch_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_index_appears_once() {
        let mut sampler = BatchSampler::new(100, 16, 0);
        sampler.reshuffle();

        let seen: HashSet<i64> = sampler.batches().flatten().copied().collect();
        assert_eq!(seen.len(), 100);

        let total: usize = sampler.batches().map(|b| b.len()).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn test_remainder_batch_is_smaller() {
        let sampler = BatchSampler::new(100, 16, 0);

        let sizes: Vec<usize> = sampler.batches().map(|b| b.len()).collect();
        assert_eq!(sizes.len(), 7);
        assert!(sizes[..6].iter().all(|&s| s == 16));
        assert_eq!(sizes[6], 4);
    }

    #[test]
    fn test_reshuffle_changes_order() {
        let mut sampler = BatchSampler::new(256, 256, 7);
        sampler.reshuffle();
        let first: Vec<i64> = sampler.batches().flatten().copied().collect();
        sampler.reshuffle();
        let second: Vec<i64> = sampler.batches().flatten().copied().collect();

        assert_ne!(first, second);
    }

    #[test]
    fn test_deterministic_for_seed() {
        let mut a = BatchSampler::new(64, 8, 11);
        let mut b = BatchSampler::new(64, 8, 11);
        a.reshuffle();
        b.reshuffle();

        let av: Vec<i64> = a.batches().flatten().copied().collect();
        let bv: Vec<i64> = b.batches().flatten().copied().collect();
        assert_eq!(av, bv);
    }

    #[test]
    fn test_batch_size_clamped_to_sample_count() {
        let sampler = BatchSampler::new(10, 1000, 0);
        assert_eq!(sampler.batches_per_epoch(), 1);
    }
}
