//! Dense identifier pools for top-level entities.
//!
//! Primary keys are assigned as the contiguous range `[1, count]` in insertion
//! order. Dependent generators sample from the retained pool, so every
//! FK-shaped value references a row that exists.

use rand::Rng;

/// A pool of sequential entity ids created ahead of any dependent table.
#[derive(Debug, Clone)]
pub struct IdPool {
    ids: Vec<i64>,
}

impl IdPool {
    pub fn new(count: usize) -> Self {
        Self {
            ids: (1..=count as i64).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[i64] {
        &self.ids
    }

    /// Uniform pick with replacement. Panics on an empty pool.
    pub fn pick<R: Rng>(&self, rng: &mut R) -> i64 {
        self.ids[rng.random_range(0..self.ids.len())]
    }

    /// Two distinct ids. Panics if the pool holds fewer than two.
    pub fn pick_pair<R: Rng>(&self, rng: &mut R) -> (i64, i64) {
        let first = rng.random_range(0..self.ids.len());
        let mut second = rng.random_range(0..self.ids.len() - 1);
        if second >= first {
            second += 1;
        }
        (self.ids[first], self.ids[second])
    }

    /// Sample `k` distinct ids without replacement, `k` clamped to pool size.
    pub fn sample<R: Rng>(&self, rng: &mut R, k: usize) -> Vec<i64> {
        sample_indices(rng, self.ids.len(), k)
            .into_iter()
            .map(|i| self.ids[i])
            .collect()
    }
}

/// Partial Fisher-Yates: `k` distinct indices out of `0..n`.
pub fn sample_indices<R: Rng>(rng: &mut R, n: usize, k: usize) -> Vec<usize> {
    let k = k.min(n);
    let mut indices: Vec<usize> = (0..n).collect();
    for i in 0..k {
        let j = rng.random_range(i..n);
        indices.swap(i, j);
    }
    indices.truncate(k);
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn pool_is_dense_from_one() {
        let pool = IdPool::new(5);
        assert_eq!(pool.ids(), &[1, 2, 3, 4, 5]);
        assert_eq!(pool.len(), 5);
    }

    #[test]
    fn pick_stays_in_bounds() {
        let pool = IdPool::new(10);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let id = pool.pick(&mut rng);
            assert!((1..=10).contains(&id));
        }
    }

    #[test]
    fn pick_pair_is_distinct() {
        let pool = IdPool::new(3);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let (a, b) = pool.pick_pair(&mut rng);
            assert_ne!(a, b);
            assert!((1..=3).contains(&a));
            assert!((1..=3).contains(&b));
        }
    }

    #[test]
    fn sample_has_no_duplicates() {
        let pool = IdPool::new(20);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut picked = pool.sample(&mut rng, 10);
        assert_eq!(picked.len(), 10);
        picked.sort_unstable();
        picked.dedup();
        assert_eq!(picked.len(), 10);
    }

    #[test]
    fn sample_clamps_to_pool_size() {
        let pool = IdPool::new(4);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut picked = pool.sample(&mut rng, 100);
        picked.sort_unstable();
        assert_eq!(picked, vec![1, 2, 3, 4]);
    }
}
