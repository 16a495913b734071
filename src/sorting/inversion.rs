//! Exact inversion ratio over byte-valued keys.
//!
//! Counts pairs `i < j` with `value[i] > value[j]` in `O(n log 256)` using a
//! Fenwick tree indexed by value frequency, and normalises by the number of
//! pairs `n (n - 1) / 2`.

/// Number of distinct keys.
const KEYS: usize = 256;

/// Reusable frequency table for [`inversion_ratio_with`].
///
/// Lives on the caller's side so high-frequency callers (one ratio check
/// every diffusion check interval) never reallocate.
#[derive(Clone, Debug)]
pub struct InversionScratch {
    tree: [u32; KEYS + 1],
}

impl Default for InversionScratch {
    fn default() -> Self {
        Self {
            tree: [0; KEYS + 1],
        }
    }
}

impl InversionScratch {
    fn reset(&mut self) {
        self.tree.fill(0);
    }

    /// Record one occurrence of `key`.
    fn add(&mut self, key: u8) {
        let mut i = key as usize + 1;
        while i <= KEYS {
            self.tree[i] += 1;
            i += i & i.wrapping_neg();
        }
    }

    /// Number of recorded keys `<= key`.
    fn count_at_most(&self, key: u8) -> u64 {
        let mut i = key as usize + 1;
        let mut total = 0u64;
        while i > 0 {
            total += self.tree[i] as u64;
            i -= i & i.wrapping_neg();
        }
        total
    }
}

/// Clamp an arbitrary sample into a key: non-finite and out-of-range values
/// land on the nearest bound (`NaN` maps to 0), fractions are rounded.
pub fn clamp_key(sample: f64) -> u8 {
    if sample.is_nan() {
        return 0;
    }
    sample.round().clamp(0.0, 255.0) as u8
}

/// Number of inverted pairs in `keys`.
pub fn count_inversions<I>(keys: I, scratch: &mut InversionScratch) -> u64
where
    I: IntoIterator<Item = u8>,
{
    scratch.reset();
    let mut seen = 0u64;
    let mut inversions = 0u64;
    for key in keys {
        inversions += seen - scratch.count_at_most(key);
        scratch.add(key);
        seen += 1;
    }
    inversions
}

/// Inversion ratio in `[0, 1]` using caller-provided scratch storage.
///
/// Sequences shorter than two elements have ratio 0.
pub fn inversion_ratio_with<I>(keys: I, scratch: &mut InversionScratch) -> f64
where
    I: IntoIterator<Item = u8>,
{
    let mut len = 0u64;
    let inversions = count_inversions(keys.into_iter().inspect(|_| len += 1), scratch);
    if len < 2 {
        return 0.0;
    }
    let pairs = len as f64 * (len - 1) as f64 / 2.0;
    inversions as f64 / pairs
}

/// Inversion ratio of a key slice.
pub fn inversion_ratio(keys: &[u8]) -> f64 {
    inversion_ratio_with(keys.iter().copied(), &mut InversionScratch::default())
}

/// Inversion ratio of arbitrary numeric samples, clamped with [`clamp_key`].
pub fn inversion_ratio_of_samples(samples: &[f64], scratch: &mut InversionScratch) -> f64 {
    inversion_ratio_with(samples.iter().map(|&s| clamp_key(s)), scratch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn brute_force(keys: &[u8]) -> u64 {
        let mut count = 0;
        for i in 0..keys.len() {
            for j in i + 1..keys.len() {
                if keys[i] > keys[j] {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn test_degenerate_lengths() {
        assert_eq!(inversion_ratio(&[]), 0.0);
        assert_eq!(inversion_ratio(&[42]), 0.0);
    }

    #[test]
    fn test_sorted_and_reversed() {
        let ascending: Vec<u8> = (0..=200).collect();
        let descending: Vec<u8> = ascending.iter().rev().copied().collect();
        assert_eq!(inversion_ratio(&ascending), 0.0);
        assert_eq!(inversion_ratio(&descending), 1.0);
    }

    #[test]
    fn test_ties_are_not_inversions() {
        assert_eq!(inversion_ratio(&[5, 5, 5, 5]), 0.0);
        // (9,3) (9,5) (9,3) (5,3)
        let keys = [9, 3, 5, 3];
        assert_eq!(brute_force(&keys), 4);
        assert!((inversion_ratio(&keys) - 4.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_samples_are_clamped() {
        let mut scratch = InversionScratch::default();
        let samples = [f64::INFINITY, 300.0, 12.4, -7.0, f64::NAN];
        // keys: 255, 255, 12, 0, 0
        let ratio = inversion_ratio_of_samples(&samples, &mut scratch);
        assert!((ratio - 8.0 / 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_scratch_reuse_is_clean() {
        let mut scratch = InversionScratch::default();
        let first = inversion_ratio_with([3u8, 2, 1], &mut scratch);
        let second = inversion_ratio_with([1u8, 2, 3], &mut scratch);
        assert_eq!(first, 1.0);
        assert_eq!(second, 0.0);
    }

    proptest! {
        #[test]
        fn matches_brute_force(keys in proptest::collection::vec(any::<u8>(), 0..200)) {
            let mut scratch = InversionScratch::default();
            prop_assert_eq!(count_inversions(keys.iter().copied(), &mut scratch), brute_force(&keys));
        }

        #[test]
        fn ratio_is_a_fraction(keys in proptest::collection::vec(any::<u8>(), 0..200)) {
            let ratio = inversion_ratio(&keys);
            prop_assert!((0.0..=1.0).contains(&ratio));
        }

        #[test]
        fn distinct_descending_is_one(len in 2usize..=256) {
            let keys: Vec<u8> = (0..len).rev().map(|k| k as u8).collect();
            prop_assert_eq!(inversion_ratio(&keys), 1.0);
        }
    }
}
