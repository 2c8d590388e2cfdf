//! Seeded resampling: shuffled k-fold splits and a train/test split.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use agririsk_core::types::DataError;

use crate::error::ModelError;

/// Default held-out fraction for the final evaluation split.
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;

/// Row indices of one fold: `(train, test)`.
pub type Fold = (Vec<usize>, Vec<usize>);

fn permutation(n: usize, seed: u64) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);
    indices
}

/// K-fold cross-validation splitter.
///
/// Fold sizes differ by at most one: the first `n % k` folds hold one extra
/// row. With shuffling on, rows are permuted once with the seed before
/// being cut into folds.
///
/// # Examples
///
/// ```
/// use agririsk_optimiser::validation::KFold;
///
/// let folds = KFold::new(3).with_shuffle(7).split(10).unwrap();
/// assert_eq!(folds.len(), 3);
/// let sizes: Vec<usize> = folds.iter().map(|(_, test)| test.len()).collect();
/// assert_eq!(sizes, vec![4, 3, 3]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KFold {
    n_splits: usize,
    seed: Option<u64>,
}

impl KFold {
    /// Unshuffled splitter with `n_splits` folds.
    pub fn new(n_splits: usize) -> Self {
        Self {
            n_splits,
            seed: None,
        }
    }

    /// Shuffle rows with `seed` before splitting.
    pub fn with_shuffle(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of folds.
    pub fn n_splits(&self) -> usize {
        self.n_splits
    }

    /// Split `n` rows into folds.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if fewer than two folds are requested
    /// - `EmptyDataset` if `n == 0`
    /// - `InsufficientData` if `n < n_splits`
    pub fn split(&self, n: usize) -> Result<Vec<Fold>, ModelError> {
        if self.n_splits < 2 {
            return Err(ModelError::invalid_parameter(format!(
                "n_splits must be at least 2, got {}",
                self.n_splits
            )));
        }
        if n == 0 {
            return Err(DataError::EmptyDataset.into());
        }
        if n < self.n_splits {
            return Err(ModelError::InsufficientData {
                required: self.n_splits,
                provided: n,
            });
        }

        let order = match self.seed {
            Some(seed) => permutation(n, seed),
            None => (0..n).collect(),
        };
        let base = n / self.n_splits;
        let extra = n % self.n_splits;

        let mut folds = Vec::with_capacity(self.n_splits);
        let mut start = 0;
        for k in 0..self.n_splits {
            let size = base + usize::from(k < extra);
            let end = start + size;
            let test = order[start..end].to_vec();
            let train = order[..start]
                .iter()
                .chain(&order[end..])
                .copied()
                .collect();
            folds.push((train, test));
            start = end;
        }
        Ok(folds)
    }
}

/// Seeded shuffle split into `(train, test)` row indices.
///
/// The test set holds `ceil(test_fraction · n)` rows.
///
/// # Errors
///
/// - `InvalidParameter` unless `0 < test_fraction < 1`
/// - `EmptyDataset` if `n == 0`
/// - `InsufficientData` if either side would be empty
pub fn train_test_split(n: usize, test_fraction: f64, seed: u64) -> Result<Fold, ModelError> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(ModelError::invalid_parameter(format!(
            "test fraction must lie in (0, 1), got {}",
            test_fraction
        )));
    }
    if n == 0 {
        return Err(DataError::EmptyDataset.into());
    }
    let n_test = (test_fraction * n as f64).ceil() as usize;
    if n_test == 0 || n_test >= n {
        return Err(ModelError::InsufficientData {
            required: 2,
            provided: n,
        });
    }
    let order = permutation(n, seed);
    let test = order[..n_test].to_vec();
    let train = order[n_test..].to_vec();
    Ok((train, test))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_partition(folds: &[Fold], n: usize) {
        let mut seen = vec![0usize; n];
        for (train, test) in folds {
            assert_eq!(train.len() + test.len(), n);
            for &i in test {
                seen[i] += 1;
                assert!(!train.contains(&i));
            }
        }
        assert!(seen.iter().all(|&c| c == 1));
    }

    #[test]
    fn test_unshuffled_folds_are_contiguous() {
        let folds = KFold::new(2).split(5).unwrap();
        assert_eq!(folds[0].1, vec![0, 1, 2]);
        assert_eq!(folds[1].1, vec![3, 4]);
        assert_eq!(folds[1].0, vec![0, 1, 2]);
        assert_partition(&folds, 5);
    }

    #[test]
    fn test_shuffled_folds_partition_rows() {
        let folds = KFold::new(5).with_shuffle(37).split(23).unwrap();
        assert_partition(&folds, 23);
    }

    #[test]
    fn test_shuffle_is_seeded() {
        let a = KFold::new(4).with_shuffle(1).split(20).unwrap();
        let b = KFold::new(4).with_shuffle(1).split(20).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_fold_errors() {
        assert!(matches!(
            KFold::new(1).split(10),
            Err(ModelError::InvalidParameter(_))
        ));
        assert!(matches!(
            KFold::new(5).split(4),
            Err(ModelError::InsufficientData { required: 5, provided: 4 })
        ));
    }

    #[test]
    fn test_train_test_split_sizes() {
        let (train, test) = train_test_split(11, 0.2, 37).unwrap();
        assert_eq!(test.len(), 3);
        assert_eq!(train.len(), 8);
        let (train, test) = train_test_split(10, 0.2, 37).unwrap();
        assert_eq!((train.len(), test.len()), (8, 2));
        assert_eq!(train_test_split(10, 0.2, 37).unwrap(), (train, test));
    }

    #[test]
    fn test_train_test_split_errors() {
        assert!(train_test_split(1, 0.2, 0).is_err());
        assert!(train_test_split(10, 1.0, 0).is_err());
    }

    #[test]
    fn test_zero_rows_are_empty() {
        let empty = ModelError::Data(DataError::EmptyDataset);
        assert_eq!(train_test_split(0, 0.2, 0).unwrap_err(), empty);
        assert_eq!(KFold::new(5).with_shuffle(3).split(0).unwrap_err(), empty);
    }
}
