use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use super::Dataset;
use crate::{MlErr, Result};

impl Dataset {
    /// Randomly partitions the dataset into a training and a test set.
    ///
    /// The test set takes `ceil(test_size * len)` samples, the training set takes the rest.
    /// The same `seed` always yields the same partition.
    ///
    /// # Arguments
    /// * `test_size` - The fraction of samples that go to the test set, in `(0, 1)`.
    /// * `seed` - The seed of the shuffling.
    ///
    /// # Returns
    /// A `(train, test)` tuple, or an error if either partition would be empty.
    pub fn train_test_split(&self, test_size: f64, seed: u64) -> Result<(Dataset, Dataset)> {
        let len = self.len();
        let n_test = (test_size * len as f64).ceil();

        if !(test_size > 0.0 && test_size < 1.0) || n_test < 1.0 || n_test >= len as f64 {
            return Err(MlErr::InvalidSplit { test_size, len });
        }

        let n_test = n_test as usize;
        let mut indices: Vec<usize> = (0..len).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);

        let (test_idx, train_idx) = indices.split_at(n_test);
        Ok((self.select(train_idx)?, self.select(test_idx)?))
    }
}
