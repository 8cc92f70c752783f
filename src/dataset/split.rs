use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use tracing::debug;

use super::batching::Batches;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct TrainTest {
    pub train: Batches,
    pub test: Batches,
}

/// Splits along the batch axis into train and test sets.
///
/// `ceil(test_size * n)` batches go to the test set, the rest to train. The
/// batch order is shuffled first with an RNG seeded from `seed`, so a given
/// seed always yields the same split.
pub fn train_test_split(batches: &Batches, test_size: f64, seed: u64) -> Result<TrainTest> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(Error::InvalidTestSize(test_size));
    }

    let n = batches.len();
    let n_test = (test_size * n as f64).ceil() as usize;
    let n_train = n.saturating_sub(n_test);
    if n_train == 0 || n_test == 0 {
        return Err(Error::EmptySplit {
            batches: n,
            train: n_train,
            test: n_test,
        });
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(&mut StdRng::seed_from_u64(seed));
    let (test, train) = order.split_at(n_test);
    debug!(train = n_train, test = n_test, "split batches");

    Ok(TrainTest {
        train: batches.select(train),
        test: batches.select(test),
    })
}
