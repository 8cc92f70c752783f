use ndarray::{Array3, ArrayView1, ArrayView2, Axis};
use rand::{seq::SliceRandom, Rng};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Row-aligned mini-batches in batch-major layout.
///
/// `features` has shape `[n_batches, batch_size, n_features]` and `targets`
/// has shape `[n_batches, batch_size, 1]`; position `(b, i)` in both refers
/// to the same source row.
#[derive(Debug, Clone, PartialEq)]
pub struct Batches {
    features: Array3<f64>,
    targets: Array3<f64>,
}

impl Batches {
    /// Pairs already batched arrays, checking that they agree on the batch
    /// count and batch size and that targets are one column wide.
    pub fn new(features: Array3<f64>, targets: Array3<f64>) -> Result<Self> {
        let (n_features, n_targets) = (features.len_of(Axis(0)), targets.len_of(Axis(0)));
        if n_features != n_targets {
            return Err(Error::LengthMismatch {
                features: n_features,
                targets: n_targets,
            });
        }
        if features.len_of(Axis(1)) != targets.len_of(Axis(1)) || targets.len_of(Axis(2)) != 1 {
            return Err(Error::BatchShape {
                features: features.shape().to_vec(),
                targets: targets.shape().to_vec(),
            });
        }
        Ok(Self { features, targets })
    }

    /// `[n_batches, batch_size, n_features]`
    pub fn features(&self) -> &Array3<f64> {
        &self.features
    }

    /// `[n_batches, batch_size, 1]`
    pub fn targets(&self) -> &Array3<f64> {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.features.len_of(Axis(0))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn batch_size(&self) -> usize {
        self.features.len_of(Axis(1))
    }

    pub fn num_features(&self) -> usize {
        self.features.len_of(Axis(2))
    }

    /// Gathers the given batches, in order, along the batch axis.
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            features: self.features.select(Axis(0), indices),
            targets: self.targets.select(Axis(0), indices),
        }
    }
}

/// Shuffles rows with one permutation shared by features and targets, drops
/// the `rows % batch_size` remainder and reshapes into [`Batches`].
///
/// A `batch_size` larger than the row count yields zero batches.
pub fn to_batches<R: Rng + ?Sized>(
    features: ArrayView2<f64>,
    targets: ArrayView1<f64>,
    batch_size: usize,
    rng: &mut R,
) -> Result<Batches> {
    let mut order: Vec<usize> = (0..features.nrows()).collect();
    order.shuffle(rng);
    gather(features, targets, batch_size, &order)
}

/// Like [`to_batches`] but keeps rows in time order.
pub fn to_ordered_batches(
    features: ArrayView2<f64>,
    targets: ArrayView1<f64>,
    batch_size: usize,
) -> Result<Batches> {
    let order: Vec<usize> = (0..features.nrows()).collect();
    gather(features, targets, batch_size, &order)
}

fn gather(
    features: ArrayView2<f64>,
    targets: ArrayView1<f64>,
    batch_size: usize,
    order: &[usize],
) -> Result<Batches> {
    if batch_size == 0 {
        return Err(Error::InvalidBatchSize);
    }
    let rows = features.nrows();
    if rows != targets.len() {
        return Err(Error::LengthMismatch {
            features: rows,
            targets: targets.len(),
        });
    }

    let n_batches = rows / batch_size;
    let kept = n_batches * batch_size;
    let n_features = features.ncols();
    if kept < rows {
        warn!(
            rows,
            batch_size,
            discarded = rows - kept,
            "row count is not a multiple of the batch size"
        );
    }

    let order = &order[..kept];
    let features = features
        .select(Axis(0), order)
        .into_shape_with_order((n_batches, batch_size, n_features))?;
    let targets = targets
        .select(Axis(0), order)
        .into_shape_with_order((n_batches, batch_size, 1))?;
    debug!(shape = ?features.shape(), "batched features");

    Ok(Batches { features, targets })
}
