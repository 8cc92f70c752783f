use std::path::Path;

use burn::{
    data::dataloader::batcher::Batcher,
    tensor::{backend::Backend, Tensor},
};
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;

use crate::{
    config::LoaderConfig,
    dataset::{
        to_batches, to_ordered_batches, train_test_split, BatchDataset, Batches, DaxBatcher,
        FeatureTarget, Table,
    },
    error::Result,
};

/// Train and test tensors, all `f32` on the same device.
#[derive(Clone, Debug)]
pub struct SplitTensors<B: Backend> {
    /// `[n_train, batch_size, n_features]`
    pub x_train: Tensor<B, 3>,
    /// `[n_test, batch_size, n_features]`
    pub x_test: Tensor<B, 3>,
    /// `[n_train, batch_size, 1]`
    pub y_train: Tensor<B, 3>,
    /// `[n_test, batch_size, 1]`
    pub y_test: Tensor<B, 3>,
}

impl<B: Backend> SplitTensors<B> {
    /// Shapes of `x_train`, `x_test`, `y_train` and `y_test`, in that order.
    pub fn shapes(&self) -> [[usize; 3]; 4] {
        [
            self.x_train.dims(),
            self.x_test.dims(),
            self.y_train.dims(),
            self.y_test.dims(),
        ]
    }
}

/// Reads the CSV at `path` and prepares batched train/test tensors on `device`.
///
/// The date column is dropped, the target column is split off, rows are
/// grouped into batches of `config.batch_size` (remainder discarded) and
/// `config.test_size` of the batches are held out.
pub fn load_data<B: Backend>(
    path: impl AsRef<Path>,
    config: &LoaderConfig,
    device: &B::Device,
) -> Result<SplitTensors<B>> {
    config.validate()?;
    let path = path.as_ref();

    let mut table = Table::from_path(path)?;
    table.drop_column(&config.date_column)?;
    let data = table.split_target(&config.target_column)?;
    info!(
        path = %path.display(),
        rows = table.len(),
        features = data.feature_names.len(),
        "loaded table"
    );

    let batches = batch(&data, config)?;
    let split = train_test_split(&batches, config.test_size, config.split_seed)?;

    let batcher = DaxBatcher::<B>::new(device.clone());
    let train = batcher.batch(BatchDataset::from(&split.train).items());
    let test = batcher.batch(BatchDataset::from(&split.test).items());

    let tensors = SplitTensors {
        x_train: train.features,
        x_test: test.features,
        y_train: train.targets,
        y_test: test.targets,
    };
    info!(shapes = ?tensors.shapes(), "prepared tensors");
    Ok(tensors)
}

fn batch(data: &FeatureTarget, config: &LoaderConfig) -> Result<Batches> {
    let (features, targets) = (data.features.view(), data.targets.view());
    if !config.shuffle {
        return to_ordered_batches(features, targets, config.batch_size);
    }
    let mut rng = match config.shuffle_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    to_batches(features, targets, config.batch_size, &mut rng)
}
