use burn::{
    data::{
        dataloader::batcher::Batcher,
        dataset::{Dataset, InMemDataset},
    },
    tensor::{backend::Backend, Tensor, TensorData},
};
use ndarray::{Array2, Axis};

use super::batching::Batches;

/// One mini-batch, already cast to `f32`.
#[derive(Clone, Debug)]
pub struct BatchItem {
    /// `[batch_size, n_features]`
    pub features: Array2<f32>,
    /// `[batch_size, 1]`
    pub targets: Array2<f32>,
}

/// Stacked mini-batches on a device.
///
/// `features` is `[n, batch_size, n_features]`, `targets` is `[n, batch_size, 1]`.
#[derive(Clone, Debug)]
pub struct DaxBatch<B: Backend> {
    pub features: Tensor<B, 3>,
    pub targets: Tensor<B, 3>,
}

/// Dataset whose items are whole mini-batches, so a [`DaxBatcher`] inside a
/// `DataLoader` yields groups of them.
/// ```
/// use burn::backend::ndarray::{NdArray, NdArrayDevice};
/// use burn::data::dataloader::DataLoaderBuilder;
/// use dax_data::dataset::{BatchDataset, Batches, DaxBatcher};
/// use ndarray::Array3;
///
/// let batches = Batches::new(Array3::zeros((4, 8, 3)), Array3::zeros((4, 8, 1))).unwrap();
/// let loader = DataLoaderBuilder::new(DaxBatcher::<NdArray>::new(NdArrayDevice::Cpu))
///     .batch_size(2)
///     .build(BatchDataset::from(&batches));
/// let first = loader.iter().next().unwrap();
/// assert_eq!(first.features.dims(), [2, 8, 3]);
/// ```
pub struct BatchDataset {
    dataset: InMemDataset<BatchItem>,
}

impl From<&Batches> for BatchDataset {
    fn from(batches: &Batches) -> Self {
        let items = batches
            .features()
            .axis_iter(Axis(0))
            .zip(batches.targets().axis_iter(Axis(0)))
            .map(|(features, targets)| BatchItem {
                features: features.mapv(|v| v as f32),
                targets: targets.mapv(|v| v as f32),
            })
            .collect();

        Self {
            dataset: InMemDataset::new(items),
        }
    }
}

impl BatchDataset {
    /// All items in index order.
    pub fn items(&self) -> Vec<BatchItem> {
        self.dataset.iter().collect()
    }
}

impl Dataset<BatchItem> for BatchDataset {
    fn get(&self, index: usize) -> Option<BatchItem> {
        self.dataset.get(index)
    }

    fn len(&self) -> usize {
        self.dataset.len()
    }
}

#[derive(Clone, Debug)]
pub struct DaxBatcher<B: Backend> {
    device: B::Device,
}

impl<B: Backend> DaxBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<BatchItem, DaxBatch<B>> for DaxBatcher<B> {
    fn batch(&self, items: Vec<BatchItem>) -> DaxBatch<B> {
        let (batch_size, n_features) = items
            .first()
            .map_or((0, 0), |item| item.features.dim());

        let mut features = Vec::with_capacity(items.len() * batch_size * n_features);
        let mut targets = Vec::with_capacity(items.len() * batch_size);
        for item in &items {
            features.extend(item.features.iter().copied());
            targets.extend(item.targets.iter().copied());
        }

        let features = TensorData::new(features, [items.len(), batch_size, n_features]);
        let targets = TensorData::new(targets, [items.len(), batch_size, 1]);

        DaxBatch {
            features: Tensor::from_data(features, &self.device),
            targets: Tensor::from_data(targets, &self.device),
        }
    }
}
