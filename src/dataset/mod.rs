mod batcher;
mod batching;
mod split;
mod table;

pub use batcher::{BatchDataset, BatchItem, DaxBatch, DaxBatcher};
pub use batching::{to_batches, to_ordered_batches, Batches};
pub use split::{train_test_split, TrainTest};
pub use table::{FeatureTarget, Table};
