use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use burn::backend::libtorch::LibTorch;
use burn::config::Config;
use clap::Parser;
use dax_data::{
    device::{select_device, DeviceChoice},
    load_data, LoaderConfig,
};
use tracing_subscriber::EnvFilter;

/// Prepare batched train/test tensors from a DAX time-series csv.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// CSV file with a `date` column, feature columns and a `DAX` column.
    #[arg(default_value = "data")]
    path: PathBuf,

    /// Rows per mini-batch.
    #[arg(short, long, default_value_t = 32, conflicts_with = "config")]
    batch_size: usize,

    /// Fraction of batches held out for testing.
    #[arg(long, default_value_t = 0.1, conflicts_with = "config")]
    test_size: f64,

    /// Keep rows in time order instead of shuffling them.
    #[arg(long, conflicts_with = "config")]
    no_shuffle: bool,

    /// Seed for the row shuffle.
    #[arg(long, conflicts_with = "config")]
    seed: Option<u64>,

    /// Seed for the train/test split of the batches.
    #[arg(long, default_value_t = 0, conflicts_with = "config")]
    split_seed: u64,

    #[arg(long, value_enum, default_value_t = DeviceChoice::Auto)]
    device: DeviceChoice,

    /// Read loader settings from this JSON file. Cannot be combined with the
    /// loader flags above.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective loader settings to this JSON file.
    #[arg(long)]
    save_config: Option<PathBuf>,
}

impl Cli {
    fn loader_config(&self) -> Result<LoaderConfig> {
        if let Some(path) = &self.config {
            return LoaderConfig::load(path)
                .map_err(|err| anyhow!("failed to load {}: {err:?}", path.display()));
        }
        Ok(LoaderConfig::new(self.batch_size)
            .with_test_size(self.test_size)
            .with_shuffle(!self.no_shuffle)
            .with_shuffle_seed(self.seed)
            .with_split_seed(self.split_seed))
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.loader_config()?;
    if let Some(path) = &cli.save_config {
        config
            .save(path)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    let device = select_device(cli.device)?;
    let tensors = load_data::<LibTorch<f32>>(&cli.path, &config, &device)
        .with_context(|| format!("failed to prepare {}", cli.path.display()))?;

    let [x_train, x_test, y_train, y_test] = tensors.shapes();
    println!("{x_train:?} {x_test:?} {y_train:?} {y_test:?}");
    Ok(())
}
