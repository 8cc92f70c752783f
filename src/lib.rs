//! Prepares a DAX time-series CSV for regression: drops the date column,
//! splits off the `DAX` target, groups rows into shuffled mini-batches and
//! hands back train/test tensors on the chosen device.
//!
//! ```no_run
//! use burn::backend::libtorch::LibTorch;
//! use dax_data::{device::{select_device, DeviceChoice}, load_data, LoaderConfig};
//!
//! let device = select_device(DeviceChoice::Auto)?;
//! let tensors = load_data::<LibTorch<f32>>("data", &LoaderConfig::new(32), &device)?;
//! println!("{:?}", tensors.shapes());
//! # Ok::<(), dax_data::Error>(())
//! ```
pub mod config;
pub mod dataset;
pub mod device;
pub mod error;
mod loader;

pub use config::LoaderConfig;
pub use error::{Error, Result};
pub use loader::{load_data, SplitTensors};
