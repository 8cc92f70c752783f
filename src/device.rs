use std::fmt;

use burn::backend::libtorch::LibTorchDevice;
use clap::ValueEnum;
use tracing::{info, warn};

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum DeviceChoice {
    /// First CUDA device when one is present, otherwise the CPU.
    #[default]
    Auto,
    Cpu,
    Cuda,
}

impl fmt::Display for DeviceChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeviceChoice::Auto => "auto",
            DeviceChoice::Cpu => "cpu",
            DeviceChoice::Cuda => "cuda",
        };
        f.write_str(name)
    }
}

pub fn select_device(choice: DeviceChoice) -> Result<LibTorchDevice> {
    resolve(choice, tch::Cuda::is_available())
}

fn resolve(choice: DeviceChoice, cuda_available: bool) -> Result<LibTorchDevice> {
    let device = match (choice, cuda_available) {
        (DeviceChoice::Cpu, _) => LibTorchDevice::Cpu,
        (DeviceChoice::Auto | DeviceChoice::Cuda, true) => LibTorchDevice::Cuda(0),
        (DeviceChoice::Auto, false) => {
            warn!("no CUDA device found, falling back to CPU");
            LibTorchDevice::Cpu
        }
        (DeviceChoice::Cuda, false) => return Err(Error::DeviceUnavailable(choice.to_string())),
    };
    info!(?device, "selected device");
    Ok(device)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case::auto_gpu(DeviceChoice::Auto, true, LibTorchDevice::Cuda(0))]
    #[case::auto_cpu(DeviceChoice::Auto, false, LibTorchDevice::Cpu)]
    #[case::forced_cpu(DeviceChoice::Cpu, true, LibTorchDevice::Cpu)]
    #[case::forced_gpu(DeviceChoice::Cuda, true, LibTorchDevice::Cuda(0))]
    fn resolves(
        #[case] choice: DeviceChoice,
        #[case] cuda: bool,
        #[case] expected: LibTorchDevice,
    ) {
        assert_eq!(resolve(choice, cuda).unwrap(), expected);
    }

    #[rstest]
    fn cuda_without_accelerator_fails() {
        let err = resolve(DeviceChoice::Cuda, false).unwrap_err();
        assert!(matches!(err, Error::DeviceUnavailable(name) if name == "cuda"));
    }
}
