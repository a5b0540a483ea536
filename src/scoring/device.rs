use candle_core::Device;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use super::error::ScoringError;
use crate::config::ConfigError;

/// Inference backend named by a [`DnnConfig`](super::DnnConfig).
///
/// Models score one row per candidate, so CPU is the default. GPU backends are opt-in and need
/// the matching cargo feature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComputeDevice {
    #[default]
    Cpu,
    Metal,
    Cuda,
}

impl ComputeDevice {
    /// Whether this build carries the backend.
    pub fn is_compiled(self) -> bool {
        match self {
            ComputeDevice::Cpu => true,
            ComputeDevice::Metal => cfg!(feature = "metal"),
            ComputeDevice::Cuda => cfg!(feature = "cuda"),
        }
    }

    /// Opens ordinal 0 of the backend. A requested GPU that cannot be opened is an error.
    pub fn open(self) -> Result<Device, ScoringError> {
        let device = match self {
            ComputeDevice::Cpu => Device::Cpu,
            ComputeDevice::Metal => Device::new_metal(0).map_err(|e| unavailable(self, e))?,
            ComputeDevice::Cuda => Device::new_cuda(0).map_err(|e| unavailable(self, e))?,
        };

        debug!(requested = %self, ?device, "Opened scoring device");
        Ok(device)
    }
}

fn unavailable(kind: ComputeDevice, err: candle_core::Error) -> ScoringError {
    ScoringError::ModelLoadFailed {
        reason: format!("{kind} device unavailable: {err}"),
    }
}

impl fmt::Display for ComputeDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ComputeDevice::Cpu => "cpu",
            ComputeDevice::Metal => "metal",
            ComputeDevice::Cuda => "cuda",
        })
    }
}

impl FromStr for ComputeDevice {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cpu" => Ok(ComputeDevice::Cpu),
            "metal" => Ok(ComputeDevice::Metal),
            "cuda" => Ok(ComputeDevice::Cuda),
            _ => Err(ConfigError::InvalidValue {
                name: "device",
                reason: format!("unknown device '{s}': expected cpu, metal or cuda"),
            }),
        }
    }
}
