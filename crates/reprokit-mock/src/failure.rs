//! Why a mock test failed.

use thiserror::Error;

/// Reason a mock test did not pass, one variant per protocol step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MockFailure {
    /// The requested device could not be opened.
    #[error("Device unavailable: {0}")]
    DeviceUnavailable(String),

    /// The model constructor returned an error or panicked.
    #[error("Model construction failed: {0}")]
    ConstructionFailed(String),

    /// The random input tensor could not be created.
    #[error("Input creation failed: {0}")]
    InputFailed(String),

    /// The forward pass errored, panicked or returned nothing.
    #[error("Forward pass failed: {0}")]
    ForwardFailed(String),

    /// The output contains NaN values.
    #[error("Output contains NaN values!")]
    NanDetected,

    /// Reducing the output or propagating gradients failed.
    #[error("Backward pass failed: {0}")]
    BackwardFailed(String),
}
