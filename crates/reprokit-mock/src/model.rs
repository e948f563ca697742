//! The model contract exercised by the mock tester.

use candle_core::{Result, Tensor};

/// What a model's forward pass produced.
///
/// Models that return several tensors (RNN state, attention maps, ...) use
/// [`ModelOutput::Tuple`]; only the first element is checked.
#[derive(Debug, Clone)]
pub enum ModelOutput {
    Single(Tensor),
    Tuple(Vec<Tensor>),
}

impl ModelOutput {
    /// The tensor the NaN check and the backward pass run on.
    pub fn primary(&self) -> Option<&Tensor> {
        match self {
            Self::Single(tensor) => Some(tensor),
            Self::Tuple(tensors) => tensors.first(),
        }
    }
}

impl From<Tensor> for ModelOutput {
    fn from(tensor: Tensor) -> Self {
        Self::Single(tensor)
    }
}

impl From<Vec<Tensor>> for ModelOutput {
    fn from(tensors: Vec<Tensor>) -> Self {
        Self::Tuple(tensors)
    }
}

/// A model the mock tester can drive.
///
/// Implement this on a thin wrapper around your network.
pub trait MockModel {
    /// Evaluate the model on `input`.
    fn forward(&self, input: &Tensor) -> Result<ModelOutput>;

    /// Trainable tensors by name.
    ///
    /// Gradients are only recorded for tensors backed by a `candle_core::Var`.
    fn named_parameters(&self) -> Vec<(String, Tensor)>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use candle_core::{DType, Device};

    #[test]
    fn test_primary_of_tuple_is_first() {
        let a = Tensor::zeros((2, 2), DType::F32, &Device::Cpu).unwrap();
        let b = Tensor::ones(3, DType::F32, &Device::Cpu).unwrap();
        let output = ModelOutput::from(vec![a, b]);
        assert_eq!(output.primary().unwrap().dims(), &[2, 2]);
    }

    #[test]
    fn test_empty_tuple_has_no_primary() {
        assert!(ModelOutput::Tuple(Vec::new()).primary().is_none());
    }
}
