//! The mock test protocol.
//!
//! Seven steps, each aborting the rest on failure: resolve the device, build
//! the model, create a random input, run forward, reject NaN output, run
//! backward from the output mean, and look for parameter gradients. A model
//! without gradients still passes, with a warning.

use std::any::{Any, type_name};
use std::backtrace::BacktraceStatus;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use anyhow::anyhow;
use candle_core::{DType, Device, Tensor};
use tracing::{Dispatch, error, info, warn};

use crate::device::DeviceSpec;
use crate::failure::MockFailure;
use crate::logging::stderr_dispatch;
use crate::model::MockModel;

/// Device used when the caller has no preference.
pub const DEFAULT_DEVICE: &str = "cpu";

/// Outcome of one mock test run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockReport {
    /// Short type name of the model under test.
    pub model: String,
    /// Resolved device, empty if resolution failed.
    pub device: String,
    pub input_shape: Vec<usize>,
    /// Shape of the primary output, once the forward pass succeeded.
    pub output_shape: Option<Vec<usize>>,
    /// Whether any parameter received a gradient.
    pub has_gradients: bool,
    pub failure: Option<MockFailure>,
}

impl MockReport {
    fn new(model: String, input_shape: &[usize]) -> Self {
        Self {
            model,
            device: String::new(),
            input_shape: input_shape.to_vec(),
            output_shape: None,
            has_gradients: false,
            failure: None,
        }
    }

    pub const fn passed(&self) -> bool {
        self.failure.is_none()
    }
}

/// Protocol steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Device,
    Model,
    Input,
    Forward,
    NanCheck,
    Backward,
    Gradients,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Device => "device",
            Self::Model => "model construction",
            Self::Input => "dummy input",
            Self::Forward => "forward pass",
            Self::NanCheck => "NaN check",
            Self::Backward => "backward pass",
            Self::Gradients => "gradient check",
        };
        write!(f, "step {}/7 ({label})", *self as u8 + 1)
    }
}

/// A failed step plus the error behind it, kept for the debug trace.
struct StepError {
    step: Step,
    failure: MockFailure,
    cause: Option<anyhow::Error>,
}

impl StepError {
    /// The failure message carries the whole cause chain.
    fn caused(
        step: Step,
        kind: fn(String) -> MockFailure,
        cause: impl Into<anyhow::Error>,
    ) -> Self {
        let cause = cause.into();
        Self {
            step,
            failure: kind(format!("{cause:#}")),
            cause: Some(cause),
        }
    }

    const fn bare(step: Step, failure: MockFailure) -> Self {
        Self {
            step,
            failure,
            cause: None,
        }
    }

    fn log(&self) {
        error!("Mock Test FAILED: {}", self.failure);
        error!("Failed at {}", self.step);
        if let Some(backtrace) = self.cause.as_ref().map(anyhow::Error::backtrace)
            && backtrace.status() == BacktraceStatus::Captured
        {
            error!("{backtrace}");
        }
    }
}

/// Runs the mock test protocol, logging through an injected dispatch.
///
/// Each tester owns its sink, so testers with different sinks can run
/// concurrently without touching global logging state.
#[derive(Clone)]
pub struct MockTester {
    dispatch: Dispatch,
}

impl Default for MockTester {
    fn default() -> Self {
        Self::new(stderr_dispatch())
    }
}

impl MockTester {
    pub const fn new(dispatch: Dispatch) -> Self {
        Self { dispatch }
    }

    /// Run the protocol for the model built by `construct`.
    ///
    /// Never panics and never returns an error: every failure, including a
    /// panic inside the model, ends up in [`MockReport::failure`].
    pub fn run<M, F>(&self, construct: F, input_shape: &[usize], device: &str) -> MockReport
    where
        M: MockModel,
        F: FnOnce(&Device) -> anyhow::Result<M>,
    {
        tracing::dispatcher::with_default(&self.dispatch, || {
            let mut report = MockReport::new(short_type_name::<M>(), input_shape);
            info!("Starting Mock Test for {}...", report.model);

            match run_protocol(&mut report, construct, input_shape, device) {
                Ok(()) => info!(">>> MOCK TEST PASSED <<<"),
                Err(err) => {
                    err.log();
                    report.failure = Some(err.failure);
                }
            }
            report
        })
    }
}

/// Run a mock test logging to stderr and return whether it passed.
///
/// `device` defaults to [`DEFAULT_DEVICE`].
pub fn run_mock_test<M, F>(construct: F, input_shape: &[usize], device: Option<&str>) -> bool
where
    M: MockModel,
    F: FnOnce(&Device) -> anyhow::Result<M>,
{
    MockTester::default()
        .run(construct, input_shape, device.unwrap_or(DEFAULT_DEVICE))
        .passed()
}

fn run_protocol<M, F>(
    report: &mut MockReport,
    construct: F,
    input_shape: &[usize],
    device: &str,
) -> Result<(), StepError>
where
    M: MockModel,
    F: FnOnce(&Device) -> anyhow::Result<M>,
{
    // 1. Device
    let spec: DeviceSpec = device.parse().map_err(|msg: String| {
        StepError::caused(Step::Device, MockFailure::DeviceUnavailable, anyhow!(msg))
    })?;
    let device = spec
        .resolve()
        .map_err(|e| StepError::caused(Step::Device, MockFailure::DeviceUnavailable, e))?;
    report.device = spec.to_string();
    info!("Running on device: {spec}");

    // 2. Model
    let model = guarded(|| construct(&device))
        .map_err(|e| StepError::caused(Step::Model, MockFailure::ConstructionFailed, e))?;
    info!("Model initialized successfully.");

    // 3. Input
    if input_shape.is_empty() || input_shape.contains(&0) {
        return Err(StepError::bare(
            Step::Input,
            MockFailure::InputFailed(format!(
                "input shape {input_shape:?} must have at least one dimension, all positive"
            )),
        ));
    }
    let input = Tensor::randn(0f32, 1f32, input_shape.to_vec(), &device)
        .map_err(|e| StepError::caused(Step::Input, MockFailure::InputFailed, e))?;
    info!("Dummy input created with shape: {:?}", input.dims());

    // 4. Forward
    let output = guarded(|| Ok(model.forward(&input)?))
        .map_err(|e| StepError::caused(Step::Forward, MockFailure::ForwardFailed, e))?;
    let primary = output.primary().ok_or_else(|| {
        StepError::bare(
            Step::Forward,
            MockFailure::ForwardFailed("model returned an empty output tuple".to_string()),
        )
    })?;
    report.output_shape = Some(primary.dims().to_vec());
    info!("Forward pass successful. Output shape: {:?}", primary.dims());

    // 5. NaN check
    if contains_nan(primary)
        .map_err(|e| StepError::caused(Step::NanCheck, MockFailure::ForwardFailed, e))?
    {
        return Err(StepError::bare(Step::NanCheck, MockFailure::NanDetected));
    }

    // 6. Backward
    let grads = primary
        .mean_all()
        .and_then(|loss| loss.backward())
        .map_err(|e| StepError::caused(Step::Backward, MockFailure::BackwardFailed, e))?;
    info!("Backward pass successful. Gradients computed.");

    // 7. Gradient check
    let params = guarded(|| Ok(model.named_parameters()))
        .map_err(|e| StepError::caused(Step::Gradients, MockFailure::BackwardFailed, e))?;
    report.has_gradients = params.iter().any(|(_, param)| grads.get(param).is_some());
    if report.has_gradients {
        info!("Gradient flow confirmed.");
    } else {
        warn!("No gradients found! Check that parameters are tracked as variables.");
    }

    Ok(())
}

fn contains_nan(tensor: &Tensor) -> candle_core::Result<bool> {
    let values = tensor.flatten_all()?.to_dtype(DType::F32)?.to_vec1::<f32>()?;
    Ok(values.iter().any(|v| v.is_nan()))
}

/// Run model code, turning a panic into an error.
fn guarded<T>(f: impl FnOnce() -> anyhow::Result<T>) -> anyhow::Result<T> {
    panic::catch_unwind(AssertUnwindSafe(f))
        .unwrap_or_else(|payload| Err(anyhow!("panicked: {}", panic_message(payload.as_ref()))))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string())
}

/// `my_crate::models::Net` -> `Net`, keeping generic arguments intact.
fn short_type_name<T>() -> String {
    let full = type_name::<T>();
    let base_end = full.find('<').unwrap_or(full.len());
    let start = full[..base_end].rfind("::").map_or(0, |i| i + 2);
    full[start..].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Widget;

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name::<Widget>(), "Widget");
        assert_eq!(short_type_name::<Vec<Widget>>(), format!("Vec<{}>", type_name::<Widget>()));
    }

    #[test]
    fn test_step_display() {
        assert_eq!(Step::Device.to_string(), "step 1/7 (device)");
        assert_eq!(Step::NanCheck.to_string(), "step 5/7 (NaN check)");
        assert_eq!(Step::Gradients.to_string(), "step 7/7 (gradient check)");
    }

    #[test]
    fn test_contains_nan() {
        let clean = Tensor::new(&[1f32, 2.0, 3.0], &Device::Cpu).unwrap();
        let dirty = Tensor::new(&[1f32, f32::NAN], &Device::Cpu).unwrap();
        assert!(!contains_nan(&clean).unwrap());
        assert!(contains_nan(&dirty).unwrap());
    }

    #[test]
    fn test_guarded_catches_panic() {
        let result: anyhow::Result<()> = guarded(|| panic!("exploded"));
        assert_eq!(result.unwrap_err().to_string(), "panicked: exploded");
    }
}
