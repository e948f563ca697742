//! Mock tester: smoke-test a model's forward and backward pass before
//! committing to a full training run.
//!
//! ```ignore
//! use reprokit_mock::{MockTester, stderr_dispatch};
//!
//! let tester = MockTester::new(stderr_dispatch());
//! let report = tester.run(|device| MyNet::new(device), &[4, 10], "cpu");
//! assert!(report.passed());
//! ```

pub mod device;
pub mod failure;
pub mod logging;
pub mod model;
pub mod tester;

pub use device::DeviceSpec;
pub use failure::MockFailure;
pub use logging::{MockFormat, mock_dispatch, stderr_dispatch};
pub use model::{MockModel, ModelOutput};
pub use tester::{DEFAULT_DEVICE, MockReport, MockTester, run_mock_test};
