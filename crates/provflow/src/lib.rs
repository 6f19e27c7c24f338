//! provflow — step-based provisioning orchestrator
//!
//! Executes an ordered sequence of provisioning steps against an external
//! resource provider. Each step may allocate remote resources and may fail;
//! on any halt the already-entered steps are torn down again in reverse
//! order, best-effort, so a partially failed run does not leak resources.
//!
//! # Example
//!
//! ```ignore
//! use provflow::{
//!     AllocateAddressStep, AllocateRequest, ConnectStep, Credentials, Runner, StateBag, Step,
//!     TargetInstance, keys,
//! };
//! use std::sync::Arc;
//!
//! let mut state = StateBag::new();
//! state.put(keys::TARGET, TargetInstance::new("i-42", "203.0.113.9").with_network("net-1"));
//! state.put(keys::PROVIDER, provider_handle);
//! state.put(keys::CREDENTIALS, Credentials::new("admin", private_key));
//!
//! let mut steps: Vec<Box<dyn Step>> = vec![
//!     Box::new(AllocateAddressStep::new(AllocateRequest::new("address"))),
//!     Box::new(ConnectStep::new(dialer)),
//! ];
//!
//! let report = Runner::new().execute(&mut steps, &mut state).await;
//! if !report.is_success() {
//!     eprintln!("provisioning failed: {:?}", report.error);
//! }
//! ```

pub use provflow_core::{
    CancelToken, CoreError, NullUi, Result, RetryPolicy, RunReport, RunStatus, Runner, Sleeper,
    StateBag, Step, StepAction, TokioSleeper, TracingUi, Ui, keys, ui,
};

pub use provflow_cloud::{
    AddressProvider, AllocateAddressStep, AllocateRequest, Allocation, BindOptions, ProviderError,
    TargetInstance,
};

pub use provflow_connect::{
    Communicator, ConnectStep, Credentials, Dialer, Transport, TransportError,
};
