//! provflow orchestration engine
//!
//! This crate provides the execution core for step-based provisioning runs:
//! an ordered sequence of steps is driven against a shared state bag, and any
//! halt triggers best-effort rollback of every entered step in reverse order.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │               calling CLI/service                │
//! │        (seeds the bag, builds the steps)         │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │                provflow-core                     │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │   Runner { execute(steps, state) }        │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────┐             │
//! │  │  trait Step  │  │   StateBag   │             │
//! │  └──────────────┘  └──────────────┘             │
//! └───────┬─────────────────┬───────────────────────┘
//!         │                 │
//! ┌───────▼───────┐ ┌───────▼───────┐
//! │ provflow-cloud│ │provflow-connect│
//! │ address step  │ │ connect step   │
//! └───────────────┘ └───────────────┘
//! ```
//!
//! Steps execute strictly sequentially; the bag is the only shared mutable
//! state within a run and is not designed for concurrent writers.

pub mod cancel;
pub mod error;
pub mod retry;
pub mod runner;
pub mod state;
pub mod step;
pub mod ui;

// Re-exports
pub use cancel::CancelToken;
pub use error::{CoreError, Result};
pub use retry::{RetryPolicy, Sleeper, TokioSleeper};
pub use runner::{RunReport, RunStatus, Runner};
pub use state::{StateBag, keys};
pub use step::{Step, StepAction};
pub use ui::{NullUi, TracingUi, Ui};
