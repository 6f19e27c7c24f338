//! Transport connection for provflow
//!
//! A just-provisioned instance is rarely reachable the moment its address is
//! bound, so connecting is retried on a bounded, backoff-governed schedule.
//! The dial capability and transport handshake live behind traits; the step
//! only decides what counts as a retryable attempt and when to give up.

pub mod communicator;
pub mod error;
pub mod step_connect;
pub mod transport;

// Re-exports
pub use communicator::Communicator;
pub use error::{Result, TransportError};
pub use step_connect::ConnectStep;
pub use transport::{Credentials, Dialer, Transport};
