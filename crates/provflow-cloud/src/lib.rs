//! Cloud resource acquisition for provflow
//!
//! This crate defines the provider capability interface the orchestrator
//! core treats as opaque — allocate, bind, unbind, release — plus the
//! address acquisition step built on top of it. Provider-specific request
//! and response marshaling stays behind the [`AddressProvider`] trait; the
//! step only sees identifiers and loggable error strings.

pub mod error;
pub mod provider;
pub mod step_allocate_address;
pub mod target;

// Re-exports
pub use error::{ProviderError, Result};
pub use provider::{AddressProvider, AllocateRequest, Allocation, BindOptions};
pub use step_allocate_address::AllocateAddressStep;
pub use target::TargetInstance;
