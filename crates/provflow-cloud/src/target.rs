//! Target instance descriptor

use serde::{Deserialize, Serialize};

/// The remote instance a provisioning run is working against.
///
/// Seeded into the state bag under [`provflow_core::keys::TARGET`] before
/// the run starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetInstance {
    /// Provider-side instance identifier.
    pub id: String,

    /// Address the instance is reachable at without any extra allocation.
    pub address: String,

    /// Network context the instance lives in, if any.
    ///
    /// Address acquisition only applies to targets inside a network context;
    /// a target without one self-skips the step.
    pub network_id: Option<String>,
}

impl TargetInstance {
    pub fn new(id: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            address: address.into(),
            network_id: None,
        }
    }

    pub fn with_network(mut self, network_id: impl Into<String>) -> Self {
        self.network_id = Some(network_id.into());
        self
    }

    /// Whether this target needs a dedicated address allocated and bound.
    pub fn needs_address(&self) -> bool {
        self.network_id.is_some()
    }
}
