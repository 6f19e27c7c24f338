//! Provider capability interface
//!
//! The four calls a resource acquisition step needs from a cloud provider.
//! Concrete implementations wrap a real API client; tests use recording
//! fakes.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Remote resource allocation and binding capability.
#[async_trait]
pub trait AddressProvider: Send + Sync {
    /// Allocate a new resource of the requested kind.
    async fn allocate(&self, request: &AllocateRequest) -> Result<Allocation>;

    /// Bind an allocated resource to a target instance, returning the
    /// binding identifier.
    async fn bind(&self, allocation_id: &str, target_id: &str, opts: &BindOptions)
    -> Result<String>;

    /// Undo a binding.
    async fn unbind(&self, binding_id: &str) -> Result<()>;

    /// Release an allocation.
    async fn release(&self, allocation_id: &str) -> Result<()>;
}

/// What to allocate.
///
/// `params` is provider-specific and passed through opaquely, the same way
/// resource configuration travels as raw JSON elsewhere in the stack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocateRequest {
    /// Resource kind (e.g. "address").
    pub kind: String,

    /// Provider-specific allocation parameters.
    pub params: serde_json::Value,
}

impl AllocateRequest {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            params: serde_json::Value::Null,
        }
    }

    pub fn with_params(mut self, params: serde_json::Value) -> Self {
        self.params = params;
        self
    }
}

/// A successful allocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Allocation {
    /// Identifier used for binding and release.
    pub allocation_id: String,

    /// Publicly reachable address carried by the resource.
    pub public_address: String,
}

/// Options for the bind call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BindOptions {
    /// Allow stealing a resource that is already bound elsewhere.
    ///
    /// Off by default: binding an already-bound resource must fail rather
    /// than silently reassociate it.
    pub allow_rebind: bool,
}
