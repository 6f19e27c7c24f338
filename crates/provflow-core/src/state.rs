//! Shared run state
//!
//! A [`StateBag`] is created empty by the caller, seeded with the run inputs
//! (target descriptor, provider handle, operator sink) and threaded through
//! every step. Steps read their prerequisites from the bag and publish their
//! outputs back into it under the keys documented in [`keys`].

use crate::error::{CoreError, Result};
use std::any::Any;
use std::collections::HashMap;

/// Well-known state keys forming the contract between steps.
///
/// Each step documents which of these it reads (preconditions) and which it
/// writes (postconditions).
pub mod keys {
    /// Target instance descriptor (read by every provisioning step).
    pub const TARGET: &str = "target.descriptor";

    /// Provider capability handle, seeded by the caller.
    pub const PROVIDER: &str = "provider.handle";

    /// Operator-facing sink, seeded by the caller.
    pub const UI: &str = "ui";

    /// Credential material for transport connects, seeded by the caller.
    pub const CREDENTIALS: &str = "connect.credentials";

    /// Identifier of an allocated remote resource.
    pub const ALLOCATION_ID: &str = "resource.allocation_id";

    /// Identifier of the resource-to-target binding.
    pub const BINDING_ID: &str = "resource.binding_id";

    /// Publicly reachable address produced by resource acquisition.
    pub const PUBLIC_ADDRESS: &str = "resource.public_address";

    /// Established session handle.
    pub const SESSION: &str = "session.handle";
}

/// Mutable key-value store scoped to one provisioning run.
///
/// Values are type-erased; readers downcast to the concrete type they expect.
/// Keys are unique, last write wins. The bag is single-writer-at-a-time: it
/// is handed to exactly one step at any moment.
#[derive(Default)]
pub struct StateBag {
    values: HashMap<String, Box<dyn Any + Send + Sync>>,
}

impl StateBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value under `key`, replacing any previous value.
    pub fn put<T: Any + Send + Sync>(&mut self, key: impl Into<String>, value: T) {
        self.values.insert(key.into(), Box::new(value));
    }

    /// Fetch a value if present and of the expected type.
    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        self.values.get(key).and_then(|v| v.downcast_ref::<T>())
    }

    /// Fetch a prerequisite value.
    ///
    /// Absence of a prerequisite key is a contract breach between steps, not
    /// a recoverable condition, so it surfaces as a terminal error.
    pub fn require<T: Any>(&self, key: &str) -> Result<&T> {
        let value = self
            .values
            .get(key)
            .ok_or_else(|| CoreError::MissingKey(key.to_string()))?;
        value
            .downcast_ref::<T>()
            .ok_or_else(|| CoreError::TypeMismatch(key.to_string()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> bool {
        self.values.remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
