//! Address acquisition step

use crate::provider::{AddressProvider, AllocateRequest, BindOptions};
use crate::target::TargetInstance;
use async_trait::async_trait;
use provflow_core::{CoreError, StateBag, Step, StepAction, keys, ui};
use std::sync::Arc;

/// Allocates a dedicated address and binds it to the target instance.
///
/// Reads:
/// - `target.descriptor` ([`TargetInstance`])
/// - `provider.handle` (`Arc<dyn AddressProvider>`)
///
/// Writes:
/// - `resource.allocation_id`: `String` — identifier of the allocation.
/// - `resource.binding_id`: `String` — identifier of the binding.
/// - `resource.public_address`: `String` — address later steps connect to.
///
/// A target outside any network context does not need a dedicated address;
/// the step then continues without allocating and its cleanup is a no-op.
pub struct AllocateAddressStep {
    request: AllocateRequest,
    allocation_id: Option<String>,
    binding_id: Option<String>,
}

impl AllocateAddressStep {
    pub fn new(request: AllocateRequest) -> Self {
        Self {
            request,
            allocation_id: None,
            binding_id: None,
        }
    }
}

impl Default for AllocateAddressStep {
    fn default() -> Self {
        Self::new(AllocateRequest::new("address"))
    }
}

#[async_trait]
impl Step for AllocateAddressStep {
    fn name(&self) -> &str {
        "allocate-address"
    }

    async fn run(&mut self, state: &mut StateBag) -> StepAction {
        let provider = match state.require::<Arc<dyn AddressProvider>>(keys::PROVIDER) {
            Ok(p) => p.clone(),
            Err(err) => return StepAction::Halt(err),
        };
        let target = match state.require::<TargetInstance>(keys::TARGET) {
            Ok(t) => t.clone(),
            Err(err) => return StepAction::Halt(err),
        };
        let ui = ui::from_state(state);

        if !target.needs_address() {
            tracing::debug!(
                target = %target.id,
                "target has no network context, skipping address allocation"
            );
            return StepAction::Continue;
        }

        ui.say("Allocating a new address...");
        let allocation = match provider.allocate(&self.request).await {
            Ok(allocation) => allocation,
            Err(e) => {
                let err = CoreError::Allocation(e.to_string());
                ui.error(&err.to_string());
                return StepAction::Halt(err);
            }
        };

        // Recorded before the bind attempt so a bind failure still releases
        // the allocation during rollback.
        self.allocation_id = Some(allocation.allocation_id.clone());
        tracing::debug!(allocation_id = %allocation.allocation_id, "address allocated");
        state.put(keys::ALLOCATION_ID, allocation.allocation_id.clone());
        state.put(keys::PUBLIC_ADDRESS, allocation.public_address.clone());

        ui.say(&format!(
            "Binding address {} to {}...",
            allocation.public_address, target.id
        ));
        match provider
            .bind(&allocation.allocation_id, &target.id, &BindOptions::default())
            .await
        {
            Ok(binding_id) => {
                self.binding_id = Some(binding_id.clone());
                tracing::debug!(binding_id = %binding_id, "address bound");
                state.put(keys::BINDING_ID, binding_id);
                StepAction::Continue
            }
            Err(e) => {
                let err = CoreError::Binding(e.to_string());
                ui.error(&err.to_string());
                StepAction::Halt(err)
            }
        }
    }

    async fn cleanup(&mut self, state: &mut StateBag) -> provflow_core::Result<()> {
        // Nothing recorded means run never allocated (or self-skipped).
        if self.binding_id.is_none() && self.allocation_id.is_none() {
            return Ok(());
        }

        let provider = state
            .require::<Arc<dyn AddressProvider>>(keys::PROVIDER)?
            .clone();
        let ui = ui::from_state(state);
        let mut failures: Vec<String> = Vec::new();

        if let Some(binding_id) = self.binding_id.take() {
            ui.say("Unbinding the address...");
            if let Err(e) = provider.unbind(&binding_id).await {
                tracing::warn!(binding_id = %binding_id, error = %e, "unbind failed");
                ui.error(&format!("Error unbinding address: {e}"));
                failures.push(e.to_string());
            }
        }

        if let Some(allocation_id) = self.allocation_id.take() {
            ui.say("Releasing the address...");
            if let Err(e) = provider.release(&allocation_id).await {
                tracing::warn!(allocation_id = %allocation_id, error = %e, "release failed");
                ui.error(&format!("Error releasing address: {e}"));
                failures.push(e.to_string());
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Cleanup(failures.join("; ")))
        }
    }
}
