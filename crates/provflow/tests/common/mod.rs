//! Shared fakes for the end-to-end pipeline tests.

use async_trait::async_trait;
use provflow::{
    AddressProvider, AllocateRequest, Allocation, BindOptions, Credentials, Dialer, ProviderError,
    StateBag, TargetInstance, Transport, TransportError, keys,
};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Provider fake that journals every call it receives.
#[derive(Default)]
pub struct FakeProvider {
    pub calls: Mutex<Vec<String>>,
    pub fail_bind: bool,
}

impl FakeProvider {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn release_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.starts_with("release"))
            .count()
    }

    pub fn unbind_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.starts_with("unbind"))
            .count()
    }
}

#[async_trait]
impl AddressProvider for FakeProvider {
    async fn allocate(
        &self,
        request: &AllocateRequest,
    ) -> Result<Allocation, ProviderError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("allocate:{}", request.kind));
        Ok(Allocation {
            allocation_id: "a-1".into(),
            public_address: "198.51.100.7".into(),
        })
    }

    async fn bind(
        &self,
        allocation_id: &str,
        target_id: &str,
        _opts: &BindOptions,
    ) -> Result<String, ProviderError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("bind:{allocation_id}:{target_id}"));
        if self.fail_bind {
            return Err(ProviderError::AlreadyBound(allocation_id.into()));
        }
        Ok("b-1".into())
    }

    async fn unbind(&self, binding_id: &str) -> Result<(), ProviderError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("unbind:{binding_id}"));
        Ok(())
    }

    async fn release(&self, allocation_id: &str) -> Result<(), ProviderError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("release:{allocation_id}"));
        Ok(())
    }
}

/// Dialer fake that succeeds on the first attempt.
#[derive(Default)]
pub struct FakeDialer {
    pub dials: AtomicU32,
}

impl FakeDialer {
    pub fn dial_count(&self) -> u32 {
        self.dials.load(Ordering::SeqCst)
    }
}

pub struct FakeTransport;

#[async_trait]
impl Transport for FakeTransport {
    async fn handshake(&mut self, _auth: &Credentials) -> Result<(), TransportError> {
        Ok(())
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        Ok(())
    }
}

#[async_trait]
impl Dialer for FakeDialer {
    async fn dial(&self, _address: &str) -> Result<Box<dyn Transport>, TransportError> {
        self.dials.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeTransport))
    }
}

/// Bag seeded the way a surrounding CLI/service would seed it.
pub fn seeded_state(provider: &Arc<FakeProvider>) -> StateBag {
    let mut state = StateBag::new();
    state.put(
        keys::TARGET,
        TargetInstance::new("i-42", "203.0.113.9").with_network("net-1"),
    );
    state.put(
        keys::PROVIDER,
        provider.clone() as Arc<dyn AddressProvider>,
    );
    state.put(keys::CREDENTIALS, Credentials::new("admin", "PEM"));
    state
}
