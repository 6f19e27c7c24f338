mod common;

use common::{FakeDialer, FakeProvider, init_tracing, seeded_state};
use provflow::{
    AllocateAddressStep, AllocateRequest, CancelToken, Communicator, ConnectStep, CoreError,
    RunStatus, Runner, Step, keys,
};
use std::sync::Arc;
use tokio::sync::Mutex;

// The address step reads its provider handle from the bag; only the dialer
// is injected at construction time.
fn pipeline(dialer: &Arc<FakeDialer>) -> Vec<Box<dyn Step>> {
    vec![
        Box::new(AllocateAddressStep::new(AllocateRequest::new("address"))),
        Box::new(ConnectStep::new(dialer.clone() as Arc<dyn provflow::Dialer>)),
    ]
}

#[tokio::test]
async fn test_end_to_end_success() {
    init_tracing();
    let provider = Arc::new(FakeProvider::default());
    let dialer = Arc::new(FakeDialer::default());
    let mut steps = pipeline(&dialer);
    let mut state = seeded_state(&provider);

    let report = Runner::new().execute(&mut steps, &mut state).await;

    assert!(report.is_success());
    assert!(report.error.is_none());
    assert!(report.cleanup_errors.is_empty());

    // Every published output of the pipeline is in the bag.
    assert_eq!(state.get::<String>(keys::ALLOCATION_ID).unwrap(), "a-1");
    assert_eq!(state.get::<String>(keys::BINDING_ID).unwrap(), "b-1");
    assert_eq!(
        state.get::<String>(keys::PUBLIC_ADDRESS).unwrap(),
        "198.51.100.7"
    );
    let session = state
        .get::<Arc<Mutex<Communicator>>>(keys::SESSION)
        .expect("session handle published");
    assert!(session.lock().await.is_open());

    // Connect went to the freshly bound address, first try.
    assert_eq!(dialer.dial_count(), 1);
    // A successful run tears nothing down.
    assert_eq!(provider.release_calls(), 0);
    assert_eq!(provider.unbind_calls(), 0);
}

#[tokio::test]
async fn test_end_to_end_bind_failure_rolls_back_allocation() {
    init_tracing();
    let provider = Arc::new(FakeProvider {
        fail_bind: true,
        ..Default::default()
    });
    let dialer = Arc::new(FakeDialer::default());
    let mut steps = pipeline(&dialer);
    let mut state = seeded_state(&provider);

    let report = Runner::new().execute(&mut steps, &mut state).await;

    assert_eq!(report.status, RunStatus::Failed);
    assert!(matches!(report.error, Some(CoreError::Binding(_))));

    // The connect step never ran.
    assert_eq!(dialer.dial_count(), 0);
    // Rollback released the dangling allocation and had no binding to undo.
    assert_eq!(
        provider.calls(),
        vec!["allocate:address", "bind:a-1:i-42", "release:a-1"]
    );
    assert!(!state.contains(keys::SESSION));
}

#[tokio::test]
async fn test_cancelled_run_rolls_back_and_reports_cancelled() {
    init_tracing();
    let provider = Arc::new(FakeProvider::default());
    let dialer = Arc::new(FakeDialer::default());
    let cancel = CancelToken::new();
    let mut steps = pipeline(&dialer);
    let mut state = seeded_state(&provider);

    // Cancel lands after the address step but before connect.
    struct CancellingStep(CancelToken);

    #[async_trait::async_trait]
    impl Step for CancellingStep {
        fn name(&self) -> &str {
            "cancel-injector"
        }

        async fn run(&mut self, _state: &mut provflow::StateBag) -> provflow::StepAction {
            self.0.cancel();
            provflow::StepAction::Continue
        }

        async fn cleanup(&mut self, _state: &mut provflow::StateBag) -> provflow::Result<()> {
            Ok(())
        }
    }

    steps.insert(1, Box::new(CancellingStep(cancel.clone())));

    let report = Runner::with_cancel(cancel)
        .execute(&mut steps, &mut state)
        .await;

    assert_eq!(report.status, RunStatus::Cancelled);
    assert!(matches!(report.error, Some(CoreError::Cancelled)));
    // The operator abort still unwinds the address allocation.
    assert_eq!(provider.unbind_calls(), 1);
    assert_eq!(provider.release_calls(), 1);
    assert_eq!(dialer.dial_count(), 0);
}

#[tokio::test]
async fn test_skipping_pipeline_outside_network_context() {
    init_tracing();
    let provider = Arc::new(FakeProvider::default());
    let dialer = Arc::new(FakeDialer::default());
    let mut steps = pipeline(&dialer);

    let mut state = seeded_state(&provider);
    state.put(
        keys::TARGET,
        provflow::TargetInstance::new("i-42", "203.0.113.9"),
    );

    let report = Runner::new().execute(&mut steps, &mut state).await;

    assert!(report.is_success());
    // No allocation happened; connect fell back to the target's own address.
    assert!(provider.calls().is_empty());
    assert!(!state.contains(keys::ALLOCATION_ID));
    assert_eq!(dialer.dial_count(), 1);
    assert!(state.contains(keys::SESSION));
}
