//! Property tests for retry accounting and round-robin distribution.

mod common;

use common::strategies::*;
use common::{MockSession, TestHarness};
use deferred_actions::{
    action_fn, ActionError, ActionExt, ItemAction, ReplicationOptions, RetryPolicy, RoundRobin,
};
use proptest::prelude::*;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Run an action that fails `failures` times under a budget of `max_attempts`
fn run_flaky(max_attempts: u32, failures: u32) -> (Result<(), ActionError>, u32, MockSession) {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&calls);
    let action = action_fn(move |_session, path| {
        let counter = Arc::clone(&counter);
        let path = path.to_string();
        Box::pin(async move {
            let call = counter.fetch_add(1, Ordering::SeqCst) + 1;
            if call <= failures {
                return Err(ActionError::Session(format!("{path}: conflict #{call}")));
            }
            Ok(())
        })
    })
    .with_retry(RetryPolicy::immediate(max_attempts).unwrap());

    let mut session = MockSession::new();
    let result = tokio_test::block_on(action.apply(&mut session, "/content/dam/a.jpg"));
    (result, calls.load(Ordering::SeqCst), session)
}

proptest! {
    /// Property: k < n failures are absorbed with exactly k rollbacks
    #[test]
    fn recoverable_failures_are_absorbed(
        (max_attempts, failures) in recoverable_budget_strategy()
    ) {
        let (result, calls, session) = run_flaky(max_attempts, failures);

        prop_assert!(result.is_ok());
        prop_assert_eq!(calls, failures + 1);
        prop_assert_eq!(session.reverts, failures as usize);
        prop_assert_eq!(session.refreshes, failures as usize);
    }

    /// Property: a permanently failing action runs exactly n times and surfaces its last error
    #[test]
    fn exhausted_budget_surfaces_last_error(max_attempts in 1u32..8) {
        let (result, calls, session) = run_flaky(max_attempts, u32::MAX);

        prop_assert_eq!(calls, max_attempts);
        prop_assert_eq!(session.reverts, max_attempts as usize);
        let expected = format!("/content/dam/a.jpg: conflict #{max_attempts}");
        match result {
            Err(ActionError::Session(message)) => prop_assert_eq!(message, expected),
            other => prop_assert!(false, "unexpected result: {:?}", other),
        }
    }

    /// Property: the k-th draw is item k mod N, for any cursor
    #[test]
    fn round_robin_cycles_in_order(agents in agent_ids_strategy(), draws in 0usize..40) {
        let round_robin = RoundRobin::new(agents.clone()).unwrap();
        let drawn: Vec<String> = round_robin.iter().take(draws).collect();

        for (k, value) in drawn.iter().enumerate() {
            prop_assert_eq!(value, &agents[k % agents.len()]);
        }
        // A fresh cursor restarts at the first element.
        prop_assert_eq!(round_robin.iter().next(), Some(agents[0].clone()));
    }

    /// Property: M items over N targets give the first M mod N targets one extra item
    #[test]
    fn round_robin_activation_is_balanced(
        agents in agent_ids_strategy(),
        paths in prop::collection::vec(item_path_strategy(), 0..30),
    ) {
        let harness = TestHarness::new();
        let targets: Vec<_> = agents.iter().map(ReplicationOptions::for_agent).collect();
        let action = harness.actions.activate_all_with_round_robin(targets).unwrap();

        tokio_test::block_on(async {
            for path in &paths {
                let mut session = MockSession::new();
                action.apply(&mut session, path).await.unwrap();
            }
        });

        let calls = harness.replicator.calls();
        prop_assert_eq!(calls.len(), paths.len());
        for (k, call) in calls.iter().enumerate() {
            let options = call.options.as_ref().unwrap();
            prop_assert_eq!(&options.agent_ids, &vec![agents[k % agents.len()].clone()]);
        }
    }
}
