//! End-to-end sequencing tests against a scripted chain client

mod common;

use std::time::Duration;

use tokio::time::Instant;

use common::*;
use dubhe_cycler::orchestrator::{CycleOrchestrator, FixedCycles};

const DELAY: Duration = Duration::from_millis(5000);

#[tokio::test]
async fn test_disabled_plan_submits_nothing() {
    let client = ScriptedClient::ok();
    let sequencer = sequencer(
        client.clone(),
        full_plan(false, false, 1, [false, false, false]),
        Duration::ZERO,
    );

    let report = sequencer.run(&identity(1)).await;

    assert!(client.calls().is_empty());
    assert_eq!(report.attempted, 0);
    assert!(!report.aborted);
}

#[tokio::test]
async fn test_zero_repeat_swap_is_skipped() {
    let client = ScriptedClient::ok();
    let sequencer = sequencer(
        client.clone(),
        vec![swap("Swap wSUI -> wDUBHE", true, 0), liquidity("Add", true)],
        Duration::ZERO,
    );

    sequencer.run(&identity(1)).await;

    assert_eq!(client.functions(), vec![ADD_LIQUIDITY]);
}

#[tokio::test]
async fn test_wrap_failure_skips_rest_of_wallet() {
    let client = ScriptedClient::failing(|call, _| call.function == WRAP && call.wallet == "PRIVATE_KEY_1");
    let sequencer = sequencer(
        client.clone(),
        full_plan(true, true, 1, [true, true, true]),
        Duration::ZERO,
    );
    let orchestrator = CycleOrchestrator::new(vec![identity(1), identity(2)], sequencer);

    let reports = orchestrator.run_cycles(1).await;

    assert_eq!(client.functions_for("PRIVATE_KEY_1"), vec![WRAP]);
    assert_eq!(client.functions_for("PRIVATE_KEY_2").len(), 8);

    assert_eq!(reports.len(), 2);
    assert!(reports[0].aborted);
    assert_eq!(reports[0].attempted, 1);
    assert_eq!(reports[0].failed, 1);
    assert!(!reports[1].aborted);
    assert_eq!(reports[1].succeeded, 8);
}

#[tokio::test(start_paused = true)]
async fn test_swap_repeats_are_spaced_without_trailing_wait() {
    let client = ScriptedClient::ok();
    let executor = executor(client.clone(), DELAY);
    let action = swap_action("Swap wSUI -> wDUBHE", true, 3, vec![0, 1]);

    let start = Instant::now();
    let outcomes = executor.swap(&identity(1), &action).await;
    let elapsed = start.elapsed();

    assert_eq!(outcomes.len(), 3);
    assert!(outcomes.iter().all(|o| o.is_success()));

    let calls = client.calls();
    assert_eq!(calls.len(), 3);
    for pair in calls.windows(2) {
        assert_eq!(pair[1].at - pair[0].at, DELAY);
    }
    assert_eq!(elapsed, DELAY * 2);
}

#[tokio::test(start_paused = true)]
async fn test_huge_swap_repeat_starts_submitting() {
    let client = ScriptedClient::ok();
    let executor = executor(client.clone(), DELAY);
    let action = swap_action("Swap wSUI -> wDUBHE", true, u32::MAX, vec![0, 1]);

    let task = tokio::spawn(async move { executor.swap(&identity(1), &action).await });

    // Two full delays in, three runs have gone out
    tokio::time::sleep(DELAY * 2 + Duration::from_millis(1)).await;
    task.abort();

    assert_eq!(client.functions(), vec![SWAP, SWAP, SWAP]);
}

#[tokio::test]
async fn test_swap_failure_does_not_stop_later_actions() {
    // Second call overall is the second swap run
    let client = ScriptedClient::failing(|call, index| call.function == SWAP && index == 1);
    let sequencer = sequencer(
        client.clone(),
        vec![
            swap("Swap wSUI -> wDUBHE", true, 3),
            liquidity("Add Liquidity wSUI-wDUBHE", true),
        ],
        Duration::ZERO,
    );

    let report = sequencer.run(&identity(1)).await;

    assert_eq!(client.functions(), vec![SWAP, SWAP, SWAP, ADD_LIQUIDITY]);
    assert_eq!(report.attempted, 4);
    assert_eq!(report.succeeded, 3);
    assert_eq!(report.failed, 1);
    assert!(!report.aborted);
}

#[tokio::test]
async fn test_liquidity_failure_continues() {
    let client = ScriptedClient::failing(|call, index| call.function == ADD_LIQUIDITY && index == 0);
    let sequencer = sequencer(
        client.clone(),
        full_plan(false, false, 1, [true, true, true]),
        Duration::ZERO,
    );

    let report = sequencer.run(&identity(1)).await;

    assert_eq!(client.functions().len(), 3);
    assert_eq!(report.failed, 1);
    assert_eq!(report.succeeded, 2);
}

#[tokio::test(start_paused = true)]
async fn test_single_wallet_two_cycles() {
    let client = ScriptedClient::ok();
    let sequencer = sequencer(
        client.clone(),
        full_plan(true, false, 1, [false, true, false]),
        DELAY,
    );
    let orchestrator = CycleOrchestrator::new(vec![identity(1)], sequencer);
    let mut source = FixedCycles::once(2).unwrap();

    orchestrator.run(&mut source).await.unwrap();

    assert_eq!(client.functions(), vec![WRAP, ADD_LIQUIDITY, WRAP, ADD_LIQUIDITY]);

    let calls = client.calls();
    // wrap, delay, add_liquidity, delay after action, delay after wallet, wrap
    assert_eq!(calls[1].at - calls[0].at, DELAY);
    assert_eq!(calls[2].at - calls[1].at, DELAY * 2);
}

#[tokio::test]
async fn test_wallets_are_processed_in_order_not_interleaved() {
    let client = ScriptedClient::ok();
    let sequencer = sequencer(
        client.clone(),
        full_plan(false, true, 1, [true, true, true]),
        Duration::ZERO,
    );
    let orchestrator = CycleOrchestrator::new(vec![identity(1), identity(2)], sequencer);

    assert_eq!(orchestrator.identities().len(), 2);
    let reports = orchestrator.run_cycles(1).await;

    let wallets = client.wallets();
    assert_eq!(wallets.len(), 14);
    assert!(wallets[..7].iter().all(|w| w == "PRIVATE_KEY_1"));
    assert!(wallets[7..].iter().all(|w| w == "PRIVATE_KEY_2"));

    let expected = vec![
        SWAP,
        SWAP,
        SWAP,
        SWAP,
        ADD_LIQUIDITY,
        ADD_LIQUIDITY,
        ADD_LIQUIDITY,
    ];
    assert_eq!(client.functions_for("PRIVATE_KEY_1"), expected);
    assert_eq!(client.functions_for("PRIVATE_KEY_2"), expected);

    assert_eq!(reports.len(), 2);
    assert!(reports.iter().all(|r| r.succeeded == 7));
}

#[tokio::test(start_paused = true)]
async fn test_delay_after_every_wallet() {
    let client = ScriptedClient::ok();
    let sequencer = sequencer(
        client.clone(),
        full_plan(false, false, 1, [false, false, false]),
        DELAY,
    );
    let orchestrator = CycleOrchestrator::new(vec![identity(1), identity(2), identity(3)], sequencer);

    let start = Instant::now();
    orchestrator.run_cycles(2).await;

    assert!(client.calls().is_empty());
    assert_eq!(start.elapsed(), DELAY * 6);
}

#[tokio::test]
async fn test_panicking_wallet_does_not_stop_the_cycle() {
    let client = ScriptedClient::panicking_for("PRIVATE_KEY_1");
    let sequencer = sequencer(
        client.clone(),
        full_plan(true, false, 1, [true, false, false]),
        Duration::ZERO,
    );
    let orchestrator = CycleOrchestrator::new(vec![identity(1), identity(2)], sequencer);

    let reports = orchestrator.run_cycles(2).await;

    assert_eq!(
        client.functions_for("PRIVATE_KEY_2"),
        vec![WRAP, ADD_LIQUIDITY, WRAP, ADD_LIQUIDITY]
    );
    assert!(client.functions_for("PRIVATE_KEY_1").is_empty());
    assert_eq!(reports.len(), 2);
}

#[tokio::test]
async fn test_every_source_count_is_run() {
    let client = ScriptedClient::ok();
    let sequencer = sequencer(client.clone(), vec![wrap(true)], Duration::ZERO);
    let orchestrator = CycleOrchestrator::new(vec![identity(1)], sequencer);
    let mut source = FixedCycles::new([1, 3]).unwrap();

    orchestrator.run(&mut source).await.unwrap();

    assert_eq!(client.functions().len(), 4);
}

#[tokio::test]
async fn test_step_and_success_lines_are_marked() {
    let logs = LogBuffer::default();
    let _guard = tracing::subscriber::set_default(logs.subscriber());

    let client = ScriptedClient::ok();
    let executor = executor(client.clone(), Duration::ZERO);
    let action = swap_action("Swap wSUI -> wDUBHE", true, 1, vec![0, 1]);

    executor.swap(&identity(1), &action).await;

    let lines = logs.lines();
    assert!(lines
        .iter()
        .any(|l| l.contains("step=true") && l.contains("Swap wSUI -> wDUBHE (Run 1/1) for")));
    assert!(lines.iter().any(|l| l.contains("success=true")
        && l.contains("Transaction: https://testnet.suivision.xyz/txblock/digest-0")));
    assert!(lines
        .iter()
        .any(|l| l.contains("success=true") && l.contains("(Run 1) completed for")));
}
