//! Immediate and scheduled mints against the stub node.

use std::time::Duration;

use aptos_toolkit::config::GasParams;
use aptos_toolkit::lifecycle::Shutdown;
use aptos_toolkit::mint::{MintOutcome, MintProfile, Minter};

mod common;

const LAUNCHPAD: &str = "0xd1fd99c1944b84d1670a2536417e997864ad12303d19eac725891691b04d614e::factory";

fn minter(node: &common::StubNode, now_secs: u64) -> Minter {
    common::seed_account(&node.state, common::test_account().address(), 0);
    Minter::new(node.sender(now_secs), GasParams::new(9_000, 100))
}

#[tokio::test]
async fn test_mint_now_submits() {
    let node = common::start_stub_node().await;
    let profile = MintProfile::public(&format!("{}::mint_with_quantity", LAUNCHPAD)).unwrap();

    let hash = minter(&node, 100).mint_now(&profile, 2).await.unwrap();
    assert!(hash.starts_with("0x"));
    assert_eq!(node.submissions(), 1);
}

#[tokio::test]
async fn test_prepare_does_not_submit() {
    let node = common::start_stub_node().await;
    let profile = MintProfile::allow_list(LAUNCHPAD, Some("0x1::aptos_coin::AptosCoin")).unwrap();

    let prepared = minter(&node, 100).prepare(&profile, 1).await.unwrap();
    assert!(prepared.signed().verify().is_ok());
    assert_eq!(prepared.signed().raw_transaction().max_gas_amount, 9_000);
    assert_eq!(node.submissions(), 0);
}

#[tokio::test]
async fn test_scheduled_mint_fires_at_target() {
    let node = common::start_stub_node().await;
    let profile = MintProfile::public(&format!("{}::mint", LAUNCHPAD)).unwrap();
    let shutdown = Shutdown::new();

    // The clock is frozen at 100; a target one second out waits one real second
    let scheduled = minter(&node, 100).schedule(&profile, 1, 101).await.unwrap();
    assert_eq!(scheduled.target(), Duration::from_secs(101));

    let outcome = scheduled.run(shutdown.subscribe()).await.unwrap();
    assert!(matches!(outcome, MintOutcome::Submitted(_)));
    assert_eq!(node.submissions(), 1);
}

#[tokio::test]
async fn test_missed_window_sends_nothing() {
    let node = common::start_stub_node().await;
    let profile = MintProfile::public(&format!("{}::mint", LAUNCHPAD)).unwrap();
    let shutdown = Shutdown::new();

    let scheduled = minter(&node, 100).schedule(&profile, 1, 50).await.unwrap();
    let outcome = scheduled.run(shutdown.subscribe()).await.unwrap();

    assert_eq!(outcome, MintOutcome::WindowMissed);
    assert_eq!(node.submissions(), 0);
}

#[tokio::test]
async fn test_shutdown_cancels_spawned_mint() {
    let node = common::start_stub_node().await;
    let profile = MintProfile::public(&format!("{}::mint", LAUNCHPAD)).unwrap();
    let shutdown = Shutdown::new();

    let scheduled = minter(&node, 100).schedule(&profile, 1, 3_600).await.unwrap();
    let handle = scheduled.spawn(shutdown.subscribe());
    shutdown.trigger();

    let outcome = handle.await.unwrap().unwrap();
    assert_eq!(outcome, MintOutcome::Cancelled);
    assert_eq!(node.submissions(), 0);
}

#[tokio::test]
async fn test_long_wait_expiration_counts_from_target() {
    let node = common::start_stub_node().await;
    let profile = MintProfile::public(&format!("{}::mint", LAUNCHPAD)).unwrap();

    // Target is an hour after the build, far beyond the 600 s window
    let scheduled = minter(&node, 100).schedule(&profile, 1, 3_600).await.unwrap();
    let raw = scheduled.signed().raw_transaction();

    assert_eq!(raw.expiration_timestamp_secs, 3_600 + 600);
    assert!(scheduled.signed().verify().is_ok());
}

#[tokio::test]
async fn test_immediate_prepare_expires_from_now() {
    let node = common::start_stub_node().await;
    let profile = MintProfile::public(&format!("{}::mint", LAUNCHPAD)).unwrap();

    let prepared = minter(&node, 100).prepare(&profile, 1).await.unwrap();
    assert_eq!(prepared.signed().raw_transaction().expiration_timestamp_secs, 700);
}
