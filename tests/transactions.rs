//! Build, sign, and submit against the stub node.

use aptos_toolkit::actions::transfer::transfer_entry;
use aptos_toolkit::actions::Transfers;
use aptos_toolkit::blockchain::{AccountAddress, AptosError, ChainId, TransactionSubmitter};
use aptos_toolkit::config::GasParams;

mod common;

const NOW: u64 = 1_700_000_000;
const TRANSFER_GAS: GasParams = GasParams::new(3_000, 100);

#[tokio::test]
async fn test_transfer_expiration_is_build_time_plus_600() {
    let node = common::start_stub_node().await;
    let sender = node.sender(NOW);
    common::seed_account(&node.state, sender.address(), 7);

    let receiver = AccountAddress::from_hex("0xbeef").unwrap();
    let signed = sender
        .prepare(transfer_entry(receiver, 1_000).unwrap(), TRANSFER_GAS)
        .await
        .unwrap();

    let raw = signed.raw_transaction();
    assert_eq!(raw.expiration_timestamp_secs, NOW + 600);
    assert_eq!(raw.sequence_number, 7);
    assert_eq!(raw.chain_id, ChainId(4));
    assert_eq!(raw.max_gas_amount, 3_000);
    assert_eq!(raw.gas_unit_price, 100);
    assert!(signed.verify().is_ok());
}

#[tokio::test]
async fn test_expiration_offset_is_configurable() {
    let node = common::start_stub_node().await;
    let builder = aptos_toolkit::blockchain::TxBuilder::new(node.client())
        .with_clock(std::sync::Arc::new(aptos_toolkit::blockchain::FixedClock::from_secs(NOW)))
        .with_expiration_offset(30);
    let account = common::test_account();
    common::seed_account(&node.state, account.address(), 0);

    let raw = builder
        .build(account.address(), transfer_entry(AccountAddress::ONE, 1).unwrap(), TRANSFER_GAS)
        .await
        .unwrap();
    assert_eq!(raw.expiration_timestamp_secs, NOW + 30);
}

#[tokio::test]
async fn test_transfer_submits_and_bumps_sequence() {
    let node = common::start_stub_node().await;
    let sender = node.sender(NOW);
    common::seed_account(&node.state, sender.address(), 0);

    let transfers = Transfers::new(sender.clone(), TRANSFER_GAS);
    let first = transfers.transfer(AccountAddress::ONE, 10).await.unwrap();
    let second = transfers.transfer(AccountAddress::ONE, 10).await.unwrap();

    assert!(first.starts_with("0x"));
    assert_ne!(first, second);
    assert_eq!(node.submissions(), 2);
    // Sequence number is re-read for every build
    assert_eq!(node.state.lock().unwrap().sequence_numbers[&sender.address().to_string()], 2);
}

#[tokio::test]
async fn test_chain_id_read_once() {
    let node = common::start_stub_node().await;
    let sender = node.sender(NOW);
    common::seed_account(&node.state, sender.address(), 0);

    for _ in 0..3 {
        sender
            .prepare(transfer_entry(AccountAddress::ONE, 1).unwrap(), TRANSFER_GAS)
            .await
            .unwrap();
    }
    assert_eq!(node.state.lock().unwrap().ledger_reads, 1);
}

#[tokio::test]
async fn test_resubmitting_same_transaction_fails() {
    let node = common::start_stub_node().await;
    let sender = node.sender(NOW);
    common::seed_account(&node.state, sender.address(), 0);

    let signed = sender
        .prepare(transfer_entry(AccountAddress::ONE, 5).unwrap(), TRANSFER_GAS)
        .await
        .unwrap();
    let client = node.client();

    assert!(client.submit(&signed).await.is_ok());
    let err = client.submit(&signed).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert!(err.to_string().contains("SEQUENCE_NUMBER_TOO_OLD"));
    assert_eq!(node.submissions(), 1);
}

#[tokio::test]
async fn test_server_error_on_submit_carries_status_and_body() {
    let node = common::start_stub_node().await;
    let sender = node.sender(NOW);
    common::seed_account(&node.state, sender.address(), 0);
    node.state.lock().unwrap().submit_error = Some((500, "node overloaded".to_string()));

    let transfers = Transfers::new(sender, TRANSFER_GAS);
    let err = transfers.transfer(AccountAddress::ONE, 10).await.unwrap_err();

    match err {
        AptosError::Api { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "node overloaded");
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unknown_account_is_api_error() {
    let node = common::start_stub_node().await;
    let sender = node.sender(NOW);

    let err = sender
        .prepare(transfer_entry(AccountAddress::ONE, 1).unwrap(), TRANSFER_GAS)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert!(err.to_string().contains("Account not found"));
}
