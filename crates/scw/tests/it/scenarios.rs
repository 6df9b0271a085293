use crate::utils::*;
use alloy_primitives::U256;
use scw::{AssetOperation, ConnectionState, OperationKind, OperationOutcome, WalletApp};
use scw_wallets::{
    WalletError,
    testing::{ScriptedWallet, WalletMethod},
};
use similar_asserts::assert_eq;
use std::sync::Arc;

#[tokio::test]
async fn transfer_ownership_updates_owner() {
    crate::init_tracing();
    let (wallet, app) = mounted_app(AAA, BBB).await;
    assert_eq!(app.snapshot().owner, Some(BBB));
    assert_eq!(app.snapshot().connection(), ConnectionState::Connected { account: AAA });

    let reads = wallet.calls(WalletMethod::Call);
    owner_is(&wallet, AAA);
    let outcome = app.submit(AssetOperation::TransferOwnership { new_owner: AAA }).await;
    assert!(outcome.is_success(), "{outcome}");
    assert_eq!(outcome.message(), "Transfer ownership successful!");
    assert_eq!(wallet.calls(WalletMethod::Call), reads + 1);

    let snapshot = app.snapshot();
    assert_eq!(snapshot.owner, Some(AAA));
    assert_eq!(snapshot.status, Some(outcome));
    assert_eq!(app.refresh_owner().await, Ok(AAA));
}

#[tokio::test]
async fn queued_owner_is_read_once() {
    let (wallet, app) = mounted_app(AAA, BBB).await;
    queue_owner(&wallet, CCC);

    assert_eq!(app.refresh_owner().await, Ok(CCC));
    assert_eq!(app.refresh_owner().await, Ok(BBB));
    assert_eq!(app.owner().owner, Some(BBB));
}

#[tokio::test]
async fn native_deposit_without_wallet_fails_immediately() {
    let app = WalletApp::new(None, CONTRACT);
    app.mount().await;

    let op = AssetOperation::NativeDeposit { amount: "1.0".parse().unwrap() };
    let outcome = app.submit(op).await;
    assert_eq!(
        outcome,
        OperationOutcome::Failure {
            kind: Some(OperationKind::NativeDeposit),
            reason: "Web3 is not initialized.".to_string(),
        }
    );
    assert_eq!(app.status().message().as_deref(), Some("Web3 is not initialized."));
    assert_eq!(
        app.snapshot().owner_error.as_deref(),
        Some("Error fetching owner: Please install MetaMask.")
    );
}

#[tokio::test]
async fn erc1155_deposit_estimate_revert_is_reported() {
    let (wallet, app) = mounted_app(AAA, BBB).await;
    wallet.set_estimate(Err(WalletError::rpc(3, "execution reverted: insufficient balance")));

    let op = AssetOperation::Erc1155Deposit {
        token: CCC,
        token_id: U256::from(7),
        amount: U256::from(3),
    };
    let outcome = app.submit(op).await;
    assert!(!outcome.is_success());
    assert!(outcome.message().contains("execution reverted: insufficient balance"), "{outcome}");
    assert_eq!(wallet.calls(WalletMethod::EstimateGas), 1);
    assert_eq!(wallet.calls(WalletMethod::SendTransaction), 0);
    assert!(app.snapshot().connected);
}

#[tokio::test]
async fn disconnect_during_submission_does_not_reconnect() {
    let (wallet, app) = mounted_app(AAA, BBB).await;
    let gate = wallet.hold_sends();

    let submitting = tokio::spawn({
        let app = app.clone();
        let op = AssetOperation::NativeWithdraw { to: AAA, amount: "0.1".parse().unwrap() };
        async move { app.submit(op).await }
    });
    while wallet.calls(WalletMethod::SendTransaction) == 0 {
        tokio::task::yield_now().await;
    }

    app.disconnect().await;
    gate.notify_one();
    let outcome = submitting.await.unwrap();
    assert_eq!(outcome.kind(), Some(OperationKind::NativeWithdraw));

    let snapshot = app.snapshot();
    assert!(!snapshot.connected);
    assert_eq!(snapshot.account, None);
    assert!(app.connection().chain_client().is_none());
}

#[tokio::test]
async fn connect_then_operate() {
    let wallet = Arc::new(ScriptedWallet::new());
    queue_owner(&wallet, BBB);
    let app = WalletApp::new(Some(wallet.clone()), CONTRACT).with_token_decimals(6);
    app.mount().await;
    assert!(!app.snapshot().connected);

    wallet.approve_requests([AAA]);
    assert_eq!(app.connect().await, Ok(AAA));

    let op =
        AssetOperation::Erc20Withdraw { to: BBB, token: CCC, amount: "12.5".parse().unwrap() };
    let outcome = app.submit(op).await;
    assert_eq!(outcome.message(), "Erc20 withdraw successful!");
    assert!(outcome.tx_hash().is_some());

    let mut status = app.status().subscribe();
    wallet.set_send(Ok(false));
    let op = AssetOperation::Erc721Deposit { token: CCC, token_id: U256::from(1) };
    let outcome = app.submit(op).await;
    status.changed().await.unwrap();
    assert_eq!(status.borrow().as_ref(), Some(&outcome));
    assert!(outcome.message().starts_with("Error depositing: transaction "), "{outcome}");
}
