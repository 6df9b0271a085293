//! Two-phase execution of custody operations: estimate, then submit.

use crate::{
    chain::ChainClient,
    connection::ConnectionManager,
    contract::{ContractBinding, MethodCall, OwnerError},
    operation::{AssetOperation, OperationOutcome},
};
use alloy_primitives::{Address, TxHash, U256};
use scw_common::{AmountError, DEFAULT_TOKEN_DECIMALS, DecimalAmount, NATIVE_DECIMALS};
use scw_wallets::{TxReceipt, WalletError};
use tracing::instrument;

/// Why an operation did not succeed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OperationError {
    /// No wallet is connected, or its chain client is not ready.
    #[error("Web3 is not initialized.")]
    NotInitialized,
    #[error(transparent)]
    InvalidAmount(#[from] AmountError),
    #[error("{0}")]
    GasPrice(WalletError),
    #[error("{0}")]
    Estimation(WalletError),
    #[error("{0}")]
    Submission(WalletError),
    #[error("transaction {0} reverted")]
    Reverted(TxHash),
}

/// Runs custody operations against one contract on behalf of the connected account.
#[derive(Clone, Debug)]
pub struct Orchestrator {
    connection: ConnectionManager,
    contract: Address,
    token_decimals: u8,
}

impl Orchestrator {
    pub fn new(connection: ConnectionManager, contract: Address) -> Self {
        Self { connection, contract, token_decimals: DEFAULT_TOKEN_DECIMALS }
    }

    /// Sets the decimals used to convert ERC20 amounts.
    pub fn token_decimals(mut self, decimals: u8) -> Self {
        self.token_decimals = decimals;
        self
    }

    /// Executes `op` as `account` and resolves to an outcome. Never fails.
    ///
    /// Gas is priced and estimated right before the submission. Nothing is sent if either step
    /// fails, and nothing is retried.
    #[instrument(level = "debug", skip_all, fields(kind = %op.kind(), %account))]
    pub async fn execute(&self, op: &AssetOperation, account: Address) -> OperationOutcome {
        let kind = op.kind();
        match self.submit(op, account).await {
            Ok(receipt) => {
                debug!(tx_hash = %receipt.tx_hash, "operation succeeded");
                OperationOutcome::Success { kind, tx_hash: receipt.tx_hash }
            }
            Err(err) => {
                warn!(%err, "operation failed");
                OperationOutcome::failure(kind, &err)
            }
        }
    }

    /// Reads the owner of the contract. Works without a connection as long as a wallet exists.
    pub async fn get_owner(&self) -> Result<Address, OwnerError> {
        let wallet = self.connection.wallet().ok_or(WalletError::Unavailable)?;
        ContractBinding::new(self.contract, wallet.clone()).owner().await
    }

    async fn submit(
        &self,
        op: &AssetOperation,
        account: Address,
    ) -> Result<TxReceipt, OperationError> {
        let chain = self.connection.chain_client().ok_or(OperationError::NotInitialized)?;
        let contract = ContractBinding::new(self.contract, chain.wallet().clone());
        let (call, value) = self.resolve(&chain, &contract, op)?;

        let gas_price = chain.current_gas_price().await.map_err(OperationError::GasPrice)?;
        let gas_limit =
            call.estimate_gas(account, value).await.map_err(OperationError::Estimation)?;
        let receipt = call
            .send(account, gas_limit, gas_price, value)
            .await
            .map_err(OperationError::Submission)?;
        if !receipt.success {
            return Err(OperationError::Reverted(receipt.tx_hash));
        }
        Ok(receipt)
    }

    /// Maps an operation to its contract call and the value sent along with it.
    fn resolve(
        &self,
        chain: &ChainClient,
        contract: &ContractBinding,
        op: &AssetOperation,
    ) -> Result<(MethodCall, Option<U256>), OperationError> {
        let native = |amount: &DecimalAmount| chain.to_base_units(amount, NATIVE_DECIMALS);
        let erc20 = |amount: &DecimalAmount| chain.to_base_units(amount, self.token_decimals);
        Ok(match op {
            AssetOperation::NativeDeposit { amount } => {
                (contract.deposit(), Some(native(amount)?))
            }
            AssetOperation::NativeWithdraw { to, amount } => {
                (contract.withdraw(*to, native(amount)?), None)
            }
            AssetOperation::Erc20Deposit { token, amount } => {
                (contract.deposit_erc20(*token, erc20(amount)?), None)
            }
            AssetOperation::Erc20Withdraw { to, token, amount } => {
                (contract.withdraw_erc20(*to, *token, erc20(amount)?), None)
            }
            AssetOperation::Erc721Deposit { token, token_id } => {
                (contract.deposit_erc721(*token, *token_id), None)
            }
            AssetOperation::Erc721Withdraw { to, token, token_id } => {
                (contract.withdraw_erc721(*to, *token, *token_id), None)
            }
            AssetOperation::Erc1155Deposit { token, token_id, amount } => {
                (contract.deposit_erc1155(*token, *token_id, *amount), None)
            }
            AssetOperation::Erc1155Withdraw { to, token, token_id, amount } => {
                (contract.withdraw_erc1155(*to, *token, *token_id, *amount), None)
            }
            AssetOperation::TransferOwnership { new_owner } => {
                (contract.transfer_ownership(*new_owner), None)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{contract::ISmartContractWallet, operation::OperationKind};
    use alloy_primitives::{TxKind, address};
    use alloy_sol_types::SolCall;
    use scw_wallets::testing::{ScriptedWallet, WalletMethod};
    use std::sync::Arc;

    const CONTRACT: Address = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");
    const ALICE: Address = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
    const BOB: Address = address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8");
    const TOKEN: Address = address!("0xCcCCccccCCCCcCCCCCCcCcCccCcCCCcCcccccccC");

    fn amount(s: &str) -> DecimalAmount {
        s.parse().unwrap()
    }

    fn one_of_each() -> Vec<AssetOperation> {
        let id = U256::from(7);
        vec![
            AssetOperation::NativeDeposit { amount: amount("1.0") },
            AssetOperation::NativeWithdraw { to: BOB, amount: amount("0.5") },
            AssetOperation::Erc20Deposit { token: TOKEN, amount: amount("2.5") },
            AssetOperation::Erc20Withdraw { to: BOB, token: TOKEN, amount: amount("2.5") },
            AssetOperation::Erc721Deposit { token: TOKEN, token_id: id },
            AssetOperation::Erc721Withdraw { to: BOB, token: TOKEN, token_id: id },
            AssetOperation::Erc1155Deposit { token: TOKEN, token_id: id, amount: U256::from(3) },
            AssetOperation::Erc1155Withdraw {
                to: BOB,
                token: TOKEN,
                token_id: id,
                amount: U256::from(3),
            },
            AssetOperation::TransferOwnership { new_owner: BOB },
        ]
    }

    async fn connected() -> (Arc<ScriptedWallet>, Orchestrator) {
        let wallet = Arc::new(ScriptedWallet::new());
        wallet.set_authorized([ALICE]);
        let connection = ConnectionManager::new(Some(wallet.clone()));
        connection.check_existing_connection().await.unwrap();
        (wallet, Orchestrator::new(connection, CONTRACT))
    }

    #[tokio::test]
    async fn disconnected_operations_make_no_calls() {
        let wallet = Arc::new(ScriptedWallet::new());
        let connection = ConnectionManager::new(Some(wallet.clone()));
        let orchestrator = Orchestrator::new(connection, CONTRACT);
        for op in one_of_each() {
            let outcome = orchestrator.execute(&op, ALICE).await;
            assert_eq!(
                outcome,
                OperationOutcome::Failure {
                    kind: Some(op.kind()),
                    reason: "Web3 is not initialized.".to_string()
                }
            );
        }
        assert_eq!(wallet.chain_calls(), 0);

        let orchestrator = Orchestrator::new(ConnectionManager::new(None), CONTRACT);
        let op = AssetOperation::NativeDeposit { amount: amount("1.0") };
        assert_eq!(orchestrator.execute(&op, ALICE).await.message(), "Web3 is not initialized.");
    }

    #[tokio::test]
    async fn success_is_tagged_with_the_operation() {
        let (wallet, orchestrator) = connected().await;
        for op in one_of_each() {
            let outcome = orchestrator.execute(&op, ALICE).await;
            assert!(outcome.is_success(), "{outcome}");
            assert_eq!(outcome.kind(), Some(op.kind()));
            assert_eq!(outcome.message(), op.kind().success_message());
        }
        assert_eq!(wallet.calls(WalletMethod::SendTransaction), OperationKind::ALL.len());
    }

    #[tokio::test]
    async fn only_native_deposit_carries_value() {
        let (wallet, orchestrator) = connected().await;
        for op in one_of_each() {
            orchestrator.execute(&op, ALICE).await;
        }
        let sent = wallet.transactions(WalletMethod::SendTransaction);
        let one_ether = U256::from(10u64.pow(18));
        assert_eq!(sent[0].value, Some(one_ether));
        assert!(sent[1..].iter().all(|tx| tx.value.is_none()));
        assert!(sent.iter().all(|tx| tx.from == Some(ALICE)));
        assert!(sent.iter().all(|tx| tx.to == Some(TxKind::Call(CONTRACT))));
    }

    #[tokio::test]
    async fn gas_price_is_the_priority_fee() {
        let (wallet, orchestrator) = connected().await;
        wallet.set_gas_price(Ok(3_000_000_000));
        wallet.set_estimate(Ok(21_000));
        let op = AssetOperation::TransferOwnership { new_owner: BOB };
        assert!(orchestrator.execute(&op, ALICE).await.is_success());

        let tx = &wallet.transactions(WalletMethod::SendTransaction)[0];
        assert_eq!(tx.gas, Some(21_000));
        assert_eq!(tx.max_priority_fee_per_gas, Some(3_000_000_000));
        let call = ISmartContractWallet::transferOwnershipCall::abi_decode(
            tx.input.input().unwrap(),
        )
        .unwrap();
        assert_eq!(call.newOwner, BOB);
    }

    #[tokio::test]
    async fn estimation_failure_never_sends() {
        let (wallet, orchestrator) = connected().await;
        wallet.set_estimate(Err(WalletError::rpc(3, "execution reverted: insufficient balance")));
        let op = AssetOperation::Erc1155Deposit {
            token: TOKEN,
            token_id: U256::from(7),
            amount: U256::from(3),
        };
        let outcome = orchestrator.execute(&op, ALICE).await;
        assert_eq!(outcome.message(), "Error depositing: execution reverted: insufficient balance");
        assert_eq!(wallet.calls(WalletMethod::EstimateGas), 1);
        assert_eq!(wallet.calls(WalletMethod::SendTransaction), 0);
    }

    #[tokio::test]
    async fn gas_price_failure_aborts() {
        let (wallet, orchestrator) = connected().await;
        wallet.set_gas_price(Err(WalletError::Transport("connection refused".to_string())));
        let op = AssetOperation::NativeWithdraw { to: BOB, amount: amount("1") };
        let outcome = orchestrator.execute(&op, ALICE).await;
        assert_eq!(outcome.message(), "Error withdrawing: connection refused");
        assert_eq!(wallet.calls(WalletMethod::EstimateGas), 0);
    }

    #[tokio::test]
    async fn rejected_and_reverted_submissions_fail() {
        let (wallet, orchestrator) = connected().await;
        let op = AssetOperation::Erc721Withdraw { to: BOB, token: TOKEN, token_id: U256::from(1) };

        wallet.set_send(Err(WalletError::rpc(4001, "User denied transaction signature.")));
        let outcome = orchestrator.execute(&op, ALICE).await;
        assert_eq!(outcome.message(), "Error withdrawing: User denied transaction signature.");

        wallet.set_send(Ok(false));
        let outcome = orchestrator.execute(&op, ALICE).await;
        assert!(!outcome.is_success());
        assert!(outcome.message().ends_with("reverted"), "{outcome}");
    }

    #[tokio::test]
    async fn invalid_amounts_fail_before_any_call() {
        let (wallet, orchestrator) = connected().await;
        let orchestrator = orchestrator.token_decimals(6);
        let op = AssetOperation::Erc20Deposit { token: TOKEN, amount: amount("1.0000001") };
        let outcome = orchestrator.execute(&op, ALICE).await;
        assert!(outcome.message().starts_with("Error depositing: "), "{outcome}");
        assert_eq!(wallet.chain_calls(), 0);

        let op = AssetOperation::Erc20Deposit { token: TOKEN, amount: amount("1.5") };
        assert!(orchestrator.execute(&op, ALICE).await.is_success());
        let tx = &wallet.transactions(WalletMethod::SendTransaction)[0];
        let call = ISmartContractWallet::depositErc20Call::abi_decode(tx.input.input().unwrap())
            .unwrap();
        assert_eq!(call.amount, U256::from(1_500_000));
    }

    #[tokio::test]
    async fn owner_is_read_without_a_connection() {
        let wallet = Arc::new(ScriptedWallet::new());
        let ret = ISmartContractWallet::ownerCall::abi_encode_returns(&BOB);
        wallet.push_call_result(Ok(ret.into()));
        let orchestrator = Orchestrator::new(ConnectionManager::new(Some(wallet)), CONTRACT);
        assert_eq!(orchestrator.get_owner().await, Ok(BOB));

        let orchestrator = Orchestrator::new(ConnectionManager::new(None), CONTRACT);
        let err = orchestrator.get_owner().await.unwrap_err();
        assert_eq!(err, OwnerError::Wallet(WalletError::Unavailable));
    }
}
