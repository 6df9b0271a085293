//! A deterministic, scriptable wallet for tests.

use crate::{TxReceipt, WalletCapability, WalletError};
use alloy_primitives::{Address, B256, Bytes, U256};
use alloy_rpc_types::TransactionRequest;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::{collections::VecDeque, sync::Arc};
use tokio::sync::Notify;

/// The wallet methods a [`ScriptedWallet`] records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WalletMethod {
    Accounts,
    RequestAccounts,
    GasPrice,
    Call,
    EstimateGas,
    SendTransaction,
}

impl WalletMethod {
    /// Methods that only exist to read or mutate the chain, as opposed to account discovery.
    pub const CHAIN: [Self; 4] =
        [Self::GasPrice, Self::Call, Self::EstimateGas, Self::SendTransaction];
}

#[derive(Debug)]
struct Script {
    authorized: Vec<Address>,
    on_request: Result<Vec<Address>, WalletError>,
    gas_price: Result<u128, WalletError>,
    call_results: VecDeque<Result<Bytes, WalletError>>,
    call_default: Option<Result<Bytes, WalletError>>,
    estimate: Result<u64, WalletError>,
    send: Result<bool, WalletError>,
    send_gate: Option<Arc<Notify>>,
    sent: u64,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            authorized: Vec::new(),
            on_request: Err(WalletError::Rejected("User rejected the request.".to_string())),
            gas_price: Ok(1_000_000_000),
            call_results: VecDeque::new(),
            call_default: None,
            estimate: Ok(100_000),
            send: Ok(true),
            send_gate: None,
            sent: 0,
        }
    }
}

/// A [`WalletCapability`] whose answers are scripted by the test and whose requests are recorded.
///
/// By default no account is authorized, connection prompts are rejected, and every chain request
/// succeeds. Queued call results are consumed in order, then the default call result is returned.
#[derive(Debug, Default)]
pub struct ScriptedWallet {
    script: Mutex<Script>,
    log: Mutex<Vec<(WalletMethod, Option<TransactionRequest>)>>,
}

impl ScriptedWallet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accounts returned by `eth_accounts`.
    pub fn set_authorized(&self, accounts: impl IntoIterator<Item = Address>) {
        self.script.lock().authorized = accounts.into_iter().collect();
    }

    /// Approves future connection prompts with the given accounts.
    pub fn approve_requests(&self, accounts: impl IntoIterator<Item = Address>) {
        self.script.lock().on_request = Ok(accounts.into_iter().collect());
    }

    /// Rejects future connection prompts with the given error.
    pub fn reject_requests(&self, err: WalletError) {
        self.script.lock().on_request = Err(err);
    }

    pub fn set_gas_price(&self, gas_price: Result<u128, WalletError>) {
        self.script.lock().gas_price = gas_price;
    }

    pub fn set_estimate(&self, estimate: Result<u64, WalletError>) {
        self.script.lock().estimate = estimate;
    }

    /// Outcome of future submissions: `Ok(false)` mines a reverted transaction.
    pub fn set_send(&self, send: Result<bool, WalletError>) {
        self.script.lock().send = send;
    }

    /// Queues the raw result of the next `eth_call`. Each queued result is returned once.
    pub fn push_call_result(&self, result: Result<Bytes, WalletError>) {
        self.script.lock().call_results.push_back(result);
    }

    /// Sets the result of every `eth_call` once the queue is drained.
    pub fn set_call_result(&self, result: Result<Bytes, WalletError>) {
        self.script.lock().call_default = Some(result);
    }

    /// Holds every following submission until the returned handle is notified.
    pub fn hold_sends(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.script.lock().send_gate = Some(gate.clone());
        gate
    }

    /// Number of recorded requests of the given method.
    pub fn calls(&self, method: WalletMethod) -> usize {
        self.log.lock().iter().filter(|(m, _)| *m == method).count()
    }

    /// Number of recorded chain requests, see [`WalletMethod::CHAIN`].
    pub fn chain_calls(&self) -> usize {
        WalletMethod::CHAIN.iter().map(|m| self.calls(*m)).sum()
    }

    /// Transactions passed to the given method, in order.
    pub fn transactions(&self, method: WalletMethod) -> Vec<TransactionRequest> {
        self.log
            .lock()
            .iter()
            .filter(|(m, _)| *m == method)
            .filter_map(|(_, tx)| tx.clone())
            .collect()
    }

    fn record(&self, method: WalletMethod, tx: Option<&TransactionRequest>) {
        self.log.lock().push((method, tx.cloned()));
    }
}

#[async_trait]
impl WalletCapability for ScriptedWallet {
    async fn accounts(&self) -> Result<Vec<Address>, WalletError> {
        self.record(WalletMethod::Accounts, None);
        Ok(self.script.lock().authorized.clone())
    }

    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        self.record(WalletMethod::RequestAccounts, None);
        let mut script = self.script.lock();
        let accounts = script.on_request.clone()?;
        script.authorized.clone_from(&accounts);
        Ok(accounts)
    }

    async fn gas_price(&self) -> Result<u128, WalletError> {
        self.record(WalletMethod::GasPrice, None);
        self.script.lock().gas_price.clone()
    }

    async fn call(&self, tx: TransactionRequest) -> Result<Bytes, WalletError> {
        self.record(WalletMethod::Call, Some(&tx));
        let mut script = self.script.lock();
        let next = script.call_results.pop_front().or_else(|| script.call_default.clone());
        next.unwrap_or_else(|| Err(WalletError::rpc(-32000, "no call result scripted")))
    }

    async fn estimate_gas(&self, tx: TransactionRequest) -> Result<u64, WalletError> {
        self.record(WalletMethod::EstimateGas, Some(&tx));
        self.script.lock().estimate.clone()
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxReceipt, WalletError> {
        self.record(WalletMethod::SendTransaction, Some(&tx));
        let gate = self.script.lock().send_gate.clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        let mut script = self.script.lock();
        let success = script.send.clone()?;
        script.sent += 1;
        let tx_hash = B256::from(U256::from(script.sent));
        Ok(TxReceipt { tx_hash, success })
    }
}
