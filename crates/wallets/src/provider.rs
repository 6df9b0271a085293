use crate::{METHOD_NOT_FOUND_CODE, TxReceipt, WalletCapability, WalletError};
use alloy_network::ReceiptResponse;
use alloy_primitives::{Address, Bytes};
use alloy_provider::Provider;
use alloy_rpc_types::TransactionRequest;
use async_trait::async_trait;
use std::fmt;

/// A [`WalletCapability`] backed by a JSON-RPC endpoint that manages accounts itself.
///
/// This covers injected wallets bridged over http as well as dev nodes with unlocked accounts:
/// transactions go out as `eth_sendTransaction` and the endpoint signs them.
#[derive(Clone)]
pub struct ProviderWallet<P> {
    provider: P,
}

impl<P> ProviderWallet<P> {
    /// Wraps the given provider.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

impl<P> fmt::Debug for ProviderWallet<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderWallet").finish_non_exhaustive()
    }
}

#[async_trait]
impl<P: Provider + 'static> WalletCapability for ProviderWallet<P> {
    async fn accounts(&self) -> Result<Vec<Address>, WalletError> {
        Ok(self.provider.get_accounts().await?)
    }

    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        let res =
            self.provider.client().request_noparams::<Vec<Address>>("eth_requestAccounts").await;
        match res.map_err(WalletError::from) {
            // plain nodes have no authorization prompt, their accounts are always available
            Err(err) if err.code() == Some(METHOD_NOT_FOUND_CODE) => {
                debug!("eth_requestAccounts unsupported, falling back to eth_accounts");
                self.accounts().await
            }
            res => res,
        }
    }

    async fn gas_price(&self) -> Result<u128, WalletError> {
        Ok(self.provider.get_gas_price().await?)
    }

    async fn call(&self, tx: TransactionRequest) -> Result<Bytes, WalletError> {
        Ok(self.provider.call(tx).await?)
    }

    async fn estimate_gas(&self, tx: TransactionRequest) -> Result<u64, WalletError> {
        Ok(self.provider.estimate_gas(tx).await?)
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxReceipt, WalletError> {
        let pending = self.provider.send_transaction(tx).await?;
        trace!(tx_hash = %pending.tx_hash(), "waiting for receipt");
        let receipt =
            pending.get_receipt().await.map_err(|err| WalletError::Transport(err.to_string()))?;
        Ok(mined(&receipt))
    }
}

/// Status 0 receipts are included but reverted.
fn mined<R: ReceiptResponse>(receipt: &R) -> TxReceipt {
    TxReceipt { tx_hash: receipt.transaction_hash(), success: receipt.status() }
}
