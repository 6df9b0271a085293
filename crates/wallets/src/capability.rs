use crate::WalletError;
use alloy_primitives::{Address, Bytes, TxHash};
use alloy_rpc_types::TransactionRequest;
use async_trait::async_trait;

/// Summary of a mined transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TxReceipt {
    pub tx_hash: TxHash,
    /// `false` if the transaction was included but reverted.
    pub success: bool,
}

/// The capabilities an external wallet exposes to the client.
///
/// This mirrors an EIP-1193 provider: account discovery, the authorization prompt, and the
/// JSON-RPC methods used to read the chain and submit transactions. The wallet owns the keys and
/// the nonce of every account it manages, so submissions are plain `eth_sendTransaction` requests.
///
/// Every method may fail, and a wallet may refuse any request.
#[async_trait]
pub trait WalletCapability: Send + Sync + std::fmt::Debug {
    /// `eth_accounts`: accounts already authorized for this client, without prompting.
    async fn accounts(&self) -> Result<Vec<Address>, WalletError>;

    /// `eth_requestAccounts`: prompts the user to authorize accounts.
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError>;

    /// `eth_gasPrice`
    async fn gas_price(&self) -> Result<u128, WalletError>;

    /// `eth_call` against the latest block.
    async fn call(&self, tx: TransactionRequest) -> Result<Bytes, WalletError>;

    /// `eth_estimateGas`
    async fn estimate_gas(&self, tx: TransactionRequest) -> Result<u64, WalletError>;

    /// `eth_sendTransaction`, resolving once the transaction is mined.
    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxReceipt, WalletError>;
}
