//! Typed bindings to the deployed smart contract wallet.

use alloy_primitives::{Address, Bytes, TxKind, U256};
use alloy_rpc_types::{TransactionInput, TransactionRequest};
use alloy_sol_types::{SolCall, sol};
use scw_wallets::{TxReceipt, WalletCapability, WalletError};
use std::sync::Arc;

sol! {
    /// Custody methods of the smart contract wallet.
    interface ISmartContractWallet {
        function owner() external view returns (address);
        function transferOwnership(address newOwner) external;

        function deposit() external payable;
        function withdraw(address to, uint256 amount) external;

        function depositErc20(address token, uint256 amount) external;
        function withdrawErc20(address to, address token, uint256 amount) external;

        function depositErc721(address token, uint256 tokenId) external;
        function withdrawErc721(address to, address token, uint256 tokenId) external;

        function depositErc1155(address token, uint256 tokenId, uint256 amount) external;
        function withdrawErc1155(address to, address token, uint256 tokenId, uint256 amount) external;
    }
}

/// Failure to read the contract owner.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OwnerError {
    #[error(transparent)]
    Wallet(#[from] WalletError),
    #[error("invalid owner() return data: {0}")]
    Decode(String),
}

/// Typed proxy to the contract, issuing every request through the wallet.
///
/// Amounts are passed through untouched: callers convert to base units first.
#[derive(Clone, Debug)]
pub struct ContractBinding {
    address: Address,
    wallet: Arc<dyn WalletCapability>,
}

impl ContractBinding {
    pub fn new(address: Address, wallet: Arc<dyn WalletCapability>) -> Self {
        Self { address, wallet }
    }

    /// Reads the current owner.
    pub async fn owner(&self) -> Result<Address, OwnerError> {
        let call = ISmartContractWallet::ownerCall {};
        let tx = TransactionRequest {
            to: Some(TxKind::Call(self.address)),
            input: TransactionInput::new(call.abi_encode().into()),
            ..Default::default()
        };
        let ret = self.wallet.call(tx).await?;
        ISmartContractWallet::ownerCall::abi_decode_returns(&ret)
            .map_err(|err| OwnerError::Decode(err.to_string()))
    }

    pub fn transfer_ownership(&self, new_owner: Address) -> MethodCall {
        self.method(ISmartContractWallet::transferOwnershipCall { newOwner: new_owner })
    }

    pub fn deposit(&self) -> MethodCall {
        self.method(ISmartContractWallet::depositCall {})
    }

    pub fn withdraw(&self, to: Address, amount: U256) -> MethodCall {
        self.method(ISmartContractWallet::withdrawCall { to, amount })
    }

    pub fn deposit_erc20(&self, token: Address, amount: U256) -> MethodCall {
        self.method(ISmartContractWallet::depositErc20Call { token, amount })
    }

    pub fn withdraw_erc20(&self, to: Address, token: Address, amount: U256) -> MethodCall {
        self.method(ISmartContractWallet::withdrawErc20Call { to, token, amount })
    }

    pub fn deposit_erc721(&self, token: Address, token_id: U256) -> MethodCall {
        self.method(ISmartContractWallet::depositErc721Call { token, tokenId: token_id })
    }

    pub fn withdraw_erc721(&self, to: Address, token: Address, token_id: U256) -> MethodCall {
        self.method(ISmartContractWallet::withdrawErc721Call { to, token, tokenId: token_id })
    }

    pub fn deposit_erc1155(&self, token: Address, token_id: U256, amount: U256) -> MethodCall {
        self.method(ISmartContractWallet::depositErc1155Call { token, tokenId: token_id, amount })
    }

    pub fn withdraw_erc1155(
        &self,
        to: Address,
        token: Address,
        token_id: U256,
        amount: U256,
    ) -> MethodCall {
        self.method(ISmartContractWallet::withdrawErc1155Call {
            to,
            token,
            tokenId: token_id,
            amount,
        })
    }

    fn method<C: SolCall>(&self, call: C) -> MethodCall {
        MethodCall {
            contract: self.address,
            wallet: self.wallet.clone(),
            signature: C::SIGNATURE,
            input: call.abi_encode().into(),
        }
    }
}

/// A fully encoded call to one contract method, ready to be estimated and sent.
#[derive(Clone, Debug)]
pub struct MethodCall {
    contract: Address,
    wallet: Arc<dyn WalletCapability>,
    signature: &'static str,
    input: Bytes,
}

impl MethodCall {
    /// The Solidity signature of the method, e.g. `deposit()`.
    pub fn signature(&self) -> &'static str {
        self.signature
    }

    /// The ABI encoded calldata.
    pub fn input(&self) -> &Bytes {
        &self.input
    }

    /// Builds the transaction request sent by `from`.
    pub fn request(&self, from: Address, value: Option<U256>) -> TransactionRequest {
        TransactionRequest {
            from: Some(from),
            to: Some(TxKind::Call(self.contract)),
            input: TransactionInput::new(self.input.clone()),
            value,
            ..Default::default()
        }
    }

    /// Estimates the gas limit of the call.
    pub async fn estimate_gas(
        &self,
        from: Address,
        value: Option<U256>,
    ) -> Result<u64, WalletError> {
        trace!(method = self.signature, %from, "estimating gas");
        self.wallet.estimate_gas(self.request(from, value)).await
    }

    /// Submits the call and waits for it to be mined.
    ///
    /// `gas_price` is passed as the priority fee.
    pub async fn send(
        &self,
        from: Address,
        gas_limit: u64,
        gas_price: u128,
        value: Option<U256>,
    ) -> Result<TxReceipt, WalletError> {
        let mut tx = self.request(from, value);
        tx.gas = Some(gas_limit);
        tx.max_priority_fee_per_gas = Some(gas_price);
        trace!(method = self.signature, %from, gas_limit, gas_price, "sending transaction");
        self.wallet.send_transaction(tx).await
    }
}
