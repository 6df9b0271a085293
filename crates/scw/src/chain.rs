//! Thin adapter over the wallet's JSON-RPC capability.

use crate::connection::ConnectionState;
use alloy_primitives::U256;
use scw_common::{AmountError, DecimalAmount};
use scw_wallets::{WalletCapability, WalletError};
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    #[error("chain client unavailable: no wallet connected")]
    ChainUnavailable,
}

/// Chain access for a connected wallet.
///
/// Nothing is cached: gas prices move between calls, so every query goes to the wallet.
#[derive(Clone, Debug)]
pub struct ChainClient {
    wallet: Arc<dyn WalletCapability>,
}

impl ChainClient {
    /// Creates a client for the given connection.
    ///
    /// Fails with [`ChainError::ChainUnavailable`] unless `state` is connected.
    pub fn new(
        state: &ConnectionState,
        wallet: Arc<dyn WalletCapability>,
    ) -> Result<Self, ChainError> {
        if !state.is_connected() {
            return Err(ChainError::ChainUnavailable);
        }
        Ok(Self { wallet })
    }

    /// The wallet this client talks to.
    pub fn wallet(&self) -> &Arc<dyn WalletCapability> {
        &self.wallet
    }

    /// Fetches the current gas price, in wei.
    pub async fn current_gas_price(&self) -> Result<u128, WalletError> {
        let gas_price = self.wallet.gas_price().await?;
        trace!(gas_price, "fetched gas price");
        Ok(gas_price)
    }

    /// Converts a decimal amount into base units, see [`scw_common::to_base_units`].
    pub fn to_base_units(&self, amount: &DecimalAmount, decimals: u8) -> Result<U256, AmountError> {
        scw_common::to_base_units(amount, decimals)
    }

    /// Formats base units as a decimal amount, see [`scw_common::from_base_units`].
    pub fn from_base_units(&self, value: U256, decimals: u8) -> Result<String, AmountError> {
        scw_common::from_base_units(value, decimals)
    }
}
