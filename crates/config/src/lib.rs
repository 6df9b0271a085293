//! # scw-config
//!
//! Layered configuration for the smart contract wallet client.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

use alloy_primitives::Address;
use figment::{
    Figment, Metadata, Profile, Provider,
    providers::{Env, Format, Serialized, Toml},
    value::{Dict, Map},
};
use scw_common::{DEFAULT_RPC_URL, DEFAULT_TOKEN_DECIMALS};
use serde::{Deserialize, Serialize};
use std::time::Duration;

// reexport so cli types can implement `figment::Provider`
pub use figment;

mod error;
pub use error::{ExtractConfigError, FAILED_TO_EXTRACT_CONFIG_MSG};

/// Client configuration.
///
/// Values are merged, from lowest to highest precedence, from:
/// 1. [`Config::default`]
/// 2. `scw.toml` in the current working directory
/// 3. `SCW_` prefixed environment variables, e.g. `SCW_ETH_RPC_URL`
/// 4. any provider merged on top by the caller, usually command line arguments
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// JSON-RPC endpoint of the wallet capability.
    pub eth_rpc_url: String,
    /// Address of the deployed smart contract wallet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract: Option<Address>,
    /// Decimals used to convert ERC20 amounts into base units.
    pub token_decimals: u8,
    /// How often to poll the wallet for account changes, in milliseconds.
    pub account_poll_interval: u64,
}

impl Config {
    /// The name of the config file.
    pub const FILE_NAME: &'static str = "scw.toml";

    /// Prefix of the environment variables read by [`Config::figment`].
    pub const ENV_PREFIX: &'static str = "SCW_";

    /// Returns the default figment: defaults, `scw.toml` and `SCW_*` environment variables.
    pub fn figment() -> Figment {
        Figment::from(Self::default())
            .merge(Toml::file(Self::FILE_NAME))
            .merge(Env::prefixed(Self::ENV_PREFIX))
    }

    /// Loads the config from the default figment.
    pub fn load() -> Result<Self, ExtractConfigError> {
        Self::from_provider(Self::figment())
    }

    /// Loads the config from the default figment with `provider` merged on top.
    pub fn load_with(provider: impl Provider) -> Result<Self, ExtractConfigError> {
        Self::from_provider(Self::figment().merge(provider))
    }

    /// Extracts a `Config` from any figment provider.
    pub fn from_provider(provider: impl Provider) -> Result<Self, ExtractConfigError> {
        let figment = Figment::from(provider);
        let config = figment.extract::<Self>().map_err(ExtractConfigError::from)?;
        trace!(?config, "loaded config");
        Ok(config)
    }

    /// The account poll interval as a [`Duration`].
    pub fn account_poll_interval(&self) -> Duration {
        Duration::from_millis(self.account_poll_interval)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            eth_rpc_url: DEFAULT_RPC_URL.to_string(),
            contract: None,
            token_decimals: DEFAULT_TOKEN_DECIMALS,
            account_poll_interval: 1_000,
        }
    }
}

impl Provider for Config {
    fn metadata(&self) -> Metadata {
        Metadata::named("scw config")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        Serialized::defaults(self).data()
    }
}
