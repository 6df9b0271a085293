//! # scw-wallets
//!
//! The boundary to the external wallet: the [`WalletCapability`] trait, its errors, an
//! implementation over any alloy [`Provider`](alloy_provider::Provider), and a scripted fake for
//! tests behind the `test-utils` feature.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

mod capability;
mod error;
mod provider;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use capability::{TxReceipt, WalletCapability};
pub use error::{METHOD_NOT_FOUND_CODE, UNAUTHORIZED_CODE, USER_REJECTED_CODE, WalletError};
pub use provider::ProviderWallet;
