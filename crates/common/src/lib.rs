//! Common utilities shared by the smart contract wallet client crates.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub mod constants;
pub mod provider;
pub mod units;

pub use constants::*;
pub use provider::*;
pub use units::{AmountError, DecimalAmount, from_base_units, to_base_units};
