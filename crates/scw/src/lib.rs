//! # scw
//!
//! Client-side orchestration for a smart contract wallet: connection tracking, typed contract
//! calls, two-phase gas estimation and submission, and a single status slot for the UI.

#[macro_use]
extern crate tracing;

pub mod app;
pub mod chain;
pub mod connection;
pub mod contract;
pub mod operation;
pub mod orchestrator;
pub mod status;

pub use app::{AppSnapshot, OwnerState, WalletApp};
pub use chain::{ChainClient, ChainError};
pub use connection::{ConnectionManager, ConnectionState};
pub use contract::{ContractBinding, ISmartContractWallet, MethodCall, OwnerError};
pub use operation::{AssetOperation, OperationKind, OperationOutcome};
pub use orchestrator::{OperationError, Orchestrator};
pub use status::StatusChannel;
