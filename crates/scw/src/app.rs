//! The presentation facade.
//!
//! [`WalletApp`] wires the connection, the orchestrator and the status slot together, and exposes
//! read-only [`AppSnapshot`]s for rendering.

use crate::{
    connection::{ConnectionManager, ConnectionState},
    contract::OwnerError,
    operation::{AssetOperation, OperationKind, OperationOutcome},
    orchestrator::{OperationError, Orchestrator},
    status::StatusChannel,
};
use alloy_primitives::Address;
use parking_lot::Mutex;
use scw_wallets::{WalletCapability, WalletError};
use std::sync::Arc;

/// Mirror of the contract owner and the error of the last failed read.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OwnerState {
    pub owner: Option<Address>,
    pub error: Option<String>,
}

/// What the presentation renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppSnapshot {
    pub connected: bool,
    pub account: Option<Address>,
    pub owner: Option<Address>,
    pub owner_error: Option<String>,
    pub status: Option<OperationOutcome>,
}

#[derive(Clone, Debug)]
pub struct WalletApp {
    connection: ConnectionManager,
    orchestrator: Orchestrator,
    status: StatusChannel,
    owner: Arc<Mutex<OwnerState>>,
}

impl WalletApp {
    /// Creates an app for the contract at `contract`. `None` means no wallet is installed.
    pub fn new(wallet: Option<Arc<dyn WalletCapability>>, contract: Address) -> Self {
        let connection = ConnectionManager::new(wallet);
        let orchestrator = Orchestrator::new(connection.clone(), contract);
        Self { connection, orchestrator, status: StatusChannel::new(), owner: Default::default() }
    }

    /// Sets the decimals used to convert ERC20 amounts.
    pub fn with_token_decimals(mut self, decimals: u8) -> Self {
        self.orchestrator = self.orchestrator.token_decimals(decimals);
        self
    }

    pub fn connection(&self) -> &ConnectionManager {
        &self.connection
    }

    pub fn status(&self) -> &StatusChannel {
        &self.status
    }

    /// Initial load: reads the owner and picks up an already authorized account.
    pub async fn mount(&self) {
        let _ = self.refresh_owner().await;
        if let Err(err) = self.connection.check_existing_connection().await {
            self.publish_error(&err);
        }
    }

    /// Prompts the wallet for a connection. Failures are also published to the status slot.
    pub async fn connect(&self) -> Result<Address, WalletError> {
        self.connection.request_connection().await.inspect_err(|err| self.publish_error(err))
    }

    /// Disconnects, clears the status and reloads the owner.
    pub async fn disconnect(&self) {
        self.connection.disconnect();
        self.status.clear();
        *self.owner.lock() = OwnerState::default();
        let _ = self.refresh_owner().await;
    }

    /// Executes `op` as the connected account and publishes the outcome.
    pub async fn submit(&self, op: AssetOperation) -> OperationOutcome {
        let outcome = match self.connection.account() {
            Some(account) => self.orchestrator.execute(&op, account).await,
            None => OperationOutcome::failure(op.kind(), &OperationError::NotInitialized),
        };
        self.status.publish(outcome.clone());
        if outcome.is_success() && outcome.kind() == Some(OperationKind::TransferOwnership) {
            let _ = self.refresh_owner().await;
        }
        outcome
    }

    /// Re-reads the owner. A failure only updates the owner error.
    pub async fn refresh_owner(&self) -> Result<Address, OwnerError> {
        let result = self.orchestrator.get_owner().await;
        let mut state = self.owner.lock();
        match &result {
            Ok(owner) => {
                state.owner = Some(*owner);
                state.error = None;
            }
            Err(err) => {
                debug!(%err, "failed to fetch owner");
                state.error = Some(format!("Error fetching owner: {err}"));
            }
        }
        result
    }

    pub fn owner(&self) -> OwnerState {
        self.owner.lock().clone()
    }

    pub fn snapshot(&self) -> AppSnapshot {
        let connection = self.connection.state();
        let OwnerState { owner, error } = self.owner();
        AppSnapshot {
            connected: connection.is_connected(),
            account: connection.account(),
            owner,
            owner_error: error,
            status: self.status.latest(),
        }
    }

    fn publish_error(&self, err: &WalletError) {
        self.status.publish(OperationOutcome::Failure { kind: None, reason: err.to_string() });
    }
}

impl AppSnapshot {
    pub fn connection(&self) -> ConnectionState {
        match self.account {
            Some(account) if self.connected => ConnectionState::Connected { account },
            _ => ConnectionState::Disconnected,
        }
    }
}
