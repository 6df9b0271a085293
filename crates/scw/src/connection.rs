//! Wallet connection tracking.

use crate::chain::ChainClient;
use alloy_primitives::Address;
use parking_lot::Mutex;
use scw_wallets::{WalletCapability, WalletError};
use std::{sync::Arc, time::Duration};
use tokio::task::JoinHandle;

/// Whether a wallet account is connected, and which one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connected {
        account: Address,
    },
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected { .. })
    }

    /// The active account, if connected.
    pub fn account(&self) -> Option<Address> {
        match self {
            Self::Connected { account } => Some(*account),
            Self::Disconnected => None,
        }
    }
}

#[derive(Debug, Default)]
struct Session {
    state: ConnectionState,
    chain: Option<ChainClient>,
    /// Bumped on every disconnect, so that requests started earlier cannot reconnect.
    epoch: u64,
}

/// Owns the [`ConnectionState`] and the [`ChainClient`] that lives as long as the connection.
///
/// Cloning is cheap and every clone observes the same state. Only this type mutates the state.
#[derive(Clone, Debug)]
pub struct ConnectionManager {
    wallet: Option<Arc<dyn WalletCapability>>,
    session: Arc<Mutex<Session>>,
}

impl ConnectionManager {
    /// Creates a disconnected manager. `None` means no wallet is installed.
    pub fn new(wallet: Option<Arc<dyn WalletCapability>>) -> Self {
        Self { wallet, session: Default::default() }
    }

    /// The wallet capability, if one is installed.
    pub fn wallet(&self) -> Option<&Arc<dyn WalletCapability>> {
        self.wallet.as_ref()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ConnectionState {
        self.session.lock().state
    }

    pub fn is_connected(&self) -> bool {
        self.state().is_connected()
    }

    pub fn account(&self) -> Option<Address> {
        self.state().account()
    }

    /// The chain client of the current connection.
    pub fn chain_client(&self) -> Option<ChainClient> {
        self.session.lock().chain.clone()
    }

    /// Picks up accounts the wallet already authorized, without prompting the user.
    ///
    /// Returns `Ok(None)` if no wallet is installed or nothing is authorized yet.
    pub async fn check_existing_connection(&self) -> Result<Option<Address>, WalletError> {
        let Some(wallet) = &self.wallet else {
            trace!("no wallet installed");
            return Ok(None);
        };
        let epoch = self.epoch();
        let accounts = wallet.accounts().await?;
        let Some(&account) = accounts.first() else { return Ok(None) };
        Ok(self.connect(epoch, account).then_some(account))
    }

    /// Prompts the wallet for authorization and connects the first approved account.
    pub async fn request_connection(&self) -> Result<Address, WalletError> {
        let wallet = self.wallet.as_ref().ok_or(WalletError::Unavailable)?;
        let epoch = self.epoch();
        let accounts = wallet.request_accounts().await?;
        let &account =
            accounts.first().ok_or_else(|| WalletError::Rejected("Request denied.".to_string()))?;
        if !self.connect(epoch, account) {
            return Err(WalletError::Rejected("Connection request cancelled.".to_string()));
        }
        Ok(account)
    }

    /// Drops the connection and its chain client.
    ///
    /// Requests that are still pending when this is called will not connect once they resolve.
    pub fn disconnect(&self) {
        let mut session = self.session.lock();
        session.state = ConnectionState::Disconnected;
        session.chain = None;
        session.epoch += 1;
        debug!(epoch = session.epoch, "disconnected");
    }

    /// Applies an "accounts changed" notification from the wallet.
    ///
    /// An empty list disconnects. Otherwise a connected session follows the first account; a
    /// disconnected one is left alone.
    pub fn handle_accounts_changed(&self, accounts: &[Address]) {
        let Some(&first) = accounts.first() else {
            if self.is_connected() {
                debug!("wallet revoked all accounts");
                self.disconnect();
            }
            return;
        };
        let mut session = self.session.lock();
        if let ConnectionState::Connected { account } = &mut session.state
            && *account != first
        {
            debug!(from = %account, to = %first, "active account changed");
            *account = first;
        }
    }

    /// Polls the wallet for account changes every `interval` until the returned task is aborted.
    ///
    /// Returns `None` if no wallet is installed.
    pub fn spawn_account_watcher(&self, interval: Duration) -> Option<JoinHandle<()>> {
        let wallet = self.wallet.clone()?;
        let this = self.clone();
        Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                let state = this.state();
                if !state.is_connected() {
                    continue;
                }
                match wallet.accounts().await {
                    Ok(accounts) if accounts.first().copied() != state.account() => {
                        this.handle_accounts_changed(&accounts)
                    }
                    Ok(_) => {}
                    Err(err) => trace!(%err, "failed to poll accounts"),
                }
            }
        }))
    }

    fn epoch(&self) -> u64 {
        self.session.lock().epoch
    }

    /// Connects `account` unless a disconnect happened since `epoch` was read.
    fn connect(&self, epoch: u64, account: Address) -> bool {
        let Some(wallet) = &self.wallet else { return false };
        let mut session = self.session.lock();
        if session.epoch != epoch {
            debug!(%account, "discarding connection made before a disconnect");
            return false;
        }
        let state = ConnectionState::Connected { account };
        session.chain = ChainClient::new(&state, wallet.clone()).ok();
        session.state = state;
        debug!(%account, "connected");
        true
    }
}
