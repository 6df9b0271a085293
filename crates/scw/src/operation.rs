//! Operation descriptors and their outcomes.

use crate::orchestrator::OperationError;
use alloy_primitives::{Address, TxHash, U256};
use scw_common::DecimalAmount;
use std::fmt;

/// The nine custody operations of the contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
    NativeDeposit,
    NativeWithdraw,
    Erc20Deposit,
    Erc20Withdraw,
    Erc721Deposit,
    Erc721Withdraw,
    Erc1155Deposit,
    Erc1155Withdraw,
    TransferOwnership,
}

impl OperationKind {
    pub const ALL: [Self; 9] = [
        Self::NativeDeposit,
        Self::NativeWithdraw,
        Self::Erc20Deposit,
        Self::Erc20Withdraw,
        Self::Erc721Deposit,
        Self::Erc721Withdraw,
        Self::Erc1155Deposit,
        Self::Erc1155Withdraw,
        Self::TransferOwnership,
    ];

    /// Status message shown once the transaction is mined.
    pub const fn success_message(self) -> &'static str {
        match self {
            Self::NativeDeposit => "Deposit successful!",
            Self::NativeWithdraw => "Withdrawal successful!",
            Self::Erc20Deposit => "Erc20 deposit successful!",
            Self::Erc20Withdraw => "Erc20 withdraw successful!",
            Self::Erc721Deposit => "Erc721 deposit successful!",
            Self::Erc721Withdraw => "Erc721 withdraw successful!",
            Self::Erc1155Deposit => "Erc1155 deposit successful!",
            Self::Erc1155Withdraw => "Erc1155 withdraw successful!",
            Self::TransferOwnership => "Transfer ownership successful!",
        }
    }

    /// Prefix of the status message of a failed attempt.
    pub const fn failure_prefix(self) -> &'static str {
        match self {
            Self::NativeDeposit
            | Self::Erc20Deposit
            | Self::Erc721Deposit
            | Self::Erc1155Deposit => "Error depositing",
            Self::NativeWithdraw
            | Self::Erc20Withdraw
            | Self::Erc721Withdraw
            | Self::Erc1155Withdraw => "Error withdrawing",
            Self::TransferOwnership => "Error transferring ownership",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NativeDeposit => "deposit",
            Self::NativeWithdraw => "withdraw",
            Self::Erc20Deposit => "deposit-erc20",
            Self::Erc20Withdraw => "withdraw-erc20",
            Self::Erc721Deposit => "deposit-erc721",
            Self::Erc721Withdraw => "withdraw-erc721",
            Self::Erc1155Deposit => "deposit-erc1155",
            Self::Erc1155Withdraw => "withdraw-erc1155",
            Self::TransferOwnership => "transfer-ownership",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user intent, carrying exactly the fields its contract method needs.
///
/// Native and ERC20 amounts are decimal amounts in whole units; they are converted to base units
/// right before the call. ERC721 and ERC1155 ids, and ERC1155 amounts, are raw integers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssetOperation {
    NativeDeposit { amount: DecimalAmount },
    NativeWithdraw { to: Address, amount: DecimalAmount },
    Erc20Deposit { token: Address, amount: DecimalAmount },
    Erc20Withdraw { to: Address, token: Address, amount: DecimalAmount },
    Erc721Deposit { token: Address, token_id: U256 },
    Erc721Withdraw { to: Address, token: Address, token_id: U256 },
    Erc1155Deposit { token: Address, token_id: U256, amount: U256 },
    Erc1155Withdraw { to: Address, token: Address, token_id: U256, amount: U256 },
    TransferOwnership { new_owner: Address },
}

impl AssetOperation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::NativeDeposit { .. } => OperationKind::NativeDeposit,
            Self::NativeWithdraw { .. } => OperationKind::NativeWithdraw,
            Self::Erc20Deposit { .. } => OperationKind::Erc20Deposit,
            Self::Erc20Withdraw { .. } => OperationKind::Erc20Withdraw,
            Self::Erc721Deposit { .. } => OperationKind::Erc721Deposit,
            Self::Erc721Withdraw { .. } => OperationKind::Erc721Withdraw,
            Self::Erc1155Deposit { .. } => OperationKind::Erc1155Deposit,
            Self::Erc1155Withdraw { .. } => OperationKind::Erc1155Withdraw,
            Self::TransferOwnership { .. } => OperationKind::TransferOwnership,
        }
    }
}

/// The result of one attempt, as surfaced in the status channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OperationOutcome {
    Success {
        kind: OperationKind,
        tx_hash: TxHash,
    },
    /// `kind` is `None` for failures outside of an operation, e.g. a failed connection attempt.
    Failure {
        kind: Option<OperationKind>,
        reason: String,
    },
}

impl OperationOutcome {
    /// The failure of an operation, with the operation's message prefix applied.
    pub fn failure(kind: OperationKind, err: &OperationError) -> Self {
        let reason = match err {
            OperationError::NotInitialized => err.to_string(),
            _ => format!("{}: {err}", kind.failure_prefix()),
        };
        Self::Failure { kind: Some(kind), reason }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn kind(&self) -> Option<OperationKind> {
        match self {
            Self::Success { kind, .. } => Some(*kind),
            Self::Failure { kind, .. } => *kind,
        }
    }

    pub fn tx_hash(&self) -> Option<TxHash> {
        match self {
            Self::Success { tx_hash, .. } => Some(*tx_hash),
            Self::Failure { .. } => None,
        }
    }

    /// The user facing message.
    pub fn message(&self) -> &str {
        match self {
            Self::Success { kind, .. } => kind.success_message(),
            Self::Failure { reason, .. } => reason,
        }
    }
}

impl fmt::Display for OperationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
