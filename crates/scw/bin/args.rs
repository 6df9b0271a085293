use alloy_primitives::{Address, U256};
use clap::{Parser, Subcommand};
use scw::AssetOperation;
use scw_common::{DecimalAmount, NATIVE_DECIMALS};
use scw_config::figment::{
    self, Metadata, Profile, Provider,
    providers::Serialized,
    value::{Dict, Map},
};
use serde::Serialize;

/// Operate a smart contract wallet from the command line.
#[derive(Parser)]
#[command(name = "scw", version, next_display_order = None)]
pub struct Scw {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub cmd: ScwSubcommand,
}

/// Options merged on top of `scw.toml` and `SCW_*` environment variables.
#[derive(Clone, Debug, Default, Serialize, Parser)]
pub struct GlobalOpts {
    /// The JSON-RPC endpoint of the wallet.
    #[arg(long, short, global = true, visible_alias = "eth-rpc-url", value_name = "URL")]
    #[serde(rename = "eth_rpc_url", skip_serializing_if = "Option::is_none")]
    pub rpc_url: Option<String>,

    /// The address of the smart contract wallet.
    #[arg(long, short, global = true, value_name = "ADDRESS")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract: Option<Address>,

    /// The decimals of the ERC20 tokens passed to `deposit-erc20` and `withdraw-erc20`.
    #[arg(long, global = true, value_name = "DECIMALS")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_decimals: Option<u8>,
}

impl Provider for GlobalOpts {
    fn metadata(&self) -> Metadata {
        Metadata::named("command line arguments")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        Serialized::defaults(self).data()
    }
}

#[derive(Subcommand)]
pub enum ScwSubcommand {
    /// Prints the owner of the contract.
    Owner,

    /// Connects to the wallet and prints the active account.
    #[command(visible_alias = "connect")]
    Account,

    /// Deposits native currency into the contract.
    Deposit {
        /// The amount, in ether.
        amount: DecimalAmount,
    },

    /// Withdraws native currency from the contract.
    Withdraw {
        /// The recipient.
        to: Address,
        /// The amount, in ether.
        amount: DecimalAmount,
    },

    /// Deposits ERC20 tokens into the contract.
    DepositErc20 {
        /// The token contract.
        token: Address,
        /// The amount, in whole tokens.
        amount: DecimalAmount,
    },

    /// Withdraws ERC20 tokens from the contract.
    WithdrawErc20 {
        /// The recipient.
        to: Address,
        /// The token contract.
        token: Address,
        /// The amount, in whole tokens.
        amount: DecimalAmount,
    },

    /// Deposits an ERC721 token into the contract.
    DepositErc721 {
        /// The token contract.
        token: Address,
        /// The id of the token.
        token_id: U256,
    },

    /// Withdraws an ERC721 token from the contract.
    WithdrawErc721 {
        /// The recipient.
        to: Address,
        /// The token contract.
        token: Address,
        /// The id of the token.
        token_id: U256,
    },

    /// Deposits ERC1155 tokens into the contract.
    DepositErc1155 {
        /// The token contract.
        token: Address,
        /// The id of the token.
        token_id: U256,
        /// The number of tokens.
        amount: U256,
    },

    /// Withdraws ERC1155 tokens from the contract.
    WithdrawErc1155 {
        /// The recipient.
        to: Address,
        /// The token contract.
        token: Address,
        /// The id of the token.
        token_id: U256,
        /// The number of tokens.
        amount: U256,
    },

    /// Transfers ownership of the contract.
    TransferOwnership {
        /// The new owner.
        new_owner: Address,
    },

    /// Converts a decimal amount into base units.
    #[command(visible_alias = "tbu")]
    ToBaseUnits {
        /// The amount to convert, e.g. `2.5`.
        amount: DecimalAmount,
        /// The number of decimals of the unit.
        #[arg(long, short, default_value_t = NATIVE_DECIMALS)]
        decimals: u8,
    },

    /// Converts base units into a decimal amount.
    #[command(visible_alias = "fbu")]
    FromBaseUnits {
        /// The value to convert, in base units.
        value: U256,
        /// The number of decimals of the unit.
        #[arg(long, short, default_value_t = NATIVE_DECIMALS)]
        decimals: u8,
    },
}

impl ScwSubcommand {
    /// The contract operation this command submits, if any.
    pub fn into_operation(self) -> Option<AssetOperation> {
        let op = match self {
            Self::Deposit { amount } => AssetOperation::NativeDeposit { amount },
            Self::Withdraw { to, amount } => AssetOperation::NativeWithdraw { to, amount },
            Self::DepositErc20 { token, amount } => AssetOperation::Erc20Deposit { token, amount },
            Self::WithdrawErc20 { to, token, amount } => {
                AssetOperation::Erc20Withdraw { to, token, amount }
            }
            Self::DepositErc721 { token, token_id } => {
                AssetOperation::Erc721Deposit { token, token_id }
            }
            Self::WithdrawErc721 { to, token, token_id } => {
                AssetOperation::Erc721Withdraw { to, token, token_id }
            }
            Self::DepositErc1155 { token, token_id, amount } => {
                AssetOperation::Erc1155Deposit { token, token_id, amount }
            }
            Self::WithdrawErc1155 { to, token, token_id, amount } => {
                AssetOperation::Erc1155Withdraw { to, token, token_id, amount }
            }
            Self::TransferOwnership { new_owner } => {
                AssetOperation::TransferOwnership { new_owner }
            }
            Self::Owner | Self::Account | Self::ToBaseUnits { .. } | Self::FromBaseUnits { .. } => {
                return None;
            }
        };
        Some(op)
    }
}
