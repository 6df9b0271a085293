//! Commonly used constants.

/// Decimals of the native asset (wei per ether is `10^18`).
pub const NATIVE_DECIMALS: u8 = 18;

/// Decimals assumed for ERC20 amounts unless configured otherwise.
pub const DEFAULT_TOKEN_DECIMALS: u8 = 18;

/// Default JSON-RPC endpoint of the wallet capability.
pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";
