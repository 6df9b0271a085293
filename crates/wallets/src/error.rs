use alloy_json_rpc::ErrorPayload;
use alloy_transport::TransportError;

/// EIP-1193 error code for a request the user rejected.
pub const USER_REJECTED_CODE: i64 = 4001;

/// EIP-1193 error code for an account or method the user has not authorized.
pub const UNAUTHORIZED_CODE: i64 = 4100;

/// JSON-RPC error code for a method the endpoint does not implement.
pub const METHOD_NOT_FOUND_CODE: i64 = -32601;

/// Errors raised by a wallet capability.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WalletError {
    /// No wallet is installed or reachable.
    #[error("Please install MetaMask.")]
    Unavailable,
    /// The user declined a connection or signing prompt.
    #[error("{0}")]
    Rejected(String),
    /// The endpoint answered with a JSON-RPC error.
    #[error("{message}")]
    Rpc { code: i64, message: String },
    /// The request never got an answer.
    #[error("{0}")]
    Transport(String),
}

impl WalletError {
    /// Creates an error from a JSON-RPC error code and message.
    pub fn rpc(code: i64, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            USER_REJECTED_CODE => Self::Rejected(message),
            _ => Self::Rpc { code, message },
        }
    }

    /// Returns true if the user declined the request.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    /// Returns the JSON-RPC error code, if any.
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Rejected(_) => Some(USER_REJECTED_CODE),
            Self::Rpc { code, .. } => Some(*code),
            Self::Unavailable | Self::Transport(_) => None,
        }
    }
}

impl From<&ErrorPayload> for WalletError {
    fn from(payload: &ErrorPayload) -> Self {
        Self::rpc(payload.code, payload.message.to_string())
    }
}

impl From<TransportError> for WalletError {
    fn from(err: TransportError) -> Self {
        match err.as_error_resp() {
            Some(payload) => payload.into(),
            None => Self::Transport(err.to_string()),
        }
    }
}
