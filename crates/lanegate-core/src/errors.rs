//! Error types for Lanegate

use thiserror::Error;

use crate::AmountError;

/// JSON-RPC transport and decoding errors
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("RPC endpoint unreachable at {url}")]
    Unreachable { url: String },

    #[error("RPC request timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("RPC endpoint returned error: {message}")]
    ApiError { message: String },

    #[error("JSON-RPC error {code}: {message}")]
    JsonRpc { code: i64, message: String },

    #[error("Failed to decode response: {0}")]
    ParseError(String),
}

/// Lane and transfer errors
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Chain not configured: {chain}")]
    ChainNotConfigured { chain: String },

    #[error("Lane {source_chain} -> {destination_chain} does not support token {token}")]
    LaneNotSupported {
        source_chain: String,
        destination_chain: String,
        token: String,
    },

    #[error("Invalid amount: {message}")]
    InvalidAmount { message: String },

    #[error("Invalid address: {address}")]
    InvalidAddress { address: String },
}

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Duplicate chain name: {name}")]
    DuplicateChain { name: String },

    #[error("Duplicate chain selector {selector} ({name})")]
    DuplicateSelector { selector: u64, name: String },

    #[error("Invalid theme: {0}")]
    InvalidTheme(String),
}

impl From<AmountError> for ProtocolError {
    fn from(e: AmountError) -> Self {
        Self::InvalidAmount {
            message: e.to_string(),
        }
    }
}

impl ProtocolError {
    /// Get an HTTP-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ChainNotConfigured { .. } => "chain_not_configured",
            Self::LaneNotSupported { .. } => "lane_not_supported",
            Self::InvalidAmount { .. } => "invalid_amount",
            Self::InvalidAddress { .. } => "invalid_address",
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidAmount { .. } | Self::InvalidAddress { .. } => 400,
            Self::ChainNotConfigured { .. } => 404,
            Self::LaneNotSupported { .. } => 422,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_error_codes() {
        let err = ProtocolError::InvalidAmount {
            message: "test".into(),
        };
        assert_eq!(err.error_code(), "invalid_amount");
        assert_eq!(err.status_code(), 400);

        let err = ProtocolError::LaneNotSupported {
            source_chain: "sepolia".into(),
            destination_chain: "fuji".into(),
            token: "0x00".into(),
        };
        assert_eq!(err.error_code(), "lane_not_supported");
        assert_eq!(err.status_code(), 422);
    }

    #[test]
    fn test_rpc_error_messages() {
        let err = RpcError::Timeout { secs: 15 };
        assert_eq!(err.to_string(), "RPC request timed out after 15s");
    }

    #[test]
    fn test_amount_error_conversion() {
        let err: ProtocolError = AmountError::Empty.into();
        assert_eq!(err.error_code(), "invalid_amount");
    }
}
