//! Error type shared by the address, token and denom helpers.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid Ethereum address: {reason}")]
    InvalidAddress { reason: String },

    #[error("Invalid gravity denom: {reason}")]
    InvalidDenom { reason: String },

    #[error("Token contract mismatch: expected {expected}, got {got}")]
    ContractMismatch { expected: String, got: String },

    #[error("Token amount overflow")]
    Overflow,

    #[error("Optional Ethereum address is nil")]
    NilAddress,
}
