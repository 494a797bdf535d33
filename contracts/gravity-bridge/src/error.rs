//! Error types for the Gravity outgoing pool contract

use common::TokenError;
use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Token(#[from] TokenError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: caller is not permitted to perform this action")]
    Unauthorized,

    #[error("Unauthorized: only pending admin can accept")]
    UnauthorizedPendingAdmin,

    // ========================================================================
    // Admin & Config Errors
    // ========================================================================

    #[error("No pending admin change")]
    NoPendingAdmin,

    #[error("Timelock not expired: {remaining_seconds} seconds remaining")]
    TimelockNotExpired { remaining_seconds: u64 },

    #[error("Bridge is paused")]
    BridgePaused,

    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },

    // ========================================================================
    // Escrow Errors
    // ========================================================================

    #[error("Insufficient funds: need {needed}{denom}, got {got}{denom}")]
    InsufficientFunds {
        denom: String,
        needed: Uint128,
        got: Uint128,
    },

    #[error("Unexpected funds attached: {funds}")]
    UnexpectedFunds { funds: String },

    #[error("Module account underfunded: holds {locked}{denom}, needs {needed}{denom}")]
    ModuleUnderfunded {
        denom: String,
        locked: Uint128,
        needed: Uint128,
    },

    // ========================================================================
    // Pool Errors
    // ========================================================================

    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    #[error("Outgoing transfer not found: {id}")]
    TransferNotFound { id: u64 },

    #[error("Outgoing transfer {id} is already in batch {batch_nonce}")]
    AlreadyBatched { id: u64, batch_nonce: u64 },

    // ========================================================================
    // Batch Errors
    // ========================================================================

    #[error("Batch {batch_nonce} is still pending for {token_contract}")]
    PendingBatchExists {
        token_contract: String,
        batch_nonce: u64,
    },

    #[error("No Ethereum block height observed yet")]
    NoObservedEthHeight,

    #[error("No transferable transactions for {token_contract}")]
    NoTransferable { token_contract: String },

    #[error("Batch not found: {batch_nonce}")]
    BatchNotFound { batch_nonce: u64 },

    #[error("Batch {batch_nonce} is already {state}")]
    AlreadyTerminal { batch_nonce: u64, state: String },

    #[error("Out of order batch execution: expected {expected}, got {got}")]
    OutOfOrderExecution { expected: u64, got: u64 },
}
