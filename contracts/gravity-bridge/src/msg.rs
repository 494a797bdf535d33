//! Message types for the Gravity outgoing pool contract
//!
//! Users send bridged vouchers back to Ethereum with `SendToEth`, relayers cut
//! batches with `RequestBatch`, and the host chain drives the batch lifecycle
//! through the privileged `sudo` entry point.

use common::{EthAddress, Erc20Token, OptionalEthAddress};
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Coin, Timestamp, Uint128};

use crate::fees::BatchFees;
use crate::state::{BatchState, OutgoingTransferTx};

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

/// Instantiate message
#[cw_serde]
pub struct InstantiateMsg {
    /// Admin address (governance) for batch cancellation and parameters
    pub admin: String,
    /// Maximum transfers per batch (default 100)
    pub batch_size: Option<u32>,
    /// Batch lifetime in Ethereum blocks (default 3600)
    pub batch_timeout_blocks: Option<u64>,
    /// Gravity contract on Ethereum
    pub bridge_ethereum_address: Option<String>,
}

// ============================================================================
// Execute Messages
// ============================================================================

/// Execute messages
#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Outgoing Pool
    // ========================================================================
    /// Queue a transfer of gravity vouchers back to Ethereum.
    ///
    /// `amount` and `fee` must be in the same gravity denom, and
    /// `amount + fee` must be attached to the message.
    SendToEth {
        /// Ethereum recipient (0x-prefixed, 40 hex digits)
        dest_address: String,
        amount: Coin,
        fee: Coin,
    },

    /// Withdraw an unbatched transfer and get `amount + fee` back.
    /// Only the original sender may cancel.
    CancelSendToEth { transaction_id: u64 },

    // ========================================================================
    // Batches
    // ========================================================================
    /// Cut the highest-fee unbatched transfers of one token into a batch.
    ///
    /// Authorization: Anyone (relayers request batches they want to relay)
    RequestBatch { token_contract: String },

    /// Abandon an Open batch and return its transfers to the pool.
    ///
    /// Authorization: Admin
    CancelBatch { batch_nonce: u64 },

    // ========================================================================
    // Configuration
    // ========================================================================
    /// Update pool parameters. `None` keeps the current value.
    ///
    /// Authorization: Admin
    UpdateConfig {
        batch_size: Option<u32>,
        batch_timeout_blocks: Option<u64>,
        bridge_ethereum_address: Option<String>,
    },

    // ========================================================================
    // Admin Operations
    // ========================================================================
    /// Halt new sends and batch requests
    Pause {},

    /// Resume sends and batch requests
    Unpause {},

    /// Propose a new admin (7-day timelock)
    ProposeAdmin { new_admin: String },

    /// Accept pending admin role
    AcceptAdmin {},

    /// Cancel pending admin proposal
    CancelAdminProposal {},
}

// ============================================================================
// Sudo Messages
// ============================================================================

/// Calls made by the host chain itself
#[cw_serde]
pub enum SudoMsg {
    /// End-block hook. Records the latest observed Ethereum height and times
    /// out every Open batch whose timeout lies below it.
    EndBlock { eth_block_height: u64 },

    /// An attested `BatchExecuted` event from Ethereum. Burns the escrowed
    /// vouchers of the batch.
    BatchExecuted { batch_nonce: u64 },
}

// ============================================================================
// Query Messages
// ============================================================================

/// Query messages
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    // ========================================================================
    // Pool Queries
    // ========================================================================
    /// Unbatched transfers of every token, grouped by token, highest fee first.
    /// `start_after` is the `next_start_after` of the previous page.
    #[returns(TransfersResponse)]
    UnbatchedTransfers {
        start_after: Option<Binary>,
        limit: Option<u32>,
    },

    /// Unbatched transfers of one token, highest fee first (paginated)
    #[returns(TransfersResponse)]
    UnbatchedTransfersByContract {
        token_contract: String,
        start_after: Option<Binary>,
        limit: Option<u32>,
    },

    /// A transfer by id, batched or not
    #[returns(TransferResponse)]
    Transfer { id: u64 },

    /// Fees a batch of each token would collect right now
    #[returns(BatchFeesResponse)]
    BatchFees { max_elements: Option<u32> },

    // ========================================================================
    // Batch Queries
    // ========================================================================
    /// The Open batch of a token, if any
    #[returns(Option<BatchResponse>)]
    PendingBatch { token_contract: String },

    /// A batch by nonce
    #[returns(Option<BatchResponse>)]
    Batch { batch_nonce: u64 },

    /// All batches in nonce order (paginated)
    #[returns(BatchesResponse)]
    AllBatches {
        start_after: Option<u64>,
        limit: Option<u32>,
    },

    // ========================================================================
    // Denom Queries
    // ========================================================================
    /// Token contract behind a gravity denom
    #[returns(DenomToErc20Response)]
    DenomToErc20 { denom: String },

    /// Gravity denom of a token contract
    #[returns(Erc20ToDenomResponse)]
    Erc20ToDenom { token_contract: String },

    // ========================================================================
    // Core Queries
    // ========================================================================
    /// Vouchers currently held for pooled and batched transfers
    #[returns(LockedBalanceResponse)]
    LockedBalance { denom: String },

    #[returns(ConfigResponse)]
    Config {},

    #[returns(LastObservedEthHeightResponse)]
    LastObservedEthHeight {},

    /// Returns pending admin change (if any)
    #[returns(Option<PendingAdminResponse>)]
    PendingAdmin {},
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct TransfersResponse {
    pub transfers: Vec<OutgoingTransferTx>,
    /// Fee-index position of the last transfer, set while more remain
    pub next_start_after: Option<Binary>,
}

#[cw_serde]
pub struct TransferResponse {
    pub transfer: Option<OutgoingTransferTx>,
}

#[cw_serde]
pub struct BatchFeesResponse {
    pub batch_fees: Vec<BatchFees>,
}

/// A batch with its transfers resolved from the pool.
///
/// Transfers of an executed batch no longer exist, so `transactions` is empty
/// for those; `transaction_ids` keeps the original list.
#[cw_serde]
pub struct BatchResponse {
    pub batch_nonce: u64,
    pub batch_timeout: u64,
    pub token_contract: EthAddress,
    pub block: u64,
    pub state: BatchState,
    pub transaction_ids: Vec<u64>,
    pub transactions: Vec<OutgoingTransferTx>,
    pub total_fee: Erc20Token,
}

#[cw_serde]
pub struct BatchesResponse {
    pub batches: Vec<BatchResponse>,
}

#[cw_serde]
pub struct DenomToErc20Response {
    pub erc20: EthAddress,
}

#[cw_serde]
pub struct Erc20ToDenomResponse {
    pub denom: String,
}

#[cw_serde]
pub struct LockedBalanceResponse {
    pub denom: String,
    pub amount: Uint128,
}

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Addr,
    pub paused: bool,
    pub batch_size: u32,
    pub batch_timeout_blocks: u64,
    pub bridge_ethereum_address: OptionalEthAddress,
}

#[cw_serde]
pub struct LastObservedEthHeightResponse {
    pub eth_block_height: u64,
}

#[cw_serde]
pub struct PendingAdminResponse {
    pub new_address: Addr,
    pub execute_after: Timestamp,
}
