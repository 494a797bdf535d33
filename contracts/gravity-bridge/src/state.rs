//! State definitions for the Gravity outgoing pool contract
//!
//! Contract configuration uses cw-storage-plus items. The pool and batch
//! records use a fixed raw key layout so relayers and replicas can read the
//! indices byte for byte:
//!
//! ```text
//! 0x01 | id_be8                          -> OutgoingTransferTx
//! 0x02 | contract20 | fee_be32 | id_be8  -> 0x01 marker (fee index)
//! 0x03 | nonce_be8                       -> OutgoingTxBatch
//! 0x04                                   -> next transfer id (be8)
//! 0x05                                   -> last batch nonce (be8)
//! 0x06 | contract20                      -> open batch nonce (be8)
//! ```
//!
//! None of the cw-storage-plus namespaces below starts with a byte in
//! `0x01..=0x06`, so the two layouts never overlap.

use common::{EthAddress, Erc20Token, OptionalEthAddress};
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    from_json, to_json_vec, Addr, StdError, StdResult, Storage, Timestamp, Uint128, Uint256,
};
use cw_storage_plus::{Item, Map};

// ============================================================================
// Core Configuration
// ============================================================================

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Admin address (governance) allowed to cancel batches and tune parameters
    pub admin: Addr,
    /// Whether new sends and batch requests are halted
    pub paused: bool,
    /// Maximum number of transfers per batch
    pub batch_size: u32,
    /// How many Ethereum blocks past the last observed height a new batch stays valid
    pub batch_timeout_blocks: u64,
    /// Gravity contract on Ethereum that executes batches, if known
    pub bridge_ethereum_address: OptionalEthAddress,
}

/// Pending admin change proposal
#[cw_serde]
pub struct PendingAdmin {
    /// Proposed new admin address
    pub new_address: Addr,
    /// Block time when the change can be executed
    pub execute_after: Timestamp,
}

// ============================================================================
// Pool & Batch Records
// ============================================================================

#[cw_serde]
pub enum TransferState {
    Unbatched,
    InBatch { batch_nonce: u64 },
}

/// A user send waiting in the pool or in an open batch.
///
/// Stored under `0x01 | id_be8` as `cw_serde` JSON, like every other value in
/// this contract's state.
#[cw_serde]
pub struct OutgoingTransferTx {
    pub id: u64,
    pub sender: Addr,
    pub dest_address: EthAddress,
    pub erc20_token: Erc20Token,
    pub erc20_fee: Erc20Token,
    pub state: TransferState,
}

impl OutgoingTransferTx {
    /// `amount + fee`, the value held in escrow for this transfer
    pub fn total(&self) -> Result<Erc20Token, common::TokenError> {
        self.erc20_token.checked_add(&self.erc20_fee)
    }
}

#[cw_serde]
pub enum BatchState {
    Open,
    Executed,
    Cancelled,
    TimedOut,
}

impl BatchState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, BatchState::Open)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BatchState::Open => "open",
            BatchState::Executed => "executed",
            BatchState::Cancelled => "cancelled",
            BatchState::TimedOut => "timed_out",
        }
    }
}

/// An outgoing batch. Transfers are referenced by id; the pool record stays
/// authoritative for their contents.
///
/// Stored under `0x03 | nonce_be8` as `cw_serde` JSON.
#[cw_serde]
pub struct OutgoingTxBatch {
    pub batch_nonce: u64,
    /// Ethereum block height after which the batch can no longer execute
    pub batch_timeout: u64,
    pub transaction_ids: Vec<u64>,
    pub token_contract: EthAddress,
    /// Host block height at creation
    pub block: u64,
    pub state: BatchState,
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:gravity-bridge";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// 7 days in seconds for admin change timelock
pub const ADMIN_TIMELOCK_DURATION: u64 = 604_800;

/// Default number of transfers per batch
pub const DEFAULT_BATCH_SIZE: u32 = 100;

/// Upper bound accepted for `batch_size`
pub const MAX_BATCH_SIZE: u32 = 1_000;

/// Default batch lifetime in Ethereum blocks (~12 hours)
pub const DEFAULT_BATCH_TIMEOUT_BLOCKS: u64 = 3_600;

// ============================================================================
// Config Storage
// ============================================================================

/// Primary config storage
pub const CONFIG: Item<Config> = Item::new("config");

/// Pending admin proposal (if any)
pub const PENDING_ADMIN: Item<PendingAdmin> = Item::new("pending_admin");

/// Latest Ethereum block height reported by the end-block hook
pub const LAST_OBSERVED_ETH_HEIGHT: Item<u64> = Item::new("last_observed_eth_height");

/// Voucher amounts held by the escrow for pooled and batched transfers
/// Key: bank denom, Value: locked amount
pub const LOCKED_BALANCES: Map<&str, Uint128> = Map::new("locked_balances");

// ============================================================================
// Raw Key Layout
// ============================================================================

pub const POOL_ENTRY_PREFIX: u8 = 0x01;
pub const POOL_FEE_PREFIX: u8 = 0x02;
pub const BATCH_PREFIX: u8 = 0x03;
pub const NEXT_TX_ID_KEY: &[u8] = &[0x04];
pub const LAST_BATCH_NONCE_KEY: &[u8] = &[0x05];
pub const PENDING_BATCH_PREFIX: u8 = 0x06;

/// Value of every fee index row; the host store rejects empty values
pub const FEE_INDEX_MARKER: &[u8] = &[0x01];

/// First transfer id; 0 is reserved
pub const FIRST_TX_ID: u64 = 1;

pub fn pool_entry_key(id: u64) -> Vec<u8> {
    let mut key = Vec::with_capacity(9);
    key.push(POOL_ENTRY_PREFIX);
    key.extend_from_slice(&id.to_be_bytes());
    key
}

/// `0x02 | contract20`, the fee index rows of one token
pub fn fee_index_prefix(contract: &EthAddress) -> Vec<u8> {
    let mut key = Vec::with_capacity(61);
    key.push(POOL_FEE_PREFIX);
    key.extend_from_slice(contract.as_bytes());
    key
}

pub fn fee_index_key(contract: &EthAddress, fee: Uint256, id: u64) -> Vec<u8> {
    let mut key = fee_index_prefix(contract);
    key.extend_from_slice(&fee.to_be_bytes());
    key.extend_from_slice(&id.to_be_bytes());
    key
}

/// Contract and transfer id encoded in a fee index key
pub fn parse_fee_index_key(key: &[u8]) -> StdResult<(EthAddress, u64)> {
    if key.len() != 61 || key[0] != POOL_FEE_PREFIX {
        return Err(StdError::generic_err(format!(
            "Invalid fee index key length: {}",
            key.len()
        )));
    }
    let mut contract = [0u8; 20];
    contract.copy_from_slice(&key[1..21]);
    Ok((EthAddress::from_bytes(contract), decode_u64(&key[53..61])?))
}

pub fn batch_key(batch_nonce: u64) -> Vec<u8> {
    let mut key = Vec::with_capacity(9);
    key.push(BATCH_PREFIX);
    key.extend_from_slice(&batch_nonce.to_be_bytes());
    key
}

pub fn pending_batch_key(contract: &EthAddress) -> Vec<u8> {
    let mut key = Vec::with_capacity(21);
    key.push(PENDING_BATCH_PREFIX);
    key.extend_from_slice(contract.as_bytes());
    key
}

/// Smallest key greater than every key starting with `prefix`
pub fn prefix_range_end(prefix: &[u8]) -> Vec<u8> {
    let mut end = prefix.to_vec();
    while let Some(last) = end.pop() {
        if last < u8::MAX {
            end.push(last + 1);
            return end;
        }
    }
    // All 0xff: no upper bound fits, callers treat an empty key as open-ended
    end
}

pub fn decode_u64(bytes: &[u8]) -> StdResult<u64> {
    let raw: [u8; 8] = bytes
        .try_into()
        .map_err(|_| StdError::generic_err(format!("Invalid u64 length: {}", bytes.len())))?;
    Ok(u64::from_be_bytes(raw))
}

// ============================================================================
// Raw Record Access
// ============================================================================

pub fn load_transfer(storage: &dyn Storage, id: u64) -> StdResult<Option<OutgoingTransferTx>> {
    storage
        .get(&pool_entry_key(id))
        .map(|raw| from_json(&raw))
        .transpose()
}

pub fn save_transfer(storage: &mut dyn Storage, tx: &OutgoingTransferTx) -> StdResult<()> {
    storage.set(&pool_entry_key(tx.id), &to_json_vec(tx)?);
    Ok(())
}

pub fn remove_transfer(storage: &mut dyn Storage, id: u64) {
    storage.remove(&pool_entry_key(id));
}

pub fn insert_fee_index(storage: &mut dyn Storage, tx: &OutgoingTransferTx) {
    let key = fee_index_key(&tx.erc20_fee.contract, tx.erc20_fee.amount, tx.id);
    storage.set(&key, FEE_INDEX_MARKER);
}

pub fn remove_fee_index(storage: &mut dyn Storage, tx: &OutgoingTransferTx) {
    let key = fee_index_key(&tx.erc20_fee.contract, tx.erc20_fee.amount, tx.id);
    storage.remove(&key);
}

pub fn load_batch(storage: &dyn Storage, batch_nonce: u64) -> StdResult<Option<OutgoingTxBatch>> {
    storage
        .get(&batch_key(batch_nonce))
        .map(|raw| from_json(&raw))
        .transpose()
}

pub fn save_batch(storage: &mut dyn Storage, batch: &OutgoingTxBatch) -> StdResult<()> {
    storage.set(&batch_key(batch.batch_nonce), &to_json_vec(batch)?);
    Ok(())
}

pub fn load_pending_batch_nonce(
    storage: &dyn Storage,
    contract: &EthAddress,
) -> StdResult<Option<u64>> {
    storage
        .get(&pending_batch_key(contract))
        .map(|raw| decode_u64(&raw))
        .transpose()
}

pub fn set_pending_batch_nonce(storage: &mut dyn Storage, contract: &EthAddress, batch_nonce: u64) {
    storage.set(&pending_batch_key(contract), &batch_nonce.to_be_bytes());
}

pub fn clear_pending_batch_nonce(storage: &mut dyn Storage, contract: &EthAddress) {
    storage.remove(&pending_batch_key(contract));
}

// ============================================================================
// Counters
// ============================================================================

/// Id the next transfer will receive
pub fn peek_next_tx_id(storage: &dyn Storage) -> StdResult<u64> {
    match storage.get(NEXT_TX_ID_KEY) {
        Some(raw) => decode_u64(&raw),
        None => Ok(FIRST_TX_ID),
    }
}

/// Take the next transfer id and advance the counter
pub fn allocate_tx_id(storage: &mut dyn Storage) -> StdResult<u64> {
    let id = peek_next_tx_id(storage)?;
    let next = id
        .checked_add(1)
        .ok_or_else(|| StdError::generic_err("transfer id space exhausted"))?;
    storage.set(NEXT_TX_ID_KEY, &next.to_be_bytes());
    Ok(id)
}

pub fn last_batch_nonce(storage: &dyn Storage) -> StdResult<u64> {
    match storage.get(LAST_BATCH_NONCE_KEY) {
        Some(raw) => decode_u64(&raw),
        None => Ok(0),
    }
}

pub fn allocate_batch_nonce(storage: &mut dyn Storage) -> StdResult<u64> {
    let nonce = last_batch_nonce(storage)?
        .checked_add(1)
        .ok_or_else(|| StdError::generic_err("batch nonce space exhausted"))?;
    storage.set(LAST_BATCH_NONCE_KEY, &nonce.to_be_bytes());
    Ok(nonce)
}
