//! Outgoing batches: building from the pool and the Open -> terminal lifecycle.
//!
//! A batch only lists transfer ids. The pool record stays the source of truth
//! for each transfer, so cancelling or timing out a batch just flips the
//! records back to `Unbatched` and restores their fee index rows. At most one
//! Open batch exists per token contract, tracked by the `0x06` index.

use common::EthAddress;
use cosmwasm_std::{Order, StdResult, Storage};

use crate::error::ContractError;
use crate::escrow::Escrow;
use crate::pool::iterate_unbatched_by_contract;
use crate::state::{
    allocate_batch_nonce, batch_key, clear_pending_batch_nonce, decode_u64, insert_fee_index,
    load_batch, load_pending_batch_nonce, load_transfer, remove_fee_index, remove_transfer,
    save_batch, save_transfer, set_pending_batch_nonce, BatchState, OutgoingTransferTx,
    OutgoingTxBatch, TransferState, BATCH_PREFIX, PENDING_BATCH_PREFIX,
};

/// Cut the top `max_elements` unbatched transfers of `contract` into a new
/// Open batch.
pub fn build_batch(
    storage: &mut dyn Storage,
    block_height: u64,
    contract: &EthAddress,
    max_elements: u32,
    batch_timeout: u64,
) -> Result<OutgoingTxBatch, ContractError> {
    if let Some(batch_nonce) = load_pending_batch_nonce(storage, contract)? {
        return Err(ContractError::PendingBatchExists {
            token_contract: contract.to_string(),
            batch_nonce,
        });
    }

    // Collect first; the cursor borrows the store
    let selected: Vec<OutgoingTransferTx> = iterate_unbatched_by_contract(storage, contract)
        .take(max_elements as usize)
        .collect::<StdResult<_>>()?;
    if selected.is_empty() {
        return Err(ContractError::NoTransferable {
            token_contract: contract.to_string(),
        });
    }

    let batch_nonce = allocate_batch_nonce(storage)?;
    let token_contract = selected[0].erc20_token.contract.clone();
    let mut transaction_ids = Vec::with_capacity(selected.len());
    for mut tx in selected {
        remove_fee_index(storage, &tx);
        tx.state = TransferState::InBatch { batch_nonce };
        save_transfer(storage, &tx)?;
        transaction_ids.push(tx.id);
    }

    let batch = OutgoingTxBatch {
        batch_nonce,
        batch_timeout,
        transaction_ids,
        token_contract,
        block: block_height,
        state: BatchState::Open,
    };
    save_batch(storage, &batch)?;
    set_pending_batch_nonce(storage, &batch.token_contract, batch_nonce);

    Ok(batch)
}

/// The batch was executed on Ethereum: burn the escrowed vouchers and drop
/// the transfers it carried.
pub fn observe_execution(
    storage: &mut dyn Storage,
    escrow: &mut impl Escrow,
    batch_nonce: u64,
) -> Result<OutgoingTxBatch, ContractError> {
    let mut batch = load_open_batch(storage, batch_nonce)?;

    let expected = load_pending_batch_nonce(storage, &batch.token_contract)?;
    if expected != Some(batch_nonce) {
        return Err(ContractError::OutOfOrderExecution {
            expected: expected.unwrap_or_default(),
            got: batch_nonce,
        });
    }

    for id in &batch.transaction_ids {
        let tx = load_transfer(storage, *id)?
            .ok_or(ContractError::TransferNotFound { id: *id })?;
        escrow.burn(storage, &tx.total()?.gravity_coin()?)?;
        remove_transfer(storage, *id);
    }

    batch.state = BatchState::Executed;
    save_batch(storage, &batch)?;
    clear_pending_batch_nonce(storage, &batch.token_contract);

    Ok(batch)
}

/// Abandon an Open batch and return its transfers to the pool.
pub fn cancel_batch(
    storage: &mut dyn Storage,
    batch_nonce: u64,
) -> Result<OutgoingTxBatch, ContractError> {
    let batch = load_open_batch(storage, batch_nonce)?;
    return_to_pool(storage, batch, BatchState::Cancelled)
}

/// Time out every Open batch whose `batch_timeout` is below
/// `current_eth_block`. Returns the batches that changed, in ascending
/// contract order. Running it twice with the same height changes nothing
/// the second time.
pub fn prune_expired(
    storage: &mut dyn Storage,
    current_eth_block: u64,
) -> Result<Vec<OutgoingTxBatch>, ContractError> {
    let expired: Vec<OutgoingTxBatch> = open_batches(storage)?
        .into_iter()
        .filter(|batch| batch.batch_timeout < current_eth_block)
        .collect();

    expired
        .into_iter()
        .map(|batch| return_to_pool(storage, batch, BatchState::TimedOut))
        .collect()
}

pub fn get_batch(storage: &dyn Storage, batch_nonce: u64) -> StdResult<Option<OutgoingTxBatch>> {
    load_batch(storage, batch_nonce)
}

/// The Open batch of `contract`, if any
pub fn pending_batch(
    storage: &dyn Storage,
    contract: &EthAddress,
) -> StdResult<Option<OutgoingTxBatch>> {
    match load_pending_batch_nonce(storage, contract)? {
        Some(batch_nonce) => load_batch(storage, batch_nonce),
        None => Ok(None),
    }
}

/// Every Open batch, one per contract, in ascending contract order
pub fn open_batches(storage: &dyn Storage) -> StdResult<Vec<OutgoingTxBatch>> {
    let start = [PENDING_BATCH_PREFIX];
    let end = [PENDING_BATCH_PREFIX + 1];
    let nonces: Vec<u64> = storage
        .range(Some(start.as_slice()), Some(end.as_slice()), Order::Ascending)
        .map(|(_, value)| decode_u64(&value))
        .collect::<StdResult<_>>()?;

    nonces
        .into_iter()
        .filter_map(|nonce| load_batch(storage, nonce).transpose())
        .collect()
}

/// Batches in ascending nonce order, after `start_after` if given
pub fn all_batches(
    storage: &dyn Storage,
    start_after: Option<u64>,
    limit: usize,
) -> StdResult<Vec<OutgoingTxBatch>> {
    let start = match start_after {
        Some(nonce) => match nonce.checked_add(1) {
            Some(next) => batch_key(next),
            None => return Ok(vec![]),
        },
        None => vec![BATCH_PREFIX],
    };
    let end = [BATCH_PREFIX + 1];

    storage
        .range(Some(start.as_slice()), Some(end.as_slice()), Order::Ascending)
        .take(limit)
        .map(|(_, value)| cosmwasm_std::from_json(&value))
        .collect()
}

fn load_open_batch(
    storage: &dyn Storage,
    batch_nonce: u64,
) -> Result<OutgoingTxBatch, ContractError> {
    let batch =
        load_batch(storage, batch_nonce)?.ok_or(ContractError::BatchNotFound { batch_nonce })?;
    if batch.state.is_terminal() {
        return Err(ContractError::AlreadyTerminal {
            batch_nonce,
            state: batch.state.as_str().to_string(),
        });
    }
    Ok(batch)
}

/// Refund path shared by cancel and timeout. Transfers keep their ids.
fn return_to_pool(
    storage: &mut dyn Storage,
    mut batch: OutgoingTxBatch,
    state: BatchState,
) -> Result<OutgoingTxBatch, ContractError> {
    for id in &batch.transaction_ids {
        let mut tx = load_transfer(storage, *id)?
            .ok_or(ContractError::TransferNotFound { id: *id })?;
        tx.state = TransferState::Unbatched;
        save_transfer(storage, &tx)?;
        insert_fee_index(storage, &tx);
    }

    batch.state = state;
    save_batch(storage, &batch)?;
    clear_pending_batch_nonce(storage, &batch.token_contract);

    Ok(batch)
}
