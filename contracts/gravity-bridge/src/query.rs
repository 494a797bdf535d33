//! Query handlers for the Gravity outgoing pool contract.

use common::{contract_of, denom_of, EthAddress, Erc20Token};
use cosmwasm_std::{Binary, Deps, StdError, StdResult, Storage, Uint256};

use crate::batch::{all_batches, get_batch, pending_batch};
use crate::escrow::locked_balance;
use crate::fees::top_fees_per_contract;
use crate::msg::{
    BatchFeesResponse, BatchResponse, BatchesResponse, ConfigResponse, DenomToErc20Response,
    Erc20ToDenomResponse, LastObservedEthHeightResponse, LockedBalanceResponse,
    PendingAdminResponse, TransferResponse, TransfersResponse,
};
use crate::pool::{
    fee_cursor, get_transfer, iterate_unbatched_all_after, iterate_unbatched_by_contract_after,
};
use crate::state::{
    load_transfer, OutgoingTransferTx, OutgoingTxBatch, CONFIG, LAST_OBSERVED_ETH_HEIGHT,
    MAX_BATCH_SIZE, PENDING_ADMIN,
};

const DEFAULT_LIMIT: u32 = 100;
const MAX_LIMIT: u32 = 1_000;
const DEFAULT_BATCH_LIMIT: u32 = 10;
const MAX_BATCH_LIMIT: u32 = 30;

fn parse_contract(token_contract: &str) -> StdResult<EthAddress> {
    EthAddress::new(token_contract).map_err(|e| StdError::generic_err(e.to_string()))
}

// ============================================================================
// Pool Queries
// ============================================================================

pub fn query_unbatched_transfers(
    deps: Deps,
    start_after: Option<Binary>,
    limit: Option<u32>,
) -> StdResult<TransfersResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.as_ref().map(|b| b.as_slice());
    transfers_page(iterate_unbatched_all_after(deps.storage, start)?, limit)
}

pub fn query_unbatched_transfers_by_contract(
    deps: Deps,
    token_contract: String,
    start_after: Option<Binary>,
    limit: Option<u32>,
) -> StdResult<TransfersResponse> {
    let contract = parse_contract(&token_contract)?;
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.as_ref().map(|b| b.as_slice());
    transfers_page(
        iterate_unbatched_by_contract_after(deps.storage, &contract, start)?,
        limit,
    )
}

/// Take one page and point `next_start_after` at its last row when the
/// iterator has more.
fn transfers_page(
    iter: impl Iterator<Item = StdResult<OutgoingTransferTx>>,
    limit: usize,
) -> StdResult<TransfersResponse> {
    let mut transfers = iter.take(limit + 1).collect::<StdResult<Vec<_>>>()?;
    let next_start_after = if transfers.len() > limit {
        transfers.truncate(limit);
        transfers.last().map(|tx| Binary::from(fee_cursor(tx)))
    } else {
        None
    };
    Ok(TransfersResponse {
        transfers,
        next_start_after,
    })
}

pub fn query_transfer(deps: Deps, id: u64) -> StdResult<TransferResponse> {
    Ok(TransferResponse {
        transfer: get_transfer(deps.storage, id)?,
    })
}

/// Defaults to the configured batch size, so the totals match what a
/// `RequestBatch` would collect.
pub fn query_batch_fees(deps: Deps, max_elements: Option<u32>) -> StdResult<BatchFeesResponse> {
    let max_elements = match max_elements {
        Some(n) => n.min(MAX_BATCH_SIZE),
        None => CONFIG.load(deps.storage)?.batch_size,
    };
    Ok(BatchFeesResponse {
        batch_fees: top_fees_per_contract(deps.storage, max_elements)?,
    })
}

// ============================================================================
// Batch Queries
// ============================================================================

pub fn query_pending_batch(deps: Deps, token_contract: String) -> StdResult<Option<BatchResponse>> {
    let contract = parse_contract(&token_contract)?;
    pending_batch(deps.storage, &contract)?
        .map(|batch| materialize_batch(deps.storage, batch))
        .transpose()
}

pub fn query_batch(deps: Deps, batch_nonce: u64) -> StdResult<Option<BatchResponse>> {
    get_batch(deps.storage, batch_nonce)?
        .map(|batch| materialize_batch(deps.storage, batch))
        .transpose()
}

pub fn query_all_batches(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<BatchesResponse> {
    let limit = limit.unwrap_or(DEFAULT_BATCH_LIMIT).min(MAX_BATCH_LIMIT) as usize;
    let batches = all_batches(deps.storage, start_after, limit)?
        .into_iter()
        .map(|batch| materialize_batch(deps.storage, batch))
        .collect::<StdResult<Vec<_>>>()?;
    Ok(BatchesResponse { batches })
}

/// Resolve a batch's transfer ids against the pool.
///
/// Ids whose record is gone (executed batches) are skipped.
fn materialize_batch(storage: &dyn Storage, batch: OutgoingTxBatch) -> StdResult<BatchResponse> {
    let mut transactions = Vec::with_capacity(batch.transaction_ids.len());
    let mut total_fee = Uint256::zero();
    for id in &batch.transaction_ids {
        if let Some(tx) = load_transfer(storage, *id)? {
            total_fee = total_fee.checked_add(tx.erc20_fee.amount)?;
            transactions.push(tx);
        }
    }

    Ok(BatchResponse {
        total_fee: Erc20Token::from_uint256(total_fee, batch.token_contract.clone()),
        batch_nonce: batch.batch_nonce,
        batch_timeout: batch.batch_timeout,
        token_contract: batch.token_contract,
        block: batch.block,
        state: batch.state,
        transaction_ids: batch.transaction_ids,
        transactions,
    })
}

// ============================================================================
// Denom Queries
// ============================================================================

pub fn query_denom_to_erc20(denom: String) -> StdResult<DenomToErc20Response> {
    let erc20 = contract_of(&denom).map_err(|e| StdError::generic_err(e.to_string()))?;
    Ok(DenomToErc20Response { erc20 })
}

pub fn query_erc20_to_denom(token_contract: String) -> StdResult<Erc20ToDenomResponse> {
    let contract = parse_contract(&token_contract)?;
    Ok(Erc20ToDenomResponse {
        denom: denom_of(&contract),
    })
}

// ============================================================================
// Core Queries
// ============================================================================

pub fn query_locked_balance(deps: Deps, denom: String) -> StdResult<LockedBalanceResponse> {
    let amount = locked_balance(deps.storage, &denom)?;
    Ok(LockedBalanceResponse { denom, amount })
}

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin,
        paused: config.paused,
        batch_size: config.batch_size,
        batch_timeout_blocks: config.batch_timeout_blocks,
        bridge_ethereum_address: config.bridge_ethereum_address,
    })
}

pub fn query_last_observed_eth_height(deps: Deps) -> StdResult<LastObservedEthHeightResponse> {
    Ok(LastObservedEthHeightResponse {
        eth_block_height: LAST_OBSERVED_ETH_HEIGHT
            .may_load(deps.storage)?
            .unwrap_or_default(),
    })
}

/// Query pending admin change.
pub fn query_pending_admin(deps: Deps) -> StdResult<Option<PendingAdminResponse>> {
    Ok(PENDING_ADMIN
        .may_load(deps.storage)?
        .map(|pending| PendingAdminResponse {
            new_address: pending.new_address,
            execute_after: pending.execute_after,
        }))
}
