//! Batch request and cancellation handlers.

use common::EthAddress;
use cosmwasm_std::{DepsMut, Env, MessageInfo, Response};

use super::batch_event;
use crate::batch::{build_batch, cancel_batch};
use crate::error::ContractError;
use crate::state::{CONFIG, LAST_OBSERVED_ETH_HEIGHT};

/// Build a batch for `token_contract` from its highest-fee unbatched sends.
///
/// The batch times out `batch_timeout_blocks` Ethereum blocks after the last
/// height the chain has observed. Until the first height arrives there is
/// nothing to project from, so requests are refused.
pub fn execute_request_batch(
    deps: DepsMut,
    env: Env,
    token_contract: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::BridgePaused);
    }

    let contract = EthAddress::new(&token_contract)?;
    let eth_height = LAST_OBSERVED_ETH_HEIGHT
        .may_load(deps.storage)?
        .unwrap_or_default();
    if eth_height == 0 {
        return Err(ContractError::NoObservedEthHeight);
    }
    let batch_timeout = eth_height.saturating_add(config.batch_timeout_blocks);

    let batch = build_batch(
        deps.storage,
        env.block.height,
        &contract,
        config.batch_size,
        batch_timeout,
    )?;

    Ok(Response::new()
        .add_event(batch_event("outgoing_batch_created", &batch))
        .add_attribute("method", "request_batch")
        .add_attribute("batch_nonce", batch.batch_nonce.to_string())
        .add_attribute("token_contract", batch.token_contract.to_string())
        .add_attribute("tx_count", batch.transaction_ids.len().to_string()))
}

/// Cancel an Open batch (admin only).
pub fn execute_cancel_batch(
    deps: DepsMut,
    info: MessageInfo,
    batch_nonce: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }

    let batch = cancel_batch(deps.storage, batch_nonce)?;

    Ok(Response::new()
        .add_event(batch_event("outgoing_batch_cancelled", &batch))
        .add_attribute("method", "cancel_batch")
        .add_attribute("batch_nonce", batch_nonce.to_string()))
}
