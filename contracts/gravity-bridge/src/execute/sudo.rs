//! Host-driven lifecycle handlers.
//!
//! This module handles:
//! - EndBlock (track the Ethereum height, time out expired batches)
//! - BatchExecuted (burn the vouchers of an executed batch)

use cosmwasm_std::{DepsMut, Env, Response};

use super::batch_event;
use crate::batch::{observe_execution, prune_expired};
use crate::error::ContractError;
use crate::escrow::BankEscrow;
use crate::state::LAST_OBSERVED_ETH_HEIGHT;

/// Record the latest Ethereum height and time out every Open batch whose
/// timeout lies below it. The recorded height never decreases.
pub fn sudo_end_block(deps: DepsMut, eth_block_height: u64) -> Result<Response, ContractError> {
    let last = LAST_OBSERVED_ETH_HEIGHT
        .may_load(deps.storage)?
        .unwrap_or_default();
    let height = last.max(eth_block_height);
    LAST_OBSERVED_ETH_HEIGHT.save(deps.storage, &height)?;

    let timed_out = prune_expired(deps.storage, height)?;

    Ok(Response::new()
        .add_events(
            timed_out
                .iter()
                .map(|batch| batch_event("outgoing_batch_timed_out", batch)),
        )
        .add_attribute("method", "end_block")
        .add_attribute("eth_block_height", height.to_string())
        .add_attribute("timed_out", timed_out.len().to_string()))
}

/// Burn the escrowed vouchers of a batch executed on Ethereum.
pub fn sudo_batch_executed(
    deps: DepsMut,
    env: Env,
    batch_nonce: u64,
) -> Result<Response, ContractError> {
    let mut escrow = BankEscrow::without_funds(env.contract.address);
    let batch = observe_execution(deps.storage, &mut escrow, batch_nonce)?;

    Ok(Response::new()
        .add_messages(escrow.into_messages())
        .add_event(batch_event("outgoing_batch_executed", &batch))
        .add_attribute("method", "batch_executed")
        .add_attribute("batch_nonce", batch_nonce.to_string()))
}
