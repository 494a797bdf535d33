//! Gravity outgoing pool contract - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute and sudo handlers
//! - `query` - Query message handlers
//! - `pool`, `batch`, `fees` - the pool and batch engine the handlers drive

use common::OptionalEthAddress;
use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_accept_admin, execute_cancel_admin_proposal, execute_cancel_batch,
    execute_cancel_send_to_eth, execute_pause, execute_propose_admin, execute_request_batch,
    execute_send_to_eth, execute_unpause, execute_update_config, sudo_batch_executed,
    sudo_end_block, validate_batch_size, validate_batch_timeout_blocks,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg, SudoMsg};
use crate::query::{
    query_all_batches, query_batch, query_batch_fees, query_config, query_denom_to_erc20,
    query_erc20_to_denom, query_last_observed_eth_height, query_locked_balance,
    query_pending_admin, query_pending_batch, query_transfer, query_unbatched_transfers,
    query_unbatched_transfers_by_contract,
};
use crate::state::{
    Config, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, DEFAULT_BATCH_SIZE,
    DEFAULT_BATCH_TIMEOUT_BLOCKS, LAST_OBSERVED_ETH_HEIGHT,
};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let admin = deps.api.addr_validate(&msg.admin)?;

    let batch_size = msg.batch_size.unwrap_or(DEFAULT_BATCH_SIZE);
    validate_batch_size(batch_size)?;
    let batch_timeout_blocks = msg
        .batch_timeout_blocks
        .unwrap_or(DEFAULT_BATCH_TIMEOUT_BLOCKS);
    validate_batch_timeout_blocks(batch_timeout_blocks)?;

    let bridge_ethereum_address = match &msg.bridge_ethereum_address {
        Some(address) => OptionalEthAddress::new(address)?,
        None => OptionalEthAddress::nil(),
    };

    let config = Config {
        admin,
        paused: false,
        batch_size,
        batch_timeout_blocks,
        bridge_ethereum_address,
    };
    CONFIG.save(deps.storage, &config)?;
    LAST_OBSERVED_ETH_HEIGHT.save(deps.storage, &0u64)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("admin", config.admin)
        .add_attribute("batch_size", batch_size.to_string())
        .add_attribute("batch_timeout_blocks", batch_timeout_blocks.to_string()))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Outgoing pool
        ExecuteMsg::SendToEth {
            dest_address,
            amount,
            fee,
        } => execute_send_to_eth(deps, info, dest_address, amount, fee),
        ExecuteMsg::CancelSendToEth { transaction_id } => {
            execute_cancel_send_to_eth(deps, info, transaction_id)
        }

        // Batches
        ExecuteMsg::RequestBatch { token_contract } => {
            execute_request_batch(deps, env, token_contract)
        }
        ExecuteMsg::CancelBatch { batch_nonce } => execute_cancel_batch(deps, info, batch_nonce),

        // Configuration
        ExecuteMsg::UpdateConfig {
            batch_size,
            batch_timeout_blocks,
            bridge_ethereum_address,
        } => execute_update_config(
            deps,
            info,
            batch_size,
            batch_timeout_blocks,
            bridge_ethereum_address,
        ),

        // Admin operations
        ExecuteMsg::Pause {} => execute_pause(deps, info),
        ExecuteMsg::Unpause {} => execute_unpause(deps, info),
        ExecuteMsg::ProposeAdmin { new_admin } => execute_propose_admin(deps, env, info, new_admin),
        ExecuteMsg::AcceptAdmin {} => execute_accept_admin(deps, env, info),
        ExecuteMsg::CancelAdminProposal {} => execute_cancel_admin_proposal(deps, info),
    }
}

// ============================================================================
// Sudo
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn sudo(deps: DepsMut, env: Env, msg: SudoMsg) -> Result<Response, ContractError> {
    match msg {
        SudoMsg::EndBlock { eth_block_height } => sudo_end_block(deps, eth_block_height),
        SudoMsg::BatchExecuted { batch_nonce } => sudo_batch_executed(deps, env, batch_nonce),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        // Pool queries
        QueryMsg::UnbatchedTransfers { start_after, limit } => {
            to_json_binary(&query_unbatched_transfers(deps, start_after, limit)?)
        }
        QueryMsg::UnbatchedTransfersByContract {
            token_contract,
            start_after,
            limit,
        } => to_json_binary(&query_unbatched_transfers_by_contract(
            deps,
            token_contract,
            start_after,
            limit,
        )?),
        QueryMsg::Transfer { id } => to_json_binary(&query_transfer(deps, id)?),
        QueryMsg::BatchFees { max_elements } => {
            to_json_binary(&query_batch_fees(deps, max_elements)?)
        }

        // Batch queries
        QueryMsg::PendingBatch { token_contract } => {
            to_json_binary(&query_pending_batch(deps, token_contract)?)
        }
        QueryMsg::Batch { batch_nonce } => to_json_binary(&query_batch(deps, batch_nonce)?),
        QueryMsg::AllBatches { start_after, limit } => {
            to_json_binary(&query_all_batches(deps, start_after, limit)?)
        }

        // Denom queries
        QueryMsg::DenomToErc20 { denom } => to_json_binary(&query_denom_to_erc20(denom)?),
        QueryMsg::Erc20ToDenom { token_contract } => {
            to_json_binary(&query_erc20_to_denom(token_contract)?)
        }

        // Core queries
        QueryMsg::LockedBalance { denom } => to_json_binary(&query_locked_balance(deps, denom)?),
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::LastObservedEthHeight {} => {
            to_json_binary(&query_last_observed_eth_height(deps)?)
        }
        QueryMsg::PendingAdmin {} => to_json_binary(&query_pending_admin(deps)?),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if LAST_OBSERVED_ETH_HEIGHT.may_load(deps.storage)?.is_none() {
        LAST_OBSERVED_ETH_HEIGHT.save(deps.storage, &0u64)?;
    }

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
