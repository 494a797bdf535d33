//! Pool parameter handlers.

use common::OptionalEthAddress;
use cosmwasm_std::{DepsMut, MessageInfo, Response};

use crate::error::ContractError;
use crate::state::{CONFIG, MAX_BATCH_SIZE};

/// Update batch size, batch timeout and the Ethereum bridge address.
pub fn execute_update_config(
    deps: DepsMut,
    info: MessageInfo,
    batch_size: Option<u32>,
    batch_timeout_blocks: Option<u64>,
    bridge_ethereum_address: Option<String>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }

    let mut response = Response::new().add_attribute("method", "update_config");

    if let Some(size) = batch_size {
        validate_batch_size(size)?;
        config.batch_size = size;
        response = response.add_attribute("batch_size", size.to_string());
    }

    if let Some(blocks) = batch_timeout_blocks {
        validate_batch_timeout_blocks(blocks)?;
        config.batch_timeout_blocks = blocks;
        response = response.add_attribute("batch_timeout_blocks", blocks.to_string());
    }

    if let Some(address) = bridge_ethereum_address {
        config.bridge_ethereum_address = OptionalEthAddress::new(&address)?;
        response = response.add_attribute("bridge_ethereum_address", address);
    }

    CONFIG.save(deps.storage, &config)?;
    Ok(response)
}

pub fn validate_batch_size(size: u32) -> Result<(), ContractError> {
    if size == 0 || size > MAX_BATCH_SIZE {
        return Err(ContractError::InvalidConfig {
            reason: format!("batch_size must be between 1 and {}", MAX_BATCH_SIZE),
        });
    }
    Ok(())
}

pub fn validate_batch_timeout_blocks(blocks: u64) -> Result<(), ContractError> {
    if blocks == 0 {
        return Err(ContractError::InvalidConfig {
            reason: "batch_timeout_blocks must be greater than zero".to_string(),
        });
    }
    Ok(())
}
