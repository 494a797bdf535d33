//! Outgoing transfer handlers.
//!
//! This module handles:
//! - SendToEth (escrow attached vouchers, add to the pool)
//! - CancelSendToEth (remove from the pool, refund the sender)

use common::{EthAddress, Erc20Token};
use cosmwasm_std::{Coin, DepsMut, MessageInfo, Response};

use crate::error::ContractError;
use crate::escrow::BankEscrow;
use crate::pool::{add_transfer, cancel_transfer};
use crate::state::CONFIG;

/// Queue a send of gravity vouchers to an Ethereum address.
pub fn execute_send_to_eth(
    deps: DepsMut,
    info: MessageInfo,
    dest_address: String,
    amount: Coin,
    fee: Coin,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::BridgePaused);
    }

    let destination = EthAddress::new(&dest_address)?;
    let erc20_token = Erc20Token::from_gravity_coin(&amount)?;
    let erc20_fee = Erc20Token::from_gravity_coin(&fee)?;

    let mut escrow = BankEscrow::new(info.sender.clone(), info.funds);
    let transaction_id = add_transfer(
        deps.storage,
        &mut escrow,
        &info.sender,
        destination,
        erc20_token,
        erc20_fee,
    )?;
    escrow.ensure_funds_consumed()?;

    Ok(Response::new()
        .add_messages(escrow.into_messages())
        .add_attribute("method", "send_to_eth")
        .add_attribute("transaction_id", transaction_id.to_string())
        .add_attribute("sender", info.sender)
        .add_attribute("dest_address", dest_address)
        .add_attribute("amount", amount.to_string())
        .add_attribute("fee", fee.to_string()))
}

/// Cancel an unbatched send and refund `amount + fee` to its sender.
pub fn execute_cancel_send_to_eth(
    deps: DepsMut,
    info: MessageInfo,
    transaction_id: u64,
) -> Result<Response, ContractError> {
    let mut escrow = BankEscrow::new(info.sender.clone(), info.funds);
    escrow.ensure_funds_consumed()?;

    let tx = cancel_transfer(deps.storage, &mut escrow, transaction_id, &info.sender)?;
    let refund = tx.total()?.gravity_coin()?;

    Ok(Response::new()
        .add_messages(escrow.into_messages())
        .add_attribute("method", "cancel_send_to_eth")
        .add_attribute("transaction_id", transaction_id.to_string())
        .add_attribute("sender", tx.sender)
        .add_attribute("refund", refund.to_string()))
}
