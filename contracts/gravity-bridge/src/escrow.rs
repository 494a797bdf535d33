//! Escrow adapter between the pool and the bank module.
//!
//! The pool never moves balances itself. It asks an [`Escrow`] to lock the
//! value of a new transfer, to release it back to the sender, or to burn it
//! once the batch carrying it has executed on Ethereum.
//!
//! [`BankEscrow`] is the on-chain implementation. Vouchers reach the contract
//! as funds attached to the `SendToEth` message, so `lock` consumes those
//! funds; `release` and `burn` queue `BankMsg`s for the response. A per-denom
//! ledger in [`LOCKED_BALANCES`] tracks what the contract holds on behalf of
//! the pool.

use cosmwasm_std::{Addr, BankMsg, Coin, CosmosMsg, StdError, StdResult, Storage, Uint128};

use crate::error::ContractError;
use crate::state::LOCKED_BALANCES;

pub trait Escrow {
    /// Move `coin` from `sender` into the module's holding account
    fn lock(
        &mut self,
        storage: &mut dyn Storage,
        sender: &Addr,
        coin: &Coin,
    ) -> Result<(), ContractError>;

    /// Return previously locked `coin` to `receiver`
    fn release(
        &mut self,
        storage: &mut dyn Storage,
        receiver: &Addr,
        coin: &Coin,
    ) -> Result<(), ContractError>;

    /// Destroy previously locked `coin`
    fn burn(&mut self, storage: &mut dyn Storage, coin: &Coin) -> Result<(), ContractError>;
}

/// Bank-backed escrow for a single contract call
pub struct BankEscrow {
    funder: Addr,
    available: Vec<Coin>,
    messages: Vec<CosmosMsg>,
}

impl BankEscrow {
    /// Escrow for a call by `funder` that attached `funds`
    pub fn new(funder: Addr, funds: Vec<Coin>) -> Self {
        Self {
            funder,
            available: funds,
            messages: vec![],
        }
    }

    /// Escrow for privileged calls (sudo, admin) that attach no funds
    pub fn without_funds(caller: Addr) -> Self {
        Self::new(caller, vec![])
    }

    /// Attached funds that no `lock` consumed are rejected rather than kept
    pub fn ensure_funds_consumed(&self) -> Result<(), ContractError> {
        let leftover: Vec<String> = self
            .available
            .iter()
            .filter(|c| !c.amount.is_zero())
            .map(|c| c.to_string())
            .collect();
        if leftover.is_empty() {
            Ok(())
        } else {
            Err(ContractError::UnexpectedFunds {
                funds: leftover.join(","),
            })
        }
    }

    pub fn into_messages(self) -> Vec<CosmosMsg> {
        self.messages
    }
}

impl Escrow for BankEscrow {
    fn lock(
        &mut self,
        storage: &mut dyn Storage,
        sender: &Addr,
        coin: &Coin,
    ) -> Result<(), ContractError> {
        if *sender != self.funder {
            return Err(ContractError::Unauthorized);
        }

        let attached = self
            .available
            .iter_mut()
            .find(|c| c.denom == coin.denom);
        let got = attached.as_ref().map(|c| c.amount).unwrap_or_default();
        match attached {
            Some(funds) if funds.amount >= coin.amount => {
                funds.amount -= coin.amount;
            }
            _ => {
                return Err(ContractError::InsufficientFunds {
                    denom: coin.denom.clone(),
                    needed: coin.amount,
                    got,
                })
            }
        }

        credit_locked(storage, coin)
    }

    fn release(
        &mut self,
        storage: &mut dyn Storage,
        receiver: &Addr,
        coin: &Coin,
    ) -> Result<(), ContractError> {
        debit_locked(storage, coin)?;
        if !coin.amount.is_zero() {
            self.messages.push(CosmosMsg::Bank(BankMsg::Send {
                to_address: receiver.to_string(),
                amount: vec![coin.clone()],
            }));
        }
        Ok(())
    }

    fn burn(&mut self, storage: &mut dyn Storage, coin: &Coin) -> Result<(), ContractError> {
        debit_locked(storage, coin)?;
        if !coin.amount.is_zero() {
            self.messages.push(CosmosMsg::Bank(BankMsg::Burn {
                amount: vec![coin.clone()],
            }));
        }
        Ok(())
    }
}

/// Amount of `denom` currently held for the pool
pub fn locked_balance(storage: &dyn Storage, denom: &str) -> StdResult<Uint128> {
    Ok(LOCKED_BALANCES
        .may_load(storage, denom)?
        .unwrap_or_default())
}

fn credit_locked(storage: &mut dyn Storage, coin: &Coin) -> Result<(), ContractError> {
    let locked = locked_balance(storage, &coin.denom)?;
    let updated = locked
        .checked_add(coin.amount)
        .map_err(StdError::from)?;
    LOCKED_BALANCES.save(storage, &coin.denom, &updated)?;
    Ok(())
}

fn debit_locked(storage: &mut dyn Storage, coin: &Coin) -> Result<(), ContractError> {
    let locked = locked_balance(storage, &coin.denom)?;
    let updated = locked
        .checked_sub(coin.amount)
        .map_err(|_| ContractError::ModuleUnderfunded {
            denom: coin.denom.clone(),
            locked,
            needed: coin.amount,
        })?;
    if updated.is_zero() {
        LOCKED_BALANCES.remove(storage, &coin.denom);
    } else {
        LOCKED_BALANCES.save(storage, &coin.denom, &updated)?;
    }
    Ok(())
}
