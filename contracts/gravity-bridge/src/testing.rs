//! Fixtures and an in-memory escrow for unit tests.

use std::collections::BTreeMap;

use common::{EthAddress, Erc20Token};
use cosmwasm_std::{Addr, Coin, Storage, Uint128};

use crate::error::ContractError;
use crate::escrow::Escrow;

pub const CONTRACT_A: &str = "0x429881672B9AE42b8EbA0E26cD9C73711b891Ca5";
pub const CONTRACT_B: &str = "0x7D1AfA7B718fb893dB30A3aBc0Cfc608AaCfeBB0";
pub const RECEIVER: &str = "0xd041c41EA1bf0F006ADBb6d2c9ef9D425dE5eaD7";

const MODULE: &str = "module";

pub fn contract_a() -> EthAddress {
    EthAddress::new(CONTRACT_A).unwrap()
}

pub fn contract_b() -> EthAddress {
    EthAddress::new(CONTRACT_B).unwrap()
}

pub fn receiver() -> EthAddress {
    EthAddress::new(RECEIVER).unwrap()
}

pub fn sender() -> Addr {
    Addr::unchecked("cosmos1ahx7f8wyertuus9r20284ej0asrs085case3kn")
}

pub fn token(amount: u64, contract: EthAddress) -> Erc20Token {
    Erc20Token::new(amount, contract)
}

/// Bank stand-in keyed by (holder, denom). Locked coins sit under the module
/// holder; burned coins are tallied separately.
#[derive(Default)]
pub struct MockEscrow {
    balances: BTreeMap<(String, String), Uint128>,
    burned: BTreeMap<String, Uint128>,
}

impl MockEscrow {
    pub fn funded(holder: &Addr, contract: &EthAddress, amount: u128) -> Self {
        let mut escrow = Self::default();
        escrow.fund(holder, contract, amount);
        escrow
    }

    pub fn fund(&mut self, holder: &Addr, contract: &EthAddress, amount: u128) {
        let denom = common::denom_of(contract);
        *self
            .balances
            .entry((holder.to_string(), denom))
            .or_default() += Uint128::new(amount);
    }

    pub fn balance(&self, holder: &Addr, contract: &EthAddress) -> Uint128 {
        self.get(holder.as_str(), &common::denom_of(contract))
    }

    pub fn module_balance(&self, contract: &EthAddress) -> Uint128 {
        self.get(MODULE, &common::denom_of(contract))
    }

    pub fn burned(&self, contract: &EthAddress) -> Uint128 {
        self.burned
            .get(&common::denom_of(contract))
            .copied()
            .unwrap_or_default()
    }

    fn get(&self, holder: &str, denom: &str) -> Uint128 {
        self.balances
            .get(&(holder.to_string(), denom.to_string()))
            .copied()
            .unwrap_or_default()
    }

    fn debit(&mut self, holder: &str, coin: &Coin) -> Result<(), Uint128> {
        let have = self.get(holder, &coin.denom);
        if have < coin.amount {
            return Err(have);
        }
        self.balances
            .insert((holder.to_string(), coin.denom.clone()), have - coin.amount);
        Ok(())
    }

    fn credit(&mut self, holder: &str, coin: &Coin) {
        *self
            .balances
            .entry((holder.to_string(), coin.denom.clone()))
            .or_default() += coin.amount;
    }
}

impl Escrow for MockEscrow {
    fn lock(
        &mut self,
        _storage: &mut dyn Storage,
        sender: &Addr,
        coin: &Coin,
    ) -> Result<(), ContractError> {
        self.debit(sender.as_str(), coin)
            .map_err(|got| ContractError::InsufficientFunds {
                denom: coin.denom.clone(),
                needed: coin.amount,
                got,
            })?;
        self.credit(MODULE, coin);
        Ok(())
    }

    fn release(
        &mut self,
        _storage: &mut dyn Storage,
        receiver: &Addr,
        coin: &Coin,
    ) -> Result<(), ContractError> {
        self.debit(MODULE, coin)
            .map_err(|locked| ContractError::ModuleUnderfunded {
                denom: coin.denom.clone(),
                locked,
                needed: coin.amount,
            })?;
        self.credit(receiver.as_str(), coin);
        Ok(())
    }

    fn burn(&mut self, _storage: &mut dyn Storage, coin: &Coin) -> Result<(), ContractError> {
        self.debit(MODULE, coin)
            .map_err(|locked| ContractError::ModuleUnderfunded {
                denom: coin.denom.clone(),
                locked,
                needed: coin.amount,
            })?;
        *self.burned.entry(coin.denom.clone()).or_default() += coin.amount;
        Ok(())
    }
}
