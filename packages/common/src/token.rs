//! ERC-20 Token Amounts
//!
//! [`Erc20Token`] pairs an amount with the contract it denominates. Amounts are
//! held as `Uint256` so sums of many transfers are lossless; narrowing back to
//! a bank coin (128 bits) or a 64-bit field is checked.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Coin, Uint128, Uint256};

use crate::address::EthAddress;
use crate::denom::{contract_of, denom_of};
use crate::error::TokenError;

#[cw_serde]
pub struct Erc20Token {
    pub amount: Uint256,
    pub contract: EthAddress,
}

impl Erc20Token {
    pub fn new(amount: u64, contract: EthAddress) -> Self {
        Self {
            amount: Uint256::from(amount),
            contract,
        }
    }

    pub fn from_uint256(amount: Uint256, contract: EthAddress) -> Self {
        Self { amount, contract }
    }

    /// Token value of a gravity voucher coin
    pub fn from_gravity_coin(coin: &Coin) -> Result<Self, TokenError> {
        let contract = contract_of(&coin.denom)?;
        Ok(Self {
            amount: Uint256::from(coin.amount),
            contract,
        })
    }

    /// Bank coin of this amount in the gravity voucher denom
    pub fn gravity_coin(&self) -> Result<Coin, TokenError> {
        Ok(Coin {
            denom: denom_of(&self.contract),
            amount: uint256_to_uint128(self.amount)?,
        })
    }

    pub fn denom(&self) -> String {
        denom_of(&self.contract)
    }

    pub fn validate(&self) -> Result<(), TokenError> {
        self.contract.validate()
    }

    /// Sum of two amounts of the same token.
    pub fn checked_add(&self, other: &Erc20Token) -> Result<Erc20Token, TokenError> {
        if self.contract != other.contract {
            return Err(TokenError::ContractMismatch {
                expected: self.contract.to_string(),
                got: other.contract.to_string(),
            });
        }
        let amount = self
            .amount
            .checked_add(other.amount)
            .map_err(|_| TokenError::Overflow)?;
        Ok(Self {
            amount,
            contract: self.contract.clone(),
        })
    }

    /// The amount as a 64-bit integer, for callers persisting to 64-bit fields
    pub fn amount_u64(&self) -> Result<u64, TokenError> {
        let bytes = self.amount.to_be_bytes();
        if bytes[..24].iter().any(|b| *b != 0) {
            return Err(TokenError::Overflow);
        }
        let mut low = [0u8; 8];
        low.copy_from_slice(&bytes[24..]);
        Ok(u64::from_be_bytes(low))
    }
}

fn uint256_to_uint128(amount: Uint256) -> Result<Uint128, TokenError> {
    let bytes = amount.to_be_bytes();
    if bytes[..16].iter().any(|b| *b != 0) {
        return Err(TokenError::Overflow);
    }
    let mut low = [0u8; 16];
    low.copy_from_slice(&bytes[16..]);
    Ok(Uint128::new(u128::from_be_bytes(low)))
}
