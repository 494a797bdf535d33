//! Gravity Denom Codec
//!
//! Bridged ERC-20 vouchers live in the bank under the denom
//! `gravity` + contract address string, e.g.
//! `gravity0x429881672B9AE42b8EbA0E26cD9C73711b891Ca5` (49 bytes).

use crate::address::{EthAddress, ETH_ADDRESS_LEN};
use crate::error::TokenError;

/// Prefix of every voucher denom minted for a bridged ERC-20
pub const GRAVITY_DENOM_PREFIX: &str = "gravity";

/// Total length of a gravity denom
pub const GRAVITY_DENOM_LEN: usize = GRAVITY_DENOM_PREFIX.len() + ETH_ADDRESS_LEN;

/// Bank denom of the voucher for `contract`.
pub fn denom_of(contract: &EthAddress) -> String {
    format!("{}{}", GRAVITY_DENOM_PREFIX, contract.as_str())
}

/// Token contract behind a gravity denom.
///
/// Both the address format and the total denom length are checked.
pub fn contract_of(denom: &str) -> Result<EthAddress, TokenError> {
    let address = denom
        .strip_prefix(GRAVITY_DENOM_PREFIX)
        .ok_or_else(|| TokenError::InvalidDenom {
            reason: format!(
                "denom prefix({}) not equal to expected({})",
                denom, GRAVITY_DENOM_PREFIX
            ),
        })?;

    let contract = EthAddress::new(address).map_err(|e| TokenError::InvalidDenom {
        reason: format!("error({}) validating ethereum contract address", e),
    })?;

    if denom.len() != GRAVITY_DENOM_LEN {
        return Err(TokenError::InvalidDenom {
            reason: format!(
                "len(denom)({}) not equal to GRAVITY_DENOM_LEN({})",
                denom.len(),
                GRAVITY_DENOM_LEN
            ),
        });
    }

    Ok(contract)
}
