//! Common - Shared Types for the Gravity Bridge Contracts
//!
//! This package provides the Ethereum-side value types used by the outgoing
//! pool contract and by off-chain relayers reading its state:
//! - [`EthAddress`] - a validated 20-byte ERC-20 contract or account address
//! - [`Erc20Token`] - an amount of a bridged ERC-20 token
//! - the `gravity` denom codec mapping bank denoms to token contracts

pub mod address;
pub mod denom;
pub mod error;
pub mod token;

pub use address::{EthAddress, OptionalEthAddress};
pub use denom::{contract_of, denom_of, GRAVITY_DENOM_LEN, GRAVITY_DENOM_PREFIX};
pub use error::TokenError;
pub use token::Erc20Token;
