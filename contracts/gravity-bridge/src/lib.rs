//! Gravity Outgoing Pool - Batched Transfers of Bridged Vouchers to Ethereum
//!
//! Holders of `gravity0x...` vouchers send them back to Ethereum through this
//! contract. Sends wait in a per-token pool ordered by fee until a relayer
//! requests a batch; the batch is relayed and executed on Ethereum, at which
//! point the escrowed vouchers are burned.
//!
//! # Outgoing Flow
//! 1. User calls `SendToEth` with `amount + fee` attached; the vouchers are
//!    escrowed and the send joins the pool
//! 2. A relayer calls `RequestBatch`; the highest-fee sends of that token
//!    become an Open batch
//! 3. The host reports `BatchExecuted` through `sudo`; the vouchers are burned
//!
//! # Recovery
//! - Unbatched sends can be cancelled by their sender for a full refund
//! - Open batches return their sends to the pool when cancelled by the admin
//!   or when the observed Ethereum height passes their timeout

pub mod batch;
pub mod contract;
pub mod error;
pub mod escrow;
mod execute;
pub mod fees;
pub mod msg;
pub mod pool;
mod query;
pub mod state;

#[cfg(test)]
mod testing;

pub use crate::error::ContractError;
pub use crate::escrow::{BankEscrow, Escrow};
