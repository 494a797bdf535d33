//! Execute and sudo handlers for the Gravity outgoing pool contract.
//!
//! - `outgoing` - SendToEth and CancelSendToEth
//! - `batch` - RequestBatch and admin batch cancellation
//! - `sudo` - end-block pruning and executed-batch burns
//! - `config` - pool parameters
//! - `admin` - pause, unpause, admin transfer

mod admin;
mod batch;
mod config;
mod outgoing;
mod sudo;

pub use admin::*;
pub use batch::*;
pub use config::*;
pub use outgoing::*;
pub use sudo::*;

use cosmwasm_std::Event;

use crate::state::OutgoingTxBatch;

/// Lifecycle event indexed by relayers
pub(crate) fn batch_event(kind: &str, batch: &OutgoingTxBatch) -> Event {
    let ids: Vec<String> = batch
        .transaction_ids
        .iter()
        .map(|id| id.to_string())
        .collect();

    Event::new(kind)
        .add_attribute("batch_nonce", batch.batch_nonce.to_string())
        .add_attribute("token_contract", batch.token_contract.to_string())
        .add_attribute("batch_timeout", batch.batch_timeout.to_string())
        .add_attribute("block", batch.block.to_string())
        .add_attribute("tx_count", batch.transaction_ids.len().to_string())
        .add_attribute("transaction_ids", ids.join(","))
}
