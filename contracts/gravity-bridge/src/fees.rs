//! Fee totals a relayer would earn by requesting a batch per token.

use common::EthAddress;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{StdResult, Storage, Uint256};

use crate::pool::{iterate_unbatched_by_contract, pool_contracts};

#[cw_serde]
pub struct BatchFees {
    pub token: EthAddress,
    /// Sum of the top `max_elements` fees
    pub total_fees: Uint256,
    pub tx_count: u32,
}

/// For every token with unbatched sends, the fees of the `max_elements`
/// sends a batch would take right now. Read only, ascending contract order.
pub fn top_fees_per_contract(
    storage: &dyn Storage,
    max_elements: u32,
) -> StdResult<Vec<BatchFees>> {
    pool_contracts(storage)
        .map(|contract| -> StdResult<BatchFees> {
            let contract = contract?;
            let mut token = contract.clone();
            let mut total_fees = Uint256::zero();
            let mut tx_count = 0u32;

            for (i, tx) in iterate_unbatched_by_contract(storage, &contract)
                .take(max_elements as usize)
                .enumerate()
            {
                let tx = tx?;
                if i == 0 {
                    token = tx.erc20_fee.contract;
                }
                total_fees = total_fees.checked_add(tx.erc20_fee.amount)?;
                tx_count += 1;
            }

            Ok(BatchFees {
                token,
                total_fees,
                tx_count,
            })
        })
        .collect()
}
