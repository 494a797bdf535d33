//! Outgoing transfer pool.
//!
//! Every send to Ethereum is stored once under its id (`0x01 | id`) and, while
//! unbatched, indexed under `0x02 | contract | fee | id`. A reverse scan of a
//! contract's fee index yields its transfers highest fee first, so batch
//! selection and fee totals read straight from the store without sorting.
//!
//! Among equal fees the reverse scan yields the higher id first.

use common::{EthAddress, Erc20Token};
use cosmwasm_std::{Addr, Order, StdError, StdResult, Storage};

use crate::error::ContractError;
use crate::escrow::Escrow;
use crate::state::{
    allocate_tx_id, fee_index_key, fee_index_prefix, insert_fee_index, load_transfer,
    parse_fee_index_key, prefix_range_end, remove_fee_index, remove_transfer, save_transfer,
    OutgoingTransferTx, TransferState, POOL_FEE_PREFIX,
};

/// Add a send to the pool and return its id.
///
/// The escrow lock happens before the id is allocated, so a failed call never
/// burns an id.
pub fn add_transfer(
    storage: &mut dyn Storage,
    escrow: &mut impl Escrow,
    sender: &Addr,
    dest_address: EthAddress,
    amount: Erc20Token,
    fee: Erc20Token,
) -> Result<u64, ContractError> {
    if amount.amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "Amount must be greater than zero".to_string(),
        });
    }
    amount.validate()?;
    fee.validate()?;

    let total = amount.checked_add(&fee)?;
    // Same contract bytes; keep one spelling so a single denom is escrowed
    let fee = Erc20Token::from_uint256(fee.amount, amount.contract.clone());

    escrow.lock(storage, sender, &total.gravity_coin()?)?;

    let id = allocate_tx_id(storage)?;
    let tx = OutgoingTransferTx {
        id,
        sender: sender.clone(),
        dest_address,
        erc20_token: amount,
        erc20_fee: fee,
        state: TransferState::Unbatched,
    };
    save_transfer(storage, &tx)?;
    insert_fee_index(storage, &tx);

    Ok(id)
}

/// Remove an unbatched send and refund `amount + fee` to its sender.
pub fn cancel_transfer(
    storage: &mut dyn Storage,
    escrow: &mut impl Escrow,
    id: u64,
    sender: &Addr,
) -> Result<OutgoingTransferTx, ContractError> {
    let tx = load_transfer(storage, id)?.ok_or(ContractError::TransferNotFound { id })?;

    if tx.sender != *sender {
        return Err(ContractError::Unauthorized);
    }
    if let TransferState::InBatch { batch_nonce } = tx.state {
        return Err(ContractError::AlreadyBatched { id, batch_nonce });
    }

    remove_fee_index(storage, &tx);
    remove_transfer(storage, id);
    escrow.release(storage, &tx.sender, &tx.total()?.gravity_coin()?)?;

    Ok(tx)
}

pub fn get_transfer(storage: &dyn Storage, id: u64) -> StdResult<Option<OutgoingTransferTx>> {
    load_transfer(storage, id)
}

pub type TransferIter<'a> = Box<dyn Iterator<Item = StdResult<OutgoingTransferTx>> + 'a>;

/// Unbatched sends of one token, highest fee first.
///
/// Each call opens a fresh cursor, so the sequence can be restarted at will.
pub fn iterate_unbatched_by_contract<'a>(
    storage: &'a dyn Storage,
    contract: &EthAddress,
) -> impl Iterator<Item = StdResult<OutgoingTransferTx>> + 'a {
    fee_index_range(storage, contract, None)
}

/// Unbatched sends of one token that come after `start_after`, a position
/// returned by [`fee_cursor`].
pub fn iterate_unbatched_by_contract_after<'a>(
    storage: &'a dyn Storage,
    contract: &EthAddress,
    start_after: Option<&[u8]>,
) -> StdResult<impl Iterator<Item = StdResult<OutgoingTransferTx>> + 'a> {
    let before = match start_after {
        Some(cursor) => {
            let (cursor_contract, key) = parse_cursor(cursor)?;
            if cursor_contract != *contract {
                return Err(StdError::generic_err(format!(
                    "Cursor belongs to {}, not {}",
                    cursor_contract, contract
                )));
            }
            Some(key)
        }
        None => None,
    };
    Ok(fee_index_range(storage, contract, before))
}

/// All unbatched sends, grouped by token in ascending contract order.
pub fn iterate_unbatched_all<'a>(
    storage: &'a dyn Storage,
) -> impl Iterator<Item = StdResult<OutgoingTransferTx>> + 'a {
    flatten_contracts(storage, pool_contracts(storage))
}

/// All unbatched sends that come after `start_after`: the rest of the
/// cursor's token, then every later token.
pub fn iterate_unbatched_all_after<'a>(
    storage: &'a dyn Storage,
    start_after: Option<&[u8]>,
) -> StdResult<TransferIter<'a>> {
    let Some(cursor) = start_after else {
        return Ok(Box::new(iterate_unbatched_all(storage)));
    };

    let (contract, key) = parse_cursor(cursor)?;
    let later = PoolContracts {
        storage,
        next_start: Some(prefix_range_end(&fee_index_prefix(&contract))),
    };
    Ok(Box::new(
        fee_index_range(storage, &contract, Some(key)).chain(flatten_contracts(storage, later)),
    ))
}

/// Position of a send in the fee index, `contract20 | fee_be32 | id_be8`.
/// Listings resume strictly after it.
pub fn fee_cursor(tx: &OutgoingTransferTx) -> Vec<u8> {
    let mut key = fee_index_key(&tx.erc20_fee.contract, tx.erc20_fee.amount, tx.id);
    key.remove(0);
    key
}

fn parse_cursor(cursor: &[u8]) -> StdResult<(EthAddress, Vec<u8>)> {
    let mut key = Vec::with_capacity(cursor.len() + 1);
    key.push(POOL_FEE_PREFIX);
    key.extend_from_slice(cursor);
    let (contract, _) = parse_fee_index_key(&key)?;
    Ok((contract, key))
}

/// Reverse scan of one contract's fee rows, below `before` when given
fn fee_index_range<'a>(
    storage: &'a dyn Storage,
    contract: &EthAddress,
    before: Option<Vec<u8>>,
) -> TransferIter<'a> {
    let start = fee_index_prefix(contract);
    let end = before.unwrap_or_else(|| prefix_range_end(&start));
    Box::new(
        storage
            .range(Some(start.as_slice()), Some(end.as_slice()), Order::Descending)
            .map(move |(key, _)| {
                let (_, id) = parse_fee_index_key(&key)?;
                load_transfer(storage, id)?
                    .ok_or_else(|| StdError::not_found(format!("outgoing transfer {}", id)))
            }),
    )
}

fn flatten_contracts<'a>(
    storage: &'a dyn Storage,
    contracts: PoolContracts<'a>,
) -> impl Iterator<Item = StdResult<OutgoingTransferTx>> + 'a {
    contracts.flat_map(move |contract| -> TransferIter<'a> {
        match contract {
            Ok(contract) => fee_index_range(storage, &contract, None),
            Err(err) => Box::new(std::iter::once(Err(err))),
        }
    })
}

/// Tokens with at least one unbatched send, in ascending contract order.
pub fn pool_contracts(storage: &dyn Storage) -> PoolContracts<'_> {
    PoolContracts {
        storage,
        next_start: Some(vec![POOL_FEE_PREFIX]),
    }
}

/// Cursor over the distinct contracts of the fee index. Each step seeks past
/// the previous contract's rows instead of walking them.
pub struct PoolContracts<'a> {
    storage: &'a dyn Storage,
    next_start: Option<Vec<u8>>,
}

impl<'a> Iterator for PoolContracts<'a> {
    type Item = StdResult<EthAddress>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.next_start.take()?;
        let end = [POOL_FEE_PREFIX + 1];
        let (key, _) = self
            .storage
            .range(Some(start.as_slice()), Some(end.as_slice()), Order::Ascending)
            .next()?;

        match parse_fee_index_key(&key) {
            Ok((contract, _)) => {
                self.next_start = Some(prefix_range_end(&fee_index_prefix(&contract)));
                Some(Ok(contract))
            }
            Err(err) => Some(Err(err)),
        }
    }
}
