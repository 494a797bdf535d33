//! Integration tests for the Gravity outgoing pool contract using cw-multi-test.
//!
//! These tests drive the full flow through the bank module: vouchers are
//! escrowed on send, refunded on cancel and burned when a batch executes.

use common::EthAddress;
use cosmwasm_std::{coins, Addr, Coin, Empty, Uint128, Uint256};
use cw_multi_test::{App, AppResponse, ContractWrapper, Executor};

use gravity_bridge::fees::BatchFees;
use gravity_bridge::msg::{
    BatchFeesResponse, BatchResponse, ConfigResponse, DenomToErc20Response,
    Erc20ToDenomResponse, ExecuteMsg, InstantiateMsg, LockedBalanceResponse, QueryMsg, SudoMsg,
    TransferResponse, TransfersResponse,
};
use gravity_bridge::state::{BatchState, TransferState};

const CONTRACT_A: &str = "0x429881672B9AE42b8EbA0E26cD9C73711b891Ca5";
const CONTRACT_B: &str = "0x7D1AfA7B718fb893dB30A3aBc0Cfc608AaCfeBB0";
const RECEIVER: &str = "0xd041c41EA1bf0F006ADBb6d2c9ef9D425dE5eaD7";
const INITIAL_BALANCE: u128 = 99_999;
const BATCH_TIMEOUT_BLOCKS: u64 = 100;
/// Ethereum height reported before each scenario starts
const ETH_HEIGHT: u64 = 1_000;

// ============================================================================
// Test Setup
// ============================================================================

fn contract_gravity() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        gravity_bridge::contract::execute,
        gravity_bridge::contract::instantiate,
        gravity_bridge::contract::query,
    )
    .with_sudo(gravity_bridge::contract::sudo);
    Box::new(contract)
}

fn denom(contract: &str) -> String {
    format!("gravity{}", contract)
}

struct Suite {
    app: App,
    contract: Addr,
    admin: Addr,
    sender: Addr,
    other: Addr,
    relayer: Addr,
}

/// Instantiated contract that has already observed `ETH_HEIGHT`
fn setup() -> Suite {
    let mut suite = setup_unobserved();
    suite.end_block(ETH_HEIGHT);
    suite
}

fn setup_unobserved() -> Suite {
    let mut app = App::default();

    let admin = Addr::unchecked("cosmos1admin");
    let sender = Addr::unchecked("cosmos1ahx7f8wyertuus9r20284ej0asrs085case3kn");
    let other = Addr::unchecked("cosmos1other");
    let relayer = Addr::unchecked("cosmos1relayer");

    // Fund accounts with vouchers of both tokens
    app.init_modules(|router, _, storage| {
        for account in [&sender, &other] {
            router
                .bank
                .init_balance(
                    storage,
                    account,
                    vec![
                        Coin::new(INITIAL_BALANCE, denom(CONTRACT_A)),
                        Coin::new(INITIAL_BALANCE, denom(CONTRACT_B)),
                    ],
                )
                .unwrap();
        }
    });

    let code_id = app.store_code(contract_gravity());
    let contract = app
        .instantiate_contract(
            code_id,
            admin.clone(),
            &InstantiateMsg {
                admin: admin.to_string(),
                batch_size: None,
                batch_timeout_blocks: Some(BATCH_TIMEOUT_BLOCKS),
                bridge_ethereum_address: None,
            },
            &[],
            "gravity-bridge",
            Some(admin.to_string()),
        )
        .unwrap();

    Suite {
        app,
        contract,
        admin,
        sender,
        other,
        relayer,
    }
}

impl Suite {
    fn send_to_eth(
        &mut self,
        sender: &Addr,
        token: &str,
        amount: u128,
        fee: u128,
    ) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(
            sender.clone(),
            self.contract.clone(),
            &ExecuteMsg::SendToEth {
                dest_address: RECEIVER.to_string(),
                amount: Coin::new(amount, denom(token)),
                fee: Coin::new(fee, denom(token)),
            },
            &coins(amount + fee, denom(token)),
        )
    }

    /// The four sends of the fee-ordering scenario: fees 2, 3, 2, 1
    fn seed_pool(&mut self) {
        let sender = self.sender.clone();
        for (amount, fee) in [(100, 2), (101, 3), (102, 2), (103, 1)] {
            self.send_to_eth(&sender, CONTRACT_A, amount, fee).unwrap();
        }
    }

    fn request_batch(&mut self, token: &str) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(
            self.relayer.clone(),
            self.contract.clone(),
            &ExecuteMsg::RequestBatch {
                token_contract: token.to_string(),
            },
            &[],
        )
    }

    fn cancel_batch(&mut self, batch_nonce: u64) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(
            self.admin.clone(),
            self.contract.clone(),
            &ExecuteMsg::CancelBatch { batch_nonce },
            &[],
        )
    }

    fn end_block(&mut self, eth_block_height: u64) -> AppResponse {
        self.app
            .wasm_sudo(self.contract.clone(), &SudoMsg::EndBlock { eth_block_height })
            .unwrap()
    }

    fn unbatched_ids(&self, token: &str) -> Vec<u64> {
        let res: TransfersResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.contract,
                &QueryMsg::UnbatchedTransfersByContract {
                    token_contract: token.to_string(),
                    start_after: None,
                    limit: None,
                },
            )
            .unwrap();
        res.transfers.into_iter().map(|tx| tx.id).collect()
    }

    fn batch(&self, batch_nonce: u64) -> Option<BatchResponse> {
        self.app
            .wrap()
            .query_wasm_smart(&self.contract, &QueryMsg::Batch { batch_nonce })
            .unwrap()
    }

    fn pending_batch(&self, token: &str) -> Option<BatchResponse> {
        self.app
            .wrap()
            .query_wasm_smart(
                &self.contract,
                &QueryMsg::PendingBatch {
                    token_contract: token.to_string(),
                },
            )
            .unwrap()
    }

    fn balance(&self, account: &Addr, token: &str) -> Uint128 {
        self.app
            .wrap()
            .query_balance(account, denom(token))
            .unwrap()
            .amount
    }

    fn locked(&self, token: &str) -> Uint128 {
        let res: LockedBalanceResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.contract,
                &QueryMsg::LockedBalance {
                    denom: denom(token),
                },
            )
            .unwrap();
        res.amount
    }
}

fn has_event(res: &AppResponse, kind: &str) -> bool {
    let ty = format!("wasm-{}", kind);
    res.events.iter().any(|e| e.ty == ty)
}

// ============================================================================
// Instantiate & Denoms
// ============================================================================

#[test]
fn test_instantiate() {
    let suite = setup();

    let config: ConfigResponse = suite
        .app
        .wrap()
        .query_wasm_smart(&suite.contract, &QueryMsg::Config {})
        .unwrap();

    assert_eq!(config.admin, suite.admin);
    assert!(!config.paused);
    assert_eq!(config.batch_size, 100);
    assert_eq!(config.batch_timeout_blocks, BATCH_TIMEOUT_BLOCKS);
}

#[test]
fn test_denom_queries() {
    let suite = setup();

    let res: Erc20ToDenomResponse = suite
        .app
        .wrap()
        .query_wasm_smart(
            &suite.contract,
            &QueryMsg::Erc20ToDenom {
                token_contract: CONTRACT_A.to_string(),
            },
        )
        .unwrap();
    assert_eq!(res.denom, denom(CONTRACT_A));
    assert_eq!(res.denom.len(), 49);

    let res: DenomToErc20Response = suite
        .app
        .wrap()
        .query_wasm_smart(
            &suite.contract,
            &QueryMsg::DenomToErc20 {
                denom: denom(CONTRACT_B),
            },
        )
        .unwrap();
    assert_eq!(res.erc20.as_str(), CONTRACT_B);

    let err = suite
        .app
        .wrap()
        .query_wasm_smart::<DenomToErc20Response>(
            &suite.contract,
            &QueryMsg::DenomToErc20 {
                denom: "uatom".to_string(),
            },
        )
        .unwrap_err();
    assert!(err.to_string().contains("Invalid gravity denom"));
}

// ============================================================================
// Pool
// ============================================================================

#[test]
fn test_pool_orders_by_fee() {
    let mut suite = setup();
    suite.seed_pool();

    assert_eq!(suite.unbatched_ids(CONTRACT_A), vec![2, 3, 1, 4]);

    // (100+2) + (101+3) + (102+2) + (103+1)
    assert_eq!(suite.balance(&suite.contract, CONTRACT_A), Uint128::new(414));
    assert_eq!(suite.locked(CONTRACT_A), Uint128::new(414));
    assert_eq!(
        suite.balance(&suite.sender, CONTRACT_A),
        Uint128::new(INITIAL_BALANCE - 414)
    );

    let res: TransferResponse = suite
        .app
        .wrap()
        .query_wasm_smart(&suite.contract, &QueryMsg::Transfer { id: 2 })
        .unwrap();
    let tx = res.transfer.unwrap();
    assert_eq!(tx.sender, suite.sender);
    assert_eq!(tx.dest_address.as_str(), RECEIVER);
    assert_eq!(tx.erc20_token.amount, Uint256::from(101u64));
    assert_eq!(tx.erc20_fee.amount, Uint256::from(3u64));
    assert_eq!(tx.state, TransferState::Unbatched);
}

#[test]
fn test_batch_fees_across_contracts() {
    let mut suite = setup();
    suite.seed_pool();
    let sender = suite.sender.clone();
    for _ in 0..110 {
        suite.send_to_eth(&sender, CONTRACT_B, 10, 5).unwrap();
    }

    let res: BatchFeesResponse = suite
        .app
        .wrap()
        .query_wasm_smart(
            &suite.contract,
            &QueryMsg::BatchFees {
                max_elements: Some(100),
            },
        )
        .unwrap();

    assert_eq!(res.batch_fees.len(), 2);
    assert_eq!(
        res.batch_fees[0],
        BatchFees {
            token: EthAddress::new(CONTRACT_A).unwrap(),
            total_fees: Uint256::from(8u64),
            tx_count: 4,
        }
    );
    assert_eq!(res.batch_fees[1].token.as_str(), CONTRACT_B);
    assert_eq!(res.batch_fees[1].total_fees, Uint256::from(500u64));
    assert_eq!(res.batch_fees[1].tx_count, 100);

    let all: TransfersResponse = suite
        .app
        .wrap()
        .query_wasm_smart(
            &suite.contract,
            &QueryMsg::UnbatchedTransfers {
                start_after: None,
                limit: Some(1_000),
            },
        )
        .unwrap();
    assert_eq!(all.transfers.len(), 114);
    assert_eq!(all.transfers[0].id, 2);
    assert_eq!(all.next_start_after, None);
}

#[test]
fn test_unbatched_transfers_page_past_max_limit() {
    let mut suite = setup();
    let sender = suite.sender.clone();
    for i in 0..1_005u128 {
        suite.send_to_eth(&sender, CONTRACT_A, 1, i % 7).unwrap();
    }
    for fee in [4, 9] {
        suite.send_to_eth(&sender, CONTRACT_B, 10, fee).unwrap();
    }

    let mut seen = vec![];
    let mut start_after = None;
    let mut pages = 0;
    loop {
        let res: TransfersResponse = suite
            .app
            .wrap()
            .query_wasm_smart(
                &suite.contract,
                &QueryMsg::UnbatchedTransfers {
                    start_after,
                    limit: Some(5_000),
                },
            )
            .unwrap();
        pages += 1;
        assert!(res.transfers.len() <= 1_000);
        seen.extend(res.transfers);
        match res.next_start_after {
            Some(cursor) => start_after = Some(cursor),
            None => break,
        }
    }

    assert_eq!(pages, 2);
    assert_eq!(seen.len(), 1_007);
    let mut ids: Vec<u64> = seen.iter().map(|tx| tx.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 1_007);

    // Token A first, highest fee first, then token B
    let (a, b) = seen.split_at(1_005);
    assert!(a.windows(2).all(|w| w[0].erc20_fee.amount >= w[1].erc20_fee.amount));
    assert!(a.iter().all(|tx| tx.erc20_token.contract.as_str() == CONTRACT_A));
    let b_ids: Vec<u64> = b.iter().map(|tx| tx.id).collect();
    assert_eq!(b_ids, vec![1_007, 1_006]);

    // Same walk over one token with a smaller page
    let mut count = 0;
    let mut start_after = None;
    loop {
        let res: TransfersResponse = suite
            .app
            .wrap()
            .query_wasm_smart(
                &suite.contract,
                &QueryMsg::UnbatchedTransfersByContract {
                    token_contract: CONTRACT_A.to_string(),
                    start_after,
                    limit: Some(400),
                },
            )
            .unwrap();
        count += res.transfers.len();
        match res.next_start_after {
            Some(cursor) => start_after = Some(cursor),
            None => break,
        }
    }
    assert_eq!(count, 1_005);
}

#[test]
fn test_send_rejects_unexpected_funds() {
    let mut suite = setup();

    let res = suite.app.execute_contract(
        suite.sender.clone(),
        suite.contract.clone(),
        &ExecuteMsg::SendToEth {
            dest_address: RECEIVER.to_string(),
            amount: Coin::new(100, denom(CONTRACT_A)),
            fee: Coin::new(2, denom(CONTRACT_A)),
        },
        &[
            Coin::new(102, denom(CONTRACT_A)),
            Coin::new(5, denom(CONTRACT_B)),
        ],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(
        err_str.contains("Unexpected funds"),
        "Expected unexpected funds error, got: {}",
        err_str
    );

    // Rolled back: nothing escrowed, no id consumed
    assert_eq!(
        suite.balance(&suite.sender, CONTRACT_A),
        Uint128::new(INITIAL_BALANCE)
    );
    assert!(suite.locked(CONTRACT_A).is_zero());
    let sender = suite.sender.clone();
    suite.send_to_eth(&sender, CONTRACT_A, 100, 2).unwrap();
    assert_eq!(suite.unbatched_ids(CONTRACT_A), vec![1]);
}

#[test]
fn test_send_rejects_mixed_tokens() {
    let mut suite = setup();

    let res = suite.app.execute_contract(
        suite.sender.clone(),
        suite.contract.clone(),
        &ExecuteMsg::SendToEth {
            dest_address: RECEIVER.to_string(),
            amount: Coin::new(100, denom(CONTRACT_A)),
            fee: Coin::new(2, denom(CONTRACT_B)),
        },
        &[
            Coin::new(100, denom(CONTRACT_A)),
            Coin::new(2, denom(CONTRACT_B)),
        ],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(
        err_str.contains("contract mismatch"),
        "Expected contract mismatch error, got: {}",
        err_str
    );
}

#[test]
fn test_cancel_send_by_sender_only() {
    let mut suite = setup();
    let sender = suite.sender.clone();
    for _ in 0..7 {
        suite.send_to_eth(&sender, CONTRACT_A, 100, 2).unwrap();
    }

    let res = suite.app.execute_contract(
        suite.other.clone(),
        suite.contract.clone(),
        &ExecuteMsg::CancelSendToEth { transaction_id: 7 },
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("Unauthorized"), "got: {}", err_str);
    assert_eq!(suite.unbatched_ids(CONTRACT_A).len(), 7);

    let before = suite.balance(&suite.sender, CONTRACT_A);
    suite
        .app
        .execute_contract(
            suite.sender.clone(),
            suite.contract.clone(),
            &ExecuteMsg::CancelSendToEth { transaction_id: 7 },
            &[],
        )
        .unwrap();

    assert_eq!(
        suite.balance(&suite.sender, CONTRACT_A),
        before + Uint128::new(102)
    );
    assert_eq!(suite.locked(CONTRACT_A), Uint128::new(6 * 102));
    assert!(!suite.unbatched_ids(CONTRACT_A).contains(&7));
}

// ============================================================================
// Batches
// ============================================================================

#[test]
fn test_build_then_cancel_batch() {
    let mut suite = setup();
    suite.seed_pool();

    let res = suite.request_batch(CONTRACT_A).unwrap();
    assert!(has_event(&res, "outgoing_batch_created"));

    let batch = suite.pending_batch(CONTRACT_A).unwrap();
    assert_eq!(batch.batch_nonce, 1);
    assert_eq!(batch.transaction_ids, vec![2, 3, 1, 4]);
    assert_eq!(batch.state, BatchState::Open);
    assert_eq!(batch.batch_timeout, ETH_HEIGHT + BATCH_TIMEOUT_BLOCKS);
    assert_eq!(batch.total_fee.amount, Uint256::from(8u64));
    assert!(batch
        .transactions
        .iter()
        .all(|tx| tx.state == TransferState::InBatch { batch_nonce: 1 }));
    assert!(suite.unbatched_ids(CONTRACT_A).is_empty());

    // Batched sends cannot be withdrawn
    let res = suite.app.execute_contract(
        suite.sender.clone(),
        suite.contract.clone(),
        &ExecuteMsg::CancelSendToEth { transaction_id: 2 },
        &[],
    );
    let err_str = res.unwrap_err().root_cause().to_string();
    assert!(err_str.contains("already in batch"), "got: {}", err_str);

    // Only the admin cancels batches
    let res = suite.app.execute_contract(
        suite.relayer.clone(),
        suite.contract.clone(),
        &ExecuteMsg::CancelBatch { batch_nonce: 1 },
        &[],
    );
    assert!(res.is_err());

    let res = suite.cancel_batch(1).unwrap();
    assert!(has_event(&res, "outgoing_batch_cancelled"));
    assert_eq!(suite.batch(1).unwrap().state, BatchState::Cancelled);
    assert_eq!(suite.unbatched_ids(CONTRACT_A), vec![2, 3, 1, 4]);
    assert_eq!(suite.locked(CONTRACT_A), Uint128::new(414));

    suite.request_batch(CONTRACT_A).unwrap();
    let rebuilt = suite.pending_batch(CONTRACT_A).unwrap();
    assert_eq!(rebuilt.batch_nonce, 2);
    assert_eq!(rebuilt.transaction_ids, vec![2, 3, 1, 4]);
}

#[test]
fn test_pending_batch_guard() {
    let mut suite = setup();
    suite.seed_pool();

    suite.request_batch(CONTRACT_A).unwrap();
    let err_str = suite
        .request_batch(CONTRACT_A)
        .unwrap_err()
        .root_cause()
        .to_string();
    assert!(err_str.contains("still pending"), "got: {}", err_str);

    // A new send does not unlock a second batch either
    let sender = suite.sender.clone();
    suite.send_to_eth(&sender, CONTRACT_A, 50, 9).unwrap();
    assert!(suite.request_batch(CONTRACT_A).is_err());

    suite.cancel_batch(1).unwrap();
    suite.request_batch(CONTRACT_A).unwrap();
    let batch = suite.pending_batch(CONTRACT_A).unwrap();
    assert_eq!(batch.batch_nonce, 2);
    assert_eq!(batch.transaction_ids, vec![5, 2, 3, 1, 4]);
}

#[test]
fn test_request_batch_waits_for_observed_height() {
    let mut suite = setup_unobserved();
    suite.seed_pool();

    let err_str = suite
        .request_batch(CONTRACT_A)
        .unwrap_err()
        .root_cause()
        .to_string();
    assert!(err_str.contains("No Ethereum block height"), "got: {}", err_str);
    assert!(suite.pending_batch(CONTRACT_A).is_none());
    assert_eq!(suite.unbatched_ids(CONTRACT_A), vec![2, 3, 1, 4]);

    suite.end_block(18_000_000);
    suite.request_batch(CONTRACT_A).unwrap();
    let batch = suite.pending_batch(CONTRACT_A).unwrap();
    assert_eq!(batch.batch_timeout, 18_000_000 + BATCH_TIMEOUT_BLOCKS);

    // The next height report leaves the batch Open
    let res = suite.end_block(18_000_001);
    assert!(!has_event(&res, "outgoing_batch_timed_out"));
    assert_eq!(suite.batch(1).unwrap().state, BatchState::Open);
}

#[test]
fn test_request_batch_without_sends() {
    let mut suite = setup();
    let err_str = suite
        .request_batch(CONTRACT_B)
        .unwrap_err()
        .root_cause()
        .to_string();
    assert!(err_str.contains("No transferable"), "got: {}", err_str);
}

#[test]
fn test_batch_execution_burns() {
    let mut suite = setup();
    suite.seed_pool();
    suite.request_batch(CONTRACT_A).unwrap();

    let res = suite
        .app
        .wasm_sudo(
            suite.contract.clone(),
            &SudoMsg::BatchExecuted { batch_nonce: 1 },
        )
        .unwrap();
    assert!(has_event(&res, "outgoing_batch_executed"));

    // Burned, not released
    assert!(suite.balance(&suite.contract, CONTRACT_A).is_zero());
    assert!(suite.locked(CONTRACT_A).is_zero());
    assert_eq!(
        suite.balance(&suite.sender, CONTRACT_A),
        Uint128::new(INITIAL_BALANCE - 414)
    );

    let batch = suite.batch(1).unwrap();
    assert_eq!(batch.state, BatchState::Executed);
    assert_eq!(batch.transaction_ids, vec![2, 3, 1, 4]);
    assert!(batch.transactions.is_empty());
    assert!(suite.unbatched_ids(CONTRACT_A).is_empty());
    assert!(suite.pending_batch(CONTRACT_A).is_none());

    let res: TransferResponse = suite
        .app
        .wrap()
        .query_wasm_smart(&suite.contract, &QueryMsg::Transfer { id: 1 })
        .unwrap();
    assert!(res.transfer.is_none());

    // Terminal
    let res = suite.app.wasm_sudo(
        suite.contract.clone(),
        &SudoMsg::BatchExecuted { batch_nonce: 1 },
    );
    assert!(res.is_err());
    assert!(suite.cancel_batch(1).is_err());
}

#[test]
fn test_end_block_times_out_batches() {
    let mut suite = setup();
    suite.seed_pool();
    let start = ETH_HEIGHT + 20;
    suite.end_block(start);

    suite.request_batch(CONTRACT_A).unwrap();
    let batch = suite.pending_batch(CONTRACT_A).unwrap();
    assert_eq!(batch.batch_timeout, start + BATCH_TIMEOUT_BLOCKS);

    // Not yet past the timeout
    let res = suite.end_block(start + BATCH_TIMEOUT_BLOCKS);
    assert!(!has_event(&res, "outgoing_batch_timed_out"));
    assert_eq!(suite.batch(1).unwrap().state, BatchState::Open);

    let res = suite.end_block(start + BATCH_TIMEOUT_BLOCKS + 1);
    assert!(has_event(&res, "outgoing_batch_timed_out"));
    assert_eq!(suite.batch(1).unwrap().state, BatchState::TimedOut);
    assert_eq!(suite.unbatched_ids(CONTRACT_A), vec![2, 3, 1, 4]);
    assert_eq!(suite.locked(CONTRACT_A), Uint128::new(414));

    // Idempotent
    let res = suite.end_block(start + BATCH_TIMEOUT_BLOCKS + 1);
    assert!(!has_event(&res, "outgoing_batch_timed_out"));
    assert_eq!(suite.unbatched_ids(CONTRACT_A), vec![2, 3, 1, 4]);

    // Refunded sends can be withdrawn again
    suite
        .app
        .execute_contract(
            suite.sender.clone(),
            suite.contract.clone(),
            &ExecuteMsg::CancelSendToEth { transaction_id: 4 },
            &[],
        )
        .unwrap();
    assert_eq!(suite.unbatched_ids(CONTRACT_A), vec![2, 3, 1]);
}

#[test]
fn test_all_batches() {
    let mut suite = setup();
    suite.seed_pool();
    let sender = suite.sender.clone();
    suite.send_to_eth(&sender, CONTRACT_B, 10, 1).unwrap();

    suite.request_batch(CONTRACT_A).unwrap();
    suite.request_batch(CONTRACT_B).unwrap();

    let res: gravity_bridge::msg::BatchesResponse = suite
        .app
        .wrap()
        .query_wasm_smart(
            &suite.contract,
            &QueryMsg::AllBatches {
                start_after: None,
                limit: None,
            },
        )
        .unwrap();
    let nonces: Vec<u64> = res.batches.iter().map(|b| b.batch_nonce).collect();
    assert_eq!(nonces, vec![1, 2]);
    assert_eq!(res.batches[1].token_contract.as_str(), CONTRACT_B);
}

// ============================================================================
// Admin
// ============================================================================

#[test]
fn test_pause_keeps_cancellation_open() {
    let mut suite = setup();
    suite.seed_pool();

    suite
        .app
        .execute_contract(
            suite.admin.clone(),
            suite.contract.clone(),
            &ExecuteMsg::Pause {},
            &[],
        )
        .unwrap();

    let sender = suite.sender.clone();
    let err_str = suite
        .send_to_eth(&sender, CONTRACT_A, 100, 2)
        .unwrap_err()
        .root_cause()
        .to_string();
    assert!(err_str.contains("paused"), "got: {}", err_str);
    assert!(suite.request_batch(CONTRACT_A).is_err());

    suite
        .app
        .execute_contract(
            suite.sender.clone(),
            suite.contract.clone(),
            &ExecuteMsg::CancelSendToEth { transaction_id: 1 },
            &[],
        )
        .unwrap();
    assert_eq!(suite.unbatched_ids(CONTRACT_A), vec![2, 3, 4]);

    suite
        .app
        .execute_contract(
            suite.admin.clone(),
            suite.contract.clone(),
            &ExecuteMsg::Unpause {},
            &[],
        )
        .unwrap();
    suite.request_batch(CONTRACT_A).unwrap();
}
