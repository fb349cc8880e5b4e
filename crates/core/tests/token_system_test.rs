//! Integration tests for a deployed token system.
//!
//! Exercises the public API the way an external caller would: deploy from
//! configuration, then observe balances, pool and supply.

use helptoken_core::{LedgerError, TokenSystem};
use helptoken_shared::{AppConfig, HolderId};

fn deploy() -> (TokenSystem, HolderId, HolderId) {
    let mut config = AppConfig::default();
    config.token.total_supply = 1_000_000;
    let system = TokenSystem::deploy(&config).expect("default configuration deploys");
    let deployer = system.deployer();
    (system, deployer, HolderId::new())
}

// ============================================================================
// Test: All tokens start in the deployer's account
// ============================================================================

#[test]
fn test_all_tokens_in_deployer_account() {
    let (system, deployer, _) = deploy();
    assert_eq!(system.balance_of(deployer), system.total_supply());
}

// ============================================================================
// Test: Tokens can be sent between accounts
// ============================================================================

#[test]
fn test_send_tokens_between_accounts() {
    let (mut system, deployer, recipient) = deploy();
    let total_supply = system.total_supply();
    let send_tokens = 100;

    system
        .transfer(deployer, recipient, send_tokens)
        .expect("transfer within balance succeeds");

    assert_eq!(system.balance_of(deployer), total_supply - send_tokens);
    assert_eq!(
        system.balance_of(recipient),
        send_tokens - send_tokens * 4 / 100
    );
    assert_eq!(system.reward_pool(), send_tokens * 2 / 100);
    assert!(system.audit().is_ok());
}

// ============================================================================
// Test: Cannot send more tokens than available
// ============================================================================

#[test]
fn test_cannot_send_more_than_available() {
    let (mut system, deployer, recipient) = deploy();
    let balance_of_deployer = system.balance_of(deployer);

    let result = system.transfer(deployer, recipient, balance_of_deployer + 1);

    assert!(matches!(
        result,
        Err(LedgerError::InsufficientBalance { .. })
    ));
    assert_eq!(system.balance_of(deployer), balance_of_deployer);
    assert_eq!(system.balance_of(recipient), 0);
    assert_eq!(system.reward_pool(), 0);
}

// ============================================================================
// Test: Zero-amount transfers are rejected
// ============================================================================

#[test]
fn test_zero_amount_transfer_rejected() {
    let (mut system, deployer, recipient) = deploy();
    let before = system.snapshot();

    let result = system.transfer(deployer, recipient, 0);

    assert!(matches!(result, Err(LedgerError::InvalidAmount)));
    assert_eq!(system.snapshot(), before);
}

// ============================================================================
// Test: Value is conserved across a chain of transfers
// ============================================================================

#[test]
fn test_chain_of_transfers_conserves_value() {
    let (mut system, deployer, first) = deploy();
    let second = HolderId::new();

    system.transfer(deployer, first, 10_000).unwrap();
    system.transfer(first, second, 5_000).unwrap();
    system.transfer(second, deployer, 1_000).unwrap();

    let snapshot = system.snapshot();
    let held: u128 = snapshot.holders.iter().map(|h| h.balance).sum();
    assert_eq!(held + snapshot.reward_pool + snapshot.burned, snapshot.total_supply);
    assert_eq!(snapshot.transfer_count, 3);
    assert_eq!(system.ledger().events().len(), 3);
}
