//! Property-based tests for the ledger.
//!
//! - Property 1: Conservation of value
//! - Property 2: Atomicity of rejected transfers
//! - Property 3: Recipient net amount

use helptoken_shared::{Amount, HolderId};
use proptest::prelude::*;

use super::error::LedgerError;
use super::fee::{FeeSchedule, SurplusPolicy};
use super::service::Ledger;
use super::types::TokenMetadata;
use crate::reward_pool::RewardPool;

const HOLDERS: usize = 4;

/// One step of a random transfer sequence, as indexes into a holder table.
#[derive(Debug, Clone)]
struct Step {
    sender: usize,
    recipient: usize,
    amount: Amount,
}

fn step_strategy() -> impl Strategy<Value = Step> {
    (0..HOLDERS, 0..HOLDERS, 0u128..50_000).prop_map(|(sender, recipient, amount)| Step {
        sender,
        recipient,
        amount,
    })
}

fn surplus_strategy(beneficiary: HolderId) -> impl Strategy<Value = SurplusPolicy> {
    prop_oneof![
        Just(SurplusPolicy::Beneficiary(beneficiary)),
        Just(SurplusPolicy::Burn),
    ]
}

fn setup(supply: Amount, surplus: SurplusPolicy) -> (Ledger, RewardPool) {
    let ledger = Ledger::deploy(
        HolderId::new(),
        supply,
        TokenMetadata::default(),
        FeeSchedule::standard(surplus),
    );
    let pool = RewardPool::deploy(ledger.address());
    (ledger, pool)
}

fn accounted(ledger: &Ledger, pool: &RewardPool) -> Amount {
    ledger.holders().map(|(_, balance)| balance).sum::<Amount>() + pool.balance() + ledger.burned()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // =========================================================================
    // Property 1: Conservation of value
    // =========================================================================

    /// *For any* sequence of transfers, successful or not, the sum of all
    /// balances plus the pool plus burned units SHALL equal the total supply.
    #[test]
    fn prop_value_is_conserved(
        supply in 1u128..200_000,
        surplus in surplus_strategy(HolderId::new()),
        steps in prop::collection::vec(step_strategy(), 1..40),
    ) {
        let (mut ledger, mut pool) = setup(supply, surplus);
        let mut holders = vec![ledger.deployer()];
        holders.extend((1..HOLDERS).map(|_| HolderId::new()));

        for step in steps {
            let _ = ledger.transfer(
                &mut pool,
                holders[step.sender],
                holders[step.recipient],
                step.amount,
            );
            prop_assert_eq!(accounted(&ledger, &pool), ledger.total_supply());
            prop_assert!(ledger.audit(&pool).is_ok());
        }
        prop_assert_eq!(ledger.total_supply(), supply);
    }

    // =========================================================================
    // Property 2: Atomicity of rejected transfers
    // =========================================================================

    /// *For any* transfer exceeding the sender's balance, the ledger and pool
    /// SHALL be unchanged and the error SHALL report both amounts.
    #[test]
    fn prop_overspend_is_atomic(
        supply in 0u128..1_000_000,
        excess in 1u128..1_000_000,
    ) {
        let (mut ledger, mut pool) = setup(supply, SurplusPolicy::Burn);
        let deployer = ledger.deployer();
        let ledger_before = ledger.clone();
        let pool_before = pool.clone();

        let result = ledger.transfer(&mut pool, deployer, HolderId::new(), supply + excess);

        prop_assert_eq!(
            result.unwrap_err(),
            LedgerError::InsufficientBalance { available: supply, requested: supply + excess }
        );
        prop_assert_eq!(ledger, ledger_before);
        prop_assert_eq!(pool, pool_before);
    }

    // =========================================================================
    // Property 3: Recipient net amount
    // =========================================================================

    /// *For any* successful transfer of `amount`, the sender SHALL lose
    /// `amount`, the recipient SHALL gain `amount - amount*4/100` and the
    /// pool SHALL gain `amount*2/100`.
    #[test]
    fn prop_fee_split_matches_percentages(
        supply in 1u128..10_000_000,
        amount_seed in any::<u128>(),
    ) {
        let amount = amount_seed % supply + 1;
        let (mut ledger, mut pool) = setup(supply, SurplusPolicy::Burn);
        let deployer = ledger.deployer();
        let recipient = HolderId::new();

        ledger.transfer(&mut pool, deployer, recipient, amount).unwrap();

        prop_assert_eq!(ledger.balance_of(deployer), supply - amount);
        prop_assert_eq!(ledger.balance_of(recipient), amount - amount * 4 / 100);
        prop_assert_eq!(pool.balance(), amount * 2 / 100);
    }
}
