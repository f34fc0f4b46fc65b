#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for the accrual math, independent of any contract.
//!
//! Invariants tested:
//! - `reward_per_share` never decreases across any sequence of refreshes
//! - A delivery split across stakers never over-pays anyone, and the total
//!   truncation loss is at most one unit per staker
//! - Settling a position never changes what it is owed

use proptest::prelude::*;
use reward_ledger::{LedgerState, Position, ACC_PRECISION};

proptest! {
    /// Whatever the custody readings, the accumulator only moves up.
    #[test]
    fn prop_reward_per_share_monotonic(
        readings in prop::collection::vec((0i128..=1_000_000_000, 0i128..=1_000_000_000), 1..32)
    ) {
        let mut state = LedgerState::default();
        for (reward_custody, stake_custody) in readings {
            let before = state.reward_per_share;
            state.refresh(reward_custody, stake_custody).unwrap();
            prop_assert!(state.reward_per_share >= before);
        }
    }

    /// Delivering `delivered` over stakes `stakes` pays each staker at most
    /// their exact share and loses at most one unit per staker overall.
    #[test]
    fn prop_proportional_split(
        stakes in prop::collection::vec(1i128..=1_000_000_000, 1..8),
        delivered in 0i128..=1_000_000_000_000,
    ) {
        let total: i128 = stakes.iter().sum();
        let mut state = LedgerState::default();
        state.refresh(delivered, total).unwrap();

        let mut paid = 0i128;
        for stake in &stakes {
            let position = Position { amount_staked: *stake, ..Position::default() };
            let share = position.pending(state.reward_per_share).unwrap();
            prop_assert!(share >= 0);
            prop_assert!(share * total <= delivered * stake, "staker over-paid");
            paid += share;
        }

        prop_assert!(paid <= delivered);
        prop_assert!(delivered - paid <= stakes.len() as i128);
    }

    /// Settlement moves reward into `accrued` without changing the amount owed.
    #[test]
    fn prop_settle_preserves_pending(
        amount_staked in 0i128..=1_000_000_000,
        reward_debt in 0i128..=ACC_PRECISION,
        growth in 0i128..=ACC_PRECISION,
        accrued in 0i128..=1_000_000,
    ) {
        let mut position = Position { amount_staked, reward_debt, accrued };
        let rps = reward_debt + growth;
        let owed = position.pending(rps).unwrap();

        position.settle(rps).unwrap();

        prop_assert_eq!(position.reward_debt, rps);
        prop_assert_eq!(position.accrued, owed);
        prop_assert_eq!(position.pending(rps), Some(owed));
    }
}
