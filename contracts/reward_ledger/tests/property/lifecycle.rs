#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based state machine tests for the RewardLedger contract.
//!
//! Random sequences of stake / unstake / claim / reward delivery are replayed
//! against real token contracts. After every step:
//! - `reward_per_share` has not decreased
//! - the sum of positions equals `get_total_staked` and the stake custody
//! - the sum of pending rewards never exceeds the reward custody
//! - rejected operations leave every position unchanged

use proptest::prelude::*;
use reward_ledger::{ContractError, Position, RewardLedgerContract, RewardLedgerContractClient};
use soroban_sdk::testutils::Address as _;
use soroban_sdk::token::{Client as TokenClient, StellarAssetClient};
use soroban_sdk::{Address, Env};

const USERS: usize = 3;
const FUNDING: i128 = 1_000_000;

// ── Helpers ───────────────────────────────────────────────────────────────────

struct World {
    env: Env,
    client: RewardLedgerContractClient<'static>,
    ledger: Address,
    stake_token: Address,
    reward_token: Address,
    users: Vec<Address>,
}

fn setup() -> World {
    let env = Env::default();
    env.mock_all_auths();

    let stake_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let ledger = env.register(RewardLedgerContract, ());
    let client = RewardLedgerContractClient::new(&env, &ledger);
    client.initialize(&stake_token, &reward_token);

    let users: Vec<Address> = (0..USERS).map(|_| Address::generate(&env)).collect();
    for user in &users {
        StellarAssetClient::new(&env, &stake_token).mint(user, &FUNDING);
    }

    World {
        env,
        client,
        ledger,
        stake_token,
        reward_token,
        users,
    }
}

#[derive(Clone, Debug)]
enum Op {
    Stake { user: usize, amount: i128 },
    Unstake { user: usize, amount: i128 },
    Claim { user: usize },
    Deliver { amount: i128 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..USERS, 0i128..=20_000).prop_map(|(user, amount)| Op::Stake { user, amount }),
        (0..USERS, 0i128..=20_000).prop_map(|(user, amount)| Op::Unstake { user, amount }),
        (0..USERS).prop_map(|user| Op::Claim { user }),
        (1i128..=50_000).prop_map(|amount| Op::Deliver { amount }),
    ]
}

fn positions(world: &World) -> Vec<Position> {
    world
        .users
        .iter()
        .map(|user| world.client.get_position(user))
        .collect()
}

// ── proptest! blocks ──────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_ledger_invariants_hold(ops in prop::collection::vec(op_strategy(), 1..24)) {
        let world = setup();
        let stake = TokenClient::new(&world.env, &world.stake_token);
        let reward = TokenClient::new(&world.env, &world.reward_token);

        for op in ops {
            let rps_before = world.client.get_ledger_state().reward_per_share;
            let before = positions(&world);

            let rejected = match op {
                Op::Stake { user, amount } => {
                    world.client.try_stake(&world.users[user], &amount).is_err()
                }
                Op::Unstake { user, amount } => {
                    world.client.try_unstake(&world.users[user], &amount).is_err()
                }
                Op::Claim { user } => world.client.try_claim(&world.users[user]).is_err(),
                Op::Deliver { amount } => {
                    StellarAssetClient::new(&world.env, &world.reward_token)
                        .mint(&world.ledger, &amount);
                    false
                }
            };

            if rejected {
                prop_assert_eq!(&positions(&world), &before);
            }

            prop_assert!(world.client.get_ledger_state().reward_per_share >= rps_before);

            let staked: i128 = positions(&world).iter().map(|p| p.amount_staked).sum();
            prop_assert_eq!(staked, world.client.get_total_staked());
            prop_assert_eq!(staked, stake.balance(&world.ledger));

            let owed: i128 = world
                .users
                .iter()
                .map(|user| world.client.pending_reward(user))
                .sum();
            prop_assert!(owed <= reward.balance(&world.ledger), "ledger insolvent");
            prop_assert!(!world.client.is_locked());
        }
    }

    /// Everything earned before an unstake is still claimable after it.
    #[test]
    fn prop_unstake_preserves_pending(
        staked in 1i128..=FUNDING,
        delivered in 0i128..=1_000_000,
        fraction in 1i128..=100,
    ) {
        let world = setup();
        let user = &world.users[0];

        world.client.stake(user, &staked);
        if delivered > 0 {
            StellarAssetClient::new(&world.env, &world.reward_token)
                .mint(&world.ledger, &delivered);
        }

        let before = world.client.pending_reward(user);
        let amount = (staked * fraction / 100).max(1);
        world.client.unstake(user, &amount);

        prop_assert_eq!(world.client.get_staked(user), staked - amount);
        prop_assert_eq!(world.client.pending_reward(user), before);
    }

    /// A claim zeroes the pending reward; an immediate second claim is rejected.
    #[test]
    fn prop_claim_is_idempotent(
        staked in 1i128..=FUNDING,
        delivered in 2i128..=1_000_000,
    ) {
        let world = setup();
        let user = &world.users[0];

        world.client.stake(user, &staked);
        StellarAssetClient::new(&world.env, &world.reward_token)
            .mint(&world.ledger, &delivered);

        // A sole staker owns every delivery, less at most one unit of truncation.
        let owed = world.client.pending_reward(user);
        prop_assert!(owed <= delivered && delivered - owed <= 1);

        prop_assert_eq!(world.client.claim(user), owed);
        prop_assert_eq!(world.client.pending_reward(user), 0);
        match world.client.try_claim(user) {
            Err(Ok(e)) => prop_assert_eq!(e, ContractError::NothingToClaim),
            _ => prop_assert!(false, "Expected NothingToClaim error"),
        }
    }
}
