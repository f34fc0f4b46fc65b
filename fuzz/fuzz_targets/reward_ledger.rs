#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use reward_ledger::{RewardLedgerContract, RewardLedgerContractClient};
use soroban_sdk::{
    testutils::Address as _,
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Stake { user: u8, amount: u32 },
    Unstake { user: u8, amount: u32 },
    Claim { user: u8 },
    Deliver { amount: u32 },
}

const USERS: usize = 4;

fuzz_target!(|actions: Vec<FuzzAction>| {
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
        StellarAssetClient::new(&env, &stake_token).mint(user, &(u32::MAX as i128));
    }

    let stake = TokenClient::new(&env, &stake_token);
    let reward = TokenClient::new(&env, &reward_token);

    for action in actions {
        let rps_before = client.get_ledger_state().reward_per_share;

        match action {
            FuzzAction::Stake { user, amount } => {
                let _ = client.try_stake(&users[user as usize % USERS], &(amount as i128));
            }
            FuzzAction::Unstake { user, amount } => {
                let _ = client.try_unstake(&users[user as usize % USERS], &(amount as i128));
            }
            FuzzAction::Claim { user } => {
                let _ = client.try_claim(&users[user as usize % USERS]);
            }
            FuzzAction::Deliver { amount } => {
                if amount > 0 {
                    StellarAssetClient::new(&env, &reward_token).mint(&ledger, &(amount as i128));
                }
            }
        }

        // The accumulator never moves backwards.
        assert!(client.get_ledger_state().reward_per_share >= rps_before);

        // Recorded stake always matches custody.
        let staked: i128 = users.iter().map(|u| client.get_staked(u)).sum();
        assert_eq!(staked, client.get_total_staked());
        assert_eq!(staked, stake.balance(&ledger));

        // Never owe more reward than is held.
        let owed: i128 = users.iter().map(|u| client.pending_reward(u)).sum();
        assert!(owed <= reward.balance(&ledger));

        assert!(!client.is_locked());
    }
});
