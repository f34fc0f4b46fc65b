//! Instance-storage layout for the ledger's singletons.

use common::ttl;
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::{accrual::LedgerState, ContractError};

// ── Storage key constants ────────────────────────────────────────────────────

const ASSETS: Symbol = symbol_short!("ASSETS");
const LEDGER: Symbol = symbol_short!("LEDGER");
const TOTAL_STAKED: Symbol = symbol_short!("TOT_STK");

/// The staking/reward asset pair bound at initialization.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AssetPair {
    pub stake_token: Address,
    pub reward_token: Address,
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&ASSETS)
}

pub fn write_assets(env: &Env, assets: &AssetPair) {
    env.storage().instance().set(&ASSETS, assets);
    ttl::extend_instance(env);
}

pub fn read_assets(env: &Env) -> Result<AssetPair, ContractError> {
    env.storage()
        .instance()
        .get(&ASSETS)
        .ok_or(ContractError::NotInitialized)
}

pub fn read_ledger(env: &Env) -> LedgerState {
    env.storage().instance().get(&LEDGER).unwrap_or_default()
}

pub fn write_ledger(env: &Env, state: &LedgerState) {
    env.storage().instance().set(&LEDGER, state);
    ttl::extend_instance(env);
}

pub fn read_total_staked(env: &Env) -> i128 {
    env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0)
}

pub fn write_total_staked(env: &Env, total: i128) {
    env.storage().instance().set(&TOTAL_STAKED, &total);
}
