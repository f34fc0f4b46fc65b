//! Position Store.
//!
//! One [`Position`] per user in persistent storage, created on first stake
//! and never removed. An absent entry reads as the all-zero position.

use common::ttl;
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::{accrual::ACC_PRECISION, ContractError};

const POSITION: Symbol = symbol_short!("POS");

/// A single user's stake and reward bookkeeping.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Position {
    /// Staking-asset units attributed to this user.
    pub amount_staked: i128,
    /// `reward_per_share` at the user's last settlement.
    pub reward_debt: i128,
    /// Reward settled at earlier stake/unstake calls and not yet claimed.
    pub accrued: i128,
}

impl Position {
    /// Reward owed to this position if the accumulator stood at `reward_per_share`.
    ///
    /// ```text
    /// pending = accrued + (reward_per_share − reward_debt) × amount_staked / ACC_PRECISION
    /// ```
    ///
    /// Returns `None` on overflow.
    pub fn pending(&self, reward_per_share: i128) -> Option<i128> {
        let growth = reward_per_share.checked_sub(self.reward_debt)?;
        let fresh = growth.checked_mul(self.amount_staked)? / ACC_PRECISION;
        self.accrued.checked_add(fresh)
    }

    /// Move everything earned up to `reward_per_share` into `accrued` and
    /// re-sync the debt, so the stake can change without losing reward.
    pub fn settle(&mut self, reward_per_share: i128) -> Result<(), ContractError> {
        self.accrued = self
            .pending(reward_per_share)
            .ok_or(ContractError::ArithmeticOverflow)?;
        self.reward_debt = reward_per_share;
        Ok(())
    }
}

fn position_key(user: &Address) -> (Symbol, Address) {
    (POSITION, user.clone())
}

pub fn load(env: &Env, user: &Address) -> Position {
    env.storage()
        .persistent()
        .get(&position_key(user))
        .unwrap_or_default()
}

pub fn save(env: &Env, user: &Address, position: &Position) {
    let key = position_key(user);
    env.storage().persistent().set(&key, position);
    ttl::extend_persistent(env, &key);
}
