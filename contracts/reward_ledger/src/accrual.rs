//! Accrual Engine.
//!
//! The ledger never iterates over stakers. It keeps one accumulator,
//! `reward_per_share`, and bumps it whenever the reward-asset custody is
//! observed to have grown:
//!
//! ```text
//! delta     = reward_custody − last_reward_balance
//! increment = delta × ACC_PRECISION / stake_custody
//! ```
//!
//! A staker's share of every delta is then recovered lazily at settlement time
//! from the difference between the accumulator and their `reward_debt`.

use soroban_sdk::contracttype;

use crate::ContractError;

/// Fixed-point scale of `reward_per_share` (10^19, "ten ether").
pub const ACC_PRECISION: i128 = 10_000_000_000_000_000_000;

/// Global ledger state, stored as a single instance-storage value so the
/// accumulator and its baseline are always read and written together.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LedgerState {
    /// Cumulative reward per staked unit since inception, scaled by [`ACC_PRECISION`].
    pub reward_per_share: i128,
    /// Reward custody observed at the end of the last refresh or claim.
    pub last_reward_balance: i128,
}

/// What a single refresh did to the ledger state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Accrual {
    /// Nothing staked, nothing in custody, or no new reward since the last look.
    Idle,
    /// Custody grew by `delta`; the accumulator advanced by `increment`.
    Distributed { delta: i128, increment: i128 },
    /// Custody fell below the baseline outside of a tracked claim. The
    /// baseline is clamped to `observed` and nothing is distributed.
    Shortfall { expected: i128, observed: i128 },
}

impl LedgerState {
    /// Fold the current custody balances into the accumulator.
    ///
    /// `reward_custody` and `stake_custody` are the ledger's own balances of
    /// the reward and staking assets. The accumulator only ever grows.
    pub fn refresh(
        &mut self,
        reward_custody: i128,
        stake_custody: i128,
    ) -> Result<Accrual, ContractError> {
        // Clamp before the idle check so a drain to zero still moves the baseline.
        if reward_custody < self.last_reward_balance {
            let expected = self.last_reward_balance;
            self.last_reward_balance = reward_custody;
            return Ok(Accrual::Shortfall {
                expected,
                observed: reward_custody,
            });
        }

        if reward_custody <= 0 || stake_custody <= 0 {
            return Ok(Accrual::Idle);
        }

        // reward_custody >= last_reward_balance >= 0
        let delta = reward_custody - self.last_reward_balance;
        if delta == 0 {
            return Ok(Accrual::Idle);
        }

        let increment = delta
            .checked_mul(ACC_PRECISION)
            .ok_or(ContractError::ArithmeticOverflow)?
            / stake_custody;

        self.reward_per_share = self
            .reward_per_share
            .checked_add(increment)
            .ok_or(ContractError::ArithmeticOverflow)?;
        self.last_reward_balance = reward_custody;

        Ok(Accrual::Distributed { delta, increment })
    }
}

// ── Unit tests ──────────────────────────────────────────────────────────────
