//! Ledger Facade.
//!
//! Every mutating operation runs the same pipeline:
//!
//! 1. acquire the reentrancy latch
//! 2. refresh the accumulator against current custody
//! 3. validate
//! 4. stage the caller's position change in memory
//! 5. call the transfer adapter
//! 6. commit ledger state and position, then publish events
//!
//! Nothing is written before step 6, so a refused transfer leaves the ledger
//! exactly as it was before the call.

use common::ReentrancyGuard;
use soroban_sdk::{log, Address, Env};

use crate::{
    accrual::{Accrual, LedgerState},
    custody::AssetTransfer,
    events, position,
    storage::{self, AssetPair},
    ContractError, StakerInfo,
};

pub struct Ledger<'a, C: AssetTransfer> {
    env: &'a Env,
    custody: C,
}

impl<'a, C: AssetTransfer> Ledger<'a, C> {
    pub fn new(env: &'a Env, custody: C) -> Self {
        Self { env, custody }
    }

    // ── Mutating operations ─────────────────────────────────────────────────

    /// Deposit `amount` of the staking asset for `staker`.
    ///
    /// The new units start earning from the current accumulator value; reward
    /// already earned by an existing stake is settled into `accrued` first.
    pub fn stake(&self, staker: &Address, amount: i128) -> Result<(), ContractError> {
        let _guard = self.enter()?;
        let assets = storage::read_assets(self.env)?;
        let (state, accrual) = self.refresh(&assets)?;

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let mut position = position::load(self.env, staker);
        position.settle(state.reward_per_share)?;
        position.amount_staked = position
            .amount_staked
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        let total = storage::read_total_staked(self.env)
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;

        let custody = self.env.current_contract_address();
        if !self
            .custody
            .transfer(&assets.stake_token, staker, &custody, amount)
        {
            log!(self.env, "stake: deposit refused", staker.clone(), amount);
            return Err(ContractError::DepositFailed);
        }

        self.commit(&state, accrual);
        position::save(self.env, staker, &position);
        storage::write_total_staked(self.env, total);
        events::publish_staked(self.env, staker.clone(), amount, position.amount_staked);

        Ok(())
    }

    /// Return `amount` of the staking asset to `staker`.
    ///
    /// Reward earned before the withdrawal stays claimable.
    pub fn unstake(&self, staker: &Address, amount: i128) -> Result<(), ContractError> {
        let _guard = self.enter()?;
        let assets = storage::read_assets(self.env)?;
        let (state, accrual) = self.refresh(&assets)?;

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let mut position = position::load(self.env, staker);
        if amount > position.amount_staked {
            return Err(ContractError::InsufficientStake);
        }

        position.settle(state.reward_per_share)?;
        position.amount_staked -= amount;
        let total = storage::read_total_staked(self.env)
            .checked_sub(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;

        let custody = self.env.current_contract_address();
        if !self
            .custody
            .transfer(&assets.stake_token, &custody, staker, amount)
        {
            log!(self.env, "unstake: withdrawal refused", staker.clone(), amount);
            return Err(ContractError::WithdrawFailed);
        }

        self.commit(&state, accrual);
        position::save(self.env, staker, &position);
        storage::write_total_staked(self.env, total);
        events::publish_unstaked(self.env, staker.clone(), amount, position.amount_staked);

        Ok(())
    }

    /// Pay out everything `staker` has earned. Returns the amount paid.
    pub fn claim(&self, staker: &Address) -> Result<i128, ContractError> {
        let _guard = self.enter()?;
        let assets = storage::read_assets(self.env)?;
        let (mut state, accrual) = self.refresh(&assets)?;

        let mut position = position::load(self.env, staker);
        position.settle(state.reward_per_share)?;
        let reward = position.accrued;
        if reward <= 0 {
            return Err(ContractError::NothingToClaim);
        }
        position.accrued = 0;

        let custody = self.env.current_contract_address();
        if !self
            .custody
            .transfer(&assets.reward_token, &custody, staker, reward)
        {
            log!(self.env, "claim: payout refused", staker.clone(), reward);
            return Err(ContractError::ClaimFailed);
        }

        // The payout left custody; re-baseline so it is not read as a loss.
        state.last_reward_balance = self.custody.balance(&assets.reward_token, &custody);

        self.commit(&state, accrual);
        position::save(self.env, staker, &position);
        events::publish_reward_claimed(self.env, staker.clone(), reward);

        Ok(reward)
    }

    // ── Queries ─────────────────────────────────────────────────────────────

    /// Reward `user` could claim right now, including reward that has arrived
    /// in custody since the last refresh. Never mutates state.
    pub fn pending_reward(&self, user: &Address) -> i128 {
        position::load(self.env, user)
            .pending(self.projected_reward_per_share())
            .unwrap_or(i128::MAX)
    }

    pub fn staker_info(&self, user: &Address) -> StakerInfo {
        let position = position::load(self.env, user);
        StakerInfo {
            staked: position.amount_staked,
            pending_rewards: position
                .pending(self.projected_reward_per_share())
                .unwrap_or(i128::MAX),
        }
    }

    // ── Internal helpers ────────────────────────────────────────────────────

    fn enter(&self) -> Result<ReentrancyGuard, ContractError> {
        ReentrancyGuard::acquire(self.env).map_err(|err| {
            log!(self.env, "nested mutating call rejected");
            ContractError::from(err)
        })
    }

    fn custody_balances(&self, assets: &AssetPair) -> (i128, i128) {
        let custody = self.env.current_contract_address();
        (
            self.custody.balance(&assets.reward_token, &custody),
            self.custody.balance(&assets.stake_token, &custody),
        )
    }

    /// Refreshed copy of the stored ledger state. Not persisted.
    fn refresh(&self, assets: &AssetPair) -> Result<(LedgerState, Accrual), ContractError> {
        let mut state = storage::read_ledger(self.env);
        let (reward_custody, stake_custody) = self.custody_balances(assets);
        let accrual = state.refresh(reward_custody, stake_custody)?;
        Ok((state, accrual))
    }

    fn projected_reward_per_share(&self) -> i128 {
        let stored = storage::read_ledger(self.env);
        let Ok(assets) = storage::read_assets(self.env) else {
            return stored.reward_per_share;
        };

        let mut projected = stored.clone();
        let (reward_custody, stake_custody) = self.custody_balances(&assets);
        match projected.refresh(reward_custody, stake_custody) {
            Ok(_) => projected.reward_per_share,
            Err(_) => stored.reward_per_share,
        }
    }

    fn commit(&self, state: &LedgerState, accrual: Accrual) {
        storage::write_ledger(self.env, state);

        match accrual {
            Accrual::Idle => {}
            Accrual::Distributed { delta, increment } => {
                events::publish_reward_accrued(self.env, delta, increment, state.reward_per_share);
            }
            Accrual::Shortfall { expected, observed } => {
                log!(self.env, "reward custody shortfall", expected, observed);
                events::publish_reward_shortfall(self.env, expected, observed);
            }
        }
    }
}
