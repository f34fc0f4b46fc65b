#![no_std]

pub mod accrual;
pub mod custody;
pub mod events;
pub mod ledger;
pub mod position;
pub mod storage;

use common::{reentrancy, CommonError};
use soroban_sdk::{contract, contractimpl, contracttype, Address, Env};

pub use accrual::{LedgerState, ACC_PRECISION};
pub use custody::{AssetTransfer, TokenCustody};
pub use ledger::Ledger;
pub use position::Position;

use storage::AssetPair;

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    TokensIdentical = 3,
    /// Zero or negative amount.
    InvalidAmount = 4,
    InsufficientStake = 5,
    NothingToClaim = 6,
    DepositFailed = 7,
    WithdrawFailed = 8,
    ClaimFailed = 9,
    Reentrancy = 10,
    ArithmeticOverflow = 11,
}

impl From<CommonError> for ContractError {
    fn from(err: CommonError) -> Self {
        match err {
            CommonError::ReentrantCall => ContractError::Reentrancy,
        }
    }
}

// ── Public-facing types (re-exported for test consumers) ─────────────────────

/// Snapshot of a user's staking position returned by `get_staker_info`.
#[contracttype]
#[derive(Clone, Debug)]
pub struct StakerInfo {
    pub staked: i128,
    pub pending_rewards: i128,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct RewardLedgerContract;

#[contractimpl]
impl RewardLedgerContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bind the asset pair. Can only be done once.
    ///
    /// * `stake_token`  – token users deposit to earn a share.
    /// * `reward_token` – token distributed to stakers as it arrives in custody.
    pub fn initialize(
        env: Env,
        stake_token: Address,
        reward_token: Address,
    ) -> Result<(), ContractError> {
        if storage::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        if stake_token == reward_token {
            return Err(ContractError::TokensIdentical);
        }

        storage::write_assets(
            &env,
            &AssetPair {
                stake_token: stake_token.clone(),
                reward_token: reward_token.clone(),
            },
        );
        // LEDGER and TOT_STK start at zero; absent keys read as defaults.

        events::publish_initialized(&env, stake_token, reward_token);

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` stake tokens.
    pub fn stake(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        staker.require_auth();
        Self::ledger(&env).stake(&staker, amount)
    }

    /// Withdraw `amount` stake tokens. Unclaimed reward is kept.
    pub fn unstake(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        staker.require_auth();
        Self::ledger(&env).unstake(&staker, amount)
    }

    // ── Rewards ─────────────────────────────────────────────────────────────

    /// Claim all pending reward for `staker`. Returns the amount transferred.
    pub fn claim(env: Env, staker: Address) -> Result<i128, ContractError> {
        staker.require_auth();
        Self::ledger(&env).claim(&staker)
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Real-time pending reward for `user`, without mutating state.
    pub fn pending_reward(env: Env, user: Address) -> i128 {
        Self::ledger(&env).pending_reward(&user)
    }

    /// Return the combined staking position for a user.
    pub fn get_staker_info(env: Env, user: Address) -> StakerInfo {
        Self::ledger(&env).staker_info(&user)
    }

    pub fn get_position(env: Env, user: Address) -> Position {
        position::load(&env, &user)
    }

    /// Return the user's current staked balance.
    pub fn get_staked(env: Env, user: Address) -> i128 {
        position::load(&env, &user).amount_staked
    }

    /// Return the sum of all currently staked tokens.
    pub fn get_total_staked(env: Env) -> i128 {
        storage::read_total_staked(&env)
    }

    /// Accumulator and reward baseline as of the last committed operation.
    pub fn get_ledger_state(env: Env) -> LedgerState {
        storage::read_ledger(&env)
    }

    pub fn get_stake_token(env: Env) -> Result<Address, ContractError> {
        storage::read_assets(&env).map(|assets| assets.stake_token)
    }

    pub fn get_reward_token(env: Env) -> Result<Address, ContractError> {
        storage::read_assets(&env).map(|assets| assets.reward_token)
    }

    pub fn is_initialized(env: Env) -> bool {
        storage::is_initialized(&env)
    }

    /// `true` only while a mutating call is in flight.
    pub fn is_locked(env: Env) -> bool {
        reentrancy::is_locked(&env)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn ledger(env: &Env) -> Ledger<'_, TokenCustody> {
        Ledger::new(env, TokenCustody::new(env))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
