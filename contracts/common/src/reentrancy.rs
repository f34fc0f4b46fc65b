//! # Reentrancy Guard
//!
//! A single per-contract latch stored in instance storage. Every mutating
//! entrypoint acquires it first and holds it for the rest of the call:
//!
//! ```ignore
//! let _guard = ReentrancyGuard::acquire(&env)?;
//! // ... refresh, validate, mutate, call out to the token contract
//! ```
//!
//! The latch is released when the guard is dropped, which covers early
//! returns through `?` as well as the success path. While it is held, any
//! further `acquire` on the same contract fails with
//! [`CommonError::ReentrantCall`].

use soroban_sdk::{symbol_short, Env, Symbol};

use crate::CommonError;

// ── Storage key ──────────────────────────────────────────────────────────────

const LOCK: Symbol = symbol_short!("RE_LOCK");

// ── Guard ────────────────────────────────────────────────────────────────────

/// Held for the duration of one mutating call. Releases the latch on drop.
#[must_use = "the latch is released as soon as the guard is dropped"]
pub struct ReentrancyGuard {
    env: Env,
}

impl ReentrancyGuard {
    /// Flip the latch from free to busy, or fail if it is already busy.
    pub fn acquire(env: &Env) -> Result<Self, CommonError> {
        if is_locked(env) {
            return Err(CommonError::ReentrantCall);
        }
        env.storage().instance().set(&LOCK, &true);
        Ok(Self { env: env.clone() })
    }
}

impl Drop for ReentrancyGuard {
    fn drop(&mut self) {
        self.env.storage().instance().remove(&LOCK);
    }
}

/// Returns `true` while some call holds the latch.
pub fn is_locked(env: &Env) -> bool {
    env.storage().instance().get(&LOCK).unwrap_or(false)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
