//! Storage TTL policy shared by all contracts.
//!
//! Instance storage is bumped as a whole; persistent entries are bumped per key
//! whenever they are written.

use soroban_sdk::{Env, IntoVal, Val};

/// Ledgers per day at a 5 second close time.
pub const DAY_IN_LEDGERS: u32 = 17_280;

/// Entries are bumped once their remaining TTL drops below this many ledgers.
pub const TTL_THRESHOLD: u32 = 30 * DAY_IN_LEDGERS;

/// Target TTL after a bump.
pub const TTL_EXTEND_TO: u32 = 60 * DAY_IN_LEDGERS;

/// Extends the TTL of the calling contract's instance storage.
pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Extends the TTL of a single persistent entry.
pub fn extend_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
