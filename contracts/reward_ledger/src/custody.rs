//! Asset Transfer Adapter.
//!
//! The ledger moves and inspects assets only through [`AssetTransfer`]. The
//! adapter reports failure instead of aborting, so the ledger can turn a
//! refused transfer into its own typed error.

use soroban_sdk::{token, Address, Env};

pub trait AssetTransfer {
    /// Balance of `asset` held by `holder`.
    fn balance(&self, asset: &Address, holder: &Address) -> i128;

    /// Move `amount` of `asset` from `from` to `to`. Returns `true` only if
    /// the move happened.
    fn transfer(&self, asset: &Address, from: &Address, to: &Address, amount: i128) -> bool;
}

impl<T: AssetTransfer + ?Sized> AssetTransfer for &T {
    fn balance(&self, asset: &Address, holder: &Address) -> i128 {
        (**self).balance(asset, holder)
    }

    fn transfer(&self, asset: &Address, from: &Address, to: &Address, amount: i128) -> bool {
        (**self).transfer(asset, from, to, amount)
    }
}

/// Adapter over Soroban token contracts (SAC or any token-interface contract).
pub struct TokenCustody {
    env: Env,
}

impl TokenCustody {
    pub fn new(env: &Env) -> Self {
        Self { env: env.clone() }
    }
}

impl AssetTransfer for TokenCustody {
    fn balance(&self, asset: &Address, holder: &Address) -> i128 {
        token::Client::new(&self.env, asset).balance(holder)
    }

    fn transfer(&self, asset: &Address, from: &Address, to: &Address, amount: i128) -> bool {
        matches!(
            token::Client::new(&self.env, asset).try_transfer(from, to, &amount),
            Ok(Ok(()))
        )
    }
}
