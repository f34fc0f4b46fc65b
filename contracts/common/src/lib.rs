//! Shared utilities and error types for the reward ledger contracts.
//!
//! This crate provides:
//! - [`CommonError`] — error codes raised by the shared helpers.
//! - [`reentrancy`] — a scoped latch rejecting nested mutating calls.
//! - [`ttl`] — storage time-to-live constants and extension helpers.
//!
//! Contract-specific errors keep their own enums and convert from
//! [`CommonError`] where a shared helper can fail.

#![no_std]

use soroban_sdk::contracterror;

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod reentrancy;
pub mod ttl;

pub use reentrancy::ReentrancyGuard;

// ── Shared error enum ────────────────────────────────────────────────────────

/// Error codes shared by every contract in the workspace.
///
/// # Code ranges
/// | Range   | Purpose                        |
/// |---------|--------------------------------|
/// | 40 – 49 | Contract state                 |
/// | 100+    | Reserved for contract-specific |
#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum CommonError {
    // ── Contract state (40–49) ───────────────────────────────
    /// A mutating entrypoint was entered while another one was still running.
    ReentrantCall = 40,
}
