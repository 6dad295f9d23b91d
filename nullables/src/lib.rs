//! Nullable infrastructure for deterministic testing.
//!
//! The engine's external dependencies (clock, storage, token ledger) are
//! abstracted behind traits or explicit arguments. This crate provides
//! test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod ledger;
pub mod store;

pub use clock::NullClock;
pub use ledger::NullTokenLedger;
pub use store::NullStore;
