//! Abstract storage traits for the Agora governance engine.
//!
//! Every storage backend (LMDB, in-memory for testing) implements these
//! traits. The engine depends only on the traits, so tests can swap in a
//! deterministic in-memory store.

pub mod error;
pub mod governance;
pub mod meta;

pub use error::StoreError;
pub use governance::GovernanceStore;
pub use meta::MetaStore;
