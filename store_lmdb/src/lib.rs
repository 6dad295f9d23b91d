//! LMDB storage backend for the Agora governance engine.
//!
//! Implements the storage traits from `agora-store` using the `heed` LMDB
//! bindings. Each logical table (proposals, votes, tallies, meta) maps to
//! one named database within a single environment.

pub mod environment;
pub mod error;
pub mod governance;
pub mod meta;

pub use environment::LmdbEnvironment;
pub use error::LmdbError;
