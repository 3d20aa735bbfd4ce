//! Data-driven encounter content and loaders.
//!
//! This crate reads static battle content from RON/TOML data files:
//! - Ability catalogs (RON)
//! - Opponent rosters with their repertoires (RON)
//! - Player sheets (RON)
//! - Battle configuration (TOML)
//!
//! Content is resolved against `battle-core` types at load time and never
//! appears in session state by reference.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    AbilityLoader, AbilityRef, ConfigLoader, ContentFactory, LoadResult, OpponentLoader,
    OpponentRoster, OpponentSpec, PlayerLoader, PlayerSpec,
};
