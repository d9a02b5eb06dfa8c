//! Filter and validator chains
//!
//! Chains hold their steps behind `Arc`, so cloning a chain (as collections do
//! for every item) shares the configured steps and only copies the per-call
//! state.

pub mod filter_chain;
pub mod validator_chain;

pub use filter_chain::{DEFAULT_PRIORITY, Filter, FilterChain};
pub use validator_chain::{Validator, ValidatorChain};
