//! Shared plumbing for the ledger workspace: health payloads, logging setup
//! and startup environment checks.

pub mod types;
pub mod utils;
pub mod env;
