//! Service layer of the ledger: flat-file tables, id allocation, the
//! in-memory store that mirrors both tables, and the payment report.
//! - `storage` knows the file format and nothing about HTTP.
//! - `ledger` keeps memory and files converged under one lock.

pub mod errors;
pub mod storage;
pub mod ids;
pub mod ledger;
pub mod report;

pub use ledger::LedgerStore;
