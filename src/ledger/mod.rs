//! The transaction ledger: the authoritative, persisted record collection.

#[allow(clippy::module_inception)]
pub mod ledger;

pub use ledger::{Ledger, LoadReport};
