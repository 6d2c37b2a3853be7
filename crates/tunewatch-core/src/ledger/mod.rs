//! Detection statistics that survive restarts.
//!
//! [`StatsLedger`] is the in-memory state, mutated only by the scan
//! scheduler. [`LedgerStore`] moves it to and from the data directory.

pub mod errors;
pub mod storage;
pub mod types;

pub use errors::LedgerError;
pub use storage::LedgerStore;
pub use types::{ArtistStat, IncidentCounter, StatsLedger};
