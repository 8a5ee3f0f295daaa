//! Domain layer: money, catalog, session rules and the stock ledger port.
//!
//! Nothing in here performs I/O. `ports` only declares the storage seam the
//! engine talks to.

pub mod catalog;
pub mod money;
pub mod outcome;
pub mod ports;
pub mod session;
