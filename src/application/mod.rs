//! Application layer containing the transaction state machine.
//!
//! This module defines the `TransactionEngine`, the single entry point for
//! vending commands. It serializes commands through a `tokio` lock and
//! publishes a `View` after every state change.

pub mod command;
pub mod config;
pub mod engine;
pub mod view;
