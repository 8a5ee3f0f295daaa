use super::money::{Denomination, Money};
use super::outcome::Notice;
use crate::error::{Result, VendingError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stage of the transaction state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Idle,
    PaymentPending,
    Checking,
    Dispensing,
    Completed,
    Error,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// The single channel a customer pays with for the whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[default]
    None,
    Card,
    Cash,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// One customer's in-progress interaction with the machine.
///
/// A fresh session is `Idle`, has no payment method, a zero balance, the
/// default 1000 denomination and no simulated card fault.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    pub phase: Phase,
    pub payment_method: PaymentMethod,
    /// Cash balance; only meaningful while `payment_method` is `Cash`.
    pub inserted_total: Money,
    pub selected_denomination: Denomination,
    pub card_fault_simulated: bool,
    /// Last status for the presentation layer. Never read by the rules.
    pub notice: Option<Notice>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a check or dispense cycle is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::Checking | Phase::Dispensing)
    }

    /// Rejects the caller with `EngineBusy` if a cycle is in flight.
    pub fn ensure_settled(&self) -> Result<()> {
        if self.is_busy() {
            return Err(VendingError::EngineBusy { phase: self.phase });
        }
        Ok(())
    }

    /// Locks the session to `requested` and opens payment.
    ///
    /// Fails with `MethodConflict`, leaving the session untouched, if a
    /// different method was already chosen. Re-claiming the same method is a
    /// no-op apart from the `Idle -> PaymentPending` move.
    pub fn claim_method(&mut self, requested: PaymentMethod) -> Result<()> {
        match self.payment_method {
            PaymentMethod::None => self.payment_method = requested,
            current if current == requested => {}
            current => {
                return Err(VendingError::MethodConflict { current, requested });
            }
        }

        if self.phase == Phase::Idle {
            self.phase = Phase::PaymentPending;
        }
        Ok(())
    }

    /// Adds one unit of the selected denomination and returns what was added.
    pub fn insert_selected(&mut self) -> Money {
        let added = self.selected_denomination.value();
        self.inserted_total += added;
        added
    }
}
