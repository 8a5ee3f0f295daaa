use super::catalog::ItemId;
use super::money::{Denomination, Money};
use serde::Serialize;
use std::fmt;

/// Structured status shown to the customer.
///
/// The engine records a `Notice` after each step; turning it into text is
/// left to `Display` so the rules never depend on wording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    CardTagged,
    DenominationSelected { denomination: Denomination },
    CashInserted { added: Money, balance: Money },
    Checking { item: ItemId },
    Dispensing { item: ItemId },
    /// `balance` is the cash left over; `None` for card purchases.
    Purchased { item: ItemId, balance: Option<Money> },
    OutOfStock { item: ItemId },
    InsufficientFunds { balance: Money, price: Money },
    CardDeclined,
    ReturningChange { amount: Money },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::CardTagged => write!(f, "Card tagged."),
            Notice::DenominationSelected { denomination } => {
                write!(f, "Denomination {denomination} selected.")
            }
            Notice::CashInserted { added, balance } => {
                write!(f, "Cash inserted: {added} · balance {balance}")
            }
            Notice::Checking { item } => write!(f, "Checking stock and payment for {item}..."),
            Notice::Dispensing { item } => write!(f, "Dispensing {item}..."),
            Notice::Purchased {
                item,
                balance: Some(balance),
            } => write!(
                f,
                "Purchased {item}! Remaining balance {balance} · keep ordering or return change."
            ),
            Notice::Purchased { item, balance: None } => write!(f, "Purchased {item}!"),
            Notice::OutOfStock { item } => write!(f, "{item} is sold out."),
            Notice::InsufficientFunds { balance, price } => {
                write!(f, "Insufficient balance: {balance} / price {price}")
            }
            Notice::CardDeclined => write!(f, "Payment failed. (card issuer error)"),
            Notice::ReturningChange { amount } => write!(f, "Returning change of {amount}..."),
        }
    }
}

/// Successful result of an engine command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    CardSelected,
    DenominationSelected {
        denomination: Denomination,
    },
    CashInserted {
        added: Money,
        balance: Money,
    },
    /// One unit of `item` left the machine.
    Dispensed {
        item: ItemId,
        price: Money,
        remaining: u32,
        /// Cash balance after the purchase; `None` when paid by card.
        balance: Option<Money>,
    },
    ChangeReturned {
        amount: Money,
    },
    SessionReset,
    CardFaultSimulation {
        enabled: bool,
    },
}

impl Outcome {
    /// Stable snake_case name of the outcome.
    pub fn kind(&self) -> &'static str {
        match self {
            Outcome::CardSelected => "card_selected",
            Outcome::DenominationSelected { .. } => "denomination_selected",
            Outcome::CashInserted { .. } => "cash_inserted",
            Outcome::Dispensed { .. } => "dispensed",
            Outcome::ChangeReturned { .. } => "change_returned",
            Outcome::SessionReset => "session_reset",
            Outcome::CardFaultSimulation { .. } => "card_fault_simulation",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::CardSelected => write!(f, "Card tagged."),
            Outcome::DenominationSelected { denomination } => {
                write!(f, "Denomination {denomination} selected.")
            }
            Outcome::CashInserted { added, balance } => {
                write!(f, "Cash inserted: {added} · balance {balance}")
            }
            Outcome::Dispensed { item, .. } => write!(f, "{item} dispensed."),
            Outcome::ChangeReturned { amount } => write!(f, "Change: {amount}"),
            Outcome::SessionReset => write!(f, "Session reset."),
            Outcome::CardFaultSimulation { enabled: true } => {
                write!(f, "Card fault simulation enabled.")
            }
            Outcome::CardFaultSimulation { enabled: false } => {
                write!(f, "Card fault simulation disabled.")
            }
        }
    }
}
