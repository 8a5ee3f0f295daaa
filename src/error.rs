use crate::domain::catalog::ItemId;
use crate::domain::money::Money;
use crate::domain::session::{Phase, PaymentMethod};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VendingError {
    #[error("payment method already chosen ({current}); {requested} is not allowed")]
    MethodConflict {
        current: PaymentMethod,
        requested: PaymentMethod,
    },
    #[error("choose a payment method first (tag a card or insert cash)")]
    NoPaymentMethod,
    #[error("{item} is sold out")]
    OutOfStock { item: ItemId },
    #[error("insufficient balance: {balance} / price {price}")]
    InsufficientFunds { balance: Money, price: Money },
    #[error("payment for {item} failed (card issuer error)")]
    CardDeclined { item: ItemId },
    #[error("there is no change to return")]
    NothingToReturn,
    #[error("machine is busy ({phase}), try again")]
    EngineBusy { phase: Phase },
    #[error("unknown item: {0}")]
    UnknownItem(ItemId),
    #[error("unsupported denomination: {0}")]
    InvalidDenomination(u64),
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
    #[error("invalid command: {0}")]
    InvalidCommand(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("engine task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

impl VendingError {
    /// Stable snake_case name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            VendingError::MethodConflict { .. } => "method_conflict",
            VendingError::NoPaymentMethod => "no_payment_method",
            VendingError::OutOfStock { .. } => "out_of_stock",
            VendingError::InsufficientFunds { .. } => "insufficient_funds",
            VendingError::CardDeclined { .. } => "card_declined",
            VendingError::NothingToReturn => "nothing_to_return",
            VendingError::EngineBusy { .. } => "engine_busy",
            VendingError::UnknownItem(_) => "unknown_item",
            VendingError::InvalidDenomination(_) => "invalid_denomination",
            VendingError::InvalidCatalog(_) => "invalid_catalog",
            VendingError::InvalidCommand(_) => "invalid_command",
            VendingError::CsvError(_) => "csv",
            VendingError::IoError(_) => "io",
            VendingError::JsonError(_) => "json",
            VendingError::TaskFailed(_) => "task_failed",
        }
    }
}

pub type Result<T> = std::result::Result<T, VendingError>;
