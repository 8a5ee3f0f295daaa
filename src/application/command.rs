use crate::domain::catalog::ItemId;
use crate::domain::money::Denomination;
use std::fmt;

/// A request from the presentation layer to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SelectCard,
    SelectDenomination(Denomination),
    InsertCash,
    Purchase(ItemId),
    ReturnChange,
    Reset,
    SetCardFaultSimulation(bool),
}

impl Command {
    /// Stable snake_case name, as used in command scripts.
    pub fn name(&self) -> &'static str {
        match self {
            Command::SelectCard => "select_card",
            Command::SelectDenomination(_) => "select_denomination",
            Command::InsertCash => "insert_cash",
            Command::Purchase(_) => "purchase",
            Command::ReturnChange => "return_change",
            Command::Reset => "reset",
            Command::SetCardFaultSimulation(_) => "card_fault",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::SelectDenomination(denomination) => {
                write!(f, "{} {}", self.name(), u64::from(*denomination))
            }
            Command::Purchase(item) => write!(f, "{} {item}", self.name()),
            Command::SetCardFaultSimulation(enabled) => write!(f, "{} {enabled}", self.name()),
            _ => f.write_str(self.name()),
        }
    }
}
