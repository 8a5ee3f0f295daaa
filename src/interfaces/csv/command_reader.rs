use crate::application::command::Command;
use crate::domain::catalog::ItemId;
use crate::domain::money::Denomination;
use crate::error::{Result, VendingError};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(rename_all = "snake_case")]
enum CommandKind {
    SelectCard,
    SelectDenomination,
    InsertCash,
    Purchase,
    ReturnChange,
    Reset,
    CardFault,
}

/// One raw `command, arg` row of a script.
#[derive(Debug, Deserialize)]
struct CommandRecord {
    command: CommandKind,
    arg: Option<String>,
}

impl CommandRecord {
    fn into_command(self) -> Result<Command> {
        let arg = self.arg.filter(|arg| !arg.is_empty());
        let command = match self.command {
            CommandKind::SelectCard => Command::SelectCard,
            CommandKind::InsertCash => Command::InsertCash,
            CommandKind::ReturnChange => Command::ReturnChange,
            CommandKind::Reset => Command::Reset,
            CommandKind::SelectDenomination => {
                let arg = arg.ok_or_else(|| missing_arg("select_denomination"))?;
                let value: u64 = arg.parse().map_err(|_| {
                    VendingError::InvalidCommand(format!("denomination is not a number: {arg}"))
                })?;
                Command::SelectDenomination(Denomination::try_from(value)?)
            }
            CommandKind::Purchase => {
                let arg = arg.ok_or_else(|| missing_arg("purchase"))?;
                Command::Purchase(ItemId::new(arg))
            }
            CommandKind::CardFault => {
                let arg = arg.ok_or_else(|| missing_arg("card_fault"))?;
                let enabled: bool = arg.parse().map_err(|_| {
                    VendingError::InvalidCommand(format!("expected true or false, got {arg}"))
                })?;
                Command::SetCardFaultSimulation(enabled)
            }
        };
        Ok(command)
    }
}

fn missing_arg(command: &str) -> VendingError {
    VendingError::InvalidCommand(format!("{command} needs an argument"))
}

/// Reads engine commands from a CSV script with a `command, arg` header.
///
/// Whitespace is trimmed and rows may omit the argument column.
pub struct CommandReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CommandReader<R> {
    /// Creates a new `CommandReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily parses commands, one per row.
    ///
    /// A malformed row yields an error without ending the iteration.
    pub fn commands(self) -> impl Iterator<Item = Result<Command>> {
        self.reader.into_deserialize::<CommandRecord>().map(|result| {
            result
                .map_err(VendingError::from)
                .and_then(CommandRecord::into_command)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_valid_script() {
        let data = "command, arg\nselect_denomination, 500\ninsert_cash,\npurchase, coffee\nreturn_change\ncard_fault, true";
        let reader = CommandReader::new(data.as_bytes());
        let results: Vec<Result<Command>> = reader.commands().collect();

        assert_eq!(results.len(), 5);
        assert_eq!(
            results[0].as_ref().unwrap(),
            &Command::SelectDenomination(Denomination::Won500)
        );
        assert_eq!(results[1].as_ref().unwrap(), &Command::InsertCash);
        assert_eq!(
            results[2].as_ref().unwrap(),
            &Command::Purchase(ItemId::from("coffee"))
        );
        assert_eq!(results[3].as_ref().unwrap(), &Command::ReturnChange);
        assert_eq!(
            results[4].as_ref().unwrap(),
            &Command::SetCardFaultSimulation(true)
        );
    }

    #[test]
    fn test_reader_malformed_rows() {
        let data = "command, arg\nkick_machine,\nselect_denomination, 2000\npurchase,\ncard_fault, maybe\nreset,";
        let reader = CommandReader::new(data.as_bytes());
        let results: Vec<Result<Command>> = reader.commands().collect();

        assert_eq!(results.len(), 5);
        assert!(matches!(results[0], Err(VendingError::CsvError(_))));
        assert!(matches!(
            results[1],
            Err(VendingError::InvalidDenomination(2000))
        ));
        assert!(matches!(results[2], Err(VendingError::InvalidCommand(_))));
        assert!(matches!(results[3], Err(VendingError::InvalidCommand(_))));
        assert_eq!(results[4].as_ref().unwrap(), &Command::Reset);
    }
}
