use crate::application::command::Command;
use crate::application::view::View;
use crate::domain::money::Money;
use crate::domain::outcome::Outcome;
use crate::domain::session::{PaymentMethod, Phase};
use crate::error::Result;
use crate::interfaces::StepSink;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct OutcomeRecord {
    step: usize,
    command: String,
    status: &'static str,
    kind: &'static str,
    phase: Phase,
    method: PaymentMethod,
    balance: Money,
    message: String,
    stock: String,
}

/// Writes one CSV row per executed command, with the state it left behind.
pub struct OutcomeWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> OutcomeWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }
}

impl<W: Write> StepSink for OutcomeWriter<W> {
    fn write_step(
        &mut self,
        step: usize,
        command: &Command,
        result: &Result<Outcome>,
        view: &View,
    ) -> Result<()> {
        let (status, kind, message) = match result {
            Ok(outcome) => ("ok", outcome.kind(), outcome.to_string()),
            Err(e) => ("rejected", e.kind(), e.to_string()),
        };

        let stock = view
            .stock
            .iter()
            .map(|level| format!("{}={}", level.item, level.remaining))
            .collect::<Vec<_>>()
            .join(";");

        self.writer.serialize(OutcomeRecord {
            step,
            command: command.to_string(),
            status,
            kind,
            phase: view.phase,
            method: view.payment_method,
            balance: view.inserted_total,
            message,
            stock,
        })?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
