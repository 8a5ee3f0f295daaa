use crate::application::command::Command;
use crate::application::view::View;
use crate::domain::outcome::Outcome;
use crate::error::Result;
use crate::interfaces::StepSink;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct Rejection {
    kind: &'static str,
    message: String,
}

#[derive(Debug, Serialize)]
struct StepRecord<'a> {
    step: usize,
    command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<&'a Outcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rejected: Option<Rejection>,
    view: &'a View,
}

/// Writes one JSON object per line, carrying the full view after each step.
pub struct JsonStepWriter<W: Write> {
    sink: W,
}

impl<W: Write> JsonStepWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }
}

impl<W: Write> StepSink for JsonStepWriter<W> {
    fn write_step(
        &mut self,
        step: usize,
        command: &Command,
        result: &Result<Outcome>,
        view: &View,
    ) -> Result<()> {
        let (outcome, rejected) = match result {
            Ok(outcome) => (Some(outcome), None),
            Err(e) => (
                None,
                Some(Rejection {
                    kind: e.kind(),
                    message: e.to_string(),
                }),
            ),
        };

        serde_json::to_writer(
            &mut self.sink,
            &StepRecord {
                step,
                command: command.to_string(),
                outcome,
                rejected,
                view,
            },
        )?;
        writeln!(self.sink)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.sink.flush()?;
        Ok(())
    }
}
