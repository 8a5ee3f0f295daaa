use crate::application::command::Command;
use crate::application::view::View;
use crate::domain::outcome::Outcome;
use crate::error::Result;

pub mod csv;
pub mod json;

/// Destination for the per-step report of a scripted run.
pub trait StepSink {
    /// Records the result of `command` and the view observed right after it.
    fn write_step(
        &mut self,
        step: usize,
        command: &Command,
        result: &Result<Outcome>,
        view: &View,
    ) -> Result<()>;

    fn flush(&mut self) -> Result<()>;
}
