use std::time::Duration;

/// Nominal dispense latency, matching the physical motor cycle.
pub const DEFAULT_DISPENSE_DELAY: Duration = Duration::from_millis(600);
/// Nominal time for the change tray to pay out.
pub const DEFAULT_CHANGE_DELAY: Duration = Duration::from_millis(500);
/// How long a finished card session stays on screen before it resets.
pub const DEFAULT_CARD_SETTLE_DELAY: Duration = Duration::ZERO;

/// Timing knobs of the engine.
///
/// The dispense and change delays always run to completion, even when the
/// caller stops waiting for the result. `card_settle_delay` keeps the
/// `Completed` or `Error` phase of a card session visible before the reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub dispense_delay: Duration,
    pub change_delay: Duration,
    pub card_settle_delay: Duration,
}

impl EngineConfig {
    /// A config with no simulated latency, handy for scripted runs and tests.
    pub fn instant() -> Self {
        Self {
            dispense_delay: Duration::ZERO,
            change_delay: Duration::ZERO,
            card_settle_delay: Duration::ZERO,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dispense_delay: DEFAULT_DISPENSE_DELAY,
            change_delay: DEFAULT_CHANGE_DELAY,
            card_settle_delay: DEFAULT_CARD_SETTLE_DELAY,
        }
    }
}
