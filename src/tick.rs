use crate::clock::{Clock, Mode};

/// What a single tick did to the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// Paused; the tick was dropped, not queued.
    Skipped,
    /// The time moved by one second.
    Counted,
    /// Counting down and already at 00:00:00; the buzzer should sound.
    Alarm,
}

impl Clock {
    /// Advances the clock by one second in the current mode.
    ///
    /// Runs in interrupt context: no blocking, no loops beyond the carry
    /// chain.
    pub fn on_tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Skipped;
        }

        let outcome = match self.mode {
            Mode::CountUp => {
                self.time.add_second();
                TickOutcome::Counted
            }
            Mode::CountDown if self.time.is_zero() => TickOutcome::Alarm,
            Mode::CountDown => {
                self.time.sub_second();
                TickOutcome::Counted
            }
        };

        trace!("tick {} -> {}", outcome, self.time);
        outcome
    }
}
