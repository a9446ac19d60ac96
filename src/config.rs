use crate::clock::{Mode, TimeState};
use crate::Error;

/// A compare-match timer: `core_hz` divided by `prescaler`, firing every
/// `compare + 1` counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerConfig {
    pub core_hz: u32,
    pub prescaler: u32,
    pub compare: u32,
}

impl TimerConfig {
    /// 16 MHz core, /1024 prescale, compare 15624: exactly 1 Hz.
    pub const REFERENCE: Self = Self { core_hz: 16_000_000, prescaler: 1024, compare: 15_624 };

    pub fn validate(&self) -> Result<(), Error> {
        if self.core_hz == 0 || self.prescaler == 0 {
            warn!("rejected timer config {}", self);
            return Err(Error::InvalidConfig);
        }
        Ok(())
    }

    /// Core clock cycles between ticks.
    fn cycles(&self) -> Result<u64, Error> {
        self.validate()?;
        (u64::from(self.compare) + 1)
            .checked_mul(u64::from(self.prescaler))
            .ok_or(Error::InvalidConfig)
    }

    /// Time between ticks. Periods that round to zero or do not fit in
    /// a `u32` are rejected.
    pub fn period_us(&self) -> Result<u32, Error> {
        let us = self
            .cycles()?
            .checked_mul(1_000_000)
            .ok_or(Error::InvalidConfig)?
            / u64::from(self.core_hz);
        match u32::try_from(us) {
            Ok(0) | Err(_) => Err(Error::InvalidConfig),
            Ok(us) => Ok(us),
        }
    }

    /// Ticks per second, truncated. Slower than 1 Hz is an error rather
    /// than `Ok(0)`.
    pub fn rate_hz(&self) -> Result<u32, Error> {
        match u64::from(self.core_hz) / self.cycles()? {
            0 => Err(Error::InvalidConfig),
            hz => Ok(hz as u32),
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self::REFERENCE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub timer: TimerConfig,
    /// How long each digit stays lit per scan.
    pub dwell_us: u32,
    pub initial_mode: Mode,
    pub initial_time: TimeState,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timer: TimerConfig::REFERENCE,
            dwell_us: 2_000,
            initial_mode: Mode::CountUp,
            initial_time: TimeState::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_timer_is_one_hertz() {
        let t = TimerConfig::REFERENCE;
        assert_eq!(t.period_us(), Ok(1_000_000));
        assert_eq!(t.rate_hz(), Ok(1));
    }

    #[test]
    fn faster_compare_shortens_the_period() {
        let t = TimerConfig { compare: 1_561, ..TimerConfig::REFERENCE };
        assert_eq!(t.period_us(), Ok(99_968));
        assert_eq!(t.rate_hz(), Ok(10));
    }

    #[test]
    fn zero_fields_are_rejected() {
        let t = TimerConfig { prescaler: 0, ..TimerConfig::REFERENCE };
        assert_eq!(t.period_us(), Err(Error::InvalidConfig));
        let t = TimerConfig { core_hz: 0, ..TimerConfig::REFERENCE };
        assert_eq!(t.rate_hz(), Err(Error::InvalidConfig));
    }

    #[test]
    fn oversized_timer_is_rejected_not_overflowed() {
        let t = TimerConfig { compare: u32::MAX, prescaler: 65_536, ..TimerConfig::REFERENCE };
        assert_eq!(t.period_us(), Err(Error::InvalidConfig));
        let t = TimerConfig { compare: u32::MAX, prescaler: u32::MAX, ..TimerConfig::REFERENCE };
        assert_eq!(t.period_us(), Err(Error::InvalidConfig));
        assert_eq!(t.rate_hz(), Err(Error::InvalidConfig));
    }

    #[test]
    fn sub_hertz_timer_has_no_rate() {
        let t = TimerConfig { compare: 262_140, ..TimerConfig::REFERENCE };
        assert!(t.period_us().is_ok());
        assert_eq!(t.rate_hz(), Err(Error::InvalidConfig));
    }

    #[test]
    fn default_config_matches_the_board() {
        let c = Config::default();
        assert_eq!(c.dwell_us, 2_000);
        assert_eq!(c.initial_mode, Mode::CountUp);
        assert!(c.initial_time.is_zero());
    }
}
