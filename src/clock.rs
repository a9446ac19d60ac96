use crate::Error;

pub const SECS_PER_MIN: u8 = 60;
pub const MINS_PER_HOUR: u8 = 60;
pub const HOURS_PER_DAY: u8 = 24;

/// Which way the clock counts on each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    #[default]
    CountUp,
    CountDown,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::CountUp => Mode::CountDown,
            Mode::CountDown => Mode::CountUp,
        }
    }
}

/// Hours, minutes and seconds, always within 00:00:00..=23:59:59.
///
/// Fields are private so every mutation goes through the carry/borrow
/// helpers below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeState {
    hours: u8,
    mins: u8,
    secs: u8,
}

impl TimeState {
    pub const ZERO: Self = Self { hours: 0, mins: 0, secs: 0 };

    pub fn new(hours: u8, mins: u8, secs: u8) -> Result<Self, Error> {
        if hours >= HOURS_PER_DAY || mins >= MINS_PER_HOUR || secs >= SECS_PER_MIN {
            return Err(Error::InvalidTime);
        }
        Ok(Self { hours, mins, secs })
    }

    pub fn hours(&self) -> u8 {
        self.hours
    }

    pub fn mins(&self) -> u8 {
        self.mins
    }

    pub fn secs(&self) -> u8 {
        self.secs
    }

    /// 00:00:00, where a countdown stops.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Increments the second, carrying into minutes and hours.
    pub fn add_second(&mut self) {
        self.secs += 1;
        if self.secs >= SECS_PER_MIN {
            self.secs = 0;
            self.add_minute();
        }
    }

    /// Increments the minute; 59 carries into hours.
    pub fn add_minute(&mut self) {
        self.mins += 1;
        if self.mins >= MINS_PER_HOUR {
            self.mins = 0;
            self.add_hour();
        }
    }

    /// Increments the hour on its own: 23 wraps to 0.
    pub fn add_hour(&mut self) {
        self.hours = (self.hours + 1) % HOURS_PER_DAY;
    }

    /// Decrements the second. A borrow that reaches hours stops at 0, so
    /// 00:00:00 becomes 00:59:59.
    pub fn sub_second(&mut self) {
        if self.secs == 0 {
            self.secs = SECS_PER_MIN - 1;
            self.sub_minute();
        } else {
            self.secs -= 1;
        }
    }

    /// Decrements the minute, borrowing from hours without wrapping them.
    pub fn sub_minute(&mut self) {
        if self.mins == 0 {
            self.mins = MINS_PER_HOUR - 1;
            self.hours = self.hours.saturating_sub(1);
        } else {
            self.mins -= 1;
        }
    }

    /// Decrements the hour on its own: 0 wraps to 23.
    pub fn sub_hour(&mut self) {
        self.hours = match self.hours {
            0 => HOURS_PER_DAY - 1,
            h => h - 1,
        };
    }

    /// Tens and units of hours, minutes and seconds, most significant first.
    pub fn digits(&self) -> [u8; 6] {
        [
            self.hours / 10,
            self.hours % 10,
            self.mins / 10,
            self.mins % 10,
            self.secs / 10,
            self.secs % 10,
        ]
    }
}

/// Shared state for the clock: the time, the counting mode and whether
/// ticks are currently counted.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Clock {
    pub(crate) time: TimeState,
    pub(crate) mode: Mode,
    pub(crate) running: bool,
}

impl Clock {
    pub const fn new(time: TimeState, mode: Mode) -> Self {
        Self { time, mode, running: true }
    }

    pub fn time(&self) -> TimeState {
        self.time
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Counting down and reached 00:00:00. Derived on every call, never latched.
    pub fn alarm(&self) -> bool {
        self.mode == Mode::CountDown && self.time.is_zero()
    }

    pub fn toggle_mode(&mut self) -> Mode {
        self.mode = self.mode.toggled();
        info!("mode -> {}", self.mode);
        self.mode
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(TimeState::ZERO, Mode::CountUp)
    }
}
