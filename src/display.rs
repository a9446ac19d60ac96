use embedded_hal::blocking::delay::DelayUs;

use crate::clock::{Clock, Mode};
use crate::port::{DigitBus, Indicator, IndicatorPort};
use crate::Error;

/// Output state of the discrete indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Indicators {
    pub count_up: bool,
    pub count_down: bool,
    pub buzzer: bool,
}

impl Indicators {
    pub fn write<P: IndicatorPort>(&self, port: &mut P) -> Result<(), Error> {
        port.set(Indicator::CountUp, self.count_up)?;
        port.set(Indicator::CountDown, self.count_down)?;
        port.set(Indicator::Buzzer, self.buzzer)
    }
}

/// Everything the display side needs for one refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    pub digits: [u8; 6],
    pub indicators: Indicators,
}

impl Clock {
    /// Projects the clock onto the display.
    pub fn frame(&self) -> Frame {
        Frame {
            digits: self.time.digits(),
            indicators: Indicators {
                count_up: self.mode == Mode::CountUp,
                count_down: self.mode == Mode::CountDown,
                buzzer: self.alarm(),
            },
        }
    }
}

/// Scans a frame across the six digits, one at a time.
pub struct Multiplexer {
    dwell_us: u32,
}

impl Multiplexer {
    pub fn new(dwell_us: u32) -> Self {
        Self { dwell_us }
    }

    pub fn scan<B, D>(&self, bus: &mut B, digits: &[u8; 6], delay: &mut D) -> Result<(), Error>
    where
        B: DigitBus,
        D: DelayUs<u32>,
    {
        for (position, &digit) in digits.iter().enumerate() {
            bus.show(position, digit & 0x0F)?;
            delay.delay_us(self.dwell_us);
            bus.blank()?;
        }
        Ok(())
    }
}
