//! Narrow capabilities over the board's pins. The clock logic only ever
//! sees these traits; pin direction and pulls are fixed when the adapters
//! are built.

use embedded_hal::digital::v2::{InputPin, OutputPin};

use crate::Error;

/// The seven polled push-buttons, in polling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    SecondsUp,
    SecondsDown,
    MinutesUp,
    MinutesDown,
    HoursUp,
    HoursDown,
    Mode,
}

impl Button {
    pub const ALL: [Button; 7] = [
        Button::SecondsUp,
        Button::SecondsDown,
        Button::MinutesUp,
        Button::MinutesDown,
        Button::HoursUp,
        Button::HoursDown,
        Button::Mode,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Discrete outputs besides the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Indicator {
    CountUp,
    CountDown,
    Buzzer,
}

/// Signal edge that fires an asynchronous control line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Rising,
    Falling,
}

pub trait ButtonPort {
    fn is_pressed(&mut self, button: Button) -> Result<bool, Error>;
}

pub trait IndicatorPort {
    fn set(&mut self, indicator: Indicator, on: bool) -> Result<(), Error>;
}

/// A 6-digit multiplexed display with a shared 4-bit BCD data bus.
pub trait DigitBus {
    /// Put `bcd` on the data bus and select digit `position` (0 = hours tens).
    fn show(&mut self, position: usize, bcd: u8) -> Result<(), Error>;

    /// Deselect every digit.
    fn blank(&mut self) -> Result<(), Error>;
}

/// Seven active-low, pulled-up inputs indexed by [`Button`].
pub struct PinButtons<P> {
    pins: [P; 7],
}

impl<P: InputPin> PinButtons<P> {
    pub fn new(pins: [P; 7]) -> Self {
        Self { pins }
    }
}

impl<P: InputPin> ButtonPort for PinButtons<P> {
    fn is_pressed(&mut self, button: Button) -> Result<bool, Error> {
        self.pins[button.index()].is_low().map_err(|_| Error::Port)
    }
}

/// Count-up LED, count-down LED and buzzer, active-high.
pub struct PinIndicators<P> {
    count_up: P,
    count_down: P,
    buzzer: P,
}

impl<P: OutputPin> PinIndicators<P> {
    pub fn new(count_up: P, count_down: P, buzzer: P) -> Self {
        Self { count_up, count_down, buzzer }
    }
}

impl<P: OutputPin> IndicatorPort for PinIndicators<P> {
    fn set(&mut self, indicator: Indicator, on: bool) -> Result<(), Error> {
        let pin = match indicator {
            Indicator::CountUp => &mut self.count_up,
            Indicator::CountDown => &mut self.count_down,
            Indicator::Buzzer => &mut self.buzzer,
        };
        if on {
            pin.set_high().map_err(|_| Error::Port)
        } else {
            pin.set_low().map_err(|_| Error::Port)
        }
    }
}

/// Six active-high digit-select lines (one transistor per digit) and a
/// 4-bit data bus feeding a BCD to 7-segment decoder, LSB first.
pub struct PinDigitBus<S, D> {
    select: [S; 6],
    data: [D; 4],
}

impl<S: OutputPin, D: OutputPin> PinDigitBus<S, D> {
    pub fn new(select: [S; 6], data: [D; 4]) -> Self {
        Self { select, data }
    }
}

impl<S: OutputPin, D: OutputPin> DigitBus for PinDigitBus<S, D> {
    fn show(&mut self, position: usize, bcd: u8) -> Result<(), Error> {
        let target = self.select.get_mut(position).ok_or(Error::Port)?;
        for (bit, pin) in self.data.iter_mut().enumerate() {
            let res = if bcd & (1 << bit) != 0 { pin.set_high() } else { pin.set_low() };
            res.map_err(|_| Error::Port)?;
        }
        target.set_high().map_err(|_| Error::Port)
    }

    fn blank(&mut self) -> Result<(), Error> {
        for pin in self.select.iter_mut() {
            pin.set_low().map_err(|_| Error::Port)?;
        }
        Ok(())
    }
}
