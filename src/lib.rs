//! Count-up clock / count-down timer for a six-digit multiplexed 7-segment
//! display.
//!
//! The state lives in a [`Clock`]. Two entry points mutate it: the 1 Hz
//! interrupt calls [`Clock::on_tick`] (and [`Clock::dispatch`] for the
//! reset/pause/resume lines), the main loop calls [`Panel::on_poll`] and
//! then projects a [`Frame`] for the display. Both must hold the same lock
//! around each call: an RTIC resource lock on the board, or [`SharedClock`].
#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod adjust;
pub mod clock;
pub mod config;
pub mod control;
pub mod display;
mod error;
pub mod port;
pub mod shared;
pub mod tick;

pub use adjust::{Action, Actions, Latch, Panel};
pub use clock::{Clock, Mode, TimeState};
pub use config::{Config, TimerConfig};
pub use control::ControlEvent;
pub use display::{Frame, Indicators, Multiplexer};
pub use error::Error;
pub use port::{Button, ButtonPort, DigitBus, Edge, Indicator, IndicatorPort};
pub use shared::SharedClock;
pub use tick::TickOutcome;
