//! Debounced manual adjustment.
//!
//! Each polled button owns a [`Latch`] that fires once when the button is
//! first seen pressed and re-arms only after it is seen released. Holding a
//! button for any number of polls yields exactly one action.

use heapless::Vec;

use crate::clock::Clock;
use crate::port::{Button, ButtonPort};
use crate::Error;

/// One-shot press detector for a single input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Latch {
    handled: bool,
}

impl Latch {
    pub const fn new() -> Self {
        Self { handled: false }
    }

    /// Feed the current input level; returns true on the poll where a new
    /// press should act.
    pub fn update(&mut self, pressed: bool) -> bool {
        if !pressed {
            self.handled = false;
            return false;
        }
        if self.handled {
            return false;
        }
        self.handled = true;
        true
    }

    pub fn is_handled(&self) -> bool {
        self.handled
    }
}

/// A single change requested from the polling loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    SecondUp,
    SecondDown,
    MinuteUp,
    MinuteDown,
    HourUp,
    HourDown,
    ToggleMode,
}

impl Action {
    fn for_button(button: Button) -> Self {
        match button {
            Button::SecondsUp => Action::SecondUp,
            Button::SecondsDown => Action::SecondDown,
            Button::MinutesUp => Action::MinuteUp,
            Button::MinutesDown => Action::MinuteDown,
            Button::HoursUp => Action::HourUp,
            Button::HoursDown => Action::HourDown,
            Button::Mode => Action::ToggleMode,
        }
    }
}

/// Actions collected in one poll, in button order.
pub type Actions = Vec<Action, 7>;

impl Clock {
    /// Applies one button action with the same carry/borrow rules as a
    /// tick; `ToggleMode` leaves the time alone.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::SecondUp => self.time.add_second(),
            Action::SecondDown => self.time.sub_second(),
            Action::MinuteUp => self.time.add_minute(),
            Action::MinuteDown => self.time.sub_minute(),
            Action::HourUp => self.time.add_hour(),
            Action::HourDown => self.time.sub_hour(),
            Action::ToggleMode => {
                self.toggle_mode();
                return;
            }
        }
        debug!("{} -> {}", action, self.time);
    }

    /// Applies a whole poll's worth of actions in order.
    pub fn apply_all(&mut self, actions: &[Action]) {
        for &action in actions {
            self.apply(action);
        }
    }
}

/// Button latches owned by the polling loop.
#[derive(Debug, Default)]
pub struct Panel {
    latches: [Latch; 7],
}

impl Panel {
    pub const fn new() -> Self {
        Self { latches: [Latch::new(); 7] }
    }

    /// Reads every button once and returns the actions due this poll:
    /// seconds, then minutes, then hours, then the mode toggle.
    ///
    /// Touches only the latches, so it can run outside the clock's critical
    /// section.
    pub fn sample<B: ButtonPort>(&mut self, buttons: &mut B) -> Result<Actions, Error> {
        let mut levels = [false; 7];
        for button in Button::ALL {
            levels[button.index()] = buttons.is_pressed(button)?;
        }

        let mut actions = Actions::new();
        for button in Button::ALL {
            if self.latches[button.index()].update(levels[button.index()]) {
                // One slot per button, cannot overflow.
                let _ = actions.push(Action::for_button(button));
            }
        }
        Ok(actions)
    }

    /// One polling iteration against an exclusively borrowed clock.
    pub fn on_poll<B: ButtonPort>(&mut self, buttons: &mut B, clock: &mut Clock) -> Result<Actions, Error> {
        let actions = self.sample(buttons)?;
        clock.apply_all(&actions);
        Ok(actions)
    }

    pub fn latch(&self, button: Button) -> Latch {
        self.latches[button.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Mode, TimeState};

    #[derive(Default)]
    struct Held([bool; 7]);

    impl Held {
        fn press(&mut self, button: Button) {
            self.0[button.index()] = true;
        }
        fn release(&mut self, button: Button) {
            self.0[button.index()] = false;
        }
    }

    impl ButtonPort for Held {
        fn is_pressed(&mut self, button: Button) -> Result<bool, Error> {
            Ok(self.0[button.index()])
        }
    }

    fn clock(h: u8, m: u8, s: u8) -> Clock {
        Clock::new(TimeState::new(h, m, s).unwrap(), Mode::CountUp)
    }

    #[test]
    fn latch_fires_once_per_press() {
        let mut latch = Latch::new();
        assert!(latch.update(true));
        assert!(!latch.update(true));
        assert!(latch.is_handled());
        assert!(!latch.update(false));
        assert!(!latch.is_handled());
        assert!(latch.update(true));
    }

    #[test]
    fn holding_a_button_adjusts_once() {
        let mut panel = Panel::new();
        let mut buttons = Held::default();
        let mut c = clock(0, 0, 0);

        buttons.press(Button::MinutesUp);
        for _ in 0..500 {
            panel.on_poll(&mut buttons, &mut c).unwrap();
        }
        assert_eq!(c.time(), TimeState::new(0, 1, 0).unwrap());
    }

    #[test]
    fn each_press_cycle_adjusts_once_more() {
        let mut panel = Panel::new();
        let mut buttons = Held::default();
        let mut c = clock(0, 0, 0);

        for _ in 0..5 {
            buttons.press(Button::SecondsUp);
            panel.on_poll(&mut buttons, &mut c).unwrap();
            panel.on_poll(&mut buttons, &mut c).unwrap();
            buttons.release(Button::SecondsUp);
            panel.on_poll(&mut buttons, &mut c).unwrap();
        }
        assert_eq!(c.time(), TimeState::new(0, 0, 5).unwrap());
    }

    #[test]
    fn hours_wrap_in_both_directions() {
        let mut panel = Panel::new();
        let mut buttons = Held::default();

        let mut c = clock(0, 30, 0);
        buttons.press(Button::HoursDown);
        panel.on_poll(&mut buttons, &mut c).unwrap();
        assert_eq!(c.time(), TimeState::new(23, 30, 0).unwrap());

        buttons.release(Button::HoursDown);
        buttons.press(Button::HoursUp);
        panel.on_poll(&mut buttons, &mut c).unwrap();
        assert_eq!(c.time(), TimeState::new(0, 30, 0).unwrap());
    }

    #[test]
    fn seconds_down_borrows_minutes() {
        let mut panel = Panel::new();
        let mut buttons = Held::default();
        let mut c = clock(1, 0, 0);
        buttons.press(Button::SecondsDown);
        panel.on_poll(&mut buttons, &mut c).unwrap();
        assert_eq!(c.time(), TimeState::new(0, 59, 59).unwrap());
    }

    #[test]
    fn actions_follow_button_order() {
        let mut panel = Panel::new();
        let mut buttons = Held::default();
        buttons.press(Button::Mode);
        buttons.press(Button::HoursUp);
        buttons.press(Button::SecondsDown);
        buttons.press(Button::MinutesUp);

        let actions = panel.sample(&mut buttons).unwrap();
        assert_eq!(
            actions.as_slice(),
            [Action::SecondDown, Action::MinuteUp, Action::HourUp, Action::ToggleMode]
        );
        assert!(panel.sample(&mut buttons).unwrap().is_empty());
    }

    #[test]
    fn held_mode_button_toggles_once() {
        let mut panel = Panel::new();
        let mut buttons = Held::default();
        let mut c = clock(4, 5, 6);
        buttons.press(Button::Mode);
        for _ in 0..50 {
            panel.on_poll(&mut buttons, &mut c).unwrap();
        }
        assert_eq!(c.mode(), Mode::CountDown);
        assert_eq!(c.time(), TimeState::new(4, 5, 6).unwrap());
    }

    #[test]
    fn adjusting_off_zero_silences_alarm() {
        let mut panel = Panel::new();
        let mut buttons = Held::default();
        let mut c = Clock::new(TimeState::ZERO, Mode::CountDown);
        assert!(c.alarm());
        buttons.press(Button::SecondsUp);
        panel.on_poll(&mut buttons, &mut c).unwrap();
        assert!(!c.alarm());
    }

    #[test]
    fn failed_read_leaves_clock_untouched() {
        struct Broken;
        impl ButtonPort for Broken {
            fn is_pressed(&mut self, button: Button) -> Result<bool, Error> {
                match button {
                    Button::HoursUp => Err(Error::Port),
                    _ => Ok(true),
                }
            }
        }

        let mut panel = Panel::new();
        let mut c = clock(1, 1, 1);
        assert_eq!(panel.on_poll(&mut Broken, &mut c), Err(Error::Port));
        assert_eq!(c.time(), TimeState::new(1, 1, 1).unwrap());
        assert!(!panel.latch(Button::SecondsUp).is_handled());
    }
}
