use core::cell::RefCell;

use critical_section::Mutex;

use crate::adjust::{Actions, Panel};
use crate::clock::Clock;
use crate::control::ControlEvent;
use crate::display::Frame;
use crate::port::ButtonPort;
use crate::tick::TickOutcome;
use crate::Error;

/// A [`Clock`] that interrupt handlers and the main loop can both reach.
///
/// Every method is a single critical section, so a tick can never observe
/// a half-applied adjustment and vice versa.
pub struct SharedClock {
    inner: Mutex<RefCell<Clock>>,
}

impl SharedClock {
    pub const fn new(clock: Clock) -> Self {
        Self { inner: Mutex::new(RefCell::new(clock)) }
    }

    pub fn lock<R>(&self, f: impl FnOnce(&mut Clock) -> R) -> R {
        critical_section::with(|cs| f(&mut self.inner.borrow_ref_mut(cs)))
    }

    pub fn on_tick(&self) -> TickOutcome {
        self.lock(|c| c.on_tick())
    }

    pub fn dispatch(&self, event: ControlEvent) {
        self.lock(|c| c.dispatch(event))
    }

    /// Samples the buttons outside the critical section, then applies the
    /// resulting actions inside one.
    pub fn on_poll<B: ButtonPort>(&self, panel: &mut Panel, buttons: &mut B) -> Result<Actions, Error> {
        let actions = panel.sample(buttons)?;
        self.lock(|c| c.apply_all(&actions));
        Ok(actions)
    }

    pub fn frame(&self) -> Frame {
        self.lock(|c| c.frame())
    }

    pub fn snapshot(&self) -> Clock {
        self.lock(|c| c.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Mode, TimeState};
    use crate::port::Button;

    struct Always(Button);

    impl ButtonPort for Always {
        fn is_pressed(&mut self, button: Button) -> Result<bool, Error> {
            Ok(button == self.0)
        }
    }

    static CLOCK: SharedClock = SharedClock::new(Clock::new(TimeState::ZERO, Mode::CountUp));

    #[test]
    fn usable_from_a_static() {
        CLOCK.on_tick();
        CLOCK.dispatch(ControlEvent::Pause);
        CLOCK.on_tick();
        assert_eq!(CLOCK.snapshot().time(), TimeState::new(0, 0, 1).unwrap());
        assert!(!CLOCK.snapshot().is_running());
    }

    #[test]
    fn poll_applies_inside_the_lock() {
        let shared = SharedClock::new(Clock::default());
        let mut panel = Panel::new();
        let mut buttons = Always(Button::HoursDown);

        let actions = shared.on_poll(&mut panel, &mut buttons).unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(shared.frame().digits, [2, 3, 0, 0, 0, 0]);
        assert!(shared.on_poll(&mut panel, &mut buttons).unwrap().is_empty());
    }
}
