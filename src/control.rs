use crate::clock::{Clock, TimeState};
use crate::port::Edge;

/// Events raised by the edge-triggered control lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlEvent {
    /// Zero the time; mode and running state are kept.
    Reset,
    /// Stop counting ticks.
    Pause,
    /// Count ticks again from where the clock was paused.
    Resume,
}

impl ControlEvent {
    pub const ALL: [ControlEvent; 3] = [ControlEvent::Reset, ControlEvent::Pause, ControlEvent::Resume];

    /// The edge on the event's line that raises it.
    pub fn edge(self) -> Edge {
        match self {
            ControlEvent::Reset | ControlEvent::Resume => Edge::Falling,
            ControlEvent::Pause => Edge::Rising,
        }
    }
}

impl Clock {
    pub fn dispatch(&mut self, event: ControlEvent) {
        match event {
            ControlEvent::Reset => self.time = TimeState::ZERO,
            ControlEvent::Pause => self.running = false,
            ControlEvent::Resume => self.running = true,
        }
        info!("{} (running={})", event, self.running);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::Mode;
    use crate::tick::TickOutcome;

    #[test]
    fn reset_zeroes_in_every_mode_and_state() {
        for mode in [Mode::CountUp, Mode::CountDown] {
            for running in [true, false] {
                let mut c = Clock::new(TimeState::new(17, 42, 9).unwrap(), mode);
                c.running = running;
                c.dispatch(ControlEvent::Reset);
                assert_eq!(c.time(), TimeState::ZERO);
                assert_eq!(c.mode(), mode);
                assert_eq!(c.is_running(), running);
            }
        }
    }

    #[test]
    fn pause_then_resume_continues_without_catch_up() {
        let mut c = Clock::new(TimeState::new(0, 0, 30).unwrap(), Mode::CountUp);
        c.dispatch(ControlEvent::Pause);
        for _ in 0..10 {
            assert_eq!(c.on_tick(), TickOutcome::Skipped);
        }
        c.dispatch(ControlEvent::Resume);
        c.on_tick();
        assert_eq!(c.time(), TimeState::new(0, 0, 31).unwrap());
    }

    #[test]
    fn repeated_pause_is_harmless() {
        let mut c = Clock::default();
        c.dispatch(ControlEvent::Pause);
        c.dispatch(ControlEvent::Pause);
        assert!(!c.is_running());
        c.dispatch(ControlEvent::Resume);
        assert!(c.is_running());
    }

    #[test]
    fn edges_match_the_lines() {
        assert_eq!(ControlEvent::Reset.edge(), Edge::Falling);
        assert_eq!(ControlEvent::Pause.edge(), Edge::Rising);
        assert_eq!(ControlEvent::Resume.edge(), Edge::Falling);
    }
}
