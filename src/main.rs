#![no_std]
#![no_main]

use defmt_rtt as _;
use panic_probe as _;
use rp_pico::hal::gpio::Interrupt;
use rtic::app;
use stopwatch::Edge;

/// GPIO interrupt that matches the edge a control line reacts to.
fn edge_interrupt(edge: Edge) -> Interrupt {
    match edge {
        Edge::Rising => Interrupt::EdgeHigh,
        Edge::Falling => Interrupt::EdgeLow,
    }
}

#[app(device = rp_pico::hal::pac, peripherals = true)]
mod app {
    use super::*;
    use embedded_hal::digital::v2::ToggleableOutputPin;
    use rp_pico::hal::{
        clocks::{init_clocks_and_plls, Clock as _},
        fugit::{ExtU32, MicrosDurationU32},
        gpio::{bank0::Gpio25, DynPinId, FunctionSioInput, FunctionSioOutput, Pin, PullDown, PullUp},
        sio::Sio,
        timer::{Alarm, Alarm0, Timer},
        watchdog::Watchdog,
    };
    use stopwatch::{
        port::{PinButtons, PinDigitBus, PinIndicators},
        Clock, Config, ControlEvent, Multiplexer, Panel, TickOutcome,
    };

    type InputLine = Pin<DynPinId, FunctionSioInput, PullUp>;
    type OutputLine = Pin<DynPinId, FunctionSioOutput, PullDown>;
    type LedPin = Pin<Gpio25, FunctionSioOutput, PullDown>;

    // Shared resources (accessed by multiple tasks)
    #[shared]
    struct Shared {
        clock: Clock,
    }

    // Local resources (accessed by single tasks)
    #[local]
    struct Local {
        alarm: Alarm0,
        period: MicrosDurationU32,
        led: LedPin,
        controls: [(ControlEvent, InputLine); 3],
        panel: Panel,
        buttons: PinButtons<InputLine>,
        indicators: PinIndicators<OutputLine>,
        bus: PinDigitBus<OutputLine, OutputLine>,
        mux: Multiplexer,
        delay: cortex_m::delay::Delay,
    }

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        let mut pac = ctx.device;
        let mut watchdog = Watchdog::new(pac.WATCHDOG);
        let sio = Sio::new(pac.SIO);
        let config = Config::default();

        let external_xtal_freq_hz = 12_000_000u32;
        let Ok(clocks) = init_clocks_and_plls(
            external_xtal_freq_hz,
            pac.XOSC,
            pac.CLOCKS,
            pac.PLL_SYS,
            pac.PLL_USB,
            &mut pac.RESETS,
            &mut watchdog,
        ) else {
            defmt::panic!("clock init failed");
        };
        let delay = cortex_m::delay::Delay::new(ctx.core.SYST, clocks.system_clock.freq().to_Hz());

        let period = defmt::unwrap!(config.timer.period_us()).micros();
        let mut timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
        let mut alarm = defmt::unwrap!(timer.alarm_0());
        // Schedule first tick one period from now
        if alarm.schedule(period).is_err() {
            defmt::panic!("tick period out of alarm range");
        }
        alarm.enable_interrupt();

        let pins = rp_pico::Pins::new(
            pac.IO_BANK0,
            pac.PADS_BANK0,
            sio.gpio_bank0,
            &mut pac.RESETS,
        );

        let led = pins.led.into_push_pull_output();

        let buttons = PinButtons::new([
            pins.gpio2.into_pull_up_input().into_dyn_pin(),
            pins.gpio3.into_pull_up_input().into_dyn_pin(),
            pins.gpio4.into_pull_up_input().into_dyn_pin(),
            pins.gpio5.into_pull_up_input().into_dyn_pin(),
            pins.gpio6.into_pull_up_input().into_dyn_pin(),
            pins.gpio7.into_pull_up_input().into_dyn_pin(),
            pins.gpio8.into_pull_up_input().into_dyn_pin(),
        ]);

        let mut controls = [
            (ControlEvent::Reset, pins.gpio9.into_pull_up_input().into_dyn_pin()),
            (ControlEvent::Pause, pins.gpio10.into_pull_up_input().into_dyn_pin()),
            (ControlEvent::Resume, pins.gpio11.into_pull_up_input().into_dyn_pin()),
        ];
        for (event, pin) in controls.iter_mut() {
            let irq = edge_interrupt(event.edge());
            pin.clear_interrupt(irq);
            pin.set_interrupt_enabled(irq, true);
        }

        let bus = PinDigitBus::new(
            [
                pins.gpio16.into_push_pull_output().into_dyn_pin(),
                pins.gpio17.into_push_pull_output().into_dyn_pin(),
                pins.gpio18.into_push_pull_output().into_dyn_pin(),
                pins.gpio19.into_push_pull_output().into_dyn_pin(),
                pins.gpio20.into_push_pull_output().into_dyn_pin(),
                pins.gpio21.into_push_pull_output().into_dyn_pin(),
            ],
            [
                pins.gpio12.into_push_pull_output().into_dyn_pin(),
                pins.gpio13.into_push_pull_output().into_dyn_pin(),
                pins.gpio14.into_push_pull_output().into_dyn_pin(),
                pins.gpio15.into_push_pull_output().into_dyn_pin(),
            ],
        );

        let indicators = PinIndicators::new(
            pins.gpio22.into_push_pull_output().into_dyn_pin(),
            pins.gpio26.into_push_pull_output().into_dyn_pin(),
            pins.gpio27.into_push_pull_output().into_dyn_pin(),
        );

        defmt::info!("stopwatch up, tick every {} us", period.to_micros());

        (
            Shared {
                clock: Clock::new(config.initial_time, config.initial_mode),
            },
            Local {
                alarm,
                period,
                led,
                controls,
                panel: Panel::new(),
                buttons,
                indicators,
                bus,
                mux: Multiplexer::new(config.dwell_us),
                delay,
            },
            init::Monotonics(),
        )
    }

    // Hardware Task: Timer Interrupt (1Hz)
    #[task(binds = TIMER_IRQ_0, priority = 1, shared = [clock], local = [alarm, period, led])]
    fn timer_tick(mut ctx: timer_tick::Context) {
        // Clear interrupt and schedule next
        ctx.local.alarm.clear_interrupt();
        if ctx.local.alarm.schedule(*ctx.local.period).is_err() {
            defmt::warn!("could not reschedule tick");
        }

        ctx.local.led.toggle().ok();

        if ctx.shared.clock.lock(|c| c.on_tick()) == TickOutcome::Alarm {
            defmt::trace!("countdown at zero");
        }
    }

    // Hardware Task: reset / pause / resume lines
    #[task(binds = IO_IRQ_BANK0, priority = 1, shared = [clock], local = [controls])]
    fn control_edge(mut ctx: control_edge::Context) {
        for (event, pin) in ctx.local.controls.iter_mut() {
            let irq = edge_interrupt(event.edge());
            if pin.interrupt_status(irq) {
                pin.clear_interrupt(irq);
                let event = *event;
                ctx.shared.clock.lock(|c| c.dispatch(event));
            }
        }
    }

    // Polling loop: buttons, then projection, then one display scan
    #[idle(shared = [clock], local = [panel, buttons, indicators, bus, mux, delay])]
    fn idle(mut ctx: idle::Context) -> ! {
        loop {
            match ctx.local.panel.sample(&mut *ctx.local.buttons) {
                Ok(actions) => ctx.shared.clock.lock(|c| c.apply_all(&actions)),
                Err(e) => defmt::warn!("button poll failed: {}", e),
            }

            let frame = ctx.shared.clock.lock(|c| c.frame());

            if let Err(e) = frame.indicators.write(&mut *ctx.local.indicators) {
                defmt::warn!("indicator write failed: {}", e);
            }
            if let Err(e) = ctx.local.mux.scan(&mut *ctx.local.bus, &frame.digits, &mut *ctx.local.delay) {
                defmt::warn!("display scan failed: {}", e);
            }
        }
    }
}
