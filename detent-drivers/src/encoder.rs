//! Task-side engine: drain, decode, dispatch
//!
//! `update()` is the cooperative half of the engine. It drains whatever
//! the ISR queued since the last call (bounded by the backlog at entry, so
//! the call always terminates), runs the quadrature decoder, debounces the
//! button, and invokes the registered handlers synchronously. Disabling
//! the engine is simply not calling `update()` anymore; there is no stop
//! state.

use detent_core::button::ButtonDebouncer;
use detent_core::config::EncoderConfig;
use detent_core::decode::QuadratureDecoder;
use detent_core::events::Direction;
use detent_core::ring::{Consumer, SampleRing, DEFAULT_CAPACITY};
use detent_core::traits::{Clock, InputPin};

use crate::sampler::Sampler;

/// Task-side half of the input engine
///
/// Handlers are any `FnMut`; plain `fn` pointers satisfy the bounds, which
/// is also what the unregistered defaults are typed as. An event with no
/// handler is silently discarded.
pub struct RotaryEncoder<'r, SW, C, FS = fn(Direction), FC = fn(), const N: usize = DEFAULT_CAPACITY>
{
    samples: Consumer<'r, N>,
    decoder: QuadratureDecoder,
    button: ButtonDebouncer,
    sw: SW,
    clock: C,
    config: EncoderConfig,
    on_step: Option<FS>,
    on_click: Option<FC>,
}

impl<'r, SW, C, const N: usize> RotaryEncoder<'r, SW, C, fn(Direction), fn(), N> {
    /// Build both halves of the engine around a shared sample ring
    ///
    /// Decode state is seeded from the live pin levels, so the first real
    /// transition after bring-up decodes correctly. Wire the returned
    /// [`Sampler`] to the platform's pin-change interrupt and keep calling
    /// [`update`](RotaryEncoder::update) on the encoder from the host loop,
    /// often enough that the ring cannot fill between calls.
    pub fn new<A: InputPin, B: InputPin>(
        ring: &'r SampleRing<N>,
        a: A,
        b: B,
        sw: SW,
        clock: C,
        config: EncoderConfig,
    ) -> (Sampler<'r, A, B, N>, Self) {
        let mut sampler = Sampler::new(ring, a, b);
        let decoder = QuadratureDecoder::new(sampler.current_code());
        let encoder = Self {
            samples: ring.consumer(),
            decoder,
            button: ButtonDebouncer::new(),
            sw,
            clock,
            config,
            on_step: None,
            on_click: None,
        };
        (sampler, encoder)
    }
}

impl<'r, SW, C, FS, FC, const N: usize> RotaryEncoder<'r, SW, C, FS, FC, N> {
    /// Register the step handler, replacing any previous one
    pub fn on_step<F: FnMut(Direction)>(self, handler: F) -> RotaryEncoder<'r, SW, C, F, FC, N> {
        RotaryEncoder {
            samples: self.samples,
            decoder: self.decoder,
            button: self.button,
            sw: self.sw,
            clock: self.clock,
            config: self.config,
            on_step: Some(handler),
            on_click: self.on_click,
        }
    }

    /// Register the click handler, replacing any previous one
    pub fn on_click<F: FnMut()>(self, handler: F) -> RotaryEncoder<'r, SW, C, FS, F, N> {
        RotaryEncoder {
            samples: self.samples,
            decoder: self.decoder,
            button: self.button,
            sw: self.sw,
            clock: self.clock,
            config: self.config,
            on_step: self.on_step,
            on_click: Some(handler),
        }
    }

    /// Current tuning
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    pub fn edges_per_detent(&self) -> u8 {
        self.config.edges_per_detent()
    }

    /// Set the detent threshold; invalid values coerce to 4
    pub fn set_edges_per_detent(&mut self, edges: u8) {
        self.config.set_edges_per_detent(edges);
    }

    pub fn edge_debounce_ms(&self) -> u8 {
        self.config.edge_debounce_ms()
    }

    /// Set the edge debounce window; 0 disables it
    pub fn set_edge_debounce_ms(&mut self, ms: u8) {
        self.config.set_edge_debounce_ms(ms);
    }

    pub fn button_debounce_ms(&self) -> u8 {
        self.config.button_debounce_ms()
    }

    pub fn set_button_debounce_ms(&mut self, ms: u8) {
        self.config.set_button_debounce_ms(ms);
    }

    pub fn reversal_slop_edges(&self) -> u8 {
        self.config.reversal_slop_edges()
    }

    /// Set the reversal tolerance; values above 3 coerce to 1
    pub fn set_reversal_slop_edges(&mut self, edges: u8) {
        self.config.set_reversal_slop_edges(edges);
    }

    /// Debounced button state
    pub fn is_pressed(&self) -> bool {
        self.button.is_pressed()
    }

    /// Samples the ISR had to drop because `update()` was not called often
    /// enough. Telemetry only; an overflow undercounts rotation but never
    /// corrupts decode state.
    pub fn dropped_samples(&self) -> u32 {
        self.samples.dropped()
    }
}

impl<'r, SW, C, FS, FC, const N: usize> RotaryEncoder<'r, SW, C, FS, FC, N>
where
    SW: InputPin,
    C: Clock,
    FS: FnMut(Direction),
    FC: FnMut(),
{
    /// Drain queued samples, decode, debounce the button, dispatch events
    ///
    /// Non-blocking; runs at most "backlog at entry" decode iterations even
    /// if the ISR keeps queueing while we drain.
    pub fn update(&mut self) {
        let backlog = self.samples.len();
        for _ in 0..backlog {
            let Some(code) = self.samples.pop() else {
                break;
            };
            let now_us = self.clock.micros();
            if let Some(direction) = self.decoder.feed(code, now_us, &self.config) {
                if let Some(on_step) = self.on_step.as_mut() {
                    on_step(direction);
                }
            }
        }

        // Button is active-low: pressed reads as logic low
        let pressed = self.sw.is_low();
        let now_ms = self.clock.millis();
        if self.button.update(pressed, now_ms, &self.config) {
            if let Some(on_click) = self.on_click.as_mut() {
                on_click();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    struct SharedPin<'a>(&'a Cell<bool>);

    impl InputPin for SharedPin<'_> {
        fn is_high(&mut self) -> bool {
            self.0.get()
        }
    }

    /// Millisecond cell; micros derived so both clocks agree
    struct TestClock<'a>(&'a Cell<u32>);

    impl Clock for TestClock<'_> {
        fn millis(&self) -> u32 {
            self.0.get()
        }

        fn micros(&self) -> u32 {
            self.0.get().wrapping_mul(1_000)
        }
    }

    /// Pull-up idle: all lines high
    fn lines() -> (Cell<bool>, Cell<bool>, Cell<bool>, Cell<u32>) {
        (Cell::new(true), Cell::new(true), Cell::new(true), Cell::new(10))
    }

    /// CW pin path leaving and returning to the (1,1) idle state
    const CW_FROM_IDLE: [(bool, bool); 4] =
        [(true, false), (false, false), (false, true), (true, true)];
    const CCW_FROM_IDLE: [(bool, bool); 4] =
        [(false, true), (false, false), (true, false), (true, true)];

    #[test]
    fn one_detent_dispatches_one_step() {
        let (a, b, sw, now) = lines();
        let ring = SampleRing::<32>::new();
        let steps = Cell::new(0i32);

        let (mut sampler, encoder) = RotaryEncoder::new(
            &ring,
            SharedPin(&a),
            SharedPin(&b),
            SharedPin(&sw),
            TestClock(&now),
            EncoderConfig::default(),
        );
        let mut encoder = encoder.on_step(|dir| steps.set(steps.get() + i32::from(dir.as_i8())));

        for (la, lb) in CW_FROM_IDLE {
            a.set(la);
            b.set(lb);
            sampler.sample();
            now.set(now.get() + 2);
            encoder.update();
        }
        assert_eq!(steps.get(), 1);

        for (la, lb) in CCW_FROM_IDLE {
            a.set(la);
            b.set(lb);
            sampler.sample();
            now.set(now.get() + 2);
            encoder.update();
        }
        assert_eq!(steps.get(), 0);
    }

    #[test]
    fn burst_drains_in_one_update() {
        let (a, b, sw, now) = lines();
        let ring = SampleRing::<32>::new();
        let steps = Cell::new(0i32);

        let mut config = EncoderConfig::default();
        config.set_edge_debounce_ms(0);

        let (mut sampler, encoder) = RotaryEncoder::new(
            &ring,
            SharedPin(&a),
            SharedPin(&b),
            SharedPin(&sw),
            TestClock(&now),
            config,
        );
        let mut encoder = encoder.on_step(|dir| steps.set(steps.get() + i32::from(dir.as_i8())));

        // Whole detent queued before the task runs once
        for (la, lb) in CW_FROM_IDLE {
            a.set(la);
            b.set(lb);
            sampler.sample();
        }
        encoder.update();
        assert_eq!(steps.get(), 1);

        // Nothing left queued: a second pass changes nothing
        encoder.update();
        assert_eq!(steps.get(), 1);
    }

    #[test]
    fn click_fires_once_per_debounced_press() {
        let (_a, _b, sw, now) = lines();
        let ring = SampleRing::<32>::new();
        let clicks = Cell::new(0u32);

        let (_sampler, encoder) = RotaryEncoder::new(
            &ring,
            SharedPin(&_a),
            SharedPin(&_b),
            SharedPin(&sw),
            TestClock(&now),
            EncoderConfig::default(),
        );
        let mut encoder = encoder.on_click(|| clicks.set(clicks.get() + 1));

        // Active-low press
        now.set(100);
        sw.set(false);
        encoder.update();
        now.set(125);
        encoder.update();
        assert_eq!(clicks.get(), 1);
        assert!(encoder.is_pressed());

        // Holding adds nothing
        for t in (130..400).step_by(10) {
            now.set(t);
            encoder.update();
        }
        assert_eq!(clicks.get(), 1);

        // Release is silent, next press clicks again
        sw.set(true);
        now.set(500);
        encoder.update();
        now.set(530);
        encoder.update();
        assert_eq!(clicks.get(), 1);
        assert!(!encoder.is_pressed());

        sw.set(false);
        now.set(600);
        encoder.update();
        now.set(625);
        encoder.update();
        assert_eq!(clicks.get(), 2);
    }

    #[test]
    fn glitch_shorter_than_window_never_clicks() {
        let (_a, _b, sw, now) = lines();
        let ring = SampleRing::<32>::new();
        let clicks = Cell::new(0u32);

        let (_sampler, encoder) = RotaryEncoder::new(
            &ring,
            SharedPin(&_a),
            SharedPin(&_b),
            SharedPin(&sw),
            TestClock(&now),
            EncoderConfig::default(),
        );
        let mut encoder = encoder.on_click(|| clicks.set(clicks.get() + 1));

        now.set(100);
        sw.set(false);
        encoder.update();
        now.set(110);
        sw.set(true); // released before 20 ms of stability
        encoder.update();
        now.set(200);
        encoder.update();
        assert_eq!(clicks.get(), 0);
    }

    #[test]
    fn missing_handlers_discard_events() {
        let (a, b, sw, now) = lines();
        let ring = SampleRing::<32>::new();

        let (mut sampler, mut encoder) = RotaryEncoder::new(
            &ring,
            SharedPin(&a),
            SharedPin(&b),
            SharedPin(&sw),
            TestClock(&now),
            EncoderConfig::default(),
        );

        // Rotation and a press with nothing registered: both discarded
        for (la, lb) in CW_FROM_IDLE {
            a.set(la);
            b.set(lb);
            sampler.sample();
            now.set(now.get() + 2);
            encoder.update();
        }
        sw.set(false);
        now.set(now.get() + 50);
        encoder.update();
        now.set(now.get() + 50);
        encoder.update();
        assert!(encoder.is_pressed());
    }

    #[test]
    fn overflow_is_counted_not_fatal() {
        let (a, b, sw, now) = lines();
        let ring = SampleRing::<32>::new();

        let (mut sampler, mut encoder) = RotaryEncoder::new(
            &ring,
            SharedPin(&a),
            SharedPin(&b),
            SharedPin(&sw),
            TestClock(&now),
            EncoderConfig::default(),
        );

        // Interrupt storm: 40 edges with no task time
        for _ in 0..40 {
            sampler.sample();
        }
        assert_eq!(encoder.dropped_samples(), 9);

        // The engine digests the retained 31 and keeps running
        encoder.update();
        assert!(encoder.samples.is_empty());
        assert_eq!(encoder.dropped_samples(), 9);
    }

    #[test]
    fn tuning_setters_clamp_like_the_config() {
        let (a, b, sw, now) = lines();
        let ring = SampleRing::<32>::new();

        let (_sampler, mut encoder) = RotaryEncoder::new(
            &ring,
            SharedPin(&a),
            SharedPin(&b),
            SharedPin(&sw),
            TestClock(&now),
            EncoderConfig::default(),
        );

        encoder.set_edges_per_detent(2);
        assert_eq!(encoder.edges_per_detent(), 2);
        encoder.set_edges_per_detent(5);
        assert_eq!(encoder.edges_per_detent(), 4);

        encoder.set_reversal_slop_edges(3);
        assert_eq!(encoder.reversal_slop_edges(), 3);
        encoder.set_reversal_slop_edges(9);
        assert_eq!(encoder.reversal_slop_edges(), 1);

        encoder.set_edge_debounce_ms(0);
        assert_eq!(encoder.edge_debounce_ms(), 0);
        encoder.set_button_debounce_ms(30);
        assert_eq!(encoder.button_debounce_ms(), 30);
    }

    #[test]
    fn update_on_idle_lines_is_a_no_op() {
        let (a, b, sw, now) = lines();
        let ring = SampleRing::<32>::new();
        let steps = Cell::new(0i32);
        let clicks = Cell::new(0u32);

        let (_sampler, encoder) = RotaryEncoder::new(
            &ring,
            SharedPin(&a),
            SharedPin(&b),
            SharedPin(&sw),
            TestClock(&now),
            EncoderConfig::default(),
        );
        let mut encoder = encoder
            .on_step(|dir| steps.set(steps.get() + i32::from(dir.as_i8())))
            .on_click(|| clicks.set(clicks.get() + 1));

        for t in 0..100 {
            now.set(t * 10);
            encoder.update();
        }
        assert_eq!(steps.get(), 0);
        assert_eq!(clicks.get(), 0);
    }
}
