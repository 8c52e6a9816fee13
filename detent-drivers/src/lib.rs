//! Hardware-facing input engine
//!
//! Binds platform pins and clock to the decode logic in `detent-core`:
//!
//! - [`Sampler`]: interrupt-side half, reads the quadrature lines and
//!   queues 2-bit samples
//! - [`RotaryEncoder`]: task-side half, drains the queue, decodes detents,
//!   debounces the button, and dispatches step/click handlers
//! - [`hal::HalPin`]: adapter for `embedded-hal` 1.0 input pins
//!
//! # Quick start
//! ```
//! use core::cell::Cell;
//! use detent_core::config::EncoderConfig;
//! use detent_core::ring::SampleRing;
//! use detent_core::traits::{Clock, InputPin};
//! use detent_drivers::RotaryEncoder;
//!
//! struct Pin<'a>(&'a Cell<bool>);
//! impl InputPin for Pin<'_> {
//!     fn is_high(&mut self) -> bool {
//!         self.0.get()
//!     }
//! }
//!
//! struct Millis<'a>(&'a Cell<u32>);
//! impl Clock for Millis<'_> {
//!     fn millis(&self) -> u32 {
//!         self.0.get()
//!     }
//!     fn micros(&self) -> u32 {
//!         self.0.get().wrapping_mul(1_000)
//!     }
//! }
//!
//! // Pull-ups: everything idles high
//! let (a, b, sw) = (Cell::new(true), Cell::new(true), Cell::new(true));
//! let now = Cell::new(0u32);
//! let ring = SampleRing::<32>::new();
//!
//! let (mut sampler, encoder) = RotaryEncoder::new(
//!     &ring,
//!     Pin(&a),
//!     Pin(&b),
//!     Pin(&sw),
//!     Millis(&now),
//!     EncoderConfig::default(),
//! );
//! let mut encoder = encoder.on_step(|dir| {
//!     let _ = dir.as_i8(); // feed the UI
//! });
//!
//! // On hardware: `sampler.attach(exti)` installs `sample()` as the
//! // pin-change callback and the host loop calls `update()`. Here we
//! // drive both halves by hand.
//! sampler.sample();
//! encoder.update();
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod encoder;
pub mod hal;
pub mod sampler;

pub use encoder::RotaryEncoder;
pub use sampler::Sampler;
