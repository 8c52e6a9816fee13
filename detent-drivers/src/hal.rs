//! Adapters for `embedded-hal` pins
//!
//! The engine's [`InputPin`] is infallible because the decode path has no
//! error channel (ring overflow aside, nothing in this subsystem can
//! fail). HAL pins are fallible, so the adapter absorbs read errors here.

use detent_core::traits::InputPin;

/// Wraps an `embedded-hal` 1.0 input pin as an engine input
///
/// A failed read is mapped to logic high, the pulled-up idle level of all
/// three engine lines. On the active-low button this means an error can
/// never register as a phantom press.
pub struct HalPin<P> {
    pin: P,
}

impl<P> HalPin<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Get the wrapped pin back
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: embedded_hal::digital::InputPin> InputPin for HalPin<P> {
    fn is_high(&mut self) -> bool {
        self.pin.is_high().unwrap_or(true)
    }
}
