//! GPIO input abstraction
//!
//! Provides the digital-input trait implemented by chip-specific HALs or
//! adapters. All three engine lines (quadrature A/B, button) are expected
//! to be configured with pull-ups by the host.

/// Digital input pin
///
/// Implementations handle the actual hardware register reading for the
/// specific chip. Reads take `&mut self` so fallible or stateful HAL pin
/// types can be wrapped without interior mutability.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&mut self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&mut self) -> bool {
        !self.is_high()
    }
}
