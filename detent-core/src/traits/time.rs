//! Monotonic clock abstraction
//!
//! Both counters are free-running fixed-width values that wrap at
//! `u32::MAX`. Consumers must compare instants with `wrapping_sub`,
//! never with relational operators.

/// Free-running millisecond/microsecond clock
pub trait Clock {
    /// Milliseconds since an arbitrary epoch, wrapping
    fn millis(&self) -> u32;

    /// Microseconds since an arbitrary epoch, wrapping
    fn micros(&self) -> u32;
}
