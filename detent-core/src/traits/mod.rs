//! Hardware abstraction traits
//!
//! These traits define the interface between the decode logic and the
//! host platform. The engine asks for nothing beyond "read a digital
//! level", "read a wrapping clock", and "run this callback on a pin edge".

pub mod gpio;
pub mod irq;
pub mod time;

pub use gpio::InputPin;
pub use irq::EdgeInterrupt;
pub use time::Clock;
