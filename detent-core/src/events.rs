//! Events emitted by the input engine
//!
//! A step carries its rotation direction; a click carries no payload and
//! is represented by the bare invocation of the click handler.

/// Rotation direction of a completed detent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Clockwise, +1 by convention
    Cw,
    /// Counter-clockwise, -1 by convention
    Ccw,
}

impl Direction {
    /// Signed step value: +1 for clockwise, -1 for counter-clockwise
    pub fn as_i8(self) -> i8 {
        match self {
            Direction::Cw => 1,
            Direction::Ccw => -1,
        }
    }
}
